use crate::escape_separator;

/// A decorated identifier split into its parts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompositeIdentifier {
    /// The slug or annotation, as it appeared in the input.
    pub decoration: Option<String>,
    /// Everything after the separator; the whole input when undecorated.
    pub core: String,
}

/// Splits `input` at the last occurrence of `separator`.
///
/// The separator is matched both literally and in the escaped form
/// [`crate::build`] writes, so anything `build` produced parses back into
/// the same parts. The core side is never split further: separators are
/// validated not to occur in core tokens, while decorations may contain
/// them. Parsing never fails; input without a separator is returned as a
/// bare core.
///
/// ```
/// use encoded_id::{CompositeIdentifier, parse};
///
/// let parsed = parse("jane-doe--abcd-efgh", "--");
/// assert_eq!(parsed.decoration.as_deref(), Some("jane-doe"));
/// assert_eq!(parsed.core, "abcd-efgh");
///
/// assert_eq!(parse("abcd-efgh", "--").decoration, None);
/// assert_eq!(parse("user%5Eabc123", "^").core, "abc123");
/// ```
pub fn parse(input: &str, separator: &str) -> CompositeIdentifier {
    if input.trim().is_empty() {
        return CompositeIdentifier::default();
    }
    if separator.is_empty() {
        return bare(input);
    }

    let escaped = escape_separator(separator);
    let literal = input.rfind(separator).map(|at| (at, at + separator.len()));
    let encoded = if escaped == separator {
        None
    } else {
        input.rfind(escaped.as_str()).map(|at| (at, at + escaped.len()))
    };

    // Prefer the match that ends last; at the same end, the longer one.
    let split = match (literal, encoded) {
        (Some(a), Some(b)) => Some(if (b.1, b.1 - b.0) > (a.1, a.1 - a.0) { b } else { a }),
        (a, b) => a.or(b),
    };
    let Some((start, end)) = split else {
        return bare(input);
    };

    let decoration = &input[..start];
    CompositeIdentifier {
        decoration: (!decoration.is_empty()).then(|| decoration.to_owned()),
        core: input[end..].to_owned(),
    }
}

fn bare(input: &str) -> CompositeIdentifier {
    CompositeIdentifier {
        decoration: None,
        core: input.to_owned(),
    }
}
