use crate::{Alphabet, ConfigError, SeparatorKind, escape_separator};

/// Checks that `candidate` can serve as the `kind` separator next to the
/// `other_kind` separator `other`.
///
/// A separator must be non-blank, share no character with the alphabet (a
/// core token could otherwise contain it), and differ from its sibling.
/// Characters that only decode as an alphabet character, such as `o` or an
/// upper-case letter, count as alphabet characters too.
///
/// # Errors
///
/// Returns the first violated rule as a [`ConfigError`].
pub fn validate_separator(
    kind: SeparatorKind,
    candidate: &str,
    alphabet: &Alphabet,
    other_kind: SeparatorKind,
    other: &str,
) -> Result<(), ConfigError> {
    if candidate.trim().is_empty() {
        return Err(ConfigError::BlankSeparator { kind });
    }
    if let Some(ch) = candidate
        .chars()
        .find(|&ch| alphabet.canonical(ch).is_some())
    {
        return Err(ConfigError::SeparatorInAlphabet {
            kind,
            separator: candidate.to_owned(),
            ch,
        });
    }
    if candidate == other {
        return Err(ConfigError::SeparatorClash {
            kind,
            other: other_kind,
            separator: candidate.to_owned(),
        });
    }
    Ok(())
}

/// Checks that the decoration separator `candidate` does not occur inside
/// `other`, a separator the parser sees after splitting on `candidate`.
///
/// Decorated identifiers carry separators escaped (`^` becomes `%5E`) and the
/// parser matches `candidate` both as is and escaped, so every combination of
/// raw and escaped forms is checked.
///
/// # Errors
///
/// Returns [`ConfigError::SeparatorOverlap`] on violation.
pub fn validate_not_within(
    kind: SeparatorKind,
    candidate: &str,
    other_kind: SeparatorKind,
    other: &str,
) -> Result<(), ConfigError> {
    let escaped = escape_separator(candidate);
    let escaped_other = escape_separator(other);
    let overlaps = [candidate, escaped.as_str()]
        .iter()
        .any(|&needle| other.contains(needle) || escaped_other.contains(needle));
    if overlaps {
        return Err(ConfigError::SeparatorOverlap {
            kind,
            separator: candidate.to_owned(),
            other: other_kind,
            other_separator: other.to_owned(),
        });
    }
    Ok(())
}
