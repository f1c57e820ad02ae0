use crate::{BuildError, parameterize};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Form-style escaping: everything but ASCII alphanumerics and `-_.~`.
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-escapes a separator the way it is spliced into decorated
/// identifiers. Spaces become `+`.
///
/// ```
/// use encoded_id::escape_separator;
///
/// assert_eq!(escape_separator("--"), "--");
/// assert_eq!(escape_separator("^"), "%5E");
/// assert_eq!(escape_separator("***"), "%2A%2A%2A");
/// assert_eq!(escape_separator(" | "), "+%7C+");
/// ```
pub fn escape_separator(separator: &str) -> String {
    separator
        .split(' ')
        .map(|part| utf8_percent_encode(part, FORM).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

/// Assembles `parameterize(decoration) + escape_separator(separator) + core`.
///
/// Without a decoration the core is returned unchanged.
///
/// # Errors
///
/// [`BuildError::MissingParts`] if `core` is blank, or if a decoration was
/// given but normalizes to nothing.
///
/// # Example
///
/// ```
/// use encoded_id::build;
///
/// assert_eq!(build(None, "abcd-efgh", "--").unwrap(), "abcd-efgh");
/// assert_eq!(
///     build(Some("Jane Doe"), "abcd-efgh", "--").unwrap(),
///     "jane-doe--abcd-efgh"
/// );
/// assert!(build(Some("!!!"), "abcd-efgh", "--").is_err());
/// ```
pub fn build(decoration: Option<&str>, core: &str, separator: &str) -> Result<String, BuildError> {
    assemble("decoration", decoration, core, separator)
}

/// Prefixes `core` with an annotation, e.g. `user_abcd-efgh`.
///
/// # Errors
///
/// See [`build`].
pub fn annotated_id(annotation: &str, core: &str, separator: &str) -> Result<String, BuildError> {
    assemble("annotation", Some(annotation), core, separator)
}

/// Prefixes an (optionally annotated) id with a slug, e.g.
/// `jane-doe--user_abcd-efgh`.
///
/// # Errors
///
/// See [`build`].
pub fn slugged_id(slug: &str, id: &str, separator: &str) -> Result<String, BuildError> {
    assemble("slug", Some(slug), id, separator)
}

fn assemble(
    part: &'static str,
    decoration: Option<&str>,
    core: &str,
    separator: &str,
) -> Result<String, BuildError> {
    if core.trim().is_empty() {
        return Err(BuildError::MissingParts { part });
    }
    let Some(decoration) = decoration else {
        return Ok(core.to_owned());
    };
    let decoration = parameterize(decoration);
    if decoration.is_empty() {
        return Err(BuildError::MissingParts { part });
    }
    let separator = escape_separator(separator);

    let mut out = String::with_capacity(decoration.len() + separator.len() + core.len());
    out.push_str(&decoration);
    out.push_str(&separator);
    out.push_str(core);
    Ok(out)
}
