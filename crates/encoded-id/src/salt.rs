/// Shortest base salt accepted, in characters.
pub const MIN_SALT_LEN: usize = 4;

/// Errors raised while deriving the per-type salt.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum SaltError {
    /// The record type has no name to key the salt with.
    #[error(
        "the record type must have a name to ensure encoded id uniqueness; set one or override the salt"
    )]
    MissingTypeName,

    /// The base salt is unset, blank or too short.
    #[error("encoded id salt is invalid: it must be at least {min} non-blank characters")]
    InvalidSalt { min: usize },
}

/// Derives the salt a record type encodes its ids with.
///
/// The result is `"{type_name}/{base_salt}"`, passed verbatim to the coder as
/// keying material, so two types sharing a base salt still produce unrelated
/// tokens for the same numeric id.
///
/// # Errors
///
/// - [`SaltError::MissingTypeName`] when `type_name` is blank
/// - [`SaltError::InvalidSalt`] when `base_salt` is `None`, blank, or shorter
///   than [`MIN_SALT_LEN`] characters
///
/// # Example
///
/// ```
/// use encoded_id::derive_salt;
///
/// assert_eq!(derive_salt("User", Some("abcd1234")).unwrap(), "User/abcd1234");
/// assert!(derive_salt("User", Some("abc")).is_err());
/// assert!(derive_salt("", Some("abcd1234")).is_err());
/// ```
pub fn derive_salt(type_name: &str, base_salt: Option<&str>) -> Result<String, SaltError> {
    if type_name.trim().is_empty() {
        return Err(SaltError::MissingTypeName);
    }
    let base = base_salt.unwrap_or_default();
    if base.trim().is_empty() || base.chars().count() < MIN_SALT_LEN {
        return Err(SaltError::InvalidSalt { min: MIN_SALT_LEN });
    }
    Ok(format!("{type_name}/{base}"))
}
