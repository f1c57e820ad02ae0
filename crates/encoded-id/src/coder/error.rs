/// Errors raised when a coder is asked to encode.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// No ids were given.
    #[error("you must pass an id or a list of ids to encode")]
    NoIds,
}

/// Errors raised when a token cannot be decoded.
///
/// Callers accepting identifiers from the outside world treat every variant
/// as "no match".
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// Nothing left to decode once separators were stripped.
    #[error("the encoded id is empty")]
    Empty,

    /// A character is neither in the alphabet nor equivalent to one that is.
    #[error("invalid character {ch:?} at index {index}")]
    InvalidCharacter { ch: char, index: usize },

    /// Two delimiters with no digits in between, or a trailing delimiter.
    #[error("the encoded id contains an empty segment")]
    EmptySegment,

    /// A decoded id does not fit in a `u64`.
    #[error("a decoded id overflows 64 bits")]
    Overflow,

    /// The token decodes, but is not what encoding the decoded ids yields.
    #[error("the encoded id is not canonical")]
    NonCanonical,
}
