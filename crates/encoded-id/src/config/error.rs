use core::fmt;

/// The separators a [`crate::Configuration`] carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeparatorKind {
    /// Chunks a core token into groups (`abcd-efgh`).
    Group,
    /// Joins a slug to an identifier (`my-product--abcd-efgh`).
    Slugged,
    /// Joins an annotation to a core token (`user_abcd-efgh`).
    Annotated,
}

impl fmt::Display for SeparatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group => f.write_str("group separator"),
            Self::Slugged => f.write_str("slugged id separator"),
            Self::Annotated => f.write_str("annotated id separator"),
        }
    }
}

/// Errors raised synchronously when a configuration value is written.
///
/// A rejected write never modifies the configuration it was applied to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The alphabet has fewer unique characters than the coder needs.
    #[error("the alphabet must contain at least {min} unique characters, got {len}")]
    AlphabetTooSmall { len: usize, min: usize },

    /// The alphabet lists the same character twice.
    #[error("the alphabet contains the character {ch:?} more than once")]
    AlphabetDuplicate { ch: char },

    /// The alphabet contains whitespace.
    #[error("the alphabet must not contain whitespace, got {ch:?}")]
    AlphabetWhitespace { ch: char },

    /// An equivalence maps from an alphabet character, or to a character that
    /// is not part of the alphabet.
    #[error("invalid alphabet equivalence {from:?} -> {to:?}")]
    InvalidEquivalence { from: char, to: char },

    /// The separator is empty or only whitespace.
    #[error("the {kind} must not be blank or part of the alphabet")]
    BlankSeparator { kind: SeparatorKind },

    /// A character of the separator is also a character of the alphabet.
    #[error("the {kind} {separator:?} must not be part of the alphabet (found {ch:?})")]
    SeparatorInAlphabet {
        kind: SeparatorKind,
        separator: String,
        ch: char,
    },

    /// Two separators are identical.
    #[error("the {kind} {separator:?} must not be the same as the {other}")]
    SeparatorClash {
        kind: SeparatorKind,
        other: SeparatorKind,
        separator: String,
    },

    /// A decoration separator occurs inside a separator that is parsed after
    /// it, which would make splitting ambiguous.
    #[error("the {kind} {separator:?} must not occur inside the {other} {other_separator:?}")]
    SeparatorOverlap {
        kind: SeparatorKind,
        separator: String,
        other: SeparatorKind,
        other_separator: String,
    },

    /// Character groups must hold at least one character.
    #[error("the character group size must be greater than 0")]
    InvalidGroupSize,

    /// Encoded ids must be at least one character long.
    #[error("the minimum id length must be greater than 0")]
    InvalidIdLength,
}
