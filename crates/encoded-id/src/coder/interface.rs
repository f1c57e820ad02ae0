use crate::{Alphabet, ConfigError, EncodeError, FormatError};

/// Everything a coder is keyed and shaped by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoderSettings {
    /// Keying material, usually from [`crate::derive_salt`].
    pub salt: String,
    /// Minimum token length before grouping.
    pub id_length: usize,
    /// Characters per group; `None` disables grouping.
    pub character_group_size: Option<usize>,
    /// Inserted between groups.
    pub group_separator: String,
    /// Characters tokens are drawn from.
    pub alphabet: Alphabet,
}

impl CoderSettings {
    /// The same settings with grouping disabled, as used for the normalized
    /// mirror column.
    #[must_use]
    pub fn ungrouped(mut self) -> Self {
        self.character_group_size = None;
        self
    }

    #[must_use]
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = salt.into();
        self
    }

    #[must_use]
    pub fn with_id_length(mut self, id_length: usize) -> Self {
        self.id_length = id_length;
        self
    }

    #[must_use]
    pub fn with_character_group_size(mut self, size: Option<usize>) -> Self {
        self.character_group_size = size;
        self
    }
}

/// A reversible transform between numeric ids and opaque tokens.
///
/// Implementations must be deterministic for given [`CoderSettings`] and must
/// report undecodable input as a [`FormatError`], never by panicking, so the
/// decode boundary can degrade to "no match".
pub trait Coder: Sized {
    /// Builds a coder.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot produce unambiguous tokens.
    fn from_settings(settings: CoderSettings) -> Result<Self, ConfigError>;

    /// Encodes one or more ids into a single token.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NoIds`] for an empty slice.
    fn encode(&self, ids: &[u64]) -> Result<String, EncodeError>;

    /// Decodes a token back into the ids it was built from.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] for anything [`Coder::encode`] would not
    /// have produced.
    fn decode(&self, token: &str) -> Result<Vec<u64>, FormatError>;
}
