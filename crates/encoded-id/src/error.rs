//! The crate-wide error type.
//!
//! Each concern owns a small error enum next to the code that raises it
//! ([`ConfigError`], [`SaltError`], [`BuildError`], [`EncodeError`],
//! [`FormatError`], [`ConsistencyError`], [`ReadOnlyViolation`]). [`Error`]
//! unifies them so operations that cross concerns (finders, the persistence
//! guard) can use `?` throughout.
//!
//! [`FormatError`] is deliberately recoverable: the decode-facing boundary
//! ([`crate::Encoder::decode_encoded_id`] and the finders) turns it into
//! absence. Everything else surfaces to the caller.

use crate::{
    BuildError, ConfigError, ConsistencyError, EncodeError, FormatError, ReadOnlyViolation,
    SaltError,
};

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors `encoded-id` can produce.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A configuration write was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A salt could not be derived for a record type.
    #[error(transparent)]
    Salt(#[from] SaltError),

    /// A decorated identifier could not be assembled.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The coder refused to encode the given ids.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The coder could not decode a token.
    ///
    /// Only surfaces from the low-level [`crate::Coder`] API; finders and
    /// [`crate::Encoder::decode_encoded_id`] translate it into absence.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Persisted mirror columns diverged from their recomputed values.
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    /// A mirror column was written outside the guarded refresh path.
    #[error(transparent)]
    ReadOnly(#[from] ReadOnlyViolation),

    /// Mirror columns can only be computed for records that have an id.
    #[error("cannot set the encoded id columns of a {type_name} record which is not persisted")]
    NotPersisted {
        /// Name of the record type.
        type_name: &'static str,
    },

    /// A strict lookup found nothing, or the record did not satisfy the
    /// identity constraint.
    #[error("no {type_name} record found for encoded id {input:?}")]
    NotFound {
        /// Name of the record type.
        type_name: &'static str,
        /// The external identifier the lookup was given.
        input: String,
    },

    /// A write would replace the row of another record.
    #[error("a {type_name} record with id {id} already exists")]
    DuplicateId {
        /// Name of the record type.
        type_name: &'static str,
        id: u64,
    },
}

impl Error {
    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for errors signalling drift between persisted mirror
    /// columns and their source of truth.
    pub fn is_consistency_error(&self) -> bool {
        matches!(self, Self::Consistency(_))
    }
}
