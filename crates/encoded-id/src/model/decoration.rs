use crate::{BuildError, EncodedIdModel};
use core::fmt;
use std::sync::Arc;

type DecorationFn<R> = dyn Fn(&R) -> Result<String, BuildError> + Send + Sync;

/// Where an encoder takes annotation or slug text from.
pub enum DecorationSource<R> {
    /// The record's [`EncodedIdModel`] method.
    Default,
    /// A per-encoder function.
    Custom(Arc<DecorationFn<R>>),
}

impl<R> DecorationSource<R> {
    /// A fallible custom source.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&R) -> Result<String, BuildError> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// A custom source that always produces text. Blank text is still
    /// rejected when the identifier is built.
    pub fn text<F>(f: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        Self::custom(move |record| Ok(f(record)))
    }
}

impl<R: EncodedIdModel> DecorationSource<R> {
    pub(crate) fn annotation(&self, record: &R) -> Result<String, BuildError> {
        match self {
            Self::Default => record.annotation_for_encoded_id(),
            Self::Custom(f) => f(record),
        }
    }

    pub(crate) fn slug(&self, record: &R) -> Result<String, BuildError> {
        match self {
            Self::Default => record.name_for_encoded_id_slug(),
            Self::Custom(f) => f(record),
        }
    }
}

impl<R> Default for DecorationSource<R> {
    fn default() -> Self {
        Self::Default
    }
}

impl<R> Clone for DecorationSource<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Default => Self::Default,
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for DecorationSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
