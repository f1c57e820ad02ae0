use crate::{EncodedIdModel, Result};

/// A record a storage adapter can assign primary keys to.
pub trait StoredRecord: EncodedIdModel + Clone {
    fn set_id(&mut self, id: u64);
}

/// Storage's write path for mirror columns.
///
/// Implementations update both columns of one row in a single write,
/// skipping whatever validation and hooks a normal save runs.
pub trait MirrorWriter<R> {
    /// # Errors
    ///
    /// Implementation defined, typically [`crate::Error::NotFound`] when no
    /// row has primary key `id`.
    fn update_mirror_columns(&mut self, id: u64, normalized: &str, prefixed: &str) -> Result<()>;
}
