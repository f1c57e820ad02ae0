use crate::{
    Coder, ConsistencyError, Encoder, Error, MirrorWriter, NORMALIZED_ENCODED_ID,
    PREFIXED_ENCODED_ID, PersistsEncodedId, ReadOnlyViolation, Result,
};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Lifecycle of the mirror columns.
///
/// A storage adapter calls these around its writes:
///
/// - after inserting a new row: [`Encoder::set_normalized_encoded_id`]
/// - before updating a row: [`Encoder::before_save`]
/// - after either write is durable: [`Encoder::check_encoded_id_persisted`]
/// - when copying a record into a new, unsaved one: [`Encoder::duplicate`]
impl<R, C> Encoder<R, C>
where
    R: PersistsEncodedId,
    C: Coder,
{
    /// Computes both mirror columns and writes them through `writer`,
    /// bypassing the read-only check.
    ///
    /// # Errors
    ///
    /// [`Error::NotPersisted`] if the record has no id, encoding errors, or
    /// whatever the writer reports.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn set_normalized_encoded_id<W>(&self, writer: &mut W, record: &mut R) -> Result<()>
    where
        W: MirrorWriter<R> + ?Sized,
    {
        let id = require_id(record)?;
        let (normalized, prefixed) = self.mirror_values(record, id)?;
        writer.update_mirror_columns(id, &normalized, &prefixed)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(type_name = R::TYPE_NAME, id, %normalized, "set encoded id columns");

        record
            .mirror_columns_mut()
            .load(id, Some(normalized), Some(prefixed));
        Ok(())
    }

    /// Recomputes both mirror columns in memory; they are written with the
    /// record.
    ///
    /// # Errors
    ///
    /// [`Error::NotPersisted`] if the record has no id, or encoding errors.
    pub fn update_normalized_encoded_id(&self, record: &mut R) -> Result<()> {
        let id = require_id(record)?;
        let (normalized, prefixed) = self.mirror_values(record, id)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            type_name = R::TYPE_NAME,
            id,
            previous_id = record.mirror_columns().committed_id(),
            "refreshing encoded id columns"
        );

        record.mirror_columns_mut().refresh(normalized, prefixed);
        Ok(())
    }

    /// `true` when the id changed since the columns were last written, or
    /// the normalized column of a stored record is blank.
    pub fn should_update_normalized_encoded_id(&self, record: &R) -> bool {
        let columns = record.mirror_columns();
        let Some(committed_id) = columns.committed_id() else {
            return false;
        };
        record.id() != Some(committed_id)
            || columns
                .normalized_encoded_id()
                .is_none_or(|normalized| normalized.trim().is_empty())
    }

    /// Rejects assignments made through the [`crate::MirrorColumns`]
    /// setters.
    ///
    /// # Errors
    ///
    /// A [`ReadOnlyViolation`] naming the first assigned column.
    pub fn prevent_update_of_mirror_columns(&self, record: &R) -> Result<(), ReadOnlyViolation> {
        let columns = record.mirror_columns();
        let column = if columns.normalized_encoded_id_changed() {
            NORMALIZED_ENCODED_ID
        } else if columns.prefixed_encoded_id_changed() {
            PREFIXED_ENCODED_ID
        } else {
            return Ok(());
        };
        Err(ReadOnlyViolation {
            column,
            type_name: R::TYPE_NAME,
            id: record.id(),
        })
    }

    /// Runs before a stored record is written: rejects assigned columns,
    /// then refreshes them if needed.
    ///
    /// # Errors
    ///
    /// See [`Encoder::prevent_update_of_mirror_columns`] and
    /// [`Encoder::update_normalized_encoded_id`].
    pub fn before_save(&self, record: &mut R) -> Result<()> {
        self.prevent_update_of_mirror_columns(record)?;
        if self.should_update_normalized_encoded_id(record) {
            self.update_normalized_encoded_id(record)?;
        }
        Ok(())
    }

    /// Recomputes both columns and compares them with the record's, the
    /// normalized column first.
    ///
    /// # Errors
    ///
    /// A [`ConsistencyError`] on mismatch, [`Error::NotPersisted`] without
    /// an id, or encoding errors.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn check_encoded_id_persisted(&self, record: &R) -> Result<()> {
        let id = require_id(record)?;
        let columns = record.mirror_columns();

        let expected = self.encode_normalized_encoded_id(id)?;
        if columns.normalized_encoded_id() != Some(expected.as_str()) {
            return Err(inconsistent(ConsistencyError::NormalizedMismatch {
                type_name: R::TYPE_NAME,
                stored: columns.normalized_encoded_id().map(str::to_owned),
                expected,
            }));
        }

        let expected = self.encoded_id(record)?;
        if columns.prefixed_encoded_id() != expected.as_deref() {
            return Err(inconsistent(ConsistencyError::PrefixedMismatch {
                type_name: R::TYPE_NAME,
                id,
                stored: columns.prefixed_encoded_id().map(str::to_owned),
                expected,
            }));
        }
        Ok(())
    }

    /// A copy of `record` to be saved as a new row: mirror columns and
    /// memoized ids are cleared and nothing is pending.
    #[must_use]
    pub fn duplicate(&self, record: &R) -> R
    where
        R: Clone,
    {
        let mut copy = record.clone();
        copy.mirror_columns_mut().reset();
        copy.encoded_id_cache().clear();
        copy
    }

    fn mirror_values(&self, record: &R, id: u64) -> Result<(String, String)> {
        let normalized = self.encode_normalized_encoded_id(id)?;
        let prefixed = self.encoded_id(record)?.ok_or(Error::NotPersisted {
            type_name: R::TYPE_NAME,
        })?;
        Ok((normalized, prefixed))
    }
}

fn require_id<R: PersistsEncodedId>(record: &R) -> Result<u64> {
    record.id().ok_or(Error::NotPersisted {
        type_name: R::TYPE_NAME,
    })
}

fn inconsistent(err: ConsistencyError) -> Error {
    #[cfg(feature = "tracing")]
    tracing::error!(error = %err, "encoded id columns out of sync");
    Error::Consistency(err)
}
