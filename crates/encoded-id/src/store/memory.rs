use crate::{
    Coder, Encoder, Error, MirrorWriter, PersistsEncodedId, RecordLookup, Result, StoredRecord,
};
use std::collections::BTreeMap;

/// An in-memory table of records keyed by primary key.
///
/// Ids are assigned sequentially from 1. The `*_persisted` methods run the
/// mirror column lifecycle the way a database adapter would around its
/// inserts and updates; the remaining methods are raw and skip it.
#[derive(Clone, Debug)]
pub struct MemoryStore<R> {
    rows: BTreeMap<u64, R>,
    next_id: u64,
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<R: StoredRecord> MemoryStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&R> {
        self.rows.get(&id)
    }

    /// Stores `record` as is, assigning an id if it has none.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateId`] if a row with the record's id exists.
    pub fn insert(&mut self, mut record: R) -> Result<u64> {
        let id = self.claim_id(&mut record)?;
        self.rows.insert(id, record);
        Ok(id)
    }

    /// Stores a copy of `record`, assigning its id first if needed.
    ///
    /// # Errors
    ///
    /// As [`MemoryStore::insert`].
    pub fn create(&mut self, record: &mut R) -> Result<u64> {
        let id = self.claim_id(record)?;
        self.rows.insert(id, record.clone());
        Ok(id)
    }

    /// Replaces `record` with its stored row and drops memoized ids.
    ///
    /// # Errors
    ///
    /// [`Error::NotPersisted`] without an id, [`Error::NotFound`] without a
    /// row.
    pub fn reload(&self, record: &mut R) -> Result<()> {
        let id = record.id().ok_or(Error::NotPersisted {
            type_name: R::TYPE_NAME,
        })?;
        let row = self.rows.get(&id).ok_or_else(|| not_found::<R>(id))?;
        *record = row.clone();
        record.encoded_id_cache().clear();
        Ok(())
    }

    /// Moves the row of `record` to `new_id` and updates `record`'s id,
    /// running no hooks.
    ///
    /// # Errors
    ///
    /// As [`MemoryStore::reload`], or [`Error::DuplicateId`] if another row
    /// already has `new_id`.
    pub fn update_column_id(&mut self, record: &mut R, new_id: u64) -> Result<()> {
        let id = record.id().ok_or(Error::NotPersisted {
            type_name: R::TYPE_NAME,
        })?;
        if new_id != id {
            self.ensure_vacant(new_id)?;
        }
        let mut row = self.rows.remove(&id).ok_or_else(|| not_found::<R>(id))?;
        row.set_id(new_id);
        self.rows.insert(new_id, row);
        record.set_id(new_id);
        self.next_id = self.next_id.max(new_id.saturating_add(1));
        Ok(())
    }

    /// Picks the id for a new row.
    fn claim_id(&mut self, record: &mut R) -> Result<u64> {
        if let Some(id) = record.id() {
            self.ensure_vacant(id)?;
        }
        Ok(self.assign_id(record))
    }

    fn assign_id(&mut self, record: &mut R) -> u64 {
        match record.id() {
            Some(id) => {
                self.next_id = self.next_id.max(id.saturating_add(1));
                id
            }
            None => {
                let id = self.next_id;
                self.next_id += 1;
                record.set_id(id);
                id
            }
        }
    }

    fn ensure_vacant(&self, id: u64) -> Result<()> {
        if self.rows.contains_key(&id) {
            #[cfg(feature = "tracing")]
            tracing::warn!(type_name = R::TYPE_NAME, id, "refusing to overwrite an existing row");
            return Err(Error::DuplicateId {
                type_name: R::TYPE_NAME,
                id,
            });
        }
        Ok(())
    }
}

impl<R> MemoryStore<R>
where
    R: StoredRecord + PersistsEncodedId,
{
    /// Stores `record` as a row written while its mirror columns were not
    /// maintained: whatever the columns hold is taken as stored.
    ///
    /// # Errors
    ///
    /// As [`MemoryStore::insert`].
    pub fn insert_unguarded(&mut self, mut record: R) -> Result<u64> {
        let id = self.claim_id(&mut record)?;
        let columns = record.mirror_columns_mut();
        let normalized = columns.normalized_encoded_id().map(str::to_owned);
        let prefixed = columns.prefixed_encoded_id().map(str::to_owned);
        columns.load(id, normalized, prefixed);
        self.rows.insert(id, record);
        Ok(id)
    }

    /// Inserts `record` and fills its mirror columns.
    ///
    /// # Errors
    ///
    /// A [`crate::ReadOnlyViolation`] if columns were assigned,
    /// [`Error::DuplicateId`] if the record's id is taken, or any error from
    /// the guard.
    pub fn create_persisted<C: Coder>(
        &mut self,
        encoder: &Encoder<R, C>,
        record: &mut R,
    ) -> Result<()> {
        encoder.prevent_update_of_mirror_columns(record)?;
        self.create(record)?;
        encoder.set_normalized_encoded_id(self, record)?;
        encoder.check_encoded_id_persisted(record)
    }

    /// Writes `record`, refreshing its mirror columns when its id changed.
    /// Records never stored go through [`MemoryStore::create_persisted`].
    ///
    /// # Errors
    ///
    /// A [`crate::ReadOnlyViolation`] if columns were assigned,
    /// [`Error::DuplicateId`] if the record's new id belongs to another row,
    /// or any error from the guard.
    pub fn save_persisted<C: Coder>(
        &mut self,
        encoder: &Encoder<R, C>,
        record: &mut R,
    ) -> Result<()> {
        let Some(committed_id) = record.mirror_columns().committed_id() else {
            return self.create_persisted(encoder, record);
        };
        if let Some(id) = record.id().filter(|&id| id != committed_id) {
            self.ensure_vacant(id)?;
        }
        encoder.before_save(record)?;

        let id = self.assign_id(record);
        if committed_id != id {
            self.rows.remove(&committed_id);
        }
        record.mirror_columns_mut().commit(id);
        self.rows.insert(id, record.clone());
        encoder.check_encoded_id_persisted(record)
    }
}

impl<R> MirrorWriter<R> for MemoryStore<R>
where
    R: StoredRecord + PersistsEncodedId,
{
    fn update_mirror_columns(&mut self, id: u64, normalized: &str, prefixed: &str) -> Result<()> {
        let row = self.rows.get_mut(&id).ok_or_else(|| not_found::<R>(id))?;
        row.mirror_columns_mut()
            .load(id, Some(normalized.to_owned()), Some(prefixed.to_owned()));
        Ok(())
    }
}

impl<R: StoredRecord> RecordLookup<R> for MemoryStore<R> {
    fn find_by_id(&self, id: u64) -> Option<R> {
        self.rows.get(&id).cloned()
    }

    fn where_ids(&self, ids: &[u64]) -> Vec<R> {
        self.rows
            .iter()
            .filter(|(id, _)| ids.contains(id))
            .map(|(_, record)| record.clone())
            .collect()
    }
}

fn not_found<R: StoredRecord>(id: u64) -> Error {
    Error::NotFound {
        type_name: R::TYPE_NAME,
        input: id.to_string(),
    }
}
