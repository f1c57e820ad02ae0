use crate::EncodedIdModel;

pub const NORMALIZED_ENCODED_ID: &str = "normalized_encoded_id";
pub const PREFIXED_ENCODED_ID: &str = "prefixed_encoded_id";

/// A column value together with the value last written to storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tracked {
    value: Option<String>,
    original: Option<String>,
}

impl Tracked {
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// `true` while the value differs from what was last written.
    pub fn is_changed(&self) -> bool {
        self.value != self.original
    }

    fn assign(&mut self, value: Option<String>) {
        self.value = value;
    }

    fn commit(&mut self) {
        self.original.clone_from(&self.value);
    }

    fn load(&mut self, value: Option<String>) {
        self.original.clone_from(&value);
        self.value = value;
    }
}

/// The `normalized_encoded_id` and `prefixed_encoded_id` columns of a
/// record, with change tracking.
///
/// Both columns are derived from the record's id. The setters exist so
/// that assignments can be caught: saving a record with an assigned column
/// fails with a [`crate::ReadOnlyViolation`]. The [`crate::Encoder`]
/// guard methods are the only supported way to fill them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MirrorColumns {
    normalized: Tracked,
    prefixed: Tracked,
    committed_id: Option<u64>,
}

impl MirrorColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns as loaded from a stored row.
    pub fn loaded(id: u64, normalized: Option<String>, prefixed: Option<String>) -> Self {
        let mut columns = Self::default();
        columns.load(id, normalized, prefixed);
        columns
    }

    pub fn normalized_encoded_id(&self) -> Option<&str> {
        self.normalized.value()
    }

    pub fn prefixed_encoded_id(&self) -> Option<&str> {
        self.prefixed.value()
    }

    pub fn set_normalized_encoded_id(&mut self, value: Option<String>) {
        self.normalized.assign(value);
    }

    pub fn set_prefixed_encoded_id(&mut self, value: Option<String>) {
        self.prefixed.assign(value);
    }

    pub fn normalized_encoded_id_changed(&self) -> bool {
        self.normalized.is_changed()
    }

    pub fn prefixed_encoded_id_changed(&self) -> bool {
        self.prefixed.is_changed()
    }

    /// The id the columns were last written for.
    pub fn committed_id(&self) -> Option<u64> {
        self.committed_id
    }

    /// Forgets the columns and their history, as for a new record.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Stages freshly computed values, to be written with the next save.
    pub(crate) fn refresh(&mut self, normalized: String, prefixed: String) {
        self.normalized.assign(Some(normalized));
        self.prefixed.assign(Some(prefixed));
    }

    /// Marks the current values as written for `id`.
    pub(crate) fn commit(&mut self, id: u64) {
        self.normalized.commit();
        self.prefixed.commit();
        self.committed_id = Some(id);
    }

    /// Replaces values and history with what storage holds for `id`.
    pub(crate) fn load(&mut self, id: u64, normalized: Option<String>, prefixed: Option<String>) {
        self.normalized.load(normalized);
        self.prefixed.load(prefixed);
        self.committed_id = Some(id);
    }
}

/// A record type that persists its encoded ids in mirror columns.
pub trait PersistsEncodedId: EncodedIdModel {
    fn mirror_columns(&self) -> &MirrorColumns;

    fn mirror_columns_mut(&mut self) -> &mut MirrorColumns;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments_are_tracked() {
        let mut columns = MirrorColumns::loaded(1, Some("abcd".into()), Some("x_abcd".into()));
        assert!(!columns.normalized_encoded_id_changed());

        columns.set_normalized_encoded_id(Some("other".into()));
        assert!(columns.normalized_encoded_id_changed());
        assert!(!columns.prefixed_encoded_id_changed());

        columns.set_normalized_encoded_id(Some("abcd".into()));
        assert!(!columns.normalized_encoded_id_changed());
    }

    #[test]
    fn commit_clears_pending_changes() {
        let mut columns = MirrorColumns::new();
        columns.refresh("abcd".into(), "x_abcd".into());
        assert!(columns.prefixed_encoded_id_changed());

        columns.commit(7);
        assert!(!columns.normalized_encoded_id_changed());
        assert!(!columns.prefixed_encoded_id_changed());
        assert_eq!(columns.committed_id(), Some(7));
        assert_eq!(columns.prefixed_encoded_id(), Some("x_abcd"));
    }

    #[test]
    fn reset_forgets_everything() {
        let mut columns = MirrorColumns::loaded(1, Some("abcd".into()), Some("x_abcd".into()));
        columns.set_prefixed_encoded_id(Some("changed".into()));
        columns.reset();
        assert_eq!(columns, MirrorColumns::default());
        assert!(!columns.prefixed_encoded_id_changed());
        assert_eq!(columns.committed_id(), None);
    }
}
