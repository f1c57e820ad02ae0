use core::{cell::RefCell, fmt};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Hash,
    Annotated,
    Slugged,
}

#[derive(Default)]
struct Memo {
    with_id: Option<u64>,
    hash: Option<String>,
    annotated: Option<String>,
    slugged: Option<String>,
}

impl Memo {
    fn slot(&mut self, slot: Slot) -> &mut Option<String> {
        match slot {
            Slot::Hash => &mut self.hash,
            Slot::Annotated => &mut self.annotated,
            Slot::Slugged => &mut self.slugged,
        }
    }
}

/// Memoized identifiers of one record instance.
///
/// Entries are keyed by the id they were computed for: reading through an
/// [`crate::Encoder`] after the record's id changed recomputes them. A
/// cloned cache starts empty, so a duplicated record never reports its
/// source's identifiers.
#[derive(Default)]
pub struct EncodedIdCache {
    memo: RefCell<Memo>,
}

impl EncodedIdCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the cached values were computed for.
    pub fn memoized_with_id(&self) -> Option<u64> {
        self.memo.borrow().with_id
    }

    pub fn is_empty(&self) -> bool {
        let memo = self.memo.borrow();
        memo.hash.is_none() && memo.annotated.is_none() && memo.slugged.is_none()
    }

    /// Drops every cached value.
    pub fn clear(&self) {
        *self.memo.borrow_mut() = Memo::default();
    }

    /// Clears the cache if it was filled for an id other than `id`.
    pub(crate) fn sync(&self, id: u64) {
        let stale = self.memo.borrow().with_id.is_some_and(|with| with != id);
        if stale {
            self.clear();
        }
    }

    pub(crate) fn get(&self, slot: Slot) -> Option<String> {
        self.memo.borrow_mut().slot(slot).clone()
    }

    pub(crate) fn store(&self, id: u64, slot: Slot, value: String) {
        let mut memo = self.memo.borrow_mut();
        memo.with_id = Some(id);
        *memo.slot(slot) = Some(value);
    }
}

impl Clone for EncodedIdCache {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl PartialEq for EncodedIdCache {
    /// Caches never take part in record equality.
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl Eq for EncodedIdCache {}

impl fmt::Debug for EncodedIdCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let memo = self.memo.borrow();
        f.debug_struct("EncodedIdCache")
            .field("memoized_with_id", &memo.with_id)
            .field("hash", &memo.hash)
            .field("annotated", &memo.annotated)
            .field("slugged", &memo.slugged)
            .finish()
    }
}
