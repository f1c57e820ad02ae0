/// Persisted mirror columns no longer match what the record's id encodes to.
///
/// Raised after a write. It means the configuration changed underneath
/// stored rows, or something wrote the columns (or the id) around the
/// guard.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ConsistencyError {
    #[error(
        "the persisted encoded id {stored:?} for {type_name} is not the same as currently computing {expected:?}"
    )]
    NormalizedMismatch {
        type_name: &'static str,
        stored: Option<String>,
        expected: String,
    },

    #[error(
        "the persisted prefixed encoded id (for {type_name} with id {id}) is not correct: it is {stored:?} instead of {expected:?}"
    )]
    PrefixedMismatch {
        type_name: &'static str,
        id: u64,
        stored: Option<String>,
        expected: Option<String>,
    },
}

/// A mirror column was assigned through its public setter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error(
    "cannot update the {column} of a {type_name} record directly; it is refreshed from the record's id"
)]
pub struct ReadOnlyViolation {
    pub column: &'static str,
    pub type_name: &'static str,
    pub id: Option<u64>,
}
