/// Errors raised while assembling a decorated identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The core token is blank, or the decoration normalized to nothing.
    #[error("the record does not provide a valid ID and/or {part}")]
    MissingParts {
        /// What was being attached: `"annotation"`, `"slug"` or
        /// `"decoration"`.
        part: &'static str,
    },

    /// The default annotation needs a type name.
    #[error("the default annotation requires the record type to have a name")]
    AnonymousType,

    /// The record type has not said how to produce its slug.
    #[error("a slug source must be defined to build slugged encoded ids of {type_name}")]
    MissingSlugSource { type_name: &'static str },
}
