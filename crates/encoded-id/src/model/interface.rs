use crate::{BuildError, EncodedIdCache, snake_case};

/// A record type that exposes encoded ids.
///
/// Only [`EncodedIdModel::TYPE_NAME`], [`EncodedIdModel::id`] and
/// [`EncodedIdModel::encoded_id_cache`] are required. The decoration
/// methods have defaults and can be overridden per type, or bypassed per
/// encoder with a [`crate::DecorationSource`].
///
/// # Example
///
/// ```
/// use encoded_id::{EncodedIdCache, EncodedIdModel};
///
/// struct User {
///     id: Option<u64>,
///     name: String,
///     cache: EncodedIdCache,
/// }
///
/// impl EncodedIdModel for User {
///     const TYPE_NAME: &'static str = "User";
///
///     fn id(&self) -> Option<u64> {
///         self.id
///     }
///
///     fn encoded_id_cache(&self) -> &EncodedIdCache {
///         &self.cache
///     }
///
///     fn name_for_encoded_id_slug(&self) -> Result<String, encoded_id::BuildError> {
///         Ok(self.name.clone())
///     }
/// }
/// ```
pub trait EncodedIdModel {
    /// Keys the salt and names the type in errors. Must not be blank.
    const TYPE_NAME: &'static str;

    /// The numeric primary key, `None` until persisted.
    fn id(&self) -> Option<u64>;

    /// Per-instance memoization of the derived identifiers.
    fn encoded_id_cache(&self) -> &EncodedIdCache;

    /// Text prefixed to the encoded id. Defaults to the type name in snake
    /// case (`MyModel` becomes `my_model`).
    ///
    /// # Errors
    ///
    /// [`BuildError::AnonymousType`] if [`EncodedIdModel::TYPE_NAME`] is
    /// blank.
    fn annotation_for_encoded_id(&self) -> Result<String, BuildError> {
        if Self::TYPE_NAME.trim().is_empty() {
            return Err(BuildError::AnonymousType);
        }
        Ok(snake_case(Self::TYPE_NAME))
    }

    /// Text slugged in front of the encoded id. No default exists.
    ///
    /// # Errors
    ///
    /// [`BuildError::MissingSlugSource`] unless overridden.
    fn name_for_encoded_id_slug(&self) -> Result<String, BuildError> {
        Err(BuildError::MissingSlugSource {
            type_name: Self::TYPE_NAME,
        })
    }
}
