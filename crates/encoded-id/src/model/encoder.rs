use super::cache::Slot;
use crate::{
    Coder, CoderSettings, Configuration, DecorationSource, EncodedIdModel, PathParam, Result,
    ReversibleCoder, SaltError, annotated_id, derive_salt, parse, slugged_id,
};
use core::{fmt, marker::PhantomData};
use std::sync::{Arc, OnceLock};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Encodes, decodes and decorates the ids of one record type `R`.
///
/// An encoder pairs the shared [`Configuration`] with the per-type pieces:
/// the salt (derived from [`EncodedIdModel::TYPE_NAME`] unless overridden)
/// and the annotation and slug sources. The coder is built lazily on first
/// use and reused afterwards.
///
/// # Example
///
/// ```
/// use encoded_id::{Configuration, EncodedIdCache, EncodedIdModel, Encoder};
/// use std::sync::Arc;
///
/// struct Invoice {
///     id: Option<u64>,
///     cache: EncodedIdCache,
/// }
///
/// impl EncodedIdModel for Invoice {
///     const TYPE_NAME: &'static str = "Invoice";
///     fn id(&self) -> Option<u64> {
///         self.id
///     }
///     fn encoded_id_cache(&self) -> &EncodedIdCache {
///         &self.cache
///     }
/// }
///
/// let config = Arc::new(Configuration::default().with_salt("abcd1234"));
/// let encoder: Encoder<Invoice> = Encoder::new(config);
/// let invoice = Invoice { id: Some(42), cache: EncodedIdCache::new() };
///
/// let public = encoder.encoded_id(&invoice).unwrap().unwrap();
/// assert!(public.starts_with("invoice_"));
/// assert_eq!(encoder.decode_encoded_id(&public).unwrap(), Some(vec![42]));
/// assert_eq!(encoder.decode_encoded_id("bogus").unwrap(), None);
/// ```
pub struct Encoder<R, C = ReversibleCoder> {
    config: Arc<Configuration>,
    salt: Option<String>,
    annotation: Option<DecorationSource<R>>,
    slug: DecorationSource<R>,
    coder: OnceLock<C>,
    _record: PhantomData<fn(&R)>,
}

impl<R, C> Encoder<R, C>
where
    R: EncodedIdModel,
    C: Coder,
{
    pub fn new(config: Arc<Configuration>) -> Self {
        Self {
            config,
            salt: None,
            annotation: Some(DecorationSource::Default),
            slug: DecorationSource::Default,
            coder: OnceLock::new(),
            _record: PhantomData,
        }
    }

    /// Uses `salt` verbatim instead of deriving one from the type name.
    #[must_use]
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self.coder = OnceLock::new();
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, source: DecorationSource<R>) -> Self {
        self.annotation = Some(source);
        self
    }

    /// Makes [`Encoder::encoded_id`] return the bare encoded id.
    #[must_use]
    pub fn without_annotation(mut self) -> Self {
        self.annotation = None;
        self
    }

    #[must_use]
    pub fn with_slug(mut self, source: DecorationSource<R>) -> Self {
        self.slug = source;
        self
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// The salt this type encodes with.
    ///
    /// # Errors
    ///
    /// See [`derive_salt`]. An overriding salt is never rejected.
    pub fn salt(&self) -> Result<String, SaltError> {
        match &self.salt {
            Some(salt) => Ok(salt.clone()),
            None => derive_salt(R::TYPE_NAME, self.config.salt()),
        }
    }

    /// # Errors
    ///
    /// See [`Encoder::salt`].
    pub fn coder_settings(&self) -> Result<CoderSettings> {
        Ok(self.config.coder_settings(self.salt()?))
    }

    /// # Errors
    ///
    /// Fails if the salt cannot be derived or the coder rejects the
    /// configuration.
    pub fn coder(&self) -> Result<&C> {
        if let Some(coder) = self.coder.get() {
            return Ok(coder);
        }
        let coder = C::from_settings(self.coder_settings()?)?;
        Ok(self.coder.get_or_init(|| coder))
    }

    /// Encodes one or more ids with this type's settings.
    ///
    /// # Errors
    ///
    /// See [`Encoder::coder`] and [`Coder::encode`].
    pub fn encode_encoded_id(&self, ids: &[u64]) -> Result<String> {
        Ok(self.coder()?.encode(ids)?)
    }

    /// Encodes with one-off settings, e.g. a different length or grouping.
    ///
    /// # Errors
    ///
    /// See [`Coder::from_settings`] and [`Coder::encode`].
    pub fn encode_encoded_id_with(&self, ids: &[u64], settings: CoderSettings) -> Result<String> {
        Ok(C::from_settings(settings)?.encode(ids)?)
    }

    /// The ungrouped encoded id, as stored in the normalized mirror column.
    ///
    /// # Errors
    ///
    /// See [`Encoder::encode_encoded_id`].
    pub fn encode_normalized_encoded_id(&self, id: u64) -> Result<String> {
        self.encode_encoded_id_with(&[id], self.coder_settings()?.ungrouped())
    }

    /// Decodes an identifier received from the outside world.
    ///
    /// Slug and annotation are stripped in that order before the core is
    /// handed to the coder. Input the coder cannot decode yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Only salt and configuration errors surface.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn decode_encoded_id(&self, input: &str) -> Result<Option<Vec<u64>>> {
        if input.trim().is_empty() {
            return Ok(None);
        }
        let unslugged = parse(input, self.config.slugged_id_separator());
        let core = parse(&unslugged.core, self.config.annotated_id_separator()).core;
        if core.trim().is_empty() {
            return Ok(None);
        }

        match self.coder()?.decode(&core) {
            Ok(ids) if !ids.is_empty() => Ok(Some(ids)),
            Ok(_) => Ok(None),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_err, type_name = R::TYPE_NAME, "undecodable encoded id");
                Ok(None)
            }
        }
    }

    /// The bare encoded id of `record`, `None` while it has no id.
    ///
    /// # Errors
    ///
    /// See [`Encoder::encode_encoded_id`].
    pub fn encoded_id_hash(&self, record: &R) -> Result<Option<String>> {
        self.memoize(record, Slot::Hash, |id| self.encode_encoded_id(&[id]))
    }

    /// The public encoded id of `record`: annotated unless the encoder was
    /// built [`Encoder::without_annotation`].
    ///
    /// # Errors
    ///
    /// Encoding errors, or a [`crate::BuildError`] from the annotation.
    pub fn encoded_id(&self, record: &R) -> Result<Option<String>> {
        self.memoize(record, Slot::Annotated, |id| self.annotate(record, id))
    }

    /// [`Encoder::encoded_id`] prefixed with the record's slug.
    ///
    /// # Errors
    ///
    /// As [`Encoder::encoded_id`], plus a [`crate::BuildError`] from the slug.
    pub fn slugged_encoded_id(&self, record: &R) -> Result<Option<String>> {
        self.memoize(record, Slot::Slugged, |id| {
            let encoded = self.memoized(record, id, Slot::Annotated, |id| {
                self.annotate(record, id)
            })?;
            let slug = self.slug.slug(record)?;
            Ok(slugged_id(
                &slug,
                &encoded,
                self.config.slugged_id_separator(),
            )?)
        })
    }

    /// The path parameter selected by [`Configuration::path_param`].
    ///
    /// # Errors
    ///
    /// As the identifier it renders.
    pub fn to_param(&self, record: &R) -> Result<Option<String>> {
        match self.config.path_param() {
            PathParam::Primary => Ok(record.id().map(|id| id.to_string())),
            PathParam::Encoded => self.encoded_id(record),
            PathParam::Slugged => self.slugged_encoded_id(record),
        }
    }

    pub fn clear_encoded_id_cache(&self, record: &R) {
        record.encoded_id_cache().clear();
    }

    fn annotate(&self, record: &R, id: u64) -> Result<String> {
        let hash = self.memoized(record, id, Slot::Hash, |id| self.encode_encoded_id(&[id]))?;
        let Some(source) = &self.annotation else {
            return Ok(hash);
        };
        let annotation = source.annotation(record)?;
        Ok(annotated_id(
            &annotation,
            &hash,
            self.config.annotated_id_separator(),
        )?)
    }

    fn memoize<F>(&self, record: &R, slot: Slot, compute: F) -> Result<Option<String>>
    where
        F: FnOnce(u64) -> Result<String>,
    {
        let Some(id) = record.id() else {
            return Ok(None);
        };
        self.memoized(record, id, slot, compute).map(Some)
    }

    fn memoized<F>(&self, record: &R, id: u64, slot: Slot, compute: F) -> Result<String>
    where
        F: FnOnce(u64) -> Result<String>,
    {
        let cache = record.encoded_id_cache();
        cache.sync(id);
        if let Some(value) = cache.get(slot) {
            return Ok(value);
        }
        let value = compute(id)?;
        cache.store(id, slot, value.clone());
        Ok(value)
    }
}

impl<R, C> Clone for Encoder<R, C> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            salt: self.salt.clone(),
            annotation: self.annotation.clone(),
            slug: self.slug.clone(),
            coder: OnceLock::new(),
            _record: PhantomData,
        }
    }
}

impl<R, C> fmt::Debug for Encoder<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("config", &self.config)
            .field("salt", &self.salt.as_ref().map(|_| "<overridden>"))
            .field("annotation", &self.annotation)
            .field("slug", &self.slug)
            .finish_non_exhaustive()
    }
}
