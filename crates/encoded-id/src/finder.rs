//! Lookups by encoded id.
//!
//! The non-strict finders answer `None` for anything that does not decode
//! or match; the `_strict` variants and [`Encoder::where_encoded_id`] turn
//! that into [`Error::NotFound`]. Salt and configuration errors always
//! surface.

use crate::{Coder, EncodedIdModel, Encoder, Error, Result};

/// Read access to the storage holding records of type `R`.
pub trait RecordLookup<R> {
    /// The record with primary key `id`.
    fn find_by_id(&self, id: u64) -> Option<R>;

    /// Every record whose primary key is in `ids`, each at most once.
    fn where_ids(&self, ids: &[u64]) -> Vec<R>;
}

impl<R, C> Encoder<R, C>
where
    R: EncodedIdModel,
    C: Coder,
{
    /// The record the first decoded id points at.
    ///
    /// With `with_id`, the record is only returned if its id equals it.
    ///
    /// # Errors
    ///
    /// Salt and configuration errors only.
    pub fn find_by_encoded_id<L>(
        &self,
        lookup: &L,
        input: &str,
        with_id: Option<u64>,
    ) -> Result<Option<R>>
    where
        L: RecordLookup<R> + ?Sized,
    {
        let ids = self.decode_encoded_id(input)?;
        let Some(&id) = ids.as_ref().and_then(|ids| ids.first()) else {
            return Ok(None);
        };
        let record = lookup
            .find_by_id(id)
            .filter(|record| with_id.is_none_or(|with_id| record.id() == Some(with_id)));
        Ok(record)
    }

    /// As [`Encoder::find_by_encoded_id`], failing when nothing is found.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`], plus salt and configuration errors.
    pub fn find_by_encoded_id_strict<L>(
        &self,
        lookup: &L,
        input: &str,
        with_id: Option<u64>,
    ) -> Result<R>
    where
        L: RecordLookup<R> + ?Sized,
    {
        self.find_by_encoded_id(lookup, input, with_id)?
            .ok_or_else(|| not_found::<R>(input))
    }

    /// Every record the decoded ids point at, `None` when `input` does not
    /// decode.
    ///
    /// # Errors
    ///
    /// Salt and configuration errors only.
    pub fn find_all_by_encoded_id<L>(&self, lookup: &L, input: &str) -> Result<Option<Vec<R>>>
    where
        L: RecordLookup<R> + ?Sized,
    {
        Ok(self
            .decode_encoded_id(input)?
            .map(|ids| lookup.where_ids(&ids)))
    }

    /// As [`Encoder::find_all_by_encoded_id`], failing unless every decoded
    /// id matched a record.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`], plus salt and configuration errors.
    pub fn find_all_by_encoded_id_strict<L>(&self, lookup: &L, input: &str) -> Result<Vec<R>>
    where
        L: RecordLookup<R> + ?Sized,
    {
        let ids = self
            .decode_encoded_id(input)?
            .ok_or_else(|| not_found::<R>(input))?;
        let records = lookup.where_ids(&ids);
        if records.is_empty() || records.len() != ids.len() {
            return Err(not_found::<R>(input));
        }
        Ok(records)
    }

    /// The records for all decoded ids, possibly none.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when `input` does not decode, plus salt and
    /// configuration errors.
    pub fn where_encoded_id<L>(&self, lookup: &L, input: &str) -> Result<Vec<R>>
    where
        L: RecordLookup<R> + ?Sized,
    {
        let ids = self
            .decode_encoded_id(input)?
            .ok_or_else(|| not_found::<R>(input))?;
        Ok(lookup.where_ids(&ids))
    }
}

fn not_found<R: EncodedIdModel>(input: &str) -> Error {
    Error::NotFound {
        type_name: R::TYPE_NAME,
        input: input.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuildError, Configuration, EncodedIdCache};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Product {
        id: Option<u64>,
        name: String,
        cache: EncodedIdCache,
    }

    impl EncodedIdModel for Product {
        const TYPE_NAME: &'static str = "Product";

        fn id(&self) -> Option<u64> {
            self.id
        }

        fn encoded_id_cache(&self) -> &EncodedIdCache {
            &self.cache
        }

        fn name_for_encoded_id_slug(&self) -> core::result::Result<String, BuildError> {
            Ok(self.name.clone())
        }
    }

    struct Catalog(BTreeMap<u64, Product>);

    impl Catalog {
        fn new(ids: &[u64]) -> Self {
            Self(
                ids.iter()
                    .map(|&id| {
                        let product = Product {
                            id: Some(id),
                            name: format!("Product {id}"),
                            cache: EncodedIdCache::new(),
                        };
                        (id, product)
                    })
                    .collect(),
            )
        }
    }

    impl RecordLookup<Product> for Catalog {
        fn find_by_id(&self, id: u64) -> Option<Product> {
            self.0.get(&id).cloned()
        }

        fn where_ids(&self, ids: &[u64]) -> Vec<Product> {
            self.0
                .values()
                .filter(|p| p.id.is_some_and(|id| ids.contains(&id)))
                .cloned()
                .collect()
        }
    }

    fn encoder() -> Encoder<Product> {
        Encoder::new(Arc::new(Configuration::default().with_salt("abcd1234")))
    }

    #[test]
    fn finds_by_every_public_form() {
        let encoder = encoder();
        let catalog = Catalog::new(&[1, 2, 3]);
        let product = catalog.find_by_id(2).unwrap();

        for input in [
            encoder.encoded_id_hash(&product).unwrap().unwrap(),
            encoder.encoded_id(&product).unwrap().unwrap(),
            encoder.slugged_encoded_id(&product).unwrap().unwrap(),
        ] {
            let found = encoder.find_by_encoded_id(&catalog, &input, None).unwrap();
            assert_eq!(found.and_then(|p| p.id), Some(2), "{input}");
        }
    }

    #[test]
    fn finds_the_first_of_several_ids() {
        let encoder = encoder();
        let catalog = Catalog::new(&[1, 2, 3]);
        let input = encoder.encode_encoded_id(&[3, 1]).unwrap();
        let found = encoder.find_by_encoded_id(&catalog, &input, None).unwrap();
        assert_eq!(found.and_then(|p| p.id), Some(3));
    }

    #[test]
    fn honours_the_identity_constraint() {
        let encoder = encoder();
        let catalog = Catalog::new(&[1, 2]);
        let input = encoder.encode_encoded_id(&[1]).unwrap();

        assert!(encoder.find_by_encoded_id(&catalog, &input, Some(1)).unwrap().is_some());
        assert!(encoder.find_by_encoded_id(&catalog, &input, Some(2)).unwrap().is_none());
        assert!(
            encoder
                .find_by_encoded_id_strict(&catalog, &input, Some(2))
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn missing_records_and_garbage_are_absent() {
        let encoder = encoder();
        let catalog = Catalog::new(&[1]);
        let unknown = encoder.encode_encoded_id(&[99]).unwrap();

        for input in [unknown.as_str(), "garbage!", ""] {
            assert_eq!(encoder.find_by_encoded_id(&catalog, input, None).unwrap(), None);
            let err = encoder
                .find_by_encoded_id_strict(&catalog, input, None)
                .unwrap_err();
            assert!(err.is_not_found(), "{input}");
        }
    }

    #[test]
    fn find_all_returns_matching_records() {
        let encoder = encoder();
        let catalog = Catalog::new(&[1, 2, 3]);
        let input = encoder.encode_encoded_id(&[1, 3]).unwrap();

        let found = encoder.find_all_by_encoded_id(&catalog, &input).unwrap().unwrap();
        assert_eq!(
            found.iter().filter_map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(encoder.find_all_by_encoded_id(&catalog, "garbage!").unwrap(), None);
    }

    #[test]
    fn strict_find_all_requires_every_record() {
        let encoder = encoder();
        let catalog = Catalog::new(&[1, 2]);

        let all = encoder.encode_encoded_id(&[1, 2]).unwrap();
        assert_eq!(
            encoder.find_all_by_encoded_id_strict(&catalog, &all).unwrap().len(),
            2
        );

        let partial = encoder.encode_encoded_id(&[1, 5]).unwrap();
        assert!(
            encoder
                .find_all_by_encoded_id_strict(&catalog, &partial)
                .unwrap_err()
                .is_not_found()
        );
        assert!(
            encoder
                .find_all_by_encoded_id_strict(&catalog, "garbage!")
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn where_encoded_id_scopes_by_decoded_ids() {
        let encoder = encoder();
        let catalog = Catalog::new(&[1, 2, 3]);

        let input = encoder.encode_encoded_id(&[2, 7]).unwrap();
        let scoped = encoder.where_encoded_id(&catalog, &input).unwrap();
        assert_eq!(scoped.len(), 1);

        let err = encoder.where_encoded_id(&catalog, "garbage!").unwrap_err();
        assert_eq!(
            err,
            Error::NotFound {
                type_name: "Product",
                input: "garbage!".to_owned(),
            }
        );
    }
}
