//! Hotel repository contracts and store-backed implementation.
//!
//! # Invariants
//! - Hotels are listed through the `HOTELS` index group, never by scan.
//! - Only the image URL is mutable; name and location are seed-time data.

use crate::model::hotel::Hotel;
use crate::repo::records::{decode_hotel, hotel_key, HOTELS_GROUP, HOTEL_PREFIX};
use crate::repo::{RepoError, RepoResult};
use crate::store::{Attributes, KeyValueStore, StoreError};
use serde_json::Value;

/// Repository interface for hotel rows.
pub trait HotelRepository {
    fn list_hotels(&self) -> RepoResult<Vec<Hotel>>;
    fn get_hotel(&self, hotel_id: &str) -> RepoResult<Option<Hotel>>;
    fn set_image_url(&self, hotel_id: &str, image_url: &str) -> RepoResult<()>;
}

/// Store-backed hotel repository.
pub struct StoreHotelRepository<'store, S: KeyValueStore> {
    store: &'store S,
}

impl<'store, S: KeyValueStore> StoreHotelRepository<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> HotelRepository for StoreHotelRepository<'_, S> {
    fn list_hotels(&self) -> RepoResult<Vec<Hotel>> {
        self.store
            .query_index(HOTELS_GROUP, HOTEL_PREFIX)?
            .iter()
            .map(decode_hotel)
            .collect()
    }

    fn get_hotel(&self, hotel_id: &str) -> RepoResult<Option<Hotel>> {
        self.store
            .get(&hotel_key(hotel_id))?
            .map(|item| decode_hotel(&item))
            .transpose()
    }

    fn set_image_url(&self, hotel_id: &str, image_url: &str) -> RepoResult<()> {
        let mut patch = Attributes::new();
        patch.insert("imageUrl".to_string(), Value::String(image_url.to_string()));

        match self.store.update(&hotel_key(hotel_id), patch) {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound(_)) => Err(RepoError::not_found("hotel", hotel_id)),
            Err(err) => Err(err.into()),
        }
    }
}
