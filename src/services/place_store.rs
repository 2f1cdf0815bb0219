// src/services/place_store.rs
// DOCUMENTATION: In-process document store for places and reviews
// PURPOSE: Keep records in their persisted JSON shape and rehydrate them leniently on every read

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::errors::PlacesError;
use crate::models::{Place, Review};

/// Stored state: the places array plus one review collection per place id
#[derive(Debug, Default)]
struct Document {
    places: Vec<Value>,
    reviews: HashMap<String, Vec<Value>>,
}

impl Document {
    fn position(&self, id: &str) -> Option<usize> {
        self.places
            .iter()
            .position(|record| record.get("id").and_then(Value::as_str) == Some(id))
    }
}

/// Thread-safe store shared by all workers
/// DOCUMENTATION: Places are written with `Place::to_json` and read back with
/// `Place::from_json`, so partially populated records degrade to defaults
/// while a null record fails the read.
#[derive(Debug, Clone, Default)]
pub struct PlaceStore {
    document: Arc<RwLock<Document>>,
}

impl PlaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw place records as they came from an export
    pub async fn load_records(&self, records: Vec<Value>) {
        let mut document = self.document.write().await;
        let count = records.len();
        document.places.extend(records);
        log::info!("Loaded {} place records ({} total)", count, document.places.len());
    }

    pub async fn count(&self) -> usize {
        self.document.read().await.places.len()
    }

    /// All places in insertion order
    pub async fn list_places(&self) -> Result<Vec<Place>, PlacesError> {
        let document = self.document.read().await;

        document
            .places
            .iter()
            .map(|record| {
                Place::from_json(Some(record)).map_err(|e| {
                    log::error!("Stored place record could not be read: {}", e);
                    PlacesError::from(e)
                })
            })
            .collect()
    }

    /// One place by provider id
    pub async fn get_place(&self, id: &str) -> Result<Place, PlacesError> {
        let document = self.document.read().await;
        let index = document
            .position(id)
            .ok_or_else(|| PlacesError::NotFound(id.to_string()))?;

        Ok(Place::from_json(document.places.get(index))?)
    }

    /// Append a new place; ids are unique
    pub async fn add_place(&self, place: Place) -> Result<Place, PlacesError> {
        let mut document = self.document.write().await;

        if document.position(place.id()).is_some() {
            log::warn!("Refusing to add duplicate place: {}", place.id());
            return Err(PlacesError::AlreadyExists(place.id().to_string()));
        }

        document.places.push(place.to_json());
        log::info!("Added place {} ({})", place.name(), place.id());
        Ok(place)
    }

    /// Swap the stored record with the same id for a new value
    pub async fn replace_place(&self, place: Place) -> Result<Place, PlacesError> {
        let mut document = self.document.write().await;
        let index = document
            .position(place.id())
            .ok_or_else(|| PlacesError::NotFound(place.id().to_string()))?;

        document.places[index] = place.to_json();
        log::info!("Replaced place {} ({})", place.name(), place.id());
        Ok(place)
    }

    /// Remove a place together with its reviews
    pub async fn remove_place(&self, id: &str) -> Result<(), PlacesError> {
        let mut document = self.document.write().await;
        let index = document
            .position(id)
            .ok_or_else(|| PlacesError::NotFound(id.to_string()))?;

        document.places.remove(index);
        let reviews = document.reviews.remove(id).map_or(0, |r| r.len());
        log::info!("Removed place {} and {} reviews", id, reviews);
        Ok(())
    }

    /// Reviews for a place id, oldest first
    pub async fn list_reviews(&self, place_id: &str) -> Result<Vec<Review>, PlacesError> {
        let document = self.document.read().await;

        let Some(records) = document.reviews.get(place_id) else {
            return Ok(Vec::new());
        };

        records
            .iter()
            .map(|record| Review::from_json(Some(record)).map_err(PlacesError::from))
            .collect()
    }

    /// Save a review under its place id
    /// DOCUMENTATION: The place id is not checked against stored places.
    pub async fn add_review(&self, review: Review) -> Result<Review, PlacesError> {
        let mut document = self.document.write().await;
        document
            .reviews
            .entry(review.place_id().to_string())
            .or_default()
            .push(review.to_json());

        log::info!(
            "Added review {} for place {}",
            review.review_id(),
            review.place_id()
        );
        Ok(review)
    }
}
