// src/services/place_service.rs
// DOCUMENTATION: Business logic for saved places
// PURPOSE: Intermediary between handlers, the provider client and the store

use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use crate::errors::PlacesError;
use crate::models::{url_label, Coordinates, CreateReviewRequest, Place, Review};
use crate::services::distance::{distances_from, format_distance};
use crate::services::{GooglePlacesClient, ImageProxy, MapLink, PlaceStore};

/// Reference link with its display label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkView {
    pub url: String,
    pub label: String,
}

/// Place as shown in the list and detail views
/// DOCUMENTATION: The stored record plus derived display fields. Distance is
/// null (and the label a placeholder) when the user's position is unknown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceView {
    #[serde(flatten)]
    pub place: Place,
    pub distance_km: Option<f64>,
    pub distance_label: String,
    pub price_label: Option<String>,
    pub opening_hours: Vec<String>,
    pub links: Vec<LinkView>,
}

impl PlaceView {
    pub fn new(place: Place, distance_km: Option<f64>) -> Self {
        let links = place
            .url_references()
            .iter()
            .map(|url| LinkView {
                url: url.clone(),
                label: url_label(url),
            })
            .collect();

        Self {
            distance_label: format_distance(distance_km),
            price_label: place.price_label(),
            opening_hours: place.working_hour().display_lines(),
            links,
            distance_km,
            place,
        }
    }
}

pub struct PlaceService;

impl PlaceService {
    /// List saved places with their distance from the user
    pub async fn list_places(
        store: &PlaceStore,
        origin: Option<Coordinates>,
    ) -> Result<Vec<PlaceView>, PlacesError> {
        let places = store.list_places().await?;
        let distances = distances_from(origin, &places);

        Ok(places
            .into_iter()
            .zip(distances)
            .map(|(place, distance)| PlaceView::new(place, distance))
            .collect())
    }

    /// One saved place with its distance from the user
    pub async fn get_place(
        store: &PlaceStore,
        id: &str,
        origin: Option<Coordinates>,
    ) -> Result<PlaceView, PlacesError> {
        let place = store.get_place(id).await?;
        let distance = distances_from(origin, std::slice::from_ref(&place))
            .into_iter()
            .next()
            .flatten();
        Ok(PlaceView::new(place, distance))
    }

    /// Save a place from a raw record
    pub async fn create_place(store: &PlaceStore, record: &Value) -> Result<Place, PlacesError> {
        let place = Place::from_json(Some(record))?;
        if place.id().is_empty() {
            return Err(PlacesError::ValidationError(
                "place id is required".to_string(),
            ));
        }
        store.add_place(place).await
    }

    /// Replace a saved place with a full new record
    pub async fn replace_place(
        store: &PlaceStore,
        id: &str,
        record: &Value,
    ) -> Result<Place, PlacesError> {
        let place = Place::from_json(Some(record))?;
        if place.id() != id {
            return Err(PlacesError::ValidationError(format!(
                "record id {:?} does not match {:?}",
                place.id(),
                id
            )));
        }
        store.replace_place(place).await
    }

    /// Import a place from a shared map link
    /// DOCUMENTATION: Parse the link, resolve it through Google Places, embed
    /// the first photo as a data URI (or the placeholder) and save the result.
    pub async fn import_from_link(
        store: &PlaceStore,
        google_client: &GooglePlacesClient,
        image_proxy: &ImageProxy,
        url: &str,
        photo_max_width: u32,
    ) -> Result<Place, PlacesError> {
        let link = MapLink::parse(url).ok_or_else(|| {
            PlacesError::InvalidInput("map link has no embedded coordinates".to_string())
        })?;

        log::info!(
            "Importing {:?} at {},{}",
            link.name,
            link.location.lat,
            link.location.lon
        );

        let place_id = google_client.find_place_id(&link).await?;
        let details = google_client.get_place_details(&place_id).await?;

        let image = match google_client.primary_photo_url(&details, photo_max_width) {
            Some(photo_url) => image_proxy.fetch_as_data_uri(&photo_url).await,
            None => String::new(),
        };

        let place = google_client.to_place(&details, image);
        store.add_place(place).await
    }

    /// Validate and save a review for a place
    pub async fn add_review(
        store: &PlaceStore,
        place_id: &str,
        req: CreateReviewRequest,
    ) -> Result<Review, PlacesError> {
        if let Err(e) = req.validate() {
            return Err(PlacesError::ValidationError(e.to_string()));
        }

        store.add_review(req.into_review(place_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_place_view_fields() {
        let place = Place::new("a", "Alpha", Coordinates::new(40.85, 14.27))
            .with_price_level(3)
            .with_url_references(["https://www.facebook.com/alpha"]);

        let view = PlaceView::new(place, Some(1.234));
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["id"], "a");
        assert_eq!(value["distanceKm"], 1.234);
        assert_eq!(value["distanceLabel"], "1.23 km");
        assert_eq!(value["priceLabel"], "€€€");
        assert_eq!(value["links"][0]["label"], "Facebook");
    }

    #[tokio::test]
    async fn test_list_places_without_position() {
        let store = PlaceStore::new();
        store
            .add_place(Place::new("a", "Alpha", Coordinates::new(40.85, 14.27)))
            .await
            .unwrap();

        let views = PlaceService::list_places(&store, None).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].distance_km, None);
        assert_eq!(views[0].distance_label, "Computing...");
    }

    #[tokio::test]
    async fn test_get_place_with_position() {
        let store = PlaceStore::new();
        store
            .add_place(Place::new("a", "Alpha", Coordinates::new(0.0, 1.0)))
            .await
            .unwrap();

        let view = PlaceService::get_place(&store, "a", Some(Coordinates::new(0.0, 0.0)))
            .await
            .unwrap();
        assert_eq!(view.distance_label, "111.19 km");
    }

    #[tokio::test]
    async fn test_create_place_requires_id() {
        let store = PlaceStore::new();
        let result = PlaceService::create_place(&store, &json!({"name": "No id"})).await;
        assert!(matches!(result, Err(PlacesError::ValidationError(_))));

        let result = PlaceService::create_place(&store, &Value::Null).await;
        assert!(matches!(result, Err(PlacesError::InvalidRecord(_))));
    }

    #[tokio::test]
    async fn test_replace_place_checks_id() {
        let store = PlaceStore::new();
        PlaceService::create_place(&store, &json!({"id": "a", "name": "Alpha"}))
            .await
            .unwrap();

        let mismatch =
            PlaceService::replace_place(&store, "a", &json!({"id": "b", "name": "Beta"})).await;
        assert!(matches!(mismatch, Err(PlacesError::ValidationError(_))));

        let replaced =
            PlaceService::replace_place(&store, "a", &json!({"id": "a", "name": "Alpha 2"}))
                .await
                .unwrap();
        assert_eq!(replaced.name(), "Alpha 2");
    }

    #[tokio::test]
    async fn test_import_rejects_link_without_coordinates() {
        let store = PlaceStore::new();
        let client = GooglePlacesClient::new(
            "test_key".to_string(),
            std::time::Duration::from_secs(1),
        );
        let proxy = ImageProxy::new(
            "https://placehold.co/400".to_string(),
            std::time::Duration::from_secs(1),
        );

        let result = PlaceService::import_from_link(
            &store,
            &client,
            &proxy,
            "https://www.google.com/maps/place/Pizza+Napoli/",
            400,
        )
        .await;
        assert!(matches!(result, Err(PlacesError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_add_review_validates() {
        let store = PlaceStore::new();
        let req = CreateReviewRequest {
            reviewer: "Luca".to_string(),
            food: 9,
            price: 1,
            location: 1,
            service: 1,
            comment: String::new(),
        };

        let result = PlaceService::add_review(&store, "a", req).await;
        assert!(matches!(result, Err(PlacesError::ValidationError(_))));
        assert!(store.list_reviews("a").await.unwrap().is_empty());
    }
}
