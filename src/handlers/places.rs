// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place operations
// PURPOSE: Parse requests, call services, return responses

use crate::config::Config;
use crate::errors::PlacesError;
use crate::models::Coordinates;
use crate::services::{GooglePlacesClient, ImageProxy, PlaceService, PlaceStore};
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Optional user position for distance computation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PositionQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl PositionQuery {
    /// Both coordinates or nothing
    pub fn origin(&self) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

/// Body of an import request
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequest {
    pub url: String,
}

/// GET /places
/// List saved places with distances from the optional position
pub async fn list_places(
    store: web::Data<PlaceStore>,
    query: web::Query<PositionQuery>,
) -> Result<impl Responder, PlacesError> {
    let places = PlaceService::list_places(store.get_ref(), query.origin()).await?;
    Ok(HttpResponse::Ok().json(places))
}

/// POST /places
/// Save a place from a raw record
pub async fn create_place(
    store: web::Data<PlaceStore>,
    body: web::Json<Value>,
) -> Result<impl Responder, PlacesError> {
    let place = PlaceService::create_place(store.get_ref(), &body).await?;
    Ok(HttpResponse::Created().json(place))
}

/// POST /places/import
/// Resolve a shared map link through Google Places and save the result
pub async fn import_place(
    store: web::Data<PlaceStore>,
    config: web::Data<Config>,
    image_proxy: web::Data<ImageProxy>,
    req: web::Json<ImportRequest>,
) -> Result<impl Responder, PlacesError> {
    if config.google_places_api_key.is_empty() {
        return Err(PlacesError::ServiceUnavailable(
            "Google Places API key is not configured".to_string(),
        ));
    }

    let google_client = GooglePlacesClient::new(
        config.google_places_api_key.clone(),
        Duration::from_secs(config.http_timeout_secs),
    );

    let place = PlaceService::import_from_link(
        store.get_ref(),
        &google_client,
        image_proxy.get_ref(),
        &req.url,
        config.photo_max_width,
    )
    .await?;
    Ok(HttpResponse::Created().json(place))
}

/// GET /places/{id}
pub async fn get_place(
    store: web::Data<PlaceStore>,
    path: web::Path<String>,
    query: web::Query<PositionQuery>,
) -> Result<impl Responder, PlacesError> {
    let place = PlaceService::get_place(store.get_ref(), &path, query.origin()).await?;
    Ok(HttpResponse::Ok().json(place))
}

/// PUT /places/{id}
/// Replace a place with a full record
pub async fn update_place(
    store: web::Data<PlaceStore>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<impl Responder, PlacesError> {
    let place = PlaceService::replace_place(store.get_ref(), &path, &body).await?;
    Ok(HttpResponse::Ok().json(place))
}

/// DELETE /places/{id}
/// Remove a place and its reviews
pub async fn delete_place(
    store: web::Data<PlaceStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    store.remove_place(&path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/places")
            .route("", web::get().to(list_places))
            .route("", web::post().to(create_place))
            .route("/import", web::post().to(import_place))
            .route("/{id}", web::get().to(get_place))
            .route("/{id}", web::put().to(update_place))
            .route("/{id}", web::delete().to(delete_place))
            .configure(super::reviews::config),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    fn app_config(cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(PlaceStore::new()))
            .app_data(web::Data::new(Config::default()))
            .app_data(web::Data::new(ImageProxy::new(
                "https://placehold.co/400".to_string(),
                Duration::from_secs(1),
            )))
            .configure(config);
    }

    #[actix_web::test]
    async fn test_create_then_list_with_distance() {
        let app = test::init_service(App::new().configure(app_config)).await;

        let req = test::TestRequest::post()
            .uri("/places")
            .set_json(json!({"id": "a", "name": "Alpha", "location": {"lat": 0.0, "lon": 1.0}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri("/places?lat=0&lon=0")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["name"], "Alpha");
        assert_eq!(body[0]["distanceLabel"], "111.19 km");

        let req = test::TestRequest::get().uri("/places").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body[0]["distanceKm"].is_null());
        assert_eq!(body[0]["distanceLabel"], "Computing...");
    }

    #[actix_web::test]
    async fn test_duplicate_and_missing() {
        let app = test::init_service(App::new().configure(app_config)).await;

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/places")
                .set_json(json!({"id": "a", "name": "Alpha"}))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), expected);
        }

        let req = test::TestRequest::get().uri("/places/zzz").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_update_and_delete() {
        let app = test::init_service(App::new().configure(app_config)).await;

        let req = test::TestRequest::post()
            .uri("/places")
            .set_json(json!({"id": "a", "name": "Alpha"}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/places/a")
            .set_json(json!({"id": "b", "name": "Beta"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let req = test::TestRequest::put()
            .uri("/places/a")
            .set_json(json!({"id": "a", "name": "Alpha Bistro", "priceLevel": 2}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["name"], "Alpha Bistro");

        let req = test::TestRequest::delete().uri("/places/a").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );
    }

    #[actix_web::test]
    async fn test_import_without_api_key() {
        let app = test::init_service(App::new().configure(app_config)).await;

        let req = test::TestRequest::post()
            .uri("/places/import")
            .set_json(json!({"url": "https://www.google.com/maps/place/X/@1,2,3z/data=!3d1!4d2"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
