// src/handlers/reviews.rs
// DOCUMENTATION: HTTP handlers for place reviews
// PURPOSE: Nested under /places/{id}

use crate::errors::PlacesError;
use crate::models::CreateReviewRequest;
use crate::services::{PlaceService, PlaceStore};
use actix_web::{web, HttpResponse, Responder};

/// GET /places/{id}/reviews
pub async fn list_reviews(
    store: web::Data<PlaceStore>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let reviews = store.list_reviews(&path).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

/// POST /places/{id}/reviews
/// Save a review; the id is assigned here
pub async fn create_review(
    store: web::Data<PlaceStore>,
    path: web::Path<String>,
    req: web::Json<CreateReviewRequest>,
) -> Result<impl Responder, PlacesError> {
    let review = PlaceService::add_review(store.get_ref(), &path, req.into_inner()).await?;
    Ok(HttpResponse::Created().json(review))
}

/// Routes relative to the /places scope
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/{id}/reviews", web::get().to(list_reviews))
        .route("/{id}/reviews", web::post().to(create_review));
}
