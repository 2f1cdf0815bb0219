// src/handlers/image.rs
// DOCUMENTATION: Image proxy endpoint
// PURPOSE: Fetch a remote photo server-side and hand it back as a data URI

use crate::errors::PlacesError;
use crate::services::ImageProxy;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageQuery {
    pub image_url: Option<String>,
}

/// GET /api/fetch-place-image?imageUrl=
/// Plain-text data URI, or the placeholder URL when the fetch fails
pub async fn fetch_place_image(
    image_proxy: web::Data<ImageProxy>,
    query: web::Query<ImageQuery>,
) -> Result<impl Responder, PlacesError> {
    let image_url = query
        .image_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .ok_or_else(|| PlacesError::InvalidInput("imageUrl is required".to_string()))?;

    let image = image_proxy.fetch_as_data_uri(image_url).await;
    Ok(HttpResponse::Ok().content_type("text/plain").body(image))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/fetch-place-image", web::get().to(fetch_place_image));
}
