// src/handlers/tools.rs
// DOCUMENTATION: Stateless helpers exposed over HTTP
// PURPOSE: Let clients preview link parsing and hours normalization before saving

use crate::errors::PlacesError;
use crate::models::opening_hours;
use crate::services::MapLink;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ParseLinkRequest {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHoursRequest {
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

/// POST /tools/parse-link
pub async fn parse_link(req: web::Json<ParseLinkRequest>) -> Result<impl Responder, PlacesError> {
    let link = MapLink::parse(&req.url).ok_or_else(|| {
        PlacesError::InvalidInput("map link has no embedded coordinates".to_string())
    })?;
    Ok(HttpResponse::Ok().json(link))
}

/// POST /tools/opening-hours
pub async fn normalize_opening_hours(req: web::Json<OpeningHoursRequest>) -> impl Responder {
    let schedule = opening_hours::normalize(&req.weekday_text);
    HttpResponse::Ok().json(schedule.to_json())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tools")
            .route("/parse-link", web::post().to(parse_link))
            .route("/opening-hours", web::post().to(normalize_opening_hours)),
    );
}
