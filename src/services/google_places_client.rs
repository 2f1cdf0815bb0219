// src/services/google_places_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: Resolve a parsed map link to a place id, fetch its details and assemble a Place

use std::time::Duration;

use crate::errors::PlacesError;
use crate::models::{Coordinates, Place};
use crate::services::map_link::MapLink;
use crate::models::opening_hours;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Fields requested from the Place Details endpoint
const DETAIL_FIELDS: &str = "place_id,name,geometry,formatted_phone_number,international_phone_number,photos,opening_hours,formatted_address,website,url,price_level,types";

/// Provider types too generic to be useful as tags
const GENERIC_TYPES: [&str; 3] = ["point_of_interest", "establishment", "geocode"];

/// Google Places API client
/// DOCUMENTATION: Handles authentication and API calls to Google Places
pub struct GooglePlacesClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Places API key
    api_key: String,
    /// Base URL for Google Places API
    base_url: String,
}

/// Response from Find Place From Text
#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    #[serde(default)]
    candidates: Vec<FindPlaceCandidate>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FindPlaceCandidate {
    place_id: Option<String>,
}

/// Response from Place Details
#[derive(Debug, Deserialize)]
struct DetailsResponse {
    result: Option<GooglePlace>,
    status: String,
    error_message: Option<String>,
}

/// Place details returned by Google Places
/// DOCUMENTATION: Only the fields needed to build a Place are requested
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GooglePlace {
    /// Google's unique place identifier
    pub place_id: String,
    /// Place name
    #[serde(default)]
    pub name: String,
    /// Place types array (e.g., ["restaurant", "food", "point_of_interest"])
    #[serde(default)]
    pub types: Vec<String>,
    /// Geographic location
    pub geometry: Option<GoogleGeometry>,
    /// Formatted address
    pub formatted_address: Option<String>,
    /// Phone number (formatted for local use)
    pub formatted_phone_number: Option<String>,
    /// Phone number (international format)
    pub international_phone_number: Option<String>,
    /// Website URL
    pub website: Option<String>,
    /// Google Maps URL
    pub url: Option<String>,
    /// Price level (0-4: free to very expensive)
    pub price_level: Option<i32>,
    /// Opening hours
    pub opening_hours: Option<GoogleOpeningHours>,
    /// Photos, most relevant first
    pub photos: Option<Vec<GooglePhoto>>,
}

/// Geographic location from Google
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleGeometry {
    pub location: GoogleLocation,
}

/// Coordinates from Google
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Opening hours metadata
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleOpeningHours {
    /// One line per reported day, e.g. "Monday: 9:00 AM – 5:00 PM"
    pub weekday_text: Option<Vec<String>>,
}

/// Photo from Google Places
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GooglePhoto {
    /// Photo reference (used to fetch actual photo)
    pub photo_reference: String,
}

impl GooglePlacesClient {
    /// Create new Google Places API client
    pub fn new(api_key: String, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            log::warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        });

        Self {
            client,
            api_key,
            base_url: "https://maps.googleapis.com/maps/api/place".to_string(),
        }
    }

    /// Look up the provider id for a parsed map link
    /// DOCUMENTATION: Text search on the link's name, biased to a 500 m circle
    /// around its coordinates. The first candidate wins.
    pub async fn find_place_id(&self, link: &MapLink) -> Result<String, PlacesError> {
        let bias = link.location_bias();
        let params = [
            ("input", link.name.as_str()),
            ("inputtype", "textquery"),
            ("fields", "place_id,name"),
            ("locationbias", bias.as_str()),
        ];

        log::debug!("Google Places find place: {:?} near {}", link.name, bias);

        let response: FindPlaceResponse = self.get_json("findplacefromtext/json", &params).await?;
        check_status(&response.status, response.error_message)?;

        response
            .candidates
            .into_iter()
            .find_map(|candidate| candidate.place_id)
            .ok_or_else(|| {
                log::info!("No Google Places candidate for {:?}", link.name);
                PlacesError::NotFound(link.name.clone())
            })
    }

    /// Get detailed information about a specific place
    pub async fn get_place_details(&self, place_id: &str) -> Result<GooglePlace, PlacesError> {
        let params = [("place_id", place_id), ("fields", DETAIL_FIELDS)];

        log::debug!("Google Places details lookup: place_id={}", place_id);

        let response: DetailsResponse = self.get_json("details/json", &params).await?;
        check_status(&response.status, response.error_message)?;

        response
            .result
            .ok_or_else(|| PlacesError::NotFound(place_id.to_string()))
    }

    /// Get photo URL from photo reference
    /// DOCUMENTATION: The result carries the API key; log it through
    /// `image_proxy::redact_url` only.
    pub fn get_photo_url(&self, photo_reference: &str, max_width: u32) -> Result<Url, PlacesError> {
        let max_width = max_width.to_string();
        Url::parse_with_params(
            &format!("{}/photo", self.base_url),
            &[
                ("maxwidth", max_width.as_str()),
                ("photoreference", photo_reference),
                ("key", self.api_key.as_str()),
            ],
        )
        .map_err(|e| PlacesError::ExternalApiError(format!("Invalid photo URL: {}", e)))
    }

    /// Convert provider details to a Place
    /// DOCUMENTATION: Opening hours go through the normalizer, reference
    /// links keep the Maps URL before the website, and the remaining
    /// provider types become tags.
    ///
    /// # Arguments
    /// * `details` - Place data from Google API
    /// * `image` - Data URI or URL for the primary photo (may be empty)
    pub fn to_place(&self, details: &GooglePlace, image: String) -> Place {
        let location = details
            .geometry
            .as_ref()
            .map(|g| Coordinates::new(g.location.lat, g.location.lng))
            .unwrap_or_default();

        let working_hour = details
            .opening_hours
            .as_ref()
            .and_then(|hours| hours.weekday_text.as_deref())
            .map(|lines| opening_hours::normalize(lines))
            .unwrap_or_default();

        let phone = details
            .formatted_phone_number
            .clone()
            .or_else(|| details.international_phone_number.clone())
            .unwrap_or_default();

        let mut url_references: Vec<String> = Vec::new();
        for url in [&details.url, &details.website].into_iter().flatten() {
            if !url_references.contains(url) {
                url_references.push(url.clone());
            }
        }

        let tags = details
            .types
            .iter()
            .filter(|t| !GENERIC_TYPES.contains(&t.as_str()));

        let name = if details.name.is_empty() {
            "Unknown"
        } else {
            details.name.as_str()
        };

        Place::new(details.place_id.clone(), name, location)
            .with_image(image)
            .with_phone_number(phone)
            .with_working_hour(working_hour)
            .with_readable_address(details.formatted_address.clone().unwrap_or_default())
            .with_tags(tags.cloned())
            .with_url_references(url_references)
            .with_price_level(
                details
                    .price_level
                    .and_then(|level| u32::try_from(level).ok())
                    .unwrap_or(0),
            )
    }

    /// First photo reference, if the provider returned any
    pub fn primary_photo_url(&self, details: &GooglePlace, max_width: u32) -> Option<String> {
        details
            .photos
            .as_ref()
            .and_then(|photos| photos.first())
            .and_then(|photo| {
                match self.get_photo_url(&photo.photo_reference, max_width) {
                    Ok(url) => Some(url.to_string()),
                    Err(e) => {
                        log::warn!("Skipping photo {}: {}", photo.photo_reference, e);
                        None
                    }
                }
            })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, PlacesError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                // the request URL carries the API key
                let e = e.without_url();
                log::error!("Google Places API request failed: {}", e);
                PlacesError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Google Places API error {}: {}", status, body);
            return Err(PlacesError::ExternalApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            let e = e.without_url();
            log::error!("Failed to parse Google Places response: {}", e);
            PlacesError::ExternalApiError(format!("Parse error: {}", e))
        })
    }
}

/// Map a provider status string to a result
fn check_status(status: &str, error_message: Option<String>) -> Result<(), PlacesError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        "OVER_QUERY_LIMIT" => {
            log::error!("Google Places API quota exceeded");
            Err(PlacesError::RateLimitExceeded)
        }
        "NOT_FOUND" => Err(PlacesError::NotFound(
            error_message.unwrap_or_else(|| "place".to_string()),
        )),
        other => {
            let msg = error_message.unwrap_or_else(|| format!("Unknown status: {}", other));
            log::error!("Google Places API unexpected status {}: {}", other, msg);
            Err(PlacesError::ExternalApiError(msg))
        }
    }
}
