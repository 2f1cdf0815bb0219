// src/services/distance.rs
// DOCUMENTATION: Great-circle distance between the user and saved places
// PURPOSE: Haversine calculation plus the list-view formatting rules

use crate::models::{Coordinates, Place};

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Shown while the user's position is not yet known
pub const DISTANCE_PLACEHOLDER: &str = "Computing...";

/// Calculate distance between two coordinates in kilometers
/// DOCUMENTATION: Haversine formula with R = 6371 km. Inputs are not range
/// checked; a NaN component yields a NaN distance.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance of every place from the user, in list order
/// DOCUMENTATION: Without a user position nothing is computed and every
/// entry is None.
pub fn distances_from(origin: Option<Coordinates>, places: &[Place]) -> Vec<Option<f64>> {
    places
        .iter()
        .map(|place| origin.map(|origin| haversine_km(origin, place.location())))
        .collect()
}

/// Format a distance for display: "12.34 km", or the placeholder when unknown
pub fn format_distance(distance_km: Option<f64>) -> String {
    match distance_km {
        Some(km) => format!("{:.2} km", km),
        None => DISTANCE_PLACEHOLDER.to_string(),
    }
}
