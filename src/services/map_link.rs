// src/services/map_link.rs
// DOCUMENTATION: Shared map-link parser
// PURPOSE: Extract a place name and precise coordinates from a Google Maps share URL

use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// Name used when the link has no /place/ segment
pub const UNKNOWN_PLACE_NAME: &str = "Unknown";

/// Radius of the location bias sent with a place lookup, in meters
pub const LOCATION_BIAS_RADIUS_M: u32 = 500;

/// Query descriptor extracted from a map link
/// DOCUMENTATION: Not a Place yet; it has to be resolved through the
/// place-search provider to obtain phone, hours, photos and the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLink {
    pub name: String,
    pub location: Coordinates,
}

impl MapLink {
    /// Parse a share URL
    /// DOCUMENTATION: The URL is percent-decoded first. The name comes from the
    /// segment after "/place/" ("+" read as space) and defaults to "Unknown".
    /// Coordinates come from the embedded "!3d<lat>!4d<lon>" pair and are
    /// mandatory: without them, or when decoding fails, there is no result.
    ///
    /// # Example
    /// `.../place/Pizza+Napoli/@40.8,14.2,17z/data=!3d40.85!4d14.27` parses to
    /// name "Pizza Napoli" at (40.85, 14.27)
    pub fn parse(url: &str) -> Option<MapLink> {
        if has_malformed_escape(url) {
            log::debug!("Map link has a malformed percent escape: {}", url);
            return None;
        }

        let decoded = match urlencoding::decode(url) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::debug!("Map link is not valid UTF-8 after decoding: {}", e);
                return None;
            }
        };

        let location = match extract_coordinates(&decoded) {
            Some(location) => location,
            None => {
                log::debug!("Map link has no !3d/!4d coordinates: {}", decoded);
                return None;
            }
        };

        let name = extract_name(&decoded).unwrap_or_else(|| UNKNOWN_PLACE_NAME.to_string());

        Some(MapLink { name, location })
    }

    /// Location bias parameter for a find-place request ("circle:500@lat,lon")
    pub fn location_bias(&self) -> String {
        format!(
            "circle:{}@{},{}",
            LOCATION_BIAS_RADIUS_M, self.location.lat, self.location.lon
        )
    }
}

/// True when some '%' is not followed by two hex digits
fn has_malformed_escape(url: &str) -> bool {
    let bytes = url.as_bytes();
    bytes.iter().enumerate().any(|(index, &byte)| {
        byte == b'%'
            && !matches!(
                bytes.get(index + 1..index + 3),
                Some([high, low]) if high.is_ascii_hexdigit() && low.is_ascii_hexdigit()
            )
    })
}

/// First non-empty path segment after "/place/"
fn extract_name(url: &str) -> Option<String> {
    url.match_indices("/place/")
        .filter_map(|(index, marker)| {
            let segment = url[index + marker.len()..].split('/').next()?;
            (!segment.is_empty()).then(|| segment.replace('+', " "))
        })
        .next()
}

/// First "!3d<num>!4d<num>" pair whose numbers both parse
fn extract_coordinates(url: &str) -> Option<Coordinates> {
    url.match_indices("!3d").find_map(|(index, marker)| {
        let rest = &url[index + marker.len()..];
        let (lat, rest) = take_number(rest)?;
        let rest = rest.strip_prefix("!4d")?;
        let (lon, _) = take_number(rest)?;
        Some(Coordinates::new(lat.parse().ok()?, lon.parse().ok()?))
    })
}

/// Split off a leading run of digits, dots and minus signs
fn take_number(text: &str) -> Option<(&str, &str)> {
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .unwrap_or(text.len());
    (end > 0).then(|| text.split_at(end))
}
