// src/models/coordinates.rs
// DOCUMENTATION: Geographic coordinate pair
// PURPOSE: Canonical location representation shared by places, map links and distance queries

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::json::as_f64;

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude, -90..=90
    pub lat: f64,
    /// Longitude, -180..=180
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Export as the persisted `{lat, lon}` object
    pub fn to_json(&self) -> Value {
        json!({ "lat": self.lat, "lon": self.lon })
    }

    /// Read any stored location shape
    /// DOCUMENTATION: Older documents hold `{lat, lon}` with string values or a
    /// `[lat, lon]` tuple; both normalize here. Unreadable components become 0.
    pub fn from_json(value: Option<&Value>) -> Self {
        let (lat, lon) = match value {
            Some(Value::Object(obj)) => (obj.get("lat"), obj.get("lon")),
            Some(Value::Array(items)) => (items.first(), items.get(1)),
            _ => (None, None),
        };

        Self {
            lat: lat.and_then(as_f64).unwrap_or(0.0),
            lon: lon.and_then(as_f64).unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_with_numbers() {
        let value = json!({"lat": 40.85, "lon": 14.27});
        assert_eq!(
            Coordinates::from_json(Some(&value)),
            Coordinates::new(40.85, 14.27)
        );
    }

    #[test]
    fn test_object_with_strings() {
        let value = json!({"lat": "40.85", "lon": "14.27"});
        assert_eq!(
            Coordinates::from_json(Some(&value)),
            Coordinates::new(40.85, 14.27)
        );
    }

    #[test]
    fn test_tuple_shape() {
        let value = json!([40.85, "14.27"]);
        assert_eq!(
            Coordinates::from_json(Some(&value)),
            Coordinates::new(40.85, 14.27)
        );
    }

    #[test]
    fn test_missing_defaults_to_zero() {
        assert_eq!(Coordinates::from_json(None), Coordinates::default());
        let partial = json!({"lat": ""});
        assert_eq!(
            Coordinates::from_json(Some(&partial)),
            Coordinates::default()
        );
    }

    #[test]
    fn test_round_trip() {
        let coords = Coordinates::new(-33.8688, 151.2093);
        assert_eq!(Coordinates::from_json(Some(&coords.to_json())), coords);
    }
}
