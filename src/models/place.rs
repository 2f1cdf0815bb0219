// src/models/place.rs
// DOCUMENTATION: Core data structure for saved places
// PURPOSE: Immutable Place record plus its flat JSON persistence shape

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use super::json::{int_field, string_field, string_list_field};
use super::{Coordinates, WeeklySchedule};
use crate::errors::RecordError;

/// Top of the provider's price scale (0 = unknown, 4 = very expensive)
pub const MAX_PRICE_LEVEL: u32 = 4;

/// A saved point of interest
/// DOCUMENTATION: Built from provider results or rehydrated from a stored
/// record. Never mutated in place: every update goes through a `with_*`
/// constructor that returns a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    id: String,
    name: String,
    location: Coordinates,
    image: String,
    phone_number: String,
    working_hour: WeeklySchedule,
    readable_address: String,
    tags: Vec<String>,
    url_references: Vec<String>,
    price_level: u32,
}

impl Place {
    /// New place with every optional field empty
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Coordinates) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            image: String::new(),
            phone_number: String::new(),
            working_hour: WeeklySchedule::new(),
            readable_address: String::new(),
            tags: Vec::new(),
            url_references: Vec::new(),
            price_level: 0,
        }
    }

    /// Provider identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Coordinates {
        self.location
    }

    /// Remote URL, data URI, or empty
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Empty when the provider had no phone number
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn working_hour(&self) -> &WeeklySchedule {
        &self.working_hour
    }

    pub fn readable_address(&self) -> &str {
        &self.readable_address
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn url_references(&self) -> &[String] {
        &self.url_references
    }

    /// 0 means unknown
    pub fn price_level(&self) -> u32 {
        self.price_level
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_location(self, location: Coordinates) -> Self {
        Self { location, ..self }
    }

    pub fn with_image(self, image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..self
        }
    }

    pub fn with_phone_number(self, phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            ..self
        }
    }

    pub fn with_working_hour(self, working_hour: WeeklySchedule) -> Self {
        Self {
            working_hour,
            ..self
        }
    }

    pub fn with_readable_address(self, readable_address: impl Into<String>) -> Self {
        Self {
            readable_address: readable_address.into(),
            ..self
        }
    }

    /// Tags are an ordered set: later duplicates are dropped
    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.into();
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }
        Self {
            tags: unique,
            ..self
        }
    }

    pub fn with_url_references<I, S>(self, url_references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            url_references: url_references.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Levels above the provider scale are capped at `MAX_PRICE_LEVEL`
    pub fn with_price_level(self, price_level: u32) -> Self {
        Self {
            price_level: price_level.min(MAX_PRICE_LEVEL),
            ..self
        }
    }

    /// "€" repeated once per price level, None when unknown
    pub fn price_label(&self) -> Option<String> {
        (self.price_level > 0).then(|| "€".repeat(self.price_level as usize))
    }

    /// Export the flat persistence record
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "location": self.location.to_json(),
            "image": self.image,
            "phoneNumber": self.phone_number,
            "workingHour": self.working_hour.to_json(),
            "readableAddress": self.readable_address,
            "tags": self.tags,
            "urlReferences": self.url_references,
            "priceLevel": self.price_level,
        })
    }

    /// Rehydrate a stored record
    /// DOCUMENTATION: Missing or mistyped fields fall back to empty values so
    /// partially populated documents still load. A record that is absent,
    /// null or not an object is a caller bug and fails with MissingRecord.
    pub fn from_json(value: Option<&Value>) -> Result<Place, RecordError> {
        let Some(Value::Object(obj)) = value else {
            return Err(RecordError::MissingRecord("place"));
        };

        let price_level = u32::try_from(int_field(obj, "priceLevel")).unwrap_or(0);

        Ok(Place::new(
            string_field(obj, "id"),
            string_field(obj, "name"),
            Coordinates::from_json(obj.get("location")),
        )
        .with_image(string_field(obj, "image"))
        .with_phone_number(string_field(obj, "phoneNumber"))
        .with_working_hour(WeeklySchedule::from_json(obj.get("workingHour")))
        .with_readable_address(string_field(obj, "readableAddress"))
        .with_tags(string_list_field(obj, "tags"))
        .with_url_references(string_list_field(obj, "urlReferences"))
        .with_price_level(price_level))
    }
}

impl Serialize for Place {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Short label for a reference link
/// DOCUMENTATION: Known hosts get a friendly name, other hosts their
/// second-level label ("www.trattoria.example.it" -> "example"), and
/// strings that are not URLs are returned unchanged.
pub fn url_label(url: &str) -> String {
    const FRIENDLY_HOSTS: [(&str, &str); 5] = [
        ("maps.google.com", "Google Maps"),
        ("www.google.com", "Google"),
        ("facebook.com", "Facebook"),
        ("instagram.com", "Instagram"),
        ("tripadvisor.it", "TripAdvisor"),
    ];

    let host = match reqwest::Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_string(),
            None => return url.to_string(),
        },
        Err(_) => return url.to_string(),
    };
    let bare = host.strip_prefix("www.").unwrap_or(&host);

    if let Some((_, label)) = FRIENDLY_HOSTS
        .iter()
        .find(|(known, _)| *known == host || *known == bare)
    {
        return label.to_string();
    }

    let parts: Vec<&str> = bare.split('.').collect();
    if parts.len() > 2 {
        parts[parts.len() - 2].to_string()
    } else {
        parts[0].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeRange, Weekday};

    fn sample_place() -> Place {
        Place::new("ChIJ-pizza", "Pizza Napoli", Coordinates::new(40.85, 14.27))
            .with_image("data:image/jpeg;base64,AAAA")
            .with_phone_number("+39 081 000000")
            .with_working_hour(
                WeeklySchedule::new()
                    .with_day(Weekday::Monday, vec![TimeRange::new("12:00", "15:00")])
                    .with_day(Weekday::Tuesday, vec![]),
            )
            .with_readable_address("Via dei Tribunali 1, Napoli")
            .with_tags(["pizza", "napoli"])
            .with_url_references(["https://maps.google.com/?cid=1"])
            .with_price_level(2)
    }

    #[test]
    fn test_round_trip() {
        let place = sample_place();
        let restored = Place::from_json(Some(&place.to_json())).unwrap();
        assert_eq!(restored, place);
    }

    #[test]
    fn test_to_json_shape() {
        let value = sample_place().to_json();
        assert_eq!(value["phoneNumber"], "+39 081 000000");
        assert_eq!(value["location"], json!({"lat": 40.85, "lon": 14.27}));
        assert_eq!(value["workingHour"]["tuesday"], json!([]));
        assert!(value["workingHour"].get("wednesday").is_none());
        assert_eq!(value["priceLevel"], 2);
    }

    #[test]
    fn test_missing_record() {
        assert_eq!(
            Place::from_json(None),
            Err(RecordError::MissingRecord("place"))
        );
        assert_eq!(
            Place::from_json(Some(&Value::Null)),
            Err(RecordError::MissingRecord("place"))
        );
        assert!(Place::from_json(Some(&json!("pizza"))).is_err());
    }

    #[test]
    fn test_empty_object_defaults() {
        let place = Place::from_json(Some(&json!({}))).unwrap();
        assert_eq!(place, Place::new("", "", Coordinates::default()));
        assert!(place.working_hour().is_empty());
        assert_eq!(place.price_level(), 0);
    }

    #[test]
    fn test_legacy_record() {
        let legacy = json!({
            "id": "ChIJ-old",
            "name": "Old Bar",
            "location": {"lat": "45.46", "lon": "9.19"},
            "image": "https://placehold.co/400",
            "phoneNumber": "N/A",
            "workingHour": ["Monday: 7:00 AM – 8:00 PM", "Sunday: Closed"],
            "priceLevel": -1
        });

        let place = Place::from_json(Some(&legacy)).unwrap();
        assert_eq!(place.location(), Coordinates::new(45.46, 9.19));
        assert_eq!(
            place.working_hour().get(Weekday::Monday),
            Some(&[TimeRange::new("07:00", "20:00")][..])
        );
        assert!(place.working_hour().is_closed(Weekday::Sunday));
        assert_eq!(place.price_level(), 0);
        assert!(place.tags().is_empty());
    }

    #[test]
    fn test_with_replaces_single_field() {
        let place = sample_place();
        let renamed = place.clone().with_name("Pizzeria Napoli");

        assert_eq!(renamed.name(), "Pizzeria Napoli");
        assert_eq!(renamed.id(), place.id());
        assert_eq!(renamed.tags(), place.tags());
        assert_eq!(place.name(), "Pizza Napoli");
    }

    #[test]
    fn test_tags_are_an_ordered_set() {
        let place = Place::new("x", "X", Coordinates::default())
            .with_tags(["wine", "pizza", "wine", "terrace"]);
        assert_eq!(place.tags(), ["wine", "pizza", "terrace"]);
    }

    #[test]
    fn test_price_label() {
        assert_eq!(sample_place().price_label(), Some("€€".to_string()));
        assert_eq!(
            sample_place().with_price_level(0).price_label(),
            None
        );
    }

    #[test]
    fn test_price_level_is_capped() {
        let place = Place::from_json(Some(&json!({"id": "x", "priceLevel": 4294967295u64}))).unwrap();

        assert_eq!(place.price_level(), MAX_PRICE_LEVEL);
        assert_eq!(place.price_label(), Some("€€€€".to_string()));
        assert_eq!(sample_place().with_price_level(9).price_level(), 4);
    }

    #[test]
    fn test_url_label() {
        assert_eq!(url_label("https://maps.google.com/?cid=1"), "Google Maps");
        assert_eq!(url_label("https://www.google.com/maps"), "Google");
        assert_eq!(url_label("https://www.instagram.com/pizza"), "Instagram");
        assert_eq!(url_label("https://shop.trattoria.it/menu"), "trattoria");
        assert_eq!(url_label("https://www.osteria.com"), "osteria");
        assert_eq!(url_label("not a url"), "not a url");
    }
}
