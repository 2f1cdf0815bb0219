// src/models/review.rs
// DOCUMENTATION: Personal reviews of saved places
// PURPOSE: Review record, its flat JSON shape and the create request DTO

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};
use uuid::Uuid;
use validator::Validate;

use super::json::{int_field, string_field};
use crate::errors::RecordError;

/// Personal review attached to a saved place
/// DOCUMENTATION: `place_id` points at `Place::id` by convention only.
/// Sub-ratings are meant to be 0-5 but are not checked here; the HTTP
/// layer validates them before saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    review_id: String,
    place_id: String,
    reviewer: String,
    food: i32,
    price: i32,
    location: i32,
    service: i32,
    comment: String,
}

impl Review {
    /// Start a blank review for a place with a fresh random id
    pub fn new(place_id: impl Into<String>) -> Self {
        Self {
            review_id: Uuid::new_v4().to_string(),
            place_id: place_id.into(),
            reviewer: String::new(),
            food: 0,
            price: 0,
            location: 0,
            service: 0,
            comment: String::new(),
        }
    }

    pub fn review_id(&self) -> &str {
        &self.review_id
    }

    pub fn place_id(&self) -> &str {
        &self.place_id
    }

    pub fn reviewer(&self) -> &str {
        &self.reviewer
    }

    pub fn food(&self) -> i32 {
        self.food
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    pub fn location(&self) -> i32 {
        self.location
    }

    pub fn service(&self) -> i32 {
        self.service
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn with_reviewer(self, reviewer: impl Into<String>) -> Self {
        Self {
            reviewer: reviewer.into(),
            ..self
        }
    }

    pub fn with_food(self, food: i32) -> Self {
        Self { food, ..self }
    }

    pub fn with_price(self, price: i32) -> Self {
        Self { price, ..self }
    }

    pub fn with_location(self, location: i32) -> Self {
        Self { location, ..self }
    }

    pub fn with_service(self, service: i32) -> Self {
        Self { service, ..self }
    }

    pub fn with_comment(self, comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            ..self
        }
    }

    /// Export the flat persistence record
    pub fn to_json(&self) -> Value {
        json!({
            "reviewId": self.review_id,
            "placeId": self.place_id,
            "reviewer": self.reviewer,
            "food": self.food,
            "price": self.price,
            "location": self.location,
            "service": self.service,
            "comment": self.comment,
        })
    }

    /// Rehydrate a stored review, defaulting missing fields
    pub fn from_json(value: Option<&Value>) -> Result<Review, RecordError> {
        let Some(Value::Object(obj)) = value else {
            return Err(RecordError::MissingRecord("review"));
        };

        Ok(Review {
            review_id: string_field(obj, "reviewId"),
            place_id: string_field(obj, "placeId"),
            reviewer: string_field(obj, "reviewer"),
            food: rating_field(obj, "food"),
            price: rating_field(obj, "price"),
            location: rating_field(obj, "location"),
            service: rating_field(obj, "service"),
            comment: string_field(obj, "comment"),
        })
    }
}

/// Sub-rating as stored, 0 when missing or out of i32 range
fn rating_field(obj: &Map<String, Value>, key: &str) -> i32 {
    i32::try_from(int_field(obj, key)).unwrap_or(0)
}

impl Serialize for Review {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Request to save a review for a place
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, max = 120))]
    pub reviewer: String,

    #[validate(range(min = 0, max = 5))]
    #[serde(default)]
    pub food: i32,

    #[validate(range(min = 0, max = 5))]
    #[serde(default)]
    pub price: i32,

    #[validate(range(min = 0, max = 5))]
    #[serde(default)]
    pub location: i32,

    #[validate(range(min = 0, max = 5))]
    #[serde(default)]
    pub service: i32,

    #[validate(length(max = 2000))]
    #[serde(default)]
    pub comment: String,
}

impl CreateReviewRequest {
    /// Build the review for a place, assigning a new id
    pub fn into_review(self, place_id: &str) -> Review {
        Review::new(place_id)
            .with_reviewer(self.reviewer)
            .with_food(self.food)
            .with_price(self.price)
            .with_location(self.location)
            .with_service(self.service)
            .with_comment(self.comment)
    }
}
