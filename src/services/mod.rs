// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod distance;
pub mod google_places_client;
pub mod image_proxy;
pub mod map_link;
pub mod place_service;
pub mod place_store;

pub use google_places_client::*;
pub use image_proxy::*;
pub use map_link::*;
pub use place_service::*;
pub use place_store::*;
