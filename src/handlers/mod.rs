// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod health;
pub mod image;
pub mod places;
pub mod reviews;
pub mod tools;

pub use health::config as health_config;
pub use image::config as image_config;
pub use places::config as places_config;
pub use tools::config as tools_config;
