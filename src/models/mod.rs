// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod coordinates;
pub mod json;
pub mod opening_hours;
pub mod place;
pub mod review;
pub mod schedule;

pub use coordinates::*;
pub use place::*;
pub use review::*;
pub use schedule::*;
