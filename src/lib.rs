// src/lib.rs
// DOCUMENTATION: Library root
// PURPOSE: Expose models, services and handlers to the server binary and to tests

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
