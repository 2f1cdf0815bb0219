// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, the place store, and start HTTP server

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use place_bookmarks::config::Config;
use place_bookmarks::handlers;
use place_bookmarks::services::{ImageProxy, PlaceStore};
use serde_json::Value;
use std::io;
use std::time::Duration;

/// Read a JSON array of place records exported from an earlier deployment
async fn load_seed_file(store: &PlaceStore, path: &str) -> anyhow::Result<usize> {
    let contents = tokio::fs::read_to_string(path).await?;
    let records: Vec<Value> = serde_json::from_str(&contents)?;
    let count = records.len();
    store.load_records(records).await;
    Ok(count)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting place-bookmarks service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize the place store
    let store = web::Data::new(PlaceStore::new());
    if let Some(path) = &config.places_seed_file {
        match load_seed_file(store.get_ref(), path).await {
            Ok(count) => log::info!("Seeded {} places from {}", count, path),
            Err(e) => {
                log::error!("Failed to load seed file {}: {:#}", path, e);
                std::process::exit(1);
            }
        }
    }

    // 5. Image proxy shared by import and the fetch endpoint
    let image_proxy = web::Data::new(ImageProxy::new(
        config.image_placeholder_url.clone(),
        Duration::from_secs(config.http_timeout_secs),
    ));

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            // Application state (store, config, and image proxy)
            .app_data(store.clone())
            .app_data(config_data.clone())
            .app_data(image_proxy.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::places_config)
            .configure(handlers::tools_config)
            .configure(handlers::image_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
