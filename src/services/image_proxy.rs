// src/services/image_proxy.rs
// DOCUMENTATION: Remote photo fetcher
// PURPOSE: Re-encode provider photos as data URIs so saved places carry their own image

use std::time::Duration;

use anyhow::{bail, Context};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

/// Content type assumed when the remote server does not send one
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Fetches images and embeds them as `data:` URIs
pub struct ImageProxy {
    client: Client,
    placeholder_url: String,
}

impl ImageProxy {
    pub fn new(placeholder_url: String, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            log::warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        });

        Self {
            client,
            placeholder_url,
        }
    }

    /// URL stored when a fetch fails
    pub fn placeholder_url(&self) -> &str {
        &self.placeholder_url
    }

    /// Fetch an image as a data URI
    /// DOCUMENTATION: Never fails. Transport errors and non-success statuses
    /// are logged and answered with the placeholder URL, which callers store
    /// exactly like a data URI.
    pub async fn fetch_as_data_uri(&self, image_url: &str) -> String {
        match self.try_fetch(image_url).await {
            Ok(data_uri) => data_uri,
            Err(e) => {
                log::warn!("Image fetch failed for {}: {:#}", redact_url(image_url), e);
                self.placeholder_url.clone()
            }
        }
    }

    async fn try_fetch(&self, image_url: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .get(image_url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("remote server answered {}", status);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(reqwest::Error::without_url)
            .context("reading body failed")?;
        log::debug!(
            "Fetched {} bytes of {} from {}",
            bytes.len(),
            content_type,
            redact_url(image_url)
        );

        Ok(encode_data_uri(&content_type, &bytes))
    }
}

/// URL safe to log: scheme, host and path only, since provider photo
/// URLs carry the API key in the query
pub fn redact_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => "<invalid url>".to_string(),
    }
}

/// Build `data:<content-type>;base64,<payload>`
pub fn encode_data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}
