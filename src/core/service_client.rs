// src/core/service_client.rs
//! HTTP client behind the [`PageFetcher`] seam.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::config_manager::HttpConfig;
use crate::error::FetchError;
use crate::sites::PageFetcher;
use crate::utils::truncate_chars;

/// Error bodies are cut to this many characters in diagnostics.
const ERROR_BODY_PREVIEW: usize = 200;

pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Client with the configured timeout and user agent, plus headers sent
    /// on every request (e.g. `Origin` for the robota.ua API).
    pub fn new(config: &HttpConfig, default_headers: &[(&str, &str)]) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in default_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .with_context(|| format!("Invalid header name: {}", name))?;
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("Invalid value for header {}", name))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    async fn check_status(url: &str, response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        warn!("{} returned {}", url, status);

        Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            message: truncate_chars(error_text.trim(), ERROR_BODY_PREVIEW),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        Self::check_status(url, response)
            .await?
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, FetchError> {
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let text = Self::check_status(url, response)
            .await?
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        serde_json::from_str(&text).map_err(|e| FetchError::Parse {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
