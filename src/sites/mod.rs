// src/sites/mod.rs
//! Per-site résumé sources behind one interface, selected by [`Site`].

pub mod robota_ua;
pub mod work_ua;

pub use robota_ua::RobotaUaSource;
pub use work_ua::WorkUaSource;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::core::{ConfigManager, HttpClient};
use crate::error::FetchError;
use crate::types::{ResumeRecord, SearchCriteria, Site};

/// Raw content retrieval. The core does not care how the bytes were obtained.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, FetchError>;
}

/// One results page after normalization.
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    /// Listings the site returned, including ones later dropped.
    pub listing_count: usize,
    pub records: Vec<ResumeRecord>,
}

impl FetchedPage {
    /// A page without listings marks the end of results.
    pub fn is_end_of_results(&self) -> bool {
        self.listing_count == 0
    }
}

#[async_trait]
pub trait ResumeSource: Send + Sync {
    fn site(&self) -> Site;

    async fn fetch_page(&self, criteria: &SearchCriteria, page: u32) -> Result<FetchedPage, FetchError>;
}

/// Production source for `site`, backed by a real HTTP client.
pub fn build_source(site: Site, config: &ConfigManager) -> Result<Box<dyn ResumeSource>> {
    let source: Box<dyn ResumeSource> = match site {
        Site::WorkUa => {
            let fetcher = Arc::new(HttpClient::new(&config.http, &[])?);
            Box::new(WorkUaSource::new(
                fetcher,
                &config.sites.work_ua,
                config.http.detail_concurrency,
            ))
        }
        Site::RobotaUa => {
            let origin = config.sites.robota_ua.origin.as_str();
            let fetcher = Arc::new(HttpClient::new(&config.http, &[("Origin", origin)])?);
            Box::new(RobotaUaSource::new(fetcher, &config.sites.robota_ua))
        }
    };
    Ok(source)
}
