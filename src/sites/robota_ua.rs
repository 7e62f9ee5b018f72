// src/sites/robota_ua.rs
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use super::{FetchedPage, PageFetcher, ResumeSource};
use crate::core::config_manager::RobotaUaConfig;
use crate::error::FetchError;
use crate::normalize::{self, RawListing};
use crate::query::{self, SiteQuery};
use crate::types::response::RobotaSearchResponse;
use crate::types::{SearchCriteria, Site};

/// Queries the CV database JSON API. One POST yields a full page.
pub struct RobotaUaSource {
    fetcher: Arc<dyn PageFetcher>,
    api_url: String,
    candidate_base_url: String,
}

impl RobotaUaSource {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &RobotaUaConfig) -> Self {
        Self {
            fetcher,
            api_url: config.api_url.clone(),
            candidate_base_url: config.candidate_base_url.clone(),
        }
    }
}

#[async_trait]
impl ResumeSource for RobotaUaSource {
    fn site(&self) -> Site {
        Site::RobotaUa
    }

    async fn fetch_page(&self, criteria: &SearchCriteria, page: u32) -> Result<FetchedPage, FetchError> {
        let query = match query::build(criteria, Site::RobotaUa, page) {
            SiteQuery::RobotaUa(query) => query,
            other => return Err(FetchError::mismatched_query(&self.api_url, Site::RobotaUa, &other)),
        };
        let body = serde_json::to_value(&query).map_err(|e| FetchError::Parse {
            url: self.api_url.clone(),
            message: format!("Failed to encode query: {}", e),
        })?;

        info!("Querying robota.ua page {} for '{}'", page, query.key_words);
        let json = self.fetcher.post_json(&self.api_url, &body).await?;

        let response: RobotaSearchResponse =
            serde_json::from_value(json).map_err(|e| FetchError::Parse {
                url: self.api_url.clone(),
                message: e.to_string(),
            })?;
        debug!(
            "robota.ua returned {} documents (total {:?})",
            response.documents.len(),
            response.total
        );

        let records = response
            .documents
            .iter()
            .filter_map(|document| {
                normalize::normalize(
                    RawListing::JsonDocument {
                        document,
                        candidate_base_url: &self.candidate_base_url,
                    },
                    Site::RobotaUa,
                )
            })
            .collect();

        Ok(FetchedPage {
            listing_count: response.documents.len(),
            records,
        })
    }
}
