// src/sites/work_ua.rs
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{FetchedPage, PageFetcher, ResumeSource};
use crate::core::config_manager::WorkUaConfig;
use crate::error::FetchError;
use crate::normalize::{self, work_ua::extract_listing_links, RawListing};
use crate::query::{self, SiteQuery};
use crate::types::{SearchCriteria, Site};

/// Scrapes the HTML search page, then each résumé detail page.
pub struct WorkUaSource {
    fetcher: Arc<dyn PageFetcher>,
    base_url: String,
    detail_concurrency: usize,
}

impl WorkUaSource {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &WorkUaConfig, detail_concurrency: usize) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.clone(),
            detail_concurrency: detail_concurrency.max(1),
        }
    }

    pub fn search_url(&self, criteria: &SearchCriteria, page: u32) -> Result<String, FetchError> {
        match query::build(criteria, Site::WorkUa, page) {
            SiteQuery::WorkUa(query) => Ok(query.to_url(&self.base_url)),
            other => Err(FetchError::mismatched_query(&self.base_url, Site::WorkUa, &other)),
        }
    }
}

#[async_trait]
impl ResumeSource for WorkUaSource {
    fn site(&self) -> Site {
        Site::WorkUa
    }

    async fn fetch_page(&self, criteria: &SearchCriteria, page: u32) -> Result<FetchedPage, FetchError> {
        let url = self.search_url(criteria, page)?;
        info!("Fetching work.ua page {}: {}", page, url);

        let html = self.fetcher.get_text(&url).await?;
        let links = extract_listing_links(&html, &self.base_url);
        debug!("Found {} listings on page {}", links.len(), page);

        // Detail pages are independent; `buffered` keeps listing order
        let listing_count = links.len();
        let records = stream::iter(links)
            .map(|link: String| {
                let fetcher = Arc::clone(&self.fetcher);
                async move {
                    match fetcher.get_text(&link).await {
                        Ok(detail) => normalize::normalize(
                            RawListing::HtmlPage {
                                link: &link,
                                html: &detail,
                            },
                            Site::WorkUa,
                        ),
                        Err(e) => {
                            warn!("Skipping résumé {}: {}", link, e);
                            None
                        }
                    }
                }
            })
            .buffered(self.detail_concurrency)
            .filter_map(|record| async move { record })
            .collect::<Vec<_>>()
            .await;

        Ok(FetchedPage {
            listing_count,
            records,
        })
    }
}
