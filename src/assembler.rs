// src/assembler.rs
//! Pagination loop and result assembly over a single [`ResumeSource`].

use tracing::{error, info, warn};

use crate::error::FetchError;
use crate::ranking;
use crate::sites::ResumeSource;
use crate::types::{RankedResult, ResumeRecord, SearchCriteria, Site};

/// Records gathered across pages, plus the failure that cut the loop short.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub records: Vec<ResumeRecord>,
    pub error: Option<FetchError>,
    pub pages_fetched: u32,
}

/// Every ranked result, plus how many of them to show.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub site: Site,
    pub total_found: usize,
    /// Best first. Exports write all of them.
    pub results: Vec<RankedResult>,
    pub display_limit: usize,
    pub error: Option<FetchError>,
}

impl SearchReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The leading `display_limit` results.
    pub fn displayed(&self) -> &[RankedResult] {
        ranking::truncate(&self.results, self.display_limit)
    }
}

pub struct Assembler<'a> {
    source: &'a dyn ResumeSource,
}

impl<'a> Assembler<'a> {
    pub fn new(source: &'a dyn ResumeSource) -> Self {
        Self { source }
    }

    /// Fetch pages `1..=max_pages` in order. Stops at the first empty page or
    /// the first failure; records gathered before a failure are kept.
    pub async fn fetch(&self, criteria: &SearchCriteria, max_pages: u32) -> SearchOutcome {
        let site = self.source.site();
        let mut outcome = SearchOutcome::default();

        for page in 1..=max_pages.max(1) {
            match self.source.fetch_page(criteria, page).await {
                Ok(fetched) if fetched.is_end_of_results() => {
                    info!("No more results from {} after page {}", site, page - 1);
                    break;
                }
                Ok(fetched) => {
                    outcome.pages_fetched = page;
                    if fetched.records.len() < fetched.listing_count {
                        warn!(
                            "{} of {} listings on page {} were dropped",
                            fetched.listing_count - fetched.records.len(),
                            fetched.listing_count,
                            page
                        );
                    }
                    outcome.records.extend(fetched.records);
                }
                Err(e) => {
                    error!("Fetching page {} from {} failed: {}", page, site, e);
                    outcome.error = Some(e);
                    break;
                }
            }
        }

        info!(
            "Collected {} résumés from {} in {} page(s)",
            outcome.records.len(),
            site,
            outcome.pages_fetched
        );
        outcome
    }

    /// Fetch and rank. The criteria's limit bounds what is displayed.
    pub async fn search(&self, criteria: &SearchCriteria, max_pages: u32) -> SearchReport {
        let outcome = self.fetch(criteria, max_pages).await;
        let total_found = outcome.records.len();
        SearchReport {
            site: self.source.site(),
            total_found,
            results: ranking::rank_scored(outcome.records, criteria),
            display_limit: criteria.effective_limit(),
            error: outcome.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::FetchedPage;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves scripted pages; the script is consumed one page per call.
    struct ScriptedSource {
        pages: Mutex<Vec<Result<FetchedPage, FetchError>>>,
        requested: Mutex<Vec<u32>>,
    }

    impl ScriptedSource {
        fn new(mut pages: Vec<Result<FetchedPage, FetchError>>) -> Self {
            pages.reverse();
            Self {
                pages: Mutex::new(pages),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResumeSource for ScriptedSource {
        fn site(&self) -> Site {
            Site::RobotaUa
        }

        async fn fetch_page(&self, _criteria: &SearchCriteria, page: u32) -> Result<FetchedPage, FetchError> {
            self.requested.lock().unwrap().push(page);
            self.pages
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(FetchedPage::default()))
        }
    }

    fn page_of(positions: &[&str]) -> Result<FetchedPage, FetchError> {
        let records: Vec<ResumeRecord> = positions
            .iter()
            .map(|position| {
                let mut record =
                    ResumeRecord::with_defaults(format!("https://robota.ua/ru/candidates/{}", position), Site::RobotaUa);
                record.position = position.to_string();
                record
            })
            .collect();
        Ok(FetchedPage {
            listing_count: records.len(),
            records,
        })
    }

    fn timeout() -> FetchError {
        FetchError::Timeout {
            url: "https://employer-api.robota.ua/cvdb/resumes".to_string(),
        }
    }

    fn criteria() -> SearchCriteria {
        SearchCriteria::new("Data Scientist").unwrap()
    }

    #[tokio::test]
    async fn test_pages_are_concatenated_in_order() {
        let source = ScriptedSource::new(vec![page_of(&["a", "b"]), page_of(&["c"])]);
        let outcome = Assembler::new(&source).fetch(&criteria(), 2).await;

        let positions: Vec<_> = outcome.records.iter().map(|r| r.position.as_str()).collect();
        assert_eq!(positions, vec!["a", "b", "c"]);
        assert_eq!(outcome.pages_fetched, 2);
        assert!(outcome.error.is_none());
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_empty_page_stops_without_error() {
        let source = ScriptedSource::new(vec![page_of(&["a"]), page_of(&[]), page_of(&["never"])]);
        let outcome = Assembler::new(&source).fetch(&criteria(), 5).await;

        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.error.is_none());
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_failure_keeps_earlier_pages() {
        let source = ScriptedSource::new(vec![page_of(&["a", "b"]), Err(timeout())]);
        let outcome = Assembler::new(&source).fetch(&criteria(), 3).await;

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.error, Some(timeout()));
        assert_eq!(outcome.pages_fetched, 1);
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_zero_pages_still_fetches_first() {
        let source = ScriptedSource::new(vec![page_of(&["a"])]);
        let outcome = Assembler::new(&source).fetch(&criteria(), 0).await;

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(source.requested(), vec![1]);
    }

    #[tokio::test]
    async fn test_search_ranks_and_limits_display() {
        let source = ScriptedSource::new(vec![page_of(&["Zeta", "alpha", "Beta"])]);
        let criteria = criteria().with_result_limit(Some(2)).unwrap();
        let report = Assembler::new(&source).search(&criteria, 1).await;

        assert_eq!(report.total_found, 3);
        let positions: Vec<_> = report.results.iter().map(|r| r.record.position.as_str()).collect();
        assert_eq!(positions, vec!["alpha", "Beta", "Zeta"]);
        let shown: Vec<_> = report.displayed().iter().map(|r| r.record.position.as_str()).collect();
        assert_eq!(shown, vec!["alpha", "Beta"]);
        assert_eq!(report.site, Site::RobotaUa);
    }
}
