// src/query/mod.rs
//! Maps search criteria into each site's own query representation.

pub mod robota_ua;
pub mod work_ua;

pub use robota_ua::RobotaUaQuery;
pub use work_ua::WorkUaQuery;

use crate::types::{SearchCriteria, Site};

/// Site-specific query for one results page. Derived per call; only the page
/// index changes between paginated calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteQuery {
    WorkUa(WorkUaQuery),
    RobotaUa(RobotaUaQuery),
}

impl SiteQuery {
    pub fn site(&self) -> Site {
        match self {
            SiteQuery::WorkUa(_) => Site::WorkUa,
            SiteQuery::RobotaUa(_) => Site::RobotaUa,
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            SiteQuery::WorkUa(query) => query.page,
            SiteQuery::RobotaUa(query) => query.page,
        }
    }
}

/// Pure function of its inputs: no I/O, no hidden state.
pub fn build(criteria: &SearchCriteria, site: Site, page: u32) -> SiteQuery {
    match site {
        Site::WorkUa => SiteQuery::WorkUa(WorkUaQuery::build(criteria, page)),
        Site::RobotaUa => SiteQuery::RobotaUa(RobotaUaQuery::build(criteria, page)),
    }
}
