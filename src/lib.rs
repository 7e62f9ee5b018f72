//! Candidate résumé search over Ukrainian job boards.
//!
//! A search runs criteria through a per-site query builder, fetches and
//! normalizes listings page by page, then ranks them by relevance.

pub mod assembler;
pub mod cli;
pub mod conversation;
pub mod core;
pub mod error;
pub mod export;
pub mod normalize;
pub mod query;
pub mod ranking;
pub mod sites;
pub mod testing;
pub mod types;
pub mod utils;

pub use assembler::{Assembler, SearchOutcome, SearchReport};
pub use error::{ConfigurationError, FetchError};
pub use sites::{build_source, FetchedPage, PageFetcher, ResumeSource};
pub use types::{RankedResult, ResumeRecord, SearchCriteria, Site};
