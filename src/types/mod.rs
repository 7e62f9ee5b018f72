// src/types/mod.rs
pub mod criteria;
pub mod response;
pub mod resume;
pub mod site;

pub use criteria::SearchCriteria;
pub use resume::{ExperienceEntry, RankedResult, ResumeRecord, SalaryExpectation, NOT_SPECIFIED};
pub use site::Site;
