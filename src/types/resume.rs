// src/types/resume.rs
//! Canonical résumé record produced by normalization, regardless of source site.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::site::Site;

pub const NOT_SPECIFIED: &str = "Not specified";

/// Salary as the source site expressed it. Never unit-converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SalaryExpectation {
    /// Free text scraped from an HTML page, e.g. "25000 грн".
    Text(String),
    /// Numeric amount from a JSON API.
    Amount(i64),
    #[default]
    NotSpecified,
}

impl SalaryExpectation {
    /// Strict equality against the requested salary.
    ///
    /// Text only matches when it is exactly the decimal rendering of `target`,
    /// so "30000 грн" does not match 30000.
    pub fn matches_exactly(&self, target: u32) -> bool {
        match self {
            SalaryExpectation::Amount(amount) => *amount == i64::from(target),
            SalaryExpectation::Text(text) => *text == target.to_string(),
            SalaryExpectation::NotSpecified => false,
        }
    }
}

impl fmt::Display for SalaryExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalaryExpectation::Text(text) => f.write_str(text),
            SalaryExpectation::Amount(amount) => write!(f, "{}", amount),
            SalaryExpectation::NotSpecified => f.write_str(NOT_SPECIFIED),
        }
    }
}

/// One job or education entry from a résumé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub organization: String,
    pub duration: String,
    pub note: String,
}

impl Default for ExperienceEntry {
    fn default() -> Self {
        Self {
            title: NOT_SPECIFIED.to_string(),
            organization: NOT_SPECIFIED.to_string(),
            duration: NOT_SPECIFIED.to_string(),
            note: NOT_SPECIFIED.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub position: String,
    pub location: String,
    pub salary_expectation: SalaryExpectation,
    pub skills: Vec<String>,
    pub experience_entries: Vec<ExperienceEntry>,
    /// Total years derived from entry durations, `None` when nothing parsed.
    pub experience_years: Option<u32>,
    pub additional_info: String,
    pub link: String,
    pub site: Site,
}

impl ResumeRecord {
    /// A record with every field at its default. `link` is the identity key
    /// and therefore always supplied.
    pub fn with_defaults(link: impl Into<String>, site: Site) -> Self {
        Self {
            position: NOT_SPECIFIED.to_string(),
            location: NOT_SPECIFIED.to_string(),
            salary_expectation: SalaryExpectation::NotSpecified,
            skills: Vec::new(),
            experience_entries: Vec::new(),
            experience_years: None,
            additional_info: NOT_SPECIFIED.to_string(),
            link: link.into(),
            site,
        }
    }
}

/// A record paired with its relevance score. Only lives during ranking
/// and presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedResult {
    pub relevance_score: u32,
    #[serde(flatten)]
    pub record: ResumeRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_exact_match() {
        assert!(SalaryExpectation::Amount(30000).matches_exactly(30000));
        assert!(!SalaryExpectation::Amount(30001).matches_exactly(30000));
        assert!(SalaryExpectation::Text("30000".to_string()).matches_exactly(30000));
        assert!(!SalaryExpectation::Text("30000 грн".to_string()).matches_exactly(30000));
        assert!(!SalaryExpectation::NotSpecified.matches_exactly(0));
    }

    #[test]
    fn test_salary_display() {
        assert_eq!(SalaryExpectation::Amount(25000).to_string(), "25000");
        assert_eq!(SalaryExpectation::NotSpecified.to_string(), NOT_SPECIFIED);
    }

    #[test]
    fn test_record_defaults() {
        let record = ResumeRecord::with_defaults("https://robota.ua/ru/candidates/1", Site::RobotaUa);
        assert_eq!(record.position, NOT_SPECIFIED);
        assert_eq!(record.location, NOT_SPECIFIED);
        assert_eq!(record.additional_info, NOT_SPECIFIED);
        assert!(record.skills.is_empty());
        assert_eq!(record.experience_years, None);
    }
}
