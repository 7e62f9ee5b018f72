// src/ranking.rs
//! Relevance scoring and the total order over a result set.
//!
//! Scores are additive integers:
//!
//! | Rule | Points |
//! |------|--------|
//! | each keyword found (case-insensitive substring) in any skill | +2 |
//! | salary expectation equals the requested salary exactly | +3 |
//! | record experience (missing = 0) ≥ requested experience (unset = 0) | +5 |
//! | English required and any skill mentions "english" | +2 |
//!
//! Ordering is descending score, then ascending lowercase position. The sort
//! is stable, so records equal on both keys keep their fetch order.

use std::cmp::Ordering;

use crate::types::{RankedResult, ResumeRecord, SearchCriteria};

pub const KEYWORD_POINTS: u32 = 2;
pub const SALARY_POINTS: u32 = 3;
pub const EXPERIENCE_POINTS: u32 = 5;
pub const ENGLISH_POINTS: u32 = 2;

pub fn score(record: &ResumeRecord, criteria: &SearchCriteria) -> u32 {
    let skills: Vec<String> = record.skills.iter().map(|s| s.to_lowercase()).collect();
    let mut total = 0;

    let matched_keywords = criteria
        .keywords
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .filter(|keyword| skills.iter().any(|skill| skill.contains(keyword.as_str())))
        .count() as u32;
    total += matched_keywords * KEYWORD_POINTS;

    if let Some(salary) = criteria.salary {
        if record.salary_expectation.matches_exactly(salary) {
            total += SALARY_POINTS;
        }
    }

    if record.experience_years.unwrap_or(0) >= criteria.experience_years.unwrap_or(0) {
        total += EXPERIENCE_POINTS;
    }

    if criteria.requires_english == Some(true) && skills.iter().any(|skill| skill.contains("english")) {
        total += ENGLISH_POINTS;
    }

    total
}

fn compare(a: &RankedResult, b: &RankedResult) -> Ordering {
    b.relevance_score
        .cmp(&a.relevance_score)
        .then_with(|| a.record.position.to_lowercase().cmp(&b.record.position.to_lowercase()))
}

/// Score every record and order the whole set. Must see the full fetched set;
/// truncate afterwards with [`truncate`].
pub fn rank_scored(records: Vec<ResumeRecord>, criteria: &SearchCriteria) -> Vec<RankedResult> {
    let mut ranked: Vec<RankedResult> = records
        .into_iter()
        .map(|record| RankedResult {
            relevance_score: score(&record, criteria),
            record,
        })
        .collect();

    ranked.sort_by(compare);
    ranked
}

pub fn rank(records: Vec<ResumeRecord>, criteria: &SearchCriteria) -> Vec<ResumeRecord> {
    rank_scored(records, criteria)
        .into_iter()
        .map(|ranked| ranked.record)
        .collect()
}

/// Prefix take of an already-ranked sequence.
pub fn truncate<T>(ranked: &[T], limit: usize) -> &[T] {
    &ranked[..limit.min(ranked.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SalaryExpectation, Site};

    fn record(position: &str, skills: &[&str], years: Option<u32>, salary: SalaryExpectation) -> ResumeRecord {
        let mut record = ResumeRecord::with_defaults(
            format!("https://www.work.ua/resumes/{}/", position.len()),
            Site::WorkUa,
        );
        record.position = position.to_string();
        record.skills = skills.iter().map(|s| s.to_string()).collect();
        record.experience_years = years;
        record.salary_expectation = salary;
        record
    }

    fn data_scientist_criteria() -> SearchCriteria {
        SearchCriteria::new("Data Scientist")
            .unwrap()
            .with_keywords(vec!["python".to_string(), "sql".to_string()])
            .with_salary(Some(30_000))
            .with_experience_years(Some(3))
            .with_requires_english(Some(true))
    }

    #[test]
    fn test_scoring_scenario() {
        let criteria = data_scientist_criteria();
        let a = record("A", &["Python", "English"], Some(5), SalaryExpectation::Amount(30_000));
        let b = record("B", &["Java"], Some(1), SalaryExpectation::Amount(20_000));

        assert_eq!(score(&a, &criteria), 12);
        assert_eq!(score(&b, &criteria), 0);

        let ranked = rank(vec![b.clone(), a.clone()], &criteria);
        assert_eq!(ranked, vec![a, b]);
    }

    #[test]
    fn test_keyword_points_accumulate_uncapped() {
        let criteria = SearchCriteria::new("Dev")
            .unwrap()
            .with_keywords(vec!["rust".to_string(), "tokio".to_string(), "serde".to_string()])
            .with_experience_years(Some(50));
        let r = record("Dev", &["Rust, Tokio and Serde"], None, SalaryExpectation::NotSpecified);
        assert_eq!(score(&r, &criteria), 6);
    }

    #[test]
    fn test_missing_experience_counts_as_zero() {
        let criteria = SearchCriteria::new("Dev").unwrap().with_experience_years(Some(0));
        let r = record("Dev", &[], None, SalaryExpectation::NotSpecified);
        assert_eq!(score(&r, &criteria), EXPERIENCE_POINTS);

        let criteria = criteria.with_experience_years(Some(1));
        assert_eq!(score(&r, &criteria), 0);
    }

    #[test]
    fn test_english_only_when_required() {
        let r = record("Dev", &["Upper-intermediate english"], Some(10), SalaryExpectation::NotSpecified);
        let base = SearchCriteria::new("Dev").unwrap().with_experience_years(Some(20));

        assert_eq!(score(&r, &base.clone().with_requires_english(Some(true))), ENGLISH_POINTS);
        assert_eq!(score(&r, &base.clone().with_requires_english(Some(false))), 0);
        assert_eq!(score(&r, &base), 0);
    }

    #[test]
    fn test_salary_text_needs_exact_match() {
        let criteria = SearchCriteria::new("Dev")
            .unwrap()
            .with_salary(Some(30_000))
            .with_experience_years(Some(99));
        let exact = record("Dev", &[], None, SalaryExpectation::Text("30000".to_string()));
        let currency = record("Dev", &[], None, SalaryExpectation::Text("30000 грн".to_string()));
        assert_eq!(score(&exact, &criteria), SALARY_POINTS);
        assert_eq!(score(&currency, &criteria), 0);
    }

    #[test]
    fn test_ties_break_on_lowercase_position() {
        let criteria = SearchCriteria::new("Dev").unwrap();
        let records = vec![
            record("backend", &[], None, SalaryExpectation::NotSpecified),
            record("Analyst", &[], None, SalaryExpectation::NotSpecified),
            record("Zoologist", &[], None, SalaryExpectation::NotSpecified),
            record("android", &[], None, SalaryExpectation::NotSpecified),
        ];

        let positions: Vec<String> = rank(records, &criteria)
            .into_iter()
            .map(|r| r.position)
            .collect();
        assert_eq!(positions, vec!["Analyst", "android", "backend", "Zoologist"]);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let criteria = SearchCriteria::new("Dev").unwrap();
        let mut first = record("Same", &[], None, SalaryExpectation::NotSpecified);
        first.link = "first".to_string();
        let mut second = record("same", &[], None, SalaryExpectation::NotSpecified);
        second.link = "second".to_string();

        let links: Vec<String> = rank(vec![first, second], &criteria)
            .into_iter()
            .map(|r| r.link)
            .collect();
        assert_eq!(links, vec!["first", "second"]);
    }

    fn mixed_records() -> Vec<ResumeRecord> {
        vec![
            record("Java Dev", &["Java"], Some(1), SalaryExpectation::Amount(20_000)),
            record("ML Engineer", &["python", "SQL", "english"], Some(6), SalaryExpectation::Amount(30_000)),
            record("Analyst", &["SQL"], Some(3), SalaryExpectation::NotSpecified),
            record("analyst", &["Excel"], None, SalaryExpectation::Text("30000".to_string())),
            record("Data Scientist", &["Python"], Some(2), SalaryExpectation::NotSpecified),
        ]
    }

    #[test]
    fn test_rank_is_idempotent() {
        let criteria = data_scientist_criteria();
        let once = rank(mixed_records(), &criteria);
        let twice = rank(once.clone(), &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_ranked_order_is_consistent() {
        let criteria = data_scientist_criteria();
        let ranked = rank_scored(mixed_records(), &criteria);
        for pair in ranked.windows(2) {
            assert_ne!(compare(&pair[0], &pair[1]), Ordering::Greater);
        }
        assert_eq!(ranked[0].record.position, "ML Engineer");
    }

    #[test]
    fn test_truncation_is_prefix_stable() {
        let criteria = data_scientist_criteria();
        let ranked = rank(mixed_records(), &criteria);
        for m in 0..=ranked.len() {
            for n in 0..=m {
                assert_eq!(truncate(&ranked, n), truncate(truncate(&ranked, m), n));
            }
        }
        assert_eq!(truncate(&ranked, 100).len(), ranked.len());
    }
}
