// src/query/robota_ua.rs
//! robota.ua CV database filter document.

use serde::{Deserialize, Serialize};

use crate::types::SearchCriteria;
use crate::utils::normalize_location;

/// City name (lowercase) to the API's city id. `0` means nationwide.
pub const CITY_IDS: [(&str, u32); 7] = [
    ("kyiv", 1),
    ("dnipro", 4),
    ("kharkiv", 21),
    ("zaporizhia", 9),
    ("odesa", 3),
    ("lviv", 2),
    ("ukraine", 0),
];

pub const NATIONWIDE_CITY_ID: u32 = 0;

pub const SALARY_FLOOR: u32 = 10_000;
pub const SALARY_HALF_BAND: u32 = 5_000;

pub fn resolve_city_id(location: &str) -> Option<u32> {
    let needle = normalize_location(location);
    CITY_IDS
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, id)| *id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub from: u32,
    pub to: u32,
}

impl SalaryRange {
    /// Band of `±SALARY_HALF_BAND` around the target. Low targets are raised
    /// to the floor and the band is kept at least two half-bands wide.
    pub fn around(target: u32) -> Self {
        let from = target.saturating_sub(SALARY_HALF_BAND).max(SALARY_FLOOR);
        let to = target
            .saturating_add(SALARY_HALF_BAND)
            .max(from.saturating_add(2 * SALARY_HALF_BAND));
        Self { from, to }
    }
}

/// Five ascending experience tiers.
pub fn experience_tier(years: u32) -> &'static str {
    match years {
        0 => "1",
        1 => "2",
        2..=4 => "3",
        5..=9 => "4",
        _ => "5",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotaUaQuery {
    pub page: u32,
    pub period: String,
    pub sort: String,
    pub search_type: String,
    pub ukrainian: bool,
    pub only_disliked: bool,
    pub only_favorite: bool,
    pub only_with_current_notebook_notes: bool,
    pub show_cv_without_salary: bool,
    pub sex: String,
    pub city_id: u32,
    pub inside: bool,
    pub only_new: bool,
    pub moveability: bool,
    pub only_moveability: bool,
    pub rubrics: Vec<String>,
    pub languages: Vec<String>,
    pub schedule_ids: Vec<String>,
    pub education_ids: Vec<String>,
    pub branch_ids: Vec<String>,
    pub experience_ids: Vec<String>,
    pub key_words: String,
    pub has_photo: bool,
    pub only_viewed: bool,
    pub only_with_opened_contacts: bool,
    pub resume_filling_type_ids: Vec<String>,
    pub district_ids: Vec<String>,
    pub only_students: bool,
    pub search_context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<SalaryRange>,
}

impl Default for RobotaUaQuery {
    fn default() -> Self {
        Self {
            page: 1,
            period: "ThreeMonths".to_string(),
            sort: "UpdateDate".to_string(),
            search_type: "default".to_string(),
            ukrainian: false,
            only_disliked: false,
            only_favorite: false,
            only_with_current_notebook_notes: false,
            show_cv_without_salary: true,
            sex: "Any".to_string(),
            city_id: NATIONWIDE_CITY_ID,
            inside: false,
            only_new: false,
            moveability: true,
            only_moveability: false,
            rubrics: Vec::new(),
            languages: Vec::new(),
            schedule_ids: Vec::new(),
            education_ids: Vec::new(),
            branch_ids: Vec::new(),
            experience_ids: Vec::new(),
            key_words: String::new(),
            has_photo: false,
            only_viewed: false,
            only_with_opened_contacts: false,
            resume_filling_type_ids: Vec::new(),
            district_ids: Vec::new(),
            only_students: false,
            search_context: "Main".to_string(),
            salary: None,
        }
    }
}

impl RobotaUaQuery {
    pub fn build(criteria: &SearchCriteria, page: u32) -> Self {
        let mut key_words = criteria.job_position().to_string();
        if !criteria.keywords.is_empty() {
            key_words.push(' ');
            key_words.push_str(&criteria.keywords.join(" "));
        }

        let city_id = criteria
            .location
            .as_deref()
            .and_then(resolve_city_id)
            .unwrap_or(NATIONWIDE_CITY_ID);

        let experience_ids = criteria
            .experience_years
            .map(|years| vec![experience_tier(years).to_string()])
            .unwrap_or_default();

        let languages = if criteria.requires_english == Some(true) {
            vec!["1".to_string()]
        } else {
            Vec::new()
        };

        Self {
            page,
            city_id,
            key_words,
            experience_ids,
            languages,
            salary: criteria.salary.map(SalaryRange::around),
            ..Self::default()
        }
    }
}
