// src/query/work_ua.rs
//! work.ua search URL construction and the site's banding tables.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::types::SearchCriteria;

/// Ascending `(upper bound inclusive, band code)` pairs for the salary filter.
pub const SALARY_BANDS: [(u32, u8); 7] = [
    (10_000, 2),
    (15_000, 3),
    (20_000, 4),
    (30_000, 5),
    (40_000, 6),
    (50_000, 7),
    (100_000, 8),
];

pub const SALARY_CODE_MIN: u8 = 2;
pub const SALARY_CODE_MAX: u8 = 8;

/// Width, in codes, between `salaryfrom` and `salaryto`.
const SALARY_FROM_OFFSET: u8 = 2;

pub const EXPERIENCE_NONE: u16 = 1;
pub const EXPERIENCE_JUNIOR_MID: u16 = 164;
pub const EXPERIENCE_SENIOR: u16 = 165;
/// Years that fall between the explicit bands (exactly 4).
pub const EXPERIENCE_RESIDUAL: u16 = 166;

/// Characters escaped inside a path segment. Non-ASCII is always escaped;
/// `+` is kept because the site uses it as the word separator.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'/')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Salary band code, saturating at the top band.
pub fn salary_band_code(salary: u32) -> u8 {
    SALARY_BANDS
        .iter()
        .find(|(threshold, _)| salary <= *threshold)
        .map(|(_, code)| *code)
        .unwrap_or(SALARY_CODE_MAX)
}

/// Lower salary bound paired with an upper code, clamped at the table minimum.
pub fn salary_from_code(salary_to_code: u8) -> u8 {
    salary_to_code
        .saturating_sub(SALARY_FROM_OFFSET)
        .max(SALARY_CODE_MIN)
}

pub fn experience_band_code(years: u32) -> u16 {
    match years {
        0 => EXPERIENCE_NONE,
        1..=3 => EXPERIENCE_JUNIOR_MID,
        4 => EXPERIENCE_RESIDUAL,
        _ => EXPERIENCE_SENIOR,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkUaQuery {
    /// Joined with `-` to form the listing path, e.g. `resumes-kyiv-python`.
    pub path_segments: Vec<String>,
    pub params: Vec<(String, String)>,
    pub page: u32,
}

impl WorkUaQuery {
    pub fn build(criteria: &SearchCriteria, page: u32) -> Self {
        let mut path_segments = vec!["resumes".to_string()];
        let mut params = Vec::new();

        if let Some(location) = &criteria.location {
            path_segments.push(encode_phrase(location));
        }

        let mut title = encode_phrase(criteria.job_position());
        if !criteria.keywords.is_empty() {
            params.push(("notitle".to_string(), "1".to_string()));
            title.push('+');
            title.push_str(&encode_phrase(&criteria.keywords.join(" ")));
        }
        path_segments.push(title);

        if let Some(salary) = criteria.salary {
            let code = salary_band_code(salary);
            params.push(("salaryto".to_string(), code.to_string()));
            params.push(("salaryfrom".to_string(), salary_from_code(code).to_string()));
        }

        if let Some(years) = criteria.experience_years {
            params.push((
                "experience".to_string(),
                experience_band_code(years).to_string(),
            ));
        }

        if criteria.requires_english == Some(true) {
            params.push(("language".to_string(), "1".to_string()));
        }

        if page > 1 {
            params.push(("page".to_string(), page.to_string()));
        }

        Self {
            path_segments,
            params,
            page,
        }
    }

    /// Absolute search URL against `base_url` (e.g. `https://www.work.ua`).
    pub fn to_url(&self, base_url: &str) -> String {
        let mut url = format!(
            "{}/{}/",
            base_url.trim_end_matches('/'),
            self.path_segments.join("-")
        );

        if !self.params.is_empty() {
            let query = self
                .params
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }

        url
    }
}

/// Lowercase, `+`-join words and percent-encode what the path cannot carry.
fn encode_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|word| utf8_percent_encode(&word.to_lowercase(), SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("+")
}
