// src/normalize/mod.rs
//! Maps raw per-site listings into the canonical [`ResumeRecord`].
//!
//! Extraction is defensive: any missing node or key degrades to the field's
//! default. A listing is only dropped when it has no identity link.

pub mod robota_ua;
pub mod work_ua;

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

use crate::types::{ExperienceEntry, ResumeRecord, Site};

/// One listing as the site handed it over, before normalization.
#[derive(Debug, Clone, Copy)]
pub enum RawListing<'a> {
    /// A work.ua résumé detail page.
    HtmlPage { link: &'a str, html: &'a str },
    /// One element of robota.ua's `documents` array.
    JsonDocument {
        document: &'a Value,
        candidate_base_url: &'a str,
    },
}

/// `None` means the listing is unusable and should be silently dropped.
pub fn normalize(raw: RawListing<'_>, site: Site) -> Option<ResumeRecord> {
    match (site, raw) {
        (Site::WorkUa, RawListing::HtmlPage { link, html }) => {
            work_ua::normalize_detail_page(html, link)
        }
        (
            Site::RobotaUa,
            RawListing::JsonDocument {
                document,
                candidate_base_url,
            },
        ) => robota_ua::normalize_document(document, candidate_base_url),
        (site, _) => {
            debug!("Listing shape does not belong to {}, dropping", site);
            None
        }
    }
}

/// Remove parentheses from a duration such as "(2 роки 3 місяці)".
pub fn strip_parentheses(duration: &str) -> String {
    if duration.contains('(') && duration.contains(')') {
        duration.replace(['(', ')'], "").trim().to_string()
    } else {
        duration.to_string()
    }
}

/// Organization name from a "name and duration" blob: the last non-blank
/// line, with inner whitespace collapsed.
pub fn organization_from_blob(blob: &str) -> String {
    let name = blob
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .unwrap_or_default();
    collapse_whitespace(name)
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn years_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*(?:years?|yrs?|рік|роки|років|год|года|лет)")
            .expect("valid years pattern")
    })
}

fn months_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*(?:months?|місяц\w*|міс|месяц\w*|мес)")
            .expect("valid months pattern")
    })
}

/// Sum of the numbers `re` captures in `text`. `Some(None)` when nothing
/// matched, `None` when the sum does not fit.
fn captured_total(re: &Regex, text: &str) -> Option<Option<u32>> {
    let values: Vec<u32> = re
        .captures_iter(text)
        .filter_map(|cap| cap.get(1)?.as_str().parse().ok())
        .collect();

    if values.is_empty() {
        return Some(None);
    }
    values.into_iter().try_fold(0u32, u32::checked_add).map(Some)
}

/// Months described by a duration like "2 роки 3 місяці" or "1 year".
/// Durations too large to represent count as unreadable.
pub fn duration_months(duration: &str) -> Option<u32> {
    let years = captured_total(years_regex(), duration)?;
    let months = captured_total(months_regex(), duration)?;
    if years.is_none() && months.is_none() {
        return None;
    }

    years
        .unwrap_or(0)
        .checked_mul(12)?
        .checked_add(months.unwrap_or(0))
}

/// Whole years across all entries whose duration could be read. `None` when
/// nothing was readable or the total overflows.
pub fn total_experience_years(entries: &[ExperienceEntry]) -> Option<u32> {
    let months: Vec<u32> = entries
        .iter()
        .filter_map(|entry| duration_months(&entry.duration))
        .collect();

    if months.is_empty() {
        return None;
    }
    months
        .into_iter()
        .try_fold(0u32, u32::checked_add)
        .map(|total| total / 12)
}
