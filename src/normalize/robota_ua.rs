// src/normalize/robota_ua.rs
//! Field extraction from robota.ua API documents.

use serde_json::Value;

use super::{strip_parentheses, total_experience_years};
use crate::types::{ExperienceEntry, ResumeRecord, SalaryExpectation, Site, NOT_SPECIFIED};

fn text_field(document: &Value, key: &str) -> Option<String> {
    match document.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_or_default(document: &Value, key: &str) -> String {
    text_field(document, key).unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

fn salary_expectation(document: &Value) -> SalaryExpectation {
    match document.get("salary") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .map(SalaryExpectation::Amount)
            .unwrap_or_default(),
        Some(Value::String(s)) if !s.trim().is_empty() => SalaryExpectation::Text(s.trim().to_string()),
        _ => SalaryExpectation::NotSpecified,
    }
}

fn experience_entries(document: &Value) -> Vec<ExperienceEntry> {
    document
        .get("experience")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.is_object())
                .map(|item| ExperienceEntry {
                    title: text_or_default(item, "position"),
                    organization: text_or_default(item, "company"),
                    duration: strip_parentheses(&text_or_default(item, "datesDiff")),
                    note: NOT_SPECIFIED.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Normalize one element of the `documents` array.
///
/// The candidate page link is built from `resumeId`; documents without one
/// are dropped.
pub fn normalize_document(document: &Value, candidate_base_url: &str) -> Option<ResumeRecord> {
    let resume_id = text_field(document, "resumeId")?;
    let link = format!("{}/{}", candidate_base_url.trim_end_matches('/'), resume_id);

    let mut record = ResumeRecord::with_defaults(link, Site::RobotaUa);
    record.position = text_or_default(document, "speciality");
    record.location = text_or_default(document, "cityName");
    record.salary_expectation = salary_expectation(document);
    record.experience_entries = experience_entries(document);

    // The listing API exposes no skill tags; past positions stand in for them
    record.skills = record
        .experience_entries
        .iter()
        .map(|entry| format!("{} at {} ({})", entry.title, entry.organization, entry.duration))
        .collect();
    record.experience_years = total_experience_years(&record.experience_entries);

    if let Some(age) = text_field(document, "age") {
        record.additional_info = format!("Age: {}", age);
    }

    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "https://robota.ua/ru/candidates";

    #[test]
    fn test_normalize_document() {
        let document = json!({
            "resumeId": 18_234_567,
            "fullName": "Олена",
            "speciality": "3D дизайнер",
            "cityName": "Київ",
            "age": "27 років",
            "salary": 25000,
            "experience": [
                {"position": "3D artist", "company": "Studio", "datesDiff": "(3 роки 2 місяці)"},
                {"position": "Intern", "datesDiff": "8 місяців"}
            ]
        });

        let record = normalize_document(&document, BASE).unwrap();
        assert_eq!(record.link, "https://robota.ua/ru/candidates/18234567");
        assert_eq!(record.position, "3D дизайнер");
        assert_eq!(record.location, "Київ");
        assert_eq!(record.salary_expectation, SalaryExpectation::Amount(25000));
        assert_eq!(
            record.skills,
            vec![
                "3D artist at Studio (3 роки 2 місяці)".to_string(),
                format!("Intern at {} (8 місяців)", NOT_SPECIFIED),
            ]
        );
        assert_eq!(record.experience_entries[1].organization, NOT_SPECIFIED);
        assert_eq!(record.experience_years, Some(3));
        assert_eq!(record.additional_info, "Age: 27 років");
        assert_eq!(record.site, Site::RobotaUa);
    }

    #[test]
    fn test_missing_resume_id_is_dropped() {
        assert!(normalize_document(&json!({"speciality": "QA"}), BASE).is_none());
        assert!(normalize_document(&json!({"resumeId": null}), BASE).is_none());
        assert!(normalize_document(&json!("garbage"), BASE).is_none());
    }

    #[test]
    fn test_garbage_fields_default() {
        let document = json!({
            "resumeId": "42",
            "speciality": null,
            "cityName": ["not", "a", "string"],
            "salary": {"weird": true},
            "experience": "none"
        });

        let record = normalize_document(&document, BASE).unwrap();
        assert_eq!(
            record,
            ResumeRecord::with_defaults("https://robota.ua/ru/candidates/42", Site::RobotaUa)
        );
    }

    #[test]
    fn test_oversized_durations_leave_experience_unset() {
        let document = json!({
            "resumeId": 7,
            "experience": [
                {"position": "A", "datesDiff": "4000000000 months"},
                {"position": "B", "datesDiff": "(400000000 років)"}
            ]
        });

        let record = normalize_document(&document, BASE).unwrap();
        assert_eq!(record.experience_entries.len(), 2);
        assert_eq!(record.experience_entries[1].duration, "400000000 років");
        assert_eq!(record.experience_years, Some(333_333_333));

        let document = json!({
            "resumeId": 8,
            "experience": [
                {"datesDiff": "4000000000 months"},
                {"datesDiff": "4000000000 months"}
            ]
        });
        assert_eq!(normalize_document(&document, BASE).unwrap().experience_years, None);
    }
}
