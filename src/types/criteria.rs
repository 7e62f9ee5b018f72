// src/types/criteria.rs
//! User-supplied search criteria and the free-text parsers that feed it.

use serde::Serialize;

use crate::error::ConfigurationError;

pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// One search invocation's criteria. Built once, read-only afterwards.
///
/// Every optional field distinguishes "unset" (`None`) from a legitimate
/// zero value; `experience_years == Some(0)` means "no experience".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    job_position: String,
    pub location: Option<String>,
    pub salary: Option<u32>,
    pub experience_years: Option<u32>,
    pub requires_english: Option<bool>,
    pub keywords: Vec<String>,
    pub result_limit: Option<usize>,
}

impl SearchCriteria {
    pub fn new(job_position: &str) -> Result<Self, ConfigurationError> {
        let job_position = job_position.trim();
        if job_position.is_empty() {
            return Err(ConfigurationError::MissingJobPosition);
        }

        Ok(Self {
            job_position: job_position.to_string(),
            location: None,
            salary: None,
            experience_years: None,
            requires_english: None,
            keywords: Vec::new(),
            result_limit: None,
        })
    }

    pub fn job_position(&self) -> &str {
        &self.job_position
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        self
    }

    pub fn with_salary(mut self, salary: Option<u32>) -> Self {
        self.salary = salary;
        self
    }

    pub fn with_experience_years(mut self, years: Option<u32>) -> Self {
        self.experience_years = years;
        self
    }

    pub fn with_requires_english(mut self, required: Option<bool>) -> Self {
        self.requires_english = required;
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_result_limit(mut self, limit: Option<usize>) -> Result<Self, ConfigurationError> {
        if limit == Some(0) {
            return Err(ConfigurationError::InvalidLimit);
        }
        self.result_limit = limit;
        Ok(self)
    }

    pub fn effective_limit(&self) -> usize {
        self.result_limit.unwrap_or(DEFAULT_RESULT_LIMIT)
    }
}

/// Blank input and a lone `-` both mean "no preference".
pub fn is_unset(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.is_empty() || trimmed == "-"
}

pub fn parse_optional_text(input: &str) -> Option<String> {
    if is_unset(input) {
        None
    } else {
        Some(input.trim().to_string())
    }
}

fn parse_number(field: &'static str, input: &str) -> Result<Option<u32>, ConfigurationError> {
    if is_unset(input) {
        return Ok(None);
    }

    // Salary inputs commonly carry thousands separators ("20 000", "20,000")
    let digits: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '_')
        .collect();

    digits
        .parse::<u32>()
        .map(Some)
        .map_err(|_| ConfigurationError::InvalidNumber {
            field,
            value: input.trim().to_string(),
        })
}

pub fn parse_salary(input: &str) -> Result<Option<u32>, ConfigurationError> {
    parse_number("salary", input)
}

pub fn parse_experience(input: &str) -> Result<Option<u32>, ConfigurationError> {
    parse_number("years of experience", input)
}

pub fn parse_result_limit(input: &str) -> Result<Option<usize>, ConfigurationError> {
    match parse_number("result count", input)? {
        None => Ok(None),
        Some(0) => Err(ConfigurationError::InvalidLimit),
        Some(n) => Ok(Some(n as usize)),
    }
}

/// Tri-state yes/no answer. Anything unrecognised is treated as unset.
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "так" | "да" => Some(true),
        "no" | "n" | "false" | "ні" | "нет" => Some(false),
        _ => None,
    }
}

/// Split a comma- or whitespace-delimited keyword list, keeping input order.
pub fn split_keywords(input: &str) -> Vec<String> {
    if is_unset(input) {
        return Vec::new();
    }

    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
