// src/export.rs
//! Terminal rendering and file export of ranked results.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::assembler::SearchReport;
use crate::core::FsOps;
use crate::types::{RankedResult, Site};
use crate::utils::output_file_path;

const RECORD_RULE_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Human-readable listing for the terminal, capped at the display limit.
pub fn display_text(report: &SearchReport) -> String {
    let mut out = String::new();

    if report.is_empty() {
        match &report.error {
            Some(e) => {
                let _ = writeln!(out, "An error occurred while fetching resumes: {}", e);
            }
            None => out.push_str("No resumes found based on the given criteria.\n"),
        }
        return out;
    }

    let _ = writeln!(
        out,
        "\nFound {} resumes, displaying up to {}:",
        report.total_found, report.display_limit
    );
    for (idx, ranked) in report.displayed().iter().enumerate() {
        let record = &ranked.record;
        let _ = writeln!(out, "\nResume {} (score {}):", idx + 1, ranked.relevance_score);
        let _ = writeln!(out, "Position: {}", record.position);
        let _ = writeln!(out, "Location: {}", record.location);
        let _ = writeln!(out, "Salary Expectation: {}", record.salary_expectation);
        let _ = writeln!(out, "Skills: {}", record.skills.join(", "));
        let _ = writeln!(out, "Additional info: {}", record.additional_info);
        let _ = writeln!(out, "Link: {}", record.link);
    }

    if let Some(e) = &report.error {
        let _ = writeln!(out, "\nResults may be incomplete: {}", e);
    }
    out
}

/// One block per record, each followed by a dashed rule.
pub fn render_text(results: &[RankedResult]) -> String {
    let rule = "-".repeat(RECORD_RULE_WIDTH);
    let mut out = String::new();
    for ranked in results {
        let record = &ranked.record;
        let _ = writeln!(out, "Position: {}", record.position);
        let _ = writeln!(out, "Location: {}", record.location);
        let _ = writeln!(out, "Salary Expectation: {}", record.salary_expectation);
        let _ = writeln!(out, "Link: {}", record.link);
        let _ = write!(out, "\n{}\n\n", rule);
    }
    out
}

#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    generated_at: DateTime<Utc>,
    site: Site,
    total_found: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    results: &'a [RankedResult],
}

pub fn render_json(report: &SearchReport) -> Result<String> {
    let document = JsonExport {
        generated_at: Utc::now(),
        site: report.site,
        total_found: report.total_found,
        error: report.error.as_ref().map(ToString::to_string),
        results: &report.results,
    };
    serde_json::to_string_pretty(&document).context("Failed to serialize results")
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    relevance_score: u32,
    position: &'a str,
    location: &'a str,
    salary_expectation: String,
    experience_years: Option<u32>,
    skills: String,
    additional_info: &'a str,
    site: Site,
    link: &'a str,
}

pub fn render_csv(results: &[RankedResult]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for ranked in results {
        let record = &ranked.record;
        writer
            .serialize(CsvRow {
                relevance_score: ranked.relevance_score,
                position: &record.position,
                location: &record.location,
                salary_expectation: record.salary_expectation.to_string(),
                experience_years: record.experience_years,
                skills: record.skills.join("; "),
                additional_info: &record.additional_info,
                site: record.site,
                link: &record.link,
            })
            .context("Failed to write CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

pub fn render(report: &SearchReport, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Text => Ok(render_text(&report.results)),
        ExportFormat::Json => render_json(report),
        ExportFormat::Csv => render_csv(&report.results),
    }
}

/// Write every ranked result to `path` and return where it landed. Overwrites.
pub async fn save(report: &SearchReport, path: &Path, format: ExportFormat) -> Result<PathBuf> {
    let path = output_file_path(path, format);
    let content = render(report, format)?;
    FsOps::write_file_safe(&path, &content).await?;
    info!("Saved {} résumés to {}", report.results.len(), path.display());
    Ok(path)
}
