// src/utils.rs
use std::path::{Path, PathBuf};

use crate::export::ExportFormat;

/// Cut `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push('…');
    cut
}

/// Output path with the extension matching the export format, unless the
/// user already chose one.
pub fn output_file_path(path: &Path, format: ExportFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    }
}

/// Normalize a free-text location for display and lookup.
pub fn normalize_location(location: &str) -> String {
    location
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
