// src/types/response.rs
use serde::{Deserialize, Serialize};

// ===== robota.ua CV database API =====

/// Envelope of the résumé search endpoint. Documents are kept as raw JSON so
/// that schema drift degrades individual fields instead of the whole page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RobotaSearchResponse {
    #[serde(default)]
    pub documents: Vec<serde_json::Value>,
    #[serde(default)]
    pub total: Option<u64>,
}
