use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use crate::services::profiler::AnalysisResult;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeQuery {
    pub delimiter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeUrlRequest {
    pub url: String,
    pub delimiter: Option<String>,
}

/// Envelope returned to the dashboard. Only `analysis` is deterministic.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub source: String,
    pub generated_at: String,
    pub analysis: AnalysisResult,
}

impl AnalysisResponse {
    pub fn new(source: impl Into<String>, analysis: AnalysisResult) -> Self {
        Self {
            source: source.into(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            analysis,
        }
    }
}
