//! Narrative-generation trait — the abstraction over the external
//! text-generation service that writes the human-readable rationale.
//!
//! This collaborator has **no template fallback**: the rationale is the
//! primary human-facing artifact of an analysis, so an unavailable service or
//! an empty response is a fatal error for that patient-day. Requests are not
//! retried and responses are not cached.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::assessment::Grade;
use crate::error::NarrativeError;
use crate::patient::RiskLevel;

/// The context the analyzer hands to the narrative service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeRequest {
    pub patient_id: String,
    pub patient_name: String,
    pub day: u32,
    pub score: f64,
    pub grade: Grade,
    pub missed_tasks: Vec<String>,
    pub risk: RiskLevel,
    pub risk_factors: Vec<String>,
}

impl NarrativeRequest {
    /// Render the request as the prompt sent to the generation service.
    pub fn prompt(&self) -> String {
        let missed = if self.missed_tasks.is_empty() {
            "none".to_string()
        } else {
            self.missed_tasks.join(", ")
        };
        let factors = if self.risk_factors.is_empty() {
            "none".to_string()
        } else {
            self.risk_factors.join("; ")
        };
        format!(
            "Write a brief clinical rationale for a post-discharge check-in.\n\
             Patient: {} ({})\n\
             Day since discharge: {}\n\
             Adherence score: {:.1} (grade {})\n\
             Missed tasks: {}\n\
             Risk class: {} (factors: {})",
            self.patient_name,
            self.patient_id,
            self.day,
            self.score,
            self.grade,
            missed,
            self.risk,
            factors,
        )
    }
}

/// The narrative-generation collaborator. Implementations: HTTP client,
/// scripted provider for tests and offline runs.
#[async_trait]
pub trait NarrativeProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "http", "scripted").
    fn name(&self) -> &str;

    /// Generate a non-empty rationale for the request, or fail.
    async fn generate(
        &self,
        request: &NarrativeRequest,
    ) -> std::result::Result<String, NarrativeError>;
}
