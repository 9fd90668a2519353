//! Error types for the Aftercare domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Aftercare operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Planning errors ---
    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),

    // --- Memory errors ---
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    // --- Narrative collaborator errors ---
    #[error("Narrative error: {0}")]
    Narrative(#[from] NarrativeError),

    // --- Alert delivery errors ---
    #[error("Alert error: {0}")]
    Alert(#[from] AlertError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A pipeline stage failed for one patient-day. Carries enough context
    /// to diagnose which patient, day, and stage went wrong.
    #[error("Patient {patient_id} day {day} failed at stage '{stage}': {source}")]
    PatientDay {
        patient_id: String,
        day: u32,
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap an error with the patient-day context of the failing stage.
    pub fn at_stage(self, patient_id: &str, day: u32, stage: &'static str) -> Self {
        Error::PatientDay {
            patient_id: patient_id.to_string(),
            day,
            stage,
            source: Box::new(self),
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum PlanError {
    #[error("Invalid day index: {0} (days are 1-based)")]
    InvalidDay(u32),
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Malformed patient record for '{patient_id}': {reason}")]
    MalformedRecord { patient_id: String, reason: String },

    #[error("Escalation entry not found: {0}")]
    EntryNotFound(String),
}

#[derive(Debug, Clone, Error)]
pub enum NarrativeError {
    #[error("Narrative request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Narrative service unreachable: {0}")]
    Unreachable(String),

    #[error("Narrative service returned an empty rationale")]
    EmptyResponse,

    #[error("Narrative provider not configured: {0}")]
    NotConfigured(String),
}

#[derive(Debug, Clone, Error)]
pub enum AlertError {
    #[error("Alert delivery failed for patient {patient_id}: {reason}")]
    DeliveryFailed { patient_id: String, reason: String },

    #[error("Alert channel not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrative_error_displays_context() {
        let err = Error::Narrative(NarrativeError::Api {
            status_code: 503,
            message: "service unavailable".into(),
        });
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("service unavailable"));
    }

    #[test]
    fn patient_day_wraps_source() {
        let inner = Error::Narrative(NarrativeError::EmptyResponse);
        let err = inner.at_stage("P001", 3, "analyzer");
        let text = err.to_string();
        assert!(text.contains("P001"));
        assert!(text.contains("day 3"));
        assert!(text.contains("analyzer"));
    }

    #[test]
    fn memory_error_displays_patient() {
        let err = Error::Memory(MemoryError::MalformedRecord {
            patient_id: "P042".into(),
            reason: "unexpected field type".into(),
        });
        assert!(err.to_string().contains("P042"));
    }
}
