//! Patient store trait — the durable per-patient long-term memory.
//!
//! One record per patient: adherence history, alerts sent, interactions, and
//! risk assessments. `save` is a full overwrite, not a merge — callers must
//! load-mutate-save. The append helpers below do exactly that; there is no
//! built-in locking, so concurrent writers to the same patient id must be
//! externally serialized (the reference execution has none).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::RiskAssessment;
use crate::error::MemoryError;
use crate::patient::RiskLevel;

/// One day's persisted adherence outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdherenceEntry {
    pub day: u32,

    pub score: f64,

    /// Free-form breakdown (score components, missed tasks)
    #[serde(default)]
    pub details: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

/// One alert recorded against the patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEntry {
    pub kind: String,

    pub message: String,

    pub timestamp: DateTime<Utc>,
}

/// A free-form interaction note (e.g., "ESCALATION" records).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEntry {
    pub kind: String,

    pub note: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,

    pub timestamp: DateTime<Utc>,
}

/// One persisted risk assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskEntry {
    pub day: u32,

    pub level: RiskLevel,

    pub score: u8,

    pub factors: Vec<String>,

    pub timestamp: DateTime<Utc>,
}

impl RiskEntry {
    pub fn from_assessment(day: u32, assessment: &RiskAssessment) -> Self {
        Self {
            day,
            level: assessment.level,
            score: assessment.score,
            factors: assessment.factors.clone(),
            timestamp: Utc::now(),
        }
    }
}

/// The durable record for one patient. Entries are append-only within a run
/// and survive process restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,

    #[serde(default)]
    pub adherence_history: Vec<AdherenceEntry>,

    #[serde(default)]
    pub alerts_sent: Vec<AlertEntry>,

    #[serde(default)]
    pub interactions: Vec<InteractionEntry>,

    #[serde(default)]
    pub risk_assessments: Vec<RiskEntry>,
}

impl PatientRecord {
    /// The default empty skeleton materialized on first load.
    pub fn skeleton(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            adherence_history: Vec::new(),
            alerts_sent: Vec::new(),
            interactions: Vec::new(),
            risk_assessments: Vec::new(),
        }
    }

    /// The adherence scores in day order (the stratifier's history snapshot).
    pub fn score_history(&self) -> Vec<f64> {
        self.adherence_history.iter().map(|e| e.score).collect()
    }
}

/// The durable long-term memory collaborator.
///
/// Implementations: file-backed JSON (one document per patient), in-memory
/// for tests. A missing record is not an error: `load` returns the skeleton.
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// A human-readable name for this store (e.g., "file", "in_memory").
    fn name(&self) -> &str;

    /// Load the patient's record, or a fresh skeleton when none exists.
    async fn load(&self, patient_id: &str) -> std::result::Result<PatientRecord, MemoryError>;

    /// Durably overwrite the patient's record.
    async fn save(&self, record: PatientRecord) -> std::result::Result<(), MemoryError>;

    /// Load-append-save one adherence entry.
    async fn add_adherence_record(
        &self,
        patient_id: &str,
        entry: AdherenceEntry,
    ) -> std::result::Result<(), MemoryError> {
        let mut record = self.load(patient_id).await?;
        record.adherence_history.push(entry);
        self.save(record).await
    }

    /// Load-append-save one alert entry.
    async fn add_alert(
        &self,
        patient_id: &str,
        entry: AlertEntry,
    ) -> std::result::Result<(), MemoryError> {
        let mut record = self.load(patient_id).await?;
        record.alerts_sent.push(entry);
        self.save(record).await
    }

    /// Load-append-save one interaction entry.
    async fn add_interaction(
        &self,
        patient_id: &str,
        entry: InteractionEntry,
    ) -> std::result::Result<(), MemoryError> {
        let mut record = self.load(patient_id).await?;
        record.interactions.push(entry);
        self.save(record).await
    }

    /// Load-append-save one risk entry.
    async fn add_risk(
        &self,
        patient_id: &str,
        entry: RiskEntry,
    ) -> std::result::Result<(), MemoryError> {
        let mut record = self.load(patient_id).await?;
        record.risk_assessments.push(entry);
        self.save(record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skeleton_is_empty() {
        let record = PatientRecord::skeleton("P001");
        assert_eq!(record.patient_id, "P001");
        assert!(record.adherence_history.is_empty());
        assert!(record.alerts_sent.is_empty());
        assert!(record.interactions.is_empty());
        assert!(record.risk_assessments.is_empty());
    }

    #[test]
    fn score_history_preserves_order() {
        let mut record = PatientRecord::skeleton("P001");
        for (day, score) in [(1, 80.0), (2, 65.0), (3, 72.0)] {
            record.adherence_history.push(AdherenceEntry {
                day,
                score,
                details: serde_json::Value::Null,
                timestamp: Utc::now(),
            });
        }
        assert_eq!(record.score_history(), vec![80.0, 65.0, 72.0]);
    }

    #[test]
    fn record_roundtrips_through_json() {
        let mut record = PatientRecord::skeleton("P009");
        record.alerts_sent.push(AlertEntry {
            kind: "ESCALATION".into(),
            message: "score below threshold".into(),
            timestamp: Utc::now(),
        });
        let json = serde_json::to_string(&record).unwrap();
        let back: PatientRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.patient_id, "P009");
        assert_eq!(back.alerts_sent.len(), 1);
    }
}
