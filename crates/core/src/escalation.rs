//! Escalation log domain types.
//!
//! Each entry snapshots the decision context (score, risk, missed tasks,
//! recommendation) at the moment the escalator acted, so the trail stays
//! meaningful even after the underlying records change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::alert::Severity;
use crate::assessment::{ActionKind, Grade, Recommendation};
use crate::patient::RiskLevel;

/// Whether an entry records a care-team escalation or a lighter action
/// (reminder, encouragement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    Escalation,
    Action,
}

/// Lifecycle of an escalation entry. New entries start `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EscalationOutcome {
    Pending,
    Acknowledged,
    Resolved,
    EscalatedFurther,
}

/// The decision context captured when the entry was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionSnapshot {
    pub score: f64,
    pub grade: Grade,
    pub risk: RiskLevel,
    pub missed_tasks: Vec<String>,
}

/// One append-only record in the escalation/action log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationEntry {
    /// Stable id: "ESC-00001" for escalations, "ACT-00001" for actions
    pub id: String,

    pub patient_id: String,

    pub patient_name: String,

    pub day: u32,

    pub kind: EntryKind,

    pub severity: Severity,

    /// Why the entry was written (rule-derived text)
    pub trigger_reason: String,

    pub snapshot: DecisionSnapshot,

    pub recommendation: Recommendation,

    /// The action tokens the escalator actually executed
    pub actions_taken: Vec<ActionKind>,

    pub outcome: EscalationOutcome,

    /// Optional note recorded when the outcome was last updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome_note: Option<String>,

    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Aggregated view over the whole log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSummary {
    pub total_entries: usize,

    pub escalations: usize,

    pub pending: usize,

    /// Entry counts keyed by severity token
    pub by_severity: BTreeMap<String, usize>,

    /// Executed-action counts keyed by action token
    pub by_action: BTreeMap<String, usize>,

    /// (escalations − pending escalations) / escalations; 0 when empty
    pub resolution_rate: f64,
}
