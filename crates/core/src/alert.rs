//! Alert delivery trait — the abstraction over the care-team alert channel.
//!
//! The channel is assumed synchronous from the caller's perspective: `send`
//! returns only once the alert has been accepted and recorded.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AlertError;

/// Severity of an alert or log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        };
        write!(f, "{s}")
    }
}

/// Delivery status of an alert record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
    Triggered,
}

/// What the escalator asks the channel to deliver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRequest {
    pub patient_id: String,

    /// Alert type token (e.g., "ESCALATION")
    pub kind: String,

    pub severity: Severity,

    pub message: String,

    /// Structured context (score, risk, missed tasks)
    #[serde(default)]
    pub details: serde_json::Value,
}

/// The channel's record of a delivered alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Locally unique id assigned by the channel
    pub id: String,

    pub patient_id: String,

    pub kind: String,

    pub severity: Severity,

    pub message: String,

    #[serde(default)]
    pub details: serde_json::Value,

    pub status: AlertStatus,

    pub created_at: DateTime<Utc>,
}

/// The alert-delivery collaborator. Implementations: logging channel,
/// recording mock for tests.
#[async_trait]
pub trait AlertChannel: Send + Sync {
    /// A human-readable name for this channel (e.g., "log", "recording").
    fn name(&self) -> &str;

    /// Deliver an alert. Returns the recorded alert with its assigned id and
    /// `Triggered` status.
    async fn send(&self, request: AlertRequest) -> std::result::Result<Alert, AlertError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_low_to_high() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn severity_wire_format() {
        let json = serde_json::to_string(&Severity::High).unwrap();
        assert_eq!(json, "\"HIGH\"");
    }
}
