//! Alert delivery channels.
//!
//! The production channel logs alerts through `tracing` (downstream
//! delivery — pager, SMS, EHR inbox — is outside this system). The
//! recording channel captures alerts in memory for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use aftercare_core::alert::{Alert, AlertChannel, AlertRequest, AlertStatus};
use aftercare_core::error::AlertError;

/// Channel that records alerts in the structured log.
pub struct LogChannel;

#[async_trait]
impl AlertChannel for LogChannel {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, request: AlertRequest) -> std::result::Result<Alert, AlertError> {
        let alert = Alert {
            id: Uuid::new_v4().to_string(),
            patient_id: request.patient_id,
            kind: request.kind,
            severity: request.severity,
            message: request.message,
            details: request.details,
            status: AlertStatus::Triggered,
            created_at: Utc::now(),
        };
        warn!(
            alert_id = %alert.id,
            patient = %alert.patient_id,
            kind = %alert.kind,
            severity = %alert.severity,
            "{}",
            alert.message
        );
        Ok(alert)
    }
}

/// In-memory channel for tests: every sent alert is retained.
#[derive(Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<Alert>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far.
    pub fn sent(&self) -> Vec<Alert> {
        match self.sent.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl AlertChannel for RecordingChannel {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, request: AlertRequest) -> std::result::Result<Alert, AlertError> {
        let alert = Alert {
            id: format!("alert-{:04}", self.sent().len() + 1),
            patient_id: request.patient_id,
            kind: request.kind,
            severity: request.severity,
            message: request.message,
            details: request.details,
            status: AlertStatus::Triggered,
            created_at: Utc::now(),
        };
        let mut sent = match self.sent.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        sent.push(alert.clone());
        Ok(alert)
    }
}
