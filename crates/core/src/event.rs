//! Domain event system — decoupled communication between pipeline stages.
//!
//! Events are published as each stage of a patient-day completes. Subscribers
//! (reporting, debugging) can react without coupling to the orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::alert::Severity;
use crate::patient::RiskLevel;

/// All domain events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainEvent {
    /// The planner produced a daily schedule
    PlanCreated {
        patient_id: String,
        day: u32,
        task_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// The engagement simulator produced a record
    EngagementSimulated {
        patient_id: String,
        day: u32,
        completion_rate: f64,
        timestamp: DateTime<Utc>,
    },

    /// The analyzer finished scoring and stratifying
    AnalysisCompleted {
        patient_id: String,
        day: u32,
        score: f64,
        risk: RiskLevel,
        timestamp: DateTime<Utc>,
    },

    /// An alert was delivered to the care channel
    AlertDelivered {
        patient_id: String,
        severity: Severity,
        timestamp: DateTime<Utc>,
    },

    /// An entry was written to the escalation log
    EscalationLogged {
        entry_id: String,
        patient_id: String,
        day: u32,
        timestamp: DateTime<Utc>,
    },

    /// A patient-day aborted at some stage
    DayFailed {
        patient_id: String,
        day: u32,
        stage: String,
        timestamp: DateTime<Utc>,
    },
}

/// A broadcast-based event bus for domain events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub. Publishing with
/// no subscribers is fine; events are simply dropped.
pub struct EventBus {
    sender: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // Ignore send errors (no subscribers = that's fine)
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
