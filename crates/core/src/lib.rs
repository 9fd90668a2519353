//! # Aftercare Core
//!
//! Domain types, traits, and error definitions for the Aftercare post-discharge
//! monitoring simulator. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (narrative generation, alert delivery, durable
//! patient storage) is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Deterministic testing with scripted/mock implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod alert;
pub mod assessment;
pub mod engagement;
pub mod error;
pub mod escalation;
pub mod event;
pub mod patient;
pub mod plan;
pub mod narrative;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use alert::{Alert, AlertChannel, AlertRequest, AlertStatus, Severity};
pub use assessment::{ActionKind, AdherenceScore, Grade, Priority, Recommendation, RiskAssessment};
pub use engagement::EngagementRecord;
pub use error::{Error, Result};
pub use escalation::{
    DecisionSnapshot, EntryKind, EscalationEntry, EscalationOutcome, LogSummary,
};
pub use event::{DomainEvent, EventBus};
pub use narrative::{NarrativeProvider, NarrativeRequest};
pub use patient::{DischargePlan, Patient, RiskLevel};
pub use plan::{DailyPlan, Task, TaskCategory, TaskPriority};
pub use store::{
    AdherenceEntry, AlertEntry, InteractionEntry, PatientRecord, PatientStore, RiskEntry,
};
