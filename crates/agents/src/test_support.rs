//! Shared fixtures for agent tests.

use std::sync::Arc;

use aftercare_alerts::RecordingChannel;
use aftercare_core::engagement::EngagementRecord;
use aftercare_core::event::EventBus;
use aftercare_core::narrative::NarrativeProvider;
use aftercare_core::patient::{DischargePlan, Patient, RiskLevel};
use aftercare_memory::escalation::EscalationLog;
use aftercare_memory::in_memory::InMemoryStore;
use aftercare_memory::session::SessionRegistry;
use aftercare_narrative::ScriptedNarrative;
use aftercare_tools::GuidelineStore;

use crate::context::AgentContext;

pub(crate) fn patient(baseline: RiskLevel, age: u32) -> Patient {
    Patient {
        id: "P001".into(),
        name: "Rosa Delgado".into(),
        age,
        condition: "CHF".into(),
        baseline_risk: baseline,
        discharge_plan: DischargePlan {
            medications: vec!["Metformin - twice daily".into(), "Lisinopril".into()],
            therapy: vec!["Physio stretching - 3x week".into()],
            diet: vec!["Low sodium".into()],
            follow_up_date: "2026-09-01".into(),
        },
    }
}

/// A context wired entirely to in-memory collaborators. Returns the alert
/// channel separately so tests can inspect what was sent.
pub(crate) fn context_with(
    narrative: Arc<dyn NarrativeProvider>,
) -> (AgentContext, Arc<RecordingChannel>) {
    let alerts = Arc::new(RecordingChannel::new());
    let ctx = AgentContext {
        store: Arc::new(InMemoryStore::new()),
        sessions: Arc::new(SessionRegistry::new(20)),
        escalations: Arc::new(EscalationLog::in_memory()),
        narrative,
        alerts: alerts.clone(),
        guidelines: Arc::new(GuidelineStore::builtin()),
        events: Arc::new(EventBus::default()),
    };
    (ctx, alerts)
}

pub(crate) fn context() -> (AgentContext, Arc<RecordingChannel>) {
    context_with(Arc::new(ScriptedNarrative::constant(
        "Patient is recovering as expected.",
    )))
}

pub(crate) fn engagement(
    day: u32,
    medication_taken: bool,
    therapy_done: bool,
    diet_followed: bool,
    completed: &[&str],
    missed: &[&str],
) -> EngagementRecord {
    let total = completed.len() + missed.len();
    EngagementRecord {
        patient_id: "P001".into(),
        day,
        medication_taken,
        therapy_done,
        diet_followed,
        completion_rate: if total == 0 {
            1.0
        } else {
            completed.len() as f64 / total as f64
        },
        completed_task_ids: completed.iter().map(|s| s.to_string()).collect(),
        missed_task_ids: missed.iter().map(|s| s.to_string()).collect(),
        daily_probability: 0.75,
    }
}
