//! Shared collaborator wiring for the agent pipeline.

use std::sync::Arc;

use aftercare_core::alert::AlertChannel;
use aftercare_core::event::EventBus;
use aftercare_core::narrative::NarrativeProvider;
use aftercare_core::store::PatientStore;
use aftercare_memory::escalation::EscalationLog;
use aftercare_memory::session::SessionRegistry;
use aftercare_tools::GuidelineStore;

/// Everything the agents need to do their work. Cheap to clone; all
/// collaborators are shared behind `Arc`.
#[derive(Clone)]
pub struct AgentContext {
    /// Durable per-patient long-term memory
    pub store: Arc<dyn PatientStore>,

    /// Transient per-patient session memory
    pub sessions: Arc<SessionRegistry>,

    /// Append-only escalation/action log
    pub escalations: Arc<EscalationLog>,

    /// External narrative-rationale service
    pub narrative: Arc<dyn NarrativeProvider>,

    /// Care-team alert channel
    pub alerts: Arc<dyn AlertChannel>,

    /// Condition-specific adherence guidelines
    pub guidelines: Arc<GuidelineStore>,

    /// Domain event bus
    pub events: Arc<EventBus>,
}
