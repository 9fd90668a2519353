//! Escalator agent — turns an analysis into action.
//!
//! The recommendation's action tokens are checked in fixed priority order
//! (escalate > personalized reminder > encouragement > gentle reminder)
//! and only the first matching branch executes. Escalations go out through
//! the alert channel and get a full log entry; lighter branches get an
//! action log entry only.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use aftercare_core::alert::{AlertRequest, Severity};
use aftercare_core::assessment::{ActionKind, Recommendation};
use aftercare_core::error::Result;
use aftercare_core::escalation::DecisionSnapshot;
use aftercare_core::event::DomainEvent;
use aftercare_core::patient::Patient;
use aftercare_core::store::{AlertEntry, InteractionEntry};
use aftercare_memory::escalation::NewEntry;
use aftercare_tools::recommender::recommend;
use aftercare_tools::reminders;

use crate::analyzer::AnalysisResult;
use crate::context::AgentContext;
use crate::monitor::MonitoringResult;

/// The escalator's output for one patient-day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationResult {
    pub patient_id: String,

    pub day: u32,

    /// True iff the care-team escalation branch fired
    pub escalated: bool,

    pub recommendation: Recommendation,

    /// Id of the escalation/action log entry written for this day
    pub entry_id: String,

    /// The message sent (alert body or reminder text)
    pub message: String,
}

/// Decide and execute the day's action for one patient.
pub async fn decide_and_act(
    ctx: &AgentContext,
    patient: &Patient,
    analysis: &AnalysisResult,
    monitoring: &MonitoringResult,
) -> Result<EscalationResult> {
    let alerts_sent = ctx.store.load(&patient.id).await?.alerts_sent.len();
    let recommendation = recommend(
        analysis.risk.level,
        analysis.score.total,
        analysis.day,
        alerts_sent,
    );

    let snapshot = DecisionSnapshot {
        score: analysis.score.total,
        grade: analysis.score.grade,
        risk: analysis.risk.level,
        missed_tasks: monitoring.missed_items.clone(),
    };

    let (escalated, entry, message) = if recommendation.includes(ActionKind::EscalateToCareTeam) {
        let mut message = reminders::escalation_message(
            &patient.name,
            analysis.score.total,
            &analysis.risk.level.to_string(),
        );
        // Condition-specific warning signs for whatever was missed today
        let red_flags: Vec<String> = monitoring
            .missed_categories
            .iter()
            .flat_map(|&category| ctx.guidelines.red_flags(&patient.condition, category))
            .collect();
        if !red_flags.is_empty() {
            message.push_str(&format!(" Watch for: {}.", red_flags.join("; ")));
        }

        let alert = ctx
            .alerts
            .send(AlertRequest {
                patient_id: patient.id.clone(),
                kind: "ESCALATION".to_string(),
                severity: Severity::High,
                message: message.clone(),
                details: serde_json::json!({
                    "day": analysis.day,
                    "score": analysis.score.total,
                    "risk": analysis.risk.level.to_string(),
                    "missed_tasks": monitoring.missed_items,
                    "watch_for": red_flags,
                }),
            })
            .await?;
        ctx.events.publish(DomainEvent::AlertDelivered {
            patient_id: patient.id.clone(),
            severity: alert.severity,
            timestamp: Utc::now(),
        });

        ctx.store
            .add_alert(
                &patient.id,
                AlertEntry {
                    kind: "ESCALATION".to_string(),
                    message: message.clone(),
                    timestamp: Utc::now(),
                },
            )
            .await?;
        ctx.store
            .add_interaction(
                &patient.id,
                InteractionEntry {
                    kind: "ESCALATION".to_string(),
                    note: recommendation.rationale.clone(),
                    day: Some(analysis.day),
                    timestamp: Utc::now(),
                },
            )
            .await?;

        let entry = ctx
            .escalations
            .log_escalation(NewEntry {
                patient_id: patient.id.clone(),
                patient_name: patient.name.clone(),
                day: analysis.day,
                severity: Severity::High,
                trigger_reason: recommendation.rationale.clone(),
                snapshot,
                recommendation: recommendation.clone(),
                actions_taken: vec![ActionKind::EscalateToCareTeam],
            })
            .await?;

        warn!(
            patient = %patient.id,
            day = analysis.day,
            score = analysis.score.total,
            entry = %entry.id,
            "Escalated to care team"
        );
        (true, entry, message)
    } else {
        let (action, severity, message) =
            if recommendation.includes(ActionKind::SendPersonalizedReminder) {
                (
                    ActionKind::SendPersonalizedReminder,
                    Severity::Medium,
                    reminders::personalized_reminder(
                        &patient.name,
                        analysis.score.total,
                        &monitoring.missed_items,
                    ),
                )
            } else if recommendation.includes(ActionKind::SendEncouragement) {
                (
                    ActionKind::SendEncouragement,
                    Severity::Low,
                    reminders::encouragement(&patient.name, analysis.score.total),
                )
            } else {
                (
                    ActionKind::SendGentleReminder,
                    Severity::Low,
                    reminders::gentle_reminder(&patient.name),
                )
            };

        let entry = ctx
            .escalations
            .log_action(NewEntry {
                patient_id: patient.id.clone(),
                patient_name: patient.name.clone(),
                day: analysis.day,
                severity,
                trigger_reason: recommendation.rationale.clone(),
                snapshot,
                recommendation: recommendation.clone(),
                actions_taken: vec![action],
            })
            .await?;

        info!(
            patient = %patient.id,
            day = analysis.day,
            action = %action,
            entry = %entry.id,
            "Action logged"
        );
        (false, entry, message)
    };

    ctx.events.publish(DomainEvent::EscalationLogged {
        entry_id: entry.id.clone(),
        patient_id: patient.id.clone(),
        day: analysis.day,
        timestamp: Utc::now(),
    });

    Ok(EscalationResult {
        patient_id: patient.id.clone(),
        day: analysis.day,
        escalated,
        recommendation,
        entry_id: entry.id,
        message,
    })
}
