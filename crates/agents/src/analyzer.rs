//! Analyzer agent — scores adherence, stratifies risk, obtains the
//! narrative rationale, and persists the day's results.
//!
//! The narrative call has no template fallback: if the service is
//! unavailable or returns an empty rationale, the whole patient-day
//! analysis fails. Risk stratification reads the score history as it
//! stood *before* today, so today's score never feeds its own assessment.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use aftercare_core::assessment::{AdherenceScore, RiskAssessment};
use aftercare_core::error::Result;
use aftercare_core::event::DomainEvent;
use aftercare_core::narrative::NarrativeRequest;
use aftercare_core::patient::Patient;
use aftercare_core::plan::TaskCategory;
use aftercare_core::store::{AdherenceEntry, RiskEntry};
use aftercare_tools::{scorer, stratifier};

use crate::context::AgentContext;
use crate::monitor::MonitoringResult;

/// The analyzer's output for one patient-day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub patient_id: String,

    pub day: u32,

    pub score: AdherenceScore,

    pub risk: RiskAssessment,

    /// Human-readable rationale from the narrative service
    pub rationale: String,

    /// Guideline advice for each category missed today
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub guidance: BTreeMap<TaskCategory, String>,
}

/// Run the full analysis for one patient-day.
pub async fn analyze(
    ctx: &AgentContext,
    patient: &Patient,
    monitoring: &MonitoringResult,
) -> Result<AnalysisResult> {
    let score = scorer::score(
        monitoring.completed_count,
        monitoring.total_count,
        monitoring.medication_taken,
        monitoring.therapy_done,
        monitoring.diet_followed,
    );

    // History snapshot before today's entry is written
    let record = ctx.store.load(&patient.id).await?;
    let history = record.score_history();
    let risk = stratifier::stratify(patient, &history);

    let request = NarrativeRequest {
        patient_id: patient.id.clone(),
        patient_name: patient.name.clone(),
        day: monitoring.day,
        score: score.total,
        grade: score.grade,
        missed_tasks: monitoring.missed_items.clone(),
        risk: risk.level,
        risk_factors: risk.factors.clone(),
    };
    let rationale = ctx.narrative.generate(&request).await?;

    let guidance: BTreeMap<TaskCategory, String> = monitoring
        .missed_categories
        .iter()
        .map(|&category| {
            (
                category,
                ctx.guidelines.recommendation(&patient.condition, category),
            )
        })
        .collect();

    ctx.store
        .add_adherence_record(
            &patient.id,
            AdherenceEntry {
                day: monitoring.day,
                score: score.total,
                details: serde_json::json!({
                    "task_component": score.task_component,
                    "medication_bonus": score.medication_bonus,
                    "therapy_bonus": score.therapy_bonus,
                    "diet_bonus": score.diet_bonus,
                    "grade": score.grade.to_string(),
                    "missed_tasks": monitoring.missed_items,
                }),
                timestamp: Utc::now(),
            },
        )
        .await?;
    ctx.store
        .add_risk(&patient.id, RiskEntry::from_assessment(monitoring.day, &risk))
        .await?;

    let mut metadata = serde_json::Map::new();
    metadata.insert("day".into(), serde_json::json!(monitoring.day));
    metadata.insert("score".into(), serde_json::json!(score.total));
    metadata.insert("risk".into(), serde_json::json!(risk.level.to_string()));
    ctx.sessions
        .add_turn(
            &patient.id,
            "analyzer",
            format!(
                "Day {}: score {:.1} (grade {}), risk {}",
                monitoring.day, score.total, score.grade, risk.level
            ),
            metadata,
        )
        .await;

    ctx.events.publish(DomainEvent::AnalysisCompleted {
        patient_id: patient.id.clone(),
        day: monitoring.day,
        score: score.total,
        risk: risk.level,
        timestamp: Utc::now(),
    });

    info!(
        patient = %patient.id,
        day = monitoring.day,
        score = score.total,
        grade = %score.grade,
        risk = %risk.level,
        "Analysis complete"
    );

    Ok(AnalysisResult {
        patient_id: patient.id.clone(),
        day: monitoring.day,
        score,
        risk,
        rationale,
        guidance,
    })
}
