//! Simulation orchestrator.
//!
//! Runs the daily pipeline (planner → engagement simulator → monitor →
//! analyzer → escalator) for each patient over a run of days. Patients are
//! independent of each other, but within one patient days are strictly
//! sequential: day N's risk stratification reads history written by day
//! N−1's analysis. A stage failure aborts that patient's remaining days
//! and the run continues with the next patient.

pub mod insights;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use aftercare_agents::{analyzer, escalator, monitor, AgentContext};
use aftercare_core::assessment::Grade;
use aftercare_core::error::{Error, Result};
use aftercare_core::event::DomainEvent;
use aftercare_core::patient::{Patient, RiskLevel};
use aftercare_core::plan::TaskCategory;
use aftercare_planner::{create_plan, simulate, EngagementSampler};
use aftercare_tools::impact::{self, PatientImpact, PopulationImpact};

pub use insights::{engagement_insights, EngagementInsights, Trend};

/// One completed patient-day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyOutcome {
    pub day: u32,

    pub score: f64,

    pub grade: Grade,

    pub risk: RiskLevel,

    pub completion_rate: f64,

    pub missed_categories: Vec<TaskCategory>,

    pub escalated: bool,

    /// The escalation/action log entry written for this day
    pub entry_id: String,

    /// Guideline advice for categories missed today
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub guidance: BTreeMap<TaskCategory, String>,
}

/// One patient's full run: completed days plus the failure that cut it
/// short, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRun {
    pub patient_id: String,

    pub patient_name: String,

    pub days: Vec<DailyOutcome>,

    /// Set when a stage failed; remaining days were skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub summary: PatientSummary,
}

/// Aggregates over one patient's completed days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSummary {
    pub days_completed: usize,

    pub average_score: f64,

    pub min_score: f64,

    pub max_score: f64,

    pub escalations: usize,

    /// The last completed day's risk class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_risk: Option<RiskLevel>,

    pub insights: EngagementInsights,

    /// Projected readmission-risk change for this patient
    pub impact: PatientImpact,
}

/// The whole run's result — the per-run export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationResult {
    pub started_at: DateTime<Utc>,

    pub finished_at: DateTime<Utc>,

    /// Days requested per patient (completed days may be fewer on failure)
    pub days: u32,

    pub patients: Vec<PatientRun>,

    pub summary: PopulationSummary,

    /// Projected clinical and financial effect of the run's adherence
    pub impact: PopulationImpact,
}

/// Aggregates over the whole roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationSummary {
    pub total_patients: usize,

    pub total_escalations: usize,

    /// Mean of the per-patient average scores (patients with at least one
    /// completed day)
    pub overall_average_score: f64,

    pub average_completion_rate: f64,

    /// Patients whose final risk class is HIGH
    pub high_risk_patients: Vec<String>,
}

/// Run the full simulation: every patient, sequentially day 1..=days.
pub async fn run_simulation(
    ctx: &AgentContext,
    patients: &[Patient],
    days: u32,
    sampler: &dyn EngagementSampler,
) -> Result<PopulationResult> {
    info!(patients = patients.len(), days, "Starting simulation run");
    let started_at = Utc::now();

    let mut runs = Vec::with_capacity(patients.len());
    for patient in patients {
        runs.push(run_patient(ctx, patient, days, sampler).await);
    }

    let summary = summarize_population(&runs);
    let impact = impact::population_impact(summary.total_patients, summary.overall_average_score);
    info!(
        escalations = summary.total_escalations,
        average_score = summary.overall_average_score,
        high_risk = summary.high_risk_patients.len(),
        "Simulation run complete"
    );

    Ok(PopulationResult {
        started_at,
        finished_at: Utc::now(),
        days,
        patients: runs,
        summary,
        impact,
    })
}

/// Run one patient through all days, stopping at the first stage failure.
async fn run_patient(
    ctx: &AgentContext,
    patient: &Patient,
    days: u32,
    sampler: &dyn EngagementSampler,
) -> PatientRun {
    let mut outcomes = Vec::new();
    let mut run_error = None;

    for day in 1..=days {
        match run_day(ctx, patient, day, sampler).await {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => {
                let stage = match &err {
                    Error::PatientDay { stage, .. } => *stage,
                    _ => "unknown",
                };
                error!(
                    patient = %patient.id,
                    day,
                    stage,
                    error = %err,
                    "Patient-day failed; skipping remaining days"
                );
                ctx.events.publish(DomainEvent::DayFailed {
                    patient_id: patient.id.clone(),
                    day,
                    stage: stage.to_string(),
                    timestamp: Utc::now(),
                });
                run_error = Some(err.to_string());
                break;
            }
        }
    }

    let summary = summarize_patient(&outcomes, patient.baseline_risk);
    PatientRun {
        patient_id: patient.id.clone(),
        patient_name: patient.name.clone(),
        days: outcomes,
        error: run_error,
        summary,
    }
}

/// One patient-day through the whole pipeline.
async fn run_day(
    ctx: &AgentContext,
    patient: &Patient,
    day: u32,
    sampler: &dyn EngagementSampler,
) -> Result<DailyOutcome> {
    let plan = create_plan(patient, day)
        .map_err(|e| Error::from(e).at_stage(&patient.id, day, "planner"))?;
    ctx.events.publish(DomainEvent::PlanCreated {
        patient_id: patient.id.clone(),
        day,
        task_count: plan.tasks.len(),
        timestamp: Utc::now(),
    });

    let engagement = simulate(&plan, patient.baseline_risk, sampler);
    ctx.events.publish(DomainEvent::EngagementSimulated {
        patient_id: patient.id.clone(),
        day,
        completion_rate: engagement.completion_rate,
        timestamp: Utc::now(),
    });

    let monitoring = monitor::process(ctx, patient, day, &engagement)
        .await
        .map_err(|e| e.at_stage(&patient.id, day, "monitor"))?;

    let analysis = analyzer::analyze(ctx, patient, &monitoring)
        .await
        .map_err(|e| e.at_stage(&patient.id, day, "analyzer"))?;

    let escalation = escalator::decide_and_act(ctx, patient, &analysis, &monitoring)
        .await
        .map_err(|e| e.at_stage(&patient.id, day, "escalator"))?;

    Ok(DailyOutcome {
        day,
        score: analysis.score.total,
        grade: analysis.score.grade,
        risk: analysis.risk.level,
        completion_rate: engagement.completion_rate,
        missed_categories: monitoring.missed_categories,
        escalated: escalation.escalated,
        entry_id: escalation.entry_id,
        guidance: analysis.guidance,
    })
}

fn summarize_patient(days: &[DailyOutcome], baseline_risk: RiskLevel) -> PatientSummary {
    let scores: Vec<f64> = days.iter().map(|d| d.score).collect();
    let (average_score, min_score, max_score) = if scores.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        (
            scores.iter().sum::<f64>() / scores.len() as f64,
            scores.iter().cloned().fold(f64::INFINITY, f64::min),
            scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        )
    };

    let final_risk = days.last().map(|d| d.risk);
    PatientSummary {
        days_completed: days.len(),
        average_score,
        min_score,
        max_score,
        escalations: days.iter().filter(|d| d.escalated).count(),
        final_risk,
        insights: engagement_insights(days),
        impact: impact::patient_impact(&scores, final_risk.unwrap_or(baseline_risk)),
    }
}

fn summarize_population(runs: &[PatientRun]) -> PopulationSummary {
    let with_days: Vec<&PatientRun> = runs
        .iter()
        .filter(|r| r.summary.days_completed > 0)
        .collect();

    let overall_average_score = if with_days.is_empty() {
        0.0
    } else {
        with_days
            .iter()
            .map(|r| r.summary.average_score)
            .sum::<f64>()
            / with_days.len() as f64
    };
    let average_completion_rate = if with_days.is_empty() {
        0.0
    } else {
        with_days
            .iter()
            .map(|r| r.summary.insights.average_completion)
            .sum::<f64>()
            / with_days.len() as f64
    };

    PopulationSummary {
        total_patients: runs.len(),
        total_escalations: runs.iter().map(|r| r.summary.escalations).sum(),
        overall_average_score,
        average_completion_rate,
        high_risk_patients: runs
            .iter()
            .filter(|r| r.summary.final_risk == Some(RiskLevel::High))
            .map(|r| r.patient_id.clone())
            .collect(),
    }
}
