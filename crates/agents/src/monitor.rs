//! Monitor agent — flags missed task categories and drafts reminders.
//!
//! Missed categories come strictly from the engagement record's three
//! booleans, not from its per-task id lists. The two accountings usually
//! agree but are independently derived.

use serde::{Deserialize, Serialize};
use tracing::info;

use aftercare_core::engagement::EngagementRecord;
use aftercare_core::error::Result;
use aftercare_core::patient::Patient;
use aftercare_core::plan::TaskCategory;
use aftercare_planner::parse::parse_entries;
use aftercare_tools::reminders::{draft_reminders, Reminder};

use crate::context::AgentContext;

/// What the monitor hands the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringResult {
    pub patient_id: String,

    pub day: u32,

    pub medication_taken: bool,

    pub therapy_done: bool,

    pub diet_followed: bool,

    pub completed_count: usize,

    pub total_count: usize,

    /// Categories missed per the engagement booleans
    pub missed_categories: Vec<TaskCategory>,

    /// Plan-item names in the missed categories
    pub missed_items: Vec<String>,

    /// One drafted reminder per missed item
    #[serde(skip)]
    pub reminders: Vec<Reminder>,
}

/// Inspect one day's engagement, draft reminders for missed categories,
/// and record the observation in session memory.
pub async fn process(
    ctx: &AgentContext,
    patient: &Patient,
    day: u32,
    record: &EngagementRecord,
) -> Result<MonitoringResult> {
    let mut missed_categories = Vec::new();
    let mut missed_items = Vec::new();
    let mut reminders = Vec::new();

    if !record.medication_taken {
        let items: Vec<String> = parse_entries(&patient.discharge_plan.medications)
            .into_iter()
            .map(|item| item.name)
            .collect();
        reminders.extend(draft_reminders(&patient.name, TaskCategory::Medication, &items));
        missed_items.extend(items);
        missed_categories.push(TaskCategory::Medication);
    }

    if !record.therapy_done {
        let items: Vec<String> = parse_entries(&patient.discharge_plan.therapy)
            .into_iter()
            .map(|item| item.name)
            .collect();
        reminders.extend(draft_reminders(&patient.name, TaskCategory::Therapy, &items));
        missed_items.extend(items);
        missed_categories.push(TaskCategory::Therapy);
    }

    if !record.diet_followed {
        let items = patient.discharge_plan.diet.clone();
        reminders.extend(draft_reminders(&patient.name, TaskCategory::Diet, &items));
        missed_items.extend(items);
        missed_categories.push(TaskCategory::Diet);
    }

    ctx.sessions
        .set_context(&patient.id, "day", serde_json::json!(day))
        .await;
    ctx.sessions
        .set_context(&patient.id, "missed_tasks", serde_json::json!(missed_items))
        .await;

    let mut metadata = serde_json::Map::new();
    metadata.insert("day".into(), serde_json::json!(day));
    metadata.insert(
        "completion_rate".into(),
        serde_json::json!(record.completion_rate),
    );
    ctx.sessions
        .add_turn(
            &patient.id,
            "monitor",
            format!(
                "Day {day}: {}/{} tasks completed, missed categories: {}",
                record.completed_count(),
                record.total_count(),
                if missed_categories.is_empty() {
                    "none".to_string()
                } else {
                    missed_categories
                        .iter()
                        .map(|c| c.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                }
            ),
            metadata,
        )
        .await;

    info!(
        patient = %patient.id,
        day,
        missed = missed_categories.len(),
        reminders = reminders.len(),
        "Monitoring complete"
    );

    Ok(MonitoringResult {
        patient_id: patient.id.clone(),
        day,
        medication_taken: record.medication_taken,
        therapy_done: record.therapy_done,
        diet_followed: record.diet_followed,
        completed_count: record.completed_count(),
        total_count: record.total_count(),
        missed_categories,
        missed_items,
        reminders,
    })
}
