//! Daily plan and task domain types.
//!
//! A `DailyPlan` is created fresh for each (patient, day) by the planner,
//! consumed by the engagement simulator, and discarded after the day's
//! analysis — only score and boolean summaries persist.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What kind of care activity a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Medication,
    Therapy,
    Diet,
    Vitals,
    Appointment,
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskCategory::Medication => "medication",
            TaskCategory::Therapy => "therapy",
            TaskCategory::Diet => "diet",
            TaskCategory::Vitals => "vitals",
            TaskCategory::Appointment => "appointment",
        };
        write!(f, "{s}")
    }
}

/// Task priority. High-priority tasks get a completion-probability boost in
/// the engagement simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

/// A single scheduled care task. Ids are unique within one day's plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique within a day (e.g., "D3-T01")
    pub id: String,

    pub category: TaskCategory,

    pub description: String,

    /// Scheduled time of day, "HH:MM" (24h). Plans are sorted by this field.
    pub time: String,

    pub priority: TaskPriority,

    /// Set by the engagement simulator, never by the planner.
    #[serde(default)]
    pub completed: bool,
}

/// The full time-ordered task schedule for one patient-day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPlan {
    pub patient_id: String,

    /// 1-based day index since discharge
    pub day: u32,

    /// Tasks sorted ascending by time-of-day
    pub tasks: Vec<Task>,

    /// Per-category task counts
    pub counts: BTreeMap<TaskCategory, usize>,
}

impl DailyPlan {
    /// Build a plan from an unordered task list: sorts by time-of-day and
    /// tallies per-category counts.
    pub fn new(patient_id: impl Into<String>, day: u32, mut tasks: Vec<Task>) -> Self {
        tasks.sort_by(|a, b| a.time.cmp(&b.time));
        let mut counts = BTreeMap::new();
        for task in &tasks {
            *counts.entry(task.category).or_insert(0) += 1;
        }
        Self {
            patient_id: patient_id.into(),
            day,
            tasks,
            counts,
        }
    }

    pub fn count(&self, category: TaskCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Tasks belonging to one category, in schedule order.
    pub fn tasks_in(&self, category: TaskCategory) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.category == category)
    }
}
