//! Engagement record — what a patient actually did with one day's plan.

use serde::{Deserialize, Serialize};

/// The outcome of simulating (or, in a live deployment, observing) one
/// patient-day of engagement with the scheduled tasks.
///
/// The three category booleans are the canonical source the monitor agent
/// derives missed categories from. The per-task id ledgers are carried for
/// audit only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementRecord {
    pub patient_id: String,

    pub day: u32,

    /// AND over all medication tasks (vacuously true when there are none)
    pub medication_taken: bool,

    /// AND over all therapy tasks (vacuously true when there are none)
    pub therapy_done: bool,

    /// AND over all diet tasks (vacuously true when there are none)
    pub diet_followed: bool,

    /// Completed tasks / total tasks (1.0 for an empty plan)
    pub completion_rate: f64,

    pub completed_task_ids: Vec<String>,

    pub missed_task_ids: Vec<String>,

    /// The realized per-task base completion probability for this day,
    /// recorded for audit.
    pub daily_probability: f64,
}

impl EngagementRecord {
    pub fn completed_count(&self) -> usize {
        self.completed_task_ids.len()
    }

    pub fn total_count(&self) -> usize {
        self.completed_task_ids.len() + self.missed_task_ids.len()
    }
}
