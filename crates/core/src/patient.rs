//! Patient and discharge-plan domain types.
//!
//! A `Patient` is loaded once per run and is immutable for its duration.
//! The discharge plan carries the free-text prescriptions ("Name - frequency")
//! that the planner and monitor agents parse into structured items.

use serde::{Deserialize, Serialize};

/// Categorical risk level — used both for a patient's baseline risk at
/// discharge and for the stratifier's computed risk class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Numeric weight used by the risk stratifier (LOW=1, MEDIUM=2, HIGH=3).
    pub fn weight(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        };
        write!(f, "{s}")
    }
}

/// The prescribed medications, therapy, diet, and follow-up a patient should
/// follow after discharge. Medication and therapy entries are free text in
/// the form "Name - frequency" (e.g., "Metformin - twice daily").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DischargePlan {
    #[serde(default)]
    pub medications: Vec<String>,

    #[serde(default)]
    pub therapy: Vec<String>,

    #[serde(default)]
    pub diet: Vec<String>,

    /// Follow-up appointment date, "YYYY-MM-DD". Unparseable values are
    /// tolerated: the planner silently skips the appointment task.
    #[serde(default)]
    pub follow_up_date: String,
}

/// A monitored patient. Immutable during a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    /// Stable identifier (e.g., "P001")
    pub id: String,

    pub name: String,

    pub age: u32,

    /// Primary condition at discharge (e.g., "Congestive heart failure")
    pub condition: String,

    /// Baseline risk assigned at discharge
    pub baseline_risk: RiskLevel,

    pub discharge_plan: DischargePlan,
}
