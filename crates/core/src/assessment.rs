//! Assessment value objects — adherence score, risk assessment, and the
//! recommendation produced by the decision tools.

use serde::{Deserialize, Serialize};

use crate::patient::RiskLevel;

/// Letter grade derived from the total adherence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Monotonic step function with boundaries at 60/70/80/90.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::A
        } else if score >= 80.0 {
            Grade::B
        } else if score >= 70.0 {
            Grade::C
        } else if score >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        write!(f, "{s}")
    }
}

/// Composite 0–100 adherence score with its component breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdherenceScore {
    /// Always within [0, 100]
    pub total: f64,

    /// Task-completion component, up to 60 points
    pub task_component: f64,

    /// +15 when all medication tasks were done
    pub medication_bonus: f64,

    /// +15 when all therapy tasks were done
    pub therapy_bonus: f64,

    /// +10 when the diet plan was followed
    pub diet_bonus: f64,

    pub grade: Grade,
}

/// The stratifier's output: a risk class with its numeric score and the
/// factors that contributed to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,

    /// Sum of baseline weight, adherence factor, and age factor
    pub score: u8,

    /// Human-readable contributing factors
    pub factors: Vec<String>,
}

/// Recommendation priority. Determines the next-check interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Urgent,
    High,
    Normal,
}

impl Priority {
    /// Hours until the next check-in for this priority.
    pub fn next_check_hours(&self) -> u32 {
        match self {
            Priority::Urgent => 2,
            Priority::High => 6,
            Priority::Normal => 24,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Priority::Urgent => "URGENT",
            Priority::High => "HIGH",
            Priority::Normal => "NORMAL",
        };
        write!(f, "{s}")
    }
}

/// Action tokens the recommendation engine can emit. The escalator branches
/// on the presence of these in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    EscalateToCareTeam,
    SchedulePhoneCall,
    SendPersonalizedReminder,
    IncreaseCheckInFrequency,
    SendEncouragement,
    ContinueStandardMonitoring,
    SendGentleReminder,
    ContinueMonitoring,
    SendFollowUpReminder,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActionKind::EscalateToCareTeam => "ESCALATE_TO_CARE_TEAM",
            ActionKind::SchedulePhoneCall => "SCHEDULE_PHONE_CALL",
            ActionKind::SendPersonalizedReminder => "SEND_PERSONALIZED_REMINDER",
            ActionKind::IncreaseCheckInFrequency => "INCREASE_CHECK_IN_FREQUENCY",
            ActionKind::SendEncouragement => "SEND_ENCOURAGEMENT",
            ActionKind::ContinueStandardMonitoring => "CONTINUE_STANDARD_MONITORING",
            ActionKind::SendGentleReminder => "SEND_GENTLE_REMINDER",
            ActionKind::ContinueMonitoring => "CONTINUE_MONITORING",
            ActionKind::SendFollowUpReminder => "SEND_FOLLOW_UP_REMINDER",
        };
        write!(f, "{s}")
    }
}

/// The recommendation engine's decision for one patient-day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,

    /// Ordered action tokens; the first matching token drives the escalator
    pub actions: Vec<ActionKind>,

    /// Short rule-derived rationale (distinct from the narrative rationale)
    pub rationale: String,

    pub next_check_hours: u32,
}

impl Recommendation {
    pub fn includes(&self, action: ActionKind) -> bool {
        self.actions.contains(&action)
    }
}
