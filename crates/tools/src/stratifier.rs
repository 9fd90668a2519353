//! Risk stratification.
//!
//! Combines the baseline discharge risk with a recent-adherence factor and
//! an age factor into a numeric score, then classes it. Pure given a
//! history snapshot: the caller supplies the score history from long-term
//! memory.

use aftercare_core::assessment::RiskAssessment;
use aftercare_core::patient::{Patient, RiskLevel};

const HIGH_THRESHOLD: u8 = 5;
const MEDIUM_THRESHOLD: u8 = 3;
const AGE_THRESHOLD: u32 = 65;

/// Stratify a patient's current risk from their baseline and recent
/// adherence scores (oldest first).
pub fn stratify(patient: &Patient, score_history: &[f64]) -> RiskAssessment {
    let base = patient.baseline_risk.weight();
    let mut factors = vec![format!(
        "Baseline discharge risk {} (+{base})",
        patient.baseline_risk
    )];

    // Recent-adherence factor needs at least three data points
    let adherence_factor = if score_history.len() >= 3 {
        let recent = &score_history[score_history.len() - 3..];
        let mean = recent.iter().sum::<f64>() / recent.len() as f64;
        if mean < 50.0 {
            factors.push(format!("Recent adherence average {mean:.1} below 50 (+2)"));
            2
        } else if mean < 70.0 {
            factors.push(format!("Recent adherence average {mean:.1} below 70 (+1)"));
            1
        } else {
            0
        }
    } else {
        0
    };

    let age_factor = if patient.age > AGE_THRESHOLD {
        factors.push(format!("Age {} above {AGE_THRESHOLD} (+1)", patient.age));
        1
    } else {
        0
    };

    let score = base + adherence_factor + age_factor;
    let level = if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    RiskAssessment {
        level,
        score,
        factors,
    }
}
