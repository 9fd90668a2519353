//! Clinical impact estimation.
//!
//! Translates adherence outcomes into projected readmission and cost
//! effects using published effect sizes: a 20% baseline 30-day readmission
//! rate (CMS) and a 12% readmission reduction per 10-point adherence
//! improvement over a 60-point no-intervention baseline (NEJM 2019),
//! capped at a 50% total reduction.

use serde::{Deserialize, Serialize};

use aftercare_core::patient::RiskLevel;

const BASELINE_READMISSION_RATE: f64 = 0.20;
const REDUCTION_PER_TEN_POINTS: f64 = 0.12;
const MAX_REDUCTION_RATE: f64 = 0.50;
const COST_PER_READMISSION: f64 = 15_000.0;
const BED_DAYS_PER_READMISSION: f64 = 3.0;
const MONITORING_COST_PER_PATIENT: f64 = 50.0;
const MORTALITY_REDUCTION_FACTOR: f64 = 0.05;

/// Expected adherence score without any intervention.
const BASELINE_ADHERENCE: f64 = 60.0;

/// Projected system-wide effect of the monitored cohort's adherence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationImpact {
    pub patients_monitored: usize,

    pub average_adherence_score: f64,

    /// Points above the no-intervention baseline (never negative)
    pub adherence_improvement: f64,

    /// Readmissions expected without intervention
    pub baseline_readmissions: f64,

    pub readmissions_prevented: f64,

    /// Fraction of baseline readmissions avoided, 0.0–0.5
    pub readmission_reduction_rate: f64,

    pub gross_savings: f64,

    pub monitoring_costs: f64,

    pub net_savings: f64,

    /// Gross savings per monitoring dollar; zero when nothing was spent
    pub roi: f64,

    pub bed_days_saved: f64,

    pub estimated_lives_saved: f64,
}

/// Project the population-level impact of an average adherence score.
pub fn population_impact(total_patients: usize, average_score: f64) -> PopulationImpact {
    let adherence_improvement = (average_score - BASELINE_ADHERENCE).max(0.0);
    let readmission_reduction_rate =
        (REDUCTION_PER_TEN_POINTS * adherence_improvement / 10.0).min(MAX_REDUCTION_RATE);

    let baseline_readmissions = total_patients as f64 * BASELINE_READMISSION_RATE;
    let readmissions_prevented = baseline_readmissions * readmission_reduction_rate;

    let gross_savings = readmissions_prevented * COST_PER_READMISSION;
    let monitoring_costs = total_patients as f64 * MONITORING_COST_PER_PATIENT;
    let roi = if monitoring_costs > 0.0 {
        gross_savings / monitoring_costs
    } else {
        0.0
    };

    PopulationImpact {
        patients_monitored: total_patients,
        average_adherence_score: average_score,
        adherence_improvement,
        baseline_readmissions,
        readmissions_prevented,
        readmission_reduction_rate,
        gross_savings,
        monitoring_costs,
        net_savings: gross_savings - monitoring_costs,
        roi,
        bed_days_saved: readmissions_prevented * BED_DAYS_PER_READMISSION,
        estimated_lives_saved: readmissions_prevented * MORTALITY_REDUCTION_FACTOR,
    }
}

/// One patient's projected readmission-risk change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientImpact {
    pub risk_level: RiskLevel,

    pub average_adherence_score: f64,

    /// Readmission probability without intervention, risk-adjusted
    pub baseline_readmission_risk: f64,

    /// Absolute probability reduction achieved
    pub risk_reduction: f64,

    pub current_readmission_risk: f64,

    pub potential_savings: f64,
}

/// Readmission-risk multiplier by risk class.
fn risk_multiplier(level: RiskLevel) -> f64 {
    match level {
        RiskLevel::High => 1.5,
        RiskLevel::Medium => 1.0,
        RiskLevel::Low => 0.6,
    }
}

/// Project one patient's impact from their daily score history.
pub fn patient_impact(scores: &[f64], risk: RiskLevel) -> PatientImpact {
    let average = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    let baseline_risk = BASELINE_READMISSION_RATE * risk_multiplier(risk);
    let improvement = (average - BASELINE_ADHERENCE).max(0.0);
    let reduction_rate =
        (REDUCTION_PER_TEN_POINTS * improvement / 10.0).min(MAX_REDUCTION_RATE);
    let risk_reduction = baseline_risk * reduction_rate;

    PatientImpact {
        risk_level: risk,
        average_adherence_score: average,
        baseline_readmission_risk: baseline_risk,
        risk_reduction,
        current_readmission_risk: baseline_risk - risk_reduction,
        potential_savings: risk_reduction * COST_PER_READMISSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_baseline_average_prevents_nothing() {
        let impact = population_impact(10, 45.0);
        assert!((impact.adherence_improvement - 0.0).abs() < 1e-9);
        assert!((impact.readmissions_prevented - 0.0).abs() < 1e-9);
        assert!((impact.gross_savings - 0.0).abs() < 1e-9);
        // Monitoring still costs money on a flat cohort
        assert!((impact.net_savings - -500.0).abs() < 1e-9);
    }

    #[test]
    fn population_projection_is_hand_checkable() {
        // 100 patients at 85: improvement 25 → 30% reduction of the 20
        // expected readmissions → 6 prevented
        let impact = population_impact(100, 85.0);
        assert!((impact.readmission_reduction_rate - 0.30).abs() < 1e-9);
        assert!((impact.baseline_readmissions - 20.0).abs() < 1e-9);
        assert!((impact.readmissions_prevented - 6.0).abs() < 1e-9);
        assert!((impact.gross_savings - 90_000.0).abs() < 1e-6);
        assert!((impact.monitoring_costs - 5_000.0).abs() < 1e-9);
        assert!((impact.net_savings - 85_000.0).abs() < 1e-6);
        assert!((impact.roi - 18.0).abs() < 1e-9);
        assert!((impact.bed_days_saved - 18.0).abs() < 1e-9);
        assert!((impact.estimated_lives_saved - 0.30).abs() < 1e-9);
    }

    #[test]
    fn perfect_cohort_stays_under_the_reduction_cap() {
        // Even a 100 average (improvement 40) yields 48%, inside the cap
        let impact = population_impact(1, 100.0);
        assert!((impact.readmission_reduction_rate - 0.48).abs() < 1e-9);
        assert!(impact.readmission_reduction_rate <= MAX_REDUCTION_RATE);
    }

    #[test]
    fn empty_cohort_has_zero_roi() {
        let impact = population_impact(0, 90.0);
        assert!((impact.monitoring_costs - 0.0).abs() < 1e-9);
        assert!((impact.roi - 0.0).abs() < 1e-9);
    }

    #[test]
    fn risk_class_scales_the_baseline_risk() {
        let scores = vec![80.0, 80.0, 80.0];
        let high = patient_impact(&scores, RiskLevel::High);
        let low = patient_impact(&scores, RiskLevel::Low);

        assert!((high.baseline_readmission_risk - 0.30).abs() < 1e-9);
        assert!((low.baseline_readmission_risk - 0.12).abs() < 1e-9);
        // Same relative reduction (improvement 20 → 24%), different absolutes
        assert!((high.risk_reduction - 0.072).abs() < 1e-9);
        assert!((low.risk_reduction - 0.0288).abs() < 1e-9);
        assert!((high.current_readmission_risk - 0.228).abs() < 1e-9);
    }

    #[test]
    fn empty_history_projects_no_benefit() {
        let impact = patient_impact(&[], RiskLevel::Medium);
        assert!((impact.average_adherence_score - 0.0).abs() < 1e-9);
        assert!((impact.risk_reduction - 0.0).abs() < 1e-9);
        assert!(
            (impact.current_readmission_risk - impact.baseline_readmission_risk).abs() < 1e-9
        );
    }
}
