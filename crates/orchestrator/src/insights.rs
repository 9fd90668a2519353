//! Engagement insights derived from a patient's run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use aftercare_core::plan::TaskCategory;

use crate::DailyOutcome;

/// Direction of the engagement trend over a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

/// Summary of how a patient engaged over the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementInsights {
    /// Mean task-completion rate across completed days
    pub average_completion: f64,

    pub trend: Trend,

    /// 1 − stddev of the daily completion rates; 1.0 is perfectly steady
    pub consistency: f64,

    /// The category missed on the most days, if any category was missed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_missed_category: Option<TaskCategory>,
}

const TREND_THRESHOLD: f64 = 0.05;

/// Compute insights over a patient's completed days. A run needs at least
/// two days before a trend can be called; shorter runs are `Stable`.
pub fn engagement_insights(days: &[DailyOutcome]) -> EngagementInsights {
    if days.is_empty() {
        return EngagementInsights {
            average_completion: 0.0,
            trend: Trend::Stable,
            consistency: 1.0,
            most_missed_category: None,
        };
    }

    let rates: Vec<f64> = days.iter().map(|d| d.completion_rate).collect();
    let average_completion = mean(&rates);

    let trend = if rates.len() < 2 {
        Trend::Stable
    } else {
        let mid = rates.len() / 2;
        let delta = mean(&rates[mid..]) - mean(&rates[..mid]);
        if delta > TREND_THRESHOLD {
            Trend::Improving
        } else if delta < -TREND_THRESHOLD {
            Trend::Declining
        } else {
            Trend::Stable
        }
    };

    let variance = rates
        .iter()
        .map(|r| (r - average_completion).powi(2))
        .sum::<f64>()
        / rates.len() as f64;
    let consistency = (1.0 - variance.sqrt()).max(0.0);

    let mut missed_days: BTreeMap<TaskCategory, usize> = BTreeMap::new();
    for day in days {
        for category in &day.missed_categories {
            *missed_days.entry(*category).or_insert(0) += 1;
        }
    }
    let most_missed_category = missed_days
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(category, _)| category);

    EngagementInsights {
        average_completion,
        trend,
        consistency,
        most_missed_category,
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
