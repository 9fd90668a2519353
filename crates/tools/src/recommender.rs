//! Recommendation engine.
//!
//! A first-match rule table over (risk, score). Later rules are only
//! consulted when earlier ones miss, so ordering is load-bearing.

use aftercare_core::assessment::{ActionKind, Priority, Recommendation};
use aftercare_core::patient::RiskLevel;

const FOLLOW_UP_REMINDER_DAY: u32 = 5;

/// Decide the day's actions and priority.
///
/// `_alerts_sent` (the count of alerts already sent for this patient) is
/// accepted for future rate-limiting rules but does not affect the current
/// table.
pub fn recommend(
    risk: RiskLevel,
    score: f64,
    days_since_discharge: u32,
    _alerts_sent: usize,
) -> Recommendation {
    let (priority, mut actions, rationale) = if risk == RiskLevel::High && score < 60.0 {
        (
            Priority::Urgent,
            vec![ActionKind::EscalateToCareTeam, ActionKind::SchedulePhoneCall],
            format!("High risk with failing adherence ({score:.0}): immediate care-team attention"),
        )
    } else if risk == RiskLevel::Medium || score < 70.0 {
        (
            Priority::High,
            vec![
                ActionKind::SendPersonalizedReminder,
                ActionKind::IncreaseCheckInFrequency,
            ],
            format!("Elevated risk or slipping adherence ({score:.0}): tighten the check-in loop"),
        )
    } else if score >= 80.0 {
        (
            Priority::Normal,
            vec![
                ActionKind::SendEncouragement,
                ActionKind::ContinueStandardMonitoring,
            ],
            format!("Strong adherence ({score:.0}): reinforce the habit"),
        )
    } else {
        (
            Priority::Normal,
            vec![ActionKind::SendGentleReminder, ActionKind::ContinueMonitoring],
            format!("Adequate adherence ({score:.0}): light-touch nudge"),
        )
    };

    if days_since_discharge >= FOLLOW_UP_REMINDER_DAY {
        actions.push(ActionKind::SendFollowUpReminder);
    }

    Recommendation {
        priority,
        actions,
        rationale,
        next_check_hours: priority.next_check_hours(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_risk_failing_score_escalates() {
        let r = recommend(RiskLevel::High, 45.0, 2, 0);
        assert_eq!(r.priority, Priority::Urgent);
        assert!(r.includes(ActionKind::EscalateToCareTeam));
        assert!(r.includes(ActionKind::SchedulePhoneCall));
        assert_eq!(r.next_check_hours, 2);
    }

    #[test]
    fn high_risk_passing_score_does_not_escalate() {
        // HIGH risk alone is not enough; score must also be failing.
        // The MEDIUM-or-<70 rule catches it next.
        let r = recommend(RiskLevel::High, 65.0, 2, 0);
        assert_eq!(r.priority, Priority::High);
        assert!(r.includes(ActionKind::SendPersonalizedReminder));
        assert!(!r.includes(ActionKind::EscalateToCareTeam));
    }

    #[test]
    fn medium_risk_gets_personalized_reminder_even_with_high_score() {
        let r = recommend(RiskLevel::Medium, 95.0, 1, 0);
        assert_eq!(r.priority, Priority::High);
        assert!(r.includes(ActionKind::IncreaseCheckInFrequency));
        assert_eq!(r.next_check_hours, 6);
    }

    #[test]
    fn low_risk_strong_score_gets_encouragement() {
        let r = recommend(RiskLevel::Low, 88.0, 1, 0);
        assert_eq!(r.priority, Priority::Normal);
        assert!(r.includes(ActionKind::SendEncouragement));
        assert_eq!(r.next_check_hours, 24);
    }

    #[test]
    fn low_risk_middling_score_gets_gentle_reminder() {
        // 70 <= score < 80 falls through to the default rule
        let r = recommend(RiskLevel::Low, 75.0, 1, 0);
        assert_eq!(r.priority, Priority::Normal);
        assert!(r.includes(ActionKind::SendGentleReminder));
        assert!(r.includes(ActionKind::ContinueMonitoring));
    }

    #[test]
    fn follow_up_reminder_appended_from_day_five() {
        let early = recommend(RiskLevel::Low, 85.0, 4, 0);
        assert!(!early.includes(ActionKind::SendFollowUpReminder));

        let late = recommend(RiskLevel::Low, 85.0, 5, 0);
        assert!(late.includes(ActionKind::SendFollowUpReminder));
        // Appended last, after the branch's own actions
        assert_eq!(
            late.actions.last(),
            Some(&ActionKind::SendFollowUpReminder)
        );

        // Appended on the urgent branch too
        let urgent = recommend(RiskLevel::High, 40.0, 6, 3);
        assert!(urgent.includes(ActionKind::EscalateToCareTeam));
        assert!(urgent.includes(ActionKind::SendFollowUpReminder));
    }

    #[test]
    fn alerts_sent_does_not_change_the_decision() {
        let a = recommend(RiskLevel::High, 40.0, 2, 0);
        let b = recommend(RiskLevel::High, 40.0, 2, 99);
        assert_eq!(a.priority, b.priority);
        assert_eq!(a.actions, b.actions);
    }
}
