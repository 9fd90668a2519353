//! Adherence scoring.
//!
//! Composite 0–100 score: a task-completion component worth up to 60
//! points plus category bonuses (+15 medication, +15 therapy, +10 diet).

use aftercare_core::assessment::{AdherenceScore, Grade};

const TASK_COMPONENT_MAX: f64 = 60.0;
const MEDICATION_BONUS: f64 = 15.0;
const THERAPY_BONUS: f64 = 15.0;
const DIET_BONUS: f64 = 10.0;

/// Score one day's adherence from task counts and category booleans.
///
/// A day with no scheduled tasks gets the full task component rather than
/// a zero, so an empty plan never drags the grade down.
pub fn score(
    completed: usize,
    total: usize,
    medication_taken: bool,
    therapy_done: bool,
    diet_followed: bool,
) -> AdherenceScore {
    let task_component = if total > 0 {
        (completed as f64 / total as f64) * TASK_COMPONENT_MAX
    } else {
        TASK_COMPONENT_MAX
    };

    let medication_bonus = if medication_taken { MEDICATION_BONUS } else { 0.0 };
    let therapy_bonus = if therapy_done { THERAPY_BONUS } else { 0.0 };
    let diet_bonus = if diet_followed { DIET_BONUS } else { 0.0 };

    let total_score =
        (task_component + medication_bonus + therapy_bonus + diet_bonus).min(100.0);

    AdherenceScore {
        total: total_score,
        task_component,
        medication_bonus,
        therapy_bonus,
        diet_bonus,
        grade: Grade::from_score(total_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_day_scores_one_hundred() {
        let s = score(8, 8, true, true, true);
        assert!((s.total - 100.0).abs() < 1e-9);
        assert_eq!(s.grade, Grade::A);
    }

    #[test]
    fn total_is_capped_at_one_hundred() {
        // 60 + 15 + 15 + 10 = 100 exactly; the cap matters when the
        // task component is full and all bonuses land
        let s = score(1, 1, true, true, true);
        assert!(s.total <= 100.0);
    }

    #[test]
    fn partial_completion_scales_the_task_component() {
        let s = score(3, 6, true, false, true);
        assert!((s.task_component - 30.0).abs() < 1e-9);
        assert!((s.medication_bonus - 15.0).abs() < 1e-9);
        assert!((s.therapy_bonus - 0.0).abs() < 1e-9);
        assert!((s.diet_bonus - 10.0).abs() < 1e-9);
        assert!((s.total - 55.0).abs() < 1e-9);
        assert_eq!(s.grade, Grade::F);
    }

    #[test]
    fn empty_plan_gets_full_task_component() {
        let s = score(0, 0, true, true, true);
        assert!((s.task_component - 60.0).abs() < 1e-9);
        assert!((s.total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_plan_with_no_bonuses_sits_exactly_on_the_d_boundary() {
        let s = score(0, 0, false, false, false);
        assert!((s.total - 60.0).abs() < 1e-9);
        assert_eq!(s.grade, Grade::D);
    }

    #[test]
    fn zero_completion_still_earns_bonuses_from_booleans() {
        // Category booleans are an independent accounting from per-task
        // counts; the scorer takes both at face value
        let s = score(0, 4, true, true, false);
        assert!((s.task_component - 0.0).abs() < 1e-9);
        assert!((s.total - 30.0).abs() < 1e-9);
    }

    #[test]
    fn grade_tracks_total() {
        assert_eq!(score(6, 6, true, false, false).grade, Grade::C); // 75
        assert_eq!(score(6, 6, true, true, false).grade, Grade::A); // 90
        assert_eq!(score(4, 6, true, false, true).grade, Grade::D); // 65
    }
}
