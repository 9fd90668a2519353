//! Daily planner — expands a discharge plan into one patient-day's schedule.
//!
//! Deterministic given the same (patient, day, today): medication/therapy
//! entries expand by parsed frequency, diet always yields the three meal-time
//! tasks, a vitals check is scheduled every day, and the follow-up
//! appointment appears only when its date falls within the next two days.
//! Output is sorted ascending by time-of-day.

use chrono::{NaiveDate, Utc};
use tracing::debug;

use aftercare_core::error::PlanError;
use aftercare_core::patient::Patient;
use aftercare_core::plan::{DailyPlan, Task, TaskCategory, TaskPriority};

use crate::parse::parse_entries;

/// Medication slot times by slots-per-day (1, 2, or 3).
const MEDICATION_TIMES: [&[&str]; 3] = [
    &["08:00"],
    &["08:00", "20:00"],
    &["08:00", "14:00", "20:00"],
];

/// Therapy slot times by slots-per-day.
const THERAPY_TIMES: [&[&str]; 3] = [
    &["10:00"],
    &["10:00", "16:00"],
    &["10:00", "13:00", "16:00"],
];

/// The three fixed meal-time tasks diet entries expand to.
const MEAL_TIMES: [(&str, &str); 3] = [
    ("08:30", "Breakfast"),
    ("12:30", "Lunch"),
    ("18:30", "Dinner"),
];

/// Create the schedule for one patient-day, dating the follow-up window from
/// today.
pub fn create_plan(patient: &Patient, day: u32) -> Result<DailyPlan, PlanError> {
    create_plan_on(patient, day, Utc::now().date_naive())
}

/// Create the schedule for one patient-day with an explicit "today" (the
/// anchor for the follow-up appointment window). Deterministic.
pub fn create_plan_on(patient: &Patient, day: u32, today: NaiveDate) -> Result<DailyPlan, PlanError> {
    if day == 0 {
        return Err(PlanError::InvalidDay(day));
    }

    let mut tasks = Vec::new();
    let mut seq = 0u32;
    let next_id = |seq: &mut u32| {
        *seq += 1;
        format!("D{day}-T{seq:02}")
    };

    // Medications: one task per parsed slot, high priority
    for item in parse_entries(&patient.discharge_plan.medications) {
        let slots = item.frequency.slots_on(day) as usize;
        for time in slot_times(&MEDICATION_TIMES, slots) {
            tasks.push(Task {
                id: next_id(&mut seq),
                category: TaskCategory::Medication,
                description: format!("Take {} ({})", item.name, item.label),
                time: time.to_string(),
                priority: TaskPriority::High,
                completed: false,
            });
        }
    }

    // Therapy: same expansion, medium priority
    for item in parse_entries(&patient.discharge_plan.therapy) {
        let slots = item.frequency.slots_on(day) as usize;
        for time in slot_times(&THERAPY_TIMES, slots) {
            tasks.push(Task {
                id: next_id(&mut seq),
                category: TaskCategory::Therapy,
                description: format!("{} ({})", item.name, item.label),
                time: time.to_string(),
                priority: TaskPriority::Medium,
                completed: false,
            });
        }
    }

    // Diet: exactly three meal-time tasks regardless of item count
    if !patient.discharge_plan.diet.is_empty() {
        let plan_text = patient.discharge_plan.diet.join(", ");
        for (time, meal) in MEAL_TIMES {
            tasks.push(Task {
                id: next_id(&mut seq),
                category: TaskCategory::Diet,
                description: format!("{meal}: follow diet plan ({plan_text})"),
                time: time.to_string(),
                priority: TaskPriority::Medium,
                completed: false,
            });
        }
    }

    // Daily vitals check
    tasks.push(Task {
        id: next_id(&mut seq),
        category: TaskCategory::Vitals,
        description: "Record vitals (blood pressure, weight)".to_string(),
        time: "09:00".to_string(),
        priority: TaskPriority::Medium,
        completed: false,
    });

    // Follow-up appointment, only when its date is 0–2 days out.
    // An unparseable date silently suppresses the task.
    match NaiveDate::parse_from_str(&patient.discharge_plan.follow_up_date, "%Y-%m-%d") {
        Ok(date) => {
            let days_until = (date - today).num_days();
            if (0..=2).contains(&days_until) {
                tasks.push(Task {
                    id: next_id(&mut seq),
                    category: TaskCategory::Appointment,
                    description: format!(
                        "Attend follow-up appointment ({})",
                        patient.discharge_plan.follow_up_date
                    ),
                    time: "14:00".to_string(),
                    priority: TaskPriority::High,
                    completed: false,
                });
            }
        }
        Err(_) => {
            debug!(
                patient = %patient.id,
                date = %patient.discharge_plan.follow_up_date,
                "Unparseable follow-up date, skipping appointment task"
            );
        }
    }

    Ok(DailyPlan::new(&patient.id, day, tasks))
}

/// Pick the time table row for a slot count (0 slots → empty).
fn slot_times<'a>(table: &[&'a [&'a str]; 3], slots: usize) -> &'a [&'a str] {
    match slots {
        0 => &[],
        1 => table[0],
        2 => table[1],
        _ => table[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aftercare_core::patient::{DischargePlan, RiskLevel};

    fn patient(plan: DischargePlan) -> Patient {
        Patient {
            id: "P001".into(),
            name: "Rosa Delgado".into(),
            age: 71,
            condition: "CHF".into(),
            baseline_risk: RiskLevel::Medium,
            discharge_plan: plan,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
    }

    #[test]
    fn twice_daily_medication_expands_to_two_tasks() {
        let p = patient(DischargePlan {
            medications: vec!["Metformin - twice daily".into()],
            therapy: vec![],
            diet: vec![],
            follow_up_date: String::new(),
        });
        let plan = create_plan_on(&p, 1, today()).unwrap();
        assert_eq!(plan.count(TaskCategory::Medication), 2);
    }

    #[test]
    fn weekly_therapy_respects_day_parity() {
        let p = patient(DischargePlan {
            medications: vec![],
            therapy: vec!["Physio stretching - 3x week".into()],
            diet: vec![],
            follow_up_date: String::new(),
        });
        let odd = create_plan_on(&p, 1, today()).unwrap();
        let even = create_plan_on(&p, 2, today()).unwrap();
        assert_eq!(odd.count(TaskCategory::Therapy), 1);
        assert_eq!(even.count(TaskCategory::Therapy), 0);
    }

    #[test]
    fn diet_always_produces_three_meal_tasks() {
        let p = patient(DischargePlan {
            medications: vec![],
            therapy: vec![],
            diet: vec!["Low sodium".into(), "2L fluid restriction".into()],
            follow_up_date: String::new(),
        });
        let plan = create_plan_on(&p, 1, today()).unwrap();
        assert_eq!(plan.count(TaskCategory::Diet), 3);

        // One item yields the same three meals
        let p2 = patient(DischargePlan {
            medications: vec![],
            therapy: vec![],
            diet: vec!["Diabetic diet".into()],
            follow_up_date: String::new(),
        });
        let plan2 = create_plan_on(&p2, 1, today()).unwrap();
        assert_eq!(plan2.count(TaskCategory::Diet), 3);
    }

    #[test]
    fn follow_up_inside_window_schedules_appointment() {
        let p = patient(DischargePlan {
            medications: vec![],
            therapy: vec![],
            diet: vec![],
            follow_up_date: "2026-08-26".into(), // 2 days out
        });
        let plan = create_plan_on(&p, 1, today()).unwrap();
        assert_eq!(plan.count(TaskCategory::Appointment), 1);
    }

    #[test]
    fn follow_up_outside_window_is_omitted() {
        let p = patient(DischargePlan {
            medications: vec![],
            therapy: vec![],
            diet: vec![],
            follow_up_date: "2026-09-15".into(),
        });
        let plan = create_plan_on(&p, 1, today()).unwrap();
        assert_eq!(plan.count(TaskCategory::Appointment), 0);

        // A date in the past is also outside the window
        let p2 = patient(DischargePlan {
            medications: vec![],
            therapy: vec![],
            diet: vec![],
            follow_up_date: "2026-08-23".into(),
        });
        let plan2 = create_plan_on(&p2, 1, today()).unwrap();
        assert_eq!(plan2.count(TaskCategory::Appointment), 0);
    }

    #[test]
    fn unparseable_follow_up_date_is_silently_skipped() {
        let p = patient(DischargePlan {
            medications: vec!["Warfarin - daily".into()],
            therapy: vec![],
            diet: vec![],
            follow_up_date: "next Tuesday-ish".into(),
        });
        let plan = create_plan_on(&p, 1, today()).unwrap();
        assert_eq!(plan.count(TaskCategory::Appointment), 0);
        // The rest of the plan is unaffected
        assert_eq!(plan.count(TaskCategory::Medication), 1);
    }

    #[test]
    fn tasks_are_sorted_by_time_with_unique_ids() {
        let p = patient(DischargePlan {
            medications: vec!["Metformin - twice daily".into()],
            therapy: vec!["Walking - daily".into()],
            diet: vec!["Low sodium".into()],
            follow_up_date: "2026-08-24".into(),
        });
        let plan = create_plan_on(&p, 1, today()).unwrap();

        let times = plan.tasks.iter().map(|t| t.time.clone()).collect::<Vec<_>>();
        let sorted = {
            let mut s = times.clone();
            s.sort();
            s
        };
        assert_eq!(times, sorted);

        let mut ids: Vec<&str> = plan.tasks.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), plan.tasks.len());
    }

    #[test]
    fn plan_is_deterministic() {
        let p = patient(DischargePlan {
            medications: vec!["Metformin - twice daily".into()],
            therapy: vec!["Physio - 3x week".into()],
            diet: vec!["Low sodium".into()],
            follow_up_date: "2026-08-25".into(),
        });
        let a = create_plan_on(&p, 3, today()).unwrap();
        let b = create_plan_on(&p, 3, today()).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn day_zero_is_rejected() {
        let p = patient(DischargePlan {
            medications: vec![],
            therapy: vec![],
            diet: vec![],
            follow_up_date: String::new(),
        });
        assert!(create_plan_on(&p, 0, today()).is_err());
    }
}
