//! Template-based patient messaging.
//!
//! Reminders for missed task categories plus the check-in messages the
//! escalator sends. These are deliberately plain templates; narrative
//! rationales come from the external provider instead.

use aftercare_core::plan::TaskCategory;

/// A drafted reminder for one missed plan item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub category: TaskCategory,

    /// The plan item the reminder is about
    pub item: String,

    pub message: String,
}

/// Draft one reminder per affected item in a missed category.
pub fn draft_reminders(patient_name: &str, category: TaskCategory, items: &[String]) -> Vec<Reminder> {
    items
        .iter()
        .map(|item| Reminder {
            category,
            item: item.clone(),
            message: reminder_message(patient_name, category, item),
        })
        .collect()
}

fn reminder_message(patient_name: &str, category: TaskCategory, item: &str) -> String {
    match category {
        TaskCategory::Medication => format!(
            "Hi {patient_name}, you haven't logged your {item} today. \
             Taking it on schedule keeps your recovery on track."
        ),
        TaskCategory::Therapy => format!(
            "Hi {patient_name}, your {item} session is still pending today. \
             Even a short session helps."
        ),
        TaskCategory::Diet => format!(
            "Hi {patient_name}, a reminder about your meal plan: {item}. \
             Small consistent choices add up."
        ),
        TaskCategory::Vitals => format!(
            "Hi {patient_name}, please record your {item} so your care team \
             can keep an eye on your progress."
        ),
        TaskCategory::Appointment => format!(
            "Hi {patient_name}, don't forget: {item}. Your care team is \
             expecting you."
        ),
    }
}

/// Tailored reminder referencing the day's score and missed items.
pub fn personalized_reminder(patient_name: &str, score: f64, missed: &[String]) -> String {
    if missed.is_empty() {
        format!(
            "Hi {patient_name}, your adherence today was {score:.0}/100. \
             Let's aim a little higher tomorrow — you've got this."
        )
    } else {
        format!(
            "Hi {patient_name}, your adherence today was {score:.0}/100. \
             You missed: {}. Let's get back on track tomorrow.",
            missed.join(", ")
        )
    }
}

/// Positive reinforcement for a strong day.
pub fn encouragement(patient_name: &str, score: f64) -> String {
    format!(
        "Great work today, {patient_name}! Your adherence score was \
         {score:.0}/100. Keep it up — consistency is what gets you home \
         for good."
    )
}

/// Light-touch nudge for an adequate day.
pub fn gentle_reminder(patient_name: &str) -> String {
    format!(
        "Hi {patient_name}, just checking in. Remember to keep up with \
         your care plan today."
    )
}

/// The alert body sent to the care team on escalation.
pub fn escalation_message(patient_name: &str, score: f64, risk: &str) -> String {
    format!(
        "Care team attention needed: {patient_name} is at {risk} risk with \
         an adherence score of {score:.0}/100 today. Please review and make \
         contact."
    )
}
