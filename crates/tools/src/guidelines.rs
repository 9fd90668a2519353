//! Condition-specific adherence guidelines with keyword retrieval.
//!
//! A small retrieval layer over clinical guidance: free-text conditions
//! map onto canonical condition keys by keyword, and a missed category
//! pulls the matching guideline's importance note, tips, and red flags.
//! Guidelines load from a JSON file when one is present; otherwise the
//! built-in set applies.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use aftercare_core::plan::TaskCategory;

/// Keyword table mapping free-text conditions to canonical keys. First
/// match wins; no match falls back to "general".
const CONDITION_KEYWORDS: [(&str, &[&str]); 4] = [
    (
        "cardiac",
        &["cardiac", "heart", "chf", "heart failure", "mi", "myocardial"],
    ),
    ("diabetes", &["diabetes", "diabetic", "t2d", "type 2"]),
    (
        "orthopedic",
        &["orthopedic", "joint", "hip", "knee", "fracture", "surgery"],
    ),
    (
        "respiratory",
        &["respiratory", "copd", "pneumonia", "asthma", "pulmonary"],
    ),
];

/// One guideline: why a category matters for a condition, how to stay on
/// it, and what warrants immediate attention.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Guideline {
    pub importance: String,

    #[serde(default)]
    pub adherence_tips: Vec<String>,

    #[serde(default)]
    pub red_flags: Vec<String>,

    #[serde(default)]
    pub evidence: String,
}

/// Guidelines keyed by condition, then by category ("medications",
/// "therapy", "diet").
#[derive(Debug, Clone)]
pub struct GuidelineStore {
    guidelines: BTreeMap<String, BTreeMap<String, Guideline>>,
}

impl GuidelineStore {
    /// The built-in guideline set.
    pub fn builtin() -> Self {
        Self {
            guidelines: builtin_guidelines(),
        }
    }

    /// Load guidelines from a JSON file. A missing or malformed file falls
    /// back to the built-in set; a run never fails over guidance.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                info!(path = %path.display(), "No guideline file; using the built-in set");
                return Self::builtin();
            }
        };
        match serde_json::from_str::<BTreeMap<String, BTreeMap<String, Guideline>>>(&text) {
            Ok(guidelines) => {
                info!(
                    path = %path.display(),
                    conditions = guidelines.len(),
                    "Loaded guidelines"
                );
                Self { guidelines }
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Malformed guideline file; using the built-in set"
                );
                Self::builtin()
            }
        }
    }

    /// Retrieve the guideline for a free-text condition and a category.
    pub fn retrieve(&self, condition: &str, category: TaskCategory) -> Option<&Guideline> {
        let key = category_key(category)?;
        self.guidelines
            .get(condition_key(condition))
            .and_then(|by_category| by_category.get(key))
    }

    /// Build an evidence-backed nudge for a missed category, falling back
    /// to a generic one when no guideline matches.
    pub fn recommendation(&self, condition: &str, category: TaskCategory) -> String {
        let Some(guideline) = self.retrieve(condition, category) else {
            return format!(
                "Resume your {category} routine as prescribed in your discharge plan."
            );
        };

        let mut parts = Vec::new();
        if !guideline.importance.is_empty() {
            parts.push(format!("Why it matters: {}", guideline.importance));
        }
        if !guideline.adherence_tips.is_empty() {
            let tips: Vec<&str> = guideline
                .adherence_tips
                .iter()
                .take(2)
                .map(String::as_str)
                .collect();
            parts.push(format!("Try this: {}", tips.join("; ")));
        }
        if !guideline.evidence.is_empty() {
            parts.push(format!("Evidence: {}", guideline.evidence));
        }

        if parts.is_empty() {
            "Please follow your discharge instructions carefully.".to_string()
        } else {
            parts.join(" | ")
        }
    }

    /// Warning signs for a missed category that need immediate attention.
    pub fn red_flags(&self, condition: &str, category: TaskCategory) -> Vec<String> {
        self.retrieve(condition, category)
            .map(|g| g.red_flags.clone())
            .unwrap_or_default()
    }
}

fn condition_key(condition: &str) -> &'static str {
    let condition = condition.to_lowercase();
    for (canonical, keywords) in CONDITION_KEYWORDS {
        if keywords.iter().any(|kw| condition.contains(kw)) {
            return canonical;
        }
    }
    "general"
}

/// Only the three adherence categories carry guidelines.
fn category_key(category: TaskCategory) -> Option<&'static str> {
    match category {
        TaskCategory::Medication => Some("medications"),
        TaskCategory::Therapy => Some("therapy"),
        TaskCategory::Diet => Some("diet"),
        TaskCategory::Vitals | TaskCategory::Appointment => None,
    }
}

fn guideline(
    importance: &str,
    tips: &[&str],
    red_flags: &[&str],
    evidence: &str,
) -> Guideline {
    Guideline {
        importance: importance.to_string(),
        adherence_tips: tips.iter().map(|s| s.to_string()).collect(),
        red_flags: red_flags.iter().map(|s| s.to_string()).collect(),
        evidence: evidence.to_string(),
    }
}

fn builtin_guidelines() -> BTreeMap<String, BTreeMap<String, Guideline>> {
    let mut conditions = BTreeMap::new();

    let mut cardiac = BTreeMap::new();
    cardiac.insert(
        "medications".to_string(),
        guideline(
            "Missing cardiac medications sharply raises the risk of fluid overload and readmission",
            &[
                "Take doses at the same times every day",
                "Use a pill organizer filled once a week",
            ],
            &["Two or more missed doses in a row", "Swelling in legs or sudden weight gain"],
            "AHA heart failure guidelines tie medication adherence to 30-day readmission risk",
        ),
    );
    cardiac.insert(
        "therapy".to_string(),
        guideline(
            "Cardiac rehab sessions rebuild exercise tolerance safely after discharge",
            &["Schedule sessions for the same weekday slots", "Stop and rest at any chest discomfort"],
            &["Chest pain or breathlessness during activity"],
            "Cochrane review: rehab participation lowers cardiac readmissions",
        ),
    );
    cardiac.insert(
        "diet".to_string(),
        guideline(
            "Sodium restriction keeps fluid from building up between check-ins",
            &["Check labels for sodium per serving", "Cook at home where salt is controllable"],
            &["Rapid weight gain over 2-3 days"],
            "Sodium intake above 2g/day associates with decompensation events",
        ),
    );
    conditions.insert("cardiac".to_string(), cardiac);

    let mut diabetes = BTreeMap::new();
    diabetes.insert(
        "medications".to_string(),
        guideline(
            "Skipped glucose-lowering doses cause swings that slow recovery",
            &["Pair doses with meals you never skip", "Keep a backup supply in a second location"],
            &["Repeated readings above 300 mg/dL", "Symptoms of hypoglycemia"],
            "Adherence above 80% associates with fewer diabetes-related admissions",
        ),
    );
    diabetes.insert(
        "therapy".to_string(),
        guideline(
            "Regular activity improves insulin sensitivity day to day",
            &["Walk after the largest meal of the day", "Track minutes rather than distance"],
            &["Dizziness or shakiness during exercise"],
            "Post-meal walking measurably reduces glucose excursions",
        ),
    );
    diabetes.insert(
        "diet".to_string(),
        guideline(
            "Consistent carbohydrate intake keeps glucose predictable",
            &["Count carbs per meal, not per day", "Plan meals before shopping"],
            &["Ketone symptoms: thirst, frequent urination, nausea"],
            "Carbohydrate consistency improves glycemic control in T2D",
        ),
    );
    conditions.insert("diabetes".to_string(), diabetes);

    let mut orthopedic = BTreeMap::new();
    orthopedic.insert(
        "medications".to_string(),
        guideline(
            "Pain control on schedule keeps mobility work possible",
            &["Take pain medication before therapy, not after", "Do not double up after a missed dose"],
            &["Signs of infection at the surgical site", "Calf pain or swelling"],
            "Scheduled analgesia improves early mobilization outcomes",
        ),
    );
    orthopedic.insert(
        "therapy".to_string(),
        guideline(
            "Missed physiotherapy in the first weeks costs range of motion that is hard to regain",
            &["Do home exercises at fixed times", "Ice after sessions, not instead of them"],
            &["Sharp joint pain or new instability"],
            "Early supervised mobilization predicts functional recovery after joint surgery",
        ),
    );
    orthopedic.insert(
        "diet".to_string(),
        guideline(
            "Protein and calcium intake support bone and soft-tissue healing",
            &["Include a protein source at every meal"],
            &[],
            "Protein intake correlates with post-surgical healing rates",
        ),
    );
    conditions.insert("orthopedic".to_string(), orthopedic);

    let mut respiratory = BTreeMap::new();
    respiratory.insert(
        "medications".to_string(),
        guideline(
            "Maintenance inhalers prevent flare-ups; they do not treat one in progress",
            &["Use maintenance inhalers on schedule even when breathing feels fine", "Check inhaler technique weekly"],
            &["Increased rescue-inhaler use", "Breathlessness at rest"],
            "Maintenance inhaler adherence reduces COPD exacerbation admissions",
        ),
    );
    respiratory.insert(
        "therapy".to_string(),
        guideline(
            "Breathing exercises clear secretions and keep airways open",
            &["Do breathing exercises before meals", "Pace activity with pursed-lip breathing"],
            &["Fever with increased sputum"],
            "Pulmonary rehabilitation reduces respiratory readmissions",
        ),
    );
    respiratory.insert(
        "diet".to_string(),
        guideline(
            "Smaller, frequent meals reduce breathlessness while eating",
            &["Eat five small meals rather than three large ones"],
            &[],
            "Nutritional support improves outcomes in chronic respiratory disease",
        ),
    );
    conditions.insert("respiratory".to_string(), respiratory);

    let mut general = BTreeMap::new();
    general.insert(
        "medications".to_string(),
        guideline(
            "Medication adherence is the strongest controllable factor in recovery",
            &["Take doses at the same time daily", "Use reminders or alarms"],
            &["Missed doses on multiple consecutive days"],
            "Medication adherence broadly predicts post-discharge outcomes",
        ),
    );
    general.insert(
        "therapy".to_string(),
        guideline(
            "Prescribed activity prevents deconditioning after a hospital stay",
            &["Anchor sessions to a daily routine"],
            &[],
            "",
        ),
    );
    general.insert(
        "diet".to_string(),
        guideline(
            "Following the discharge diet supports healing and energy levels",
            &["Prepare meals in advance for low-energy days"],
            &[],
            "",
        ),
    );
    conditions.insert("general".to_string(), general);

    conditions
}
