//! `aftercare patients` — Generate a sample patient roster.

use std::path::Path;

use aftercare_core::patient::{DischargePlan, Patient, RiskLevel};

/// Rotating sample data; the generated roster cycles through these.
const SAMPLES: &[(&str, u32, &str, RiskLevel)] = &[
    ("Rosa Delgado", 71, "Congestive heart failure", RiskLevel::High),
    ("Ben Okafor", 45, "Post-operative knee replacement", RiskLevel::Low),
    ("Amara Osei", 58, "Type 2 diabetes", RiskLevel::Medium),
    ("Elena Vasquez", 78, "COPD exacerbation", RiskLevel::High),
    ("Tomas Lindqvist", 62, "Atrial fibrillation", RiskLevel::Medium),
    ("Grace Kim", 39, "Pneumonia recovery", RiskLevel::Low),
];

const MEDICATION_SETS: &[&[&str]] = &[
    &["Furosemide - twice daily", "Lisinopril", "Metoprolol - 2x"],
    &["Ibuprofen - three times daily"],
    &["Metformin - twice daily", "Atorvastatin"],
    &["Prednisone", "Albuterol inhaler - 3x"],
];

const THERAPY_SETS: &[&[&str]] = &[
    &["Walking program - daily"],
    &["Physio stretching - 3x week", "Knee exercises - twice daily"],
    &["Breathing exercises - 2x"],
];

const DIET_SETS: &[&[&str]] = &[
    &["Low sodium", "2L fluid restriction"],
    &["Diabetic diet"],
    &["High protein"],
];

pub fn run(output: &Path, count: usize) -> Result<(), Box<dyn std::error::Error>> {
    if count == 0 {
        return Err("count must be at least 1".into());
    }

    let patients: Vec<Patient> = (0..count)
        .map(|i| {
            let (name, age, condition, risk) = SAMPLES[i % SAMPLES.len()];
            Patient {
                id: format!("P{:03}", i + 1),
                name: name.to_string(),
                age,
                condition: condition.to_string(),
                baseline_risk: risk,
                discharge_plan: DischargePlan {
                    medications: to_strings(MEDICATION_SETS[i % MEDICATION_SETS.len()]),
                    therapy: to_strings(THERAPY_SETS[i % THERAPY_SETS.len()]),
                    diet: to_strings(DIET_SETS[i % DIET_SETS.len()]),
                    follow_up_date: "2099-01-01".to_string(),
                },
            }
        })
        .collect();

    let json = serde_json::to_string_pretty(&patients)?;
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, json)?;
    println!("Wrote {} patients to {}", patients.len(), output.display());

    Ok(())
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
