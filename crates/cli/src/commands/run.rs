//! `aftercare run` — Run the monitoring simulation over a patient roster.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use aftercare_agents::AgentContext;
use aftercare_alerts::LogChannel;
use aftercare_config::SimConfig;
use aftercare_core::event::EventBus;
use aftercare_core::narrative::NarrativeProvider;
use aftercare_core::patient::Patient;
use aftercare_memory::escalation::EscalationLog;
use aftercare_memory::file_store::FileStore;
use aftercare_memory::session::SessionRegistry;
use aftercare_narrative::{HttpNarrative, ScriptedNarrative};
use aftercare_orchestrator::{run_simulation, PopulationResult};
use aftercare_planner::RngSampler;
use aftercare_tools::GuidelineStore;

pub async fn run(
    config_path: &Path,
    roster_path: &Path,
    days_override: Option<u32>,
    seed_override: Option<u64>,
    export: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = SimConfig::load(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let days = days_override.unwrap_or(config.days);

    let patients = load_roster(roster_path)?;
    info!(
        patients = patients.len(),
        days,
        store = %config.data_dir.display(),
        "Configuration loaded"
    );

    let narrative: Arc<dyn NarrativeProvider> = if config.narrative.base_url.is_empty() {
        info!("No narrative service configured; using the offline scripted provider");
        Arc::new(ScriptedNarrative::constant(
            "Offline run: rationale generation skipped by configuration.",
        ))
    } else {
        Arc::new(HttpNarrative::new(
            config.narrative.base_url.clone(),
            config.narrative.api_key.clone(),
            config.narrative.timeout_secs,
        ))
    };

    let ctx = AgentContext {
        store: Arc::new(FileStore::new(&config.data_dir)),
        sessions: Arc::new(SessionRegistry::new(config.session.max_turns)),
        escalations: Arc::new(EscalationLog::open(&config.escalation_log)),
        narrative,
        alerts: Arc::new(LogChannel),
        guidelines: Arc::new(GuidelineStore::load(&config.knowledge_base)),
        events: Arc::new(EventBus::default()),
    };

    let sampler = match seed_override.or(config.engagement.seed) {
        Some(seed) => RngSampler::seeded(seed),
        None => RngSampler::from_entropy(),
    };

    let result = run_simulation(&ctx, &patients, days, &sampler).await?;
    print_result(&result);

    if let Some(path) = export {
        let json = serde_json::to_string_pretty(&result)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        println!("\nFull result exported to {}", path.display());
    }

    Ok(())
}

fn load_roster(path: &Path) -> Result<Vec<Patient>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        format!(
            "Failed to read roster {}: {e}. Generate one with `aftercare patients`.",
            path.display()
        )
    })?;
    let patients: Vec<Patient> = serde_json::from_str(&text)
        .map_err(|e| format!("Malformed roster {}: {e}", path.display()))?;
    if patients.is_empty() {
        return Err("Roster is empty".into());
    }
    Ok(patients)
}

fn print_result(result: &PopulationResult) {
    println!("Aftercare Simulation Result");
    println!("===========================");
    println!(
        "  Run: {} day(s), {} — {}",
        result.days,
        result.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        result.finished_at.format("%H:%M:%S UTC")
    );
    for run in &result.patients {
        println!("\n  {} ({})", run.patient_name, run.patient_id);
        for day in &run.days {
            println!(
                "    Day {}: score {:>5.1} (grade {}) risk {} completion {:>4.0}%{}",
                day.day,
                day.score,
                day.grade,
                day.risk,
                day.completion_rate * 100.0,
                if day.escalated { "  [ESCALATED]" } else { "" }
            );
        }
        if let Some(error) = &run.error {
            println!("    Aborted: {error}");
        }
        let s = &run.summary;
        println!(
            "    Summary: avg {:.1} (min {:.1} / max {:.1}), escalations {}, trend {:?}{}",
            s.average_score,
            s.min_score,
            s.max_score,
            s.escalations,
            s.insights.trend,
            match s.insights.most_missed_category {
                Some(category) => format!(", most missed: {category}"),
                None => String::new(),
            }
        );
    }

    let p = &result.summary;
    println!("\n  Population");
    println!("    Patients:           {}", p.total_patients);
    println!("    Total escalations:  {}", p.total_escalations);
    println!("    Average score:      {:.1}", p.overall_average_score);
    println!(
        "    Average completion: {:.0}%",
        p.average_completion_rate * 100.0
    );
    if p.high_risk_patients.is_empty() {
        println!("    High-risk patients: none");
    } else {
        println!(
            "    High-risk patients: {}",
            p.high_risk_patients.join(", ")
        );
    }

    let i = &result.impact;
    println!("\n  Projected impact");
    println!(
        "    Readmissions prevented: {:.2} of {:.1} expected",
        i.readmissions_prevented, i.baseline_readmissions
    );
    println!("    Net savings:            ${:.0}", i.net_savings);
    println!("    ROI:                    {:.1}x", i.roi);
    println!("    Bed days saved:         {:.1}", i.bed_days_saved);
}
