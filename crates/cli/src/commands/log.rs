//! `aftercare log` — Inspect the escalation log.

use std::path::Path;

use aftercare_config::SimConfig;
use aftercare_memory::escalation::EscalationLog;

pub async fn run(config_path: &Path, summary_only: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = SimConfig::load(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let log = EscalationLog::open(&config.escalation_log);

    if !summary_only {
        let entries = log.entries().await;
        if entries.is_empty() {
            println!("Escalation log is empty ({})", config.escalation_log.display());
            return Ok(());
        }

        println!("Escalation Log ({})", config.escalation_log.display());
        println!("==============");
        for entry in &entries {
            println!(
                "  {} day {} {} ({}) severity {} outcome {:?}",
                entry.id,
                entry.day,
                entry.patient_name,
                entry.patient_id,
                entry.severity,
                entry.outcome,
            );
            println!("      {}", entry.trigger_reason);
        }
        println!();
    }

    let summary = log.generate_summary().await;
    println!("Summary");
    println!("  Total entries:   {}", summary.total_entries);
    println!("  Escalations:     {}", summary.escalations);
    println!("  Pending:         {}", summary.pending);
    println!("  Resolution rate: {:.0}%", summary.resolution_rate * 100.0);
    if !summary.by_severity.is_empty() {
        println!("  By severity:");
        for (severity, count) in &summary.by_severity {
            println!("    {severity}: {count}");
        }
    }
    if !summary.by_action.is_empty() {
        println!("  By action:");
        for (action, count) in &summary.by_action {
            println!("    {action}: {count}");
        }
    }

    Ok(())
}
