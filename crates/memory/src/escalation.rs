//! Escalation log — append-only JSONL record of escalation/action events.
//!
//! Entries are loaded into memory on creation and the file is rewritten on
//! every mutation (append, outcome update). Ids come from a monotonic counter
//! seeded from the highest id found on disk, so they stay unique and stable
//! across reloads. A single writer is assumed; concurrent appenders to the
//! same backing file must be externally serialized.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use aftercare_core::alert::Severity;
use aftercare_core::assessment::{ActionKind, Recommendation};
use aftercare_core::error::MemoryError;
use aftercare_core::escalation::{
    DecisionSnapshot, EntryKind, EscalationEntry, EscalationOutcome, LogSummary,
};

/// What the escalator hands the log when writing an entry.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub patient_id: String,
    pub patient_name: String,
    pub day: u32,
    pub severity: Severity,
    pub trigger_reason: String,
    pub snapshot: DecisionSnapshot,
    pub recommendation: Recommendation,
    pub actions_taken: Vec<ActionKind>,
}

/// The append-only escalation/action log.
pub struct EscalationLog {
    /// `None` for an in-memory (test) log
    path: Option<PathBuf>,
    entries: RwLock<Vec<EscalationEntry>>,
    next_seq: AtomicU64,
}

impl EscalationLog {
    /// Open (or create) a file-backed log at the given JSONL path.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = Self::load_from_disk(&path);
        let next_seq = entries.iter().map(|e| id_sequence(&e.id)).max().unwrap_or(0) + 1;
        debug!(path = %path.display(), count = entries.len(), "Escalation log loaded");
        Self {
            path: Some(path),
            entries: RwLock::new(entries),
            next_seq: AtomicU64::new(next_seq),
        }
    }

    /// An in-memory log with no backing file.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: RwLock::new(Vec::new()),
            next_seq: AtomicU64::new(1),
        }
    }

    fn load_from_disk(path: &PathBuf) -> Vec<EscalationEntry> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(), // File doesn't exist yet — start empty
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<EscalationEntry>(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping corrupted escalation log entry");
                    None
                }
            })
            .collect()
    }

    /// Flush all entries to disk as JSONL.
    async fn flush(&self) -> Result<(), MemoryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let entries = self.entries.read().await;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MemoryError::Storage(format!("failed to create log directory: {e}"))
            })?;
        }

        let mut content = String::new();
        for entry in entries.iter() {
            let line = serde_json::to_string(entry).map_err(|e| {
                MemoryError::Storage(format!("failed to serialize log entry: {e}"))
            })?;
            content.push_str(&line);
            content.push('\n');
        }

        std::fs::write(path, &content)
            .map_err(|e| MemoryError::Storage(format!("failed to write log file: {e}")))?;
        Ok(())
    }

    fn next_id(&self, kind: EntryKind) -> String {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let prefix = match kind {
            EntryKind::Escalation => "ESC",
            EntryKind::Action => "ACT",
        };
        format!("{prefix}-{seq:05}")
    }

    /// Append a full escalation entry (outcome starts `Pending`).
    pub async fn log_escalation(&self, new: NewEntry) -> Result<EscalationEntry, MemoryError> {
        self.append(EntryKind::Escalation, new).await
    }

    /// Append a lighter action entry (reminder, encouragement).
    pub async fn log_action(&self, new: NewEntry) -> Result<EscalationEntry, MemoryError> {
        self.append(EntryKind::Action, new).await
    }

    async fn append(&self, kind: EntryKind, new: NewEntry) -> Result<EscalationEntry, MemoryError> {
        let entry = EscalationEntry {
            id: self.next_id(kind),
            patient_id: new.patient_id,
            patient_name: new.patient_name,
            day: new.day,
            kind,
            severity: new.severity,
            trigger_reason: new.trigger_reason,
            snapshot: new.snapshot,
            recommendation: new.recommendation,
            actions_taken: new.actions_taken,
            outcome: EscalationOutcome::Pending,
            outcome_note: None,
            created_at: Utc::now(),
            resolved_at: None,
        };
        self.entries.write().await.push(entry.clone());
        self.flush().await?;
        Ok(entry)
    }

    /// Transition an entry's outcome. Returns the updated entry.
    pub async fn update_outcome(
        &self,
        id: &str,
        outcome: EscalationOutcome,
        note: Option<String>,
    ) -> Result<EscalationEntry, MemoryError> {
        let updated = {
            let mut entries = self.entries.write().await;
            let entry = entries
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| MemoryError::EntryNotFound(id.to_string()))?;
            entry.outcome = outcome;
            entry.outcome_note = note;
            if outcome == EscalationOutcome::Resolved {
                entry.resolved_at = Some(Utc::now());
            }
            entry.clone()
        };
        self.flush().await?;
        Ok(updated)
    }

    /// A point-in-time copy of all entries, in append order.
    pub async fn entries(&self) -> Vec<EscalationEntry> {
        self.entries.read().await.clone()
    }

    /// Aggregate the log: counts by severity and executed action, pending
    /// escalations, and the resolution rate over escalation entries.
    pub async fn generate_summary(&self) -> LogSummary {
        let entries = self.entries.read().await;

        let mut by_severity = std::collections::BTreeMap::new();
        let mut by_action = std::collections::BTreeMap::new();
        let mut escalations = 0usize;
        let mut pending = 0usize;

        for entry in entries.iter() {
            *by_severity.entry(entry.severity.to_string()).or_insert(0) += 1;
            for action in &entry.actions_taken {
                *by_action.entry(action.to_string()).or_insert(0) += 1;
            }
            if entry.kind == EntryKind::Escalation {
                escalations += 1;
                if entry.outcome == EscalationOutcome::Pending {
                    pending += 1;
                }
            }
        }

        let resolution_rate = if escalations > 0 {
            (escalations - pending) as f64 / escalations as f64
        } else {
            0.0
        };

        LogSummary {
            total_entries: entries.len(),
            escalations,
            pending,
            by_severity,
            by_action,
            resolution_rate,
        }
    }
}

/// Parse the numeric sequence out of an "ESC-00042" / "ACT-00007" id.
fn id_sequence(id: &str) -> u64 {
    id.rsplit('-')
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}
