//! File-backed patient store — one JSON document per patient.
//!
//! Storage layout: `<data_dir>/<patient_id>.json`. Records are read on every
//! `load` and durably rewritten on every `save`, which keeps the
//! load-mutate-save contract obvious: what you saved is exactly what the next
//! load returns, across process restarts.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use aftercare_core::error::MemoryError;
use aftercare_core::store::{PatientRecord, PatientStore};

/// A file-backed store using one pretty-printed JSON document per patient.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory. The directory is created
    /// on the first write, not here.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn record_path(&self, patient_id: &str) -> PathBuf {
        // Patient ids are short alphanumeric tokens; keep the filename tame
        // even if one isn't.
        let safe: String = patient_id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

#[async_trait]
impl PatientStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self, patient_id: &str) -> Result<PatientRecord, MemoryError> {
        let path = self.record_path(patient_id);
        let text = match std::fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // First reference to this patient: materialize the skeleton
                debug!(patient = %patient_id, "No durable record, starting from skeleton");
                return Ok(PatientRecord::skeleton(patient_id));
            }
            Err(e) => {
                return Err(MemoryError::Storage(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        serde_json::from_str(&text).map_err(|e| MemoryError::MalformedRecord {
            patient_id: patient_id.to_string(),
            reason: e.to_string(),
        })
    }

    async fn save(&self, record: PatientRecord) -> Result<(), MemoryError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            MemoryError::Storage(format!("failed to create {}: {e}", self.dir.display()))
        })?;

        let path = self.record_path(&record.patient_id);
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| MemoryError::Storage(format!("failed to serialize record: {e}")))?;
        std::fs::write(&path, json).map_err(|e| {
            MemoryError::Storage(format!("failed to write {}: {e}", path.display()))
        })?;
        debug!(patient = %record.patient_id, path = %path.display(), "Patient record saved");
        Ok(())
    }
}
