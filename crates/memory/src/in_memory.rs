//! In-memory patient store — useful for tests and ephemeral runs.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use aftercare_core::error::MemoryError;
use aftercare_core::store::{PatientRecord, PatientStore};

/// An in-memory store keyed by patient id. Not durable.
pub struct InMemoryStore {
    records: RwLock<HashMap<String, PatientRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PatientStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn load(&self, patient_id: &str) -> Result<PatientRecord, MemoryError> {
        let records = self.records.read().await;
        Ok(records
            .get(patient_id)
            .cloned()
            .unwrap_or_else(|| PatientRecord::skeleton(patient_id)))
    }

    async fn save(&self, record: PatientRecord) -> Result<(), MemoryError> {
        self.records
            .write()
            .await
            .insert(record.patient_id.clone(), record);
        Ok(())
    }
}
