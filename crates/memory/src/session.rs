//! Session memory — transient per-patient context for one process lifetime.
//!
//! Keeps the most recent `max_turns` turns (oldest dropped first, no
//! summarization — accepted loss) plus a free-form key-value context map.
//! Sessions are created lazily on first reference and cleared only on
//! explicit reset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// One recorded turn in a patient session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced the turn ("system", "monitor", "analyzer", ...)
    pub role: String,

    pub content: String,

    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Bounded turn history plus free-form context for one patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMemory {
    turns: Vec<Turn>,

    context: HashMap<String, serde_json::Value>,

    max_turns: usize,
}

impl SessionMemory {
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: Vec::new(),
            context: HashMap::new(),
            max_turns,
        }
    }

    /// Append a turn, then truncate to `max_turns` keeping the most recent.
    pub fn add_turn(
        &mut self,
        role: impl Into<String>,
        content: impl Into<String>,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) {
        self.turns.push(Turn {
            role: role.into(),
            content: content.into(),
            timestamp: Utc::now(),
            metadata,
        });
        if self.turns.len() > self.max_turns {
            let drop = self.turns.len() - self.max_turns;
            self.turns.drain(..drop);
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn set_context(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.context.insert(key.into(), value);
    }

    pub fn get_context(&self, key: &str) -> Option<&serde_json::Value> {
        self.context.get(key)
    }

    /// Explicit reset: drops both turns and context.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.context.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Lazily-created per-patient sessions, shared across agents.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionMemory>>,
    max_turns: usize,
}

impl SessionRegistry {
    pub fn new(max_turns: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_turns,
        }
    }

    /// Append a turn to the patient's session, creating it if needed.
    pub async fn add_turn(
        &self,
        patient_id: &str,
        role: impl Into<String>,
        content: impl Into<String>,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(patient_id.to_string())
            .or_insert_with(|| SessionMemory::new(self.max_turns))
            .add_turn(role, content, metadata);
    }

    /// Set a context value in the patient's session, creating it if needed.
    pub async fn set_context(&self, patient_id: &str, key: &str, value: serde_json::Value) {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(patient_id.to_string())
            .or_insert_with(|| SessionMemory::new(self.max_turns))
            .set_context(key, value);
    }

    pub async fn get_context(&self, patient_id: &str, key: &str) -> Option<serde_json::Value> {
        let sessions = self.sessions.read().await;
        sessions
            .get(patient_id)
            .and_then(|s| s.get_context(key).cloned())
    }

    /// A point-in-time copy of the patient's session, if one exists.
    pub async fn snapshot(&self, patient_id: &str) -> Option<SessionMemory> {
        self.sessions.read().await.get(patient_id).cloned()
    }

    /// Explicitly reset one patient's session.
    pub async fn clear(&self, patient_id: &str) {
        if let Some(session) = self.sessions.write().await.get_mut(patient_id) {
            session.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_meta() -> serde_json::Map<String, serde_json::Value> {
        serde_json::Map::new()
    }

    #[test]
    fn never_exceeds_max_turns() {
        let mut session = SessionMemory::new(3);
        for i in 0..10 {
            session.add_turn("system", format!("turn {i}"), no_meta());
            assert!(session.len() <= 3);
        }
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn oldest_turns_drop_first() {
        let mut session = SessionMemory::new(2);
        session.add_turn("system", "first", no_meta());
        session.add_turn("system", "second", no_meta());
        session.add_turn("system", "third", no_meta());

        let contents: Vec<&str> = session.turns().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["second", "third"]);
    }

    #[test]
    fn context_is_free_form() {
        let mut session = SessionMemory::new(5);
        session.set_context("day", serde_json::json!(3));
        session.set_context("missed_tasks", serde_json::json!(["D3-T01"]));
        assert_eq!(session.get_context("day"), Some(&serde_json::json!(3)));
        assert!(session.get_context("unknown").is_none());
    }

    #[test]
    fn clear_resets_everything() {
        let mut session = SessionMemory::new(5);
        session.add_turn("system", "hello", no_meta());
        session.set_context("day", serde_json::json!(1));
        session.clear();
        assert!(session.is_empty());
        assert!(session.get_context("day").is_none());
    }

    #[tokio::test]
    async fn registry_creates_sessions_lazily() {
        let registry = SessionRegistry::new(5);
        assert!(registry.snapshot("P001").await.is_none());

        registry
            .add_turn("P001", "monitor", "day 1 check", no_meta())
            .await;
        let snapshot = registry.snapshot("P001").await.unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[tokio::test]
    async fn registry_sessions_are_isolated() {
        let registry = SessionRegistry::new(5);
        registry
            .set_context("P001", "day", serde_json::json!(1))
            .await;
        registry
            .set_context("P002", "day", serde_json::json!(9))
            .await;

        assert_eq!(
            registry.get_context("P001", "day").await,
            Some(serde_json::json!(1))
        );
        assert_eq!(
            registry.get_context("P002", "day").await,
            Some(serde_json::json!(9))
        );
    }
}
