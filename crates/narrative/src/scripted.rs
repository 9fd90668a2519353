//! Deterministic narrative providers for tests and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use aftercare_core::error::NarrativeError;
use aftercare_core::narrative::{NarrativeProvider, NarrativeRequest};

/// Replays a script of rationales in order, then falls back to a fixed
/// default. Useful for tests and offline simulation runs.
pub struct ScriptedNarrative {
    responses: Mutex<VecDeque<String>>,
    default: String,
}

impl ScriptedNarrative {
    pub fn new(responses: Vec<String>, default: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            default: default.into(),
        }
    }

    /// A provider that always returns the same rationale.
    pub fn constant(text: impl Into<String>) -> Self {
        Self::new(Vec::new(), text)
    }
}

#[async_trait]
impl NarrativeProvider for ScriptedNarrative {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        _request: &NarrativeRequest,
    ) -> std::result::Result<String, NarrativeError> {
        let mut responses = match self.responses.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let text = responses.pop_front().unwrap_or_else(|| self.default.clone());
        if text.trim().is_empty() {
            return Err(NarrativeError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Always fails with the given error. For exercising the no-fallback path.
pub struct FailingNarrative {
    error: NarrativeError,
}

impl FailingNarrative {
    pub fn new(error: NarrativeError) -> Self {
        Self { error }
    }

    pub fn unreachable() -> Self {
        Self::new(NarrativeError::Unreachable("connection refused".into()))
    }
}

#[async_trait]
impl NarrativeProvider for FailingNarrative {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(
        &self,
        _request: &NarrativeRequest,
    ) -> std::result::Result<String, NarrativeError> {
        Err(self.error.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aftercare_core::assessment::Grade;
    use aftercare_core::patient::RiskLevel;

    fn request() -> NarrativeRequest {
        NarrativeRequest {
            patient_id: "P001".into(),
            patient_name: "Test".into(),
            day: 1,
            score: 80.0,
            grade: Grade::B,
            missed_tasks: vec![],
            risk: RiskLevel::Low,
            risk_factors: vec![],
        }
    }

    #[tokio::test]
    async fn script_plays_in_order_then_falls_back() {
        let provider = ScriptedNarrative::new(
            vec!["first".into(), "second".into()],
            "default",
        );
        assert_eq!(provider.generate(&request()).await.unwrap(), "first");
        assert_eq!(provider.generate(&request()).await.unwrap(), "second");
        assert_eq!(provider.generate(&request()).await.unwrap(), "default");
        assert_eq!(provider.generate(&request()).await.unwrap(), "default");
    }

    #[tokio::test]
    async fn empty_script_entry_is_an_error() {
        let provider = ScriptedNarrative::new(vec!["   ".into()], "default");
        let err = provider.generate(&request()).await.unwrap_err();
        assert!(matches!(err, NarrativeError::EmptyResponse));
    }

    #[tokio::test]
    async fn failing_provider_always_errors() {
        let provider = FailingNarrative::unreachable();
        assert!(provider.generate(&request()).await.is_err());
        assert!(provider.generate(&request()).await.is_err());
    }
}
