//! HTTP client for the external narrative-generation service.
//!
//! Sends the rendered prompt to `POST {base_url}/generate` and expects a
//! JSON body with a `text` field. Requests are not retried: a failure here
//! is fatal to the patient-day's analysis.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use aftercare_core::error::NarrativeError;
use aftercare_core::narrative::{NarrativeProvider, NarrativeRequest};

pub struct HttpNarrative {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    text: String,
}

impl HttpNarrative {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }
}

#[async_trait]
impl NarrativeProvider for HttpNarrative {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(
        &self,
        request: &NarrativeRequest,
    ) -> std::result::Result<String, NarrativeError> {
        let url = format!("{}/generate", self.base_url);
        let body = serde_json::json!({ "prompt": request.prompt() });

        debug!(
            patient = %request.patient_id,
            day = request.day,
            "Requesting narrative rationale"
        );

        let mut http_request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {key}"));
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| NarrativeError::Unreachable(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let message = response.text().await.unwrap_or_default();
            warn!(status, body = %message, "Narrative service returned error");
            return Err(NarrativeError::Api {
                status_code: status,
                message,
            });
        }

        let generated: GenerateResponse =
            response.json().await.map_err(|e| NarrativeError::Api {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        let text = generated.text.trim().to_string();
        if text.is_empty() {
            return Err(NarrativeError::EmptyResponse);
        }
        Ok(text)
    }
}
