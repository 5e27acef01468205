//! Natural-language summary of a result, delegated to a text-generation service.
//!
//! The service is opaque: a prompt goes in, prose comes out. Every attempt is
//! bounded by a timeout, a retryable failure gets one more attempt, and after
//! that the caller receives [`FALLBACK_TEXT`]. Nothing here ever fails upward.

use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::config::InterpretationConfig;
use crate::core::timing;

use super::model::{FeatureImportance, Prediction};

pub const FALLBACK_TEXT: &str = "Unable to generate AI interpretation at this time. Please refer to the feature importance chart below.";

#[derive(Debug, thiserror::Error)]
pub enum InterpretationError {
    #[error("no API key configured for the interpretation service")]
    MissingApiKey,
    #[error("interpretation request timed out after {0:?}")]
    Timeout(Duration),
    #[error("interpretation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("interpretation service answered with status {0}")]
    Status(u16),
    #[error("interpretation service returned no text")]
    EmptyResponse,
}

impl InterpretationError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Http(_) => true,
            Self::Status(code) => *code == 429 || *code >= 500,
            Self::MissingApiKey | Self::EmptyResponse => false,
        }
    }
}

/// A prompt-in, text-out collaborator.
pub trait InterpretationBackend {
    fn generate<'a>(&'a self, prompt: &'a str)
        -> LocalBoxFuture<'a, Result<String, InterpretationError>>;
}

pub fn build_prompt(prediction: Prediction, features: &[FeatureImportance]) -> String {
    let listed = features
        .iter()
        .map(|f| format!("{}: {:.4}", f.feature(), f.value()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "As a senior oncology AI specialist, interpret these SHAP values for a breast cancer diagnosis.\n\
         Prediction: {prediction}\n\
         Features: {listed}\n\
         Provide a concise clinical summary (max 100 words) explaining why the model reached this \
         conclusion based on these specific feature contributions. Use professional but accessible terminology."
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretationSource {
    Generated,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub text: String,
    pub source: InterpretationSource,
    pub attempts: u32,
}

#[derive(Clone)]
pub struct Interpreter {
    backend: Rc<dyn InterpretationBackend>,
    timeout: Duration,
    max_attempts: u32,
}

impl Interpreter {
    pub fn new(backend: Rc<dyn InterpretationBackend>, timeout: Duration, max_attempts: u32) -> Self {
        Self {
            backend,
            timeout,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(config: &InterpretationConfig) -> Self {
        Self::new(
            Rc::new(GeminiBackend::new(config)),
            config.timeout,
            config.max_attempts,
        )
    }

    pub async fn interpret(
        &self,
        prediction: Prediction,
        features: &[FeatureImportance],
    ) -> Interpretation {
        let prompt = build_prompt(prediction, features);
        let mut attempts = 0;

        while attempts < self.max_attempts {
            attempts += 1;
            let outcome = timing::with_timeout(self.timeout, self.backend.generate(&prompt))
                .await
                .unwrap_or_else(|elapsed| Err(InterpretationError::Timeout(elapsed.0)));

            match outcome {
                Ok(text) if !text.trim().is_empty() => {
                    info!(attempts, %prediction, "interpretation generated");
                    return Interpretation {
                        text: text.trim().to_string(),
                        source: InterpretationSource::Generated,
                        attempts,
                    };
                }
                Ok(_) => {
                    warn!(attempts, "interpretation service returned blank text");
                    break;
                }
                Err(err) if err.is_retryable() && attempts < self.max_attempts => {
                    warn!(attempts, error = %err, "interpretation attempt failed, retrying");
                }
                Err(err) => {
                    warn!(attempts, error = %err, "interpretation failed, using fallback");
                    break;
                }
            }
        }

        Interpretation {
            text: FALLBACK_TEXT.to_string(),
            source: InterpretationSource::Fallback,
            attempts,
        }
    }
}

/// Google Generative Language `generateContent` client.
pub struct GeminiBackend {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<OutgoingPart<'a>>,
}

#[derive(Debug, Serialize)]
struct OutgoingPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<IncomingPart>,
}

#[derive(Debug, Deserialize)]
struct IncomingPart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

impl GeminiBackend {
    pub fn new(config: &InterpretationConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    async fn request(&self, prompt: &str) -> Result<String, InterpretationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(InterpretationError::MissingApiKey)?;

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![OutgoingPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InterpretationError::Status(status.as_u16()));
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.into_text().ok_or(InterpretationError::EmptyResponse)
    }
}

impl InterpretationBackend for GeminiBackend {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> LocalBoxFuture<'a, Result<String, InterpretationError>> {
        self.request(prompt).boxed_local()
    }
}
