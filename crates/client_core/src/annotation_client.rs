//! Annotation client: input policy, the HTTP round trip, and normalization into session events.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::Annotation;
use tracing::{info, warn};
use url::Url;

use crate::{
    config::{Settings, DEFAULT_EXAMPLES},
    error::{ConfigError, SubmitError},
    session::SessionEvent,
};

pub const PREDICT_SEMANTICS_PATH: &str = "predict/semantics";

/// Fixed pool of example sentences handed out round-robin.
#[derive(Debug)]
pub struct ExamplePool {
    examples: Vec<String>,
    cursor: AtomicUsize,
}

impl ExamplePool {
    pub fn new(examples: Vec<String>) -> Self {
        Self {
            examples,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn next_example(&self) -> Option<&str> {
        if self.examples.is_empty() {
            return None;
        }
        let slot = self.cursor.fetch_add(1, Ordering::Relaxed) % self.examples.len();
        Some(self.examples[slot].as_str())
    }
}

/// Pre-network checks; runs synchronously on the caller's thread.
#[derive(Debug)]
pub struct SubmissionPolicy {
    max_length: usize,
    examples: ExamplePool,
}

impl SubmissionPolicy {
    /// An empty `examples` list falls back to [`DEFAULT_EXAMPLES`].
    pub fn new(max_length: usize, examples: Vec<String>) -> Self {
        let examples = if examples.is_empty() {
            DEFAULT_EXAMPLES.iter().map(|s| s.to_string()).collect()
        } else {
            examples
        };
        Self {
            max_length,
            examples: ExamplePool::new(examples),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.max_utterance_length, settings.examples.clone())
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Effective utterance to send: the input, or the next example when the input is empty.
    pub fn prepare(&self, text: &str) -> Result<String, SubmitError> {
        let effective = if text.is_empty() {
            self.examples.next_example().unwrap_or_default()
        } else {
            text
        };

        let length = effective.chars().count();
        if length > self.max_length {
            return Err(SubmitError::InputTooLong {
                length,
                max: self.max_length,
            });
        }
        Ok(effective.to_string())
    }
}

#[async_trait]
pub trait AnnotationService: Send + Sync {
    async fn annotate(&self, utterance: &str) -> Result<Annotation, SubmitError>;
}

/// Stand-in used before an endpoint is configured.
pub struct MissingAnnotationService;

#[async_trait]
impl AnnotationService for MissingAnnotationService {
    async fn annotate(&self, _utterance: &str) -> Result<Annotation, SubmitError> {
        Err(SubmitError::Transport(
            "no annotation service endpoint configured".to_string(),
        ))
    }
}

pub struct HttpAnnotationService {
    http: Client,
    endpoint: Url,
}

impl HttpAnnotationService {
    pub fn new(base_url: &Url) -> Result<Self, ConfigError> {
        let endpoint = base_url
            .join(PREDICT_SEMANTICS_PATH)
            .map_err(|source| ConfigError::InvalidServiceUrl {
                url: base_url.to_string(),
                source,
            })?;
        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Self::new(&settings.service_base_url()?)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AnnotationService for HttpAnnotationService {
    async fn annotate(&self, utterance: &str) -> Result<Annotation, SubmitError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[("utterance", utterance)])
            .send()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Service {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;
        let annotation: Annotation = serde_json::from_slice(&body)
            .map_err(|err| SubmitError::MalformedResponse(err.to_string()))?;
        annotation
            .validate()
            .map_err(|err| SubmitError::MalformedResponse(err.to_string()))?;
        Ok(annotation)
    }
}

/// Normalizes a settled request into the lifecycle event for `generation`.
pub fn lifecycle_event(generation: u64, result: Result<Annotation, SubmitError>) -> SessionEvent {
    match result {
        Ok(annotation) => SessionEvent::SubmitSucceeded {
            generation,
            annotation,
        },
        Err(err) => {
            warn!(generation, error = %err, "annotation submission failed");
            SessionEvent::SubmitFailed {
                generation,
                message: err.user_message(),
            }
        }
    }
}

pub struct AnnotationClient<S: AnnotationService> {
    service: S,
    policy: SubmissionPolicy,
}

impl<S: AnnotationService> AnnotationClient<S> {
    pub fn new(service: S, policy: SubmissionPolicy) -> Self {
        Self { service, policy }
    }

    pub fn policy(&self) -> &SubmissionPolicy {
        &self.policy
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// One round trip; input-policy failures return before any request is made.
    pub async fn submit(&self, text: &str) -> Result<Annotation, SubmitError> {
        let utterance = self.policy.prepare(text)?;
        info!(chars = utterance.chars().count(), "submitting utterance");
        self.service.annotate(&utterance).await
    }

    pub async fn submit_for(&self, text: &str, generation: u64) -> SessionEvent {
        lifecycle_event(generation, self.submit(text).await)
    }
}

impl AnnotationClient<HttpAnnotationService> {
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self::new(
            HttpAnnotationService::from_settings(settings)?,
            SubmissionPolicy::from_settings(settings),
        ))
    }
}

#[cfg(test)]
#[path = "tests/annotation_client_tests.rs"]
mod tests;
