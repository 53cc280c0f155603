//! Ollama API client for local LLM inference.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::{OptimizerConfig, DEFAULT_TIMEOUT};

/// Default Ollama server URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default model for code optimization.
pub const DEFAULT_OLLAMA_MODEL: &str = "deepseek-coder-v2";

/// Something that can answer a two-part prompt.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send a system and user message, returning the generated text.
    async fn complete(&self, system: &str, user_message: &str) -> Result<String, OllamaError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

/// Ollama API client.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Duration,
    temperature: f32,
    num_predict: i32,
}

/// Errors from the Ollama client.
#[derive(Debug, Error)]
pub enum OllamaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Ollama API error: {0}")]
    Api(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Ollama server not running at {0}. Start it with: ollama serve")]
    ServerNotRunning(String),
    #[error("No response from Ollama within {0:?}")]
    Timeout(Duration),
    #[error("Model '{0}' not found. Pull it with: ollama pull {0}")]
    ModelNotFound(String),
}

/// Request to Ollama generate API.
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: Option<&'a str>,
    stream: bool,
    options: Option<OllamaOptions>,
}

/// Ollama generation options.
#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: i32,
}

/// Response from Ollama generate API.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
    #[allow(dead_code)]
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Response from Ollama tags API (list models).
#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    models: Vec<OllamaModel>,
}

#[derive(Debug, Deserialize)]
struct OllamaModel {
    name: String,
}

impl OllamaClient {
    /// Create a new Ollama client with default settings.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_OLLAMA_URL, DEFAULT_OLLAMA_MODEL)
    }

    /// Create a new Ollama client with custom URL and model.
    pub fn with_config(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
            temperature: 0.1,
            num_predict: 4096,
        }
    }

    /// Create a client from optimizer configuration.
    pub fn from_config(config: &OptimizerConfig) -> Self {
        Self::with_config(config.base_url.clone(), config.model.clone())
            .with_timeout(config.timeout)
            .with_options(config.temperature, config.num_predict)
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the wait budget applied to each request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set generation options.
    pub fn with_options(mut self, temperature: f32, num_predict: i32) -> Self {
        self.temperature = temperature;
        self.num_predict = num_predict;
        self
    }

    /// Check if Ollama server is running and model is available.
    pub async fn check_availability(&self) -> Result<(), OllamaError> {
        let tags_url = self.endpoint("api/tags");
        let response = self
            .client
            .get(&tags_url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(OllamaError::ServerNotRunning(self.base_url.clone()));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let tags: OllamaTagsResponse = serde_json::from_str(&body)?;

        if !has_model(&tags.models, &self.model) {
            return Err(OllamaError::ModelNotFound(self.model.clone()));
        }

        Ok(())
    }

    /// Send a prompt to Ollama and get a response.
    pub async fn complete(&self, system: &str, user_message: &str) -> Result<String, OllamaError> {
        let request = OllamaRequest {
            model: &self.model,
            prompt: user_message,
            system: Some(system),
            stream: false,
            options: Some(OllamaOptions {
                temperature: self.temperature,
                num_predict: self.num_predict,
            }),
        };

        let url = self.endpoint("api/generate");
        debug!("POST {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        // Ollama answers 404 with "model '...' not found" for unpulled models.
        if status == reqwest::StatusCode::NOT_FOUND && body.contains("not found") {
            return Err(OllamaError::ModelNotFound(self.model.clone()));
        }

        if !status.is_success() {
            return Err(OllamaError::Api(format!("{}: {}", status, body)));
        }

        let response: OllamaResponse = serde_json::from_str(&body)?;

        if let Some(error) = response.error {
            return Err(OllamaError::Api(error));
        }

        Ok(response.response)
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the per-request wait budget.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn transport_error(&self, e: reqwest::Error) -> OllamaError {
        if e.is_timeout() {
            OllamaError::Timeout(self.timeout)
        } else if e.is_connect() {
            OllamaError::ServerNotRunning(self.base_url.clone())
        } else {
            OllamaError::Http(e)
        }
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionBackend for OllamaClient {
    async fn complete(&self, system: &str, user_message: &str) -> Result<String, OllamaError> {
        OllamaClient::complete(self, system, user_message).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// A tagged model must match exactly; an untagged one resolves to `:latest`.
fn has_model(models: &[OllamaModel], wanted: &str) -> bool {
    let latest = if wanted.contains(':') {
        None
    } else {
        Some(format!("{}:latest", wanted))
    };

    models
        .iter()
        .any(|m| m.name == wanted || latest.as_deref() == Some(m.name.as_str()))
}
