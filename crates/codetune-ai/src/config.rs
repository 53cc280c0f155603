//! Optimizer configuration.

use std::time::Duration;

use crate::ollama::{DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL};
use crate::prompt::{PromptTemplate, DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_PROMPT};

/// Default language named in the prompt.
pub const DEFAULT_LANGUAGE: &str = "JavaScript";

/// Default wait budget for a single inference request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the optimizer.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Ollama server URL
    pub base_url: String,
    /// Model to use (default: deepseek-coder-v2)
    pub model: String,
    /// Language the submitted code is written in
    pub language: String,
    /// System-role instruction
    pub system_prompt: PromptTemplate,
    /// User-role instruction wrapping the code
    pub user_prompt: PromptTemplate,
    /// Wait budget for the whole request
    pub timeout: Duration,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens to generate
    pub num_predict: i32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            system_prompt: PromptTemplate::new(DEFAULT_SYSTEM_PROMPT),
            user_prompt: PromptTemplate::new(DEFAULT_USER_PROMPT),
            timeout: DEFAULT_TIMEOUT,
            // Low temperature for deterministic rewrites
            temperature: 0.1,
            num_predict: 4096,
        }
    }
}

impl OptimizerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_url = lookup("CODETUNE_OLLAMA_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url);

        let model = lookup("CODETUNE_MODEL")
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.model);

        let language = lookup("CODETUNE_LANGUAGE")
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.language);

        let timeout = lookup("CODETUNE_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self {
            base_url,
            model,
            language,
            timeout,
            ..defaults
        }
    }

    /// Create a builder for configuration.
    pub fn builder() -> OptimizerConfigBuilder {
        OptimizerConfigBuilder::default()
    }
}

/// Builder for optimizer configuration.
#[derive(Debug, Default)]
pub struct OptimizerConfigBuilder {
    config: OptimizerConfig,
}

impl OptimizerConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.language = language.into();
        self
    }

    pub fn system_prompt(mut self, template: impl Into<String>) -> Self {
        self.config.system_prompt = PromptTemplate::new(template);
        self
    }

    pub fn user_prompt(mut self, template: impl Into<String>) -> Self {
        self.config.user_prompt = PromptTemplate::new(template);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    pub fn num_predict(mut self, tokens: i32) -> Self {
        self.config.num_predict = tokens;
        self
    }

    pub fn build(self) -> OptimizerConfig {
        self.config
    }
}
