//! Optimizer - the main entry point for code optimization requests.

use tracing::{debug, info, warn};

use crate::config::OptimizerConfig;
use crate::ollama::{CompletionBackend, OllamaClient};
use crate::prompt::Prompt;
use crate::result::{OptimizationRequest, OptimizationResult};

/// Sample submitted by the demo command.
pub const DEMO_SOURCE: &str = "function add(a,b){return a+b;}";

/// Submits code to an inference backend and normalizes the outcome.
///
/// Each call is independent: no shared mutable state, no retries, no
/// caching. Concurrent calls are not serialized here; the endpoint decides
/// how to schedule them.
pub struct Optimizer<B = OllamaClient> {
    config: OptimizerConfig,
    backend: B,
}

impl Optimizer<OllamaClient> {
    /// Create an optimizer backed by an Ollama server.
    pub fn new(config: OptimizerConfig) -> Self {
        let backend = OllamaClient::from_config(&config);
        Self { config, backend }
    }

    /// The underlying Ollama client.
    pub fn client(&self) -> &OllamaClient {
        &self.backend
    }
}

impl<B: CompletionBackend> Optimizer<B> {
    /// Create an optimizer with a custom backend.
    pub fn with_backend(config: OptimizerConfig, backend: B) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Render the two-part prompt for some code.
    pub fn prompt_for(&self, source_code: &str) -> Prompt {
        Prompt::build(
            &self.config.system_prompt,
            &self.config.user_prompt,
            &self.config.language,
            source_code,
        )
    }

    /// Ask the model for an optimized version of `source_code`.
    ///
    /// Never fails: endpoint errors produce a result that carries the
    /// original code and the error text.
    pub async fn optimize(&self, source_code: &str) -> OptimizationResult {
        info!(
            "Optimizing {} bytes of {} with {}",
            source_code.len(),
            self.config.language,
            self.backend.model()
        );

        let prompt = self.prompt_for(source_code);
        debug!("User prompt:\n{}", prompt.user);

        match self.backend.complete(&prompt.system, &prompt.user).await {
            Ok(response) => {
                info!("Received {} bytes from model", response.len());
                OptimizationResult::success(source_code, response)
            }
            Err(e) => {
                warn!("Optimization failed, returning original code: {}", e);
                OptimizationResult::failure(source_code, e.to_string())
            }
        }
    }

    /// Same as [`optimize`](Self::optimize) for a request value.
    pub async fn submit(&self, request: &OptimizationRequest) -> OptimizationResult {
        self.optimize(&request.source_code).await
    }
}
