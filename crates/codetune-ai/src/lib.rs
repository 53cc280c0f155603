//! # Codetune AI
//!
//! Sends source code to a locally running language model and returns the
//! suggested rewrite.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐
//! │  Source Code    │ --> │    Optimizer    │ --> │  Optimization   │
//! │  (opaque text)  │     │  (prompt + AI)  │     │  Result         │
//! └─────────────────┘     └─────────────────┘     └─────────────────┘
//!                               │
//!                         ┌─────┴─────┐
//!                         │  Ollama   │
//!                         └───────────┘
//! ```
//!
//! The optimizer never fails: endpoint errors are folded into the returned
//! [`OptimizationResult`], which then carries the original code unchanged.
//!
//! ## Usage
//!
//! ```ignore
//! use codetune_ai::{Optimizer, OptimizerConfig};
//!
//! let optimizer = Optimizer::new(OptimizerConfig::default());
//! let result = optimizer.optimize("function add(a,b){return a+b;}").await;
//!
//! println!("{}", result.optimized_code());
//! ```

mod config;
mod ollama;
mod optimizer;
pub mod prompt;
mod result;

#[cfg(test)]
mod testing;

pub use config::{OptimizerConfig, OptimizerConfigBuilder};
pub use ollama::{
    CompletionBackend, OllamaClient, OllamaError, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL,
};
pub use optimizer::{Optimizer, DEMO_SOURCE};
pub use prompt::{Prompt, PromptTemplate};
pub use result::{OptimizationRequest, OptimizationResult};
