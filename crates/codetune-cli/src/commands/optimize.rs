//! Optimize command - send a file (or stdin) to the model.

use codetune_ai::{OptimizationResult, Optimizer, OptimizerConfig};
use std::io::Read;
use std::path::Path;

/// How to print a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputMode {
    /// Human-readable report with status and code
    Report,
    /// The whole result as JSON
    Json,
    /// Only the code, unfenced
    Code,
}

impl OutputMode {
    pub(crate) fn from_flags(json: bool, extract: bool) -> Self {
        match (json, extract) {
            (true, _) => OutputMode::Json,
            (false, true) => OutputMode::Code,
            (false, false) => OutputMode::Report,
        }
    }
}

pub(crate) async fn run(
    config: OptimizerConfig,
    file: Option<&Path>,
    mode: OutputMode,
) -> miette::Result<()> {
    let source = read_source(file, std::io::stdin().lock())?;

    let optimizer = Optimizer::new(config);
    let result = optimizer.optimize(&source).await;

    print!("{}", render(&result, mode)?);
    Ok(())
}

fn read_source(file: Option<&Path>, mut stdin: impl Read) -> miette::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e)),
        None => {
            let mut source = String::new();
            stdin
                .read_to_string(&mut source)
                .map_err(|e| miette::miette!("Failed to read stdin: {}", e))?;
            Ok(source)
        }
    }
}

/// Format a result for the terminal.
pub(crate) fn render(result: &OptimizationResult, mode: OutputMode) -> miette::Result<String> {
    let text = match mode {
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(result)
                .map_err(|e| miette::miette!("Failed to serialize result: {}", e))?;
            format!("{}\n", json)
        }
        OutputMode::Code => format!("{}\n", result.code_block()),
        OutputMode::Report => {
            if result.succeeded() {
                format!("Optimization successful!\n\n{}\n", result.optimized_code())
            } else {
                format!(
                    "Optimization failed: {}\nOriginal code returned unchanged:\n\n{}\n",
                    result.error_message().unwrap_or("unknown error"),
                    result.optimized_code()
                )
            }
        }
    };

    Ok(text)
}
