//! Demo command - optimize a built-in sample.

use codetune_ai::{Optimizer, OptimizerConfig, DEMO_SOURCE};

use super::optimize::{render, OutputMode};

pub(crate) async fn run(config: OptimizerConfig) -> miette::Result<()> {
    println!("Sample ({}):\n", config.language);
    println!("{}\n", DEMO_SOURCE);
    println!("Asking {} at {}...\n", config.model, config.base_url);

    let optimizer = Optimizer::new(config);
    let result = optimizer.optimize(DEMO_SOURCE).await;

    print!("{}", render(&result, OutputMode::Report)?);
    Ok(())
}
