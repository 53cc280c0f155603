//! Check command - verify the inference server and model.

use codetune_ai::{OllamaClient, OptimizerConfig};

pub(crate) async fn run(config: OptimizerConfig) -> miette::Result<()> {
    let client = OllamaClient::from_config(&config);

    println!("Checking {} for model {}...", client.base_url(), client.model());

    client
        .check_availability()
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    println!("  Server is running and model is available.");
    Ok(())
}
