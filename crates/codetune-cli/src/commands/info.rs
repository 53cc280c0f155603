//! Info command - print the effective configuration.

use codetune_ai::OptimizerConfig;

pub(crate) fn run(config: &OptimizerConfig) -> miette::Result<()> {
    println!("{}", describe(config));
    Ok(())
}

fn describe(config: &OptimizerConfig) -> String {
    format!(
        "Codetune v{}\n\
         ===============\n\
         \n\
         Ollama URL:   {}\n\
         Model:        {}\n\
         Language:     {}\n\
         Timeout:      {}s\n\
         Temperature:  {}\n\
         Max tokens:   {}\n\
         \n\
         System prompt:\n{}\n\
         \n\
         User prompt:\n{}",
        env!("CARGO_PKG_VERSION"),
        config.base_url,
        config.model,
        config.language,
        config.timeout.as_secs(),
        config.temperature,
        config.num_predict,
        config.system_prompt.as_str(),
        config.user_prompt.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_lists_endpoint() {
        let config = OptimizerConfig::builder()
            .base_url("http://box:11434")
            .model("llama3")
            .build();
        let text = describe(&config);
        assert!(text.contains("Ollama URL:   http://box:11434"));
        assert!(text.contains("Model:        llama3"));
        assert!(text.contains("Timeout:      120s"));
        assert!(text.contains("{code}"));
    }
}
