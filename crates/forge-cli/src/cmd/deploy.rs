use anyhow::{Context, Result};
use forge_core::{Config, DeployRequest, Orchestrator};
use std::path::Path;

/// One-shot deployment: read a request from disk, run the full pipeline,
/// print the receipt as JSON.
pub fn run(file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let req: DeployRequest =
        serde_json::from_str(&raw).context("parsing deployment request")?;

    let config = Config::from_env();
    config.validate()?;

    let rt = tokio::runtime::Runtime::new()?;
    let receipt = rt.block_on(async {
        let orchestrator = Orchestrator::from_config(&config)?;
        orchestrator.run(&req).await
    })?;

    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}
