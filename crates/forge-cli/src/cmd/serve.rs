use anyhow::Result;
use forge_core::Config;

pub fn run(port: u16) -> Result<()> {
    let config = Config::from_env();
    config.validate()?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        tokio::select! {
            res = forge_server::serve(&config, port) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                Ok(())
            }
        }
    })
}
