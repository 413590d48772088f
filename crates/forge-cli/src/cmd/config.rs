use anyhow::Result;
use clap::Subcommand;
use forge_core::Config;

// ---------------------------------------------------------------------------
// Subcommand definition
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Verify required environment variables and tools are present
    Check,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn run(subcommand: ConfigSubcommand) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Check => run_check(),
    }
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

fn run_check() -> Result<()> {
    let config = Config::from_env();
    let missing = config.missing();

    let git = which::which("git");
    match &git {
        Ok(path) => println!("git: {}", path.display()),
        Err(_) => println!("git: NOT FOUND"),
    }

    if config.fallback_api_key.is_empty() {
        println!("fallback provider: disabled (FALLBACK_API_KEY unset)");
    } else {
        println!("fallback provider: enabled");
    }

    if config.hf_token.is_some() {
        println!("secondary publish: enabled");
    } else {
        println!("secondary publish: disabled (HF_TOKEN unset)");
    }

    match config.dead_letter_dir {
        Some(dir) => println!("dead-letter dir: {}", dir.display()),
        None => println!("dead-letter dir: unset (exhausted notifications are dropped)"),
    }

    if !missing.is_empty() {
        anyhow::bail!(
            "missing required environment variables: {}",
            missing.join(", ")
        );
    }
    if git.is_err() {
        anyhow::bail!("git binary not found on PATH");
    }

    println!("configuration ok");
    Ok(())
}
