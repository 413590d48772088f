//! Environment-driven process configuration.
//!
//! Every knob comes from the environment so the server, the one-shot CLI,
//! and the container image all configure the same way. `validate` reports
//! which required variables are missing without touching any collaborator.

use crate::notify::NotifyPolicy;
use crate::poller::PollPolicy;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Hosting account that owns created repositories (GITHUB_USERNAME).
    pub owner: String,
    /// Hosting credential (GITHUB_TOKEN).
    pub token: String,
    /// Shared secret the gate compares against (PAGEFORGE_SECRET).
    pub secret: String,
    /// Primary generation provider key (GEMINI_API_KEY).
    pub gemini_api_key: String,
    /// Fallback provider key (FALLBACK_API_KEY); empty disables the fallback.
    pub fallback_api_key: String,
    /// Secondary static publisher token (HF_TOKEN); unset skips that publish.
    pub hf_token: Option<String>,
    /// Hosting API base; overridable for tests (PAGEFORGE_GITHUB_API).
    pub github_api_base: String,
    /// Round-state database path (PAGEFORGE_STATE).
    pub state_path: PathBuf,
    /// When set, exhausted notifications are recorded here as JSON
    /// (PAGEFORGE_DEAD_LETTER_DIR); when unset they are dropped with a warning.
    pub dead_letter_dir: Option<PathBuf>,
    /// Availability poller timing.
    pub poll: PollPolicy,
    /// Notification dispatcher timing.
    pub notify: NotifyPolicy,
    /// Pause after a Round-2 push so the pages cache can refresh
    /// (PAGEFORGE_ROUND2_GRACE_SECS, default 10).
    pub round2_grace: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let grace_secs = env_parse("PAGEFORGE_ROUND2_GRACE_SECS", 10u64);
        Self {
            owner: env_or("GITHUB_USERNAME", ""),
            token: env_or("GITHUB_TOKEN", ""),
            secret: env_or("PAGEFORGE_SECRET", ""),
            gemini_api_key: env_or("GEMINI_API_KEY", ""),
            fallback_api_key: env_or("FALLBACK_API_KEY", ""),
            hf_token: std::env::var("HF_TOKEN").ok().filter(|t| !t.is_empty()),
            github_api_base: env_or("PAGEFORGE_GITHUB_API", "https://api.github.com"),
            state_path: PathBuf::from(env_or("PAGEFORGE_STATE", "pageforge-state.redb")),
            dead_letter_dir: std::env::var("PAGEFORGE_DEAD_LETTER_DIR")
                .ok()
                .filter(|d| !d.is_empty())
                .map(PathBuf::from),
            poll: PollPolicy::default(),
            notify: NotifyPolicy::default(),
            round2_grace: Duration::from_secs(grace_secs),
        }
    }

    /// Names of required variables that are unset or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.owner.is_empty() {
            missing.push("GITHUB_USERNAME");
        }
        if self.token.is_empty() {
            missing.push("GITHUB_TOKEN");
        }
        if self.secret.is_empty() {
            missing.push("PAGEFORGE_SECRET");
        }
        if self.gemini_api_key.is_empty() {
            missing.push("GEMINI_API_KEY");
        }
        missing
    }

    pub fn validate(&self) -> crate::Result<()> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(crate::ForgeError::Host(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )))
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> Config {
        Config {
            owner: String::new(),
            token: String::new(),
            secret: String::new(),
            gemini_api_key: String::new(),
            fallback_api_key: String::new(),
            hf_token: None,
            github_api_base: "https://api.github.com".into(),
            state_path: PathBuf::from("state.redb"),
            dead_letter_dir: None,
            poll: PollPolicy::default(),
            notify: NotifyPolicy::default(),
            round2_grace: Duration::from_secs(10),
        }
    }

    #[test]
    fn missing_lists_all_unset_required_vars() {
        let cfg = blank();
        let missing = cfg.missing();
        assert_eq!(
            missing,
            vec![
                "GITHUB_USERNAME",
                "GITHUB_TOKEN",
                "PAGEFORGE_SECRET",
                "GEMINI_API_KEY"
            ]
        );
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn complete_config_validates() {
        let mut cfg = blank();
        cfg.owner = "octo".into();
        cfg.token = "t".into();
        cfg.secret = "s".into();
        cfg.gemini_api_key = "g".into();
        assert!(cfg.missing().is_empty());
        assert!(cfg.validate().is_ok());
    }
}
