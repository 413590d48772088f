//! Outcome notification with bounded exponential backoff.
//!
//! Delivery is at-least-once within a fixed budget: POST, and on anything
//! other than HTTP 200 sleep, double the delay up to a cap, and try again
//! until the cumulative wait would exceed the budget. Exhaustion is reported
//! to the caller but deliberately non-fatal for the deployment itself.

use crate::error::{ForgeError, Result};
use crate::request::NotificationPayload;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct NotifyPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub budget: Duration,
}

impl Default for NotifyPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(60),
            budget: Duration::from_secs(600),
        }
    }
}

pub struct Notifier {
    http: reqwest::Client,
    policy: NotifyPolicy,
    /// When set, exhausted notifications are written here as JSON records
    /// instead of being dropped.
    dead_letter_dir: Option<PathBuf>,
}

impl Notifier {
    pub fn new(http: reqwest::Client, policy: NotifyPolicy) -> Self {
        Self {
            http,
            policy,
            dead_letter_dir: None,
        }
    }

    pub fn with_dead_letter_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.dead_letter_dir = dir;
        self
    }

    /// Deliver `payload` to `url`. Success is strictly HTTP 200.
    ///
    /// Returns `Err(ForgeError::Notification)` once the retry budget is
    /// exhausted; never panics and never retries past the budget.
    pub async fn dispatch(&self, url: &str, payload: &NotificationPayload) -> Result<()> {
        let mut delay = self.policy.initial_delay;
        let mut waited = Duration::ZERO;
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            match self.http.post(url).json(payload).send().await {
                Ok(resp) if resp.status() == reqwest::StatusCode::OK => {
                    tracing::info!("evaluation callback acknowledged after {attempts} attempt(s)");
                    return Ok(());
                }
                Ok(resp) => {
                    tracing::warn!("callback attempt {attempts} returned {}", resp.status());
                }
                Err(e) => {
                    tracing::warn!("callback attempt {attempts} failed: {e}");
                }
            }

            if waited + delay > self.policy.budget {
                break;
            }
            tokio::time::sleep(delay).await;
            waited += delay;
            delay = std::cmp::min(delay * 2, self.policy.max_delay);
        }

        self.record_dead_letter(url, payload);
        Err(ForgeError::Notification(format!(
            "no 200 from {url} after {attempts} attempts within {:?}",
            self.policy.budget
        )))
    }

    fn record_dead_letter(&self, url: &str, payload: &NotificationPayload) {
        let Some(dir) = &self.dead_letter_dir else {
            tracing::warn!("dropping unacknowledged notification for {url}");
            return;
        };

        let record = serde_json::json!({
            "url": url,
            "payload": payload,
            "failed_at": chrono::Utc::now(),
        });
        let filename = format!(
            "dead-letter-{}-{}.json",
            chrono::Utc::now().format("%Y%m%d%H%M%S"),
            payload.nonce
        );
        let path = dir.join(filename);
        if let Err(e) = std::fs::create_dir_all(dir)
            .and_then(|_| std::fs::write(&path, record.to_string()))
        {
            tracing::error!("failed to write dead-letter record {}: {e}", path.display());
        } else {
            tracing::warn!("notification dead-lettered to {}", path.display());
        }
    }
}
