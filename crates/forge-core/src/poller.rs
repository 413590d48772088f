//! Publication-readiness poller.
//!
//! Pages propagation is eventually consistent; the poller probes the public
//! URL until it answers successfully or the budget elapses. A timeout is not
//! an error for the caller — the site may still be propagating.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Delay before the second probe.
    pub initial_delay: Duration,
    /// Additive increase applied after each probe.
    pub delay_step: Duration,
    /// Ceiling for the per-probe delay.
    pub max_delay: Duration,
    /// Total wait budget across all probes.
    pub budget: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(5),
            delay_step: Duration::from_secs(5),
            max_delay: Duration::from_secs(30),
            budget: Duration::from_secs(600),
        }
    }
}

pub struct Poller {
    http: reqwest::Client,
    policy: PollPolicy,
}

impl Poller {
    pub fn new(http: reqwest::Client, policy: PollPolicy) -> Self {
        Self { http, policy }
    }

    /// Probe `url` until it answers with a success status or the budget is
    /// spent. Returns whether the URL became reachable. All waits are
    /// `tokio::time::sleep`, so the future is cancellable at any await point.
    pub async fn wait_until_live(&self, url: &str) -> bool {
        let mut delay = self.policy.initial_delay;
        let mut waited = Duration::ZERO;

        loop {
            match self.http.get(url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    tracing::info!("{url} is live");
                    return true;
                }
                Ok(resp) => {
                    tracing::debug!("{url} not ready yet: {}", resp.status());
                }
                Err(e) => {
                    tracing::debug!("{url} not reachable yet: {e}");
                }
            }

            if waited + delay > self.policy.budget {
                tracing::warn!("{url} did not become reachable within {:?}", self.policy.budget);
                return false;
            }
            tokio::time::sleep(delay).await;
            waited += delay;
            delay = std::cmp::min(delay + self.policy.delay_step, self.policy.max_delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_policy() -> PollPolicy {
        PollPolicy {
            initial_delay: Duration::from_millis(10),
            delay_step: Duration::from_millis(10),
            max_delay: Duration::from_millis(20),
            budget: Duration::from_millis(100),
        }
    }

    #[tokio::test]
    async fn immediate_success_returns_true_after_one_probe() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/site/")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let poller = Poller::new(reqwest::Client::new(), fast_policy());
        assert!(poller.wait_until_live(&format!("{}/site/", server.url())).await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn gives_up_within_budget() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/site/")
            .with_status(404)
            .expect_at_least(2)
            .create_async()
            .await;

        let poller = Poller::new(reqwest::Client::new(), fast_policy());
        let start = std::time::Instant::now();
        assert!(!poller.wait_until_live(&format!("{}/site/", server.url())).await);
        // Budget is 100ms of sleeping; generous ceiling for CI jitter.
        assert!(start.elapsed() < Duration::from_secs(5));
        mock.assert_async().await;
    }
}
