//! End-to-end deployment pipeline.
//!
//! The `Orchestrator` owns every collaborator a deployment touches and runs
//! one request through the full sequence: authorize, synthesize a document,
//! provision (round 1) or update (round 2), then notify the evaluation
//! callback. Notification failure never fails a deployment that already
//! published.

use crate::config::Config;
use crate::error::{ForgeError, Result};
use crate::extract;
use crate::host::{GitHubHost, Hosting};
use crate::notify::Notifier;
use crate::poller::Poller;
use crate::prompt;
use crate::provision;
use crate::publish::SpacePublisher;
use crate::request::{self, DeployReceipt, DeployRequest, NotificationPayload};
use crate::state::RoundStore;
use crate::update;
use forge_agent::{FallbackGenerator, Generate, GeminiClient, OpenAiCompatClient};
use std::sync::Arc;
use std::time::Duration;

pub struct Orchestrator {
    secret: String,
    host: Arc<dyn Hosting>,
    generator: Arc<dyn Generate>,
    poller: Poller,
    notifier: Notifier,
    publisher: Option<SpacePublisher>,
    rounds: Arc<RoundStore>,
    round2_grace: Duration,
}

impl Orchestrator {
    pub fn new(
        secret: impl Into<String>,
        host: Arc<dyn Hosting>,
        generator: Arc<dyn Generate>,
        poller: Poller,
        notifier: Notifier,
        rounds: Arc<RoundStore>,
    ) -> Self {
        Self {
            secret: secret.into(),
            host,
            generator,
            poller,
            notifier,
            publisher: None,
            rounds,
            round2_grace: Duration::from_secs(10),
        }
    }

    pub fn with_publisher(mut self, publisher: Option<SpacePublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn with_round2_grace(mut self, grace: Duration) -> Self {
        self.round2_grace = grace;
        self
    }

    /// Assemble the full production pipeline from environment configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::new();

        let mut generator =
            FallbackGenerator::new(Box::new(GeminiClient::new(config.gemini_api_key.as_str())));
        if !config.fallback_api_key.is_empty() {
            generator = generator.with_fallback(Box::new(OpenAiCompatClient::new(
                config.fallback_api_key.as_str(),
            )));
        }

        let host = GitHubHost::new(config.owner.as_str(), config.token.as_str())
            .with_api_base(config.github_api_base.as_str());
        let rounds = Arc::new(RoundStore::open(&config.state_path)?);
        let notifier = Notifier::new(http.clone(), config.notify.clone())
            .with_dead_letter_dir(config.dead_letter_dir.clone());
        let publisher = config
            .hf_token
            .as_ref()
            .map(|token| SpacePublisher::new(config.owner.as_str(), token.as_str()));

        Ok(Self {
            secret: config.secret.clone(),
            host: Arc::new(host),
            generator: Arc::new(generator),
            poller: Poller::new(http, config.poll.clone()),
            notifier,
            publisher,
            rounds,
            round2_grace: config.round2_grace,
        })
    }

    /// Gate check, separated out so callers can reject a request before
    /// committing any resources to it.
    pub fn authorize(&self, req: &DeployRequest) -> Result<()> {
        if req.secret == self.secret {
            Ok(())
        } else {
            Err(ForgeError::Unauthorized)
        }
    }

    /// Run one deployment request to completion.
    pub async fn run(&self, req: &DeployRequest) -> Result<DeployReceipt> {
        self.authorize(req)?;
        match req.round {
            1 => self.round1(req).await,
            2 => self.round2(req).await,
            n => Err(ForgeError::InvalidRound(n)),
        }
    }

    // -----------------------------------------------------------------------
    // Rounds
    // -----------------------------------------------------------------------

    async fn round1(&self, req: &DeployRequest) -> Result<DeployReceipt> {
        let document = self.synthesize(req).await?;
        let name = request::round1_repo_name(&req.task, chrono::Utc::now());
        tracing::info!(task = %req.task, repo = %name, "round 1: provisioning");

        let published =
            provision::provision(self.host.as_ref(), &self.poller, &name, &document).await?;

        let space_url = match &self.publisher {
            Some(publisher) => publisher.publish(&name, &document).await,
            None => None,
        };

        let receipt = DeployReceipt {
            repo_name: name.clone(),
            repo_url: self.host.repo_url(&name),
            pages_url: published.pages_url,
            commit_sha: published.commit_sha,
            space_url,
        };

        // A later round 2 without an explicit target resolves through this
        // mapping; losing the write degrades that fallback but the artifact
        // itself is already published.
        if let Err(e) = self.rounds.record(&req.task, &name) {
            tracing::error!(task = %req.task, "failed to record round state: {e}");
        }

        self.notify(req, &receipt).await;
        Ok(receipt)
    }

    async fn round2(&self, req: &DeployRequest) -> Result<DeployReceipt> {
        // Resolve the target before spending a generation call on a request
        // that has nowhere to land.
        let name = self.resolve_target(req)?;
        let document = self.synthesize(req).await?;
        tracing::info!(task = %req.task, repo = %name, "round 2: updating");

        let published = update::update(self.host.as_ref(), &name, &document, &req.brief).await?;

        // Give the pages cache a moment to pick up the new content before
        // the callback triggers re-evaluation.
        if !self.round2_grace.is_zero() {
            tokio::time::sleep(self.round2_grace).await;
        }

        let receipt = DeployReceipt {
            repo_name: name.clone(),
            repo_url: self.host.repo_url(&name),
            pages_url: published.pages_url,
            commit_sha: published.commit_sha,
            space_url: None,
        };

        self.notify(req, &receipt).await;
        Ok(receipt)
    }

    // -----------------------------------------------------------------------
    // Shared steps
    // -----------------------------------------------------------------------

    fn resolve_target(&self, req: &DeployRequest) -> Result<String> {
        if let Some(name) = req
            .existing_repo_name
            .as_deref()
            .filter(|n| !n.is_empty())
        {
            return Ok(name.to_string());
        }
        self.rounds
            .resolve(&req.task)?
            .ok_or_else(|| ForgeError::MissingTarget(req.task.clone()))
    }

    async fn synthesize(&self, req: &DeployRequest) -> Result<String> {
        let prompt = prompt::build_prompt(&req.brief, &req.checks, &req.attachments);
        let raw = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| ForgeError::Generation(e.to_string()))?;
        let document = extract::extract_document(&raw);
        if document.is_empty() {
            return Err(ForgeError::Generation(
                "provider returned an empty document".to_string(),
            ));
        }
        Ok(document)
    }

    async fn notify(&self, req: &DeployRequest, receipt: &DeployReceipt) {
        let payload = NotificationPayload::new(req, receipt);
        if let Err(e) = self.notifier.dispatch(&req.evaluation_url, &payload).await {
            tracing::error!(task = %req.task, "evaluation notification undelivered: {e}");
        }
    }
}
