//! `forge-core` — the deployment orchestration pipeline.
//!
//! A deployment request arrives with a natural-language brief. Round 1
//! synthesizes a site document, provisions a fresh repository, publishes it,
//! and notifies a callback; Round 2 mutates the artifact a prior Round 1
//! produced. The pipeline tolerates partial failure at every stage and
//! guarantees ephemeral-workspace cleanup on every exit path.

pub mod config;
pub mod error;
pub mod extract;
pub mod git;
pub mod host;
pub mod notify;
pub mod pipeline;
pub mod poller;
pub mod prompt;
pub mod provision;
pub mod publish;
pub mod request;
pub mod state;
pub mod update;
pub mod workspace;

#[cfg(test)]
mod testutil;

pub use config::Config;
pub use error::{ForgeError, Result};
pub use host::{GitHubHost, Hosting};
pub use pipeline::Orchestrator;
pub use request::{Attachment, DeployReceipt, DeployRequest, NotificationPayload};
pub use state::RoundStore;
