use crate::jobs::JobRegistry;
use forge_core::{Config, Orchestrator};
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub jobs: JobRegistry,
}

impl AppState {
    pub fn from_config(config: &Config) -> forge_core::Result<Self> {
        Ok(Self::with_orchestrator(Arc::new(Orchestrator::from_config(
            config,
        )?)))
    }

    pub fn with_orchestrator(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            orchestrator,
            jobs: JobRegistry::default(),
        }
    }
}
