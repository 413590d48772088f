use crate::{AgentError, Generate, Result};

/// Two-arm generation strategy: try the primary provider once; on failure,
/// try the fallback provider exactly once; then fail.
///
/// This replaces retry-flag-and-recurse schemes with a deterministic bound:
/// at most two provider calls per `generate`.
pub struct FallbackGenerator {
    primary: Box<dyn Generate>,
    fallback: Option<Box<dyn Generate>>,
}

impl FallbackGenerator {
    pub fn new(primary: Box<dyn Generate>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn Generate>) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

#[async_trait::async_trait]
impl Generate for FallbackGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let primary_err = match self.primary.generate(prompt).await {
            Ok(text) => return Ok(text),
            Err(e) => e,
        };

        tracing::warn!("primary generation provider failed: {primary_err}");

        match &self.fallback {
            Some(fb) => fb.generate(prompt).await.map_err(|fallback_err| {
                AgentError::BothFailed {
                    primary: primary_err.to_string(),
                    fallback: fallback_err.to_string(),
                }
            }),
            None => Err(AgentError::NoFallback(primary_err.to_string())),
        }
    }
}
