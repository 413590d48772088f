use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("provider returned an empty response")]
    EmptyResponse,

    #[error("primary failed: {primary}; fallback failed: {fallback}")]
    BothFailed { primary: String, fallback: String },

    #[error("primary failed and no fallback provider is configured: {0}")]
    NoFallback(String),
}
