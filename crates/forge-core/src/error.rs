use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("unauthorized: secret mismatch")]
    Unauthorized,

    #[error("round must be 1 or 2, got {0}")]
    InvalidRound(u8),

    #[error("no target repository for task '{0}': pass existing_repo_name or run round 1 first")]
    MissingTarget(String),

    #[error("generation failed: {0}")]
    Generation(String),

    #[error("provision failed at {stage}: {detail}")]
    Provision { stage: &'static str, detail: String },

    #[error("update failed at {stage}: {detail}")]
    Update { stage: &'static str, detail: String },

    #[error("notification not acknowledged: {0}")]
    Notification(String),

    #[error("hosting api error: {0}")]
    Host(String),

    #[error("git {op} failed: {detail}")]
    Git { op: String, detail: String },

    #[error("round state db error: {0}")]
    StateDb(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
