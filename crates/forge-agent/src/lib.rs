//! `forge-agent` — HTTP drivers for the text-generation providers.
//!
//! The deployment pipeline asks one question of this crate: given a prompt,
//! produce text. Two interchangeable providers answer it:
//!
//! ```text
//! FallbackGenerator
//!     │  primary attempt
//!     ▼
//! GeminiClient        ← generateContent REST endpoint
//!     │  on failure, exactly one fallback attempt
//!     ▼
//! OpenAiCompatClient  ← chat-completions REST endpoint
//! ```
//!
//! The fallback is a fixed two-arm strategy: the primary is tried once, the
//! fallback (when configured) is tried once, and then the call fails. There
//! is no further retrying inside this crate.

pub mod error;
pub mod fallback;
pub mod gemini;
pub mod openai;
pub mod types;

pub use error::AgentError;
pub use fallback::FallbackGenerator;
pub use gemini::GeminiClient;
pub use openai::OpenAiCompatClient;

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, AgentError>;

/// A prompt-in, text-out generation provider.
///
/// Implementations must be cheap to share behind an `Arc`; the pipeline
/// holds one `dyn Generate` for the lifetime of the process.
#[async_trait::async_trait]
pub trait Generate: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
