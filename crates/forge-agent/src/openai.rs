use crate::types::{ChatRequest, ChatResponse};
use crate::{AgentError, Generate, Result};

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// Used as the fallback provider; the default base URL points at the aipipe
/// relay the original deployment used, but any compatible endpoint works.
pub struct OpenAiCompatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiCompatClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://aipipe.org/openai/v1".to_string(),
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait::async_trait]
impl Generate for OpenAiCompatClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest::from_prompt(&self.model, prompt);
        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AgentError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp.json().await?;
        parsed.first_text().ok_or(AgentError::EmptyResponse)
    }
}
