//! Best-effort secondary publication to a Hugging Face static Space.
//!
//! The primary artifact is the repository plus its pages URL; the Space is a
//! bonus mirror. `publish` therefore never returns an error: any failure is
//! logged and reported as `None`.

use base64::Engine;

pub struct SpacePublisher {
    http: reqwest::Client,
    api_base: String,
    owner: String,
    token: String,
}

impl SpacePublisher {
    pub fn new(owner: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: "https://huggingface.co".to_string(),
            owner: owner.into(),
            token: token.into(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Create-or-reuse the space `owner/name` and upload the document as its
    /// `index.html`. Returns the public space URL, or `None` on any failure.
    pub async fn publish(&self, name: &str, document: &str) -> Option<String> {
        if let Err(e) = self.ensure_space(name).await {
            tracing::warn!("secondary publish skipped, space creation failed: {e}");
            return None;
        }
        if let Err(e) = self.upload_index(name, document).await {
            tracing::warn!("secondary publish skipped, upload failed: {e}");
            return None;
        }
        let url = format!("{}/spaces/{}/{name}", self.api_base, self.owner);
        tracing::info!("secondary publish succeeded: {url}");
        Some(url)
    }

    async fn ensure_space(&self, name: &str) -> Result<(), String> {
        let resp = self
            .http
            .post(format!("{}/api/repos/create", self.api_base))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "type": "space",
                "name": name,
                "sdk": "static",
                "private": false,
            }))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = resp.status();
        // 409 means the space already exists; publishing is create-or-reuse.
        if status.is_success() || status.as_u16() == 409 {
            Ok(())
        } else {
            Err(format!("create space returned {status}"))
        }
    }

    async fn upload_index(&self, name: &str, document: &str) -> Result<(), String> {
        let header = serde_json::json!({
            "key": "header",
            "value": { "summary": "Deploy generated site" },
        });
        let file = serde_json::json!({
            "key": "file",
            "value": {
                "path": "index.html",
                "content": base64::engine::general_purpose::STANDARD.encode(document),
                "encoding": "base64",
            },
        });
        let body = format!("{header}\n{file}\n");

        let resp = self
            .http
            .post(format!(
                "{}/api/spaces/{}/{name}/commit/main",
                self.api_base, self.owner
            ))
            .bearer_auth(&self.token)
            .header("Content-Type", "application/x-ndjson")
            .body(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(format!("commit returned {status}"))
        }
    }
}
