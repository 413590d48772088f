//! Inbound and outbound wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DeployRequest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployRequest {
    pub email: String,
    pub task: String,
    pub round: u8,
    pub nonce: String,
    pub brief: String,
    pub evaluation_url: String,
    pub secret: String,
    #[serde(default)]
    pub checks: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Round-2 target; when absent, the round-state map is consulted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_repo_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Attachment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Data,
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "ico"];

impl Attachment {
    /// Kind inferred from the file extension of the display name, falling
    /// back to the URL when the name carries no extension.
    pub fn kind(&self) -> AttachmentKind {
        if is_image(&self.name) || is_image(&self.url) {
            AttachmentKind::Image
        } else {
            AttachmentKind::Data
        }
    }
}

fn is_image(s: &str) -> bool {
    match s.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Repository naming
// ---------------------------------------------------------------------------

/// Deterministic base name for a task's artifact.
pub fn base_repo_name(task: &str) -> String {
    format!("{}_webapp", task.replace('-', "_"))
}

/// Round-1 creation name: base plus a time suffix so a resubmitted task
/// never collides with an earlier artifact.
pub fn round1_repo_name(task: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}", base_repo_name(task), now.format("%Y%m%d_%H%M%S"))
}

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Identifiers of a published artifact, returned to the caller and echoed
/// to the evaluation callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployReceipt {
    pub repo_name: String,
    pub repo_url: String,
    pub pages_url: String,
    pub commit_sha: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub email: String,
    pub task: String,
    pub round: u8,
    pub nonce: String,
    pub repo_url: String,
    pub commit_sha: String,
    pub pages_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_url: Option<String>,
}

impl NotificationPayload {
    pub fn new(req: &DeployRequest, receipt: &DeployReceipt) -> Self {
        Self {
            email: req.email.clone(),
            task: req.task.clone(),
            round: req.round,
            nonce: req.nonce.clone(),
            repo_url: receipt.repo_url.clone(),
            commit_sha: receipt.commit_sha.clone(),
            pages_url: receipt.pages_url.clone(),
            space_url: receipt.space_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn request_parses_with_optional_fields_absent() {
        let req: DeployRequest = serde_json::from_str(
            r#"{
                "email": "a@b.c",
                "task": "demo-site",
                "round": 1,
                "nonce": "n1",
                "brief": "a button that says hi",
                "evaluation_url": "https://eval.example/cb",
                "secret": "s3cret"
            }"#,
        )
        .unwrap();
        assert!(req.checks.is_empty());
        assert!(req.attachments.is_empty());
        assert!(req.existing_repo_name.is_none());
    }

    #[test]
    fn attachment_kind_by_extension() {
        let img = Attachment {
            name: "logo.PNG".into(),
            url: "https://x/logo".into(),
        };
        assert_eq!(img.kind(), AttachmentKind::Image);

        let data = Attachment {
            name: "sales.csv".into(),
            url: "https://x/sales.csv".into(),
        };
        assert_eq!(data.kind(), AttachmentKind::Data);

        // Name without an extension falls back to the URL.
        let by_url = Attachment {
            name: "hero".into(),
            url: "https://x/hero.webp".into(),
        };
        assert_eq!(by_url.kind(), AttachmentKind::Image);
    }

    #[test]
    fn round1_name_carries_time_suffix() {
        let now = Utc.with_ymd_and_hms(2026, 8, 24, 14, 30, 5).unwrap();
        assert_eq!(
            round1_repo_name("demo-site", now),
            "demo_site_webapp_20260824_143005"
        );
        assert_eq!(base_repo_name("demo-site"), "demo_site_webapp");
    }

    #[test]
    fn payload_echoes_request_identity() {
        let req: DeployRequest = serde_json::from_str(
            r#"{"email":"a@b.c","task":"t","round":2,"nonce":"n","brief":"b",
                "evaluation_url":"https://e/cb","secret":"s"}"#,
        )
        .unwrap();
        let receipt = DeployReceipt {
            repo_name: "t_webapp".into(),
            repo_url: "https://github.com/o/t_webapp".into(),
            pages_url: "https://o.github.io/t_webapp/".into(),
            commit_sha: "abc".into(),
            space_url: None,
        };
        let payload = NotificationPayload::new(&req, &receipt);
        assert_eq!(payload.round, 2);
        assert_eq!(payload.nonce, "n");
        assert_eq!(payload.pages_url, receipt.pages_url);
        // space_url is omitted from JSON when absent
        let v = serde_json::to_value(&payload).unwrap();
        assert!(v.get("space_url").is_none());
    }
}
