//! Round 1: create and publish a fresh repository.

use crate::error::{ForgeError, Result};
use crate::host::Hosting;
use crate::poller::Poller;
use crate::workspace::Workspace;
use std::path::Path;

/// Sentinel commit id used when HEAD cannot be read after a push.
pub const UNKNOWN_COMMIT: &str = "unknown";

const LICENSE_TEXT: &str = "MIT License\n\nCopyright (c) 2026 pageforge\n";

/// Remote identifiers of a pushed artifact.
#[derive(Debug, Clone)]
pub struct Published {
    pub pages_url: String,
    pub commit_sha: String,
}

/// Provision a new repository named `name` containing `document`.
///
/// Each step is a distinct failure point; a failure before the push leaves
/// nothing worth keeping and the ephemeral workspace is removed on every
/// exit path (it is owned by this function). A poller timeout does NOT fail
/// the operation — publication may still be propagating.
pub async fn provision(
    host: &dyn Hosting,
    poller: &Poller,
    name: &str,
    document: &str,
) -> Result<Published> {
    host.create_repo(name).await.map_err(stage_err("create"))?;

    let ws = Workspace::create().map_err(stage_err("workspace"))?;
    let dir = ws.repo_dir(name);
    host.clone_repo(name, &dir).await.map_err(stage_err("clone"))?;

    write_site_files(&dir, name, document).map_err(stage_err("write"))?;

    host.commit_and_push(&dir, "Initial commit")
        .await
        .map_err(stage_err("push"))?;
    host.enable_pages(name).await.map_err(stage_err("pages"))?;

    let pages_url = host.pages_url(name);
    poller.wait_until_live(&pages_url).await;

    let commit_sha = host
        .head_commit(&dir)
        .await
        .unwrap_or_else(|| UNKNOWN_COMMIT.to_string());

    Ok(Published {
        pages_url,
        commit_sha,
    })
}

fn write_site_files(dir: &Path, name: &str, document: &str) -> Result<()> {
    std::fs::write(dir.join("index.html"), document)?;
    std::fs::write(dir.join("LICENSE"), LICENSE_TEXT)?;
    std::fs::write(
        dir.join("README.md"),
        format!("# {name}\n\nAuto-generated web app deployed from a brief.\n"),
    )?;
    Ok(())
}

fn stage_err(stage: &'static str) -> impl FnOnce(ForgeError) -> ForgeError {
    move |e| ForgeError::Provision {
        stage,
        detail: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::PollPolicy;
    use crate::testutil::MockHost;
    use std::time::Duration;

    fn no_wait_poller() -> Poller {
        // Zero budget: a single probe, no sleeping.
        Poller::new(
            reqwest::Client::new(),
            PollPolicy {
                initial_delay: Duration::from_millis(10),
                delay_step: Duration::from_millis(10),
                max_delay: Duration::from_millis(10),
                budget: Duration::ZERO,
            },
        )
    }

    #[tokio::test]
    async fn happy_path_runs_all_stages_in_order() {
        let host = MockHost::new();
        let published = provision(&host, &no_wait_poller(), "demo_webapp", "<p>hi</p>")
            .await
            .unwrap();

        assert_eq!(published.pages_url, "https://octo.example/demo_webapp/");
        assert_eq!(published.commit_sha, "cafebabe");
        assert_eq!(
            host.calls(),
            vec![
                "create:demo_webapp",
                "clone:demo_webapp",
                "push:Initial commit",
                "pages:demo_webapp",
            ]
        );
    }

    #[tokio::test]
    async fn create_failure_aborts_before_clone() {
        let host = MockHost::failing_at("create");
        let err = provision(&host, &no_wait_poller(), "demo", "<p>x</p>")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Provision { stage: "create", .. }
        ));
        assert_eq!(host.calls(), vec!["create:demo"]);
        assert!(host.clone_dir().is_none(), "no workspace should be cloned");
    }

    #[tokio::test]
    async fn push_failure_reports_stage_and_cleans_workspace() {
        let host = MockHost::failing_at("push");
        let err = provision(&host, &no_wait_poller(), "demo", "<p>x</p>")
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::Provision { stage: "push", .. }));

        let dir = host.clone_dir().expect("clone happened before the failure");
        assert!(!dir.exists(), "workspace must be removed after failure");
    }

    #[tokio::test]
    async fn unreadable_head_substitutes_sentinel() {
        let host = MockHost::new().with_commit_sha(None);
        let published = provision(&host, &no_wait_poller(), "demo", "<p>x</p>")
            .await
            .unwrap();
        assert_eq!(published.commit_sha, UNKNOWN_COMMIT);
    }

    #[tokio::test]
    async fn site_files_are_written_into_the_checkout() {
        let host = MockHost::new().keep_clone_contents();
        provision(&host, &no_wait_poller(), "demo", "<p>hi</p>")
            .await
            .unwrap();

        let snapshot = host.pushed_files();
        assert_eq!(snapshot.get("index.html").unwrap(), "<p>hi</p>");
        assert!(snapshot.get("LICENSE").unwrap().contains("MIT License"));
        assert!(snapshot.get("README.md").unwrap().contains("# demo"));
    }
}
