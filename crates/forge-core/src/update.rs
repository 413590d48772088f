//! Round 2: mutate an existing repository in place.

use crate::error::{ForgeError, Result};
use crate::host::Hosting;
use crate::provision::{Published, UNKNOWN_COMMIT};
use crate::workspace::Workspace;
use std::io::Write;
use std::path::Path;

/// Clone the existing repository, overwrite its entry point with the new
/// document, append a dated note to the readme, and push. No creation ever
/// happens here; a missing remote surfaces as a clone failure.
pub async fn update(
    host: &dyn Hosting,
    name: &str,
    document: &str,
    note: &str,
) -> Result<Published> {
    let ws = Workspace::create().map_err(stage_err("workspace"))?;
    let dir = ws.repo_dir(name);
    host.clone_repo(name, &dir).await.map_err(stage_err("clone"))?;

    std::fs::write(dir.join("index.html"), document).map_err(|e| ForgeError::Update {
        stage: "write",
        detail: e.to_string(),
    })?;
    append_update_note(&dir, note).map_err(|e| ForgeError::Update {
        stage: "write",
        detail: e.to_string(),
    })?;

    let message = format!("Round 2 update: {}", truncate(note, 60));
    host.commit_and_push(&dir, &message)
        .await
        .map_err(stage_err("push"))?;

    let commit_sha = host
        .head_commit(&dir)
        .await
        .unwrap_or_else(|| UNKNOWN_COMMIT.to_string());

    Ok(Published {
        pages_url: host.pages_url(name),
        commit_sha,
    })
}

fn append_update_note(dir: &Path, note: &str) -> std::io::Result<()> {
    let mut readme = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("README.md"))?;
    writeln!(
        readme,
        "\n### Update {}\n\n{note}",
        chrono::Utc::now().format("%Y-%m-%d")
    )
}

/// Truncate on a char boundary so multi-byte briefs can't split a commit
/// message mid-character.
fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn stage_err(stage: &'static str) -> impl FnOnce(ForgeError) -> ForgeError {
    move |e| ForgeError::Update {
        stage,
        detail: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockHost;

    #[tokio::test]
    async fn update_clones_and_pushes_without_creating() {
        let host = MockHost::new();
        let published = update(&host, "demo_webapp", "<p>v2</p>", "add a footer")
            .await
            .unwrap();

        assert_eq!(published.pages_url, "https://octo.example/demo_webapp/");
        assert_eq!(published.commit_sha, "cafebabe");
        assert_eq!(
            host.calls(),
            vec!["clone:demo_webapp", "push:Round 2 update: add a footer"]
        );
    }

    #[tokio::test]
    async fn entry_point_is_overwritten_and_readme_annotated() {
        let host = MockHost::new().keep_clone_contents();
        update(&host, "demo", "<p>v2</p>", "add a footer")
            .await
            .unwrap();

        let files = host.pushed_files();
        assert_eq!(files.get("index.html").unwrap(), "<p>v2</p>");
        let readme = files.get("README.md").unwrap();
        assert!(readme.contains("### Update"));
        assert!(readme.contains("add a footer"));
    }

    #[tokio::test]
    async fn clone_failure_is_terminal_and_cleans_workspace() {
        let host = MockHost::failing_at("clone");
        let err = update(&host, "missing", "<p>x</p>", "note")
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::Update { stage: "clone", .. }));

        let dir = host.clone_dir().unwrap();
        assert!(!dir.exists(), "workspace must be removed after failure");
    }

    #[tokio::test]
    async fn long_notes_are_truncated_in_commit_message() {
        let host = MockHost::new();
        let note = "x".repeat(100);
        update(&host, "demo", "<p>x</p>", &note).await.unwrap();

        let calls = host.calls();
        let push = calls.iter().find(|c| c.starts_with("push:")).unwrap();
        assert_eq!(*push, format!("push:Round 2 update: {}", "x".repeat(60)));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo wörld", 5), "héllo");
        assert_eq!(truncate("short", 60), "short");
    }
}
