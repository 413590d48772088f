//! Thin async wrappers over the `git` binary.
//!
//! Every operation reduces to a pass/fail signal plus diagnostic text;
//! callers treat any failure as terminal for their stage.

use crate::error::{ForgeError, Result};
use std::path::Path;
use tokio::process::Command;

/// Run `git` with `args` in `cwd`, returning trimmed stdout on success.
pub async fn run_git(cwd: &Path, args: &[&str]) -> Result<String> {
    tracing::debug!("git {}", args.join(" "));
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .await
        .map_err(|e| ForgeError::Git {
            op: args.first().unwrap_or(&"git").to_string(),
            detail: format!("failed to spawn git: {e}"),
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(ForgeError::Git {
            op: args.first().unwrap_or(&"git").to_string(),
            detail: stderr,
        })
    }
}

/// Clone `remote` into `dest`.
pub async fn clone(remote: &str, dest: &Path) -> Result<()> {
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    let dest_str = dest.to_string_lossy();
    run_git(parent, &["clone", remote, &dest_str]).await?;
    Ok(())
}

/// Stage everything and commit as the fixed bot identity on `main`.
///
/// `checkout -B main` pins the branch name: a clone of an empty remote has
/// no branch yet, and existing clones may default elsewhere.
pub async fn commit_all(dir: &Path, message: &str) -> Result<()> {
    run_git(dir, &["checkout", "-B", "main"]).await?;
    run_git(dir, &["config", "user.name", "Automation Bot"]).await?;
    run_git(dir, &["config", "user.email", "bot@example.com"]).await?;
    run_git(dir, &["add", "."]).await?;
    run_git(dir, &["commit", "-m", message]).await?;
    Ok(())
}

/// Push `main` to origin.
pub async fn push(dir: &Path) -> Result<()> {
    run_git(dir, &["push", "-u", "origin", "main"]).await?;
    Ok(())
}

/// HEAD commit id, or `None` when unreadable.
pub async fn head_commit(dir: &Path) -> Option<String> {
    run_git(dir, &["rev-parse", "HEAD"]).await.ok()
}
