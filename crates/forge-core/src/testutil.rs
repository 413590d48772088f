//! In-memory collaborator doubles shared by pipeline-level tests.

use crate::error::{ForgeError, Result};
use crate::host::Hosting;
use forge_agent::{AgentError, Generate};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// MockHost
// ---------------------------------------------------------------------------

/// Recording `Hosting` double. Every operation is appended to `calls`; an
/// optional `fail_stage` makes the named operation fail after recording.
pub struct MockHost {
    calls: Mutex<Vec<String>>,
    fail_stage: Option<&'static str>,
    commit_sha: Option<String>,
    clone_dir: Mutex<Option<PathBuf>>,
    snapshot_on_push: bool,
    pushed: Mutex<HashMap<String, String>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_stage: None,
            commit_sha: Some("cafebabe".to_string()),
            clone_dir: Mutex::new(None),
            snapshot_on_push: false,
            pushed: Mutex::new(HashMap::new()),
        }
    }

    pub fn failing_at(stage: &'static str) -> Self {
        Self {
            fail_stage: Some(stage),
            ..Self::new()
        }
    }

    pub fn with_commit_sha(mut self, sha: Option<&str>) -> Self {
        self.commit_sha = sha.map(str::to_string);
        self
    }

    /// Snapshot checkout contents at push time so tests can inspect what
    /// would have been committed (the workspace itself is removed by then).
    pub fn keep_clone_contents(mut self) -> Self {
        self.snapshot_on_push = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clone_dir(&self) -> Option<PathBuf> {
        self.clone_dir.lock().unwrap().clone()
    }

    pub fn pushed_files(&self) -> HashMap<String, String> {
        self.pushed.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn fail_if(&self, stage: &'static str) -> Result<()> {
        if self.fail_stage == Some(stage) {
            Err(ForgeError::Host(format!("injected {stage} failure")))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl Hosting for MockHost {
    async fn create_repo(&self, name: &str) -> Result<()> {
        self.record(format!("create:{name}"));
        self.fail_if("create")
    }

    async fn clone_repo(&self, name: &str, dest: &Path) -> Result<()> {
        self.record(format!("clone:{name}"));
        *self.clone_dir.lock().unwrap() = Some(dest.to_path_buf());
        self.fail_if("clone")?;
        std::fs::create_dir_all(dest)?;
        Ok(())
    }

    async fn commit_and_push(&self, dir: &Path, message: &str) -> Result<()> {
        self.record(format!("push:{message}"));
        self.fail_if("push")?;
        if self.snapshot_on_push {
            let mut pushed = self.pushed.lock().unwrap();
            for entry in std::fs::read_dir(dir)? {
                let entry = entry?;
                if entry.file_type()?.is_file() {
                    pushed.insert(
                        entry.file_name().to_string_lossy().into_owned(),
                        std::fs::read_to_string(entry.path())?,
                    );
                }
            }
        }
        Ok(())
    }

    async fn head_commit(&self, _dir: &Path) -> Option<String> {
        self.commit_sha.clone()
    }

    async fn enable_pages(&self, name: &str) -> Result<()> {
        self.record(format!("pages:{name}"));
        self.fail_if("pages")
    }

    fn repo_url(&self, name: &str) -> String {
        format!("https://git.example/octo/{name}")
    }

    fn pages_url(&self, name: &str) -> String {
        format!("https://octo.example/{name}/")
    }
}

// ---------------------------------------------------------------------------
// MockGen
// ---------------------------------------------------------------------------

/// Counting `Generate` double with a fixed reply.
pub struct MockGen {
    calls: AtomicUsize,
    reply: std::result::Result<String, String>,
}

impl MockGen {
    pub fn replying(text: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reply: Ok(text.to_string()),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reply: Err(msg.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Generate for MockGen {
    async fn generate(&self, _prompt: &str) -> forge_agent::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(msg) => Err(AgentError::Api {
                status: 500,
                body: msg.clone(),
            }),
        }
    }
}
