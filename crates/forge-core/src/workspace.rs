//! Ephemeral working directory for a single deployment run.
//!
//! The directory is owned solely by the current run and removed exactly once
//! on every exit path — success, handled failure, or unwind — because
//! removal happens in `Drop`.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("pageforge-").tempdir()?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Directory a repository named `name` is cloned into.
    pub fn repo_dir(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
