//! Persistent round state using redb.
//!
//! Maps each task to the repository its most recent Round 1 created, so a
//! Round 2 that omits `existing_repo_name` can find its target. Keyed per
//! task on purpose: a single global "last repo" slot would let concurrent
//! Round-1 requests for different tasks clobber each other.

use crate::error::{ForgeError, Result};
use redb::{Database, TableDefinition};
use std::path::Path;

/// Key: task identifier. Value: repository name of the latest Round 1.
const ROUNDS: TableDefinition<&str, &str> = TableDefinition::new("rounds");

pub struct RoundStore {
    db: Database,
}

impl RoundStore {
    /// Open or create the database at `path`, ensuring the table exists
    /// before any reads.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Database::create(path).map_err(|e| ForgeError::StateDb(e.to_string()))?;
        let wt = db
            .begin_write()
            .map_err(|e| ForgeError::StateDb(e.to_string()))?;
        wt.open_table(ROUNDS)
            .map_err(|e| ForgeError::StateDb(e.to_string()))?;
        wt.commit().map_err(|e| ForgeError::StateDb(e.to_string()))?;
        Ok(Self { db })
    }

    /// Record `repo` as the latest Round-1 artifact for `task`, overwriting
    /// any previous entry for that task.
    pub fn record(&self, task: &str, repo: &str) -> Result<()> {
        let wt = self
            .db
            .begin_write()
            .map_err(|e| ForgeError::StateDb(e.to_string()))?;
        {
            let mut table = wt
                .open_table(ROUNDS)
                .map_err(|e| ForgeError::StateDb(e.to_string()))?;
            table
                .insert(task, repo)
                .map_err(|e| ForgeError::StateDb(e.to_string()))?;
        }
        wt.commit().map_err(|e| ForgeError::StateDb(e.to_string()))?;
        Ok(())
    }

    /// Repository recorded for `task`, if any Round 1 has completed.
    pub fn resolve(&self, task: &str) -> Result<Option<String>> {
        let rt = self
            .db
            .begin_read()
            .map_err(|e| ForgeError::StateDb(e.to_string()))?;
        let table = rt
            .open_table(ROUNDS)
            .map_err(|e| ForgeError::StateDb(e.to_string()))?;
        let value = table
            .get(task)
            .map_err(|e| ForgeError::StateDb(e.to_string()))?;
        Ok(value.map(|v| v.value().to_string()))
    }
}
