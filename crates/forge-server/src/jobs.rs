//! In-memory registry of deployment jobs.
//!
//! Every accepted request becomes a job so the asynchronous path
//! (`?wait=false`) has something to poll. Records live for the lifetime of
//! the process; a deployment service handles a handful of requests per run,
//! so there is no eviction.

use forge_core::DeployReceipt;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    Running,
    Succeeded { receipt: DeployReceipt },
    Failed { error: String },
}

#[derive(Clone, Default)]
pub struct JobRegistry {
    inner: Arc<Mutex<HashMap<Uuid, JobStatus>>>,
}

impl JobRegistry {
    /// Register a new running job and return its id.
    pub fn start(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().insert(id, JobStatus::Running);
        id
    }

    pub fn finish(&self, id: Uuid, status: JobStatus) {
        self.inner.lock().unwrap().insert(id, status);
    }

    pub fn get(&self, id: &Uuid) -> Option<JobStatus> {
        self.inner.lock().unwrap().get(id).cloned()
    }
}
