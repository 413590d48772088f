use crate::error::AppError;
use crate::jobs::JobStatus;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use forge_core::DeployRequest;
use tracing::{error, info};

#[derive(serde::Deserialize)]
pub struct DeployParams {
    /// `?wait=false` returns 202 immediately; poll /api/jobs/{id} for the
    /// outcome. Default is to hold the connection until the run finishes.
    #[serde(default = "default_wait")]
    pub wait: bool,
}

fn default_wait() -> bool {
    true
}

/// POST /api/deploy — run a deployment request.
///
/// The shared secret is checked before a job is registered, so an
/// unauthorized caller learns nothing beyond the 401 and spends no
/// resources.
pub async fn deploy(
    State(app): State<AppState>,
    Query(params): Query<DeployParams>,
    Json(req): Json<DeployRequest>,
) -> Result<Response, AppError> {
    app.orchestrator.authorize(&req)?;

    let id = app.jobs.start();
    info!(job = %id, task = %req.task, round = req.round, wait = params.wait, "deploy accepted");

    if params.wait {
        let result = app.orchestrator.run(&req).await;
        match result {
            Ok(receipt) => {
                app.jobs.finish(
                    id,
                    JobStatus::Succeeded {
                        receipt: receipt.clone(),
                    },
                );
                let mut body = serde_json::to_value(&receipt)?;
                if let Some(obj) = body.as_object_mut() {
                    obj.insert("status".into(), serde_json::json!("success"));
                    obj.insert("repo".into(), serde_json::json!(receipt.repo_name));
                    obj.insert("job_id".into(), serde_json::json!(id));
                }
                Ok(Json(body).into_response())
            }
            Err(e) => {
                app.jobs.finish(
                    id,
                    JobStatus::Failed {
                        error: e.to_string(),
                    },
                );
                Err(e.into())
            }
        }
    } else {
        let orchestrator = app.orchestrator.clone();
        let jobs = app.jobs.clone();
        tokio::spawn(async move {
            match orchestrator.run(&req).await {
                Ok(receipt) => jobs.finish(id, JobStatus::Succeeded { receipt }),
                Err(e) => {
                    error!(job = %id, "deployment failed: {e}");
                    jobs.finish(
                        id,
                        JobStatus::Failed {
                            error: e.to_string(),
                        },
                    );
                }
            }
        });

        let body = serde_json::json!({ "job_id": id, "status": "accepted" });
        Ok((StatusCode::ACCEPTED, Json(body)).into_response())
    }
}
