use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

/// GET /api/jobs/{id} — status of an accepted deployment job.
pub async fn get_job(
    Path(id): Path<Uuid>,
    State(app): State<AppState>,
) -> Result<Json<crate::jobs::JobStatus>, AppError> {
    app.jobs
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("job '{id}' not found")))
}
