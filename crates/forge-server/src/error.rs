use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use forge_core::ForgeError;

// ---------------------------------------------------------------------------
// Internal sentinel for explicit 404 Not Found errors
// ---------------------------------------------------------------------------

/// Private sentinel error type used to carry an explicit HTTP 404 through
/// the `anyhow::Error` chain without touching the `ForgeError` enum.
#[derive(Debug)]
struct NotFoundError(String);

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotFoundError {}

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 404 Not Found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(NotFoundError(msg.into()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Check for the explicit sentinel before falling through to ForgeError.
        if let Some(n) = self.0.downcast_ref::<NotFoundError>() {
            let body = serde_json::json!({ "error": n.0.clone() });
            return (StatusCode::NOT_FOUND, axum::Json(body)).into_response();
        }

        let status = if let Some(e) = self.0.downcast_ref::<ForgeError>() {
            match e {
                ForgeError::Unauthorized => StatusCode::UNAUTHORIZED,
                ForgeError::InvalidRound(_) | ForgeError::MissingTarget(_) => {
                    StatusCode::BAD_REQUEST
                }
                ForgeError::Generation(_) => StatusCode::BAD_GATEWAY,
                ForgeError::Provision { .. }
                | ForgeError::Update { .. }
                | ForgeError::Notification(_)
                | ForgeError::Host(_)
                | ForgeError::Git { .. }
                | ForgeError::StateDb(_)
                | ForgeError::Io(_)
                | ForgeError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
