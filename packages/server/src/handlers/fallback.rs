use axum::http::{Method, Uri};

use crate::error::AppError;

/// Catch-all for unknown paths and for known paths hit with an unsupported method.
pub async fn not_found(method: Method, uri: Uri) -> AppError {
    tracing::debug!(%method, %uri, "No route matched");
    AppError::NotFound("Not Found".into())
}
