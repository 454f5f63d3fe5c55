use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::error::AppError;
use crate::models::shared::JsonObject;

/// The request body as an untyped JSON object.
///
/// Handlers check key presence on the raw object before deserializing it into
/// a typed request. Malformed JSON, a wrong content type and non-object bodies
/// all become `AppError::Validation`.
pub struct JsonObjectBody(pub JsonObject);

impl<S> FromRequest<S> for JsonObjectBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| {
                tracing::debug!(status = %e.status(), "Rejected request body");
                AppError::Validation(e.body_text())
            })?;

        match value {
            Value::Object(map) => Ok(JsonObjectBody(map)),
            _ => Err(AppError::Validation(
                "Request body must be a JSON object".into(),
            )),
        }
    }
}
