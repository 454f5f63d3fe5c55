use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::AppError;

/// A request body kept as a raw JSON object so key presence can be checked
/// before the typed request is deserialized.
pub type JsonObject = Map<String, Value>;

/// Check that every field is present as a key in the body.
///
/// Presence is all that counts: `""` satisfies the check.
pub fn require_fields(body: &JsonObject, fields: &[&str]) -> Result<(), AppError> {
    for field in fields {
        if !body.contains_key(*field) {
            let message = format!("Missing `{field}` in request body");
            tracing::debug!("{message}");
            return Err(AppError::Validation(message));
        }
    }
    Ok(())
}

/// Deserialize a checked body into its typed request.
pub fn from_body<T: DeserializeOwned>(body: JsonObject) -> Result<T, AppError> {
    serde_json::from_value(Value::Object(body)).map_err(|e| AppError::Validation(e.to_string()))
}

/// The path id and the `id` key of the body must be the same string.
pub fn ensure_ids_match(path_id: &str, body_id: Option<&Value>) -> Result<(), AppError> {
    if let Some(Value::String(body_id)) = body_id
        && !path_id.is_empty()
        && body_id == path_id
    {
        return Ok(());
    }

    let shown = match body_id {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "missing".to_string(),
    };
    let message =
        format!("Request path id ({path_id}) and request body id ({shown}) must match");
    tracing::debug!("{message}");
    Err(AppError::Validation(message))
}

/// Parse a record id from the path. A string that is not a UUID cannot name a
/// stored record, so it is reported as not found.
pub fn parse_id(raw: &str, entity: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("{entity} not found")))
}

/// Trimmed `"first last"`, treating absent parts as empty.
pub fn author_name(first: Option<&str>, last: Option<&str>) -> String {
    format!("{} {}", first.unwrap_or_default(), last.unwrap_or_default())
        .trim()
        .to_string()
}
