use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::author;

pub const CREATE_AUTHOR_FIELDS: [&str; 3] = ["firstName", "lastName", "userName"];

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    /// Must be unique across all authors.
    #[schema(example = "ada")]
    pub user_name: String,
}

/// Partial author update. Absent fields keep their stored value.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    /// Must equal the id in the request path.
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

impl UpdateAuthorRequest {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.user_name.is_none()
    }
}

#[derive(Serialize, Debug, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: Uuid,
    /// `"firstName lastName"`.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    pub user_name: String,
}

impl From<author::Model> for AuthorResponse {
    fn from(m: author::Model) -> Self {
        Self {
            id: m.id,
            name: m.display_name(),
            user_name: m.user_name,
        }
    }
}
