use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::author_name;
use crate::entity::standalone_post;

pub const CREATE_STANDALONE_POST_FIELDS: [&str; 3] = ["title", "content", "author"];

/// Author name carried inline by a standalone post. Either part may be absent.
#[derive(Deserialize, Debug, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedAuthor {
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateStandalonePostRequest {
    pub title: String,
    pub content: String,
    pub author: EmbeddedAuthor,
}

/// Partial update. A present `author` replaces both name parts.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateStandalonePostRequest {
    /// Must equal the id in the request path.
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<EmbeddedAuthor>,
}

impl UpdateStandalonePostRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none()
    }
}

#[derive(Serialize, Debug, utoipa::ToSchema)]
pub struct StandalonePostResponse {
    pub id: Uuid,
    pub title: String,
    /// `"firstName lastName"` trimmed.
    pub author: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StandalonePostListResponse {
    pub posts: Vec<StandalonePostResponse>,
}

pub fn serialize_standalone(post: standalone_post::Model) -> StandalonePostResponse {
    StandalonePostResponse {
        author: author_name(
            post.author_first_name.as_deref(),
            post.author_last_name.as_deref(),
        ),
        id: post.id,
        title: post.title,
        content: post.content,
        created: post.created,
    }
}
