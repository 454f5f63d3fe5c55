use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::author_name;
use crate::entity::{author, blog_post, comment};

pub const CREATE_POST_FIELDS: [&str; 3] = ["title", "content", "author"];
pub const CREATE_COMMENT_FIELDS: [&str; 1] = ["content"];

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreatePostRequest {
    #[schema(example = "Hello world")]
    pub title: String,
    pub content: String,
    /// Id of an existing author.
    pub author: String,
}

/// Partial post update. Absent fields keep their stored value.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdatePostRequest {
    /// Must equal the id in the request path.
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdatePostRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCommentRequest {
    #[schema(example = "Great read!")]
    pub content: String,
}

#[derive(Serialize, Debug, utoipa::ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
}

impl From<&comment::Model> for CommentResponse {
    fn from(m: &comment::Model) -> Self {
        Self {
            id: m.id,
            content: m.content.clone(),
        }
    }
}

/// Externally visible projection of a blog post.
#[derive(Serialize, Debug, utoipa::ToSchema)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    /// The author's name, `"firstName lastName"` trimmed.
    #[schema(example = "Ada Lovelace")]
    pub author: String,
    pub content: String,
    pub created: DateTime<Utc>,
    /// In insertion order.
    pub comments: Vec<CommentResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
}

/// Body returned by a post update.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PostUpdateResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
}

impl From<blog_post::Model> for PostUpdateResponse {
    fn from(m: blog_post::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
        }
    }
}

/// Serialize a post together with its populated author and comments.
///
/// A missing author yields an empty author name. `comments` must already be
/// in insertion order.
pub fn serialize(
    post: &blog_post::Model,
    author: Option<&author::Model>,
    comments: &[comment::Model],
) -> PostResponse {
    let author = author_name(
        author.map(|a| a.first_name.as_str()),
        author.map(|a| a.last_name.as_str()),
    );

    PostResponse {
        id: post.id,
        title: post.title.clone(),
        author,
        content: post.content.clone(),
        created: post.created,
        comments: comments.iter().map(CommentResponse::from).collect(),
    }
}
