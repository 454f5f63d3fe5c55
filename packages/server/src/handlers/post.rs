use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{author, blog_post, comment};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::JsonObjectBody;
use crate::models::post::*;
use crate::models::shared::{ensure_ids_match, from_body, parse_id, require_fields};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/posts",
    tag = "Posts",
    operation_id = "listPosts",
    summary = "List all blog posts",
    description = "Every post is returned with its author's name and comments populated.",
    responses(
        (status = 200, description = "All posts", body = PostListResponse),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<PostListResponse>, AppError> {
    let posts = load_posts(&state.db).await?;
    Ok(Json(PostListResponse { posts }))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "Posts",
    operation_id = "getPost",
    summary = "Get a blog post by ID",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post details", body = PostResponse),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    let post_id = parse_id(&id, "Post")?;
    let post = find_post(&state.db, post_id).await?;
    Ok(Json(populate(&state.db, post).await?))
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "Posts",
    operation_id = "createPost",
    summary = "Create a blog post",
    description = "`author` is the id of an existing author.",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Missing field or unknown author (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body))]
pub async fn create_post(
    State(state): State<AppState>,
    JsonObjectBody(body): JsonObjectBody,
) -> Result<impl IntoResponse, AppError> {
    require_fields(&body, &CREATE_POST_FIELDS)?;
    let payload: CreatePostRequest = from_body(body)?;

    let author = match Uuid::parse_str(&payload.author) {
        Ok(author_id) => author::Entity::find_by_id(author_id).one(&state.db).await?,
        Err(_) => None,
    };
    let Some(author) = author else {
        tracing::debug!(author = %payload.author, "Author not found");
        return Err(AppError::Validation("Author not found".into()));
    };

    let new_post = blog_post::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(payload.title),
        content: Set(payload.content),
        author_id: Set(author.id),
        created: Set(chrono::Utc::now()),
        ..Default::default()
    };
    // The author may be deleted between the lookup and the insert.
    let post = new_post
        .insert(&state.db)
        .await
        .map_err(|e| missing_parent(e, AppError::Validation("Author not found".into())))?;

    tracing::info!(post_id = %post.id, author_id = %author.id, "Post created");
    Ok((StatusCode::CREATED, Json(serialize(&post, Some(&author), &[]))))
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "Posts",
    operation_id = "updatePost",
    summary = "Update a blog post",
    description = "Partial update of `title` and `content`. The body `id` must equal the path id.",
    params(("id" = String, Path, description = "Post ID")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostUpdateResponse),
        (status = 400, description = "Id mismatch (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body))]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonObjectBody(body): JsonObjectBody,
) -> Result<Json<PostUpdateResponse>, AppError> {
    ensure_ids_match(&id, body.get("id"))?;
    let payload: UpdatePostRequest = from_body(body)?;
    let post_id = parse_id(&id, "Post")?;

    if payload.is_empty() {
        let existing = find_post(&state.db, post_id).await?;
        return Ok(Json(existing.into()));
    }

    let mut changes = <blog_post::ActiveModel as Default>::default();
    if let Some(title) = payload.title {
        changes.title = Set(title);
    }
    if let Some(content) = payload.content {
        changes.content = Set(content);
    }

    let result = blog_post::Entity::update_many()
        .set(changes)
        .filter(blog_post::Column::Id.eq(post_id))
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Post not found".into()));
    }

    let model = find_post(&state.db, post_id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "Posts",
    operation_id = "deletePost",
    summary = "Delete a blog post",
    description = "Deletes the post and its comments. The author is not affected.",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post_id = parse_id(&id, "Post")?;

    // Open with a write: SQLite will not upgrade a shared lock mid-transaction.
    let txn = state.db.begin().await?;

    comment::Entity::delete_many()
        .filter(comment::Column::PostId.eq(post_id))
        .exec(&txn)
        .await?;
    let deleted = blog_post::Entity::delete_by_id(post_id).exec(&txn).await?;
    if deleted.rows_affected == 0 {
        txn.rollback().await?;
        return Err(AppError::NotFound("Post not found".into()));
    }

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/posts/{id}/comments",
    tag = "Posts",
    operation_id = "addComment",
    summary = "Append a comment to a blog post",
    params(("id" = String, Path, description = "Post ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment added; the updated post is returned", body = PostResponse),
        (status = 400, description = "Missing field (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body))]
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonObjectBody(body): JsonObjectBody,
) -> Result<impl IntoResponse, AppError> {
    let post_id = parse_id(&id, "Post")?;
    require_fields(&body, &CREATE_COMMENT_FIELDS)?;
    let payload: CreateCommentRequest = from_body(body)?;

    let post = find_post(&state.db, post_id).await?;

    let new_comment = comment::ActiveModel {
        id: Set(Uuid::now_v7()),
        content: Set(payload.content),
        post_id: Set(post_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    new_comment
        .insert(&state.db)
        .await
        .map_err(|e| missing_parent(e, AppError::NotFound("Post not found".into())))?;

    let response = populate(&state.db, post).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Map a foreign-key violation on insert to `gone`: the referenced row was
/// deleted after it was looked up.
fn missing_parent(err: DbErr, gone: AppError) -> AppError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => gone,
        _ => AppError::from(err),
    }
}

async fn find_post<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<blog_post::Model, AppError> {
    blog_post::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))
}

/// Resolve the author and comments of a single post and serialize it.
async fn populate<C: ConnectionTrait>(
    db: &C,
    post: blog_post::Model,
) -> Result<PostResponse, AppError> {
    let author = author::Entity::find_by_id(post.author_id).one(db).await?;
    let comments = comment::Entity::find()
        .filter(comment::Column::PostId.eq(post.id))
        .order_by_asc(comment::Column::Id)
        .all(db)
        .await?;

    Ok(serialize(&post, author.as_ref(), &comments))
}

/// Load every post with authors and comments resolved in one query each.
async fn load_posts<C: ConnectionTrait>(db: &C) -> Result<Vec<PostResponse>, AppError> {
    let posts = blog_post::Entity::find()
        .order_by_asc(blog_post::Column::Created)
        .order_by_asc(blog_post::Column::Id)
        .all(db)
        .await?;
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let mut author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let authors: HashMap<Uuid, author::Model> = author::Entity::find()
        .filter(author::Column::Id.is_in(author_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
    let mut comments: HashMap<Uuid, Vec<comment::Model>> = HashMap::new();
    for c in comment::Entity::find()
        .filter(comment::Column::PostId.is_in(post_ids))
        .order_by_asc(comment::Column::Id)
        .all(db)
        .await?
    {
        comments.entry(c.post_id).or_default().push(c);
    }

    Ok(posts
        .iter()
        .map(|post| {
            serialize(
                post,
                authors.get(&post.author_id),
                comments.get(&post.id).map(Vec::as_slice).unwrap_or_default(),
            )
        })
        .collect())
}
