use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::standalone_post;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::JsonObjectBody;
use crate::models::shared::{ensure_ids_match, from_body, parse_id, require_fields};
use crate::models::standalone::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/posts",
    tag = "Standalone Posts",
    operation_id = "listStandalonePosts",
    summary = "List all posts",
    responses(
        (status = 200, description = "All posts", body = StandalonePostListResponse),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_standalone_posts(
    State(state): State<AppState>,
) -> Result<Json<StandalonePostListResponse>, AppError> {
    let posts = standalone_post::Entity::find()
        .order_by_asc(standalone_post::Column::Created)
        .order_by_asc(standalone_post::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(StandalonePostListResponse {
        posts: posts.into_iter().map(serialize_standalone).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "Standalone Posts",
    operation_id = "getStandalonePost",
    summary = "Get a post by ID",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post details", body = StandalonePostResponse),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_standalone_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StandalonePostResponse>, AppError> {
    let post_id = parse_id(&id, "Post")?;
    let post = find_standalone_post(&state.db, post_id).await?;
    Ok(Json(serialize_standalone(post)))
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "Standalone Posts",
    operation_id = "createStandalonePost",
    summary = "Create a post",
    description = "`author` is an object with optional `firstName` and `lastName`.",
    request_body = CreateStandalonePostRequest,
    responses(
        (status = 201, description = "Post created", body = StandalonePostResponse),
        (status = 400, description = "Missing field (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body))]
pub async fn create_standalone_post(
    State(state): State<AppState>,
    JsonObjectBody(body): JsonObjectBody,
) -> Result<impl IntoResponse, AppError> {
    require_fields(&body, &CREATE_STANDALONE_POST_FIELDS)?;
    let payload: CreateStandalonePostRequest = from_body(body)?;

    let new_post = standalone_post::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(payload.title),
        content: Set(payload.content),
        author_first_name: Set(payload.author.first_name),
        author_last_name: Set(payload.author.last_name),
        created: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let post = new_post.insert(&state.db).await?;

    tracing::info!(post_id = %post.id, "Post created");
    Ok((StatusCode::CREATED, Json(serialize_standalone(post))))
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "Standalone Posts",
    operation_id = "updateStandalonePost",
    summary = "Update a post",
    description = "Partial update of `title`, `content` and `author`. The body `id` must equal the path id.",
    params(("id" = String, Path, description = "Post ID")),
    request_body = UpdateStandalonePostRequest,
    responses(
        (status = 200, description = "Post updated", body = StandalonePostResponse),
        (status = 400, description = "Id mismatch (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body))]
pub async fn update_standalone_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonObjectBody(body): JsonObjectBody,
) -> Result<Json<StandalonePostResponse>, AppError> {
    ensure_ids_match(&id, body.get("id"))?;
    let payload: UpdateStandalonePostRequest = from_body(body)?;
    let post_id = parse_id(&id, "Post")?;

    if payload.is_empty() {
        let existing = find_standalone_post(&state.db, post_id).await?;
        return Ok(Json(serialize_standalone(existing)));
    }

    let mut changes = <standalone_post::ActiveModel as Default>::default();
    if let Some(title) = payload.title {
        changes.title = Set(title);
    }
    if let Some(content) = payload.content {
        changes.content = Set(content);
    }
    if let Some(author) = payload.author {
        changes.author_first_name = Set(author.first_name);
        changes.author_last_name = Set(author.last_name);
    }

    let result = standalone_post::Entity::update_many()
        .set(changes)
        .filter(standalone_post::Column::Id.eq(post_id))
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Post not found".into()));
    }

    let model = find_standalone_post(&state.db, post_id).await?;
    Ok(Json(serialize_standalone(model)))
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "Standalone Posts",
    operation_id = "deleteStandalonePost",
    summary = "Delete a post",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_standalone_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post_id = parse_id(&id, "Post")?;

    let result = standalone_post::Entity::delete_by_id(post_id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Post not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn find_standalone_post<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<standalone_post::Model, AppError> {
    standalone_post::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))
}
