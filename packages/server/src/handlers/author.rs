use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{author, blog_post, comment};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::JsonObjectBody;
use crate::models::author::*;
use crate::models::shared::{ensure_ids_match, from_body, parse_id, require_fields};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/authors",
    tag = "Authors",
    operation_id = "listAuthors",
    summary = "List all authors",
    responses(
        (status = 200, description = "All authors", body = Vec<AuthorResponse>),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_authors(
    State(state): State<AppState>,
) -> Result<Json<Vec<AuthorResponse>>, AppError> {
    let authors = author::Entity::find()
        .order_by_asc(author::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(authors.into_iter().map(AuthorResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/authors",
    tag = "Authors",
    operation_id = "createAuthor",
    summary = "Create an author",
    description = "All three fields must be present. `userName` must not belong to another author.",
    request_body = CreateAuthorRequest,
    responses(
        (status = 201, description = "Author created", body = AuthorResponse),
        (status = 400, description = "Missing field (VALIDATION_ERROR) or username taken (USERNAME_TAKEN)", body = ErrorBody),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body))]
pub async fn create_author(
    State(state): State<AppState>,
    JsonObjectBody(body): JsonObjectBody,
) -> Result<impl IntoResponse, AppError> {
    require_fields(&body, &CREATE_AUTHOR_FIELDS)?;
    let payload: CreateAuthorRequest = from_body(body)?;

    let new_author = author::ActiveModel {
        id: Set(Uuid::now_v7()),
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
        user_name: Set(payload.user_name),
        ..Default::default()
    };
    let model = new_author
        .insert(&state.db)
        .await
        .map_err(AppError::from_author_write)?;

    tracing::info!(author_id = %model.id, user_name = %model.user_name, "Author created");
    Ok((StatusCode::CREATED, Json(AuthorResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "Authors",
    operation_id = "updateAuthor",
    summary = "Update an author",
    description = "Partial update: only fields present in the body are changed. The body `id` must equal the path id.",
    params(("id" = String, Path, description = "Author ID")),
    request_body = UpdateAuthorRequest,
    responses(
        (status = 200, description = "Author updated", body = AuthorResponse),
        (status = 400, description = "Id mismatch (VALIDATION_ERROR) or username taken (USERNAME_TAKEN)", body = ErrorBody),
        (status = 404, description = "Author not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body))]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonObjectBody(body): JsonObjectBody,
) -> Result<Json<AuthorResponse>, AppError> {
    ensure_ids_match(&id, body.get("id"))?;
    let payload: UpdateAuthorRequest = from_body(body)?;
    let author_id = parse_id(&id, "Author")?;

    if payload.is_empty() {
        let existing = find_author(&state.db, author_id).await?;
        return Ok(Json(existing.into()));
    }

    let mut changes = <author::ActiveModel as Default>::default();
    if let Some(first_name) = payload.first_name {
        changes.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        changes.last_name = Set(last_name);
    }
    if let Some(user_name) = payload.user_name {
        changes.user_name = Set(user_name);
    }

    let result = author::Entity::update_many()
        .set(changes)
        .filter(author::Column::Id.eq(author_id))
        .exec(&state.db)
        .await
        .map_err(AppError::from_author_write)?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Author not found".into()));
    }

    let model = find_author(&state.db, author_id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "Authors",
    operation_id = "deleteAuthor",
    summary = "Delete an author and their posts",
    description = "Deletes every blog post (with its comments) that references the author, then the author itself, in one transaction.",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author and posts deleted"),
        (status = 404, description = "Author not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Backend error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let author_id = parse_id(&id, "Author")?;

    // Open with a write: SQLite will not upgrade a shared lock mid-transaction.
    let txn = state.db.begin().await?;

    comment::Entity::delete_many()
        .filter(
            comment::Column::PostId.in_subquery(
                SeaQuery::select()
                    .column(blog_post::Column::Id)
                    .from(blog_post::Entity)
                    .and_where(blog_post::Column::AuthorId.eq(author_id))
                    .to_owned(),
            ),
        )
        .exec(&txn)
        .await?;

    let posts = blog_post::Entity::delete_many()
        .filter(blog_post::Column::AuthorId.eq(author_id))
        .exec(&txn)
        .await?;
    let deleted = author::Entity::delete_by_id(author_id).exec(&txn).await?;
    if deleted.rows_affected == 0 {
        txn.rollback().await?;
        return Err(AppError::NotFound("Author not found".into()));
    }

    txn.commit().await?;

    tracing::info!(
        %author_id,
        posts_deleted = posts.rows_affected,
        "Author deleted along with blog posts"
    );
    Ok(StatusCode::NO_CONTENT)
}

async fn find_author<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<author::Model, AppError> {
    author::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Author not found".into()))
}
