use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::author::*;
use crate::handlers::post::*;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(tags(
    (name = "Authors", description = "Author CRUD operations"),
    (name = "Posts", description = "Blog post CRUD operations with populated authors"),
))]
struct RelationalDoc;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(RelationalDoc::openapi())
        .merge(author_routes())
        .merge(post_routes())
}

fn author_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_authors, create_author))
        .routes(routes!(update_author, delete_author))
}

fn post_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_posts, create_post))
        .routes(routes!(get_post, update_post, delete_post))
        .routes(routes!(add_comment))
}
