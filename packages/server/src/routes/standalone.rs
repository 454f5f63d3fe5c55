use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::standalone::*;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(tags(
    (name = "Standalone Posts", description = "Blog posts carrying their author's name inline"),
))]
struct StandaloneDoc;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(StandaloneDoc::openapi())
        .routes(routes!(list_standalone_posts, create_standalone_post))
        .routes(routes!(
            get_standalone_post,
            update_standalone_post,
            delete_standalone_post
        ))
}
