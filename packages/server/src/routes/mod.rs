mod relational;
mod standalone;

use utoipa_axum::router::OpenApiRouter;

use crate::config::BlogMode;
use crate::state::AppState;

pub fn api_routes(mode: BlogMode) -> OpenApiRouter<AppState> {
    match mode {
        BlogMode::Relational => relational::routes(),
        BlogMode::Standalone => standalone::routes(),
    }
}
