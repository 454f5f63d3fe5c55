pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::config::{BlogMode, CorsConfig};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        version = "1.0.0",
        description = "CRUD API for authors and blog posts"
    ),
)]
struct ApiDoc;

/// The OpenAPI document for the routes served in `mode`.
pub fn api_doc(mode: BlogMode) -> utoipa::openapi::OpenApi {
    api_router(mode).split_for_parts().1
}

fn api_router(mode: BlogMode) -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi()).merge(routes::api_routes(mode))
}

/// Build the application router for the mode in `state.config.blog.mode`.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);
    let (router, api) = api_router(state.config.blog.mode).split_for_parts();

    router
        .with_state(state)
        .merge(Scalar::with_url("/scalar", api))
        .fallback(handlers::fallback::not_found)
        .method_not_allowed_fallback(handlers::fallback::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.max_age))
}
