//! Application setup and router configuration.

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    concept_history_handler, delete_concept_evaluation_handler,
    delete_project_evaluation_handler, evaluate_handler, get_concept_evaluation_handler,
    get_project_evaluation_handler, health_handler, project_history_handler,
    store_evaluation_handler,
};

/// CORS policy. An empty list allows any origin; unparseable entries are
/// skipped with a warning.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
}

/// Build the Axum application router
///
/// `deps` is shared with every handler through an `Extension` layer.
pub fn build_app(deps: ServerDeps, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/evaluate", post(evaluate_handler))
        .route("/store-evaluation", post(store_evaluation_handler))
        .route("/concept-history", get(concept_history_handler))
        .route("/project-history", get(project_history_handler))
        .route(
            "/concept-evaluation/:id",
            get(get_concept_evaluation_handler).delete(delete_concept_evaluation_handler),
        )
        .route(
            "/project-evaluation/:id",
            get(get_project_evaluation_handler).delete(delete_project_evaluation_handler),
        )
        .route("/health", get(health_handler))
        .layer(Extension(deps))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
