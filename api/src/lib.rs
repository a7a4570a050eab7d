pub mod middleware;
pub mod response;
pub mod routes;

use axum::{
    Router,
    http::{HeaderValue, header::CONTENT_TYPE},
    middleware::from_fn,
    routing::get,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;
use util::{config, state::AppState};

use crate::middleware::log_request;
use crate::routes::{index::index, routes};

/// Full application: `/` plus every route group, with request logging and CORS.
pub fn app(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .merge(routes(app_state.clone()))
        .with_state(app_state)
        .layer(from_fn(log_request))
        .layer(cors_layer(&config::cors_origins()))
}

/// An empty origin list allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::very_permissive().expose_headers([CONTENT_TYPE]);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
