use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Any origin may read the API, matching the public poster bucket.
pub(crate) fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any)
}
