use axum::http::{header, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Browser access is allowed from the configured frontend only; credentials
/// are permitted, so methods and headers must be listed explicitly.
pub fn cors_layer(frontend_url: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> =
        std::iter::once(frontend_url).filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-api-key"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
