use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

/// CORS layer for the given origins: common methods, JSON headers,
/// credentials and a one hour max age.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Build a CORS layer from the comma-separated `CORS_ALLOWED_ORIGIN` variable.
///
/// Returns `Ok(None)` when the variable is unset, and an error when it is set
/// but empty or holds a value that is not a valid header.
pub fn cors_layer_from_env() -> io::Result<Option<CorsLayer>> {
    let Ok(raw) = std::env::var("CORS_ALLOWED_ORIGIN") else {
        return Ok(None);
    };

    let origins = parse_origins(&raw)?;
    info!(origins = %raw, "CORS enabled");
    Ok(Some(create_cors_layer(origins)))
}

fn parse_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    Ok(origins)
}
