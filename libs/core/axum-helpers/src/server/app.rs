use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{cors_layer_from_env, security_headers};
use axum::{Json, Router, middleware, routing::get};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Wrap `apis` with documentation and the cross-cutting layers.
///
/// - OpenAPI JSON at [`OPENAPI_JSON_PATH`], Scalar at `/scalar`, ReDoc at `/redoc`
/// - `apis` merged at the root; domain routers arrive with state applied
/// - JSON 404 and 405 fallbacks
/// - request tracing, security headers, compression
/// - CORS only when `CORS_ALLOWED_ORIGIN` is set
///
/// # Errors
/// Fails when `CORS_ALLOWED_ORIGIN` is set to an empty or invalid value.
///
/// ```ignore
/// let router = create_router::<ApiDoc>(
///     Router::new().nest("/item", domain_items::handlers::router(service)),
/// )?;
/// ```
pub fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let spec = T::openapi();

    let mut router = Router::new()
        .route(
            OPENAPI_JSON_PATH,
            get({
                let spec = spec.clone();
                move || async move { Json(spec) }
            }),
        )
        .merge(Redoc::with_url("/redoc", spec.clone()))
        .merge(Scalar::with_url("/scalar", spec))
        .merge(apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    if let Some(cors) = cors_layer_from_env()? {
        router = router.layer(cors);
    }

    Ok(router.layer(CompressionLayer::new()))
}

/// Serve `router` until SIGINT/SIGTERM, then drain requests and run `cleanup`.
///
/// `cleanup` is bounded by `shutdown_timeout`; overrunning it is logged and
/// the process proceeds to exit.
///
/// ```ignore
/// create_production_app(router, &config.server, Duration::from_secs(30), async move {
///     client.shutdown().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal_waiter = coordinator.clone();
    let signal_handle = tokio::spawn(async move { signal_waiter.wait_for_signal().await });

    let cleanup_waiter = coordinator.clone();
    let cleanup_handle = tokio::spawn(async move {
        cleanup_waiter.wait_for_shutdown().await;

        info!(timeout = ?shutdown_timeout, "Running cleanup");
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed"),
            Err(_) => warn!(timeout = ?shutdown_timeout, "Cleanup timed out, forcing shutdown"),
        }
    });

    let server_shutdown = coordinator.clone();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { server_shutdown.wait_for_shutdown().await })
        .await
        .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e));

    // Unblocks cleanup when the server stopped without a signal.
    coordinator.shutdown();
    signal_handle.abort();
    cleanup_handle.await.ok();

    serve_result
}
