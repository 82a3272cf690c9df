//! Minimal HTTP status service.
//!
//! Serves `GET /api/status` with a fixed JSON payload, behind a generic JSON
//! body parsing middleware and per-request tracing spans.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;

use std::future::Future;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use config::Config;
use error::StartupError;

/// Creates the Axum application router.
///
/// `json_limit` bounds the size of JSON request bodies the middleware will buffer.
pub fn create_app(json_limit: usize) -> Router {
    Router::new()
        .route("/", get(routes::home::index))
        .route("/api/status", get(routes::status::check))
        .route("/status", get(routes::status::service))
        .layer(axum::middleware::from_fn_with_state(
            json_limit,
            middleware::parse_json_body,
        ))
        .layer(TraceLayer::new_for_http())
}

/// Binds the configured `host:port`.
pub async fn bind(config: &Config) -> Result<TcpListener, StartupError> {
    let addr = config.addr();
    let listener = TcpListener::bind(addr.as_str())
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    Ok(listener)
}

/// Startup message printed to stdout once the listener is bound.
pub fn startup_banner(addr: &str) -> String {
    format!("Backend Running on {addr}")
}

/// Serves `app` on `listener` until `shutdown` resolves, then drains
/// in-flight requests.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
