//! HTTP application assembly.
//!
//! Wires the configured feeds into a [`FeedHandler`], adds the health endpoint
//! and wraps everything in the CORS, tracing and metrics layers.

use crate::server::{
    config::ServerConfig,
    feeds::pinned::PinnedFeed,
    telemetry::{
        decrement_requests_inflight, increment_request_errors, increment_requests,
        increment_requests_inflight, increment_requests_not_found, record_request_duration,
    },
};
use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use skyfeed::{CancellationToken, Context, FeedAlgorithm, FeedHandler, FeedRegistry};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::{Any, CorsLayer};

pub const HEALTH_PATH: &str = "/xrpc/_health";

#[derive(Debug, Serialize)]
struct Health {
    version: &'static str,
}

/// Builds the full application router.
///
/// `shutdown` is handed to the feed handler so in-flight algorithms observe
/// shutdown, and flips the health endpoint to `503` once cancelled.
pub fn build_app(config: &ServerConfig, shutdown: CancellationToken) -> anyhow::Result<Router> {
    let ctx = Context::background().with_config(config.feed_generator.clone());
    let feeds: Vec<Arc<dyn FeedAlgorithm>> = vec![Arc::new(PinnedFeed::new(
        config.pinned_feed_name.clone(),
        config.pinned_posts.clone(),
    ))];
    let registry = FeedRegistry::new(feeds)?;

    let handler = FeedHandler::new(ctx, registry).with_shutdown(shutdown.clone());
    let health = Router::new()
        .route(HEALTH_PATH, get(health))
        .with_state(shutdown);

    let app = handler
        .route_describe(handler.route(health))
        .layer(middleware::from_fn(track_requests))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    #[cfg(feature = "tracing")]
    let app = app.layer(tower_http::trace::TraceLayer::new_for_http());

    Ok(app)
}

async fn health(State(shutdown): State<CancellationToken>) -> Response {
    let body = Json(Health {
        version: env!("CARGO_PKG_VERSION"),
    });
    if shutdown.is_cancelled() {
        (StatusCode::SERVICE_UNAVAILABLE, body).into_response()
    } else {
        body.into_response()
    }
}

async fn track_requests(request: Request, next: Next) -> Response {
    increment_requests();
    increment_requests_inflight();
    let mut tracker = RequestTracker::new(finish_request);

    // Dropped here if the client goes away; the tracker still reports
    let response = next.run(request).await;
    tracker.status = Some(response.status());
    response
}

/// Reports the outcome of a request when dropped, whether the request
/// completed or was abandoned mid-flight. `status` is `None` for the latter.
struct RequestTracker<F: FnOnce(Option<StatusCode>, Duration)> {
    start: Instant,
    status: Option<StatusCode>,
    finish: Option<F>,
}

impl<F: FnOnce(Option<StatusCode>, Duration)> RequestTracker<F> {
    fn new(finish: F) -> Self {
        Self {
            start: Instant::now(),
            status: None,
            finish: Some(finish),
        }
    }
}

impl<F: FnOnce(Option<StatusCode>, Duration)> Drop for RequestTracker<F> {
    fn drop(&mut self) {
        if let Some(finish) = self.finish.take() {
            finish(self.status, self.start.elapsed());
        }
    }
}

fn finish_request(status: Option<StatusCode>, elapsed: Duration) {
    decrement_requests_inflight();
    match status {
        Some(StatusCode::NOT_FOUND) => increment_requests_not_found(),
        Some(status) if status.is_server_error() => increment_request_errors(),
        _ => {}
    }
    record_request_duration(elapsed.as_secs_f64() * 1000.0);
}
