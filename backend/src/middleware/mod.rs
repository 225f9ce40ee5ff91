//! General-purpose middleware for the API.
//!
//! Request/response logging through `tower-http`, applied to the whole
//! router.

use axum::{body::Body, http::Request};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{info_span, Level, Span};

/// Log filter used when `RUST_LOG` is unset. Leaves the per-request INFO
/// events from [`trace_layer`] enabled.
pub const DEFAULT_LOG_FILTER: &str = "info";

pub fn trace_layer(
) -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, fn(&Request<Body>) -> Span> {
    TraceLayer::new_for_http()
        .make_span_with(request_span as fn(&Request<Body>) -> Span)
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

// Headers stay out of the span: `/data` carries passwords in them.
fn request_span(request: &Request<Body>) -> Span {
    info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}
