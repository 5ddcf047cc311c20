//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Request span at `INFO` with method, URI and version; the response line
/// carries status and latency in milliseconds.
///
/// Upstream outages surface as 502 responses, which this layer classifies as
/// failures and logs again at `ERROR`.
///
/// ```text
/// INFO request{method=POST uri=/api/quote version=HTTP/1.1}: finished processing request latency=38 ms status=200
/// ERROR request{method=GET uri=/api/cities version=HTTP/1.1}: response failed classification=Status code: 502 Bad Gateway latency=10004 ms
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
