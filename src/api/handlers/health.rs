//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Draft store**: Redis PING (always ok for the in-memory store)
/// 2. **Notification queue**: Channel open, remaining capacity
///
/// Upstream webhooks are not probed; their failures show up per request as 502.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "draft_store": { "status": "ok", "message": "Draft store reachable" },
///     "notification_queue": { "status": "ok", "message": "Capacity: 1000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let draft_check = check_draft_store(&state).await;
    let queue_check = check_notification_queue(&state);

    let all_healthy = draft_check.is_ok() && queue_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            draft_store: draft_check,
            notification_queue: queue_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_draft_store(state: &AppState) -> CheckStatus {
    if state.draft_service.health_check().await {
        CheckStatus::ok("Draft store reachable")
    } else {
        CheckStatus::error("Draft store unreachable")
    }
}

fn check_notification_queue(state: &AppState) -> CheckStatus {
    if state.booking_service.notifications_closed() {
        CheckStatus::error("Notification queue is closed")
    } else {
        CheckStatus::ok(format!(
            "Capacity: {}",
            state.booking_service.notification_capacity()
        ))
    }
}
