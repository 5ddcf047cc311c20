//! HTTP server initialization and runtime setup.
//!
//! Builds the webhook gateways, picks a draft store, spawns the notification
//! worker and runs the Axum server.

use crate::application::services::{
    BookingService, CatalogService, CertificateService, DraftService, QuoteService,
};
use crate::config::Config;
use crate::domain::notification_worker::run_notification_worker;
use crate::domain::repositories::DraftStore;
use crate::infrastructure::drafts::{MemoryDraftStore, RedisDraftStore};
use crate::infrastructure::http::{
    HttpBookingGateway, HttpCatalogGateway, HttpCertificateGateway, HttpNotificationGateway,
    HttpPaymentGateway, HttpPromoGateway, WebhookClient,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Webhook clients for the booking, payment and notification services
/// - Redis draft store (or in-memory fallback)
/// - Background notification worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - A service URL is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let timeout = config.http_timeout();
    let booking_api = WebhookClient::new(&config.booking_api_base_url, timeout)
        .context("Invalid BOOKING_API_BASE_URL")?;
    let payment_api = WebhookClient::new(&config.payment_api_url, timeout)
        .context("Invalid PAYMENT_API_URL")?;
    let notification_api = WebhookClient::new(&config.notification_api_url, timeout)
        .context("Invalid NOTIFICATION_API_URL")?;

    let draft_store: Arc<dyn DraftStore> = if let Some(redis_url) = &config.redis_url {
        match RedisDraftStore::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Draft store: Redis");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-memory drafts.", e);
                Arc::new(MemoryDraftStore::new())
            }
        }
    } else {
        tracing::info!("Draft store: in-memory");
        Arc::new(MemoryDraftStore::new())
    };

    let (notification_tx, notification_rx) = mpsc::channel(config.notification_queue_capacity);
    tokio::spawn(run_notification_worker(
        notification_rx,
        Arc::new(HttpNotificationGateway::new(notification_api)),
    ));
    tracing::info!("Notification worker started");

    let catalog = Arc::new(HttpCatalogGateway::new(booking_api.clone()));
    let catalog_service = Arc::new(CatalogService::new(
        catalog.clone(),
        config.age_bound_unit,
    ));
    let quote_service = Arc::new(QuoteService::new(
        catalog,
        Arc::new(HttpPromoGateway::new(booking_api.clone())),
        config.age_bound_unit,
    ));
    let certificate_service = Arc::new(CertificateService::new(Arc::new(
        HttpCertificateGateway::new(booking_api.clone()),
    )));
    let booking_service = Arc::new(BookingService::new(
        quote_service.clone(),
        Arc::new(HttpBookingGateway::new(booking_api)),
        Arc::new(HttpPaymentGateway::new(payment_api)),
        notification_tx,
    ));
    let draft_service = Arc::new(DraftService::new(draft_store, config.draft_ttl()));

    let state = AppState::new(
        catalog_service,
        quote_service,
        booking_service,
        draft_service,
        certificate_service,
    );

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
