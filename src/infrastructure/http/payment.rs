//! Payment initiation and manual payment records.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;

use super::client::WebhookClient;
use super::coerce;
use super::error::GatewayError;
use crate::domain::gateways::{ManualPayment, PaymentGateway, PaymentRequest};
use crate::error::AppError;

/// Talks to the payment service rooted at `PAYMENT_API_URL`.
pub struct HttpPaymentGateway {
    client: WebhookClient,
}

impl HttpPaymentGateway {
    pub fn new(client: WebhookClient) -> Self {
        Self { client }
    }
}

/// Redirect URL from either a flat response or the PhonePe-style envelope.
fn redirect_url(body: &Value) -> Option<String> {
    body.pointer("/data/instrumentResponse/redirectInfo/url")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| coerce::text(body, &["redirectUrl", "payment_url", "url"]))
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn initiate(&self, request: PaymentRequest) -> Result<String, AppError> {
        let body = self
            .client
            .post_json(
                "initiate",
                &json!({
                    "transactionId": request.transaction_id,
                    "userId": request.user_id,
                    "amount": request.amount,
                    "mobileNumber": request.mobile_number,
                }),
            )
            .await?;

        let url = redirect_url(&body)
            .ok_or_else(|| GatewayError::decode("payment response has no redirect URL"))?;

        info!(transaction_id = %request.transaction_id, "Payment initiated");
        Ok(url)
    }

    async fn record_manual(&self, payment: ManualPayment) -> Result<(), AppError> {
        self.client
            .post_json(
                "create",
                &json!({
                    "booking_id": payment.booking_id,
                    "transaction_id": payment.transaction_id,
                    "amount": payment.amount,
                    "payment_method": payment.payment_method.as_str(),
                    "payment_status": payment.payment_status.to_string(),
                    "payment_date": Utc::now().to_rfc3339(),
                    "gateway_response": { "notes": payment.notes },
                }),
            )
            .await?;

        info!(
            booking_id = payment.booking_id,
            transaction_id = %payment.transaction_id,
            "Manual payment recorded"
        );
        Ok(())
    }
}
