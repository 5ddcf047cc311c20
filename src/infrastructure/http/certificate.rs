//! Certificate list webhook.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::client::WebhookClient;
use super::coerce;
use crate::domain::entities::{CertificateFilter, CertificateListItem, CertificateStatus};
use crate::domain::gateways::CertificateGateway;
use crate::error::AppError;

pub struct HttpCertificateGateway {
    client: WebhookClient,
}

impl HttpCertificateGateway {
    pub fn new(client: WebhookClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
struct ListRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    event_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<CertificateStatus>,
}

/// Rows without an id or with an unknown status are dropped.
fn parse_certificate(v: &Value) -> Option<CertificateListItem> {
    let status = coerce::text(v, &["status"])?.parse().ok()?;

    Some(CertificateListItem {
        id: coerce::integer(v, &["id", "certificate_id"])?,
        certificate_number: coerce::text(v, &["certificate_number"]),
        event_id: coerce::integer(v, &["event_id"]),
        event_title: coerce::text(v, &["event_title"]).unwrap_or_default(),
        event_date: coerce::date(v, &["event_date"]),
        venue_name: coerce::text(v, &["venue_name"]).unwrap_or_default(),
        city_name: coerce::text(v, &["city_name"]).unwrap_or_default(),
        child_name: coerce::text(v, &["child_name"]).unwrap_or_default(),
        game_name: coerce::text(v, &["game_name"]).unwrap_or_default(),
        parent_name: coerce::text(v, &["user_name", "parent_name"]).unwrap_or_default(),
        parent_email: coerce::text(v, &["user_email", "parent_email"]).unwrap_or_default(),
        status,
        generated_at: coerce::datetime(v, &["generated_at", "created_at"]),
    })
}

fn in_scope(item: &CertificateListItem, filter: &CertificateFilter) -> bool {
    filter.event_id.is_none_or(|id| item.event_id == Some(id))
        && filter.status.is_none_or(|s| item.status == s)
}

#[async_trait]
impl CertificateGateway for HttpCertificateGateway {
    async fn list_certificates(
        &self,
        filter: CertificateFilter,
    ) -> Result<Vec<CertificateListItem>, AppError> {
        let request = ListRequest {
            event_id: filter.event_id,
            status: filter.status,
        };
        let body = self.client.post_json("certificates/get-all", &request).await?;
        let items = coerce::list(body);
        let total = items.len();

        let parsed: Vec<CertificateListItem> = items.iter().filter_map(parse_certificate).collect();
        if parsed.len() < total {
            warn!(
                skipped = total - parsed.len(),
                "Dropped certificate rows without an id or with an unknown status"
            );
        }

        // Upstream may ignore the filter body.
        Ok(parsed.into_iter().filter(|c| in_scope(c, &filter)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(id: i64, event_id: i64, status: &str) -> Value {
        json!({
            "id": id.to_string(),
            "event_id": event_id,
            "event_title": "Baby Olympics",
            "child_name": "Asha",
            "user_name": "Ravi",
            "user_email": "ravi@example.com",
            "status": status,
            "generated_at": "2026-12-06T10:00:00Z"
        })
    }

    #[test]
    fn test_parse_certificate_row() {
        let row = parse_certificate(&raw(5, 7, "Sent")).unwrap();
        assert_eq!(row.id, 5);
        assert_eq!(row.event_id, Some(7));
        assert_eq!(row.status, CertificateStatus::Sent);
        assert_eq!(row.parent_email, "ravi@example.com");
        assert!(row.generated_at.is_some());
        assert!(row.certificate_number.is_none());
    }

    #[test]
    fn test_parse_drops_incomplete_rows() {
        assert!(parse_certificate(&raw(5, 7, "archived")).is_none());
        assert!(parse_certificate(&json!({ "status": "sent" })).is_none());
    }

    #[test]
    fn test_filter_scope() {
        let row = parse_certificate(&raw(5, 7, "generated")).unwrap();
        assert!(in_scope(&row, &CertificateFilter::default()));
        assert!(in_scope(
            &row,
            &CertificateFilter {
                event_id: Some(7),
                status: Some(CertificateStatus::Generated),
            }
        ));
        assert!(!in_scope(
            &row,
            &CertificateFilter {
                event_id: Some(8),
                status: None,
            }
        ));
        assert!(!in_scope(
            &row,
            &CertificateFilter {
                event_id: None,
                status: Some(CertificateStatus::Failed),
            }
        ));
    }

    #[test]
    fn test_list_request_omits_unset_filters() {
        let body = serde_json::to_value(ListRequest {
            event_id: None,
            status: Some(CertificateStatus::Sent),
        })
        .unwrap();
        assert_eq!(body, json!({ "status": "sent" }));
    }
}
