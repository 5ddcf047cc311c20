//! Participation certificates issued after an event.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::table::{CellValue, Column, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    Generated,
    Sent,
    Downloaded,
    Failed,
}

impl CertificateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CertificateStatus::Generated => "generated",
            CertificateStatus::Sent => "sent",
            CertificateStatus::Downloaded => "downloaded",
            CertificateStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CertificateStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generated" => Ok(CertificateStatus::Generated),
            "sent" => Ok(CertificateStatus::Sent),
            "downloaded" => Ok(CertificateStatus::Downloaded),
            "failed" => Ok(CertificateStatus::Failed),
            other => Err(format!("unknown certificate status '{}'", other)),
        }
    }
}

/// Upstream scope of a certificate listing. Unset fields do not filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CertificateFilter {
    pub event_id: Option<i64>,
    pub status: Option<CertificateStatus>,
}

/// One row of the admin certificate list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateListItem {
    pub id: i64,
    pub certificate_number: Option<String>,
    pub event_id: Option<i64>,
    pub event_title: String,
    pub event_date: Option<NaiveDate>,
    pub venue_name: String,
    pub city_name: String,
    pub child_name: String,
    pub game_name: String,
    pub parent_name: String,
    pub parent_email: String,
    pub status: CertificateStatus,
    pub generated_at: Option<DateTime<Utc>>,
}

impl CertificateListItem {
    /// Column layout of the admin certificate table.
    pub fn columns() -> Vec<Column> {
        vec![
            Column::new("event_title", "Event").priority(1),
            Column::new("child_name", "Recipient").priority(2),
            Column::new("status", "Status").priority(2),
            Column::new("generated_at", "Generated Date").priority(3).hide_on_compact(),
            Column::new("parent_name", "Parent Name").hide_on_compact(),
            Column::new("parent_email", "Email").hide_on_compact(),
            Column::new("game_name", "Game").hide_on_compact(),
            Column::new("event_date", "Event Date").hide_on_compact(),
            Column::new("venue_name", "Venue").hide_on_compact(),
            Column::new("city_name", "City").hide_on_compact(),
            Column::new("certificate_number", "Certificate No").hide_on_compact(),
            Column::new("id", "Certificate ID").unsortable().hide_on_compact(),
        ]
    }
}

impl TableRow for CertificateListItem {
    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn cells(&self) -> Vec<(&'static str, CellValue)> {
        vec![
            ("id", CellValue::Number(self.id as f64)),
            (
                "certificate_number",
                CellValue::from(self.certificate_number.as_deref().unwrap_or_default()),
            ),
            ("event_title", CellValue::from(self.event_title.as_str())),
            ("event_date", CellValue::from(self.event_date)),
            ("venue_name", CellValue::from(self.venue_name.as_str())),
            ("city_name", CellValue::from(self.city_name.as_str())),
            ("child_name", CellValue::from(self.child_name.as_str())),
            ("game_name", CellValue::from(self.game_name.as_str())),
            ("parent_name", CellValue::from(self.parent_name.as_str())),
            ("parent_email", CellValue::from(self.parent_email.as_str())),
            ("status", CellValue::from(self.status.as_str())),
            ("generated_at", CellValue::from(self.generated_at)),
        ]
    }
}
