//! Table query parameters: search, `filter.<column>`, sort, pagination and
//! column visibility.

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};
use std::collections::{BTreeMap, HashMap};

use crate::domain::table::{
    Column, ColumnVisibility, DEFAULT_PAGE_SIZE, SortDirection, SortSpec, TablePage, TableQuery,
    Viewport,
};
use crate::error::AppError;

const FILTER_PREFIX: &str = "filter.";
const MAX_PAGE_SIZE: u32 = 100;

/// Query string of table endpoints.
///
/// ```text
/// ?search=ravi&filter.city=pune&sort=event_date&order=desc&page=2&page_size=25&hidden=city,created_at&viewport=compact
/// ```
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct TableParams {
    #[serde(default)]
    pub search: Option<String>,

    #[serde(default)]
    pub sort: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub order: Option<SortDirection>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Comma-separated column keys the user has hidden.
    #[serde(default)]
    pub hidden: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub viewport: Option<Viewport>,

    /// Everything else; only `filter.<column>` keys are accepted.
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

impl TableParams {
    /// Builds the table query.
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Page size must be between 1 and 100 (default 10)
    /// - Only `filter.<column>` may appear besides the named parameters
    pub fn to_query(&self) -> Result<TableQuery, AppError> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(AppError::bad_request(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(AppError::bad_request(
                format!("Page size must be between 1 and {}", MAX_PAGE_SIZE),
                json!({ "page_size": page_size }),
            ));
        }

        let mut filters = BTreeMap::new();
        for (key, value) in &self.extra {
            match key.strip_prefix(FILTER_PREFIX) {
                Some(column) if !column.is_empty() => {
                    filters.insert(column.to_string(), value.clone());
                }
                _ => {
                    return Err(AppError::bad_request(
                        "Unknown query parameter",
                        json!({ "parameter": key }),
                    ));
                }
            }
        }

        let sort = self
            .sort
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|column| SortSpec::new(column, self.order.unwrap_or_default()));

        Ok(TableQuery {
            search: self.search.clone(),
            filters,
            sort,
            page,
            page_size,
        })
    }

    /// User-hidden columns, resolved against the table's column set.
    pub fn visibility(&self, columns: &[Column]) -> Result<ColumnVisibility, AppError> {
        let mut visibility = ColumnVisibility::new();
        let keys = self
            .hidden
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty());

        for key in keys {
            let column = columns.iter().find(|c| c.key == key).ok_or_else(|| {
                AppError::bad_request("Unknown column", json!({ "column": key }))
            })?;
            if visibility.is_shown(column) {
                visibility.toggle(column.key);
            }
        }

        Ok(visibility)
    }

    /// Removes a table-specific parameter so [`Self::to_query`] does not
    /// reject it.
    pub fn take_param(&mut self, key: &str) -> Option<String> {
        self.extra.remove(key)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.unwrap_or_default()
    }
}

/// Pagination metadata for table responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl<R> From<&TablePage<R>> for PaginationMeta {
    fn from(page: &TablePage<R>) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            total_items: page.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn parse(query: &str) -> Result<TableParams, String> {
        let uri: Uri = format!("/admin/bookings?{query}").parse().unwrap();
        Query::<TableParams>::try_from_uri(&uri)
            .map(|Query(p)| p)
            .map_err(|e| e.body_text())
    }

    fn params(query: &str) -> TableParams {
        parse(query).unwrap()
    }

    #[test]
    fn test_defaults() {
        let query = params("").to_query().unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
        assert!(query.sort.is_none());
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_filters_and_sort() {
        let query = params("filter.city=Pune&sort=event_date&order=desc&page=2&page_size=25")
            .to_query()
            .unwrap();

        assert_eq!(query.filters.get("city").map(String::as_str), Some("Pune"));
        assert_eq!(
            query.sort,
            Some(SortSpec::new("event_date", SortDirection::Desc))
        );
        assert_eq!(query.page, 2);
        assert_eq!(query.page_size, 25);
    }

    #[test]
    fn test_page_zero_is_error() {
        assert!(params("page=0").to_query().is_err());
    }

    #[test]
    fn test_page_size_bounds() {
        assert!(params("page_size=0").to_query().is_err());
        assert!(params("page_size=100").to_query().is_ok());
        assert!(params("page_size=101").to_query().is_err());
    }

    #[test]
    fn test_unknown_parameter_is_error() {
        assert!(params("colour=red").to_query().is_err());
        assert!(params("filter.=x").to_query().is_err());
    }

    #[test]
    fn test_taken_param_is_not_rejected() {
        let mut p = params("event_id=7&filter.city=Pune");
        assert!(p.to_query().is_err());

        assert_eq!(p.take_param("event_id").as_deref(), Some("7"));
        assert_eq!(p.take_param("event_id"), None);
        assert!(p.to_query().is_ok());
    }

    #[test]
    fn test_non_numeric_page_fails_to_parse() {
        assert!(parse("page=abc").is_err());
    }

    #[test]
    fn test_visibility_and_viewport() {
        let columns = vec![Column::new("city", "City"), Column::new("status", "Status")];
        let p = params("hidden=city&viewport=compact");

        let visibility = p.visibility(&columns).unwrap();
        assert!(!visibility.is_shown(&columns[0]));
        assert!(visibility.is_shown(&columns[1]));
        assert_eq!(p.viewport(), Viewport::Compact);

        assert!(params("hidden=nope").visibility(&columns).is_err());
    }
}
