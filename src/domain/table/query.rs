//! Search, filter, sort and pagination over in-memory rows.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::str::FromStr;

use super::column::Column;
use super::row::TableRow;
use crate::error::AppError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    /// Header click: a new column sorts ascending, the current column flips.
    pub fn toggle(current: Option<&SortSpec>, column: &str) -> SortSpec {
        match current {
            Some(spec) if spec.column == column => {
                SortSpec::new(column, spec.direction.flipped())
            }
            _ => SortSpec::new(column, SortDirection::Asc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub search: Option<String>,
    /// Column key to case-insensitive needle.
    pub filters: BTreeMap<String, String>,
    pub sort: Option<SortSpec>,
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            search: None,
            filters: BTreeMap::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage<R> {
    pub items: Vec<R>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl TableQuery {
    /// Checks that filters and sort only name known columns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for unknown, unfilterable or unsortable columns.
    pub fn validate(&self, columns: &[Column]) -> Result<(), AppError> {
        for key in self.filters.keys() {
            let known = columns
                .iter()
                .any(|c| c.key == key.as_str() && c.filterable && !c.hidden);
            if !known {
                return Err(AppError::bad_request(
                    "Unknown filter column",
                    json!({ "column": key }),
                ));
            }
        }

        if let Some(sort) = &self.sort {
            let known = columns
                .iter()
                .any(|c| c.key == sort.column.as_str() && c.sortable);
            if !known {
                return Err(AppError::bad_request(
                    "Unknown sort column",
                    json!({ "column": sort.column }),
                ));
            }
        }

        Ok(())
    }

    /// Rows matching search and filters, sorted. Input order is kept for
    /// equal sort keys in both directions.
    pub fn filter_and_sort<'a, R: TableRow>(&self, rows: &'a [R]) -> Vec<&'a R> {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let filters: Vec<(&str, String)> = self
            .filters
            .iter()
            .map(|(k, v)| (k.as_str(), v.trim().to_lowercase()))
            .filter(|(_, v)| !v.is_empty())
            .collect();

        let mut matched: Vec<&R> = rows
            .iter()
            .filter(|row| {
                if let Some(needle) = &search {
                    let hit = row
                        .cells()
                        .iter()
                        .any(|(_, v)| v.contains_ignore_case(needle));
                    if !hit {
                        return false;
                    }
                }
                filters
                    .iter()
                    .all(|(key, needle)| row.cell(key).contains_ignore_case(needle))
            })
            .collect();

        if let Some(sort) = &self.sort {
            let key = sort.column.as_str();
            matched.sort_by(|a, b| {
                let ord = a.cell(key).sort_cmp(&b.cell(key));
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        matched
    }

    /// Filters, sorts and returns the requested page. A page past the end is empty.
    pub fn apply<R: TableRow + Clone>(&self, rows: &[R]) -> TablePage<R> {
        let matched = self.filter_and_sort(rows);
        let page = self.page.max(1);
        let page_size = self.page_size.max(1);
        let total_items = matched.len() as u64;
        let total_pages = total_items.div_ceil(u64::from(page_size)) as u32;

        let offset = (page as usize - 1).saturating_mul(page_size as usize);
        let items = matched
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect();

        TablePage {
            items,
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}
