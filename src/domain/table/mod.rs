//! Generic data table: search, per-column filters, stable single-column sort,
//! pagination, row selection, responsive column visibility and CSV export.
//!
//! Rows are anything implementing [`TableRow`]; the admin booking list is the
//! main consumer.

pub mod column;
pub mod export;
pub mod query;
pub mod row;
pub mod selection;

pub use column::{COMPACT_PRIORITY_COLUMNS, Column, ColumnVisibility, Viewport};
pub use export::to_csv;
pub use query::{DEFAULT_PAGE_SIZE, SortDirection, SortSpec, TablePage, TableQuery};
pub use row::{CellValue, TableRow};
pub use selection::TableSelection;
