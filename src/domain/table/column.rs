//! Column definitions and responsive visibility.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Number of columns kept on compact viewports regardless of `hide_on_compact`.
pub const COMPACT_PRIORITY_COLUMNS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub filterable: bool,
    /// Never displayed nor exported.
    pub hidden: bool,
    pub hide_on_compact: bool,
    /// Lower is more important; `None` ranks last.
    pub priority: Option<u8>,
}

impl Column {
    pub fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: true,
            filterable: true,
            hidden: false,
            hide_on_compact: false,
            priority: None,
        }
    }

    pub fn priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn hide_on_compact(mut self) -> Self {
        self.hide_on_compact = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn unfilterable(mut self) -> Self {
        self.filterable = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    #[default]
    Wide,
    Compact,
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wide" => Ok(Viewport::Wide),
            "compact" => Ok(Viewport::Compact),
            other => Err(format!("unknown viewport '{}'", other)),
        }
    }
}

/// Columns the user chose to hide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnVisibility {
    hidden_by_user: BTreeSet<&'static str>,
}

impl ColumnVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the user visibility of `key`; returns whether it is now shown.
    pub fn toggle(&mut self, key: &'static str) -> bool {
        if self.hidden_by_user.remove(key) {
            true
        } else {
            self.hidden_by_user.insert(key);
            false
        }
    }

    pub fn is_shown(&self, column: &Column) -> bool {
        !column.hidden && !self.hidden_by_user.contains(column.key)
    }

    /// Columns to render for `viewport`, in declaration order.
    ///
    /// On compact viewports the [`COMPACT_PRIORITY_COLUMNS`] most important
    /// columns stay, plus every column not marked `hide_on_compact`.
    pub fn visible_columns<'a>(&self, columns: &'a [Column], viewport: Viewport) -> Vec<&'a Column> {
        let shown: Vec<&Column> = columns.iter().filter(|c| self.is_shown(c)).collect();

        match viewport {
            Viewport::Wide => shown,
            Viewport::Compact => {
                let mut ranked: Vec<&Column> = shown.clone();
                ranked.sort_by_key(|c| c.priority.unwrap_or(u8::MAX));
                let top: Vec<&'static str> = ranked
                    .iter()
                    .take(COMPACT_PRIORITY_COLUMNS)
                    .map(|c| c.key)
                    .collect();

                shown
                    .into_iter()
                    .filter(|c| top.contains(&c.key) || !c.hide_on_compact)
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("a", "A").priority(2).hide_on_compact(),
            Column::new("b", "B").hide_on_compact(),
            Column::new("c", "C").priority(1).hide_on_compact(),
            Column::new("d", "D").priority(3).hide_on_compact(),
            Column::new("e", "E").priority(4).hide_on_compact(),
            Column::new("f", "F"),
            Column::new("id", "ID").hidden(),
        ]
    }

    fn keys(cols: Vec<&Column>) -> Vec<&'static str> {
        cols.iter().map(|c| c.key).collect()
    }

    #[test]
    fn test_wide_shows_all_but_hidden() {
        let visibility = ColumnVisibility::new();
        let cols = columns();
        assert_eq!(
            keys(visibility.visible_columns(&cols, Viewport::Wide)),
            vec!["a", "b", "c", "d", "e", "f"]
        );
    }

    #[test]
    fn test_compact_keeps_top_priorities_and_always_on_columns() {
        let visibility = ColumnVisibility::new();
        let cols = columns();
        assert_eq!(
            keys(visibility.visible_columns(&cols, Viewport::Compact)),
            vec!["a", "c", "d", "f"]
        );
    }

    #[test]
    fn test_user_toggle() {
        let mut visibility = ColumnVisibility::new();
        let cols = columns();

        assert!(!visibility.toggle("c"));
        assert_eq!(
            keys(visibility.visible_columns(&cols, Viewport::Compact)),
            vec!["a", "d", "e", "f"]
        );

        assert!(visibility.toggle("c"));
        assert!(visibility.is_shown(&cols[2]));
        assert!(!visibility.is_shown(&cols[6]));
    }
}
