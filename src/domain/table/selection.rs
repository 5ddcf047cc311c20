use std::collections::BTreeSet;

use super::row::TableRow;

/// Row ids ticked in a table, for bulk actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSelection {
    ids: BTreeSet<String>,
}

impl TableSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    pub fn deselect(&mut self, id: &str) {
        self.ids.remove(id);
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Selects every row of the current page.
    pub fn select_page<R: TableRow>(&mut self, rows: &[R]) {
        self.ids.extend(rows.iter().map(TableRow::row_id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected rows in table order. Ids with no matching row are ignored.
    pub fn selected_rows<'a, R: TableRow>(&self, rows: &'a [R]) -> Vec<&'a R> {
        rows.iter()
            .filter(|row| self.ids.contains(&row.row_id()))
            .collect()
    }

    /// Selected ids that match no row.
    pub fn unmatched_ids<R: TableRow>(&self, rows: &[R]) -> Vec<String> {
        let present: BTreeSet<String> = rows.iter().map(TableRow::row_id).collect();
        self.ids.difference(&present).cloned().collect()
    }

    /// Hands the selected rows to a bulk action.
    pub fn dispatch<'a, R, T, F>(&self, rows: &'a [R], action: F) -> T
    where
        R: TableRow,
        F: FnOnce(Vec<&'a R>) -> T,
    {
        action(self.selected_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::CellValue;

    struct Row(u32);

    impl TableRow for Row {
        fn row_id(&self) -> String {
            self.0.to_string()
        }

        fn cells(&self) -> Vec<(&'static str, CellValue)> {
            vec![("n", CellValue::Number(f64::from(self.0)))]
        }
    }

    #[test]
    fn test_select_deselect_toggle() {
        let mut selection = TableSelection::new();
        selection.select("1");
        selection.select("2");
        selection.deselect("1");
        selection.toggle("3");
        selection.toggle("2");

        assert!(!selection.is_selected("1"));
        assert!(!selection.is_selected("2"));
        assert!(selection.is_selected("3"));
        assert_eq!(selection.len(), 1);

        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_dispatch_in_table_order() {
        let rows = vec![Row(5), Row(3), Row(9)];
        let selection = TableSelection::from_ids(["9", "5", "42"]);

        let picked = selection.dispatch(&rows, |selected| {
            selected.iter().map(|r| r.0).collect::<Vec<_>>()
        });
        assert_eq!(picked, vec![5, 9]);
        assert_eq!(selection.unmatched_ids(&rows), vec!["42".to_string()]);
    }

    #[test]
    fn test_select_page() {
        let rows = vec![Row(1), Row(2)];
        let mut selection = TableSelection::new();
        selection.select_page(&rows);
        assert_eq!(selection.len(), 2);
    }
}
