use std::collections::HashSet;

use super::entities::{ItemId, Row, SelectionSummary};

/// Set of selected row keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    keys: HashSet<ItemId>,
}

impl SelectionSet {
    /// Adds the key if absent, removes it if present.
    pub fn toggle(&mut self, key: &ItemId) {
        if !self.keys.remove(key) {
            self.keys.insert(key.clone());
        }
    }

    /// Replaces the selection with exactly the keys of `rows`.
    pub fn select_all(&mut self, rows: &[Row]) {
        self.keys = rows.iter().map(|row| row.key.clone()).collect();
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn contains(&self, key: &ItemId) -> bool {
        self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Count and value of selected rows. Keys without a matching row are ignored.
    pub fn summary(&self, rows: &[Row]) -> SelectionSummary {
        rows.iter()
            .filter(|row| self.keys.contains(&row.key))
            .fold(SelectionSummary::default(), |acc, row| SelectionSummary {
                count: acc.count + 1,
                value: acc.value + if row.line_total.is_finite() { row.line_total } else { 0.0 },
            })
    }
}
