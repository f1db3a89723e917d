//! Ordering of display rows.

use std::cmp::Ordering;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use super::entities::{Row, SortDirection, SortKey, SortSpec};

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Header click: a new column starts descending, the active one flips.
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.direction.flipped())
        } else {
            Self::new(key, SortDirection::Descending)
        }
    }

    pub fn indicator(&self, key: SortKey) -> &'static str {
        match (self.key == key, self.direction) {
            (false, _) => "↕",
            (true, SortDirection::Descending) => "↓",
            (true, SortDirection::Ascending) => "↑",
        }
    }
}

/// Returns the rows ordered by `spec`. Equal keys keep their input order.
pub fn sort_rows(rows: &[Row], spec: SortSpec) -> Vec<Row> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, spec.key);
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

fn compare(a: &Row, b: &Row, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_names(&a.name, &b.name),
        SortKey::Quantity => a.quantity.total_cmp(&b.quantity),
        SortKey::UnitPrice => a.unit_price.total_cmp(&b.unit_price),
        SortKey::LineTotal => a.line_total.total_cmp(&b.line_total),
    }
}

/// Collation-style name ordering.
///
/// Primary level ignores case and accents and ranks symbols before digits
/// before letters. Accents, then case, then code points break ties.
fn compare_names(a: &str, b: &str) -> Ordering {
    primary_weights(a)
        .cmp(primary_weights(b))
        .then_with(|| accent_weights(a).cmp(accent_weights(b)))
        .then_with(|| case_weights(a).cmp(case_weights(b)))
        .then_with(|| a.cmp(b))
}

fn primary_weights(name: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
}

fn accent_weights(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}

// Lowercase sorts ahead of uppercase on an otherwise equal name.
fn case_weights(name: &str) -> impl Iterator<Item = bool> + '_ {
    name.chars().map(char::is_uppercase)
}

fn char_class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}
