use std::fmt;

use serde::{Deserialize, Serialize};
use time::{macros::format_description, OffsetDateTime};

/// Placeholder used when a backend entry carries no usable name.
pub const UNKNOWN_ITEM_NAME: &str = "Unknown item";

/// Stable identifier for one normalized item.
///
/// Derived from the item's canonical fields, so the same payload always yields
/// the same identifiers, and two items that merely share a display name do not
/// collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical record for one priced item group.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedItem {
    pub id: ItemId,
    pub display_name: String,
    /// Never negative; defaults to 1 when the backend omits it.
    pub quantity: f64,
    pub unit_price: Option<f64>,
    pub line_total: Option<f64>,
    pub image_url: Option<String>,
}

/// Output of the normalizer before any totals are derived.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedPayload {
    pub items: Vec<NormalizedItem>,
    pub backend_total: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedValues {
    pub unit_price: f64,
    pub line_total: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TotalSource {
    Backend,
    #[default]
    Derived,
}

/// One valuation snapshot: normalized items plus the grand total.
#[derive(Clone, Debug, PartialEq)]
pub struct ValuationResult {
    pub items: Vec<NormalizedItem>,
    pub total: f64,
    pub total_source: TotalSource,
}

impl Default for ValuationResult {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0.0,
            total_source: TotalSource::Derived,
        }
    }
}

/// Display-ready projection of a normalized item.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub key: ItemId,
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub line_total: f64,
    pub image_url: Option<String>,
}

/// A valuation snapshot together with its projected rows.
#[derive(Clone, Debug, PartialEq)]
pub struct InventorySnapshot {
    pub identifier: String,
    pub result: ValuationResult,
    pub rows: Vec<Row>,
    pub fetched_at: OffsetDateTime,
}

impl InventorySnapshot {
    /// Sum of the projected line totals, independent of the reported total.
    pub fn row_sum(&self) -> f64 {
        self.rows.iter().map(|row| row.line_total).sum()
    }

    /// `HH:MM` of the fetch, in UTC.
    pub fn fetched_label(&self) -> String {
        self.fetched_at
            .format(format_description!("[hour]:[minute]"))
            .unwrap_or_default()
    }

    /// True when the backend reported a grand total that differs from the rows.
    pub fn total_mismatch(&self) -> bool {
        self.result.total_source == TotalSource::Backend
            && (self.result.total - self.row_sum()).abs() >= 0.005
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Name,
    Quantity,
    UnitPrice,
    #[default]
    LineTotal,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Quantity => "Amount",
            Self::UnitPrice => "Unit price",
            Self::LineTotal => "Total value",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectionSummary {
    pub count: usize,
    pub value: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    Table,
    #[default]
    Grid,
}

/// Formats a monetary amount with two decimals, or `-` when not finite.
pub fn format_money(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        "-".to_string()
    }
}

/// Formats a quantity without a trailing `.0` for whole counts.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_uses_two_decimals_and_dash_for_non_finite() {
        assert_eq!(format_money(7.5), "7.50");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(f64::NAN), "-");
        assert_eq!(format_money(f64::INFINITY), "-");
    }

    #[test]
    fn quantity_drops_fraction_for_whole_counts() {
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(2.5), "2.5");
    }

    #[test]
    fn snapshot_reports_total_mismatch_only_for_backend_totals() {
        let row = Row {
            key: ItemId::new("k"),
            name: "Knife".to_string(),
            quantity: 1.0,
            unit_price: 100.0,
            line_total: 100.0,
            image_url: None,
        };
        let mut snapshot = InventorySnapshot {
            identifier: "id".to_string(),
            result: ValuationResult {
                items: Vec::new(),
                total: 150.0,
                total_source: TotalSource::Backend,
            },
            rows: vec![row],
            fetched_at: time::macros::datetime!(2024-05-01 09:05 UTC),
        };
        assert_eq!(snapshot.row_sum(), 100.0);
        assert!(snapshot.total_mismatch());
        assert_eq!(snapshot.fetched_label(), "09:05");

        snapshot.result.total_source = TotalSource::Derived;
        assert!(!snapshot.total_mismatch());
    }

    #[test]
    fn default_sort_is_descending_line_total() {
        let spec = SortSpec::default();
        assert_eq!(spec.key, SortKey::LineTotal);
        assert_eq!(spec.direction, SortDirection::Descending);
    }
}
