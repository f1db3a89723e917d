use tracing::{debug, warn};

use super::entities::{
    NormalizedItem, NormalizedPayload, ResolvedValues, TotalSource, ValuationResult,
};

/// Resolves the unit price and line total for a single item.
///
/// An explicit line total wins verbatim. Otherwise the line total is
/// `quantity * unit_price`, with a missing unit price counted as 0.
pub fn resolve(item: &NormalizedItem) -> ResolvedValues {
    let unit_price = item.unit_price.unwrap_or(0.0);
    let line_total = item
        .line_total
        .unwrap_or_else(|| item.quantity * unit_price);
    ResolvedValues {
        unit_price,
        line_total,
    }
}

/// Picks the grand total: a nonzero backend total, else the sum of line totals.
pub fn grand_total(resolved: &[ResolvedValues], backend_total: Option<f64>) -> (f64, TotalSource) {
    match backend_total.filter(|total| total.is_finite() && *total != 0.0) {
        Some(total) => (total, TotalSource::Backend),
        None => {
            let skipped = resolved
                .iter()
                .filter(|values| !values.line_total.is_finite())
                .count();
            if skipped > 0 {
                warn!(skipped, "non-finite line totals left out of the grand total");
            }
            let sum: f64 = resolved
                .iter()
                .map(|values| values.line_total)
                .filter(|total| total.is_finite())
                .sum();
            (sum, TotalSource::Derived)
        }
    }
}

/// Builds the valuation snapshot for a normalized payload.
pub fn evaluate(payload: NormalizedPayload) -> ValuationResult {
    let resolved: Vec<_> = payload.items.iter().map(resolve).collect();
    let (total, total_source) = grand_total(&resolved, payload.backend_total);
    debug!(
        items = payload.items.len(),
        total,
        source = ?total_source,
        "valuation resolved"
    );
    ValuationResult {
        items: payload.items,
        total,
        total_source,
    }
}
