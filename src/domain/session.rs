//! Explicit state for one inventory view.
//!
//! All mutation goes through the methods below; the UI holds the session in a
//! signal and renders read-only snapshots of it.

use std::fmt::Display;

use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::entities::{
    InventorySnapshot, ItemId, Row, SelectionSummary, SortKey, SortSpec, ViewMode,
};
use super::normalizer::normalize;
use super::projection::project_all;
use super::selection::SelectionSet;
use super::sorting::sort_rows;
use super::valuation::evaluate;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Enter SteamID first.")]
    EmptyIdentifier,
}

/// Handle for one issued fetch. Only the most recent ticket may commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub identifier: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    Loaded { items: usize, total: f64 },
    Failed(String),
    /// A newer fetch was issued after this one; the result was dropped.
    Superseded,
}

impl InventorySnapshot {
    /// Runs the full reconciliation pipeline over a raw payload.
    pub fn from_payload(identifier: impl Into<String>, payload: &Value) -> Self {
        let result = evaluate(normalize(payload));
        let rows = project_all(&result);
        Self {
            identifier: identifier.into(),
            result,
            rows,
            fetched_at: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct InventorySession {
    identifier: String,
    snapshot: Option<InventorySnapshot>,
    sort: SortSpec,
    selection: SelectionSet,
    error: Option<String>,
    generation: u64,
    in_flight: Option<u64>,
    view: ViewMode,
}

impl InventorySession {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn set_identifier(&mut self, value: impl Into<String>) {
        self.identifier = value.into();
    }

    /// Validates the identifier and issues a new request generation.
    ///
    /// On an empty identifier the current snapshot stays in place and only the
    /// error text changes.
    pub fn begin_fetch(&mut self) -> Result<FetchTicket, SessionError> {
        let identifier = self.identifier.trim().to_string();
        if identifier.is_empty() {
            let err = SessionError::EmptyIdentifier;
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.error = None;
        debug!(generation = self.generation, %identifier, "fetch issued");
        Ok(FetchTicket {
            generation: self.generation,
            identifier,
        })
    }

    /// Commits a fetch result if `ticket` is still the latest request.
    pub fn complete_fetch<E: Display>(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<Value, E>,
    ) -> FetchOutcome {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                latest = self.generation,
                "dropping superseded fetch result"
            );
            return FetchOutcome::Superseded;
        }
        self.in_flight = None;

        match outcome {
            Ok(payload) => {
                let snapshot = InventorySnapshot::from_payload(&ticket.identifier, &payload);
                let items = snapshot.rows.len();
                let total = snapshot.result.total;
                info!(identifier = %ticket.identifier, items, total, "valuation loaded");
                self.install(snapshot);
                FetchOutcome::Loaded { items, total }
            }
            Err(err) => {
                let message = err.to_string();
                warn!(identifier = %ticket.identifier, error = %message, "valuation fetch failed");
                self.snapshot = None;
                self.selection.clear();
                self.error = Some(message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }

    /// Replaces the current snapshot. The selection never survives a replacement.
    pub fn install(&mut self, snapshot: InventorySnapshot) {
        self.snapshot = Some(snapshot);
        self.selection.clear();
        self.error = None;
    }

    pub fn snapshot(&self) -> Option<&InventorySnapshot> {
        self.snapshot.as_ref()
    }

    pub fn rows(&self) -> &[Row] {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn sorted_rows(&self) -> Vec<Row> {
        sort_rows(self.rows(), self.sort)
    }

    pub fn item_count(&self) -> usize {
        self.rows().len()
    }

    pub fn total(&self) -> f64 {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.result.total)
            .unwrap_or(0.0)
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = self.sort.toggle(key);
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, key: &ItemId) -> bool {
        self.selection.contains(key)
    }

    pub fn toggle_selection(&mut self, key: &ItemId) {
        self.selection.toggle(key);
    }

    pub fn select_all(&mut self) {
        let rows = self.rows().to_vec();
        self.selection.select_all(&rows);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn summary(&self) -> SelectionSummary {
        self.selection.summary(self.rows())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }
}
