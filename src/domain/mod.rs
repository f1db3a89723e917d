//! Value reconciliation pipeline: normalize, resolve, project, sort, select.

pub mod entities;
pub mod normalizer;
pub mod projection;
pub mod selection;
pub mod session;
pub mod sorting;
pub mod valuation;

#[allow(unused_imports)]
pub use entities::{
    format_money, format_quantity, InventorySnapshot, ItemId, NormalizedItem, NormalizedPayload,
    ResolvedValues, Row, SelectionSummary, SortDirection, SortKey, SortSpec, TotalSource,
    ValuationResult, ViewMode,
};
#[allow(unused_imports)]
pub use normalizer::{normalize, PayloadShape};
#[allow(unused_imports)]
pub use projection::{large_image_url, project, project_all};
#[allow(unused_imports)]
pub use selection::SelectionSet;
#[allow(unused_imports)]
pub use session::{FetchOutcome, FetchTicket, InventorySession, SessionError};
#[allow(unused_imports)]
pub use sorting::sort_rows;
#[allow(unused_imports)]
pub use valuation::{evaluate, grand_total, resolve};
