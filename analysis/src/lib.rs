//! # Arealens Analysis
//!
//! The query-to-structured-answer pipeline behind the HTTP surface:
//!
//! - **Intent extraction**: which snapshot areas a free-text query names
//!   (case-insensitive substring match) and which years it constrains
//!   ("last N years" or explicit `20xx` tokens).
//! - **Filtering**: deterministic row selection over the loaded snapshot.
//! - **Projections**: chart-ready per-year sparse entries and table-ready
//!   renamed rows with derived columns.
//! - **Summary**: a Gemini-generated analysis with a strict
//!   degrade-to-static-text policy; a request never fails because the
//!   summary step did.
//!
//! Everything here is per-request and stateless: the snapshot is loaded
//! fresh, derived values live only for the duration of one call.

mod chart;
mod demand;
mod intent;
mod pipeline;
mod summary;
mod table;

pub use chart::ChartEntry;
pub use chart::MetricValue;
pub use chart::build_chart;
pub use demand::demand_label;
pub use intent::QueryIntent;
pub use intent::extract_areas;
pub use intent::extract_years;
pub use pipeline::AnalysisPipeline;
pub use pipeline::QueryResponse;
pub use summary::NO_DATA_MESSAGE;
pub use summary::NOT_CONFIGURED_MESSAGE;
pub use summary::SUMMARY_ERROR_MESSAGE;
pub use summary::Summarizer;
pub use table::TableRow;
pub use table::build_table;
