// dqlens-core/src/application/mod.rs

pub mod catalog;
pub mod fetcher;
pub mod ports;
pub mod presenter;
pub mod workflow;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI fait simplement :
// `use dqlens_core::application::{QualityWorkflow, present};`

pub use catalog::{describe_columns, load_catalog};
pub use fetcher::MetricsFetcher;
pub use presenter::{Bar, MissingValues, ReportView, TableView, present, present_report};
pub use workflow::{FetchOutcome, QualityWorkflow};
