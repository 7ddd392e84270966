// dqlens-core/src/ports/mod.rs

pub mod catalog;
pub mod metrics;

pub use catalog::{ColumnListing, TableCatalog};
pub use metrics::MetricsService;
