pub mod error;
pub mod metrics;
pub mod selection;
pub mod tier;
pub mod workflow;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use metrics::{ColumnMetricMap, MetricsReport, TableMetrics, TableName};
pub use selection::SelectionSet;
pub use tier::{Tier, classify, clamp_percentage};
pub use workflow::{Action, FetchPolicy, Phase, RequestToken, Transition, WorkflowState};
