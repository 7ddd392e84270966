// dqlens-core/src/ports/metrics.rs

// The external metrics service. How the numbers are computed is its business;
// the workflow only asks for a report keyed by the selected tables.

use async_trait::async_trait;

use crate::domain::metrics::{MetricsReport, TableName};
use crate::infrastructure::error::InfrastructureError;

#[async_trait]
pub trait MetricsService: Send + Sync {
    async fn fetch_report(&self, tables: &[TableName])
    -> Result<MetricsReport, InfrastructureError>;
}
