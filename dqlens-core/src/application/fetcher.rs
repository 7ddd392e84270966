// dqlens-core/src/application/fetcher.rs

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::metrics::{MetricsReport, TableName};
use crate::domain::selection::SelectionSet;
use crate::error::{FetchError, QualityError};
use crate::ports::metrics::MetricsService;

/// Validates a selection, asks the metrics service for its report, and checks
/// the report against the selection before handing it back.
#[derive(Clone)]
pub struct MetricsFetcher {
    service: Arc<dyn MetricsService>,
}

impl MetricsFetcher {
    pub fn new(service: Arc<dyn MetricsService>) -> Self {
        Self { service }
    }

    #[instrument(skip(self, selection), fields(tables = selection.len()))]
    pub async fn fetch(&self, selection: &SelectionSet) -> Result<MetricsReport, QualityError> {
        // 1. Validation (no I/O on an empty selection)
        if selection.is_empty() {
            return Err(QualityError::Domain(DomainError::EmptySelection));
        }

        // 2. Request
        let tables: Vec<TableName> = selection.members().iter().cloned().collect();
        let report = self
            .service
            .fetch_report(&tables)
            .await
            .map_err(|e| QualityError::Fetch(FetchError::Transport(e)))?;

        // 3. Contract check
        if let Err(e) = report.validate_against(selection) {
            warn!(error = %e, "Rejecting report that violates the metrics contract");
            return Err(QualityError::Fetch(FetchError::InvalidReport(e)));
        }

        info!(tables = report.len(), "Metrics report received");
        Ok(report)
    }
}
