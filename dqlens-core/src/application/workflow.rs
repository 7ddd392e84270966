// dqlens-core/src/application/workflow.rs
//
// USE CASE: one inspection session. Catalog -> toggles -> fetch -> report.
// The state record is only touched through `WorkflowState::apply`, and the
// lock is never held across an await.

use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use crate::application::catalog;
use crate::application::fetcher::MetricsFetcher;
use crate::application::presenter::{ReportView, present};
use crate::domain::error::DomainError;
use crate::domain::metrics::{MetricsReport, TableName};
use crate::domain::workflow::{
    Action, DiscardReason, FetchPolicy, RequestToken, Transition, WorkflowState,
};
use crate::error::QualityError;
use crate::ports::catalog::{ColumnListing, TableCatalog};
use crate::ports::metrics::MetricsService;

/// Result of a fetch that reached the service and came back without error.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The report is now the current one.
    Applied(MetricsReport),
    /// The result arrived but was not applied.
    Discarded {
        token: RequestToken,
        reason: DiscardReason,
    },
}

pub struct QualityWorkflow {
    catalog: Arc<dyn TableCatalog>,
    fetcher: MetricsFetcher,
    state: Mutex<WorkflowState>,
}

impl QualityWorkflow {
    pub fn new(
        catalog: Arc<dyn TableCatalog>,
        metrics: Arc<dyn MetricsService>,
        policy: FetchPolicy,
    ) -> Self {
        Self {
            catalog,
            fetcher: MetricsFetcher::new(metrics),
            state: Mutex::new(WorkflowState::new(policy)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WorkflowState> {
        lock_state(&self.state)
    }

    /// Copy of the current state for display.
    pub fn snapshot(&self) -> WorkflowState {
        self.lock().clone()
    }

    pub fn report(&self) -> Option<MetricsReport> {
        self.lock().report.clone()
    }

    /// Presentation of the current report, `None` before the first success.
    pub fn view(&self) -> Option<ReportView> {
        present(self.lock().report.as_ref())
    }

    pub fn catalog(&self) -> Vec<TableName> {
        self.lock().catalog.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading()
    }

    pub fn is_busy(&self) -> bool {
        self.lock().busy()
    }

    /// Reloads the table list. On failure the previous list is kept and the
    /// error is returned; on success stale selections are pruned. A list that
    /// arrives after `teardown()` is dropped and reported as `Detached`.
    pub async fn load_catalog(&self) -> Result<Vec<TableName>, QualityError> {
        self.lock().apply(Action::CatalogRequested)?;
        let guard = ReleaseGuard::new(&self.state, Action::CatalogAbandoned);

        let result = catalog::load_catalog(self.catalog.as_ref()).await;
        guard.disarm();

        let mut state = self.lock();
        match result {
            Ok(names) => match state.apply(Action::CatalogLoaded(names.clone()))? {
                Transition::Discarded { reason } => {
                    info!(?reason, "Discarding catalog that arrived after teardown");
                    Err(DomainError::Detached.into())
                }
                Transition::CatalogReplaced { pruned } => {
                    if !pruned.is_empty() {
                        info!(?pruned, "Dropped selections absent from the new catalog");
                    }
                    Ok(names)
                }
                _ => Ok(names),
            },
            Err(e) => {
                warn!(error = %e, "Catalog load failed, keeping previous table list");
                state.apply(Action::CatalogFailed(e.to_string()))?;
                Err(e)
            }
        }
    }

    /// Column listing passthrough; does not touch the workflow state.
    pub async fn describe_columns(
        &self,
        tables: &[TableName],
    ) -> Result<ColumnListing, QualityError> {
        catalog::describe_columns(self.catalog.as_ref(), tables).await
    }

    /// Returns whether `name` is selected afterwards.
    pub fn toggle(&self, name: impl Into<TableName>) -> bool {
        match self.lock().apply(Action::Toggle(name.into())) {
            Ok(Transition::Toggled { selected }) => selected,
            _ => false,
        }
    }

    /// Runs one Idle -> Validating -> ... -> Idle cycle.
    ///
    /// Errors: `Domain(EmptySelection)` before any I/O, `Domain(Busy)` when a
    /// request is in flight under the `reject` policy, `Fetch(..)` when the
    /// service fails or returns an invalid report. The stored report is only
    /// replaced on `Ok(FetchOutcome::Applied(_))`.
    pub async fn fetch(&self) -> Result<FetchOutcome, QualityError> {
        // 1. Validation + token issuance (one critical section)
        let (token, selection) = {
            let mut state = self.lock();
            state.apply(Action::FetchRequested)?;
            match state.apply(Action::BeginFetch) {
                Ok(Transition::FetchIssued { token, selection }) => (token, selection),
                Ok(other) => {
                    state.apply(Action::Settle)?;
                    return Err(QualityError::InternalError(format!(
                        "unexpected transition while starting a fetch: {other:?}"
                    )));
                }
                Err(e) => {
                    state.apply(Action::Settle)?;
                    return Err(e.into());
                }
            }
        };
        debug!(%token, tables = selection.len(), "Fetch issued");

        // 2. Request (suspension point)
        let guard = ReleaseGuard::new(&self.state, Action::FetchAbandoned { token });
        let result = self.fetcher.fetch(&selection).await;
        guard.disarm();

        // 3. Apply, unless stale or torn down
        let mut state = self.lock();
        let outcome = match result {
            Ok(report) => {
                let applied = report.clone();
                match state.apply(Action::FetchSucceeded {
                    token,
                    report,
                    at: Utc::now(),
                })? {
                    Transition::Discarded { reason } => {
                        info!(%token, ?reason, "Discarding metrics report");
                        Ok(FetchOutcome::Discarded { token, reason })
                    }
                    _ => Ok(FetchOutcome::Applied(applied)),
                }
            }
            Err(e) => match state.apply(Action::FetchFailed {
                token,
                error: e.to_string(),
            })? {
                Transition::Discarded { reason } => {
                    debug!(%token, ?reason, error = %e, "Ignoring failure of a superseded request");
                    Ok(FetchOutcome::Discarded { token, reason })
                }
                _ => {
                    warn!(%token, error = %e, "Metrics fetch failed");
                    Err(e)
                }
            },
        };
        state.apply(Action::Settle)?;
        outcome
    }

    /// Detaches the workflow: later results are discarded, new calls fail.
    pub fn teardown(&self) {
        // TearDown never fails.
        let _ = self.lock().apply(Action::TearDown);
    }
}

fn lock_state(state: &Mutex<WorkflowState>) -> MutexGuard<'_, WorkflowState> {
    // Every transition leaves the record consistent, so a poisoned lock is still usable.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Applies `on_drop` unless disarmed, so in-flight counters are released even
/// when the future is dropped mid-request.
struct ReleaseGuard<'a> {
    state: &'a Mutex<WorkflowState>,
    on_drop: Option<Action>,
}

impl<'a> ReleaseGuard<'a> {
    fn new(state: &'a Mutex<WorkflowState>, on_drop: Action) -> Self {
        Self {
            state,
            on_drop: Some(on_drop),
        }
    }

    fn disarm(mut self) {
        self.on_drop = None;
    }
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        if let Some(action) = self.on_drop.take() {
            let mut state = lock_state(self.state);
            let _ = state.apply(action);
            let _ = state.apply(Action::Settle);
        }
    }
}
