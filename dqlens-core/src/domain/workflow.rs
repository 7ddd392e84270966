// dqlens-core/src/domain/workflow.rs
//
// Explicit state record for one inspection session. Every mutation goes
// through `WorkflowState::apply`, which makes the cycle
// Idle -> Validating -> (Rejected | Fetching) -> (Succeeded | Failed) -> Idle
// testable without any I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::metrics::{MetricsReport, TableName};
use crate::domain::selection::SelectionSet;

/// What to do with a fetch requested while another one is in flight.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FetchPolicy {
    /// Refuse with [`DomainError::Busy`].
    #[default]
    Reject,
    /// Let it run; only the latest issued request may apply its result.
    Supersede,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Validating,
    Rejected,
    Fetching,
    Succeeded,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Idle => "idle",
            Phase::Validating => "validating",
            Phase::Rejected => "rejected",
            Phase::Fetching => "fetching",
            Phase::Succeeded => "succeeded",
            Phase::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Monotonic id stamped on every issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(pub u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    /// A newer request was issued after this one.
    Stale,
    /// The workflow was torn down while the request was outstanding.
    TornDown,
}

#[derive(Debug, Clone)]
pub enum Action {
    CatalogRequested,
    CatalogLoaded(Vec<TableName>),
    CatalogFailed(String),
    /// The catalog future was dropped before completing.
    CatalogAbandoned,
    Toggle(TableName),
    FetchRequested,
    BeginFetch,
    FetchSucceeded {
        token: RequestToken,
        report: MetricsReport,
        at: DateTime<Utc>,
    },
    FetchFailed {
        token: RequestToken,
        error: String,
    },
    /// The fetch future was dropped before completing.
    FetchAbandoned {
        token: RequestToken,
    },
    Settle,
    TearDown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Unchanged,
    Updated,
    Toggled { selected: bool },
    CatalogReplaced { pruned: Vec<TableName> },
    FetchIssued {
        token: RequestToken,
        selection: SelectionSet,
    },
    ReportApplied,
    FetchFailed,
    Discarded { reason: DiscardReason },
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowState {
    pub catalog: Vec<TableName>,
    pub selection: SelectionSet,
    pub report: Option<MetricsReport>,
    pub phase: Phase,
    pub policy: FetchPolicy,
    pub last_error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub torn_down: bool,
    catalog_in_flight: usize,
    fetch_in_flight: usize,
    next_token: u64,
    latest_token: Option<RequestToken>,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new(FetchPolicy::default())
    }
}

impl WorkflowState {
    pub fn new(policy: FetchPolicy) -> Self {
        Self {
            catalog: Vec::new(),
            selection: SelectionSet::new(),
            report: None,
            phase: Phase::Idle,
            policy,
            last_error: None,
            fetched_at: None,
            torn_down: false,
            catalog_in_flight: 0,
            fetch_in_flight: 0,
            next_token: 0,
            latest_token: None,
        }
    }

    /// Catalog spinner flag.
    pub fn loading(&self) -> bool {
        self.catalog_in_flight > 0
    }

    /// Fetch spinner flag.
    pub fn busy(&self) -> bool {
        self.fetch_in_flight > 0
    }

    pub fn latest_token(&self) -> Option<RequestToken> {
        self.latest_token
    }

    pub fn apply(&mut self, action: Action) -> Result<Transition, DomainError> {
        match action {
            // --- CATALOG ---
            Action::CatalogRequested => {
                self.ensure_attached()?;
                self.catalog_in_flight += 1;
                Ok(Transition::Updated)
            }
            Action::CatalogLoaded(names) => {
                self.catalog_in_flight = self.catalog_in_flight.saturating_sub(1);
                if self.torn_down {
                    return Ok(Transition::Discarded {
                        reason: DiscardReason::TornDown,
                    });
                }
                let pruned = self.selection.retain_known(&names);
                self.catalog = names;
                Ok(Transition::CatalogReplaced { pruned })
            }
            Action::CatalogFailed(error) => {
                self.catalog_in_flight = self.catalog_in_flight.saturating_sub(1);
                if self.torn_down {
                    return Ok(Transition::Discarded {
                        reason: DiscardReason::TornDown,
                    });
                }
                self.last_error = Some(error);
                Ok(Transition::Updated)
            }
            Action::CatalogAbandoned => {
                self.catalog_in_flight = self.catalog_in_flight.saturating_sub(1);
                Ok(Transition::Updated)
            }

            // --- SELECTION ---
            Action::Toggle(name) => {
                let selected = self.selection.toggle(name);
                Ok(Transition::Toggled { selected })
            }

            // --- FETCH CYCLE ---
            Action::FetchRequested => {
                self.ensure_attached()?;
                if self.busy() && self.policy == FetchPolicy::Reject {
                    return Err(DomainError::Busy);
                }
                self.phase = Phase::Validating;
                Ok(Transition::Updated)
            }
            Action::BeginFetch => {
                if self.phase != Phase::Validating {
                    return Ok(Transition::Unchanged);
                }
                if self.selection.is_empty() {
                    self.phase = Phase::Rejected;
                    let err = DomainError::EmptySelection;
                    self.last_error = Some(err.to_string());
                    return Err(err);
                }
                self.next_token += 1;
                let token = RequestToken(self.next_token);
                self.latest_token = Some(token);
                self.fetch_in_flight += 1;
                self.phase = Phase::Fetching;
                Ok(Transition::FetchIssued {
                    token,
                    selection: self.selection.clone(),
                })
            }
            Action::FetchSucceeded { token, report, at } => {
                self.fetch_in_flight = self.fetch_in_flight.saturating_sub(1);
                if let Some(reason) = self.discard_reason(token) {
                    return Ok(Transition::Discarded { reason });
                }
                self.report = Some(report);
                self.fetched_at = Some(at);
                self.last_error = None;
                self.phase = Phase::Succeeded;
                Ok(Transition::ReportApplied)
            }
            Action::FetchFailed { token, error } => {
                self.fetch_in_flight = self.fetch_in_flight.saturating_sub(1);
                if let Some(reason) = self.discard_reason(token) {
                    return Ok(Transition::Discarded { reason });
                }
                self.last_error = Some(error);
                self.phase = Phase::Failed;
                Ok(Transition::FetchFailed)
            }
            Action::FetchAbandoned { token } => {
                self.fetch_in_flight = self.fetch_in_flight.saturating_sub(1);
                if self.discard_reason(token).is_none() {
                    self.last_error = Some(format!("request {token} was abandoned"));
                    self.phase = Phase::Failed;
                }
                Ok(Transition::Updated)
            }
            Action::Settle => match self.phase {
                Phase::Rejected | Phase::Succeeded | Phase::Failed => {
                    self.phase = if self.busy() {
                        Phase::Fetching
                    } else {
                        Phase::Idle
                    };
                    Ok(Transition::Updated)
                }
                // A stale result came back after the latest one settled.
                Phase::Fetching if !self.busy() => {
                    self.phase = Phase::Idle;
                    Ok(Transition::Updated)
                }
                _ => Ok(Transition::Unchanged),
            },

            Action::TearDown => {
                self.torn_down = true;
                self.phase = Phase::Idle;
                Ok(Transition::Updated)
            }
        }
    }

    fn ensure_attached(&self) -> Result<(), DomainError> {
        if self.torn_down {
            Err(DomainError::Detached)
        } else {
            Ok(())
        }
    }

    fn discard_reason(&self, token: RequestToken) -> Option<DiscardReason> {
        if self.torn_down {
            Some(DiscardReason::TornDown)
        } else if self.latest_token != Some(token) {
            Some(DiscardReason::Stale)
        } else {
            None
        }
    }
}
