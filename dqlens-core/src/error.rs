// dqlens-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

/// Why a metrics request produced no usable report.
#[derive(Error, Debug, Diagnostic)]
pub enum FetchError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Transport(#[from] InfrastructureError),

    #[error("invalid report: {0}")]
    #[diagnostic(transparent)]
    InvalidReport(#[from] DomainError),
}

#[derive(Error, Debug, Diagnostic)]
pub enum QualityError {
    // --- ERREURS DU DOMAINE (Selection vide, Busy, Teardown) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- CATALOGUE (Previous catalog is kept) ---
    #[error("Catalog error: {0}")]
    #[diagnostic(
        code(dqlens::catalog),
        help("The table list could not be loaded; retry or reload once the source is reachable.")
    )]
    Catalog(#[source] InfrastructureError),

    // --- METRICS (Previous report is kept) ---
    #[error("Fetch error: {0}")]
    #[diagnostic(code(dqlens::fetch), help("The previous report, if any, is unchanged. Retry the analysis."))]
    Fetch(#[from] FetchError),

    // --- ERREURS D'INFRASTRUCTURE (Config, Rendu) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl QualityError {
    /// Empty selection: show a notice, nothing was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, QualityError::Domain(e) if e.is_validation())
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, QualityError::Domain(DomainError::Busy))
    }
}
