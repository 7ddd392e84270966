// dqlens-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum DomainError {
    // --- SELECTION / WORKFLOW ---
    #[error("Validation error: empty selection")]
    #[diagnostic(
        code(dqlens::domain::empty_selection),
        help("Please select at least one table before running the analysis.")
    )]
    EmptySelection,

    #[error("A metrics request is already in flight")]
    #[diagnostic(
        code(dqlens::domain::busy),
        help("Wait for the running analysis to finish, or switch the fetch policy to 'supersede'.")
    )]
    Busy,

    #[error("The workflow has been torn down")]
    #[diagnostic(code(dqlens::domain::detached))]
    Detached,

    // --- REPORT CONTRACT ---
    #[error("Report does not match the selection (missing: {missing:?}, unexpected: {unexpected:?})")]
    #[diagnostic(
        code(dqlens::domain::report_mismatch),
        help("The metrics service must return exactly one entry per selected table.")
    )]
    ReportMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Table '{table}': column set of '{field}' differs from 'missing_values'")]
    #[diagnostic(code(dqlens::domain::column_mismatch))]
    ColumnMismatch { table: String, field: &'static str },

    #[error("Table '{table}': {field}{} = {value} is outside [0, 100]", column_suffix(.column))]
    #[diagnostic(code(dqlens::domain::percentage_range))]
    PercentageOutOfRange {
        table: String,
        field: &'static str,
        column: Option<String>,
        value: f64,
    },
}

fn column_suffix(column: &Option<String>) -> String {
    column.as_ref().map(|c| format!(".{c}")).unwrap_or_default()
}

impl DomainError {
    /// True for the user-recoverable "nothing selected" notice.
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::EmptySelection)
    }
}
