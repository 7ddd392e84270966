// dqlens-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(dqlens::infra::database::duckdb),
        help("An error occurred while reading the local catalog database.")
    )]
    DuckDB(#[from] duckdb::Error),

    #[error("DuckDB connection lock poisoned")]
    #[diagnostic(code(dqlens::infra::database::poisoned))]
    Poisoned,
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Local catalog) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- NETWORK (Quality service) ---
    #[error("HTTP transport error: {0}")]
    #[diagnostic(
        code(dqlens::infra::http),
        help("Check that the quality service is running and 'service.base_url' is correct.")
    )]
    Http(#[from] reqwest::Error),

    #[error("Service answered {status} for {url}: {body}")]
    #[diagnostic(code(dqlens::infra::http_status))]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Malformed service response: {0}")]
    #[diagnostic(
        code(dqlens::infra::decode),
        help("The service returned JSON that does not match the expected shape.")
    )]
    Decode(#[from] serde_json::Error),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(dqlens::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(dqlens::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(dqlens::infra::config_invalid))]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(dqlens::infra::config))]
    ConfigError(String),

    #[error("Configuration file not found at '{0}'")]
    #[diagnostic(code(dqlens::infra::config_missing))]
    ConfigNotFound(String),

    // --- RENDERING ---
    #[error("Rendering Error: {0}")]
    #[diagnostic(code(dqlens::infra::render))]
    RenderError(String),
}

// Manual implementation for shortcuts (e.g. `?` operator on duckdb calls)
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}
