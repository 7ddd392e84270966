// dqlens-core/src/ports/catalog.rs

// What the workflow needs from wherever the table list lives (the quality
// service over HTTP, or a local database file). Adapters live in
// infrastructure/adapters.

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::domain::metrics::TableName;
use crate::infrastructure::error::InfrastructureError;

/// Table -> ordered column names, `None` when the source does not know the table.
pub type ColumnListing = IndexMap<TableName, Option<Vec<String>>>;

#[async_trait]
pub trait TableCatalog: Send + Sync {
    /// Available tables, in source order.
    async fn list_tables(&self) -> Result<Vec<TableName>, InfrastructureError>;

    /// Column names for each requested table, keyed in request order.
    async fn table_columns(&self, tables: &[TableName])
    -> Result<ColumnListing, InfrastructureError>;
}
