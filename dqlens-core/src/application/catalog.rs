// dqlens-core/src/application/catalog.rs

use indexmap::IndexSet;
use tracing::{info, warn};

use crate::domain::metrics::TableName;
use crate::error::QualityError;
use crate::ports::catalog::{ColumnListing, TableCatalog};

/// Fetches the table list. Source order is kept; repeated names keep their
/// first position.
pub async fn load_catalog(source: &dyn TableCatalog) -> Result<Vec<TableName>, QualityError> {
    let raw = source.list_tables().await.map_err(QualityError::Catalog)?;
    let total = raw.len();

    let unique: IndexSet<TableName> = raw.into_iter().collect();
    if unique.len() != total {
        warn!(
            duplicates = total - unique.len(),
            "Catalog returned repeated table names"
        );
    }

    info!(tables = unique.len(), "Catalog loaded");
    Ok(unique.into_iter().collect())
}

/// Column names per table, in the order the tables were asked for.
pub async fn describe_columns(
    source: &dyn TableCatalog,
    tables: &[TableName],
) -> Result<ColumnListing, QualityError> {
    if tables.is_empty() {
        return Ok(ColumnListing::new());
    }
    source
        .table_columns(tables)
        .await
        .map_err(QualityError::Catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::error::InfrastructureError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticCatalog {
        tables: Vec<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TableCatalog for StaticCatalog {
        async fn list_tables(&self) -> Result<Vec<TableName>, InfrastructureError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.tables.iter().map(|t| t.to_string()).collect())
        }
        async fn table_columns(
            &self,
            tables: &[TableName],
        ) -> Result<ColumnListing, InfrastructureError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(tables
                .iter()
                .map(|t| (t.clone(), Some(vec!["id".to_string()])))
                .collect())
        }
    }

    struct BrokenCatalog;

    #[async_trait]
    impl TableCatalog for BrokenCatalog {
        async fn list_tables(&self) -> Result<Vec<TableName>, InfrastructureError> {
            Err(InfrastructureError::ConfigError("unreachable".into()))
        }
        async fn table_columns(
            &self,
            _tables: &[TableName],
        ) -> Result<ColumnListing, InfrastructureError> {
            Err(InfrastructureError::ConfigError("unreachable".into()))
        }
    }

    #[tokio::test]
    async fn test_load_catalog_dedupes_keeping_first_position() {
        let source = StaticCatalog {
            tables: vec!["b", "a", "b", "c"],
            calls: AtomicUsize::new(0),
        };
        let tables = load_catalog(&source).await.unwrap();
        assert_eq!(tables, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_load_catalog_failure_is_catalog_error() {
        let err = load_catalog(&BrokenCatalog).await.unwrap_err();
        assert!(matches!(err, QualityError::Catalog(_)));
        assert!(err.to_string().starts_with("Catalog error:"));
    }

    #[tokio::test]
    async fn test_describe_columns_skips_call_for_no_tables() {
        let source = StaticCatalog {
            tables: vec![],
            calls: AtomicUsize::new(0),
        };
        let listing = describe_columns(&source, &[]).await.unwrap();
        assert!(listing.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}
