// dqlens-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::{AccessMode, Config, Connection};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::instrument;

use crate::domain::metrics::TableName;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::catalog::{ColumnListing, TableCatalog};

const LIST_TABLES_SQL: &str = "SELECT table_name FROM information_schema.tables \
     WHERE table_schema = 'main' ORDER BY table_name";

const COLUMNS_SQL: &str = "SELECT column_name FROM information_schema.columns \
     WHERE table_schema = 'main' AND table_name = ? ORDER BY ordinal_position";

/// Catalog backed by a local DuckDB file: base tables and views of the `main` schema.
pub struct DuckDBCatalog {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDBCatalog {
    /// Opens `db_path` read-only; `":memory:"` opens a scratch database.
    pub fn open(db_path: &str) -> Result<Self, InfrastructureError> {
        let conn = if db_path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            let config = Config::default().access_mode(AccessMode::ReadOnly)?;
            Connection::open_with_flags(db_path, config)?
        };
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, InfrastructureError> {
        self.conn
            .lock()
            .map_err(|_| InfrastructureError::Database(DatabaseError::Poisoned))
    }
}

#[async_trait]
impl TableCatalog for DuckDBCatalog {
    #[instrument(skip(self))]
    async fn list_tables(&self) -> Result<Vec<TableName>, InfrastructureError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(LIST_TABLES_SQL)?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tables)
    }

    #[instrument(skip(self))]
    async fn table_columns(
        &self,
        tables: &[TableName],
    ) -> Result<ColumnListing, InfrastructureError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(COLUMNS_SQL)?;

        let mut listing = ColumnListing::new();
        for table in tables {
            let columns = stmt
                .query_map([table.as_str()], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            let entry = if columns.is_empty() { None } else { Some(columns) };
            listing.insert(table.clone(), entry);
        }
        Ok(listing)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn seeded() -> Result<DuckDBCatalog> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            "CREATE TABLE customer1 (customer_id INTEGER, email VARCHAR, city VARCHAR);
             CREATE TABLE category1 (category_id INTEGER, category_name VARCHAR);
             CREATE VIEW active_customers AS SELECT * FROM customer1;",
        )?;
        Ok(DuckDBCatalog::from_connection(conn))
    }

    #[tokio::test]
    async fn test_list_tables_sorted_with_views() -> Result<()> {
        let catalog = seeded()?;
        let tables = catalog.list_tables().await?;
        assert_eq!(tables, vec!["active_customers", "category1", "customer1"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_database_lists_nothing() -> Result<()> {
        let catalog = DuckDBCatalog::open(":memory:")?;
        assert!(catalog.list_tables().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_table_columns_in_declaration_order() -> Result<()> {
        let catalog = seeded()?;
        let listing = catalog
            .table_columns(&["customer1".to_string(), "missing".to_string()])
            .await?;

        assert_eq!(
            listing["customer1"],
            Some(vec![
                "customer_id".to_string(),
                "email".to_string(),
                "city".to_string()
            ])
        );
        assert_eq!(listing["missing"], None);
        Ok(())
    }

    #[test]
    fn test_open_missing_file_read_only_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.duckdb");
        assert!(DuckDBCatalog::open(path.to_str().expect("utf8 path")).is_err());
    }
}
