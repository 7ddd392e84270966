// dqlens-core/src/infrastructure/adapters/mod.rs

pub mod duckdb;
pub mod http;

use std::sync::Arc;
use tracing::info;

use crate::infrastructure::config::{CatalogSource, LensConfig};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::{MetricsService, TableCatalog};

pub use self::duckdb::DuckDBCatalog;
pub use self::http::HttpQualityService;

/// Catalog and metrics adapters selected by the configuration.
pub struct Adapters {
    pub catalog: Arc<dyn TableCatalog>,
    pub metrics: Arc<dyn MetricsService>,
}

pub fn build_adapters(config: &LensConfig) -> Result<Adapters, InfrastructureError> {
    let service = Arc::new(HttpQualityService::new(&config.service)?);

    let catalog: Arc<dyn TableCatalog> = match (config.catalog.source, &config.catalog.database) {
        (CatalogSource::DuckDB, Some(path)) => {
            info!(database = %path, "Using DuckDB catalog");
            Arc::new(DuckDBCatalog::open(path)?)
        }
        (CatalogSource::DuckDB, None) => {
            return Err(InfrastructureError::ConfigError(
                "catalog.source is 'duckdb' but catalog.database is not set".into(),
            ));
        }
        (CatalogSource::Http, _) => service.clone(),
    };

    Ok(Adapters {
        catalog,
        metrics: service,
    })
}
