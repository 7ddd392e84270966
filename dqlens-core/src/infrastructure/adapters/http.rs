// dqlens-core/src/infrastructure/adapters/http.rs

use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::Client;
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, instrument};

use crate::domain::metrics::{MetricsReport, TableName};
use crate::infrastructure::config::ServiceConfig;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::catalog::{ColumnListing, TableCatalog};
use crate::ports::metrics::MetricsService;

const LIST_TABLES_PATH: &str = "/list-tables/";
const TABLE_COLUMNS_PATH: &str = "/table-columns/";
const DATA_QUALITY_PATH: &str = "/data-quality";

/// Client for the quality service. Serves both the catalog and the metrics port.
#[derive(Debug, Clone)]
pub struct HttpQualityService {
    client: Client,
    base_url: String,
}

impl HttpQualityService {
    pub fn new(config: &ServiceConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET + status check + JSON decode.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, InfrastructureError> {
        let url = self.url(path);
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::HttpStatus {
                url,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        debug!(url = %url, bytes = bytes.len(), "Service response received");
        Ok(serde_json::from_slice(&bytes)?)
    }
}

// The catalog endpoint answers either a bare array or `{"tables": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum TableListBody {
    Bare(Vec<TableName>),
    Envelope { tables: Vec<TableName> },
}

impl From<TableListBody> for Vec<TableName> {
    fn from(body: TableListBody) -> Self {
        match body {
            TableListBody::Bare(tables) | TableListBody::Envelope { tables } => tables,
        }
    }
}

// Per table: the column list, or a "Table not found" string.
#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum ColumnsEntry {
    Columns(Vec<String>),
    NotFound(IgnoredAny),
}

#[async_trait]
impl TableCatalog for HttpQualityService {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_tables(&self) -> Result<Vec<TableName>, InfrastructureError> {
        let body: TableListBody = self.get_json(LIST_TABLES_PATH, &[]).await?;
        Ok(body.into())
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn table_columns(
        &self,
        tables: &[TableName],
    ) -> Result<ColumnListing, InfrastructureError> {
        let query: Vec<(&str, &str)> = tables
            .iter()
            .map(|t| ("table_names", t.as_str()))
            .collect();
        let body: IndexMap<TableName, ColumnsEntry> =
            self.get_json(TABLE_COLUMNS_PATH, &query).await?;

        Ok(tables
            .iter()
            .map(|table| {
                let columns = match body.get(table) {
                    Some(ColumnsEntry::Columns(cols)) if !cols.is_empty() => Some(cols.clone()),
                    _ => None,
                };
                (table.clone(), columns)
            })
            .collect())
    }
}

#[async_trait]
impl MetricsService for HttpQualityService {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_report(
        &self,
        tables: &[TableName],
    ) -> Result<MetricsReport, InfrastructureError> {
        let joined = tables.join(",");
        self.get_json(DATA_QUALITY_PATH, &[("table_names", joined.as_str())])
            .await
    }
}
