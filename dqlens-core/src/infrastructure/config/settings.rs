// dqlens-core/src/infrastructure/config/settings.rs

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

use crate::domain::workflow::FetchPolicy;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8089";

/// Where the table list comes from.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    #[default]
    Http,
    DuckDB,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, Validate)]
pub struct LensConfig {
    #[validate(nested)]
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ServiceConfig {
    #[validate(url(message = "base_url must be an absolute URL"))]
    #[serde(rename = "base-url", alias = "base_url", default = "default_base_url")]
    pub base_url: String,

    #[validate(range(min = 1, max = 600))]
    #[serde(rename = "timeout-secs", alias = "timeout_secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: CatalogSource,
    /// DuckDB file, required when `source: duckdb`.
    #[serde(default)]
    pub database: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FetchConfig {
    #[serde(default)]
    pub policy: FetchPolicy,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
