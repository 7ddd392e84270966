// dqlens-core/src/infrastructure/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::infrastructure::config::settings::{CatalogSource, LensConfig};
use crate::infrastructure::error::InfrastructureError;

const CANDIDATES: [&str; 2] = ["dqlens.yaml", "dqlens.yml"];

/// Loads `dqlens.yaml` from `project_dir` (or the explicit file), layers the
/// `DQLENS_*` environment variables on top, then validates.
///
/// An explicit path must exist; a missing implicit file falls back to defaults.
#[instrument(skip(project_dir))]
pub fn load_config(
    project_dir: &Path,
    explicit: Option<&Path>,
) -> Result<LensConfig, InfrastructureError> {
    load_config_with(project_dir, explicit, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
pub fn load_config_with<F>(
    project_dir: &Path,
    explicit: Option<&Path>,
    env: F,
) -> Result<LensConfig, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    // 1. Découverte du fichier
    let path = match explicit {
        Some(path) if path.exists() => Some(path.to_path_buf()),
        Some(path) => {
            return Err(InfrastructureError::ConfigNotFound(
                path.display().to_string(),
            ));
        }
        None => find_config(project_dir),
    };

    // 2. Chargement YAML (ou défauts)
    let mut config = match path {
        Some(path) => {
            info!(path = ?path, "Loading dqlens configuration");
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                LensConfig::default()
            } else {
                serde_yaml::from_str(&content)?
            }
        }
        None => {
            info!("No configuration file found, using defaults");
            LensConfig::default()
        }
    };

    // 3. Override via variables d'environnement
    apply_env_overrides(&mut config, &env)?;

    // 4. Validation
    config.validate()?;
    check_catalog(&config)?;

    Ok(config)
}

fn find_config(root: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

fn apply_env_overrides<F>(config: &mut LensConfig, env: &F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = env("DQLENS_BASE_URL") {
        info!(old = ?config.service.base_url, new = ?val, "Overriding base URL via ENV");
        config.service.base_url = val;
    }
    if let Some(val) = env("DQLENS_TIMEOUT_SECS") {
        config.service.timeout_secs = val.trim().parse().map_err(|_| {
            InfrastructureError::ConfigError(format!(
                "DQLENS_TIMEOUT_SECS must be a positive integer, got '{val}'"
            ))
        })?;
    }
    if let Some(val) = env("DQLENS_DATABASE") {
        info!(database = ?val, "Using DuckDB catalog from ENV");
        config.catalog.database = Some(val);
        config.catalog.source = CatalogSource::DuckDB;
    }
    Ok(())
}

fn check_catalog(config: &LensConfig) -> Result<(), InfrastructureError> {
    match (&config.catalog.source, &config.catalog.database) {
        (CatalogSource::DuckDB, None) => Err(InfrastructureError::ConfigError(
            "catalog.source is 'duckdb' but catalog.database is not set".into(),
        )),
        (CatalogSource::Http, Some(db)) => {
            warn!(database = %db, "catalog.database is ignored for the http catalog source");
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::workflow::FetchPolicy;
    use anyhow::Result;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_missing_file_yields_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = load_config_with(dir.path(), None, no_env)?;
        assert_eq!(config.service.base_url, "http://127.0.0.1:8089");
        assert_eq!(config.service.timeout_secs, 30);
        assert_eq!(config.catalog.source, CatalogSource::Http);
        assert_eq!(config.fetch.policy, FetchPolicy::Reject);
        Ok(())
    }

    #[test]
    fn test_yaml_file_is_loaded() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join("dqlens.yaml"),
            "service:\n  base-url: http://quality.internal:9000\n  timeout-secs: 5\nfetch:\n  policy: supersede\n",
        )?;

        let config = load_config_with(dir.path(), None, no_env)?;
        assert_eq!(config.service.base_url, "http://quality.internal:9000");
        assert_eq!(config.service.timeout_secs, 5);
        assert_eq!(config.fetch.policy, FetchPolicy::Supersede);
        Ok(())
    }

    #[test]
    fn test_env_overrides_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join("dqlens.yml"),
            "service:\n  base_url: http://from-file:1\n",
        )?;
        let env: HashMap<&str, &str> = HashMap::from([
            ("DQLENS_BASE_URL", "http://from-env:2"),
            ("DQLENS_TIMEOUT_SECS", "12"),
        ]);

        let config = load_config_with(dir.path(), None, |k| env.get(k).map(|v| v.to_string()))?;
        assert_eq!(config.service.base_url, "http://from-env:2");
        assert_eq!(config.service.timeout_secs, 12);
        Ok(())
    }

    #[test]
    fn test_invalid_url_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("dqlens.yaml"), "service:\n  base-url: not a url\n")?;
        let err = load_config_with(dir.path(), None, no_env).unwrap_err();
        assert!(matches!(err, InfrastructureError::InvalidConfig(_)));
        Ok(())
    }

    #[test]
    fn test_timeout_out_of_range_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let err = load_config_with(dir.path(), None, |k| {
            (k == "DQLENS_TIMEOUT_SECS").then(|| "0".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, InfrastructureError::InvalidConfig(_)));
        Ok(())
    }

    #[test]
    fn test_duckdb_source_requires_database() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("dqlens.yaml"), "catalog:\n  source: duckdb\n")?;
        let err = load_config_with(dir.path(), None, no_env).unwrap_err();
        assert!(matches!(err, InfrastructureError::ConfigError(_)));
        Ok(())
    }

    #[test]
    fn test_database_env_switches_catalog_source() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = load_config_with(dir.path(), None, |k| {
            (k == "DQLENS_DATABASE").then(|| "warehouse.duckdb".to_string())
        })?;
        assert_eq!(config.catalog.source, CatalogSource::DuckDB);
        assert_eq!(config.catalog.database.as_deref(), Some("warehouse.duckdb"));
        Ok(())
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = load_config_with(dir.path(), Some(&missing), no_env).unwrap_err();
        assert!(matches!(err, InfrastructureError::ConfigNotFound(_)));
    }
}
