pub mod loader;
pub mod settings;

pub use loader::{load_config, load_config_with};
pub use settings::{CatalogConfig, CatalogSource, FetchConfig, LensConfig, ServiceConfig};
