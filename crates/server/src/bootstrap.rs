use std::sync::Arc;

use shelf_core::config::{AppConfig, ConfigError, LoadOptions};
use shelf_core::{Catalog, CatalogError};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("catalog construction failed: {0}")]
    Catalog(#[source] CatalogError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

/// Builds the application from an already-loaded config. `run()` uses this so
/// logging can be initialized from the config before any bootstrap events fire.
pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    let catalog = Catalog::builtin().map_err(BootstrapError::Catalog)?;
    info!(
        event_name = "system.bootstrap.catalog_loaded",
        product_count = catalog.len(),
        "product catalog loaded and indexed"
    );

    Ok(Application { config, catalog: Arc::new(catalog) })
}

#[cfg(test)]
mod tests {
    use shelf_core::config::{ConfigOverrides, LoadOptions};
    use shelf_core::ProductId;

    use crate::bootstrap::bootstrap;

    #[test]
    fn bootstrap_with_defaults_exposes_an_indexed_catalog() {
        let app = bootstrap(LoadOptions::default()).expect("defaults should bootstrap");

        assert!(!app.catalog.is_empty(), "builtin catalog should not be empty");
        assert!(
            app.catalog.get(&ProductId("p1".to_string())).is_some(),
            "catalog index should resolve builtin ids"
        );
        assert_eq!(app.config.server.bind_address, "127.0.0.1");
    }

    #[test]
    fn bootstrap_fails_fast_on_invalid_config_override() {
        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides { port: Some(0), ..ConfigOverrides::default() },
            ..LoadOptions::default()
        });

        assert!(result.is_err());
        let message = result.err().expect("error").to_string();
        assert!(message.contains("server.port"));
    }
}
