//! Application state shared across handlers.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use diario_core::{Catalog, CatalogError};

use crate::config::PortalConfig;

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("cannot read catalog file {path}: {source}")]
    CatalogRead {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid catalog file {path}: {source}")]
    CatalogInvalid { path: String, source: CatalogError },
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Nothing in here is mutable: per-browser
/// state lives in the session, not here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PortalConfig,
    catalog: Catalog,
}

impl AppState {
    /// Build the state, loading the catalog file named in the config or
    /// falling back to the built-in documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or is invalid.
    pub fn new(config: PortalConfig) -> Result<Self, StateError> {
        let catalog = match &config.catalog_path {
            Some(path) => load_catalog(path)?,
            None => Catalog::mock(),
        };
        tracing::info!(documents = catalog.len(), "Catalog loaded");

        Ok(Self::with_catalog(config, catalog))
    }

    /// Build the state around an already loaded catalog.
    #[must_use]
    pub fn with_catalog(config: PortalConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// The immutable document catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Pause before each assistant reply.
    #[must_use]
    pub fn typing_delay(&self) -> Duration {
        self.inner.config.typing_delay
    }
}

fn load_catalog(path: &Path) -> Result<Catalog, StateError> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| StateError::CatalogRead {
        path: display.clone(),
        source,
    })?;
    Catalog::from_json(&text).map_err(|source| StateError::CatalogInvalid {
        path: display,
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_defaults_to_mock_catalog() {
        let state = AppState::new(PortalConfig::default()).unwrap();
        assert_eq!(state.catalog().len(), Catalog::mock().len());
    }

    #[test]
    fn test_missing_catalog_file() {
        let config = PortalConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/catalog.json")),
            ..PortalConfig::default()
        };
        let err = AppState::new(config).err().unwrap();
        assert!(matches!(err, StateError::CatalogRead { .. }));
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }

    #[test]
    fn test_catalog_file_is_loaded() {
        let path = std::env::temp_dir().join(format!(
            "diario-catalog-{}.json",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(
            &path,
            r#"[{"id":7,"date":"01/02/2025","organ":"Prefeitura","type":"Edital","excerpt":"Edital 1/2025","edition":"1.234"}]"#,
        )
        .unwrap();

        let config = PortalConfig {
            catalog_path: Some(path.clone()),
            ..PortalConfig::default()
        };
        let state = AppState::new(config).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(state.catalog().len(), 1);
        assert_eq!(state.catalog().documents()[0].organ, "Prefeitura");
    }

    #[test]
    fn test_invalid_catalog_file() {
        let path = std::env::temp_dir().join(format!(
            "diario-catalog-{}.json",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, "[]").unwrap();

        let config = PortalConfig {
            catalog_path: Some(path.clone()),
            ..PortalConfig::default()
        };
        let err = AppState::new(config).err().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            err,
            StateError::CatalogInvalid {
                source: CatalogError::Empty,
                ..
            }
        ));
    }
}
