//! The persisted backend choice.
//!
//! A single `backend` key is kept in `preferences.toml` under the per-user
//! config directory. Whatever is on disk, the effective selection is
//! always a registered backend.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use directories_next::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::backend::{Backend, BackendRegistry};
use crate::AppError;

const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    backend: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PreferenceStore { path: path.into() }
    }

    /// The store in the per-user config directory, next to `config.toml`.
    pub fn user() -> Option<Self> {
        let dirs = ProjectDirs::from("st", "0x0", env!("CARGO_PKG_NAME"))?;
        Some(PreferenceStore::new(dirs.config_dir().join(PREFERENCES_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored backend name, if any.
    ///
    /// A file that cannot be parsed is treated as empty.
    pub fn backend(&self) -> crate::AppResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let source =
            fs::read_to_string(&self.path).map_err(|e| AppError::preferences(&self.path, e))?;

        match toml::from_str::<Preferences>(&source) {
            Ok(prefs) => Ok(prefs.backend),
            Err(e) => {
                warn!("ignoring unreadable preferences at {}: {e}", self.path.display());
                Ok(None)
            }
        }
    }

    pub fn set_backend(&self, name: &str) -> crate::AppResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| AppError::preferences(dir, e))?;
        }

        let prefs = Preferences {
            backend: Some(name.to_owned()),
        };
        let source = toml::to_string(&prefs).map_err(|e| AppError::preferences(&self.path, e))?;
        fs::write(&self.path, source).map_err(|e| AppError::preferences(&self.path, e))?;

        Ok(())
    }
}

/// The currently selected backend, backed by a [`PreferenceStore`].
#[derive(Debug)]
pub struct BackendSelection {
    registry: BackendRegistry,
    store: PreferenceStore,
    current: Mutex<String>,
}

impl BackendSelection {
    pub fn load(registry: BackendRegistry, store: PreferenceStore) -> crate::AppResult<Self> {
        let current = match store.backend()? {
            Some(name) if registry.contains(&name) => name,
            Some(name) => {
                let fallback = registry.default_backend().name.clone();
                warn!("stored backend '{name}' is not registered, using '{fallback}'");
                fallback
            }
            None => registry.default_backend().name.clone(),
        };

        Ok(BackendSelection {
            registry,
            store,
            current: Mutex::new(current),
        })
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    pub fn current(&self) -> Backend {
        let name = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        self.registry
            .get(&name)
            .unwrap_or_else(|| self.registry.default_backend())
            .clone()
    }

    /// Select `name` for subsequent uploads and persist the choice.
    pub fn select(&self, name: &str) -> crate::AppResult<Backend> {
        let backend = self
            .registry
            .get(name)
            .ok_or_else(|| AppError::UnknownBackend(name.to_owned()))?
            .clone();

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        self.store.set_backend(&backend.name)?;
        *current = backend.name.clone();

        info!(
            "selected backend '{}' ({}), saved to {}",
            backend.name,
            backend.endpoint,
            self.store.path().display()
        );
        Ok(backend)
    }
}
