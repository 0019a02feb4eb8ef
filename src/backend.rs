use std::collections::HashSet;

use crate::config;
use crate::AppError;

pub use crate::config::Backend;

/// The ordered set of backends uploads can go to. Never empty; the first
/// entry is the default.
#[derive(Debug, Clone)]
pub struct BackendRegistry {
    backends: Vec<Backend>,
}

impl BackendRegistry {
    pub fn new(backends: Vec<Backend>) -> crate::AppResult<Self> {
        if backends.is_empty() {
            return Err(AppError::NoBackends);
        }

        let mut seen = HashSet::new();
        for backend in &backends {
            if !seen.insert(backend.name.as_str()) {
                return Err(AppError::DuplicateBackend(backend.name.clone()));
            }
        }

        Ok(BackendRegistry { backends })
    }

    pub fn from_config(config: &config::Config) -> crate::AppResult<Self> {
        BackendRegistry::new(config.backends.clone())
    }

    pub fn default_backend(&self) -> &Backend {
        &self.backends[0]
    }

    pub fn get(&self, name: &str) -> Option<&Backend> {
        self.backends.iter().find(|backend| backend.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Backend> {
        self.backends.iter()
    }
}
