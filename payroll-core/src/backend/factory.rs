use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::{BackendError, PayrollBackend};
use crate::models::Employee;

/// Backend-agnostic connection configuration.
///
/// `kind` must match the [`BackendFactory::backend_name`] of a registered
/// factory.
///
/// | kind     | uses                                       |
/// |----------|--------------------------------------------|
/// | `http`   | `base_url`, `timeout_secs`                 |
/// | `memory` | `seed_employees`                           |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"http"`).
    pub kind: String,
    /// Root URL the endpoint paths are appended to.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Employees the in-memory backend starts with.
    pub seed_employees: Vec<Employee>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: "http".to_string(),
            base_url: "http://localhost/hrms/api".to_string(),
            timeout_secs: 30,
            seed_employees: Vec::new(),
        }
    }
}

/// One implementation per backend kind, registered with a
/// [`BackendRegistry`] at startup.
#[async_trait]
pub trait BackendFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &BackendConfig,
    ) -> Result<Box<dyn PayrollBackend>, BackendError>;
}

/// The backends a binary can connect to. The CLI registers `http` and
/// `memory` and picks one from `[backend] kind` or `--backend`.
pub struct BackendRegistry {
    factories: HashMap<&'static str, Box<dyn BackendFactory>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Later registrations under the same name win.
    pub fn register(
        &mut self,
        factory: Box<dyn BackendFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Sorted, for the "unknown backend" message.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Connects to the backend named by `config.kind`.
    ///
    /// An unregistered kind is a [`BackendError::Configuration`] that lists
    /// the kinds this binary supports. A bad URL or timeout is reported by
    /// the factory itself.
    pub async fn create(
        &self,
        config: &BackendConfig,
    ) -> Result<Box<dyn PayrollBackend>, BackendError> {
        let factory = self.factories.get(config.kind.as_str()).ok_or_else(|| {
            BackendError::Configuration(format!(
                "unknown backend '{}'; available: {:?}",
                config.kind,
                self.available_backends()
            ))
        })?;

        factory.create(config).await
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
