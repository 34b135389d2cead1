use anyhow::{Context, Result};
use payroll_core::backend::{
    BackendConfig, BackendRegistry, MemoryBackendFactory, PayrollBackend,
};
use payroll_http::HttpBackendFactory;
use tracing::debug;

/// Registry with every backend this binary ships.
pub fn build_registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register(Box::new(HttpBackendFactory));
    registry.register(Box::new(MemoryBackendFactory));
    registry
}

pub async fn connect(config: &BackendConfig) -> Result<Box<dyn PayrollBackend>> {
    debug!(kind = %config.kind, "connecting to payroll backend");
    build_registry()
        .create(config)
        .await
        .with_context(|| format!("Failed to set up '{}' backend", config.kind))
}
