use std::time::Duration;

use async_trait::async_trait;
use payroll_core::backend::{BackendConfig, BackendError, BackendFactory, PayrollBackend};
use tracing::info;

use crate::client::HttpBackend;

/// [`BackendFactory`] for the HR backend's JSON API.
///
/// Register this with a [`payroll_core::backend::BackendRegistry`] to make
/// the `"http"` backend available:
///
/// ```rust,no_run
/// use payroll_core::backend::BackendRegistry;
/// use payroll_http::HttpBackendFactory;
///
/// let mut registry = BackendRegistry::new();
/// registry.register(Box::new(HttpBackendFactory));
/// ```
pub struct HttpBackendFactory;

#[async_trait]
impl BackendFactory for HttpBackendFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    /// Builds a client for `config.base_url`. No request is made until the
    /// first call.
    async fn create(
        &self,
        config: &BackendConfig,
    ) -> Result<Box<dyn PayrollBackend>, BackendError> {
        let url = reqwest::Url::parse(&config.base_url).map_err(|e| {
            BackendError::Configuration(format!("invalid base_url '{}': {e}", config.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BackendError::Configuration(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if config.timeout_secs == 0 {
            return Err(BackendError::Configuration(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        let backend =
            HttpBackend::new(&config.base_url, Duration::from_secs(config.timeout_secs))?;
        info!(base_url = backend.base_url(), "using HTTP payroll backend");
        Ok(Box::new(backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> BackendConfig {
        BackendConfig {
            base_url: base_url.to_string(),
            ..BackendConfig::default()
        }
    }

    #[tokio::test]
    async fn default_config_builds_a_backend() {
        let result = HttpBackendFactory.create(&BackendConfig::default()).await;

        assert!(result.is_ok(), "expected Ok, got {:#?}", result.err());
    }

    #[tokio::test]
    async fn rejects_unparseable_url() {
        match HttpBackendFactory.create(&config("not a url")).await {
            Err(BackendError::Configuration(msg)) => assert!(msg.contains("not a url")),
            Err(other) => panic!("expected Configuration error, got {other:#?}"),
            Ok(_) => panic!("expected Configuration error, got a backend"),
        }
    }

    #[tokio::test]
    async fn rejects_non_http_scheme() {
        let result = HttpBackendFactory.create(&config("ftp://example.com/api")).await;

        assert!(matches!(result, Err(BackendError::Configuration(_))));
    }

    #[tokio::test]
    async fn rejects_zero_timeout() {
        let cfg = BackendConfig {
            timeout_secs: 0,
            ..BackendConfig::default()
        };

        let result = HttpBackendFactory.create(&cfg).await;

        assert!(matches!(result, Err(BackendError::Configuration(_))));
    }
}
