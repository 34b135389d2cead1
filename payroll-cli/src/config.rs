//! Application configuration, read from a TOML file.
//!
//! ```toml
//! [backend]
//! kind = "http"
//! base_url = "http://localhost/hrms/api"
//! timeout_secs = 30
//!
//! [logging]
//! level = "info"
//! file = "payroll.log"
//! stdout = true
//!
//! [session]
//! id = 1
//! full_name = "Payroll Admin"
//! email = "admin@example.com"
//! role = "admin"
//! ```
//!
//! Every section is optional. The file is looked up in this order: the
//! `--config` flag, the `PAYROLL_CONFIG` environment variable, then
//! `./payroll.toml`. With none of those present the defaults apply.

use std::path::{Path, PathBuf};

use payroll_core::{backend::BackendConfig, models::Session};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const CONFIG_ENV: &str = "PAYROLL_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "payroll.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("no [session] configured; {0} needs a signed-in user")]
    NoSession(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Any `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Appended to when set.
    pub file: Option<PathBuf>,
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            stdout: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
    pub session: Option<Session>,
}

impl AppConfig {
    pub fn from_toml(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Loads the first config file found, or the defaults.
    ///
    /// An explicitly named file (flag or environment) must exist; the
    /// implicit `./payroll.toml` is skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match resolve_path(explicit, env, Path::new(DEFAULT_CONFIG_FILE)) {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Ok((Self::load_from_file(&path)?, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    pub fn session(
        &self,
        operation: &'static str,
    ) -> Result<&Session, ConfigError> {
        self.session
            .as_ref()
            .ok_or(ConfigError::NoSession(operation))
    }
}

/// Picks the config file: flag, then environment, then `fallback` if it
/// exists on disk.
pub fn resolve_path(
    explicit: Option<&Path>,
    env: Option<PathBuf>,
    fallback: &Path,
) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or(env)
        .or_else(|| fallback.is_file().then(|| fallback.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use payroll_core::models::Role;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml("", Path::new("payroll.toml")).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.backend.kind, "http");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.stdout);
        assert_eq!(config.session, None);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let text = r#"
[backend]
base_url = "https://hr.example.com/api"

[session]
id = 7
full_name = "Kamala Silva"
role = "employee"
"#;

        let config = AppConfig::from_toml(text, Path::new("payroll.toml")).unwrap();

        assert_eq!(config.backend.base_url, "https://hr.example.com/api");
        assert_eq!(config.backend.timeout_secs, 30);
        let session = config.session.unwrap();
        assert_eq!(session.id, 7);
        assert_eq!(session.role, Role::Employee);
        assert_eq!(session.email, "");
    }

    #[test]
    fn bad_role_is_a_parse_error_naming_the_file() {
        let text = "[session]\nid = 1\nfull_name = \"x\"\nrole = \"owner\"\n";

        let err = AppConfig::from_toml(text, Path::new("conf/payroll.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("conf/payroll.toml"));
    }

    #[test]
    fn missing_session_is_reported_for_the_operation() {
        let err = AppConfig::default().session("bulk payroll import").unwrap_err();

        assert_eq!(
            err.to_string(),
            "no [session] configured; bulk payroll import needs a signed-in user"
        );
    }

    #[test]
    fn flag_wins_over_environment() {
        let resolved = resolve_path(
            Some(Path::new("flag.toml")),
            Some(PathBuf::from("env.toml")),
            Path::new("missing-default.toml"),
        );

        assert_eq!(resolved, Some(PathBuf::from("flag.toml")));
    }

    #[test]
    fn environment_wins_over_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join("payroll.toml");
        std::fs::write(&default, "").unwrap();

        let resolved = resolve_path(None, Some(PathBuf::from("env.toml")), &default);

        assert_eq!(resolved, Some(PathBuf::from("env.toml")));
    }

    #[test]
    fn default_file_used_only_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join("payroll.toml");

        assert_eq!(resolve_path(None, None, &default), None);

        std::fs::write(&default, "").unwrap();
        assert_eq!(resolve_path(None, None, &default), Some(default));
    }
}
