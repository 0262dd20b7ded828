//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod authz;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::authz::{AuthzConfig, GrantConfig, ModeratorContentPolicy};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Authorization policy settings.
    #[serde(default)]
    pub authz: AuthzConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default`, an environment-specific overlay
    /// `config/{env}`, and environment variables prefixed with
    /// `PROMPTVAULT__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default", env)
    }

    /// Load configuration using an explicit base file (without extension).
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let overlay = match std::path::Path::new(base).parent() {
            Some(dir) if !dir.as_os_str().is_empty() => format!("{}/{env}", dir.display()),
            _ => env.to_string(),
        };

        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&overlay).required(false))
            .add_source(
                config::Environment::with_prefix("PROMPTVAULT")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("authz.sensitive_tags")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        tracing::debug!(
            base = %base,
            env = %env,
            grants = config.authz.grants.len(),
            "Configuration loaded"
        );

        Ok(config)
    }
}
