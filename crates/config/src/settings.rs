//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{agent, paths, ENV_PREFIX};
use crate::{ConfigError, ReplyTemplates};

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Turn orchestration
    #[serde(default)]
    pub agent: AgentSettings,

    /// Catalog and directive locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Fixed replies and offer templates
    #[serde(default)]
    pub replies: ReplyTemplates,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Turns of history handed to the reply generator
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Directive key holding the persona instructions
    #[serde(default = "default_system_directive_key")]
    pub system_directive_key: String,

    /// Filler for directive keys with no file
    #[serde(default)]
    pub default_directive: Option<String>,
}

fn default_history_window() -> usize {
    agent::HISTORY_WINDOW
}

fn default_system_directive_key() -> String {
    agent::SYSTEM_DIRECTIVE_KEY.to_string()
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            system_directive_key: default_system_directive_key(),
            default_directive: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_directives_dir")]
    pub directives_dir: String,

    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
}

fn default_directives_dir() -> String {
    paths::DIRECTIVES_DIR.to_string()
}

fn default_catalog_path() -> String {
    paths::CATALOG_PATH.to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            directives_dir: default_directives_dir(),
            catalog_path: default_catalog_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_agent()?;
        self.validate_replies()?;
        self.validate_observability()?;
        Ok(())
    }

    fn validate_agent(&self) -> Result<(), ConfigError> {
        if self.agent.history_window == 0 {
            return Err(ConfigError::InvalidValue {
                field: "agent.history_window".to_string(),
                message: "Must keep at least one turn".to_string(),
            });
        }

        if self.agent.history_window > 200 {
            return Err(ConfigError::InvalidValue {
                field: "agent.history_window".to_string(),
                message: format!("Too large (maximum 200), got {}", self.agent.history_window),
            });
        }

        if self.agent.system_directive_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "agent.system_directive_key".to_string(),
                message: "Must not be empty".to_string(),
            });
        }

        Ok(())
    }

    fn validate_replies(&self) -> Result<(), ConfigError> {
        let offers = [
            ("replies.high_ticket_offer", &self.replies.high_ticket_offer),
            ("replies.low_ticket_offer", &self.replies.low_ticket_offer),
        ];
        for (field, template) in offers {
            if !template.contains("{product_link}") {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "Offer template must contain {product_link}".to_string(),
                });
            }
        }

        if self.replies.safety_refusal.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "replies.safety_refusal".to_string(),
                message: "Must not be empty".to_string(),
            });
        }

        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        let level = self.observability.log_level.to_ascii_lowercase();
        if !LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!("Unknown level '{}'", self.observability.log_level),
            });
        }
        Ok(())
    }
}

/// Load settings from `config/default`, `config/{env}` and the environment
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(paths::CONFIG_DIR, env)
}

/// Same as [`load_settings`] with an explicit config directory
pub fn load_settings_from(
    config_dir: impl AsRef<Path>,
    env: Option<&str>,
) -> Result<Settings, ConfigError> {
    let config_dir = config_dir.as_ref();
    let mut builder = Config::builder();

    // Load default config
    let default_path = config_dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        let env_path = config_dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        environment = ?settings.environment,
        history_window = settings.agent.history_window,
        "Settings loaded"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.agent.history_window, 10);
        assert_eq!(settings.agent.system_directive_key, "system");
        assert_eq!(settings.paths.catalog_path, "config/catalog.yaml");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        settings.agent.history_window = 0;
        assert!(settings.validate().is_err());

        settings.agent.history_window = 20;
        assert!(settings.validate().is_ok());

        settings.replies.high_ticket_offer = "buy it".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "replies.high_ticket_offer"
        ));
    }

    #[test]
    fn test_log_level_validation() {
        let mut settings = Settings::default();
        settings.observability.log_level = "DEBUG".to_string();
        assert!(settings.validate().is_ok());
        settings.observability.log_level = "loud".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_layered_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.yaml"),
            "agent:\n  history_window: 12\nreplies:\n  discount_code: BASE\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("production.yaml"),
            "environment: production\nreplies:\n  discount_code: PROD\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), Some("production")).unwrap();
        assert!(settings.environment.is_production());
        assert_eq!(settings.agent.history_window, 12);
        assert_eq!(settings.replies.discount_code, "PROD");
        // untouched sections keep their defaults
        assert_eq!(settings.paths.directives_dir, "config/directives");
    }

    #[test]
    fn test_missing_files_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(dir.path(), None).unwrap();
        assert_eq!(settings.agent.history_window, 10);
    }

    #[test]
    fn test_invalid_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.yaml"), "agent:\n  history_window: 0\n").unwrap();
        assert!(load_settings_from(dir.path(), None).is_err());
    }

    #[test]
    fn test_shipped_config_files() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config");
        let settings = load_settings_from(&dir, Some("production")).unwrap();
        assert!(settings.environment.is_production());
        assert!(settings.observability.log_json);
        assert_eq!(
            settings.agent.default_directive.as_deref(),
            Some("You are Jamie. Keep it brief.")
        );
    }
}
