//! Configuration management for Recap.
//!
//! Parses `recap.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `email.from`
//! - `email.footer`
//!
//! ## Example
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [render]
//! locale = "de"
//!
//! [greetings]
//! de = ["hallo", "moin"]
//!
//! [email]
//! from = "${RECAP_FROM_EMAIL}"
//! footer = "Sent via Recap"
//! ```

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use recap_renderer::{DEFAULT_LOCALE, GreetingVocabulary, Renderer};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override greeting stripping.
    pub strip_greeting: Option<bool>,
    /// Override greeting locale.
    pub locale: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "recap.toml";

/// Upper bound for `email.max_recipients`.
const MAX_RECIPIENTS_LIMIT: usize = 500;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Extra greeting words per locale, added to the built-in ones.
    pub greetings: BTreeMap<String, Vec<String>>,
    /// Outgoing email configuration.
    pub email: EmailConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            body_limit: 1024 * 1024,
        }
    }
}

/// Rendering configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Whether leading greeting lines are removed.
    pub strip_greeting: bool,
    /// Greeting locale. Locales without words use the built-in English ones.
    pub locale: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            strip_greeting: true,
            locale: DEFAULT_LOCALE.to_owned(),
        }
    }
}

/// Outgoing email configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Sender address.
    pub from: String,
    /// Subject used when neither the request nor the summary provides one.
    pub default_subject: String,
    /// Heading shown at the top of the message body.
    pub heading: String,
    /// Footer line shown at the bottom of the message body.
    pub footer: String,
    /// Maximum number of recipients per message.
    pub max_recipients: usize,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from: "notes@localhost".to_owned(),
            default_subject: "Meeting Summary".to_owned(),
            heading: "Shared Summary".to_owned(),
            footer: "Sent via Recap".to_owned(),
            max_recipients: 50,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`email.from`").
        field: String,
        /// Error message (e.g., "${`RECAP_FROM_EMAIL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `recap.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, so they take precedence over
    /// file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the result does not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(strip_greeting) = settings.strip_greeting {
            self.render.strip_greeting = strip_greeting;
        }
        if let Some(locale) = &settings.locale {
            self.render.locale.clone_from(locale);
        }
    }

    /// Greeting vocabulary: built-in words plus the `[greetings]` table.
    ///
    /// The fallback locale stays [`DEFAULT_LOCALE`], so selecting a locale
    /// nobody configured still strips English greetings.
    #[must_use]
    pub fn vocabulary(&self) -> GreetingVocabulary {
        let mut vocabulary = GreetingVocabulary::builtin();
        for (locale, words) in &self.greetings {
            vocabulary.insert(locale.as_str(), words);
        }
        vocabulary
    }

    /// Renderer configured from the `[render]` and `[greetings]` sections.
    #[must_use]
    pub fn renderer(&self) -> Renderer {
        Renderer::new()
            .with_vocabulary(self.vocabulary())
            .with_locale(self.render.locale.as_str())
            .with_greeting_stripping(self.render.strip_greeting)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_render()?;
        self.validate_email()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }
        if self.server.body_limit == 0 {
            return Err(ConfigError::Validation(
                "server.body_limit must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.locale, "render.locale")?;

        for (locale, words) in &self.greetings {
            require_non_empty(locale, "greetings locale name")?;
            if words.iter().all(|w| w.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "greetings.{locale} must contain at least one word"
                )));
            }
        }

        Ok(())
    }

    fn validate_email(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.email.from, "email.from")?;
        if !self.email.from.contains('@') {
            return Err(ConfigError::Validation(
                "email.from must be an email address".to_owned(),
            ));
        }
        require_non_empty(&self.email.default_subject, "email.default_subject")?;

        if self.email.max_recipients == 0 {
            return Err(ConfigError::Validation(
                "email.max_recipients must be greater than 0".to_owned(),
            ));
        }
        if self.email.max_recipients > MAX_RECIPIENTS_LIMIT {
            return Err(ConfigError::Validation(format!(
                "email.max_recipients cannot exceed {MAX_RECIPIENTS_LIMIT}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_in_place(&mut self.server.host, "server.host")?;
        expand::expand_in_place(&mut self.email.from, "email.from")?;
        expand::expand_in_place(&mut self.email.footer, "email.footer")?;
        Ok(())
    }
}
