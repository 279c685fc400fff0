//! Configuration management for kmark.
//!
//! Parses `kmark.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

use kmark::RendererConfig;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override container styling class.
    pub class: Option<String>,
    /// Override container wrapping.
    pub container: Option<bool>,
    /// Override cache enabled flag.
    pub cache_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "kmark.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub render: RenderConfig,
    /// Memoization configuration.
    pub cache: CacheConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Wrap output in the view container.
    pub container: bool,
    /// Extra styling class(es) for the container.
    pub class: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            container: true,
            class: None,
        }
    }
}

/// Memoization configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether renders are memoized.
    pub enabled: bool,
    /// Maximum number of memoized renders.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 256,
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
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `kmark.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values. The result is validated again
    /// after overrides.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
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
        if let Some(class) = &settings.class {
            self.render.class = Some(class.clone());
        }
        if let Some(container) = settings.container {
            self.render.container = container;
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.cache.enabled = cache_enabled;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
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
        self.validate_render()?;
        self.validate_cache()?;
        Ok(())
    }

    /// The class ends up inside an HTML attribute; keep it to plain class tokens.
    fn validate_render(&self) -> Result<(), ConfigError> {
        if let Some(class) = &self.render.class
            && !class
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' '))
        {
            return Err(ConfigError::Validation(format!(
                "render.class contains invalid characters: {class:?}"
            )));
        }
        Ok(())
    }

    fn validate_cache(&self) -> Result<(), ConfigError> {
        if self.cache.enabled && self.cache.capacity == 0 {
            return Err(ConfigError::Validation(
                "cache.capacity must be greater than 0 when the cache is enabled".to_owned(),
            ));
        }
        Ok(())
    }

    /// Renderer settings for this configuration.
    #[must_use]
    pub fn renderer_config(&self) -> RendererConfig {
        RendererConfig {
            cache_capacity: self.cache.enabled.then_some(self.cache.capacity),
            container: self.render.container,
            class: self.render.class.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.render.container);
        assert_eq!(config.render.class, None);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.capacity, 256);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.render.container);
        assert_eq!(config.cache.capacity, 256);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[render]
container = false
class = "summary dark"

[cache]
enabled = true
capacity = 16
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.render.container);
        assert_eq!(config.render.class.as_deref(), Some("summary dark"));
        assert_eq!(config.cache.capacity, 16);
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        let result: Result<Config, _> = toml::from_str("[cache]\ncapacity = \"lots\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_class() {
        let config: Config = toml::from_str("[render]\nclass = \"x\\\" onload=\\\"y\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("render.class"));
    }

    #[test]
    fn test_validate_zero_capacity() {
        let config: Config = toml::from_str("[cache]\ncapacity = 0\n").unwrap();
        assert!(config.validate().is_err());

        let disabled: Config = toml::from_str("[cache]\nenabled = false\ncapacity = 0\n").unwrap();
        disabled.validate().unwrap();
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            class: Some("wide".to_owned()),
            container: Some(false),
            cache_enabled: None,
        });

        assert_eq!(config.render.class.as_deref(), Some("wide"));
        assert!(!config.render.container);
        assert!(config.cache.enabled); // Unchanged
    }

    #[test]
    fn test_renderer_config() {
        let mut config = Config::default();
        assert_eq!(config.renderer_config().cache_capacity, Some(256));

        config.cache.enabled = false;
        config.render.class = Some("a".to_owned());
        let renderer_config = config.renderer_config();
        assert_eq!(renderer_config.cache_capacity, None);
        assert_eq!(renderer_config.class.as_deref(), Some("a"));
        assert!(renderer_config.container);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[render]\nclass = \"report\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.render.class.as_deref(), Some("report"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kmark.toml");
        std::fs::write(&path, "[render\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_cli_settings_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kmark.toml");
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            class: Some("<bad>".to_owned()),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }
}
