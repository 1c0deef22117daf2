use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Invalid value {value:?} in environment variable {var}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub chunk_size_bytes: usize,
    pub small_file_threshold_bytes: u64,
    pub large_file_threshold_bytes: u64,
    pub bold_chinese_quotes: bool,
    pub backup: bool,
    pub recursive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size_bytes: MIB as usize,
            small_file_threshold_bytes: MIB,
            large_file_threshold_bytes: 10 * MIB,
            bold_chinese_quotes: false,
            backup: false,
            recursive: false,
        }
    }
}

pub const ENV_CHUNK_SIZE: &str = "MARKDOWN_SPACER_CHUNK_SIZE";
pub const ENV_SMALL_THRESHOLD: &str = "MARKDOWN_SPACER_SMALL_THRESHOLD";
pub const ENV_LARGE_THRESHOLD: &str = "MARKDOWN_SPACER_LARGE_THRESHOLD";
pub const ENV_BOLD_QUOTES: &str = "MARKDOWN_SPACER_BOLD_QUOTES";
pub const ENV_BACKUP: &str = "MARKDOWN_SPACER_BACKUP";
pub const ENV_RECURSIVE: &str = "MARKDOWN_SPACER_RECURSIVE";

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    /// Builds the effective configuration for one run: file (the explicit
    /// one, or the default location when present), then environment
    /// overrides, then validation.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => {
                let path = Self::expand_path(path).unwrap_or_else(|| path.to_path_buf());
                Self::load_from_path(&path)?.ok_or_else(|| ConfigError::ConfigReadError {
                    config_path: path.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                })?
            }
            None => Self::load_from_path(Self::config_path())?.unwrap_or_default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        log::debug!("effective config: {config:?}");
        Ok(config)
    }

    /// Applies `MARKDOWN_SPACER_*` overrides looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_CHUNK_SIZE) {
            self.chunk_size_bytes = parse_number(ENV_CHUNK_SIZE, &v)?;
        }
        if let Some(v) = lookup(ENV_SMALL_THRESHOLD) {
            self.small_file_threshold_bytes = parse_number(ENV_SMALL_THRESHOLD, &v)?;
        }
        if let Some(v) = lookup(ENV_LARGE_THRESHOLD) {
            self.large_file_threshold_bytes = parse_number(ENV_LARGE_THRESHOLD, &v)?;
        }
        if let Some(v) = lookup(ENV_BOLD_QUOTES) {
            self.bold_chinese_quotes = parse_flag(ENV_BOLD_QUOTES, &v)?;
        }
        if let Some(v) = lookup(ENV_BACKUP) {
            self.backup = parse_flag(ENV_BACKUP, &v)?;
        }
        if let Some(v) = lookup(ENV_RECURSIVE) {
            self.recursive = parse_flag(ENV_RECURSIVE, &v)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "chunk_size_bytes",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.small_file_threshold_bytes >= self.large_file_threshold_bytes {
            return Err(ConfigError::InvalidValue {
                field: "small_file_threshold_bytes",
                reason: format!(
                    "must be below large_file_threshold_bytes ({})",
                    self.large_file_threshold_bytes
                ),
            });
        }
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-spacer");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::env;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-spacer/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.chunk_size_bytes, 1024 * 1024);
        assert_eq!(config.small_file_threshold_bytes, 1024 * 1024);
        assert_eq!(config.large_file_threshold_bytes, 10 * 1024 * 1024);
        assert!(!config.bold_chinese_quotes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("bold_chinese_quotes = true\n").unwrap();
        assert!(config.bold_chinese_quotes);
        assert_eq!(config.chunk_size_bytes, Config::default().chunk_size_bytes);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "chunk_size_bytes = 4096\nbackup = true\nrecursive = true\n",
        )
        .unwrap();

        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded.chunk_size_bytes, 4096);
        assert!(loaded.backup);
        assert!(loaded.recursive);
    }

    #[test]
    fn test_parse_error_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "chunk_size_bytes = \"big\"\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_resolve_explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        let err = Config::resolve(Some(&missing)).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigReadError { .. }));
    }

    #[test]
    fn test_resolve_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("spacer.toml");
        std::fs::write(&config_file, "small_file_threshold_bytes = 10\n").unwrap();

        let config = Config::resolve(Some(&config_file)).unwrap();

        assert_eq!(config.small_file_threshold_bytes, 10);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(env_of(&[
                (ENV_CHUNK_SIZE, "2048"),
                (ENV_BOLD_QUOTES, "yes"),
                (ENV_BACKUP, "1"),
                (ENV_RECURSIVE, "FALSE"),
            ]))
            .unwrap();

        assert_eq!(config.chunk_size_bytes, 2048);
        assert!(config.bold_chinese_quotes);
        assert!(config.backup);
        assert!(!config.recursive);
    }

    #[rstest]
    #[case(ENV_CHUNK_SIZE, "lots")]
    #[case(ENV_LARGE_THRESHOLD, "-1")]
    #[case(ENV_BACKUP, "maybe")]
    fn test_bad_env_values(#[case] var: &'static str, #[case] value: &str) {
        let mut config = Config::default();
        let err = config.apply_env(env_of(&[(var, value)])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: v, .. } if v == var));
    }

    #[test]
    fn test_zero_chunk_size_is_invalid() {
        let config = Config {
            chunk_size_bytes: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "chunk_size_bytes",
                ..
            })
        ));
    }

    #[test]
    fn test_thresholds_must_be_ordered() {
        let config = Config {
            small_file_threshold_bytes: 100,
            large_file_threshold_bytes: 100,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("SPACER_TEST_DIR", "/test/env/path");
        }

        let path = PathBuf::from("$SPACER_TEST_DIR/config.toml");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/config.toml")));

        unsafe {
            env::remove_var("SPACER_TEST_DIR");
        }
    }

    #[test]
    fn test_serialization_roundtrip() {
        let original = Config {
            chunk_size_bytes: 512,
            bold_chinese_quotes: true,
            ..Config::default()
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }
}
