use piiguard_core::{Error, Result};
use piiguard_pii::{ClassifierConfig, NameSignalMode};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("PIIGUARD_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("PIIGUARD_NAME_SIGNAL") {
            match parse_name_signal(&val) {
                Some(mode) => self.classifier.name_signal = mode,
                None => eprintln!("Warning: Invalid PIIGUARD_NAME_SIGNAL '{}', using default", val),
            }
        }
    }
}

pub fn parse_name_signal(value: &str) -> Option<NameSignalMode> {
    match value.to_lowercase().as_str() {
        "single" => Some(NameSignalMode::Single),
        "per_form" | "per-form" => Some(NameSignalMode::PerForm),
        _ => None,
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.classifier.name_signal, NameSignalMode::Single);
    }

    #[test]
    fn test_from_yaml_file() {
        let file = write_config(
            ".yaml",
            "logging:\n  level: debug\nclassifier:\n  name_signal: per_form\n",
        );

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.classifier.name_signal, NameSignalMode::PerForm);
    }

    #[test]
    fn test_from_toml_file() {
        let file = write_config(".toml", "[logging]\nlevel = \"warn\"\n");

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.classifier.name_signal, NameSignalMode::Single);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let file = write_config(".toml", "logging = [");

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::from_file("/nonexistent/piiguard.yaml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    #[serial]
    fn test_merge_env() {
        unsafe {
            std::env::set_var("PIIGUARD_LOG_LEVEL", "trace");
            std::env::set_var("PIIGUARD_NAME_SIGNAL", "per_form");
        }

        let mut config = AppConfig::default();
        config.merge_env();

        unsafe {
            std::env::remove_var("PIIGUARD_LOG_LEVEL");
            std::env::remove_var("PIIGUARD_NAME_SIGNAL");
        }

        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.classifier.name_signal, NameSignalMode::PerForm);
    }

    #[test]
    #[serial]
    fn test_merge_env_ignores_invalid_name_signal() {
        unsafe {
            std::env::set_var("PIIGUARD_NAME_SIGNAL", "twice");
        }

        let mut config = AppConfig::default();
        config.merge_env();

        unsafe {
            std::env::remove_var("PIIGUARD_NAME_SIGNAL");
        }

        assert_eq!(config.classifier.name_signal, NameSignalMode::Single);
    }

    #[test]
    fn test_parse_name_signal() {
        assert_eq!(parse_name_signal("Single"), Some(NameSignalMode::Single));
        assert_eq!(parse_name_signal("per-form"), Some(NameSignalMode::PerForm));
        assert_eq!(parse_name_signal("double"), None);
    }
}
