#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::DEFAULT_BASE_URL;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use std::path::Path;
use toml_config::TomlConfig;

/// Resolved service settings: default, then config file, then command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn resolve(config_file: Option<&Path>, base_url_override: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = config_file {
            tracing::debug!("Loading configuration from {}", path.display());
            let file_config = TomlConfig::from_file(path)?;
            file_config.validate()?;
            if let Some(base_url) = file_config.base_url() {
                config.base_url = base_url.to_string();
            }
        }

        if let Some(base_url) = base_url_override {
            config.base_url = base_url.to_string();
        }

        config.validate()?;
        Ok(config)
    }
}

impl ConfigProvider for ServiceConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_base_url() {
        let config = ServiceConfig::resolve(None, None).unwrap();
        assert_eq!(config.base_url(), "https://mygene.info/v3");
    }

    #[test]
    fn test_flag_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[service]\nbase_url = \"http://file.example.org/v3\"").unwrap();

        let from_file = ServiceConfig::resolve(Some(file.path()), None).unwrap();
        assert_eq!(from_file.base_url, "http://file.example.org/v3");

        let from_flag =
            ServiceConfig::resolve(Some(file.path()), Some("http://127.0.0.1:8080")).unwrap();
        assert_eq!(from_flag.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_override_is_config_error() {
        let err = ServiceConfig::resolve(None, Some("mygene.info")).unwrap_err();
        assert_eq!(err.kind(), crate::utils::error::ErrorKind::Config);
    }
}
