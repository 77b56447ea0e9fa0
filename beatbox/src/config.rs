//! Configuration file and environment handling.
//!
//! Settings are read from `~/.beatbox/config.ini`:
//!
//! ```ini
//! [api]
//! access_token = pk.example
//! api_url = https://api.mapbox.com
//! ```
//!
//! `MAPBOX_ACCESS_TOKEN` and `MAPBOX_API_URL` override the file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ini::Ini;

use crate::error::ConfigError;
use crate::translator::TranslatorConfig;

/// Environment variable holding the access token.
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "MAPBOX_API_URL";

const API_SECTION: &str = "api";

/// Settings loaded from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    /// Access token for the API
    pub access_token: Option<String>,
    /// API base URL
    pub api_url: Option<String>,
}

impl ConfigFile {
    /// Location of the config file, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".beatbox").join("config.ini"))
    }

    /// Load the config file from its default location.
    ///
    /// A missing file yields the default (empty) configuration.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load the config file at `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let ini = Ini::load_from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let value = |key: &str| {
            ini.section(Some(API_SECTION))
                .and_then(|section| section.get(key))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            access_token: value("access_token"),
            api_url: value("api_url"),
        })
    }

    /// Apply `MAPBOX_ACCESS_TOKEN` / `MAPBOX_API_URL` on top of the file.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(ACCESS_TOKEN_ENV).ok(),
            std::env::var(API_URL_ENV).ok(),
        )
    }

    /// Replace settings with the given values where present and non-empty.
    pub fn with_overrides(mut self, access_token: Option<String>, api_url: Option<String>) -> Self {
        if let Some(token) = access_token.filter(|t| !t.is_empty()) {
            self.access_token = Some(token);
        }
        if let Some(url) = api_url.filter(|u| !u.is_empty()) {
            self.api_url = Some(url);
        }
        self
    }

    /// Build a validated translator configuration.
    pub fn to_translator_config(&self) -> Result<TranslatorConfig, ConfigError> {
        let mut config = TranslatorConfig::new();
        if let Some(token) = &self.access_token {
            config = config.with_access_token(token.clone());
        }
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url.clone());
        }
        config.validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.ini");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("nope.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_load_api_section() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[api]\naccess_token = pk.abc\napi_url = https://custom.example.com\n",
        );

        let config = ConfigFile::load_from(&path).unwrap();

        assert_eq!(config.access_token.as_deref(), Some("pk.abc"));
        assert_eq!(config.api_url.as_deref(), Some("https://custom.example.com"));
    }

    #[test]
    fn test_empty_values_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[api]\naccess_token =\n");

        let config = ConfigFile::load_from(&path).unwrap();

        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_other_sections_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[other]\naccess_token = nope\n");

        let config = ConfigFile::load_from(&path).unwrap();

        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_read_error_on_directory() {
        let dir = TempDir::new().unwrap();
        let result = ConfigFile::load_from(dir.path());
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = ConfigFile {
            access_token: Some("file-token".to_string()),
            api_url: Some("https://file.example.com".to_string()),
        }
        .with_overrides(Some("env-token".to_string()), Some(String::new()));

        assert_eq!(config.access_token.as_deref(), Some("env-token"));
        assert_eq!(config.api_url.as_deref(), Some("https://file.example.com"));
    }

    #[test]
    fn test_to_translator_config() {
        let config = ConfigFile {
            access_token: Some("tok".to_string()),
            api_url: Some("https://custom.example.com/".to_string()),
        }
        .to_translator_config()
        .unwrap();

        assert_eq!(config.access_token.as_deref(), Some("tok"));
        assert_eq!(config.api_url, "https://custom.example.com");
    }

    #[test]
    fn test_to_translator_config_rejects_bad_url() {
        let result = ConfigFile {
            access_token: None,
            api_url: Some("api.mapbox.com".to_string()),
        }
        .to_translator_config();

        assert!(matches!(result, Err(ConfigError::InvalidApiUrl(_))));
    }
}
