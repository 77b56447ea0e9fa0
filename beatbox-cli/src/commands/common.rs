//! Common types and utilities shared across CLI commands.

use beatbox::{BeatBox, ConfigFile, ReqwestClient, TranslatorConfig, UrlTranslator};
use clap::Args;

use crate::error::CliError;

/// API settings accepted by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct ApiArgs {
    /// Access token (overrides MAPBOX_ACCESS_TOKEN and the config file)
    #[arg(long, global = true)]
    pub access_token: Option<String>,

    /// API base URL (overrides MAPBOX_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

/// Resolve translator settings from CLI args, environment and config file.
///
/// Command-line flags win over environment variables, which win over the
/// config file.
pub fn resolve_config(args: &ApiArgs) -> Result<TranslatorConfig, CliError> {
    let file = ConfigFile::load()?;
    resolve_config_with(args, file.with_env_overrides())
}

/// Resolve settings against an already loaded configuration.
pub fn resolve_config_with(args: &ApiArgs, file: ConfigFile) -> Result<TranslatorConfig, CliError> {
    let config = file
        .with_overrides(args.access_token.clone(), args.api_url.clone())
        .to_translator_config()?;
    Ok(config)
}

/// Build a translator for offline commands.
pub fn translator(args: &ApiArgs) -> Result<UrlTranslator, CliError> {
    Ok(UrlTranslator::new(resolve_config(args)?))
}

/// Build a BeatBox backed by the reqwest client.
pub fn beatbox(args: &ApiArgs) -> Result<BeatBox<ReqwestClient>, CliError> {
    let config = resolve_config(args)?;
    Ok(BeatBox::new(config, ReqwestClient::new()?))
}

/// Run a future on a fresh multi-threaded runtime.
pub fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, CliError> {
    let runtime =
        tokio::runtime::Runtime::new().map_err(|e| CliError::RuntimeCreation(e.to_string()))?;
    Ok(runtime.block_on(future))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file() {
        let args = ApiArgs {
            access_token: Some("flag-token".to_string()),
            api_url: None,
        };
        let file = ConfigFile {
            access_token: Some("file-token".to_string()),
            api_url: Some("https://file.example.com".to_string()),
        };

        let config = resolve_config_with(&args, file).unwrap();

        assert_eq!(config.access_token.as_deref(), Some("flag-token"));
        assert_eq!(config.api_url, "https://file.example.com");
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = resolve_config_with(&ApiArgs::default(), ConfigFile::default()).unwrap();

        assert!(config.access_token.is_none());
        assert_eq!(config.api_url, "https://api.mapbox.com");
    }

    #[test]
    fn test_invalid_api_url_flag() {
        let args = ApiArgs {
            access_token: None,
            api_url: Some("localhost:8080".to_string()),
        };

        let result = resolve_config_with(&args, ConfigFile::default());

        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
