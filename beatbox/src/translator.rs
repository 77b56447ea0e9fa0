//! Translation of `mapbox://` locators into HTTP(S) API URLs.
//!
//! # URL Patterns
//!
//! | Locator                                   | HTTP endpoint                                  |
//! |-------------------------------------------|------------------------------------------------|
//! | `styles/{user}/{id}`                      | `{base}/styles/v1/{user}/{id}`                 |
//! | `sprites/{user}/{id}`                     | `{base}/styles/v1/{user}/{id}/sprite`          |
//! | `fonts/{user}/{stack}/{range}.pbf`        | `{base}/fonts/v1/{user}/{stack}/{range}.pbf`   |
//! | `tiles/{id}/{z}/{x}/{y}[@2x].{fmt}`       | `{base}/v4/{id}/{z}/{x}/{y}[@2x].{fmt}`        |
//! | `tiles/{id}`                              | `{base}/v4/{id}.json` (TileJSON)               |
//! | `tiles/{id}/{z}/{x}/{y}[.{fmt}]` template | `{base}/v4/{id}/{z}/{x}/{y}.{fmt or mvt}`      |
//!
//! When an access token is configured, `?access_token={token}` is appended to
//! every generated endpoint. Path segments are not URL-encoded.

use regex::{Captures, Regex};
use std::sync::OnceLock;
use tracing::debug;

use crate::error::ConfigError;
use crate::locator::{is_mapbox_url, parse_mapbox_url, parse_tile_template, ParsedLocator};

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.mapbox.com";

/// Tile format used when a template carries no extension.
const DEFAULT_TILE_FORMAT: &str = "mvt";

/// Configuration shared by every translation from one translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Access token appended as `?access_token=` to generated URLs.
    pub access_token: Option<String>,

    /// API base URL without a trailing slash.
    pub api_url: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl TranslatorConfig {
    /// Create a configuration with the default API URL and no token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access token. An empty token is treated as no token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.access_token = (!token.is_empty()).then_some(token);
        self
    }

    /// Set the API base URL. Trailing slashes are trimmed.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Check that the API URL is usable as a base for generated URLs.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let url = self.api_url.as_str();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidApiUrl(self.api_url));
        }
        if url == "http://" || url == "https://" {
            return Err(ConfigError::InvalidApiUrl(self.api_url));
        }
        Ok(self)
    }
}

/// Translates locators into HTTP URLs against a configured API base.
#[derive(Debug, Clone, Default)]
pub struct UrlTranslator {
    config: TranslatorConfig,
}

impl UrlTranslator {
    /// Creates a translator from the given configuration.
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    /// The configuration this translator was built with.
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// The configured access token, if any.
    pub fn access_token(&self) -> Option<&str> {
        self.config.access_token.as_deref()
    }

    /// The configured API base URL.
    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    /// Query suffix carrying the access token, or an empty string.
    fn token_suffix(&self) -> String {
        match self.access_token() {
            Some(token) => format!("?access_token={}", token),
            None => String::new(),
        }
    }

    /// Convert a locator into an HTTP URL.
    ///
    /// Returns the input unchanged when it is not a recognised locator.
    ///
    /// # Examples
    ///
    /// ```
    /// use beatbox::translator::{TranslatorConfig, UrlTranslator};
    ///
    /// let translator = UrlTranslator::new(TranslatorConfig::new().with_access_token("tok"));
    /// assert_eq!(
    ///     translator.to_http_url("mapbox://tiles/mapbox.satellite/1/0/0@2x.png"),
    ///     "https://api.mapbox.com/v4/mapbox.satellite/1/0/0@2x.png?access_token=tok"
    /// );
    /// assert_eq!(translator.to_http_url("https://example.com"), "https://example.com");
    /// ```
    pub fn to_http_url(&self, locator: &str) -> String {
        let base = self.api_url();
        let token = self.token_suffix();

        match parse_mapbox_url(locator) {
            ParsedLocator::Styles { username, id } => {
                format!("{}/styles/v1/{}/{}{}", base, username, id, token)
            }
            // The client appends `.png`, `.json` or `@2x.*` to the sprite base.
            ParsedLocator::Sprites { username, id } => {
                format!("{}/styles/v1/{}/{}/sprite{}", base, username, id, token)
            }
            ParsedLocator::Fonts {
                username,
                fontstack,
                range,
            } => format!(
                "{}/fonts/v1/{}/{}/{}.pbf{}",
                base, username, fontstack, range, token
            ),
            ParsedLocator::Tiles {
                id,
                coord: Some(coord),
            } => {
                let hdpi = if coord.high_dpi { "@2x" } else { "" };
                format!(
                    "{}/v4/{}/{}/{}/{}{}.{}{}",
                    base, id, coord.z, coord.x, coord.y, hdpi, coord.format, token
                )
            }
            ParsedLocator::Tiles { id, coord: None } => {
                format!("{}/v4/{}.json{}", base, id, token)
            }
            ParsedLocator::Unknown => match parse_tile_template(locator) {
                // Placeholders stay literal for the rendering client.
                Some(template) => format!(
                    "{}/v4/{}/{{z}}/{{x}}/{{y}}.{}{}",
                    base,
                    template.id,
                    template.format.as_deref().unwrap_or(DEFAULT_TILE_FORMAT),
                    token
                ),
                None => {
                    if is_mapbox_url(locator) {
                        debug!(locator, "Unrecognised locator, leaving unchanged");
                    }
                    locator.to_string()
                }
            },
        }
    }

    /// Translate `input` if it is a locator, otherwise return it as-is.
    pub fn resolve(&self, input: &str) -> String {
        if is_mapbox_url(input) {
            self.to_http_url(input)
        } else {
            input.to_string()
        }
    }

    /// Rewrite a glyph URL template such as
    /// `mapbox://fonts/mapbox/{fontstack}/{range}.pbf`.
    ///
    /// The template still holds unresolved placeholders, so it cannot go
    /// through [`to_http_url`](Self::to_http_url). Only the
    /// `mapbox://fonts/{user}/` prefix is replaced, and the token is inserted
    /// directly after the first `.pbf`. Templates without the scheme are
    /// returned unchanged.
    pub fn translate_glyphs(&self, glyphs: &str) -> String {
        if !glyphs.contains(crate::locator::MAPBOX_SCHEME) {
            return glyphs.to_string();
        }

        let base = self.api_url();
        let mut translated = glyphs_prefix_pattern()
            .replacen(glyphs, 1, |caps: &Captures| {
                format!("{}/fonts/v1/{}/", base, &caps[1])
            })
            .into_owned();

        if let Some(token) = self.access_token() {
            translated = translated.replacen(".pbf", &format!(".pbf?access_token={}", token), 1);
        }

        translated
    }
}

fn glyphs_prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"mapbox://fonts/([^/]+)/").unwrap())
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"access_token=[^&]*").unwrap())
}

/// Mask the access token in a URL before it is logged.
pub(crate) fn redact_token(url: &str) -> String {
    token_pattern()
        .replace_all(url, "access_token=***")
        .into_owned()
}
