//! The BeatBox facade.
//!
//! Bundles a [`UrlTranslator`] with an HTTP client and exposes the public
//! operations: locator parsing and translation, style rewriting, and
//! fetching a style to enumerate its resources.
//!
//! # Example
//!
//! ```no_run
//! use beatbox::{BeatBox, ReqwestClient, TranslatorConfig};
//!
//! # async fn run() -> beatbox::BeatBoxResult<()> {
//! let config = TranslatorConfig::new().with_access_token("pk.example");
//! let beatbox = BeatBox::new(config, ReqwestClient::new()?);
//!
//! let resources = beatbox
//!     .get_style_resources("mapbox://styles/mapbox/streets-v11")
//!     .await?;
//! for url in resources.all_urls() {
//!     println!("{}", url);
//! }
//! # Ok(())
//! # }
//! ```

use tracing::{debug, info, warn};

use crate::error::{BeatBoxResult, ConfigError, FetchError};
use crate::fetch::AsyncHttpClient;
use crate::locator::{parse_mapbox_url, ParsedLocator};
use crate::resources::ResourceList;
use crate::style::{translate_style_urls, StyleDocument};
use crate::translator::{redact_token, TranslatorConfig, UrlTranslator};

/// Translator and style fetcher.
///
/// Configuration is fixed at construction, so one instance can serve
/// concurrent calls without coordination.
pub struct BeatBox<C: AsyncHttpClient> {
    translator: UrlTranslator,
    http_client: C,
}

impl<C: AsyncHttpClient> BeatBox<C> {
    /// Creates a new BeatBox with the given configuration and HTTP client.
    pub fn new(config: TranslatorConfig, http_client: C) -> Self {
        Self {
            translator: UrlTranslator::new(config),
            http_client,
        }
    }

    /// The underlying translator.
    pub fn translator(&self) -> &UrlTranslator {
        &self.translator
    }

    /// Parse a locator into its components.
    pub fn parse_mapbox_url(&self, locator: &str) -> ParsedLocator {
        parse_mapbox_url(locator)
    }

    /// Convert a locator into an HTTP URL, or return it unchanged.
    pub fn to_http_url(&self, locator: &str) -> String {
        self.translator.to_http_url(locator)
    }

    /// Rewrite every locator in `style` into its HTTP equivalent.
    pub fn translate_style_urls(&self, style: &StyleDocument) -> StyleDocument {
        translate_style_urls(&self.translator, style)
    }

    /// Fetch a style by locator or HTTP URL and rewrite its locators.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingAccessToken`] if no token is configured. No
    ///   request is made in that case.
    /// - [`FetchError`] if the request fails, the server answers with a
    ///   non-success status, or the body is not a style document.
    pub async fn translate_style(&self, style_url: &str) -> BeatBoxResult<StyleDocument> {
        if self.translator.access_token().is_none() {
            return Err(ConfigError::MissingAccessToken.into());
        }

        let http_url = self.translator.resolve(style_url);
        let style = self.fetch_style(&http_url).await?;

        Ok(self.translate_style_urls(&style))
    }

    /// Fetch a style and list every resource it references.
    ///
    /// # Errors
    ///
    /// Same as [`translate_style`](Self::translate_style).
    pub async fn get_style_resources(&self, style_url: &str) -> BeatBoxResult<ResourceList> {
        let style = self.translate_style(style_url).await?;
        let resources = ResourceList::from_style(self.translator.resolve(style_url), &style);

        debug!(
            tiles = resources.tiles.len(),
            fonts = resources.fonts.len(),
            sprites = resources.sprites.len(),
            "Collected style resources"
        );

        Ok(resources)
    }

    async fn fetch_style(&self, url: &str) -> Result<StyleDocument, FetchError> {
        let redacted = redact_token(url);
        debug!(url = %redacted, "Fetching style");

        let response = self.http_client.get(url).await.inspect_err(|e| {
            warn!(url = %redacted, error = %e, "Style request failed");
        })?;

        if !response.is_success() {
            warn!(url = %redacted, status = %response.status_text, "Style fetch returned error status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status_text,
            });
        }

        let style: StyleDocument = response.json(url)?;
        info!(url = %redacted, "Fetched style");

        Ok(style)
    }
}
