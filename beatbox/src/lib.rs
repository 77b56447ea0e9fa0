//! BeatBox - `mapbox://` locator translation
//!
//! This library converts the compact `mapbox://` resource locators used in
//! map style documents into HTTP(S) URLs against the Mapbox API, rewrites
//! the locators embedded in a style, and lists every resource a style
//! depends on.
//!
//! Parsing, translation and rewriting are pure functions. Fetching a style
//! goes through the [`AsyncHttpClient`] trait.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod locator;
pub mod resources;
pub mod style;
pub mod translator;

pub use client::BeatBox;
pub use config::ConfigFile;
pub use error::{BeatBoxError, BeatBoxResult, ConfigError, FetchError};
pub use fetch::{AsyncHttpClient, HttpResponse, ReqwestClient};
pub use locator::{parse_mapbox_url, ParsedLocator, TileCoord};
pub use resources::ResourceList;
pub use style::{translate_style_urls, LayerDef, Source, SourceDef, StyleDocument};
pub use translator::{TranslatorConfig, UrlTranslator};
