//! Enumeration of the network resources a style depends on.

use indexmap::IndexSet;
use serde::Serialize;

use crate::style::{Source, StyleDocument};

/// Sprite file suffixes, in the order they are listed.
const SPRITE_SUFFIXES: [&str; 4] = [".png", ".json", "@2x.png", "@2x.json"];

/// Every resource URL referenced by a style document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceList {
    /// HTTP URL of the style itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// TileJSON URLs and tile URL templates, by source then in-source order
    pub tiles: Vec<String>,

    /// Font names from `text-font`, deduplicated in first-seen order
    pub fonts: Vec<String>,

    /// Sprite image and index URLs, standard then high-DPI
    pub sprites: Vec<String>,

    /// Glyph URL template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<String>,
}

impl ResourceList {
    /// Collect resources from an already translated style document.
    ///
    /// `style_url` is recorded as-is. Empty `sprite`, `glyphs` and source
    /// `url` strings count as absent. Sprite variants are built by plain
    /// concatenation onto the sprite base, so any query string on the base
    /// ends up before the suffix.
    pub fn from_style(style_url: impl Into<String>, style: &StyleDocument) -> Self {
        let sprites: Vec<String> = style
            .sprite
            .as_deref()
            .filter(|sprite| !sprite.is_empty())
            .map(|sprite| {
                SPRITE_SUFFIXES
                    .iter()
                    .map(|suffix| format!("{}{}", sprite, suffix))
                    .collect()
            })
            .unwrap_or_default();

        let tiles: Vec<String> = style
            .sources
            .iter()
            .flat_map(|sources| sources.values())
            .filter_map(Source::as_def)
            .flat_map(|source| {
                source
                    .url
                    .iter()
                    .filter(|url| !url.is_empty())
                    .chain(source.tiles.iter().flatten())
                    .cloned()
            })
            .collect();

        let fonts: IndexSet<&str> = style
            .layers
            .iter()
            .flatten()
            .flat_map(|layer| layer.text_fonts())
            .collect();

        Self {
            style: Some(style_url.into()),
            tiles,
            fonts: fonts.into_iter().map(str::to_string).collect(),
            sprites,
            glyphs: style.glyphs.clone().filter(|glyphs| !glyphs.is_empty()),
        }
    }

    /// Every fetchable URL: the style, its sprites, then tile endpoints.
    ///
    /// Fonts are names rather than URLs and the glyph template still holds
    /// placeholders, so neither is included.
    pub fn all_urls(&self) -> Vec<&str> {
        self.style
            .iter()
            .chain(self.sprites.iter())
            .chain(self.tiles.iter())
            .map(String::as_str)
            .collect()
    }
}
