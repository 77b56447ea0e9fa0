//! `mapbox://` locator parsing.
//!
//! Classifies a locator into one of four resource kinds:
//!
//! - `mapbox://styles/{username}/{style_id}`
//! - `mapbox://sprites/{username}/{style_id}`
//! - `mapbox://fonts/{username}/{fontstack}/{range}.pbf`
//! - `mapbox://tiles/{tileset_id}[/{z}/{x}/{y}[@2x].{format}]`
//!
//! Anything else, including strings without the scheme, parses to
//! [`ParsedLocator::Unknown`]. Parsing never fails.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Scheme prefix shared by every locator.
pub const MAPBOX_SCHEME: &str = "mapbox://";

/// Coordinates of a single tile within a tileset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileCoord {
    /// Zoom level
    pub z: u32,
    /// Column
    pub x: u32,
    /// Row
    pub y: u32,
    /// Whether the `@2x` marker was present
    #[serde(rename = "highDpi")]
    pub high_dpi: bool,
    /// File extension without the leading dot (e.g. "png", "mvt")
    pub format: String,
}

/// A classified locator.
///
/// Serializes with a `type` tag (`styles`, `sprites`, `fonts`, `tiles`,
/// `unknown`) and omits fields the variant does not carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParsedLocator {
    /// `styles/{username}/{id}`
    Styles { username: String, id: String },
    /// `sprites/{username}/{id}`
    Sprites { username: String, id: String },
    /// `fonts/{username}/{fontstack}/{range}.pbf`
    Fonts {
        username: String,
        fontstack: String,
        range: String,
    },
    /// `tiles/{id}`, optionally followed by a tile coordinate.
    ///
    /// `coord` is `None` for a bare tileset reference.
    Tiles {
        id: String,
        #[serde(flatten)]
        coord: Option<TileCoord>,
    },
    /// Not a locator, or a locator of no known shape.
    Unknown,
}

impl ParsedLocator {
    /// Lowercase name of the resource kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ParsedLocator::Styles { .. } => "styles",
            ParsedLocator::Sprites { .. } => "sprites",
            ParsedLocator::Fonts { .. } => "fonts",
            ParsedLocator::Tiles { .. } => "tiles",
            ParsedLocator::Unknown => "unknown",
        }
    }

    /// Returns true for [`ParsedLocator::Unknown`].
    pub fn is_unknown(&self) -> bool {
        matches!(self, ParsedLocator::Unknown)
    }
}

/// A tile URL template whose coordinates are the literal `{z}/{x}/{y}`
/// placeholders, e.g. `mapbox://tiles/mapbox.satellite/{z}/{x}/{y}.jpg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileTemplate {
    /// Tileset id
    pub id: String,
    /// Extension without the leading dot, if the template carries one
    pub format: Option<String>,
}

/// Returns true if `s` starts with the `mapbox://` scheme.
pub fn is_mapbox_url(s: &str) -> bool {
    s.starts_with(MAPBOX_SCHEME)
}

type Matcher = fn(&str) -> Option<ParsedLocator>;

/// Shape matchers in priority order. The shapes are mutually exclusive, so
/// the order only matters for readability.
const MATCHERS: [Matcher; 5] = [
    match_styles,
    match_sprites,
    match_fonts,
    match_tile_coord,
    match_bare_tiles,
];

/// Parse a locator into its components.
///
/// # Examples
///
/// ```
/// use beatbox::locator::{parse_mapbox_url, ParsedLocator, TileCoord};
///
/// let parsed = parse_mapbox_url("mapbox://tiles/mapbox.satellite/1/0/0@2x.png");
/// assert_eq!(
///     parsed,
///     ParsedLocator::Tiles {
///         id: "mapbox.satellite".to_string(),
///         coord: Some(TileCoord {
///             z: 1,
///             x: 0,
///             y: 0,
///             high_dpi: true,
///             format: "png".to_string(),
///         }),
///     }
/// );
///
/// assert!(parse_mapbox_url("https://example.com").is_unknown());
/// ```
pub fn parse_mapbox_url(locator: &str) -> ParsedLocator {
    let Some(path) = locator.strip_prefix(MAPBOX_SCHEME) else {
        return ParsedLocator::Unknown;
    };

    MATCHERS
        .iter()
        .find_map(|matcher| matcher(path))
        .unwrap_or(ParsedLocator::Unknown)
}

/// Match a full locator against the tile template shape.
///
/// Only the literal placeholders `{z}`, `{x}` and `{y}` are accepted; numeric
/// coordinates are handled by [`parse_mapbox_url`].
pub fn parse_tile_template(locator: &str) -> Option<TileTemplate> {
    let captures = tile_template_pattern().captures(locator)?;
    Some(TileTemplate {
        id: captures[1].to_string(),
        format: captures.get(2).map(|m| m.as_str().to_string()),
    })
}

// Rust's `\d` and `\w` are Unicode-aware, so the patterns spell out ASCII
// classes to keep coordinates parseable as integers.

fn styles_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^styles/([^/]+)/([^/]+)$").unwrap())
}

fn sprites_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^sprites/([^/]+)/([^/]+)$").unwrap())
}

fn fonts_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^fonts/([^/]+)/([^/]+)/([0-9]+-[0-9]+)\.pbf$").unwrap())
}

/// Pattern: `tiles/{id}/{z}/{x}/{y}[@2x].{format}`
///
/// - Group 1: tileset id
/// - Groups 2-4: z, x, y
/// - Group 5: optional `@2x`
/// - Group 6: format
fn tile_coord_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^tiles/([^/]+)/([0-9]+)/([0-9]+)/([0-9]+)(@2x)?\.([A-Za-z0-9_]+)$").unwrap()
    })
}

fn bare_tiles_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^tiles/([^/]+)$").unwrap())
}

fn tile_template_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^mapbox://tiles/([^/]+)/\{z\}/\{x\}/\{y\}(?:\.([A-Za-z0-9_]+))?$").unwrap()
    })
}

fn match_styles(path: &str) -> Option<ParsedLocator> {
    let captures = styles_pattern().captures(path)?;
    Some(ParsedLocator::Styles {
        username: captures[1].to_string(),
        id: captures[2].to_string(),
    })
}

fn match_sprites(path: &str) -> Option<ParsedLocator> {
    let captures = sprites_pattern().captures(path)?;
    Some(ParsedLocator::Sprites {
        username: captures[1].to_string(),
        id: captures[2].to_string(),
    })
}

fn match_fonts(path: &str) -> Option<ParsedLocator> {
    let captures = fonts_pattern().captures(path)?;
    Some(ParsedLocator::Fonts {
        username: captures[1].to_string(),
        fontstack: captures[2].to_string(),
        range: captures[3].to_string(),
    })
}

fn match_tile_coord(path: &str) -> Option<ParsedLocator> {
    let captures = tile_coord_pattern().captures(path)?;

    // Coordinates beyond u32 are not addressable tiles.
    let z = captures[2].parse::<u32>().ok()?;
    let x = captures[3].parse::<u32>().ok()?;
    let y = captures[4].parse::<u32>().ok()?;

    Some(ParsedLocator::Tiles {
        id: captures[1].to_string(),
        coord: Some(TileCoord {
            z,
            x,
            y,
            high_dpi: captures.get(5).is_some(),
            format: captures[6].to_string(),
        }),
    })
}

fn match_bare_tiles(path: &str) -> Option<ParsedLocator> {
    let captures = bare_tiles_pattern().captures(path)?;
    Some(ParsedLocator::Tiles {
        id: captures[1].to_string(),
        coord: None,
    })
}
