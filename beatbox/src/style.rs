//! Style document model and locator rewriting.
//!
//! Only the fields that can carry locators are typed: `sprite`, `glyphs`,
//! `sources` and `layers`. Everything else is kept in flattened maps and
//! survives a deserialize/serialize cycle unchanged.
//!
//! Deserialization is lenient. A typed field whose JSON value has an
//! unexpected shape (a numeric `url`, a source that is not an object) is
//! left in the surrounding `rest` map untouched instead of failing the
//! whole document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::locator::is_mapbox_url;
use crate::translator::UrlTranslator;

/// A map style document.
///
/// Serialization writes the typed fields first and then `rest`, so the
/// top-level key order of a round-tripped document may differ from the
/// input. Values are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct StyleDocument {
    /// Sprite base URL (without `.png`/`.json` suffix)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,

    /// Glyph URL template with `{fontstack}` and `{range}` placeholders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<String>,

    /// Named sources in document order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<IndexMap<String, Source>>,

    /// Layers in draw order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<LayerDef>>,

    /// Unrecognised top-level members (`version`, `name`, `center`, ...)
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// An entry of the `sources` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "Value")]
pub enum Source {
    /// An object source definition
    Def(SourceDef),
    /// Any non-object value, carried through unchanged
    Other(Value),
}

impl Source {
    /// The source definition, if this entry is an object.
    pub fn as_def(&self) -> Option<&SourceDef> {
        match self {
            Source::Def(def) => Some(def),
            Source::Other(_) => None,
        }
    }

    fn as_def_mut(&mut self) -> Option<&mut SourceDef> {
        match self {
            Source::Def(def) => Some(def),
            Source::Other(_) => None,
        }
    }
}

/// A source definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct SourceDef {
    /// TileJSON reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Tile URL templates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<String>>,

    /// Other source members (`type`, `tileSize`, a non-string `url`, ...)
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// A style layer. Only `layout` is inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct LayerDef {
    /// Layout properties, when `layout` is an object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Map<String, Value>>,

    /// Other layer members (`id`, `type`, `paint`, ...)
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl From<Map<String, Value>> for StyleDocument {
    fn from(mut rest: Map<String, Value>) -> Self {
        let sprite = take_string(&mut rest, "sprite");
        let glyphs = take_string(&mut rest, "glyphs");

        let sources = match rest.shift_remove("sources") {
            Some(Value::Object(entries)) => Some(
                entries
                    .into_iter()
                    .map(|(name, value)| (name, Source::from(value)))
                    .collect(),
            ),
            Some(other) => {
                rest.insert("sources".to_string(), other);
                None
            }
            None => None,
        };

        let layers_are_objects = rest
            .get("layers")
            .and_then(Value::as_array)
            .is_some_and(|layers| layers.iter().all(Value::is_object));
        let layers = match rest.shift_remove("layers") {
            Some(Value::Array(layers)) if layers_are_objects => Some(
                layers
                    .into_iter()
                    .filter_map(|layer| match layer {
                        Value::Object(map) => Some(LayerDef::from(map)),
                        _ => None,
                    })
                    .collect(),
            ),
            Some(other) => {
                rest.insert("layers".to_string(), other);
                None
            }
            None => None,
        };

        Self {
            sprite,
            glyphs,
            sources,
            layers,
            rest,
        }
    }
}

impl From<Value> for Source {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Source::Def(SourceDef::from(map)),
            other => Source::Other(other),
        }
    }
}

impl From<Map<String, Value>> for SourceDef {
    fn from(mut rest: Map<String, Value>) -> Self {
        Self {
            url: take_string(&mut rest, "url"),
            tiles: take_string_list(&mut rest, "tiles"),
            rest,
        }
    }
}

impl From<Map<String, Value>> for LayerDef {
    fn from(mut rest: Map<String, Value>) -> Self {
        let layout = match rest.get("layout") {
            Some(Value::Object(_)) => match rest.shift_remove("layout") {
                Some(Value::Object(layout)) => Some(layout),
                _ => None,
            },
            _ => None,
        };
        Self { layout, rest }
    }
}

/// Move `key` out of `map` if it holds a string.
fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !map.get(key).is_some_and(Value::is_string) {
        return None;
    }
    match map.shift_remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Move `key` out of `map` if it holds an array of strings.
fn take_string_list(map: &mut Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let all_strings = map
        .get(key)
        .and_then(Value::as_array)
        .is_some_and(|items| items.iter().all(Value::is_string));
    if !all_strings {
        return None;
    }
    match map.shift_remove(key) {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

impl LayerDef {
    /// Font names listed in `layout["text-font"]`.
    ///
    /// Only a literal array is read; string members are yielded in order and
    /// anything else (expressions, nested arrays) is skipped.
    pub fn text_fonts(&self) -> impl Iterator<Item = &str> {
        self.layout
            .as_ref()
            .and_then(|layout| layout.get("text-font"))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }
}

impl StyleDocument {
    /// Parse a style document from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

/// Rewrite every locator embedded in `style` into its HTTP equivalent.
///
/// Returns a new document; `style` is left untouched. Fields absent from the
/// input stay absent and non-locator values are copied as they are.
pub fn translate_style_urls(translator: &UrlTranslator, style: &StyleDocument) -> StyleDocument {
    let mut translated = style.clone();

    if let Some(sprite) = translated.sprite.as_mut() {
        if is_mapbox_url(sprite) {
            *sprite = translator.to_http_url(sprite);
        }
    }

    if let Some(glyphs) = translated.glyphs.as_mut() {
        *glyphs = translator.translate_glyphs(glyphs);
    }

    if let Some(sources) = translated.sources.as_mut() {
        for source in sources.values_mut().filter_map(Source::as_def_mut) {
            translate_source(translator, source);
        }
    }

    translated
}

fn translate_source(translator: &UrlTranslator, source: &mut SourceDef) {
    if let Some(url) = source.url.as_mut() {
        if is_mapbox_url(url) {
            *url = translator.to_http_url(url);
        }
    }

    if let Some(tiles) = source.tiles.as_mut() {
        for tile in tiles.iter_mut().filter(|t| is_mapbox_url(t)) {
            *tile = translator.to_http_url(tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::TranslatorConfig;
    use serde_json::json;

    fn translator() -> UrlTranslator {
        UrlTranslator::new(TranslatorConfig::new().with_access_token("test-token"))
    }

    fn style(value: Value) -> StyleDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_translate_sprite() {
        let doc = style(json!({
            "version": 8,
            "sprite": "mapbox://sprites/mapbox/streets-v11"
        }));

        let result = translate_style_urls(&translator(), &doc);

        assert_eq!(
            result.sprite.as_deref(),
            Some("https://api.mapbox.com/styles/v1/mapbox/streets-v11/sprite?access_token=test-token")
        );
    }

    #[test]
    fn test_translate_glyphs_template() {
        let doc = style(json!({
            "version": 8,
            "glyphs": "mapbox://fonts/mapbox/{fontstack}/{range}.pbf"
        }));

        let result = translate_style_urls(&translator(), &doc);

        assert_eq!(
            result.glyphs.as_deref(),
            Some("https://api.mapbox.com/fonts/v1/mapbox/{fontstack}/{range}.pbf?access_token=test-token")
        );
    }

    #[test]
    fn test_translate_sources() {
        let doc = style(json!({
            "version": 8,
            "sources": {
                "mapbox-streets": {
                    "type": "vector",
                    "url": "mapbox://tiles/mapbox.mapbox-streets-v8"
                },
                "satellite": {
                    "type": "raster",
                    "tiles": [
                        "mapbox://tiles/mapbox.satellite/{z}/{x}/{y}.jpg",
                        "https://example.com/{z}/{x}/{y}.png"
                    ],
                    "tileSize": 256
                }
            }
        }));

        let result = translate_style_urls(&translator(), &doc);
        let sources = result.sources.unwrap();

        assert_eq!(
            sources["mapbox-streets"].as_def().unwrap().url.as_deref(),
            Some("https://api.mapbox.com/v4/mapbox.mapbox-streets-v8.json?access_token=test-token")
        );
        assert_eq!(
            sources["satellite"].as_def().unwrap().tiles.as_ref().unwrap(),
            &vec![
                "https://api.mapbox.com/v4/mapbox.satellite/{z}/{x}/{y}.jpg?access_token=test-token"
                    .to_string(),
                "https://example.com/{z}/{x}/{y}.png".to_string(),
            ]
        );
        assert_eq!(sources["satellite"].as_def().unwrap().rest["tileSize"], json!(256));
        assert_eq!(sources["satellite"].as_def().unwrap().rest["type"], json!("raster"));
    }

    #[test]
    fn test_source_order_preserved() {
        let doc = style(json!({
            "sources": { "zeta": {}, "alpha": {}, "mid": {} }
        }));

        let result = translate_style_urls(&translator(), &doc);
        let names: Vec<&str> = result
            .sources
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_non_mapbox_urls_untouched() {
        let doc = style(json!({
            "version": 8,
            "sprite": "https://example.com/sprite",
            "sources": {
                "custom": { "type": "vector", "url": "https://example.com/tiles.json" }
            }
        }));

        let result = translate_style_urls(&UrlTranslator::default(), &doc);

        assert_eq!(result.sprite.as_deref(), Some("https://example.com/sprite"));
        assert_eq!(
            result.sources.as_ref().unwrap()["custom"].as_def().unwrap().url.as_deref(),
            Some("https://example.com/tiles.json")
        );
        assert_eq!(result, doc);
    }

    #[test]
    fn test_missing_properties() {
        let doc = style(json!({ "version": 8 }));

        let result = translate_style_urls(&UrlTranslator::default(), &doc);

        assert_eq!(serde_json::to_value(&result).unwrap(), json!({ "version": 8 }));
    }

    #[test]
    fn test_input_not_mutated() {
        let doc = style(json!({
            "sprite": "mapbox://sprites/mapbox/streets-v11",
            "glyphs": "mapbox://fonts/mapbox/{fontstack}/{range}.pbf",
            "sources": { "s": { "url": "mapbox://tiles/a.b", "tiles": ["mapbox://tiles/a.b/{z}/{x}/{y}"] } }
        }));
        let before = doc.clone();

        let result = translate_style_urls(&translator(), &doc);

        assert_eq!(doc, before);
        assert_ne!(result, doc);
    }

    #[test]
    fn test_unknown_fields_roundtrip() {
        let input = json!({
            "version": 8,
            "name": "Streets",
            "center": [0.0, 51.5],
            "metadata": { "mapbox:autocomposite": true },
            "sources": {
                "s": { "type": "geojson", "data": { "type": "FeatureCollection", "features": [] } }
            },
            "layers": [
                { "id": "bg", "type": "background", "paint": { "background-color": "#fff" } }
            ]
        });

        let doc = style(input.clone());
        let result = translate_style_urls(&translator(), &doc);

        assert_eq!(serde_json::to_value(&result).unwrap(), input);
    }

    #[test]
    fn test_non_string_url_left_in_rest() {
        let doc = style(json!({
            "sources": {
                "a": { "url": 42 },
                "b": { "url": "mapbox://tiles/x.y" }
            }
        }));

        let result = translate_style_urls(&translator(), &doc);
        let sources = result.sources.as_ref().unwrap();

        let a = sources["a"].as_def().unwrap();
        assert!(a.url.is_none());
        assert_eq!(a.rest["url"], json!(42));
        assert_eq!(
            sources["b"].as_def().unwrap().url.as_deref(),
            Some("https://api.mapbox.com/v4/x.y.json?access_token=test-token")
        );

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["sources"]["a"], json!({ "url": 42 }));
    }

    #[test]
    fn test_malformed_members_carried_through() {
        let input = json!({
            "sprite": 7,
            "sources": {
                "c": "not-a-source",
                "d": { "tiles": ["mapbox://tiles/x.y/{z}/{x}/{y}.png", 3] }
            },
            "layers": [{ "id": "bg", "layout": "flat" }]
        });

        let doc = style(input.clone());
        assert!(doc.sprite.is_none());
        assert_eq!(doc.sources.as_ref().unwrap()["c"], Source::Other(json!("not-a-source")));

        let result = translate_style_urls(&translator(), &doc);
        assert_eq!(serde_json::to_value(&result).unwrap(), input);
    }

    #[test]
    fn test_text_fonts() {
        let layer: LayerDef = serde_json::from_value(json!({
            "id": "labels",
            "layout": { "text-font": ["DIN Pro Medium", ["get", "font"], "Arial Unicode MS Regular"] }
        }))
        .unwrap();

        let fonts: Vec<&str> = layer.text_fonts().collect();
        assert_eq!(fonts, vec!["DIN Pro Medium", "Arial Unicode MS Regular"]);
    }

    #[test]
    fn test_text_fonts_absent() {
        let layer: LayerDef = serde_json::from_value(json!({ "id": "fill" })).unwrap();
        assert_eq!(layer.text_fonts().count(), 0);

        let layer: LayerDef =
            serde_json::from_value(json!({ "layout": { "text-font": "not-an-array" } })).unwrap();
        assert_eq!(layer.text_fonts().count(), 0);
    }

    #[test]
    fn test_from_slice() {
        let doc = StyleDocument::from_slice(br#"{"version":8,"sprite":"x"}"#).unwrap();
        assert_eq!(doc.sprite.as_deref(), Some("x"));
        assert_eq!(doc.rest["version"], json!(8));

        assert!(StyleDocument::from_slice(b"not json").is_err());
    }
}
