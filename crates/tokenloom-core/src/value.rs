//! Concrete token values.
//!
//! A [`TokenValue`] is what remains on a token once every alias, computation,
//! and generation directive has been resolved. Values are parsed from the
//! document's `value` field once, when the tree is classified.

use serde_json::{Map, Value as Json, json};

use crate::path::TokenPath;

/// A concrete token value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    String(String),
    Number(f64),
    Bool(bool),
    /// Four numbers in top, right, bottom, left order.
    Quad([f64; 4]),
    Gradient(Gradient),
    Shadows(Vec<ShadowLayer>),
    /// Any other JSON value, carried through untouched.
    Other(Json),
}

impl TokenValue {
    /// Parses the JSON found under a token's `value` key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tokenloom_core::value::TokenValue;
    /// use serde_json::json;
    ///
    /// assert_eq!(TokenValue::from_json(&json!(4)), TokenValue::Number(4.0));
    /// assert_eq!(
    ///     TokenValue::from_json(&json!([1, 2, 3, 4])),
    ///     TokenValue::Quad([1.0, 2.0, 3.0, 4.0])
    /// );
    /// ```
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::String(text) => TokenValue::String(text.clone()),
            Json::Bool(flag) => TokenValue::Bool(*flag),
            Json::Number(number) => number
                .as_f64()
                .map(TokenValue::Number)
                .unwrap_or_else(|| TokenValue::Other(json.clone())),
            Json::Array(items) => parse_quad(items)
                .map(TokenValue::Quad)
                .or_else(|| parse_shadows(items).map(TokenValue::Shadows))
                .unwrap_or_else(|| TokenValue::Other(json.clone())),
            Json::Object(fields) => Gradient::from_json(fields)
                .map(TokenValue::Gradient)
                .unwrap_or_else(|| TokenValue::Other(json.clone())),
            Json::Null => TokenValue::Other(Json::Null),
        }
    }

    /// Converts this value back to JSON.
    pub fn to_json(&self) -> Json {
        match self {
            TokenValue::String(text) => Json::String(text.clone()),
            TokenValue::Number(number) => number_to_json(*number),
            TokenValue::Bool(flag) => Json::Bool(*flag),
            TokenValue::Quad(quad) => Json::Array(quad.iter().map(|n| number_to_json(*n)).collect()),
            TokenValue::Gradient(gradient) => gradient.to_json(),
            TokenValue::Shadows(layers) => {
                Json::Array(layers.iter().map(ShadowLayer::to_json).collect())
            }
            TokenValue::Other(json) => json.clone(),
        }
    }

    /// Returns the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the numeric payload, if this is a number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TokenValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Renders the value as plain text, the way it would appear in a document.
    pub fn to_display_string(&self) -> String {
        match self {
            TokenValue::String(text) => text.clone(),
            TokenValue::Number(number) => format_number(*number),
            TokenValue::Bool(flag) => flag.to_string(),
            other => other.to_json().to_string(),
        }
    }
}

/// Formats a number without a trailing `.0` for integral values.
///
/// # Examples
///
/// ```
/// use tokenloom_core::value::format_number;
///
/// assert_eq!(format_number(100.0), "100");
/// assert_eq!(format_number(0.5), "0.5");
/// assert_eq!(format_number(-2.0), "-2");
/// ```
pub fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        format!("{number}")
    }
}

fn number_to_json(number: f64) -> Json {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        json!(number as i64)
    } else {
        json!(number)
    }
}

fn parse_quad(items: &[Json]) -> Option<[f64; 4]> {
    if items.len() != 4 {
        return None;
    }
    let mut quad = [0.0; 4];
    for (slot, item) in quad.iter_mut().zip(items) {
        *slot = item.as_f64()?;
    }
    Some(quad)
}

fn parse_shadows(items: &[Json]) -> Option<Vec<ShadowLayer>> {
    if items.is_empty() {
        return None;
    }
    items
        .iter()
        .map(|item| item.as_object().and_then(ShadowLayer::from_json))
        .collect()
}

fn parse_point(json: Option<&Json>) -> Option<[f64; 2]> {
    let items = json?.as_array()?;
    match items.as_slice() {
        [x, y] => Some([x.as_f64()?, y.as_f64()?]),
        _ => None,
    }
}

/// How gradient stop positions are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopsUnits {
    /// Positions are fractions of the gradient length (`0.0..=1.0`).
    #[default]
    Relative,
    /// Positions are pixel offsets.
    Pixels,
}

/// A single color stop of a [`Gradient`].
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    pub position: f64,
    pub value: String,
}

/// A linear gradient between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub stops: Vec<GradientStop>,
    pub stops_units: StopsUnits,
}

impl Gradient {
    fn from_json(fields: &Map<String, Json>) -> Option<Self> {
        let start = parse_point(fields.get("start"))?;
        let end = parse_point(fields.get("end"))?;
        let stops = fields
            .get("stops")?
            .as_array()?
            .iter()
            .map(|stop| {
                Some(GradientStop {
                    position: stop.get("position")?.as_f64()?,
                    value: stop.get("value")?.as_str()?.to_string(),
                })
            })
            .collect::<Option<Vec<_>>>()?;
        let stops_units = match fields.get("stopsUnits").and_then(Json::as_str) {
            Some("pixels") => StopsUnits::Pixels,
            _ => StopsUnits::Relative,
        };
        Some(Self {
            start,
            end,
            stops,
            stops_units,
        })
    }

    fn to_json(&self) -> Json {
        let mut fields = Map::new();
        fields.insert("start".into(), json!(self.start));
        fields.insert("end".into(), json!(self.end));
        fields.insert(
            "stops".into(),
            Json::Array(
                self.stops
                    .iter()
                    .map(|stop| json!({ "position": stop.position, "value": stop.value }))
                    .collect(),
            ),
        );
        if self.stops_units == StopsUnits::Pixels {
            fields.insert("stopsUnits".into(), json!("pixels"));
        }
        Json::Object(fields)
    }
}

/// The color of a shadow layer, which may refer to another token.
#[derive(Debug, Clone, PartialEq)]
pub enum ShadowColor {
    /// A literal color.
    Value(String),
    /// A reference that has not been resolved yet.
    Alias(String),
    /// A reference resolved to `value`, found at `path`.
    Resolved { value: String, path: TokenPath },
}

impl ShadowColor {
    /// Returns the concrete color, if known.
    pub fn value(&self) -> Option<&str> {
        match self {
            ShadowColor::Value(value) | ShadowColor::Resolved { value, .. } => Some(value),
            ShadowColor::Alias(_) => None,
        }
    }

    /// Returns the path the color was resolved from, if it was a reference.
    pub fn resolved_path(&self) -> Option<&TokenPath> {
        match self {
            ShadowColor::Resolved { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// One layer of a (possibly multi-layer) drop shadow.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowLayer {
    pub x: f64,
    pub y: f64,
    pub blur: f64,
    pub color: ShadowColor,
}

impl ShadowLayer {
    fn from_json(fields: &Map<String, Json>) -> Option<Self> {
        let color = fields.get("color")?;
        let color = if let Some(value) = color.get("value").and_then(Json::as_str) {
            ShadowColor::Value(value.to_string())
        } else if let Some(target) = color.get("aliasOf").and_then(Json::as_str) {
            ShadowColor::Alias(target.to_string())
        } else {
            ShadowColor::Value(color.as_str()?.to_string())
        };
        Some(Self {
            x: fields.get("x")?.as_f64()?,
            y: fields.get("y")?.as_f64()?,
            blur: fields.get("blur")?.as_f64()?,
            color,
        })
    }

    fn to_json(&self) -> Json {
        let color = match &self.color {
            ShadowColor::Value(value) => json!({ "value": value }),
            ShadowColor::Alias(target) => json!({ "aliasOf": target }),
            ShadowColor::Resolved { value, path } => {
                json!({ "value": value, "resolvedAliasPath": path })
            }
        };
        json!({
            "x": number_to_json(self.x),
            "y": number_to_json(self.y),
            "blur": number_to_json(self.blur),
            "color": color,
        })
    }
}
