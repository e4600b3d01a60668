//! WinUI transforms.
//!
//! Resources are named in PascalCase. Aliases are written as
//! `StaticResource` references, so the alias transform records the target's
//! resource name instead of rewriting the value.

use tokenloom_core::{
    color::Color,
    path::TokenPath,
    value::{TokenValue, format_number},
};

use super::{Transform, TransformResult, category_is, text, unsupported_value};
use crate::{
    config::AppConfig,
    naming::{camel_case, naming_segments, upper_first},
    property::{Attributes, Category, Property},
};

const CORNER_RADIUS: &str = "CornerRadius";

/// Generic CSS families that have no XAML counterpart.
const GENERIC_FONT_FAMILIES: [&str; 9] = [
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "emoji",
    "math",
    "fangsong",
];

/// Returns the XAML resource key for the token at `path`.
pub fn resource_name(path: &TokenPath, config: &AppConfig) -> String {
    upper_first(&camel_case(
        &naming_segments(path, config.naming().prefix()).join(" "),
    ))
}

fn pascal_name(property: &Property, config: &AppConfig) -> String {
    resource_name(&property.path, config)
}

fn alias_resource(property: &Property, config: &AppConfig) -> TransformResult<Attributes> {
    Ok(Attributes {
        alias_resource_name: property
            .resolved_alias_path
            .as_ref()
            .map(|target| resource_name(target, config)),
        ..Attributes::default()
    })
}

fn strip_quotes(family: &str, quote: char) -> &str {
    family
        .strip_prefix(quote)
        .and_then(|inner| inner.strip_suffix(quote))
        .unwrap_or(family)
}

/// Converts a CSS `font-family` list to one XAML's `FontFamily` accepts.
///
/// # Examples
///
/// ```
/// use tokenloom::transform::winui::font_family;
///
/// assert_eq!(
///     font_family(r#""Segoe UI", Roboto, 'Helvetica Neue', sans-serif"#),
///     "Segoe UI, Roboto, Helvetica Neue"
/// );
/// ```
pub fn font_family(families: &str) -> String {
    let mut families: Vec<&str> = families
        .split(',')
        .map(|family| strip_quotes(strip_quotes(family.trim(), '"'), '\''))
        .collect();
    if families
        .last()
        .is_some_and(|last| GENERIC_FONT_FAMILIES.contains(last))
    {
        families.pop();
    }
    families.join(", ")
}

fn font(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    property
        .value
        .as_str()
        .map(|families| text(font_family(families)))
        .ok_or_else(|| unsupported_value(property, "specify a CSS font-family list"))
}

/// Formats sizes for `Thickness`, `CornerRadius`, and `x:Double`.
///
/// Thickness lists start on the left, so CSS order is rotated. Corner radii
/// use the same order on both platforms. Large corner radii are clamped,
/// because WinUI rounds an over-sized radius into an oval where CSS draws a
/// pill.
fn size(property: &Property, config: &AppConfig) -> TransformResult<TokenValue> {
    let corner_radius = property.attributes.xaml_type.as_deref() == Some(CORNER_RADIUS);
    match &property.value {
        TokenValue::Number(number) => {
            let max = config.winui().max_corner_radius();
            let number = if corner_radius && *number > max { max } else { *number };
            Ok(text(format_number(number)))
        }
        TokenValue::Quad(quad) => {
            let [top, right, bottom, left] = quad.map(format_number);
            Ok(text(if corner_radius {
                format!("{top}, {right}, {bottom}, {left}")
            } else {
                format!("{left}, {top}, {right}, {bottom}")
            }))
        }
        TokenValue::String(size) if size.contains('/') => Err(unsupported_value(
            property,
            "size values with a slash are not supported",
        )),
        _ => Err(unsupported_value(
            property,
            "use a single number or an array [top, right, bottom, left]",
        )),
    }
}

fn color(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    let color = property
        .value
        .as_str()
        .ok_or_else(|| unsupported_value(property, "WinUI resources support solid colors only"))?;
    if color == "transparent" {
        return Ok(text("Transparent"));
    }
    Color::new(color)
        .map(|color| text(color.to_argb_hex_string()))
        .map_err(|err| unsupported_value(property, err.to_string()))
}

pub(crate) fn transforms() -> Vec<Transform> {
    vec![
        Transform::naming("fluentui/name/pascal", pascal_name),
        Transform::attribute("fluentui/alias/winui", alias_resource).with_matcher(Property::is_alias),
        Transform::value("fluentui/size/winui", size)
            .with_matcher(|property| category_is(property, Category::Size)),
        Transform::value("fluentui/font/winui", font)
            .with_matcher(|property| category_is(property, Category::Font)),
        Transform::value("fluentui/color/winui", color)
            .with_matcher(|property| category_is(property, Category::Color)),
    ]
}

pub(crate) fn groups() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![(
        "fluentui/winui",
        vec![
            "fluentui/attribute",
            "fluentui/name/pascal",
            "fluentui/alias/winui",
            "fluentui/size/winui",
            "fluentui/font/winui",
            "fluentui/color/winui",
        ],
    )]
}
