//! Transforms for the Figma Tokens plugin.
//!
//! Figma stores dimensions as plain numbers, so four-sided sizes cannot be
//! exported and are reported as errors.

use serde_json::{Value as Json, json};

use tokenloom_core::value::{TokenValue, format_number};

use super::{
    Transform, TransformResult, category_is, css::css_color, text, unexportable_value,
    unsupported_value,
};
use crate::{
    config::AppConfig,
    property::{Category, Property},
};

fn dotted_export_name(property: &Property, _: &AppConfig) -> String {
    property.export_path().join(".")
}

fn size(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    property
        .value
        .as_number()
        .map(|number| text(format_number(number)))
        .ok_or_else(|| unexportable_value(property, "Figma only allows single values for dimensions"))
}

/// Keeps the first family of a CSS `font-family` list.
fn font(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    let families = property
        .value
        .as_str()
        .ok_or_else(|| unsupported_value(property, "specify a CSS font-family list"))?;
    let first = match families.strip_prefix('"') {
        Some(quoted) => quoted
            .split_once('"')
            .map(|(family, _)| family)
            .ok_or_else(|| unexportable_value(property, "close the quoted font family name"))?,
        None => match families.find(',') {
            Some(comma) if comma > 0 => &families[..comma],
            _ => families,
        },
    };
    Ok(text(first))
}

fn letter_spacing(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    property
        .value
        .as_number()
        .map(|number| text(format!("{}%", format_number(number * 100.0))))
        .ok_or_else(|| unsupported_value(property, "specify letter spacing in ems"))
}

/// Converts shadows to drop-shadow objects. A single layer is written
/// without the surrounding array.
fn shadow(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    let TokenValue::Shadows(layers) = &property.value else {
        return Err(unsupported_value(property, "specify an array of shadow layers"));
    };
    let mut layers = layers
        .iter()
        .map(|layer| {
            let color = layer
                .color
                .value()
                .ok_or_else(|| unsupported_value(property, "shadow color reference was not resolved"))?;
            let color =
                css_color(color).map_err(|err| unsupported_value(property, err.to_string()))?;
            Ok(json!({
                "color": color,
                "x": format_number(layer.x),
                "y": format_number(layer.y),
                "blur": format_number(layer.blur),
                "spread": "0",
                "type": "dropShadow",
            }))
        })
        .collect::<TransformResult<Vec<_>>>()?;
    let value = if layers.len() == 1 {
        layers.remove(0)
    } else {
        Json::Array(layers)
    };
    Ok(TokenValue::Other(value))
}

pub(crate) fn transforms() -> Vec<Transform> {
    vec![
        Transform::naming("fluentui/name/figmatokens", dotted_export_name),
        Transform::value("fluentui/size/figmatokens", size).with_matcher(|property| {
            category_is(property, Category::Size) || category_is(property, Category::FontWeight)
        }),
        Transform::value("fluentui/font/figmatokens", font)
            .with_matcher(|property| category_is(property, Category::Font)),
        Transform::value("fluentui/letterspacing/figmatokens", letter_spacing)
            .with_matcher(|property| category_is(property, Category::LetterSpacing)),
        Transform::value("fluentui/shadow/figmatokens", shadow)
            .with_matcher(|property| category_is(property, Category::Shadow)),
    ]
}

pub(crate) fn groups() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![(
        "fluentui/figmatokens",
        vec![
            "fluentui/attribute",
            "fluentui/name/figmatokens",
            "fluentui/size/figmatokens",
            "fluentui/color/css",
            "fluentui/font/figmatokens",
            "fluentui/strokealignment/css",
            "fluentui/letterspacing/figmatokens",
            "fluentui/shadow/figmatokens",
        ],
    )]
}
