//! Transforms for W3C design-tokens files.
//!
//! System colors have no W3C notation, so they are written as their hex
//! stand-ins. Gradients lose their direction: the format only records stops.

use serde_json::{Value as Json, json};

use tokenloom_core::value::{ShadowLayer, TokenValue, format_number};

use super::{
    Transform, TransformResult, category_is,
    css::fallback_color,
    text, unsupported_value,
};
use crate::{
    config::AppConfig,
    property::{Category, Property},
};

fn dotted_export_name(property: &Property, _: &AppConfig) -> String {
    property.export_path().join(".")
}

fn color(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    let to_hex = |color: &str| {
        fallback_color(color).map_err(|err| unsupported_value(property, err.to_string()))
    };
    match &property.value {
        TokenValue::String(color) => to_hex(color).map(text),
        TokenValue::Gradient(gradient) => {
            let stops = gradient
                .stops
                .iter()
                .map(|stop| Ok(json!({ "color": to_hex(&stop.value)?, "position": stop.position })))
                .collect::<TransformResult<Vec<_>>>()?;
            Ok(TokenValue::Other(Json::Array(stops)))
        }
        _ => Err(unsupported_value(
            property,
            "specify a valid CSS color or a gradient definition",
        )),
    }
}

fn letter_spacing(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    Ok(text(format!("{}rem", property.value.to_display_string())))
}

/// Converts shadows to W3C shadow objects. Colors taken from another token
/// are written as `[path]` references.
fn shadow(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    let TokenValue::Shadows(layers) = &property.value else {
        return Err(unsupported_value(property, "specify an array of shadow layers"));
    };
    let layers = layers
        .iter()
        .map(|layer| shadow_layer(property, layer))
        .collect::<TransformResult<Vec<_>>>()?;
    Ok(TokenValue::Other(Json::Array(layers)))
}

fn shadow_layer(property: &Property, layer: &ShadowLayer) -> TransformResult<Json> {
    let color = match (layer.color.resolved_path(), layer.color.value()) {
        (Some(path), _) => format!("[{}]", path.join(".")),
        (None, Some(value)) => {
            fallback_color(value).map_err(|err| unsupported_value(property, err.to_string()))?
        }
        (None, None) => {
            return Err(unsupported_value(
                property,
                "shadow color reference was not resolved",
            ));
        }
    };
    let px = |number: f64| format!("{}px", format_number(number));
    Ok(json!({
        "color": color,
        "offsetX": px(layer.x),
        "offsetY": px(layer.y),
        "blur": px(layer.blur),
        "spread": "0px",
    }))
}

pub(crate) fn transforms() -> Vec<Transform> {
    vec![
        Transform::naming("fluentui/name/w3c", dotted_export_name),
        Transform::value("fluentui/color/w3c", color)
            .with_matcher(|property| category_is(property, Category::Color)),
        Transform::value("fluentui/letterspacing/w3c", letter_spacing)
            .with_matcher(|property| category_is(property, Category::LetterSpacing)),
        Transform::value("fluentui/shadow/w3c", shadow)
            .with_matcher(|property| category_is(property, Category::Shadow)),
    ]
}

pub(crate) fn groups() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![(
        "fluentui/w3c",
        vec![
            "fluentui/attribute",
            "fluentui/name/w3c",
            "fluentui/size/css",
            "fluentui/color/w3c",
            "fluentui/strokealignment/css",
            "fluentui/letterspacing/w3c",
            "fluentui/shadow/w3c",
        ],
    )]
}
