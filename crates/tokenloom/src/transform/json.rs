//! Transforms for grouped JSON, used on the web and by React Native.

use serde_json::{Value as Json, json};

use tokenloom_core::value::TokenValue;

use super::{Transform, TransformResult, category_is, css::css_color, text, unsupported_value};
use crate::{
    config::AppConfig,
    property::{Category, Property},
};

/// The grouped JSON format derives its own keys; this name only orders
/// output.
fn grouped_name(property: &Property, _: &AppConfig) -> String {
    property.export_path().join("")
}

fn font_weight_string(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    Ok(text(property.value.to_display_string()))
}

/// Converts shadows to an array of style objects with hex colors.
fn shadow_objects(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    let TokenValue::Shadows(layers) = &property.value else {
        return Err(unsupported_value(property, "specify an array of shadow layers"));
    };
    let layers = layers
        .iter()
        .map(|layer| {
            let color = layer
                .color
                .value()
                .ok_or_else(|| unsupported_value(property, "shadow color reference was not resolved"))
                .and_then(|color| {
                    css_color(color).map_err(|err| unsupported_value(property, err.to_string()))
                })?;
            Ok(json!({
                "x": layer.x,
                "y": layer.y,
                "blur": layer.blur,
                "color": color,
            }))
        })
        .collect::<TransformResult<Vec<_>>>()?;
    Ok(TokenValue::Other(Json::Array(layers)))
}

pub(crate) fn transforms() -> Vec<Transform> {
    vec![
        Transform::naming("fluentui/name/json/grouped", grouped_name),
        Transform::value("fluentui/font-weight/string", font_weight_string)
            .with_matcher(|property| category_is(property, Category::FontWeight)),
        Transform::value("fluentui/shadow/json", shadow_objects)
            .with_matcher(|property| category_is(property, Category::Shadow)),
    ]
}

pub(crate) fn groups() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        (
            "fluentui/json/grouped",
            vec![
                "fluentui/attribute",
                "fluentui/name/json/grouped",
                "fluentui/alias/flatten",
                "fluentui/color/css",
            ],
        ),
        (
            "fluentui/reactnative",
            vec![
                "fluentui/attribute",
                "fluentui/name/json/grouped",
                "fluentui/alias/flatten",
                "fluentui/color/css",
                "fluentui/font-weight/string",
                "fluentui/shadow/json",
            ],
        ),
    ]
}
