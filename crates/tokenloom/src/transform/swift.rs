//! Swift transforms for UIKit.

use tokenloom_core::{color::Color, path::TokenPath, value::TokenValue};

use super::{Transform, TransformResult, category_is, text, unsupported_value};
use crate::{
    config::AppConfig,
    naming::{camel_case, naming_segments},
    property::{Category, Property},
};

/// Returns the Swift identifier for the token at `path`.
pub fn swift_name(path: &TokenPath, config: &AppConfig) -> String {
    camel_case(&naming_segments(path, config.naming().prefix()).join(" "))
}

/// Formats a number as a `CGFloat` literal.
fn cg_float(number: f64) -> String {
    format!("{number:.1}")
}

fn camel_name(property: &Property, config: &AppConfig) -> String {
    swift_name(&property.path, config)
}

fn alias_reference(property: &Property, config: &AppConfig) -> TransformResult<TokenValue> {
    match &property.resolved_alias_path {
        Some(target) => Ok(text(swift_name(target, config))),
        None => Ok(property.value.clone()),
    }
}

/// Formats sizes as `CGFloat`s, and four-sided sizes as `UIEdgeInsets`.
fn size(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    match &property.value {
        TokenValue::Number(number) => Ok(text(cg_float(*number))),
        TokenValue::Quad(quad) => {
            let [top, right, bottom, left] = quad.map(cg_float);
            Ok(text(format!(
                "UIEdgeInsets(top: {top}, left: {left}, bottom: {bottom}, right: {right})"
            )))
        }
        _ => Err(unsupported_value(
            property,
            "use a single number or an array [top, right, bottom, left]",
        )),
    }
}

fn font_literal(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    let family = property
        .value
        .as_str()
        .ok_or_else(|| unsupported_value(property, "specify a font family name"))?;
    Ok(text(format!("\"{}\"", family.replace('"', "\\\""))))
}

fn ui_color(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    let color = property
        .value
        .as_str()
        .ok_or_else(|| unsupported_value(property, "UIColor constants support solid colors only"))?;
    let [r, g, b, a] = Color::new(color)
        .map_err(|err| unsupported_value(property, err.to_string()))?
        .rgba8()
        .map(|channel| f64::from(channel) / 255.0);
    let alpha = (a * 1000.0).round() / 1000.0;
    Ok(text(format!(
        "UIColor(red: {r:.3}, green: {g:.3}, blue: {b:.3}, alpha: {alpha})"
    )))
}

pub(crate) fn transforms() -> Vec<Transform> {
    vec![
        Transform::naming("fluentui/name/swift", camel_name),
        Transform::value("fluentui/alias/swift", alias_reference).with_matcher(Property::is_alias),
        Transform::value("fluentui/size/swift", size)
            .with_matcher(|property| category_is(property, Category::Size)),
        Transform::value("fluentui/font/swift", font_literal)
            .with_matcher(|property| category_is(property, Category::Font)),
        Transform::value("fluentui/color/swift", ui_color)
            .with_matcher(|property| category_is(property, Category::Color)),
    ]
}

pub(crate) fn groups() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![(
        "fluentui/swift",
        vec![
            "fluentui/attribute",
            "fluentui/name/swift",
            "fluentui/alias/swift",
            "fluentui/size/swift",
            "fluentui/font/swift",
            "fluentui/color/swift",
        ],
    )]
}
