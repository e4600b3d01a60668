//! Transforms used by every platform.

use tokenloom_resolve::error::{Diagnostic, ErrorCode};

use super::{Transform, TransformResult};
use crate::{
    classify::classify,
    config::AppConfig,
    property::{Attributes, Property},
};

/// Classifies the property by its path.
///
/// Tokens whose type was preset by the importer keep their attributes when
/// the path says nothing.
fn attribute(property: &Property, _: &AppConfig) -> TransformResult<Attributes> {
    if let Some(attributes) = classify(&property.path, property.is_alias()) {
        return Ok(attributes);
    }
    if property.attributes.category.is_some() {
        return Ok(Attributes::default());
    }
    Err(Diagnostic::error(format!(
        "unable to determine data type based on token name \"{}\"",
        property.path
    ))
    .with_code(ErrorCode::E500)
    .with_help("name the token after its category, such as Fill.Color or Corner.Radius"))
}

/// Treats aliases as plain values of their concrete category, for formats
/// that write resolved values instead of references.
fn alias_flatten(property: &Property, _: &AppConfig) -> TransformResult<Attributes> {
    Ok(Attributes {
        category: property.attributes.alias_category,
        ..Attributes::default()
    })
}

fn dotted_path(property: &Property, _: &AppConfig) -> String {
    property.path.join(".")
}

pub(crate) fn transforms() -> Vec<Transform> {
    vec![
        Transform::attribute("fluentui/attribute", attribute),
        Transform::attribute("fluentui/alias/flatten", alias_flatten)
            .with_matcher(|property| property.attributes.alias_category.is_some()),
        Transform::naming("name/path", dotted_path),
    ]
}

pub(crate) fn groups() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![("fluentui/debug", vec!["name/path"])]
}
