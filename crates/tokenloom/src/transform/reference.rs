//! Transforms for the HTML reference page.

use super::{Transform, TransformResult};
use crate::{
    config::AppConfig,
    property::{Attributes, Property},
};

fn dashed_name(property: &Property, _: &AppConfig) -> String {
    property.export_path().join("-")
}

fn alias_name(property: &Property, _: &AppConfig) -> TransformResult<Attributes> {
    Ok(Attributes {
        alias_resource_name: property
            .resolved_alias_path
            .as_ref()
            .map(|target| target.join("-")),
        ..Attributes::default()
    })
}

pub(crate) fn transforms() -> Vec<Transform> {
    vec![
        Transform::naming("fluentui/name/reference", dashed_name),
        Transform::attribute("fluentui/alias/reference", alias_name)
            .with_matcher(Property::is_alias),
    ]
}

pub(crate) fn groups() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![(
        "fluentui/reference",
        vec![
            "fluentui/attribute",
            "fluentui/name/reference",
            "fluentui/alias/reference",
            "fluentui/alias/flatten",
            "fluentui/color/css",
            "fluentui/shadow/css",
        ],
    )]
}
