//! Output filters.
//!
//! A filter selects which properties an output file contains. Files without a
//! filter receive every property of the build.

use tokenloom_core::path::{GLOBAL_NAMESPACE, SET_NAMESPACE};

use crate::property::Property;

/// Decides whether a property belongs in an output file.
pub type Filter = fn(&Property) -> bool;

fn has_segment(property: &Property, segment: &str) -> bool {
    property.path.segments().iter().any(|s| s == segment)
}

/// Tokens in the `Set` namespace.
pub fn is_alias(property: &Property) -> bool {
    property.root() == SET_NAMESPACE
}

/// Tokens in the `Global` namespace.
pub fn is_global(property: &Property) -> bool {
    property.root() == GLOBAL_NAMESPACE
}

/// Control tokens: everything outside `Global` and `Set`.
pub fn is_control(property: &Property) -> bool {
    !is_global(property) && !is_alias(property)
}

pub fn is_color(property: &Property) -> bool {
    has_segment(property, "Color")
}

pub fn is_size(property: &Property) -> bool {
    ["Width", "Padding", "Radius"]
        .iter()
        .any(|segment| has_segment(property, segment))
}

pub fn is_font(property: &Property) -> bool {
    has_segment(property, "Font")
}

pub(crate) fn builtin() -> Vec<(&'static str, Filter)> {
    vec![
        ("isAlias", is_alias),
        ("isGlobal", is_global),
        ("isControl", is_control),
        ("isColor", is_color),
        ("isSize", is_size),
        ("isFont", is_font),
    ]
}
