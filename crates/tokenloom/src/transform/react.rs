//! Transforms for React ES modules.
//!
//! Aliases point at the CSS variables of the React theme, whose global
//! colors live under `global-palette` rather than `global-color`.

use tokenloom_core::{path::TokenPath, value::TokenValue};

use super::{Transform, TransformResult, text};
use crate::{config::AppConfig, naming::camel_case, property::Property};

/// Returns the React theme variable for an alias target.
///
/// # Examples
///
/// ```
/// use tokenloom::transform::react::palette_variable;
/// use tokenloom_core::path::TokenPath;
///
/// let shade = TokenPath::parse("Global.Color.Brand.Shade.60").unwrap();
/// assert_eq!(palette_variable(&shade), "var(--global-palette-brand-shade60)");
///
/// let grey = TokenPath::parse("Global.Color.Grey.94").unwrap();
/// assert_eq!(palette_variable(&grey), "var(--global-palette-grey-94)");
/// ```
pub fn palette_variable(target: &TokenPath) -> String {
    let segments: Vec<String> = target.segments().iter().map(|s| camel_case(s)).collect();
    let words: Vec<&str> = segments.iter().map(String::as_str).collect();
    match words.as_slice() {
        ["global", "color", "brand", shade, step] => {
            format!("var(--global-palette-brand-{shade}{step})")
        }
        ["global", "color", family, step] => format!("var(--global-palette-{family}-{step})"),
        _ => format!("var(--{})", words.join("-")),
    }
}

fn camel_name(property: &Property, _: &AppConfig) -> String {
    camel_case(&property.export_path().join(" "))
}

fn alias_var(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    match &property.resolved_alias_path {
        Some(target) => Ok(text(palette_variable(target))),
        None => Ok(property.value.clone()),
    }
}

pub(crate) fn transforms() -> Vec<Transform> {
    vec![
        Transform::naming("fluentui/name/react", camel_name),
        Transform::value("fluentui/react/alias", alias_var).with_matcher(Property::is_alias),
    ]
}

pub(crate) fn groups() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![(
        "fluentui/react",
        vec![
            "fluentui/attribute",
            "fluentui/name/react",
            "fluentui/size/css",
            "fluentui/color/css",
            "fluentui/shadow/css",
            "fluentui/react/alias",
        ],
    )]
}
