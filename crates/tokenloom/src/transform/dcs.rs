//! Transforms for the design component system's themed CSS.
//!
//! DCS names alias colors `color` + the joined path and trims words that its
//! own naming scheme leaves implicit.

use tokenloom_core::{
    path::{GLOBAL_NAMESPACE, TokenPath},
    value::TokenValue,
};

use super::{Transform, TransformResult, text};
use crate::{config::AppConfig, property::Property};

/// Words replaced in DCS names, applied once each, in order.
const SIMPLIFICATIONS: [(&str, &str); 5] = [
    ("NeutralNeutral", "Neutral"),
    ("NeutralBrand", "Brand"),
    ("NeutralCompound", "Compound"),
    ("Rest", ""),
    ("FillColor", ""),
];

/// Returns the DCS custom property name for an export path.
///
/// # Examples
///
/// ```
/// use tokenloom::transform::dcs::dcs_name;
/// use tokenloom_core::path::TokenPath;
///
/// let fill = TokenPath::parse("Neutral.Background1.Fill.Color.Rest").unwrap();
/// assert_eq!(dcs_name(&fill), "colorNeutralBackground1");
///
/// let size = TokenPath::parse("Global.Size.Small").unwrap();
/// assert_eq!(dcs_name(&size), "global-size-small");
/// ```
pub fn dcs_name(path: &TokenPath) -> String {
    let mut name = if path.first() != Some(GLOBAL_NAMESPACE) && path.get(3) == Some("Color") {
        format!("color{}", path.join(""))
    } else {
        path.join("-").to_lowercase()
    };
    for (from, to) in SIMPLIFICATIONS {
        name = name.replacen(from, to, 1);
    }
    name
}

fn kebab(property: &Property, _: &AppConfig) -> String {
    dcs_name(&property.export_path())
}

fn alias_var(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    match &property.resolved_alias_path {
        Some(target) => Ok(text(format!("var(--{})", dcs_name(target)))),
        None => Ok(property.value.clone()),
    }
}

pub(crate) fn transforms() -> Vec<Transform> {
    vec![
        Transform::naming("dcs/kebab", kebab),
        Transform::value("dcs/alias/css", alias_var).with_matcher(Property::is_alias),
    ]
}

pub(crate) fn groups() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![(
        "fluentui/dcs",
        vec![
            "fluentui/attribute",
            "dcs/kebab",
            "dcs/alias/css",
            "fluentui/size/css",
            "fluentui/color/css",
            "fluentui/strokealignment/css",
            "fluentui/shadow/css",
        ],
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_support::*;

    #[test]
    fn test_simplified_names() {
        let name = |dotted: &str| dcs_name(&TokenPath::parse(dotted).unwrap());
        assert_eq!(
            name("NeutralNeutral.Foreground.Fill.Color.Hover"),
            "colorNeutralForegroundHover"
        );
        assert_eq!(name("NeutralBrand.Stroke.Fill.Color.Rest"), "colorBrandStroke");
        assert_eq!(name("Button.Rest.Corner.Radius"), "button-rest-corner-radius");
    }

    #[test]
    fn test_alias_uses_target_name() {
        let accent = alias(
            "Set.NeutralBrand.Background.Fill.Color.Rest",
            "Global.Color.Brand.80",
            text("#0078d4"),
        );
        assert_eq!(kebab(&accent, &config()), "colorBrandBackground");
        assert_eq!(
            alias_var(&accent, &config()).unwrap(),
            text("var(--global-color-brand-80)")
        );
    }
}
