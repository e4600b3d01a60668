//! CSS and SCSS transforms.
//!
//! Names are lowercase kebab-case custom property names. Aliases become
//! `var(--name)` (or `$name` for SCSS) so that the output keeps the
//! relationships between tokens.

use std::f64::consts::PI;

use tokenloom_core::{
    color::{Color, ColorError},
    path::TokenPath,
    value::{Gradient, ShadowLayer, StopsUnits, TokenValue, format_number},
};

use super::{Transform, TransformResult, category_is, text, unsupported_value};
use crate::{config::AppConfig, property::Category, property::Property};

/// Forced colors that CSS understands natively, keyed by lowercase name.
const SYSTEM_COLORS: [(&str, &str); 9] = [
    ("transparent", "transparent"),
    ("canvas", "Canvas"),
    ("canvastext", "CanvasText"),
    ("linktext", "LinkText"),
    ("graytext", "GrayText"),
    ("highlight", "Highlight"),
    ("highlighttext", "HighlightText"),
    ("buttonface", "ButtonFace"),
    ("buttontext", "ButtonText"),
];

/// Hex stand-ins for [`SYSTEM_COLORS`], for formats without system colors.
const SYSTEM_COLOR_FALLBACKS: [(&str, &str); 9] = [
    ("transparent", "#00000000"),
    ("canvas", "#202020"),
    ("canvastext", "#ffffff"),
    ("linktext", "#75e9fc"),
    ("graytext", "#a6a6a6"),
    ("highlight", "#8ee3f0"),
    ("highlighttext", "#263b50"),
    ("buttonface", "#202020"),
    ("buttontext", "#ffffff"),
];

fn lookup(table: &[(&str, &'static str)], color: &str) -> Option<&'static str> {
    let lower = color.to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, value)| *value)
}

/// Formats a color for CSS: a system color name, `#rrggbb`, or `#rrggbbaa`
/// when translucent.
///
/// # Examples
///
/// ```
/// use tokenloom::transform::css::css_color;
///
/// assert_eq!(css_color("ButtonFace").unwrap(), "ButtonFace");
/// assert_eq!(css_color("rgba(255, 0, 0, 0.5)").unwrap(), "#ff000080");
/// assert_eq!(css_color("#F00").unwrap(), "#ff0000");
/// ```
pub fn css_color(color: &str) -> Result<String, ColorError> {
    match lookup(&SYSTEM_COLORS, color) {
        Some(system) => Ok(system.to_string()),
        None => Ok(Color::new(color)?.to_hex()),
    }
}

/// Formats a color as hex, replacing system colors with fixed stand-ins.
pub fn fallback_color(color: &str) -> Result<String, ColorError> {
    match lookup(&SYSTEM_COLOR_FALLBACKS, color) {
        Some(fallback) => Ok(fallback.to_string()),
        None => Ok(Color::new(color)?.to_hex()),
    }
}

/// Returns the custom property name for `path`.
pub fn css_name(path: &TokenPath) -> String {
    path.join("-").to_lowercase()
}

/// Converts the angle of a gradient's start, clockwise from the top, into
/// the `linear-gradient()` direction, which names the end.
fn css_angle(degrees: f64) -> String {
    match degrees {
        0.0 => "to bottom".to_string(),
        90.0 => "to left".to_string(),
        180.0 => "to top".to_string(),
        270.0 => "to right".to_string(),
        d if d > 180.0 => format!("{}deg", format_number(d)),
        d => format!("{}deg", format_number(d + 180.0)),
    }
}

/// Renders a gradient as a CSS `linear-gradient()`.
///
/// Two-stop gradients running from `0` to `1` omit their stop positions.
pub fn linear_gradient(gradient: &Gradient) -> Result<String, ColorError> {
    let [x1, y1] = gradient.start;
    let [x2, y2] = gradient.end;
    let pixels = gradient.stops_units == StopsUnits::Pixels;
    let regular_two_stop = !pixels
        && matches!(gradient.stops.as_slice(), [first, last] if first.position == 0.0 && last.position == 1.0);

    let stops = gradient
        .stops
        .iter()
        .map(|stop| {
            let color = css_color(&stop.value)?;
            Ok(if regular_two_stop {
                color
            } else if pixels {
                format!("{color} {}px", format_number(stop.position))
            } else {
                format!("{color} {}%", format_number(stop.position * 100.0))
            })
        })
        .collect::<Result<Vec<_>, ColorError>>()?;

    let degrees = (y2 - y1).atan2(x1 - x2) * 180.0 / PI;
    Ok(format!(
        "linear-gradient({}, {})",
        css_angle(90.0 - degrees),
        stops.join(", ")
    ))
}

/// Renders shadow layers as a CSS `box-shadow` value, with colors formatted
/// by `color`.
pub(crate) fn box_shadow(
    property: &Property,
    color: fn(&str) -> Result<String, ColorError>,
) -> TransformResult<TokenValue> {
    let TokenValue::Shadows(layers) = &property.value else {
        return Err(unsupported_value(property, "specify an array of shadow layers"));
    };
    let layers = layers
        .iter()
        .map(|layer| shadow_layer(property, layer, color))
        .collect::<TransformResult<Vec<_>>>()?;
    Ok(text(layers.join(", ")))
}

fn shadow_layer(
    property: &Property,
    layer: &ShadowLayer,
    color: fn(&str) -> Result<String, ColorError>,
) -> TransformResult<String> {
    let value = layer
        .color
        .value()
        .ok_or_else(|| unsupported_value(property, "shadow color reference was not resolved"))?;
    let color = color(value).map_err(|err| unsupported_value(property, err.to_string()))?;
    Ok(format!(
        "{}px {}px {}px {color}",
        format_number(layer.x),
        format_number(layer.y),
        format_number(layer.blur)
    ))
}

fn kebab_name(property: &Property, _: &AppConfig) -> String {
    css_name(&property.export_path())
}

fn alias_var(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    match &property.resolved_alias_path {
        Some(target) => Ok(text(format!("var(--{})", css_name(target)))),
        None => Ok(property.value.clone()),
    }
}

fn alias_scss(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    match &property.resolved_alias_path {
        Some(target) => Ok(text(format!("${}", css_name(target)))),
        None => Ok(property.value.clone()),
    }
}

pub(crate) fn size(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    match &property.value {
        TokenValue::Number(number) => Ok(text(format!("{}px", format_number(*number)))),
        TokenValue::Quad(quad) => Ok(text(
            quad.iter()
                .map(|side| format!("{}px", format_number(*side)))
                .collect::<Vec<_>>()
                .join(" "),
        )),
        _ => Err(unsupported_value(
            property,
            "use a single number or an array [top, right, bottom, left]",
        )),
    }
}

pub(crate) fn color(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    let rendered = match &property.value {
        TokenValue::String(color) => css_color(color),
        TokenValue::Gradient(gradient) => linear_gradient(gradient),
        _ => {
            return Err(unsupported_value(
                property,
                "specify a valid CSS color or a gradient definition",
            ));
        }
    };
    rendered
        .map(text)
        .map_err(|err| unsupported_value(property, err.to_string()))
}

pub(crate) fn stroke_alignment(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    let clip = property
        .value
        .as_str()
        .and_then(|alignment| match alignment.to_lowercase().as_str() {
            "inner" => Some("border-box"),
            "outer" => Some("padding-box"),
            _ => None,
        })
        .ok_or_else(|| unsupported_value(property, r#"specify "inner" or "outer""#))?;
    Ok(text(clip))
}

fn letter_spacing(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    Ok(text(format!("{}em", property.value.to_display_string())))
}

pub(crate) fn shadow(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
    box_shadow(property, css_color)
}

pub(crate) fn transforms() -> Vec<Transform> {
    vec![
        Transform::naming("fluentui/name/kebab", kebab_name),
        Transform::value("fluentui/alias/css", alias_var).with_matcher(Property::is_alias),
        Transform::value("fluentui/alias/scss", alias_scss).with_matcher(Property::is_alias),
        Transform::value("fluentui/size/css", size)
            .with_matcher(|property| category_is(property, Category::Size)),
        Transform::value("fluentui/color/css", color)
            .with_matcher(|property| category_is(property, Category::Color)),
        Transform::value("fluentui/strokealignment/css", stroke_alignment)
            .with_matcher(|property| category_is(property, Category::StrokeAlignment)),
        Transform::value("fluentui/letterspacing/css", letter_spacing)
            .with_matcher(|property| category_is(property, Category::LetterSpacing)),
        Transform::value("fluentui/shadow/css", shadow)
            .with_matcher(|property| category_is(property, Category::Shadow)),
    ]
}

const CSS_VALUES: [&str; 5] = [
    "fluentui/size/css",
    "fluentui/color/css",
    "fluentui/strokealignment/css",
    "fluentui/letterspacing/css",
    "fluentui/shadow/css",
];

pub(crate) fn groups() -> Vec<(&'static str, Vec<&'static str>)> {
    let group = |head: &[&'static str], tail: &[&'static str]| {
        head.iter()
            .chain(CSS_VALUES.iter())
            .chain(tail.iter())
            .copied()
            .collect::<Vec<_>>()
    };
    vec![
        (
            "fluentui/css",
            group(
                &["fluentui/attribute", "fluentui/name/kebab"],
                &["fluentui/alias/css"],
            ),
        ),
        (
            "fluentui/scss",
            group(
                &["fluentui/attribute", "fluentui/name/kebab"],
                &["fluentui/alias/scss"],
            ),
        ),
        (
            "fluentui/cssflat",
            group(
                &[
                    "fluentui/attribute",
                    "fluentui/name/kebab",
                    "fluentui/alias/flatten",
                ],
                &[],
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use tokenloom_core::value::{GradientStop, ShadowColor};

    use super::*;
    use crate::transform::test_support::*;

    fn gradient(start: [f64; 2], end: [f64; 2], positions: &[f64], units: StopsUnits) -> Gradient {
        Gradient {
            start,
            end,
            stops: positions
                .iter()
                .map(|&position| GradientStop {
                    position,
                    value: "#ffffff".into(),
                })
                .collect(),
            stops_units: units,
        }
    }

    #[test]
    fn test_size_values() {
        let number = property("Global.Size.Small", TokenValue::Number(4.0), Some(Category::Size));
        assert_eq!(size(&number, &config()).unwrap(), text("4px"));

        let quad = property(
            "Button.Rest.Padding",
            TokenValue::Quad([1.0, 2.0, 3.0, 4.5]),
            Some(Category::Size),
        );
        assert_eq!(size(&quad, &config()).unwrap(), text("1px 2px 3px 4.5px"));

        let word = property("Global.Size.Auto", text("auto"), Some(Category::Size));
        assert!(size(&word, &config()).is_err());
    }

    #[test]
    fn test_colors() {
        assert_eq!(css_color("transparent").unwrap(), "transparent");
        assert_eq!(css_color("highlighttext").unwrap(), "HighlightText");
        assert_eq!(fallback_color("HighlightText").unwrap(), "#263b50");
        assert_eq!(fallback_color("red").unwrap(), "#ff0000");
        assert!(css_color("nope").is_err());
    }

    #[test]
    fn test_gradient_directions() {
        let down = gradient([0.5, 0.0], [0.5, 1.0], &[0.0, 1.0], StopsUnits::Relative);
        assert_eq!(
            linear_gradient(&down).unwrap(),
            "linear-gradient(to bottom, #ffffff, #ffffff)"
        );

        let right = gradient([0.0, 0.5], [1.0, 0.5], &[0.0, 0.5, 1.0], StopsUnits::Relative);
        assert_eq!(
            linear_gradient(&right).unwrap(),
            "linear-gradient(90deg, #ffffff 0%, #ffffff 50%, #ffffff 100%)"
        );

        let pixels = gradient([0.5, 1.0], [0.5, 0.0], &[0.0, 1.0], StopsUnits::Pixels);
        assert_eq!(
            linear_gradient(&pixels).unwrap(),
            "linear-gradient(to top, #ffffff 0px, #ffffff 1px)"
        );
    }

    #[test]
    fn test_css_angle_words() {
        assert_eq!(css_angle(90.0), "to left");
        assert_eq!(css_angle(225.0), "225deg");
        assert_eq!(css_angle(45.0), "225deg");
    }

    #[test]
    fn test_stroke_alignment() {
        let inner = property("Global.Stroke.Alignment.In", text("Inner"), None);
        assert_eq!(stroke_alignment(&inner, &config()).unwrap(), text("border-box"));

        let center = property("Global.Stroke.Alignment.Center", text("center"), None);
        assert!(stroke_alignment(&center, &config()).is_err());
    }

    #[test]
    fn test_shadow_layers() {
        let layer = |y: f64, color: &str| ShadowLayer {
            x: 0.0,
            y,
            blur: y * 2.0,
            color: ShadowColor::Value(color.into()),
        };
        let shadow_property = property(
            "Global.Shadow.Elevation",
            TokenValue::Shadows(vec![layer(1.0, "#00000024"), layer(2.0, "black")]),
            Some(Category::Shadow),
        );
        assert_eq!(
            shadow(&shadow_property, &config()).unwrap(),
            text("0px 1px 2px #00000024, 0px 2px 4px #000000")
        );
    }

    #[test]
    fn test_alias_references() {
        let accent = alias("Set.Accent.Fill.Color.Rest", "Global.Color.Blue", text("#0078d4"));
        assert_eq!(
            alias_var(&accent, &config()).unwrap(),
            text("var(--global-color-blue)")
        );
        assert_eq!(alias_scss(&accent, &config()).unwrap(), text("$global-color-blue"));
        assert_eq!(kebab_name(&accent, &config()), "accent-fill-color-rest");
    }
}
