//! Generated token sets.
//!
//! A `generate` directive replaces a node with a procedurally built set of
//! sibling color tokens derived from one seed color:
//!
//! ```json
//! "Orange": { "generate": { "type": "lightness0to100by2", "value": "#ff8c00" } }
//! ```
//!
//! Children already present on the node are kept, so a document can pin
//! individual steps of a ramp.
//!
//! Global colors can also be built with the older `buildRampFrom` shorthand,
//! which always writes the seven steps `20` to `140`:
//!
//! ```json
//! "Orange": { "buildRampFrom": "#ff8c00" }
//! ```

use std::{fmt, str::FromStr};

use log::{debug, trace};
use serde_json::Value as Json;
use tokenloom_core::{
    color::Color,
    path::{GLOBAL_NAMESPACE, TokenPath},
    tree::{Node, NodeKind},
    value::TokenValue,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ResolveError, Result},
    walker::{Visitor, Walk, walk},
};

/// The supported ramp generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    /// `0`, `2`, ..., `100`: the seed's hue and saturation at each lightness.
    Lightness0To100By2,
    /// `Primary`, `Shade10`..`Shade50` and `Tint10`..`Tint60`.
    FluentSharedColors,
    /// `5`, `10`, `20`, ..., `90`: the seed at each alpha percentage.
    Alpha5To90,
}

impl GenerationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationKind::Lightness0To100By2 => "lightness0to100by2",
            GenerationKind::FluentSharedColors => "fluentsharedcolors",
            GenerationKind::Alpha5To90 => "alpha5to90",
        }
    }

    /// Produces the generated children as `(key, color)` pairs in output order.
    pub fn generate(self, seed: Color) -> Vec<(String, String)> {
        match self {
            GenerationKind::Lightness0To100By2 => lightness_ramp(seed),
            GenerationKind::FluentSharedColors => shared_color_ramp(seed),
            GenerationKind::Alpha5To90 => alpha_ramp(seed),
        }
    }
}

impl FromStr for GenerationKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "lightness0to100by2" => Ok(GenerationKind::Lightness0To100By2),
            "fluentsharedcolors" => Ok(GenerationKind::FluentSharedColors),
            "alpha5to90" => Ok(GenerationKind::Alpha5To90),
            _ => Err(()),
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn lightness_ramp(seed: Color) -> Vec<(String, String)> {
    let (hue, saturation, _) = seed.to_hsl();
    (0..=100)
        .step_by(2)
        .map(|step| {
            let color = Color::from_hsl(hue, saturation, f64::from(step) / 100.0);
            (step.to_string(), color.to_hex_string())
        })
        .collect()
}

fn alpha_ramp(seed: Color) -> Vec<(String, String)> {
    std::iter::once(5)
        .chain((10..=90).step_by(10))
        .map(|percent: u8| {
            let color = seed.with_alpha(f32::from(percent) / 100.0);
            (percent.to_string(), color.to_hex())
        })
        .collect()
}

/// Blend factors for one luminance band of seed colors.
struct SharedColorTable {
    shades: [f64; 5],
    tints: [f64; 6],
}

const LIGHT_SEED: SharedColorTable = SharedColorTable {
    shades: [0.2, 0.3, 0.45, 0.65, 0.8],
    tints: [0.05, 0.1, 0.2, 0.35, 0.55, 0.75],
};

const MIDTONE_SEED: SharedColorTable = SharedColorTable {
    shades: [0.1, 0.24, 0.44, 0.7, 0.84],
    tints: [0.1, 0.2, 0.36, 0.66, 0.82, 0.955],
};

const DARK_SEED: SharedColorTable = SharedColorTable {
    shades: [0.05, 0.12, 0.25, 0.4, 0.55],
    tints: [0.15, 0.3, 0.45, 0.6, 0.75, 0.9],
};

fn shared_color_ramp(seed: Color) -> Vec<(String, String)> {
    let luminance = seed.luminance();
    let table = if luminance > 0.8 {
        &LIGHT_SEED
    } else if luminance < 0.2 {
        &DARK_SEED
    } else {
        &MIDTONE_SEED
    };
    let (hue, saturation, value) = seed.to_hsv();

    let mut ramp = vec![("Primary".to_string(), seed.to_hex_string())];
    for (index, factor) in table.shades.iter().enumerate() {
        // Toward black.
        let shade = Color::from_hsv(hue, saturation, value * (1.0 - factor));
        ramp.push((format!("Shade{}", (index + 1) * 10), shade.to_hex_string()));
    }
    for (index, factor) in table.tints.iter().enumerate() {
        // Toward white.
        let tint = Color::from_hsv(
            hue,
            saturation * (1.0 - factor),
            value + (1.0 - value) * factor,
        );
        ramp.push((format!("Tint{}", (index + 1) * 10), tint.to_hex_string()));
    }
    ramp
}

/// The key that marks a global color as a lighten/darken ramp seed.
pub const BUILD_RAMP_FROM: &str = "buildRampFrom";

/// Lightness offsets of the `buildRampFrom` steps, in percentage points.
const RAMP_STEPS: [(&str, i8); 7] = [
    ("20", 40),
    ("40", 30),
    ("60", 20),
    ("80", 10),
    ("100", 0),
    ("120", -10),
    ("140", -20),
];

/// Shifts the HSL lightness of `seed` by `offset` percentage points.
fn shift_lightness(seed: Color, offset: i8) -> Color {
    let (hue, saturation, lightness) = seed.to_hsl();
    let lightness = (lightness + f64::from(offset) / 100.0).clamp(0.0, 1.0);
    Color::from_hsl(hue, saturation, lightness)
}

/// Expands every `Global.Color` entry carrying `buildRampFrom` into the
/// steps `20` to `140`.
///
/// The seed sits at `100`. The ramp replaces any alias on the entry and any
/// existing step with the same key.
pub fn build_color_ramps(root: &mut Node, collector: &mut DiagnosticCollector) -> Result<()> {
    let colors_path = TokenPath::root().child(GLOBAL_NAMESPACE).child("Color");
    let Some(colors) = root.get_mut(&colors_path) else {
        return Ok(());
    };

    let mut built = 0usize;
    for (key, color) in colors.children_mut() {
        let Some(seed) = color.meta_mut().extra.shift_remove(BUILD_RAMP_FROM) else {
            continue;
        };
        let path = colors_path.child(key.as_str());

        let seed = match seed.as_str().map(Color::new) {
            Some(Ok(seed)) => seed,
            Some(Err(err)) => {
                color.set_error("Invalid ramp seed color");
                collector.emit(
                    Diagnostic::error(err.to_string())
                        .with_code(ErrorCode::E302)
                        .with_path(path),
                );
                continue;
            }
            None => {
                color.set_error("Invalid color ramp syntax");
                collector.emit(
                    Diagnostic::error(format!("invalid {BUILD_RAMP_FROM} {seed}"))
                        .with_code(ErrorCode::E300)
                        .with_path(path)
                        .with_help("buildRampFrom should be a color string, such as \"#ff8c00\""),
                );
                continue;
            }
        };

        color.set_kind(NodeKind::Group);
        for (step, offset) in RAMP_STEPS {
            let value = shift_lightness(seed, offset).to_hex_string();
            color.insert_child(step, Node::value(TokenValue::String(value)));
        }
        trace!(path:%; "Color ramp built");
        built += 1;
    }

    debug!(ramps = built; "Color ramps built");
    Ok(())
}

/// Expands every generation directive in the tree.
///
/// # Errors
///
/// Returns [`ResolveError::UnknownGenerationType`] for a directive whose `type`
/// names no known generator.
pub fn resolve_generated(root: &mut Node, collector: &mut DiagnosticCollector) -> Result<()> {
    let mut expander = GeneratedSetExpander { collector };
    let visited = walk(root, &TokenPath::root(), &mut expander)?;
    debug!(generated = visited; "Generated sets expanded");
    Ok(())
}

struct GeneratedSetExpander<'a> {
    collector: &'a mut DiagnosticCollector,
}

impl Visitor for GeneratedSetExpander<'_> {
    fn matches(&self, node: &Node) -> bool {
        matches!(node.kind(), NodeKind::Generated(_))
    }

    fn visit(&mut self, root: &mut Node, path: &TokenPath) -> Result<Walk> {
        let Some(node) = root.get_mut(path) else {
            return Ok(Walk::Skip);
        };
        let NodeKind::Generated(directive) = node.take_kind() else {
            return Err(ResolveError::Precondition {
                pass: "set generation",
                path: path.clone(),
                expected: "a generated token set",
            });
        };

        match parse_directive(&directive, path)? {
            Ok((kind, seed)) => {
                let ramp = kind.generate(seed);
                trace!(path:%, kind:%, steps = ramp.len(); "Generated set expanded");
                for (key, color) in ramp {
                    if node.child(&key).is_none() {
                        node.insert_child(key, Node::value(TokenValue::String(color)));
                    }
                }
            }
            Err((sentinel, diagnostic)) => {
                node.set_error(sentinel);
                self.collector.emit(diagnostic.with_path(path.clone()));
            }
        }
        Ok(Walk::Skip)
    }
}

type Directive = std::result::Result<(GenerationKind, Color), (&'static str, Diagnostic)>;

fn parse_directive(directive: &Json, path: &TokenPath) -> Result<Directive> {
    let kind = directive.get("type").and_then(Json::as_str);
    let (Some(kind), Some(seed)) = (kind, directive.get("value")) else {
        return Ok(Err((
            "Invalid token set generation syntax",
            Diagnostic::error(format!("invalid generate {directive}"))
                .with_code(ErrorCode::E300)
                .with_help(
                    "generate should be an object like { \"type\": \"lightness0to100by2\", \"value\": \"#ff8c00\" }",
                ),
        )));
    };

    let kind = GenerationKind::from_str(kind).map_err(|()| ResolveError::UnknownGenerationType {
        path: path.clone(),
        kind: kind.to_string(),
    })?;

    let Some(seed) = seed.as_str() else {
        return Ok(Err((
            "Generation seed must be a concrete value",
            Diagnostic::error(format!("generation seed {seed} is not a concrete color"))
                .with_code(ErrorCode::E301)
                .with_help("aliases and computed values cannot seed a generated set"),
        )));
    };

    match Color::new(seed) {
        Ok(color) => Ok(Ok((kind, color))),
        Err(err) => Ok(Err((
            "Invalid generation seed color",
            Diagnostic::error(err.to_string()).with_code(ErrorCode::E302),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use serde_json::json;

    use super::*;

    fn path(dotted: &str) -> TokenPath {
        TokenPath::parse(dotted).unwrap()
    }

    fn generated(kind: &str, seed: Json) -> Node {
        Node::new(NodeKind::Generated(json!({ "type": kind, "value": seed })))
    }

    fn expand(node: Node) -> (Node, DiagnosticCollector) {
        let mut root = Node::group();
        root.insert_path(&path("Global.Color.Ramp"), node);
        let mut collector = DiagnosticCollector::new();
        resolve_generated(&mut root, &mut collector).unwrap();
        let ramp = root.get(&path("Global.Color.Ramp")).unwrap().clone();
        (ramp, collector)
    }

    fn child_text<'a>(node: &'a Node, key: &str) -> &'a str {
        node.child(key)
            .and_then(Node::value_ref)
            .and_then(TokenValue::as_str)
            .unwrap()
    }

    #[test]
    fn test_lightness_ramp() {
        let (ramp, collector) = expand(generated("lightness0to100by2", json!("#ff8c00")));

        assert!(collector.is_empty());
        assert!(ramp.is_group());
        assert_eq!(ramp.children().len(), 51);
        for (key, child) in ramp.children() {
            assert_eq!(key.parse::<u32>().unwrap() % 2, 0);
            let text = child.value_ref().and_then(TokenValue::as_str).unwrap();
            assert!(text.starts_with('#') && text.len() == 7, "{key}: {text}");
        }
        assert_eq!(child_text(&ramp, "50"), "#ff8c00");
        assert_eq!(child_text(&ramp, "0"), "#000000");
        assert_eq!(child_text(&ramp, "100"), "#ffffff");
    }

    #[test]
    fn test_alpha_ramp() {
        let (ramp, _) = expand(generated("alpha5to90", json!("#000000")));

        let keys = ramp.child_keys();
        assert_eq!(
            keys,
            vec!["5", "10", "20", "30", "40", "50", "60", "70", "80", "90"]
        );
        assert_eq!(child_text(&ramp, "5"), "#0000000d");
        assert_eq!(child_text(&ramp, "50"), "#00000080");
    }

    #[test]
    fn test_shared_colors_are_monotonic() {
        let (ramp, _) = expand(generated("fluentsharedcolors", json!("#d13438")));

        assert_eq!(child_text(&ramp, "Primary"), "#d13438");
        let luminance = |key: &str| Color::new(child_text(&ramp, key)).unwrap().luminance();

        let mut previous = luminance("Primary");
        for shade in ["Shade10", "Shade20", "Shade30", "Shade40", "Shade50"] {
            let current = luminance(shade);
            assert!(current < previous, "{shade} is not darker");
            previous = current;
        }
        let mut previous = luminance("Primary");
        for tint in ["Tint10", "Tint20", "Tint30", "Tint40", "Tint50", "Tint60"] {
            let current = luminance(tint);
            assert!(current > previous, "{tint} is not lighter");
            previous = current;
        }
    }

    #[test]
    fn test_existing_children_are_kept() {
        let mut node = generated("lightness0to100by2", json!("#ff8c00"));
        node.insert_child("50", Node::value(TokenValue::String("#123456".into())));

        let (ramp, _) = expand(node);

        assert_eq!(child_text(&ramp, "50"), "#123456");
        assert_eq!(ramp.children().len(), 51);
    }

    #[test]
    fn test_invalid_directives() {
        let (ramp, collector) = expand(Node::new(NodeKind::Generated(json!("ramp"))));
        assert!(ramp.is_error());
        assert_eq!(collector.diagnostics()[0].code(), Some(ErrorCode::E300));

        let (ramp, collector) = expand(generated(
            "alpha5to90",
            json!({ "aliasOf": "Global.Color.Blue" }),
        ));
        assert!(ramp.is_error());
        assert_eq!(collector.diagnostics()[0].code(), Some(ErrorCode::E301));

        let (ramp, collector) = expand(generated("alpha5to90", json!("not-a-color")));
        assert!(ramp.is_error());
        assert_eq!(collector.diagnostics()[0].code(), Some(ErrorCode::E302));
    }

    fn ramp_tree(color: Node) -> Node {
        let mut root = Node::group();
        root.insert_path(&path("Global.Color.Orange"), color);
        root
    }

    fn ramp_seed(seed: Json) -> Node {
        let mut node = Node::group();
        node.meta_mut().extra.insert(BUILD_RAMP_FROM.into(), seed);
        node
    }

    #[test]
    fn test_build_ramp_from() {
        let mut root = ramp_tree(ramp_seed(json!("#ff8c00")));
        let mut collector = DiagnosticCollector::new();

        build_color_ramps(&mut root, &mut collector).unwrap();

        let ramp = root.get(&path("Global.Color.Orange")).unwrap();
        assert!(collector.is_empty());
        assert!(ramp.is_group());
        assert_eq!(
            ramp.child_keys(),
            vec!["20", "40", "60", "80", "100", "120", "140"]
        );
        assert_eq!(child_text(ramp, "100"), "#ff8c00");
        assert!(!ramp.meta().extra.contains_key(BUILD_RAMP_FROM));

        let lightness = |key: &str| Color::new(child_text(ramp, key)).unwrap().to_hsl().2;
        let seed = lightness("100");
        assert!(approx_eq!(f64, lightness("20"), (seed + 0.4).min(1.0), epsilon = 0.01));
        assert!(approx_eq!(f64, lightness("120"), seed - 0.1, epsilon = 0.01));
        assert!(approx_eq!(f64, lightness("140"), seed - 0.2, epsilon = 0.01));
    }

    #[test]
    fn test_build_ramp_replaces_alias_and_steps() {
        let mut seed = ramp_seed(json!("#808080"));
        seed.set_kind(NodeKind::Alias(json!("Global.Color.Gray")));
        seed.insert_child("100", Node::value(TokenValue::String("#123456".into())));
        let mut root = ramp_tree(seed);
        let mut collector = DiagnosticCollector::new();

        build_color_ramps(&mut root, &mut collector).unwrap();

        let ramp = root.get(&path("Global.Color.Orange")).unwrap();
        assert!(!ramp.is_alias());
        assert_eq!(child_text(ramp, "100"), "#808080");
        assert_eq!(child_text(ramp, "20"), "#e6e6e6");
    }

    #[test]
    fn test_build_ramp_only_under_global_color() {
        let mut root = Node::group();
        root.insert_path(&path("Set.Orange"), ramp_seed(json!("#ff8c00")));
        let mut collector = DiagnosticCollector::new();

        build_color_ramps(&mut root, &mut collector).unwrap();

        let node = root.get(&path("Set.Orange")).unwrap();
        assert!(node.children().is_empty());
        assert!(node.meta().extra.contains_key(BUILD_RAMP_FROM));
    }

    #[test]
    fn test_invalid_ramp_seeds() {
        let mut root = ramp_tree(ramp_seed(json!("orangeish")));
        let mut collector = DiagnosticCollector::new();
        build_color_ramps(&mut root, &mut collector).unwrap();
        assert!(root.get(&path("Global.Color.Orange")).unwrap().is_error());
        assert_eq!(collector.diagnostics()[0].code(), Some(ErrorCode::E302));

        let mut root = ramp_tree(ramp_seed(json!(42)));
        let mut collector = DiagnosticCollector::new();
        build_color_ramps(&mut root, &mut collector).unwrap();
        assert!(root.get(&path("Global.Color.Orange")).unwrap().is_error());
        assert_eq!(collector.diagnostics()[0].code(), Some(ErrorCode::E300));
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let mut root = Node::group();
        root.insert_path(&path("Global.Color.Ramp"), generated("rainbow", json!("#ff0000")));
        let mut collector = DiagnosticCollector::new();

        let err = resolve_generated(&mut root, &mut collector).unwrap_err();

        assert!(matches!(
            err,
            ResolveError::UnknownGenerationType { ref kind, .. } if kind == "rainbow"
        ));
    }
}
