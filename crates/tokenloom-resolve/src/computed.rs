//! Computed-value resolution.
//!
//! The only supported computation is color-opacity composition:
//!
//! ```json
//! "Faded": { "computed": { "color": "Global.Color.Blue", "opacity": 0.5 } }
//! ```
//!
//! resolves to `"value": "rgba(0, 0, 255, 0.5)"` with `wasComputed` set. The
//! pass runs after alias resolution, so inputs are concrete unless they are
//! themselves computed, in which case they are computed first.

use std::collections::HashSet;

use log::{debug, trace};
use serde_json::{Map, Value as Json};
use tokenloom_core::{
    color::Color,
    path::TokenPath,
    tree::{Node, NodeKind},
    value::TokenValue,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ResolveError, Result},
    walker::{Visitor, Walk, walk},
};

/// Resolves every computed token in the tree.
///
/// # Errors
///
/// Returns an error only if a precondition is violated.
pub fn resolve_computed(root: &mut Node, collector: &mut DiagnosticCollector) -> Result<()> {
    let mut resolver = ComputedResolver {
        collector,
        in_progress: HashSet::new(),
    };
    let visited = walk(root, &TokenPath::root(), &mut resolver)?;
    debug!(computed = visited; "Computed tokens resolved");
    Ok(())
}

struct ComputedResolver<'a> {
    collector: &'a mut DiagnosticCollector,
    /// Tokens whose inputs are being computed, guarding against cycles.
    in_progress: HashSet<TokenPath>,
}

impl Visitor for ComputedResolver<'_> {
    fn matches(&self, node: &Node) -> bool {
        matches!(node.kind(), NodeKind::Computed(_))
    }

    fn visit(&mut self, root: &mut Node, path: &TokenPath) -> Result<Walk> {
        self.resolve(root, path)?;
        Ok(Walk::Skip)
    }
}

/// A computation failure: the sentinel text and the diagnostic to report.
struct Failure {
    sentinel: &'static str,
    code: ErrorCode,
    message: String,
}

impl Failure {
    fn new(sentinel: &'static str, code: ErrorCode, message: String) -> Self {
        Self {
            sentinel,
            code,
            message,
        }
    }
}

impl ComputedResolver<'_> {
    fn resolve(&mut self, root: &mut Node, path: &TokenPath) -> Result<()> {
        let computation = match root.get(path).map(Node::kind) {
            Some(NodeKind::Computed(computation)) => computation.clone(),
            _ => {
                return Err(ResolveError::Precondition {
                    pass: "computed-value resolution",
                    path: path.clone(),
                    expected: "a computed token",
                });
            }
        };

        self.in_progress.insert(path.clone());
        let outcome = self.compute(root, &computation);
        self.in_progress.remove(path);
        let outcome = outcome?;

        let Some(node) = root.get_mut(path) else {
            return Ok(());
        };
        match outcome {
            Ok(color) => {
                trace!(path:%, color:%; "Computed token resolved");
                node.set_kind(NodeKind::Value(TokenValue::String(color)));
                node.meta_mut().was_computed = true;
            }
            Err(failure) => {
                node.set_error(failure.sentinel);
                self.collector.emit(
                    Diagnostic::error(failure.message)
                        .with_code(failure.code)
                        .with_path(path.clone()),
                );
            }
        }
        Ok(())
    }

    fn compute(
        &mut self,
        root: &mut Node,
        computation: &Json,
    ) -> Result<std::result::Result<String, Failure>> {
        let Some(fields) = computation.as_object() else {
            return Ok(Err(Failure::new(
                "Invalid computed syntax",
                ErrorCode::E200,
                format!(
                    "invalid computed {computation}; expected an object describing a token computation"
                ),
            )));
        };
        if !is_color_computation(fields) {
            return Ok(Err(Failure::new(
                "Unknown computation type",
                ErrorCode::E204,
                format!("unable to determine what type of computation {computation} performs"),
            )));
        }

        let input = fields.get("color").unwrap_or(&Json::Null);
        let Some(input_path) = input
            .as_str()
            .and_then(TokenPath::parse)
            .filter(|input_path| root.get(input_path).is_some())
        else {
            return Ok(Err(Failure::new(
                "Missing input token",
                ErrorCode::E201,
                format!("couldn't find the token {input} used in a computed token"),
            )));
        };

        let input_is_computed = root
            .get(&input_path)
            .is_some_and(|node| matches!(node.kind(), NodeKind::Computed(_)));
        if input_is_computed && !self.in_progress.contains(&input_path) {
            self.resolve(root, &input_path)?;
        }

        let color = root
            .get(&input_path)
            .and_then(Node::value_ref)
            .and_then(TokenValue::as_str)
            .filter(|text| !text.is_empty() && !text.starts_with("<ERROR: "))
            .and_then(|text| Color::new(text).ok());
        let Some(color) = color else {
            return Ok(Err(Failure::new(
                "Missing or invalid input token value",
                ErrorCode::E202,
                format!("the token {input} used in a computed token doesn't have a color value"),
            )));
        };

        let raw_opacity = fields.get("opacity").unwrap_or(&Json::Null);
        let Some(opacity) = parse_opacity(raw_opacity) else {
            return Ok(Err(Failure::new(
                "Invalid opacity",
                ErrorCode::E203,
                format!("invalid opacity {raw_opacity}; expected a number from 0 to 1"),
            )));
        };

        Ok(Ok(color.with_alpha(opacity as f32).to_rgb_string()))
    }
}

fn is_color_computation(fields: &Map<String, Json>) -> bool {
    fields.contains_key("color") && fields.contains_key("opacity")
}

/// Accepts a number or a numeric string in `0.0..=1.0`.
fn parse_opacity(raw: &Json) -> Option<f64> {
    let opacity = match raw {
        Json::Number(number) => number.as_f64()?,
        Json::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (0.0..=1.0).contains(&opacity).then_some(opacity)
}
