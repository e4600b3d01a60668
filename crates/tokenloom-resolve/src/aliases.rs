//! Alias resolution.
//!
//! An alias node (`{ "aliasOf": "Global.Color.Blue" }`) is replaced by a copy
//! of its target. Keys already present on the alias are kept, so an alias to
//! a group can override individual members:
//!
//! ```json
//! "Subtle": { "aliasOf": "Set.Neutral", "Rest": { "value": "#f5f5f5" } }
//! ```
//!
//! Broken aliases never abort resolution. They are turned into
//! `<ERROR: ...>` sentinel values and reported to the collector.

use log::{debug, trace};
use serde_json::Value as Json;
use tokenloom_core::{
    path::TokenPath,
    tree::{Node, NodeKind},
    value::{ShadowColor, TokenValue},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ResolveError, Result},
    walker::{Visitor, Walk, walk},
};

/// Resolves every alias in the tree.
///
/// # Errors
///
/// Returns an error only if a precondition is violated; broken aliases are
/// reported to `collector`.
pub fn resolve_aliases(root: &mut Node, collector: &mut DiagnosticCollector) -> Result<()> {
    let mut resolver = AliasResolver { collector };
    let visited = walk(root, &TokenPath::root(), &mut resolver)?;
    debug!(aliases = visited; "Aliases resolved");
    Ok(())
}

struct AliasResolver<'a> {
    collector: &'a mut DiagnosticCollector,
}

impl Visitor for AliasResolver<'_> {
    fn matches(&self, node: &Node) -> bool {
        node.is_alias()
    }

    fn visit(&mut self, root: &mut Node, path: &TokenPath) -> Result<Walk> {
        // A resolved alias may have received copies of further aliases.
        if resolve_alias(root, path, self.collector)? {
            Ok(Walk::Descend)
        } else {
            Ok(Walk::Skip)
        }
    }
}

/// Resolves the single alias at `path`.
///
/// Returns `true` if the alias was replaced by a copy of its target and
/// `false` if it was turned into an error sentinel.
///
/// # Errors
///
/// Returns [`ResolveError::Precondition`] if no alias exists at `path`.
pub fn resolve_alias(
    root: &mut Node,
    path: &TokenPath,
    collector: &mut DiagnosticCollector,
) -> Result<bool> {
    let raw = match root.get(path).map(Node::kind) {
        Some(NodeKind::Alias(raw)) => raw.clone(),
        _ => {
            return Err(ResolveError::Precondition {
                pass: "alias resolution",
                path: path.clone(),
                expected: "an alias token",
            });
        }
    };

    let Some(target) = raw.as_str() else {
        fail(
            root,
            path,
            collector,
            "Invalid aliasOf syntax",
            Diagnostic::error(format!("invalid aliasOf {raw}"))
                .with_code(ErrorCode::E100)
                .with_help(
                    "aliasOf should be a dot-delimited path to another token, such as \"Global.Color.Blue\"",
                ),
        );
        return Ok(false);
    };

    let quoted = Json::String(target.to_string());
    let Some(target_path) = TokenPath::parse(target).filter(|target| root.get(target).is_some())
    else {
        fail(
            root,
            path,
            collector,
            &format!("token {quoted} missing"),
            Diagnostic::error(format!("alias target {quoted} does not exist"))
                .with_code(ErrorCode::E101),
        );
        return Ok(false);
    };

    if has_circular_reference(root, path, &target_path) {
        fail(
            root,
            path,
            collector,
            &format!("circular reference involving {quoted}"),
            Diagnostic::error(format!("alias {quoted} is in a chain of circular references"))
                .with_code(ErrorCode::E102),
        );
        return Ok(false);
    }

    merge_target(root, path, &target_path, collector)?;
    trace!(path:%, target:% = target_path; "Alias resolved");
    Ok(true)
}

fn fail(
    root: &mut Node,
    path: &TokenPath,
    collector: &mut DiagnosticCollector,
    sentinel: &str,
    diagnostic: Diagnostic,
) {
    if let Some(node) = root.get_mut(path) {
        node.set_error(sentinel);
    }
    collector.emit(diagnostic.with_path(path.clone()));
}

/// Returns `true` if resolving the alias at `original` would revisit a node.
///
/// A target that is the alias itself or one of its ancestors is circular, as
/// copying it would copy the alias into itself. Otherwise the chain of aliases
/// starting at `target` is followed until it ends or revisits a node.
fn has_circular_reference(root: &Node, original: &TokenPath, target: &TokenPath) -> bool {
    if target == original || target.is_ancestor_of(original) {
        return true;
    }

    let mut traversed = vec![original.clone()];
    let mut current = target.clone();
    loop {
        let Some(NodeKind::Alias(raw)) = root.get(&current).map(Node::kind) else {
            return false;
        };
        let Some(next) = raw.as_str().and_then(TokenPath::parse) else {
            return false;
        };
        if root.get(&next).is_none() {
            return false;
        }
        traversed.push(current);
        if traversed
            .iter()
            .any(|seen| *seen == next || next.is_ancestor_of(seen))
        {
            return true;
        }
        current = next;
    }
}

/// Copies the target onto the alias at `path`.
fn merge_target(
    root: &mut Node,
    path: &TokenPath,
    target_path: &TokenPath,
    collector: &mut DiagnosticCollector,
) -> Result<()> {
    if root.get(target_path).is_some_and(Node::is_alias) {
        resolve_alias(root, target_path, collector)?;
    }
    let Some(target) = root.get(target_path).cloned() else {
        return Ok(());
    };
    let Some(node) = root.get_mut(path) else {
        return Ok(());
    };

    match target.kind() {
        NodeKind::Value(value) => {
            node.set_kind(NodeKind::Value(value.clone()));
            node.meta_mut().resolved_alias_path =
                Some(target_path.export_path(target.meta().full_name.as_deref()));
        }
        NodeKind::Group => {
            node.set_kind(NodeKind::Group);
            fill_group(node, &target, target_path);
        }
        other => node.set_kind(other.clone()),
    }
    Ok(())
}

/// Copies the children of the group `source` that `node` lacks.
///
/// A child present on both sides is filled recursively when both are groups,
/// so a partial override keeps the siblings it does not restate. Anything
/// else already on `node` is kept as is.
fn fill_group(node: &mut Node, source: &Node, source_path: &TokenPath) {
    for (key, child) in source.children() {
        let child_path = source_path.child(key.as_str());
        match node.child_mut(key) {
            None => node.insert_child(key.clone(), copy_resolved(child, &child_path)),
            Some(existing) if existing.is_group() && child.is_group() => {
                fill_group(existing, child, &child_path);
            }
            Some(_) => {}
        }
    }
}

/// Deep-copies `source`, recording on every copied value where it came from.
fn copy_resolved(source: &Node, source_path: &TokenPath) -> Node {
    let mut copy = Node::new(source.kind().clone());
    if matches!(source.kind(), NodeKind::Value(_)) {
        copy.meta_mut().resolved_alias_path =
            Some(source_path.export_path(source.meta().full_name.as_deref()));
        return copy;
    }
    for (key, child) in source.children() {
        copy.insert_child(key.clone(), copy_resolved(child, &source_path.child(key.as_str())));
    }
    copy
}

/// Resolves color aliases inside shadow values.
///
/// Runs after every other pass, once alias and computed targets are concrete.
/// A layer whose alias does not lead to a string value turns the whole token
/// into an error sentinel.
pub fn resolve_shadow_colors(root: &mut Node, collector: &mut DiagnosticCollector) -> Result<()> {
    let mut resolver = ShadowColorResolver { collector };
    let visited = walk(root, &TokenPath::root(), &mut resolver)?;
    debug!(shadows = visited; "Shadow colors resolved");
    Ok(())
}

struct ShadowColorResolver<'a> {
    collector: &'a mut DiagnosticCollector,
}

impl Visitor for ShadowColorResolver<'_> {
    fn matches(&self, node: &Node) -> bool {
        matches!(
            node.value_ref(),
            Some(TokenValue::Shadows(layers))
                if layers.iter().any(|layer| matches!(layer.color, ShadowColor::Alias(_)))
        )
    }

    fn visit(&mut self, root: &mut Node, path: &TokenPath) -> Result<Walk> {
        let Some(TokenValue::Shadows(mut layers)) = root.get(path).and_then(Node::value_ref).cloned()
        else {
            return Ok(Walk::Skip);
        };

        for layer in &mut layers {
            let ShadowColor::Alias(target) = &layer.color else {
                continue;
            };
            let resolved = TokenPath::parse(target).and_then(|target_path| {
                let node = root.get(&target_path)?;
                let value = node.value_ref()?.as_str()?;
                Some(ShadowColor::Resolved {
                    value: value.to_string(),
                    path: target_path.export_path(node.meta().full_name.as_deref()),
                })
            });
            match resolved {
                Some(color) => layer.color = color,
                None => {
                    let quoted = Json::String(target.clone());
                    fail(
                        root,
                        path,
                        self.collector,
                        &format!("shadow color {quoted} unresolvable"),
                        Diagnostic::error(format!(
                            "shadow color {quoted} does not lead to a color value"
                        ))
                        .with_code(ErrorCode::E103),
                    );
                    return Ok(Walk::Skip);
                }
            }
        }

        if let Some(node) = root.get_mut(path) {
            node.set_kind(NodeKind::Value(TokenValue::Shadows(layers)));
        }
        Ok(Walk::Skip)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn path(dotted: &str) -> TokenPath {
        TokenPath::parse(dotted).unwrap()
    }

    fn string(text: &str) -> Node {
        Node::value(TokenValue::String(text.into()))
    }

    fn error_text(root: &Node, at: &str) -> String {
        root.get(&path(at))
            .and_then(Node::value_ref)
            .and_then(TokenValue::as_str)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_alias_to_value() {
        let mut root = Node::group();
        root.insert_path(&path("Global.Color.Blue"), string("#0000ff"));
        root.insert_path(&path("Set.Accent"), Node::alias("Global.Color.Blue"));
        let mut collector = DiagnosticCollector::new();

        resolve_aliases(&mut root, &mut collector).unwrap();

        let accent = root.get(&path("Set.Accent")).unwrap();
        assert_eq!(accent.value_ref(), Some(&TokenValue::String("#0000ff".into())));
        assert_eq!(
            accent.meta().resolved_alias_path,
            Some(path("Global.Color.Blue"))
        );
        assert!(collector.is_empty());
    }

    #[test]
    fn test_alias_chain_resolves_target_first() {
        let mut root = Node::group();
        root.insert_path(&path("Set.C"), Node::alias("Set.B"));
        root.insert_path(&path("Set.B"), Node::alias("Global.A"));
        root.insert_path(&path("Global.A"), Node::value(TokenValue::Number(3.0)));
        let mut collector = DiagnosticCollector::new();

        resolve_aliases(&mut root, &mut collector).unwrap();

        let c = root.get(&path("Set.C")).unwrap();
        assert_eq!(c.value_ref(), Some(&TokenValue::Number(3.0)));
        // Set is stripped from exported alias paths.
        assert_eq!(c.meta().resolved_alias_path, Some(path("B")));
        assert!(!root.has_unresolved());
    }

    #[test]
    fn test_alias_to_group_keeps_own_children() {
        let mut root = Node::group();
        root.insert_path(&path("Set.Neutral.Rest"), string("#ffffff"));
        root.insert_path(&path("Set.Neutral.Hover"), string("#f5f5f5"));
        let mut subtle = Node::alias("Set.Neutral");
        subtle.insert_child("Rest", string("transparent"));
        root.insert_path(&path("Set.Subtle"), subtle);
        let mut collector = DiagnosticCollector::new();

        resolve_aliases(&mut root, &mut collector).unwrap();

        let subtle = root.get(&path("Set.Subtle")).unwrap();
        assert!(subtle.is_group());
        assert_eq!(error_text(&root, "Set.Subtle.Rest"), "transparent");
        assert!(
            root.get(&path("Set.Subtle.Rest"))
                .unwrap()
                .meta()
                .resolved_alias_path
                .is_none()
        );
        assert_eq!(error_text(&root, "Set.Subtle.Hover"), "#f5f5f5");
        assert_eq!(
            root.get(&path("Set.Subtle.Hover"))
                .unwrap()
                .meta()
                .resolved_alias_path,
            Some(path("Neutral.Hover"))
        );
    }

    #[test]
    fn test_alias_to_group_fills_nested_groups() {
        let mut root = Node::group();
        root.insert_path(&path("Set.Neutral.Fill.Rest"), string("#ffffff"));
        root.insert_path(&path("Set.Neutral.Fill.Hover"), string("#f5f5f5"));
        root.insert_path(&path("Set.Neutral.Stroke.Rest"), string("#d1d1d1"));
        let mut fill = Node::group();
        fill.insert_child("Rest", string("transparent"));
        let mut subtle = Node::alias("Set.Neutral");
        subtle.insert_child("Fill", fill);
        root.insert_path(&path("Set.Subtle"), subtle);
        let mut collector = DiagnosticCollector::new();

        resolve_aliases(&mut root, &mut collector).unwrap();

        assert!(collector.is_empty());
        assert_eq!(error_text(&root, "Set.Subtle.Fill.Rest"), "transparent");
        assert_eq!(error_text(&root, "Set.Subtle.Fill.Hover"), "#f5f5f5");
        assert_eq!(error_text(&root, "Set.Subtle.Stroke.Rest"), "#d1d1d1");
        assert_eq!(
            root.get(&path("Set.Subtle.Fill.Hover"))
                .unwrap()
                .meta()
                .resolved_alias_path,
            Some(path("Neutral.Fill.Hover"))
        );
    }

    #[test]
    fn test_copied_aliases_are_resolved() {
        let mut root = Node::group();
        root.insert_path(&path("Global.Color.Blue"), string("#0000ff"));
        root.insert_path(&path("Set.Brand.Fill"), Node::alias("Global.Color.Blue"));
        root.insert_path(&path("Set.Accent"), Node::alias("Set.Brand"));
        let mut collector = DiagnosticCollector::new();

        resolve_aliases(&mut root, &mut collector).unwrap();

        assert_eq!(error_text(&root, "Set.Accent.Fill"), "#0000ff");
        assert!(!root.has_unresolved());
    }

    #[test]
    fn test_alias_to_computed_copies_computation() {
        let mut root = Node::group();
        let computation = json!({ "color": "Global.Color.Blue", "opacity": 0.5 });
        root.insert_path(&path("Set.Faded"), Node::new(NodeKind::Computed(computation.clone())));
        root.insert_path(&path("Set.Alias"), Node::alias("Set.Faded"));
        let mut collector = DiagnosticCollector::new();

        resolve_aliases(&mut root, &mut collector).unwrap();

        assert_eq!(
            root.get(&path("Set.Alias")).unwrap().kind(),
            &NodeKind::Computed(computation)
        );
    }

    #[test]
    fn test_missing_target() {
        let mut root = Node::group();
        root.insert_path(&path("Set.Accent"), Node::alias("Global.Color.Bleu"));
        let mut collector = DiagnosticCollector::new();

        resolve_aliases(&mut root, &mut collector).unwrap();

        assert_eq!(
            error_text(&root, "Set.Accent"),
            "<ERROR: token \"Global.Color.Bleu\" missing>"
        );
        let diagnostics = collector.into_diagnostics();
        assert_eq!(diagnostics[0].code(), Some(ErrorCode::E101));
        assert_eq!(diagnostics[0].path(), Some(&path("Set.Accent")));
    }

    #[test]
    fn test_invalid_syntax() {
        let mut root = Node::group();
        root.insert_path(&path("Set.Accent"), Node::new(NodeKind::Alias(json!(42))));
        let mut collector = DiagnosticCollector::new();

        resolve_aliases(&mut root, &mut collector).unwrap();

        assert_eq!(error_text(&root, "Set.Accent"), "<ERROR: Invalid aliasOf syntax>");
        assert_eq!(collector.diagnostics()[0].code(), Some(ErrorCode::E100));
    }

    #[test]
    fn test_self_alias() {
        let mut root = Node::group();
        root.insert_path(&path("Set.Loop"), Node::alias("Set.Loop"));
        let mut collector = DiagnosticCollector::new();

        resolve_aliases(&mut root, &mut collector).unwrap();

        assert_eq!(
            error_text(&root, "Set.Loop"),
            "<ERROR: circular reference involving \"Set.Loop\">"
        );
        assert_eq!(collector.diagnostics()[0].code(), Some(ErrorCode::E102));
    }

    #[test]
    fn test_alias_to_ancestor_is_circular() {
        let mut root = Node::group();
        root.insert_path(&path("Set.Group.Inner"), Node::alias("Set.Group"));
        let mut collector = DiagnosticCollector::new();

        resolve_aliases(&mut root, &mut collector).unwrap();

        assert!(root.get(&path("Set.Group.Inner")).unwrap().is_error());
    }

    #[test]
    fn test_two_hop_cycle() {
        let mut root = Node::group();
        root.insert_path(&path("Set.A"), Node::alias("Set.B"));
        root.insert_path(&path("Set.B"), Node::alias("Set.A"));
        let mut collector = DiagnosticCollector::new();

        resolve_aliases(&mut root, &mut collector).unwrap();

        assert!(root.get(&path("Set.A")).unwrap().is_error());
        assert!(root.get(&path("Set.B")).unwrap().is_error());
        assert!(!root.has_unresolved());
    }

    #[test]
    fn test_precondition() {
        let mut root = Node::group();
        root.insert_path(&path("Global.A"), Node::value(TokenValue::Number(1.0)));
        let mut collector = DiagnosticCollector::new();

        let err = resolve_alias(&mut root, &path("Global.A"), &mut collector).unwrap_err();
        assert!(matches!(err, ResolveError::Precondition { .. }));
    }

    #[test]
    fn test_shadow_colors() {
        let mut root = Node::group();
        root.insert_path(&path("Global.Color.Shadow"), string("#00000024"));
        let shadow = TokenValue::from_json(&json!([
            { "x": 0, "y": 2, "blur": 4, "color": { "aliasOf": "Global.Color.Shadow" } },
            { "x": 0, "y": 0, "blur": 2, "color": { "value": "#0000001f" } }
        ]));
        root.insert_path(&path("Set.Shadow.Elevation4"), Node::value(shadow));
        let broken = TokenValue::from_json(&json!([
            { "x": 0, "y": 2, "blur": 4, "color": { "aliasOf": "Global.Color.Nope" } }
        ]));
        root.insert_path(&path("Set.Shadow.Broken"), Node::value(broken));
        let mut collector = DiagnosticCollector::new();

        resolve_shadow_colors(&mut root, &mut collector).unwrap();

        let Some(TokenValue::Shadows(layers)) = root
            .get(&path("Set.Shadow.Elevation4"))
            .and_then(Node::value_ref)
        else {
            panic!("Expected shadows");
        };
        assert_eq!(layers[0].color.value(), Some("#00000024"));
        assert_eq!(
            layers[0].color.resolved_path(),
            Some(&path("Global.Color.Shadow"))
        );
        assert!(root.get(&path("Set.Shadow.Broken")).unwrap().is_error());
        assert_eq!(collector.diagnostics()[0].code(), Some(ErrorCode::E103));
    }
}
