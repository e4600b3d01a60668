//! Platform overrides.
//!
//! Any group, alias, or computed token may carry a `platform` map holding
//! partial nodes to merge in when building for that platform:
//!
//! ```json
//! "Corner": {
//!     "aliasOf": "Global.Corner.Radius.Medium",
//!     "platform": { "winui": { "aliasOf": "Global.Corner.Radius.Large" } }
//! }
//! ```
//!
//! Overrides are applied before every other pass, and the `platform` entry is
//! removed whether or not the current platform had an override.

use std::str::FromStr;

use log::{debug, trace};
use serde_json::{Map, Value as Json};
use tokenloom_core::{
    path::TokenPath,
    platform::Platform,
    tree::{Node, NodeKind},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, Result},
    load::classify_node,
    walker::{Visitor, Walk, walk},
};

/// Applies and removes every platform override in the tree.
///
/// With `platform` set to `None`, overrides are validated and removed without
/// being applied.
///
/// # Errors
///
/// This pass reports every problem as a diagnostic; the error is only
/// propagated from the walker.
pub fn resolve_platform_overrides(
    root: &mut Node,
    platform: Option<Platform>,
    collector: &mut DiagnosticCollector,
) -> Result<()> {
    let mut applier = OverrideApplier {
        platform,
        collector,
        applied: 0,
    };
    let visited = walk(root, &TokenPath::root(), &mut applier)?;
    debug!(
        platform:? = platform,
        overrides = visited,
        applied = applier.applied;
        "Platform overrides resolved"
    );
    Ok(())
}

struct OverrideApplier<'a> {
    platform: Option<Platform>,
    collector: &'a mut DiagnosticCollector,
    applied: usize,
}

impl Visitor for OverrideApplier<'_> {
    fn matches(&self, node: &Node) -> bool {
        node.platform().is_some()
    }

    fn visit(&mut self, root: &mut Node, path: &TokenPath) -> Result<Walk> {
        let Some(node) = root.get_mut(path) else {
            return Ok(Walk::Skip);
        };
        let Some(overrides) = node.take_platform() else {
            return Ok(Walk::Descend);
        };

        let Some(entry) = self.validate(node, &overrides, path) else {
            return Ok(Walk::Descend);
        };
        if let Some(entry) = entry {
            let patch = classify_node(entry, path, self.collector);
            apply(node, patch);
            self.applied += 1;
            trace!(path:%, platform:? = self.platform; "Platform override applied");
        }
        Ok(Walk::Descend)
    }
}

impl OverrideApplier<'_> {
    /// Checks the override map on `node`.
    ///
    /// Returns `None` if the override must be skipped, or the entry for the
    /// current platform, if there is one.
    fn validate<'o>(
        &mut self,
        node: &Node,
        overrides: &'o Json,
        path: &TokenPath,
    ) -> Option<Option<&'o Map<String, Json>>> {
        let Some(map) = overrides.as_object() else {
            self.report(
                Diagnostic::error(format!("invalid platform override {overrides}"))
                    .with_code(ErrorCode::E400)
                    .with_help("platform should map platform names to partial tokens"),
                path,
            );
            return None;
        };

        if matches!(node.kind(), NodeKind::Value(_)) {
            self.report(
                Diagnostic::error("platform overrides cannot be used on a value token")
                    .with_code(ErrorCode::E402)
                    .with_help("move the value into an override for each platform"),
                path,
            );
            return None;
        }

        let mut current = None;
        for (name, entry) in map {
            let Ok(platform) = Platform::from_str(name) else {
                self.report(
                    Diagnostic::error(format!("unknown platform `{name}` in platform override"))
                        .with_code(ErrorCode::E401),
                    path,
                );
                return None;
            };
            let Some(entry) = entry.as_object() else {
                self.report(
                    Diagnostic::error(format!("invalid platform override {entry} for `{name}`"))
                        .with_code(ErrorCode::E400),
                    path,
                );
                return None;
            };
            if Some(platform) == self.platform {
                current = Some(entry);
            }
        }
        Some(current)
    }

    fn report(&mut self, diagnostic: Diagnostic, path: &TokenPath) {
        self.collector.emit(diagnostic.with_path(path.clone()));
    }
}

/// Shallow-merges `patch` onto `node`: whatever the patch defines replaces
/// what the node had.
fn apply(node: &mut Node, mut patch: Node) {
    if !patch.is_group() {
        node.set_kind(patch.take_kind());
    }
    let meta = std::mem::take(patch.meta_mut());
    if meta.full_name.is_some() {
        node.meta_mut().full_name = meta.full_name;
    }
    if meta.attributes.is_some() {
        node.meta_mut().attributes = meta.attributes;
    }
    node.meta_mut().extra.extend(meta.extra);
    for (key, child) in std::mem::take(patch.children_mut()) {
        node.insert_child(key, child);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokenloom_core::value::TokenValue;

    use super::*;
    use crate::load::classify;

    fn path(dotted: &str) -> TokenPath {
        TokenPath::parse(dotted).unwrap()
    }

    fn tree(document: Json) -> (Node, DiagnosticCollector) {
        let mut collector = DiagnosticCollector::new();
        let root = classify(document.as_object().unwrap(), &mut collector);
        (root, collector)
    }

    fn sample() -> Json {
        json!({
            "Set": {
                "Corner": {
                    "aliasOf": "Global.Corner.Medium",
                    "fullName": "ControlCornerRadius",
                    "platform": {
                        "winui": { "aliasOf": "Global.Corner.Large" },
                        "ios": { "fullName": "cornerRadius" }
                    }
                },
                "Button": {
                    "Rest": { "value": "#ffffff" },
                    "platform": {
                        "css": { "Rest": { "value": "#fafafa" }, "Hover": { "value": "#f0f0f0" } }
                    }
                }
            }
        })
    }

    #[test]
    fn test_applies_current_platform() {
        let (mut root, mut collector) = tree(sample());

        resolve_platform_overrides(&mut root, Some(Platform::Winui), &mut collector).unwrap();

        let corner = root.get(&path("Set.Corner")).unwrap();
        assert_eq!(corner.kind(), &NodeKind::Alias(json!("Global.Corner.Large")));
        assert_eq!(corner.meta().full_name.as_deref(), Some("ControlCornerRadius"));
        assert!(corner.platform().is_none());
        assert!(collector.is_empty());
    }

    #[test]
    fn test_merges_children() {
        let (mut root, mut collector) = tree(sample());

        resolve_platform_overrides(&mut root, Some(Platform::Css), &mut collector).unwrap();

        let button = root.get(&path("Set.Button")).unwrap();
        assert_eq!(button.child_keys(), vec!["Rest", "Hover"]);
        assert_eq!(
            button.child("Rest").unwrap().value_ref(),
            Some(&TokenValue::String("#fafafa".into()))
        );
    }

    #[test]
    fn test_absent_platform_leaves_node_unchanged() {
        let (mut root, mut collector) = tree(sample());
        let before = root.get(&path("Set.Corner")).unwrap().clone();

        resolve_platform_overrides(&mut root, Some(Platform::React), &mut collector).unwrap();

        let after = root.get(&path("Set.Corner")).unwrap();
        assert_eq!(after.kind(), before.kind());
        assert_eq!(after.meta(), before.meta());
        assert!(after.platform().is_none());
    }

    #[test]
    fn test_no_platform_removes_overrides() {
        let (mut root, mut collector) = tree(sample());

        resolve_platform_overrides(&mut root, None, &mut collector).unwrap();

        assert_eq!(
            root.get(&path("Set.Corner")).unwrap().kind(),
            &NodeKind::Alias(json!("Global.Corner.Medium"))
        );
        assert_eq!(root.get(&path("Set.Button")).unwrap().children().len(), 1);
    }

    #[test]
    fn test_unknown_platform_skips_whole_override() {
        let (mut root, mut collector) = tree(json!({
            "Set": {
                "Corner": {
                    "aliasOf": "Global.Corner.Medium",
                    "platform": {
                        "winui": { "aliasOf": "Global.Corner.Large" },
                        "android": { "aliasOf": "Global.Corner.Small" }
                    }
                }
            }
        }));

        resolve_platform_overrides(&mut root, Some(Platform::Winui), &mut collector).unwrap();

        assert_eq!(
            root.get(&path("Set.Corner")).unwrap().kind(),
            &NodeKind::Alias(json!("Global.Corner.Medium"))
        );
        assert_eq!(collector.diagnostics()[0].code(), Some(ErrorCode::E401));
    }

    #[test]
    fn test_invalid_overrides() {
        let (mut root, mut collector) = tree(json!({
            "Set": {
                "NotObject": { "aliasOf": "Global.A", "platform": "winui" },
                "OnValue": { "value": 4, "platform": { "winui": { "value": 8 } } },
                "BadEntry": { "aliasOf": "Global.A", "platform": { "winui": 8 } }
            }
        }));

        resolve_platform_overrides(&mut root, Some(Platform::Winui), &mut collector).unwrap();

        assert_eq!(
            root.get(&path("Set.OnValue")).unwrap().value_ref(),
            Some(&TokenValue::Number(4.0))
        );
        let codes: Vec<_> = collector
            .diagnostics()
            .iter()
            .filter_map(|diag| diag.code())
            .collect();
        assert_eq!(codes, vec![ErrorCode::E400, ErrorCode::E402, ErrorCode::E400]);
    }
}
