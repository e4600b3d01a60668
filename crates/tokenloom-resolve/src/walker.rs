//! Generic traversal of the token tree.
//!
//! Every resolution pass is a [`Visitor`] driven by [`walk`]. Visitors receive
//! the whole tree and the path of the matched node rather than a reference to
//! the node itself, because most passes read other parts of the tree (an
//! alias target, a computation input) while rewriting the matched node.

use tokenloom_core::{path::TokenPath, tree::Node};

use crate::error::Result;

/// Recursion control returned by [`Visitor::visit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Walk the children of the node that was just visited.
    Descend,
    /// Do not look inside the node that was just visited.
    Skip,
}

/// A pass over the token tree.
pub trait Visitor {
    /// Returns `true` for nodes this visitor handles.
    fn matches(&self, node: &Node) -> bool;

    /// Handles the matching node at `path`, rewriting the tree as needed.
    fn visit(&mut self, root: &mut Node, path: &TokenPath) -> Result<Walk>;
}

/// Visits every matching descendant of the node at `start` in depth-first
/// pre-order and returns how many nodes were visited.
///
/// Non-matching groups are recursed into; non-matching tokens are not. The
/// child keys of each node are captured before its children are visited, so
/// a visitor may insert, replace, or remove nodes. Removed children are
/// skipped and children added during the walk are not visited.
///
/// # Errors
///
/// Stops at the first error returned by the visitor.
pub fn walk<V>(root: &mut Node, start: &TokenPath, visitor: &mut V) -> Result<usize>
where
    V: Visitor + ?Sized,
{
    let Some(node) = root.get(start) else {
        return Ok(0);
    };
    let keys = node.child_keys();

    let mut visited = 0;
    for key in keys {
        let path = start.child(key);
        let Some(child) = root.get(&path) else {
            continue;
        };
        if visitor.matches(child) {
            visited += 1;
            if visitor.visit(root, &path)? == Walk::Descend {
                visited += walk(root, &path, visitor)?;
            }
        } else if child.is_group() {
            visited += walk(root, &path, visitor)?;
        }
    }
    Ok(visited)
}
