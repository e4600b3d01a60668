//! The classified token tree.
//!
//! Raw JSON documents are classified once into [`Node`]s. Every node is a
//! group of named children plus an optional token payload ([`NodeKind`]), so
//! an alias that targets a group can still carry its own overriding children.
//! Resolution passes rewrite the tree in place; after they finish, only
//! [`NodeKind::Group`] and [`NodeKind::Value`] remain.

use indexmap::IndexMap;
use serde_json::{Map, Value as Json};

use crate::{path::TokenPath, value::TokenValue};

/// Keys with a fixed meaning on a token node. Any other object-valued key is a
/// child.
pub mod keys {
    pub const VALUE: &str = "value";
    pub const ALIAS_OF: &str = "aliasOf";
    pub const COMPUTED: &str = "computed";
    pub const GENERATE: &str = "generate";
    pub const PLATFORM: &str = "platform";
    pub const FULL_NAME: &str = "fullName";
    pub const RESOLVED_ALIAS_PATH: &str = "resolvedAliasPath";
    pub const WAS_COMPUTED: &str = "wasComputed";
    pub const ATTRIBUTES: &str = "attributes";

    /// Every reserved key.
    pub const RESERVED: [&str; 9] = [
        VALUE,
        ALIAS_OF,
        COMPUTED,
        GENERATE,
        PLATFORM,
        FULL_NAME,
        RESOLVED_ALIAS_PATH,
        WAS_COMPUTED,
        ATTRIBUTES,
    ];

    /// Returns `true` if `key` has a fixed meaning on a token node.
    pub fn is_reserved(key: &str) -> bool {
        RESERVED.contains(&key)
    }
}

/// What a node is, apart from its children.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeKind {
    /// A plain set of children.
    #[default]
    Group,
    /// A concrete token.
    Value(TokenValue),
    /// A reference to another node, holding the raw `aliasOf` payload.
    Alias(Json),
    /// A computation, holding the raw `computed` payload.
    Computed(Json),
    /// A ramp generation directive, holding the raw `generate` payload.
    Generated(Json),
}

impl NodeKind {
    /// Short lowercase name used in log messages and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Group => "group",
            NodeKind::Value(_) => "value",
            NodeKind::Alias(_) => "alias",
            NodeKind::Computed(_) => "computed",
            NodeKind::Generated(_) => "generated",
        }
    }
}

/// Bookkeeping carried alongside a node's kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenMeta {
    /// Replaces the path when naming the exported token.
    pub full_name: Option<String>,
    /// The path a resolved alias pointed to.
    pub resolved_alias_path: Option<TokenPath>,
    /// Set when the value was produced by a computation.
    pub was_computed: bool,
    /// Attributes preset by an importer, used when classification fails.
    pub attributes: Option<Map<String, Json>>,
    /// Unrecognized scalar keys, carried through to debug output.
    pub extra: IndexMap<String, Json>,
}

/// A node of the token tree.
///
/// # Examples
///
/// ```
/// use tokenloom_core::{path::TokenPath, tree::Node, value::TokenValue};
///
/// let mut root = Node::group();
/// root.insert_path(
///     &TokenPath::parse("Global.Color.Blue").unwrap(),
///     Node::value(TokenValue::String("#0000ff".into())),
/// );
///
/// let blue = root.get(&TokenPath::parse("Global.Color.Blue").unwrap()).unwrap();
/// assert_eq!(blue.value_ref(), Some(&TokenValue::String("#0000ff".into())));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    kind: NodeKind,
    children: IndexMap<String, Node>,
    platform: Option<Json>,
    meta: TokenMeta,
}

impl Node {
    /// Creates a node of the given kind with no children.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Creates an empty group.
    pub fn group() -> Self {
        Self::default()
    }

    /// Creates a concrete token.
    pub fn value(value: TokenValue) -> Self {
        Self::new(NodeKind::Value(value))
    }

    /// Creates an alias token targeting `target`.
    pub fn alias(target: impl Into<String>) -> Self {
        Self::new(NodeKind::Alias(Json::String(target.into())))
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
    }

    /// Replaces the kind with [`NodeKind::Group`] and returns the old one.
    pub fn take_kind(&mut self) -> NodeKind {
        std::mem::take(&mut self.kind)
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group)
    }

    pub fn is_alias(&self) -> bool {
        matches!(self.kind, NodeKind::Alias(_))
    }

    /// Returns the concrete value, if this is a value token.
    pub fn value_ref(&self) -> Option<&TokenValue> {
        match &self.kind {
            NodeKind::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn children(&self) -> &IndexMap<String, Node> {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut IndexMap<String, Node> {
        &mut self.children
    }

    pub fn child(&self, key: &str) -> Option<&Node> {
        self.children.get(key)
    }

    pub fn child_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.children.get_mut(key)
    }

    /// Inserts or replaces a child, keeping the position of a replaced key.
    pub fn insert_child(&mut self, key: impl Into<String>, child: Node) {
        self.children.insert(key.into(), child);
    }

    /// Returns the child keys in insertion order.
    pub fn child_keys(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }

    /// Looks up a descendant by path. The empty path returns `self`.
    pub fn get(&self, path: &TokenPath) -> Option<&Node> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.children.get(segment))
    }

    /// Looks up a descendant by path for mutation.
    pub fn get_mut(&mut self, path: &TokenPath) -> Option<&mut Node> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.children.get_mut(segment))
    }

    /// Inserts `node` at `path`, creating intermediate groups as needed.
    ///
    /// Inserting at the root path replaces `self`.
    pub fn insert_path(&mut self, path: &TokenPath, node: Node) {
        let Some((last, parents)) = path.segments().split_last() else {
            *self = node;
            return;
        };
        let mut current = self;
        for segment in parents {
            current = current.children.entry(segment.clone()).or_default();
        }
        current.children.insert(last.clone(), node);
    }

    pub fn platform(&self) -> Option<&Json> {
        self.platform.as_ref()
    }

    pub fn set_platform(&mut self, platform: Option<Json>) {
        self.platform = platform;
    }

    pub fn take_platform(&mut self) -> Option<Json> {
        self.platform.take()
    }

    pub fn meta(&self) -> &TokenMeta {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut TokenMeta {
        &mut self.meta
    }

    /// Turns this node into an error-valued token carrying `message`.
    ///
    /// The kind is replaced, so a failed alias or computation never survives
    /// resolution. Children are left untouched.
    pub fn set_error(&mut self, message: &str) {
        self.kind = NodeKind::Value(TokenValue::String(format!("<ERROR: {message}>")));
    }

    /// Returns `true` if this node holds an error sentinel.
    pub fn is_error(&self) -> bool {
        matches!(
            &self.kind,
            NodeKind::Value(TokenValue::String(text)) if text.starts_with("<ERROR: ")
        )
    }

    /// Returns `true` if any node in this subtree still needs resolving.
    pub fn has_unresolved(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Alias(_) | NodeKind::Computed(_) | NodeKind::Generated(_)
        ) || self.children.values().any(Node::has_unresolved)
    }

    /// Collects every value token in depth-first order.
    ///
    /// Value tokens are leaves: their children are not visited. Unresolved
    /// tokens are skipped.
    pub fn leaves(&self) -> Vec<(TokenPath, &Node)> {
        let mut leaves = Vec::new();
        self.collect_leaves(TokenPath::root(), &mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, path: TokenPath, leaves: &mut Vec<(TokenPath, &'a Node)>) {
        for (key, child) in &self.children {
            let child_path = path.child(key.as_str());
            match child.kind {
                NodeKind::Value(_) => leaves.push((child_path, child)),
                NodeKind::Group => child.collect_leaves(child_path, leaves),
                _ => {}
            }
        }
    }

    /// Renders this subtree back to document JSON.
    pub fn to_json(&self) -> Json {
        let mut fields = Map::new();
        match &self.kind {
            NodeKind::Group => {}
            NodeKind::Value(value) => {
                fields.insert(keys::VALUE.into(), value.to_json());
            }
            NodeKind::Alias(target) => {
                fields.insert(keys::ALIAS_OF.into(), target.clone());
            }
            NodeKind::Computed(computation) => {
                fields.insert(keys::COMPUTED.into(), computation.clone());
            }
            NodeKind::Generated(directive) => {
                fields.insert(keys::GENERATE.into(), directive.clone());
            }
        }
        if let Some(platform) = &self.platform {
            fields.insert(keys::PLATFORM.into(), platform.clone());
        }
        if let Some(full_name) = &self.meta.full_name {
            fields.insert(keys::FULL_NAME.into(), Json::String(full_name.clone()));
        }
        if let Some(path) = &self.meta.resolved_alias_path {
            fields.insert(keys::RESOLVED_ALIAS_PATH.into(), serde_json::json!(path));
        }
        if self.meta.was_computed {
            fields.insert(keys::WAS_COMPUTED.into(), Json::Bool(true));
        }
        if let Some(attributes) = &self.meta.attributes {
            fields.insert(keys::ATTRIBUTES.into(), Json::Object(attributes.clone()));
        }
        for (key, extra) in &self.meta.extra {
            fields.insert(key.clone(), extra.clone());
        }
        for (key, child) in &self.children {
            fields.insert(key.clone(), child.to_json());
        }
        Json::Object(fields)
    }
}
