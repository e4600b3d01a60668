//! Token paths.
//!
//! A [`TokenPath`] is the sequence of key names leading from the document root
//! to a node, such as `Global.Color.Blue`. Paths double as node identities
//! during resolution: two lookups that produce the same path refer to the same
//! node.

use std::fmt;

use serde::Serialize;

/// The namespace prefix that is stripped from exported names.
pub const SET_NAMESPACE: &str = "Set";

/// The namespace holding primitive values.
pub const GLOBAL_NAMESPACE: &str = "Global";

/// A path from the root of a token tree to one of its nodes.
///
/// # Examples
///
/// ```
/// use tokenloom_core::path::TokenPath;
///
/// let path = TokenPath::parse("Global.Color.Blue").unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "Global.Color.Blue");
///
/// let child = path.child("Shade10");
/// assert!(path.is_ancestor_of(&child));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TokenPath(Vec<String>);

impl TokenPath {
    /// The empty path, addressing the root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a dot-delimited path such as `"Global.Color.Blue"`.
    ///
    /// Surrounding whitespace is ignored. Returns `None` for an empty path or
    /// a path containing an empty segment (`"Global..Blue"`).
    pub fn parse(dotted: &str) -> Option<Self> {
        let trimmed = dotted.trim();
        if trimmed.is_empty() {
            return None;
        }
        let segments: Vec<String> = trimmed.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return None;
        }
        Some(Self(segments))
    }

    /// Creates a path from its segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Returns the segments of this path.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the first segment, the namespace of the token.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Returns the last segment, the token's own name.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Returns the segment at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Returns the segment `offset` positions before the end (`1` is the last).
    pub fn from_end(&self, offset: usize) -> Option<&str> {
        self.0
            .len()
            .checked_sub(offset)
            .and_then(|index| self.get(index))
    }

    /// Returns a new path extended by one segment.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.into());
        Self(segments)
    }

    /// Returns the parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Returns `true` if this path is a strict prefix of `other`.
    pub fn is_ancestor_of(&self, other: &TokenPath) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// Returns `true` if the first segment equals `namespace`.
    pub fn is_in(&self, namespace: &str) -> bool {
        self.first() == Some(namespace)
    }

    /// Returns the segments used for exported names: a leading `Set` segment
    /// is stripped when something follows it.
    pub fn export_segments(&self) -> &[String] {
        if self.0.len() > 1 && self.is_in(SET_NAMESPACE) {
            &self.0[1..]
        } else {
            &self.0
        }
    }

    /// Returns the path a token is exported under: its `fullName` as a single
    /// segment when it has one, else [`export_segments`](Self::export_segments).
    pub fn export_path(&self, full_name: Option<&str>) -> TokenPath {
        match full_name {
            Some(name) => Self(vec![name.to_string()]),
            None => Self(self.export_segments().to_vec()),
        }
    }

    /// Joins the segments with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join("."))
    }
}

impl From<Vec<String>> for TokenPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for TokenPath {
    fn from(segments: &[&str]) -> Self {
        Self::from_segments(segments.iter().copied())
    }
}
