//! Output formats.
//!
//! This module provides the [`Format`] trait that renders a transformed
//! property list into the text of one output file. It is the final stage of
//! a platform build.
//!
//! # Pipeline Position
//!
//! ```text
//! Resolved Token Tree
//!     ↓ flatten
//! Properties
//!     ↓ transform group
//! Platform Properties
//!     ↓ filter + format (this module)
//! Output File
//! ```
//!
//! # Available Formats
//!
//! - [`css`] - CSS and SCSS variables
//! - [`swift`] - a Swift class of constants
//! - [`xaml`] - XAML resource dictionaries
//! - [`json`] - flat debug JSON and grouped JSON
//! - [`w3c`] - W3C design tokens and Figma Tokens documents
//! - [`html`] - the HTML reference page
//! - [`javascript`] - ES module exports
//!
//! # Error Handling
//!
//! Formats return [`Error`], which converts into
//! [`TokenloomError::Format`](crate::TokenloomError::Format) at the crate
//! boundary.

pub mod css;
pub mod html;
pub mod javascript;
pub mod json;
pub mod swift;
pub mod w3c;
pub mod xaml;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value as Json};
use thiserror::Error;

use tokenloom_core::platform::Theme;

use crate::property::Property;

/// Abstraction for output formats.
///
/// Implementors receive the properties selected for one file, in document
/// order, after every transform of the build has run.
pub trait Format {
    /// Renders `properties` as the contents of the file described by `file`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the properties cannot be represented in
    /// this format, or [`Error::Json`] if JSON serialization fails.
    fn format(&self, properties: &[Property], file: &FileContext<'_>) -> Result<String, Error>;
}

/// What a format knows about the file it is writing.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path of the file, relative to the output directory.
    pub destination: &'a str,
    /// Name of the generated class, for formats that wrap tokens in one.
    pub class_name: Option<&'a str>,
    /// Theme the build was run for, if any.
    pub theme: Option<Theme>,
    pub generated_at: DateTime<Utc>,
}

impl FileContext<'_> {
    /// Returns the generation time the way HTTP dates are written, for
    /// "Generated on" headers.
    pub fn generated_on(&self) -> String {
        self.generated_at
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string()
    }

    /// Returns the generation time as an RFC 3339 timestamp.
    pub fn generated_at_iso(&self) -> String {
        self.generated_at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Errors that can occur while rendering an output file.
#[derive(Debug, Error)]
pub enum Error {
    /// A format could not represent the given properties.
    #[error("{format}: {message}")]
    Render {
        format: &'static str,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Escapes the characters XML and HTML treat as markup.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Inserts `value` under `key`, inside the nested groups named by `groups`.
///
/// Missing groups are created. A value found where a group is needed is
/// replaced by the group.
pub(crate) fn insert_nested(
    object: &mut Map<String, Json>,
    groups: &[String],
    key: String,
    value: Json,
) {
    let Some((first, rest)) = groups.split_first() else {
        object.insert(key, value);
        return;
    };
    let entry = object
        .entry(first.clone())
        .or_insert_with(|| Json::Object(Map::new()));
    if !entry.is_object() {
        *entry = Json::Object(Map::new());
    }
    if let Json::Object(group) = entry {
        insert_nested(group, rest, key, value);
    }
}

/// Serializes `value` with one tab per indentation level.
pub(crate) fn to_tab_indented_json(value: &Json) -> Result<String, Error> {
    use serde::Serialize;

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|err| Error::Render {
        format: "json",
        message: err.to_string(),
    })
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{test_support::file, *};

    #[test]
    fn test_timestamps() {
        let context = file("out.css");
        assert_eq!(context.generated_on(), "Tue, 05 Mar 2024 14:07:09 GMT");
        assert_eq!(context.generated_at_iso(), "2024-03-05T14:07:09.000Z");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_xml("\"quoted\""), "\"quoted\"");
    }

    #[test]
    fn test_tab_indented_json() {
        let text = to_tab_indented_json(&json!({ "a": { "b": 1 } })).unwrap();
        assert_eq!(text, "{\n\t\"a\": {\n\t\t\"b\": 1\n\t}\n}");
    }
}
