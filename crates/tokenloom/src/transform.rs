//! Property transforms.
//!
//! A [`Transform`] rewrites one aspect of a [`Property`]: its export name, its
//! attributes, or its value. Platform builds run an ordered group of
//! transforms over every property before handing the list to a format.
//!
//! # Pipeline Position
//!
//! ```text
//! Resolved Token Tree
//!     ↓ flatten
//! Properties
//!     ↓ transform group (this module)
//! Platform Properties
//!     ↓ filter + format
//! Output Files
//! ```
//!
//! # Built-in Transforms
//!
//! - [`shared`] - classification, alias flattening, and debug names
//! - [`css`] - CSS and SCSS custom properties
//! - [`winui`] - XAML resources
//! - [`swift`] - Swift constants
//! - [`json`] - grouped JSON for web and React Native
//! - [`w3c`] - W3C design-tokens files
//! - [`figma`] - Figma Tokens plugin files
//! - [`dcs`] - themed CSS for the design component system
//! - [`react`] - ES modules for React
//! - [`reference`] - the HTML reference page
//!
//! # Error Handling
//!
//! A transform that cannot handle a value returns a [`Diagnostic`]. The value
//! is left unchanged and the diagnostic is reported with the token's path.

pub mod css;
pub mod dcs;
pub mod figma;
pub mod json;
pub mod react;
pub mod reference;
pub mod shared;
pub mod swift;
pub mod w3c;
pub mod winui;

use std::fmt;

use log::trace;

use tokenloom_core::value::TokenValue;
use tokenloom_resolve::error::{Diagnostic, DiagnosticCollector, ErrorCode};

use crate::{
    config::AppConfig,
    property::{Attributes, Category, Property},
};

/// Result of a single transform step.
pub type TransformResult<T> = Result<T, Diagnostic>;

/// Decides whether a transform applies to a property.
pub type Matcher = fn(&Property) -> bool;

/// What a transform rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Name,
    Attribute,
    Value,
}

#[derive(Clone, Copy)]
enum Action {
    Name(fn(&Property, &AppConfig) -> String),
    Attribute(fn(&Property, &AppConfig) -> TransformResult<Attributes>),
    Value(fn(&Property, &AppConfig) -> TransformResult<TokenValue>),
}

/// A named property transform.
///
/// # Examples
///
/// ```
/// use tokenloom::{config::AppConfig, property::Property, transform::Transform};
/// use tokenloom_core::{path::TokenPath, tree::Node, value::TokenValue};
///
/// let upper = Transform::naming("example/name/upper", |property, _| {
///     property.path.join("_").to_uppercase()
/// });
///
/// let node = Node::value(TokenValue::Number(4.0));
/// let mut property = Property::from_node(TokenPath::parse("Global.Size.Small").unwrap(), &node).unwrap();
/// upper.apply(&mut property, &AppConfig::default()).unwrap();
/// assert_eq!(property.name, "GLOBAL_SIZE_SMALL");
/// ```
#[derive(Clone, Copy)]
pub struct Transform {
    name: &'static str,
    matcher: Option<Matcher>,
    action: Action,
}

impl Transform {
    /// Creates a transform that sets the property's export name.
    pub fn naming(name: &'static str, transformer: fn(&Property, &AppConfig) -> String) -> Self {
        Self::new(name, Action::Name(transformer))
    }

    /// Creates a transform whose returned attributes are merged into the
    /// property's attributes.
    pub fn attribute(
        name: &'static str,
        transformer: fn(&Property, &AppConfig) -> TransformResult<Attributes>,
    ) -> Self {
        Self::new(name, Action::Attribute(transformer))
    }

    /// Creates a transform that replaces the property's value.
    pub fn value(
        name: &'static str,
        transformer: fn(&Property, &AppConfig) -> TransformResult<TokenValue>,
    ) -> Self {
        Self::new(name, Action::Value(transformer))
    }

    fn new(name: &'static str, action: Action) -> Self {
        Self {
            name,
            matcher: None,
            action,
        }
    }

    /// Restricts the transform to properties accepted by `matcher`.
    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Returns the registered name of this transform.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns what this transform rewrites.
    pub fn kind(&self) -> TransformKind {
        match self.action {
            Action::Name(_) => TransformKind::Name,
            Action::Attribute(_) => TransformKind::Attribute,
            Action::Value(_) => TransformKind::Value,
        }
    }

    /// Returns `true` if this transform applies to `property`.
    ///
    /// Value transforms never apply to error placeholders; the problem behind
    /// them has already been reported.
    pub fn matches(&self, property: &Property) -> bool {
        if self.kind() == TransformKind::Value && property.is_error() {
            return false;
        }
        self.matcher.is_none_or(|matcher| matcher(property))
    }

    /// Applies this transform to `property` if it matches.
    ///
    /// # Errors
    ///
    /// Returns a diagnostic if the property's value or path is not supported.
    /// The property is left unchanged in that case.
    pub fn apply(&self, property: &mut Property, config: &AppConfig) -> TransformResult<()> {
        if !self.matches(property) {
            return Ok(());
        }
        match self.action {
            Action::Name(transformer) => property.name = transformer(property, config),
            Action::Attribute(transformer) => {
                let patch = transformer(property, config)?;
                property.attributes.merge(patch);
            }
            Action::Value(transformer) => property.value = transformer(property, config)?,
        }
        Ok(())
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("matcher", &self.matcher.is_some())
            .finish()
    }
}

/// Runs every transform of `group`, in order, over every property.
pub fn run_group(
    group: &[Transform],
    properties: &mut [Property],
    config: &AppConfig,
    collector: &mut DiagnosticCollector,
) {
    for property in properties.iter_mut() {
        for transform in group {
            if let Err(diagnostic) = transform.apply(property, config) {
                collector.emit(diagnostic.with_path(property.path.clone()));
            }
        }
        trace!(path:% = property.path, name = property.name.as_str(); "Property transformed");
    }
}

/// Returns `true` if `property` currently has the given category.
pub fn category_is(property: &Property, category: Category) -> bool {
    property.attributes.category == Some(category)
}

/// Builds the diagnostic for a value a transform cannot convert.
pub(crate) fn unsupported_value(property: &Property, help: impl Into<String>) -> Diagnostic {
    Diagnostic::warning(format!(
        "unsupported value {} for token {}",
        property.value.to_display_string(),
        property.path
    ))
    .with_code(ErrorCode::E501)
    .with_help(help)
}

/// Builds the error for a value the target format cannot represent at all.
pub(crate) fn unexportable_value(property: &Property, help: impl Into<String>) -> Diagnostic {
    Diagnostic::error(format!(
        "can't export token {} = \"{}\"",
        property.path,
        property.value.to_display_string()
    ))
    .with_code(ErrorCode::E501)
    .with_help(help)
}

/// Wraps transformed text as a token value.
pub(crate) fn text(value: impl Into<String>) -> TokenValue {
    TokenValue::String(value.into())
}


#[cfg(test)]
mod tests {
    use tokenloom_core::value::TokenValue;

    use super::{test_support::*, *};

    fn doubled(property: &Property, _: &AppConfig) -> TransformResult<TokenValue> {
        property
            .value
            .as_number()
            .map(|n| TokenValue::Number(n * 2.0))
            .ok_or_else(|| unsupported_value(property, "expected a number"))
    }

    #[test]
    fn test_matcher_and_kind() {
        let transform = Transform::value("test/double", doubled)
            .with_matcher(|property| category_is(property, Category::Size));
        assert_eq!(transform.kind(), TransformKind::Value);

        let mut size = property("Global.Size.Small", TokenValue::Number(4.0), Some(Category::Size));
        transform.apply(&mut size, &config()).unwrap();
        assert_eq!(size.value, TokenValue::Number(8.0));

        let mut color = property("Global.Color.Blue", TokenValue::Number(4.0), Some(Category::Color));
        transform.apply(&mut color, &config()).unwrap();
        assert_eq!(color.value, TokenValue::Number(4.0));
    }

    #[test]
    fn test_error_placeholders_are_not_transformed() {
        let transform = Transform::value("test/double", doubled);
        let mut broken = property(
            "Set.Broken",
            TokenValue::String("<ERROR: Invalid opacity>".into()),
            None,
        );

        assert!(transform.apply(&mut broken, &config()).is_ok());
        assert_eq!(broken.value, TokenValue::String("<ERROR: Invalid opacity>".into()));
    }

    #[test]
    fn test_run_group_reports_with_path() {
        let group = [Transform::value("test/double", doubled)];
        let mut properties = vec![property("Global.Name", TokenValue::String("Segoe".into()), None)];
        let mut collector = DiagnosticCollector::new();

        run_group(&group, &mut properties, &config(), &mut collector);

        let diagnostic = &collector.diagnostics()[0];
        assert_eq!(diagnostic.code(), Some(ErrorCode::E501));
        assert_eq!(diagnostic.path().map(ToString::to_string).as_deref(), Some("Global.Name"));
        assert_eq!(properties[0].value, TokenValue::String("Segoe".into()));
    }
}
