//! The core diagnostic type for the Tokenloom error system.
//!
//! A [`Diagnostic`] represents a single data error or warning, located by the
//! path of the token it concerns rather than by a source span.

use std::fmt;

use tokenloom_core::path::TokenPath;

use crate::error::{Severity, error_code::ErrorCode};

/// A diagnostic message about one token.
///
/// Diagnostics carry:
/// - A severity level
/// - An optional error code for documentation and searchability
/// - A primary message describing the issue
/// - The path of the token concerned, when there is one
/// - Optional help text with suggestions
///
/// # Example
///
/// ```text
/// error[E101]: alias target `Global.Color.Bleu` does not exist
///   at Set.Accent.Fill.Color.Rest
///   = help: aliasOf must name an existing token, such as "Global.Color.Blue"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    path: Option<TokenPath>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use tokenloom_core::path::TokenPath;
    /// # use tokenloom_resolve::error::{Diagnostic, ErrorCode};
    ///
    /// let diag = Diagnostic::error("alias target `Global.Color.Bleu` does not exist")
    ///     .with_code(ErrorCode::E101)
    ///     .with_path(TokenPath::parse("Set.Accent").unwrap())
    ///     .with_help("did you mean `Global.Color.Blue`?");
    /// assert!(diag.severity().is_error());
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the path of the token concerned, if any.
    pub fn path(&self) -> Option<&TokenPath> {
        self.path.as_ref()
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the path of the token concerned.
    pub fn with_path(mut self, path: TokenPath) -> Self {
        self.path = Some(path);
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Create a new diagnostic with the given severity and message.
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            path: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(path) = &self.path {
            write!(f, " (at {path})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert!(!diag.severity().is_warning());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.path().is_none());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let path = TokenPath::parse("Set.Accent").unwrap();
        let diag = Diagnostic::warning("alias also has a value")
            .with_code(ErrorCode::E004)
            .with_path(path.clone())
            .with_help("remove either `value` or `aliasOf`");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::E004));
        assert_eq!(diag.path(), Some(&path));
        assert_eq!(diag.help(), Some("remove either `value` or `aliasOf`"));
    }

    #[test]
    fn test_diagnostic_display_with_code_and_path() {
        let diag = Diagnostic::error("circular reference")
            .with_code(ErrorCode::E102)
            .with_path(TokenPath::parse("Set.A").unwrap());

        assert_eq!(diag.to_string(), "error[E102]: circular reference (at Set.A)");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::new(Severity::Warning, "unused platform override");

        assert_eq!(diag.to_string(), "warning: unused platform override");
    }
}
