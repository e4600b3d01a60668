//! Collector for accumulating diagnostics during resolution.
//!
//! Data errors never stop a pass. Each pass reports problems to a
//! [`DiagnosticCollector`] and keeps going, so one run surfaces every broken
//! token at once.

use log::trace;

use crate::error::Diagnostic;

/// A collector for accumulating diagnostics across passes.
///
/// # Example
///
/// ```
/// # use tokenloom_resolve::error::{Diagnostic, DiagnosticCollector, ErrorCode};
///
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(Diagnostic::error("alias target `Foo` does not exist").with_code(ErrorCode::E101));
/// collector.emit(Diagnostic::warning("alias also has a value").with_code(ErrorCode::E004));
///
/// assert!(collector.has_errors());
/// assert_eq!(collector.into_diagnostics().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// The diagnostic is added to the collection and if it's an error,
    /// the collector is marked as having errors.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        trace!(diagnostic:%; "Diagnostic emitted");
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if any error-severity diagnostic was emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Returns `true` if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns the diagnostics emitted so far, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Finish collection, returning every diagnostic including warnings.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_new_is_empty() {
        let collector = DiagnosticCollector::new();
        assert!(collector.is_empty());
        assert!(!collector.has_errors());
    }

    #[test]
    fn test_collector_warning_is_not_error() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::warning("test warning"));

        assert!(!collector.has_errors());
        assert_eq!(collector.diagnostics().len(), 1);
    }

    #[test]
    fn test_collector_keeps_order_and_warnings() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::error("error 1"));
        collector.emit(Diagnostic::warning("warning 1"));
        collector.emit(Diagnostic::error("error 2"));

        assert!(collector.has_errors());
        let messages: Vec<_> = collector
            .into_diagnostics()
            .iter()
            .map(|diag| diag.message().to_string())
            .collect();
        assert_eq!(messages, vec!["error 1", "warning 1", "error 2"]);
    }
}
