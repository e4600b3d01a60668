//! Error and diagnostic system for token resolution.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Token paths locating each problem
//! - Severity levels
//! - Diagnostic collector for accumulating data errors across passes
//!
//! # Overview
//!
//! Data errors in a document (a dangling alias, a bad opacity) are reported
//! as [`Diagnostic`]s and never abort a build: the offending token gets an
//! `<ERROR: ...>` sentinel value instead. Inputs that cannot be processed at
//! all, and misuse of the pass API, are returned as [`ResolveError`].
//!
//! # Example
//!
//! ```
//! # use tokenloom_core::path::TokenPath;
//! # use tokenloom_resolve::error::{Diagnostic, ErrorCode};
//!
//! let diag = Diagnostic::error("alias target `Global.Color.Bleu` does not exist")
//!     .with_code(ErrorCode::E101)
//!     .with_path(TokenPath::parse("Set.Accent").unwrap())
//!     .with_help("aliasOf must name an existing token");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod resolve_error;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use resolve_error::{ResolveError, Result};
pub use severity::Severity;
