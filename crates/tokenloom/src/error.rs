//! Error types for Tokenloom operations.
//!
//! This module provides the main error type [`TokenloomError`] which wraps
//! the fatal conditions that can stop a build. Problems inside a token
//! document are not errors: they are reported as
//! [`Diagnostic`](tokenloom_resolve::error::Diagnostic)s alongside the output.

use std::io;

use thiserror::Error;

use tokenloom_core::platform::{Platform, UnknownNameError};
use tokenloom_resolve::error::ResolveError;

/// The main error type for Tokenloom operations.
///
/// # Source Variants
///
/// The `Load` variant names the input document that could not be read, so
/// that a caller merging several files can point at the right one.
#[derive(Debug, Error)]
pub enum TokenloomError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{source_name}: {err}")]
    Load {
        err: ResolveError,
        source_name: String,
    },

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("{0}")]
    UnknownName(#[from] UnknownNameError),

    #[error("platform `{0}` requires a theme")]
    MissingTheme(Platform),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Format error: {0}")]
    Format(#[from] crate::format::Error),
}

impl TokenloomError {
    /// Create a new `Load` error for the named input document.
    pub fn new_load_error(err: ResolveError, source_name: impl Into<String>) -> Self {
        Self::Load {
            err,
            source_name: source_name.into(),
        }
    }

    /// Returns the resolution error behind this error, if there is one.
    pub fn resolve_error(&self) -> Option<&ResolveError> {
        match self {
            Self::Load { err, .. } | Self::Resolve(err) => Some(err),
            _ => None,
        }
    }
}
