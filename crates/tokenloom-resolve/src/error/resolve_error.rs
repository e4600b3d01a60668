//! Fatal errors of the loading and resolution lifecycle.
//!
//! Data problems inside a document become [`Diagnostic`](crate::error::Diagnostic)s
//! and error sentinels. A [`ResolveError`] is reserved for inputs that cannot
//! be processed at all and for misuse of the pass API.

use serde_json::Value as Json;
use thiserror::Error;
use tokenloom_core::path::TokenPath;

use crate::error::ErrorCode;

/// A type alias for `Result<T, ResolveError>`.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors that stop loading or resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid token document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("token document must be a JSON object")]
    NotAnObject,

    #[error("token document has unsupported FluentUITokensVersion {0}")]
    UnsupportedVersion(Json),

    #[error("invalid W3C token at `{path}`: {reason}")]
    InvalidW3cToken { path: String, reason: String },

    #[error("unknown generation type `{kind}` at `{path}`")]
    UnknownGenerationType { path: TokenPath, kind: String },

    #[error("{pass} was called on `{path}`, which is not {expected}")]
    Precondition {
        pass: &'static str,
        path: TokenPath,
        expected: &'static str,
    },
}

impl ResolveError {
    /// Returns the diagnostic code matching this error, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ResolveError::Json(_) | ResolveError::NotAnObject => Some(ErrorCode::E001),
            ResolveError::UnsupportedVersion(_) => Some(ErrorCode::E002),
            ResolveError::InvalidW3cToken { .. } => Some(ErrorCode::E003),
            ResolveError::UnknownGenerationType { .. } => Some(ErrorCode::E300),
            ResolveError::Precondition { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_display() {
        let err = ResolveError::Precondition {
            pass: "alias resolution",
            path: TokenPath::parse("Global.Color.Blue").unwrap(),
            expected: "an alias token",
        };
        assert_eq!(
            err.to_string(),
            "alias resolution was called on `Global.Color.Blue`, which is not an alias token"
        );
        assert_eq!(err.code(), None);
    }

    #[test]
    fn test_unsupported_version_code() {
        let err = ResolveError::UnsupportedVersion(serde_json::json!(2));
        assert_eq!(err.to_string(), "token document has unsupported FluentUITokensVersion 2");
        assert_eq!(err.code(), Some(ErrorCode::E002));
    }
}
