//! Error codes for the Tokenloom diagnostic system.
//!
//! Error codes are organized by stage:
//! - `E0xx` - Document loading
//! - `E1xx` - Alias resolution
//! - `E2xx` - Computed values
//! - `E3xx` - Generated sets
//! - `E4xx` - Platform overrides
//! - `E5xx` - Transforms

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Loading Errors (E0xx)
    // =========================================================================
    /// Invalid JSON.
    ///
    /// The input file is not syntactically valid JSON, or is not an object.
    E001,

    /// Unsupported document version.
    ///
    /// `Meta.FluentUITokensVersion` is present but is not `0`.
    E002,

    /// Invalid W3C token.
    ///
    /// A W3C-format token has no `$type`, or a `$type` that cannot be imported.
    E003,

    /// Conflicting token kinds.
    ///
    /// A node has both a `value` and an `aliasOf` or `computed` entry. The
    /// alias or computation is used.
    E004,

    // =========================================================================
    // Alias Errors (E1xx)
    // =========================================================================
    /// Invalid alias syntax.
    ///
    /// `aliasOf` must be a dot-delimited path string such as `"Global.Color.Blue"`.
    E100,

    /// Missing alias target.
    ///
    /// No node exists at the path named by `aliasOf`.
    E101,

    /// Circular alias reference.
    ///
    /// Following the alias chain leads back to the alias itself or one of
    /// its ancestors.
    E102,

    /// Unresolvable shadow color.
    ///
    /// A shadow layer's color alias does not lead to a concrete color.
    E103,

    // =========================================================================
    // Computed Errors (E2xx)
    // =========================================================================
    /// Invalid computed syntax.
    ///
    /// `computed` must be an object.
    E200,

    /// Missing computation input.
    ///
    /// The token named by `computed.color` does not exist.
    E201,

    /// Invalid computation input value.
    ///
    /// The input token has no string value.
    E202,

    /// Invalid opacity.
    ///
    /// `computed.opacity` is not a number.
    E203,

    /// Unknown computation.
    ///
    /// The computation is not one of the supported kinds.
    E204,

    // =========================================================================
    // Generation Errors (E3xx)
    // =========================================================================
    /// Invalid generation directive.
    ///
    /// `generate` must be an object with string `type` and `value` entries.
    E300,

    /// Non-concrete generation seed.
    ///
    /// The seed `value` looks like a reference rather than a color.
    E301,

    /// Invalid seed color.
    ///
    /// The seed `value` is not a valid color.
    E302,

    // =========================================================================
    // Override Errors (E4xx)
    // =========================================================================
    /// Invalid platform override.
    ///
    /// `platform` must be an object whose entries are objects.
    E400,

    /// Unknown override platform.
    ///
    /// A `platform` entry names a platform that does not exist.
    E401,

    /// Override on a value token.
    ///
    /// A node with a `value` may not carry platform overrides.
    E402,

    // =========================================================================
    // Transform Errors (E5xx)
    // =========================================================================
    /// Unclassifiable token.
    ///
    /// No category could be inferred from the token's path.
    E500,

    /// Unsupported value for transform.
    ///
    /// A transform matched the token but could not convert its value.
    E501,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E400 => "E400",
            ErrorCode::E401 => "E401",
            ErrorCode::E402 => "E402",
            ErrorCode::E500 => "E500",
            ErrorCode::E501 => "E501",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "invalid JSON",
            ErrorCode::E002 => "unsupported document version",
            ErrorCode::E003 => "invalid W3C token",
            ErrorCode::E004 => "conflicting token kinds",
            ErrorCode::E100 => "invalid alias syntax",
            ErrorCode::E101 => "missing alias target",
            ErrorCode::E102 => "circular alias reference",
            ErrorCode::E103 => "unresolvable shadow color",
            ErrorCode::E200 => "invalid computed syntax",
            ErrorCode::E201 => "missing computation input",
            ErrorCode::E202 => "invalid computation input value",
            ErrorCode::E203 => "invalid opacity",
            ErrorCode::E204 => "unknown computation",
            ErrorCode::E300 => "invalid generation directive",
            ErrorCode::E301 => "non-concrete generation seed",
            ErrorCode::E302 => "invalid seed color",
            ErrorCode::E400 => "invalid platform override",
            ErrorCode::E401 => "unknown override platform",
            ErrorCode::E402 => "override on value token",
            ErrorCode::E500 => "unclassifiable token",
            ErrorCode::E501 => "unsupported value for transform",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
