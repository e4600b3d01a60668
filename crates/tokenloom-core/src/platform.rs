//! Build platforms and themes.
//!
//! The set of platforms is closed: every platform has a dedicated build in the
//! `tokenloom` crate, and `platform` override maps in token documents may only
//! use these names.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a platform or theme name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownNameError {
    #[error("unsupported platform `{0}`")]
    Platform(String),

    #[error("unsupported theme `{0}`")]
    Theme(String),
}

/// Output platforms a token tree can be built for.
///
/// The names match the command-line and configuration strings (lowercase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Flat JSON dump of every resolved property.
    Debug,
    /// Grouped, camelCase JSON.
    Json,
    /// HTML reference page.
    Reference,
    /// CSS custom properties that reference each other.
    Css,
    /// CSS custom properties with aliases flattened to values.
    Cssflat,
    /// SCSS variables.
    Scss,
    /// Swift classes.
    Ios,
    /// Grouped JSON for React Native.
    Reactnative,
    /// XAML resource dictionaries.
    Winui,
    /// ES module for React.
    React,
    /// W3C design-tokens format.
    W3c,
    /// Figma Tokens plugin format.
    Figmatokens,
    /// Themed CSS for the design component system.
    Dcs,
}

impl Platform {
    /// Every platform, in build order.
    pub const ALL: [Platform; 13] = [
        Platform::Debug,
        Platform::Json,
        Platform::Reference,
        Platform::Css,
        Platform::Cssflat,
        Platform::Scss,
        Platform::Ios,
        Platform::Reactnative,
        Platform::Winui,
        Platform::React,
        Platform::W3c,
        Platform::Figmatokens,
        Platform::Dcs,
    ];

    /// Returns the lowercase identifier of this platform.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Debug => "debug",
            Platform::Json => "json",
            Platform::Reference => "reference",
            Platform::Css => "css",
            Platform::Cssflat => "cssflat",
            Platform::Scss => "scss",
            Platform::Ios => "ios",
            Platform::Reactnative => "reactnative",
            Platform::Winui => "winui",
            Platform::React => "react",
            Platform::W3c => "w3c",
            Platform::Figmatokens => "figmatokens",
            Platform::Dcs => "dcs",
        }
    }

    /// Returns `true` if building this platform requires a [`Theme`].
    pub fn requires_theme(self) -> bool {
        matches!(self, Platform::Dcs)
    }
}

impl FromStr for Platform {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|platform| platform.as_str() == s)
            .ok_or_else(|| UnknownNameError::Platform(s.to_string()))
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Color themes for platforms that emit one file per theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Highcontrast,
}

impl Theme {
    /// Every theme.
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Highcontrast];

    /// Returns the lowercase identifier of this theme.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Highcontrast => "highcontrast",
        }
    }
}

impl FromStr for Theme {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| UnknownNameError::Theme(s.to_string()))
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
