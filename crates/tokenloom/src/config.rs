//! Configuration types for Tokenloom builds.
//!
//! This module provides configuration structures that tune how tokens are
//! named and rendered for individual platforms. All types implement
//! [`serde::Deserialize`] so they can be loaded from a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`NamingConfig`] - Prefix prepended to camelCase and PascalCase names.
//! - [`WinuiConfig`] - XAML-specific limits.
//! - [`IosConfig`] - Swift class naming.
//!
//! # Example
//!
//! ```
//! # use tokenloom::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.winui().max_corner_radius(), 18.0);
//! assert_eq!(config.ios().class_prefix(), "FluentUI");
//! assert!(config.naming().prefix().is_none());
//! ```

use serde::Deserialize;

const DEFAULT_MAX_CORNER_RADIUS: f64 = 18.0;
const DEFAULT_CLASS_PREFIX: &str = "FluentUI";

/// Top-level configuration for token builds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Naming configuration section.
    #[serde(default)]
    naming: NamingConfig,

    /// WinUI configuration section.
    #[serde(default)]
    winui: WinuiConfig,

    /// iOS configuration section.
    #[serde(default)]
    ios: IosConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `naming` - Name prefix settings.
    /// * `winui` - XAML output settings.
    /// * `ios` - Swift output settings.
    pub fn new(naming: NamingConfig, winui: WinuiConfig, ios: IosConfig) -> Self {
        Self { naming, winui, ios }
    }

    /// Returns the naming configuration.
    pub fn naming(&self) -> &NamingConfig {
        &self.naming
    }

    /// Returns the WinUI configuration.
    pub fn winui(&self) -> &WinuiConfig {
        &self.winui
    }

    /// Returns the iOS configuration.
    pub fn ios(&self) -> &IosConfig {
        &self.ios
    }
}

/// Settings shared by the camelCase and PascalCase name transforms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamingConfig {
    /// Word prepended to every generated name, such as `"Fluent"`.
    #[serde(default)]
    prefix: Option<String>,
}

impl NamingConfig {
    /// Creates a naming configuration with the given prefix.
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Returns the name prefix, if one is configured.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

/// Settings for XAML resource dictionaries.
#[derive(Debug, Clone, Deserialize)]
pub struct WinuiConfig {
    /// Largest corner radius written to a `CornerRadius` resource.
    ///
    /// WinUI turns an oversized radius into an oval rather than a pill.
    #[serde(default = "default_max_corner_radius")]
    max_corner_radius: f64,
}

impl Default for WinuiConfig {
    fn default() -> Self {
        Self {
            max_corner_radius: DEFAULT_MAX_CORNER_RADIUS,
        }
    }
}

impl WinuiConfig {
    /// Creates a WinUI configuration with the given corner radius limit.
    pub fn new(max_corner_radius: f64) -> Self {
        Self { max_corner_radius }
    }

    /// Returns the corner radius limit.
    pub fn max_corner_radius(&self) -> f64 {
        self.max_corner_radius
    }
}

/// Settings for Swift output.
#[derive(Debug, Clone, Deserialize)]
pub struct IosConfig {
    /// Prefix of the generated class names (`{prefix}Tokens`, `{prefix}ColorTokens`, ...).
    #[serde(default = "default_class_prefix")]
    class_prefix: String,
}

impl Default for IosConfig {
    fn default() -> Self {
        Self {
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
        }
    }
}

impl IosConfig {
    /// Creates an iOS configuration with the given class prefix.
    pub fn new(class_prefix: impl Into<String>) -> Self {
        Self {
            class_prefix: class_prefix.into(),
        }
    }

    /// Returns the class name prefix.
    pub fn class_prefix(&self) -> &str {
        &self.class_prefix
    }
}

fn default_max_corner_radius() -> f64 {
    DEFAULT_MAX_CORNER_RADIUS
}

fn default_class_prefix() -> String {
    DEFAULT_CLASS_PREFIX.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [naming]
            prefix = "Fluent"
            "#,
        )
        .unwrap();

        assert_eq!(config.naming().prefix(), Some("Fluent"));
        assert_eq!(config.winui().max_corner_radius(), 18.0);
        assert_eq!(config.ios().class_prefix(), "FluentUI");
    }

    #[test]
    fn test_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [winui]
            max_corner_radius = 24

            [ios]
            class_prefix = "Contoso"
            "#,
        )
        .unwrap();

        assert_eq!(config.winui().max_corner_radius(), 24.0);
        assert_eq!(config.ios().class_prefix(), "Contoso");
    }
}
