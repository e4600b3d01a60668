//! CSS custom properties and SCSS variables.

use std::fmt::Write;

use super::{Error, FileContext, Format};
use crate::property::Property;

/// Writes `--name: value;` declarations.
///
/// The declarations are scoped to `:root`, or to the theme's
/// `[data-theme="..."]` selector when the build has a theme.
#[derive(Debug, Default, Clone, Copy)]
pub struct CssVariables;

impl Format for CssVariables {
    fn format(&self, properties: &[Property], file: &FileContext<'_>) -> Result<String, Error> {
        let selector = match file.theme {
            Some(theme) => format!("[data-theme=\"{}\"]", theme.as_str()),
            None => ":root".to_string(),
        };

        let mut out = format!(
            "/**\n * Do not edit directly\n * Generated on {}\n */\n\n{selector} {{\n",
            file.generated_on()
        );
        for property in properties {
            let _ = writeln!(
                out,
                "  --{}: {};",
                property.name,
                property.value.to_display_string()
            );
        }
        out.push_str("}\n");
        Ok(out)
    }
}

/// Writes `$name: value;` declarations.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScssVariables;

impl Format for ScssVariables {
    fn format(&self, properties: &[Property], file: &FileContext<'_>) -> Result<String, Error> {
        let mut out = format!(
            "// Do not edit directly\n// Generated on {}\n\n",
            file.generated_on()
        );
        for property in properties {
            let _ = writeln!(
                out,
                "${}: {};",
                property.name,
                property.value.to_display_string()
            );
        }
        Ok(out)
    }
}
