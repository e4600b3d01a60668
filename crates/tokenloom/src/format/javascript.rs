//! ES module of exported constants.

use std::fmt::Write;

use super::{Error, FileContext, Format};
use crate::property::Property;

/// Writes `export const name = value;` per token, values as JSON literals.
#[derive(Debug, Default, Clone, Copy)]
pub struct Es6Module;

impl Format for Es6Module {
    fn format(&self, properties: &[Property], file: &FileContext<'_>) -> Result<String, Error> {
        let mut out = format!(
            "/**\n * Do not edit directly\n * Generated on {}\n */\n\n",
            file.generated_on()
        );
        for property in properties {
            let value = serde_json::to_string(&property.value.to_json())?;
            let _ = writeln!(out, "export const {} = {value};", property.name);
        }
        Ok(out)
    }
}
