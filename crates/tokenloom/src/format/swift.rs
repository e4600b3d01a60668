//! Swift class of static constants.

use std::fmt::Write;

use super::{Error, FileContext, Format};
use crate::property::Property;

#[derive(Debug, Default, Clone, Copy)]
pub struct SwiftClass;

impl Format for SwiftClass {
    fn format(&self, properties: &[Property], file: &FileContext<'_>) -> Result<String, Error> {
        let class_name = file.class_name.ok_or_else(|| Error::Render {
            format: "ios-swift/class.swift",
            message: format!("no class name given for {}", file.destination),
        })?;

        let mut out = format!(
            "//\n// {}\n//\n\n// Do not edit directly\n// Generated on {}\n\n\
             import UIKit\n\npublic class {class_name} {{\n",
            file.destination,
            file.generated_on()
        );
        for property in properties {
            let _ = writeln!(
                out,
                "    public static let {} = {}",
                property.name,
                property.value.to_display_string()
            );
        }
        out.push_str("}\n");
        Ok(out)
    }
}
