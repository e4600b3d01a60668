//! Nested token documents for W3C design-tokens tools and the Figma Tokens
//! plugin.
//!
//! Both rebuild the token hierarchy from each property's path. Aliases are
//! written as `{dotted.path}` references instead of values.

use serde_json::{Map, Value as Json, json};

use tokenloom_core::{path::SET_NAMESPACE, value::TokenValue};

use super::{Error, FileContext, Format, insert_nested, to_tab_indented_json};
use crate::property::Property;

/// The property's value, or a reference to the token it aliases.
fn value_or_reference(property: &Property) -> Json {
    match &property.resolved_alias_path {
        Some(target) => Json::String(format!("{{{}}}", target.join("."))),
        None => property.value.to_json(),
    }
}

/// Writes a W3C design-tokens document.
///
/// Tokens without a W3C type are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct W3cJson;

impl Format for W3cJson {
    fn format(&self, properties: &[Property], _: &FileContext<'_>) -> Result<String, Error> {
        let mut tokens = Map::new();
        for property in properties {
            let Some(w3c_type) = property.attributes.w3c_type.as_deref() else {
                continue;
            };
            let Some((key, groups)) = property.path.segments().split_last() else {
                continue;
            };
            let w3c_type = match property.original_value {
                TokenValue::Gradient(_) => "gradient",
                _ => w3c_type,
            };
            let token = json!({ "$type": w3c_type, "$value": value_or_reference(property) });
            insert_nested(&mut tokens, groups, key.clone(), token);
        }
        Ok(to_tab_indented_json(&Json::Object(tokens))? + "\n")
    }
}

/// Writes a Figma Tokens document under a single `Fluent` root.
///
/// The `Set` namespace is dropped, and tokens without a Figma type are
/// skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct FigmaTokensJson;

const FIGMA_ROOT: &str = "Fluent";

impl Format for FigmaTokensJson {
    fn format(&self, properties: &[Property], _: &FileContext<'_>) -> Result<String, Error> {
        let mut fluent = Map::new();
        for property in properties {
            let Some(figma_type) = property.attributes.figma_tokens_type.as_deref() else {
                continue;
            };
            let Some((key, groups)) = property.path.segments().split_last() else {
                continue;
            };
            let groups = match groups.first() {
                Some(first) if first == SET_NAMESPACE => &groups[1..],
                _ => groups,
            };
            let token = json!({ "type": figma_type, "value": value_or_reference(property) });
            insert_nested(&mut fluent, groups, key.clone(), token);
        }

        let mut root = Map::new();
        root.insert(FIGMA_ROOT.to_string(), Json::Object(fluent));
        to_tab_indented_json(&Json::Object(root))
    }
}
