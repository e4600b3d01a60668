//! Loading token documents.
//!
//! A document is either in the native format, identified by a `Meta` entry
//! carrying `FluentUITokensVersion: 0`, or in the W3C design-tokens format,
//! which is converted to the native format on load. Loaded documents are
//! deep-merged and then classified once into a [`Node`] tree.

use log::{debug, info, trace};
use serde_json::{Map, Value as Json, json};
use tokenloom_core::{
    path::{GLOBAL_NAMESPACE, SET_NAMESPACE, TokenPath},
    tree::{Node, NodeKind, keys},
    value::TokenValue,
};

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode, ResolveError, Result};

/// The top-level key holding document metadata.
pub const META_KEY: &str = "Meta";

const VERSION_KEY: &str = "FluentUITokensVersion";
const SUPPORTED_VERSION: u64 = 0;
const SYSTEM_COLOR_EXTENSION: &str = "com.microsoft.systemcolor";

/// Parses one token document.
///
/// Documents without a `Meta` entry are treated as W3C design-tokens files
/// and converted.
///
/// # Errors
///
/// Returns an error for invalid JSON, a non-object document, an unsupported
/// `FluentUITokensVersion`, or a W3C token that cannot be imported.
///
/// # Examples
///
/// ```
/// use tokenloom_resolve::load::parse_document;
///
/// let doc = parse_document(r#"{ "Meta": { "FluentUITokensVersion": 0 }, "Global": {} }"#).unwrap();
/// assert!(doc.contains_key("Global"));
///
/// assert!(parse_document(r#"{ "Meta": { "FluentUITokensVersion": 3 } }"#).is_err());
/// ```
pub fn parse_document(source: &str) -> Result<Map<String, Json>> {
    let Json::Object(document) = serde_json::from_str::<Json>(source)? else {
        return Err(ResolveError::NotAnObject);
    };

    match document.get(META_KEY) {
        Some(meta) => {
            let version = meta.get(VERSION_KEY).cloned().unwrap_or(Json::Null);
            if version.as_u64() != Some(SUPPORTED_VERSION) {
                return Err(ResolveError::UnsupportedVersion(version));
            }
            debug!(tokens = document.len(); "Parsed native token document");
            Ok(document)
        }
        None => {
            debug!("Document has no Meta entry, converting from W3C format");
            convert_w3c_document(&document)
        }
    }
}

/// Deep-merges documents in order.
///
/// Objects merge recursively; any other value in a later document replaces
/// the earlier one.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tokenloom_resolve::load::merge_documents;
///
/// let base = json!({ "Global": { "A": { "value": 1 }, "B": { "value": 2 } } });
/// let accent = json!({ "Global": { "A": { "value": 10 } } });
/// let merged = merge_documents([base, accent].map(|doc| doc.as_object().unwrap().clone()));
/// assert_eq!(merged["Global"]["A"]["value"], json!(10));
/// assert_eq!(merged["Global"]["B"]["value"], json!(2));
/// ```
pub fn merge_documents<I>(documents: I) -> Map<String, Json>
where
    I: IntoIterator<Item = Map<String, Json>>,
{
    let mut merged = Map::new();
    let mut count = 0usize;
    for document in documents {
        merge_into(&mut merged, document);
        count += 1;
    }
    info!(documents = count, keys = merged.len(); "Merged token documents");
    merged
}

fn merge_into(target: &mut Map<String, Json>, source: Map<String, Json>) {
    for (key, value) in source {
        let Json::Object(incoming) = value else {
            target.insert(key, value);
            continue;
        };
        if let Some(Json::Object(existing)) = target.get_mut(&key) {
            merge_into(existing, incoming);
        } else {
            target.insert(key, Json::Object(incoming));
        }
    }
}

/// Classifies a merged document into a token tree.
///
/// The top-level `Meta` entry is dropped. Nodes carrying both a `value` and an
/// `aliasOf` or `computed` entry are reported, and the alias or computation
/// is kept.
pub fn classify(document: &Map<String, Json>, collector: &mut DiagnosticCollector) -> Node {
    let mut root = Node::group();
    for (key, value) in document {
        if key == META_KEY {
            continue;
        }
        match value {
            Json::Object(fields) => {
                let path = TokenPath::root().child(key.as_str());
                root.insert_child(key.clone(), classify_node(fields, &path, collector));
            }
            other => {
                root.meta_mut().extra.insert(key.clone(), other.clone());
            }
        }
    }
    trace!(tree:? = root; "Classified token tree");
    root
}

/// Classifies a single raw JSON object found at `path`.
pub fn classify_node(
    fields: &Map<String, Json>,
    path: &TokenPath,
    collector: &mut DiagnosticCollector,
) -> Node {
    let value = fields.get(keys::VALUE);
    let alias = fields.get(keys::ALIAS_OF);
    let computed = fields.get(keys::COMPUTED);
    let generate = fields.get(keys::GENERATE);

    let kind = if let Some(target) = alias {
        if value.is_some() || computed.is_some() {
            report_conflict(path, "aliasOf", collector);
        }
        NodeKind::Alias(target.clone())
    } else if let Some(computation) = computed {
        if value.is_some() {
            report_conflict(path, "computed", collector);
        }
        NodeKind::Computed(computation.clone())
    } else if let Some(directive) = generate {
        if value.is_some() {
            report_conflict(path, "generate", collector);
        }
        NodeKind::Generated(directive.clone())
    } else if let Some(value) = value {
        NodeKind::Value(TokenValue::from_json(value))
    } else {
        NodeKind::Group
    };

    let mut node = Node::new(kind);
    node.set_platform(fields.get(keys::PLATFORM).cloned());

    for (key, field) in fields {
        match key.as_str() {
            keys::VALUE | keys::ALIAS_OF | keys::COMPUTED | keys::GENERATE | keys::PLATFORM => {}
            keys::FULL_NAME if field.is_string() => {
                node.meta_mut().full_name = field.as_str().map(str::to_string);
            }
            keys::ATTRIBUTES if field.is_object() => {
                node.meta_mut().attributes = field.as_object().cloned();
            }
            keys::WAS_COMPUTED => {
                node.meta_mut().was_computed = field.as_bool().unwrap_or(false);
            }
            keys::RESOLVED_ALIAS_PATH => {
                node.meta_mut().resolved_alias_path = parse_path_field(field);
            }
            _ => match field {
                Json::Object(child) => {
                    let child_path = path.child(key.as_str());
                    let child = classify_node(child, &child_path, collector);
                    node.insert_child(key.clone(), child);
                }
                other => {
                    node.meta_mut().extra.insert(key.clone(), other.clone());
                }
            },
        }
    }
    node
}

fn report_conflict(path: &TokenPath, kept: &str, collector: &mut DiagnosticCollector) {
    collector.emit(
        Diagnostic::warning(format!(
            "`{path}` has both `value` and `{kept}`; `{kept}` is used"
        ))
        .with_code(ErrorCode::E004)
        .with_path(path.clone())
        .with_help("a token is either a value, an alias, a computation, or a generated set"),
    );
}

fn parse_path_field(field: &Json) -> Option<TokenPath> {
    match field {
        Json::String(dotted) => TokenPath::parse(dotted),
        Json::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(TokenPath::from),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// W3C import
// ---------------------------------------------------------------------------

fn convert_w3c_document(document: &Map<String, Json>) -> Result<Map<String, Json>> {
    let mut converted = Map::new();
    converted.insert(META_KEY.into(), json!({ "FluentUITokensVersion": SUPPORTED_VERSION }));

    let mut set = Map::new();
    for (name, child) in document {
        if is_reserved_w3c_name(name) {
            continue;
        }
        let Json::Object(group) = child else {
            return Err(invalid_w3c(name, "expected a token group"));
        };
        if name == GLOBAL_NAMESPACE {
            converted.insert(name.clone(), Json::Object(convert_w3c_group(group, name)?));
        } else {
            set.insert(name.clone(), Json::Object(convert_w3c_group(group, name)?));
        }
    }
    if !set.is_empty() {
        converted.insert(SET_NAMESPACE.into(), Json::Object(set));
    }
    Ok(converted)
}

fn convert_w3c_group(group: &Map<String, Json>, path: &str) -> Result<Map<String, Json>> {
    let mut converted = Map::new();
    for (name, child) in group {
        if is_reserved_w3c_name(name) {
            continue;
        }
        let child_path = format!("{path}.{name}");
        let Json::Object(fields) = child else {
            return Err(invalid_w3c(&child_path, "expected a token or a token group"));
        };
        let node = if fields.contains_key("$value") {
            convert_w3c_token(fields, &child_path)?
        } else {
            convert_w3c_group(fields, &child_path)?
        };
        converted.insert(name.clone(), Json::Object(node));
    }
    Ok(converted)
}

fn convert_w3c_token(token: &Map<String, Json>, path: &str) -> Result<Map<String, Json>> {
    let raw = token.get("$value").cloned().unwrap_or(Json::Null);
    let alias_target = w3c_alias_target(&raw);

    let Some(kind) = token.get("$type") else {
        return Err(invalid_w3c(path, "missing required $type"));
    };
    let kind = kind.as_str().unwrap_or_default();

    let (value, category, figma_tokens_type, xaml_type) = match kind {
        "color" => {
            let system_color = token
                .get("$extensions")
                .and_then(|extensions| extensions.get(SYSTEM_COLOR_EXTENSION))
                .cloned();
            (system_color.unwrap_or(raw), "color", "color", "SolidColorBrush")
        }
        "dimension" => (number_or_null(&raw), "size", "sizing", "x:Double"),
        "fontFamily" => {
            let value = match &raw {
                Json::Array(families) => Json::String(
                    families
                        .iter()
                        .map(Json::to_string)
                        .collect::<Vec<_>>()
                        .join(","),
                ),
                other => other.clone(),
            };
            (value, "font", "fontFamilies", "FontFamily")
        }
        "fontSize" => (number_or_null(&raw), "size", "fontSizes", "x:Double"),
        "fontWeight" => {
            let weight = leading_number(&raw).map(f64::trunc);
            (json_number(weight), "fontWeight", "fontWeights", "x:Double")
        }
        "shadow" => (convert_w3c_shadow(&raw, path)?, "shadow", "boxShadow", "none"),
        other => {
            return Err(invalid_w3c(path, &format!("unsupported $type `{other}`")));
        }
    };

    let mut converted = Map::new();
    match alias_target {
        Some(target) => {
            converted.insert(keys::ALIAS_OF.into(), Json::String(target));
        }
        None => {
            converted.insert(keys::VALUE.into(), value);
        }
    }
    // Types match the path classifier's, so imported and native tokens export alike.
    converted.insert(
        keys::ATTRIBUTES.into(),
        json!({
            "category": category,
            "w3cType": kind,
            "figmaTokensType": figma_tokens_type,
            "xamlType": xaml_type,
        }),
    );
    Ok(converted)
}

fn convert_w3c_shadow(raw: &Json, path: &str) -> Result<Json> {
    let layers = match raw {
        Json::Array(layers) => layers.clone(),
        other => vec![other.clone()],
    };
    layers
        .iter()
        .map(|layer| {
            let color = layer
                .get("color")
                .and_then(Json::as_str)
                .ok_or_else(|| invalid_w3c(path, "shadow layer without a color"))?;
            let color = match bracketed(color) {
                Some(target) => json!({ "aliasOf": native_alias_target(target) }),
                None => json!({ "value": color }),
            };
            Ok(json!({
                "color": color,
                "x": number_or_null(layer.get("offsetX").unwrap_or(&Json::Null)),
                "y": number_or_null(layer.get("offsetY").unwrap_or(&Json::Null)),
                "blur": number_or_null(layer.get("blur").unwrap_or(&Json::Null)),
            }))
        })
        .collect::<Result<Vec<_>>>()
        .map(Json::Array)
}

fn is_reserved_w3c_name(name: &str) -> bool {
    name.starts_with('$')
}

fn invalid_w3c(path: &str, reason: &str) -> ResolveError {
    ResolveError::InvalidW3cToken {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

fn w3c_alias_target(value: &Json) -> Option<String> {
    let text = value.as_str()?;
    let target = text.strip_prefix('{')?.strip_suffix('}')?;
    Some(native_alias_target(target))
}

/// Accepts both `{a.b}` and `[a.b]`, since some exporters cannot emit braces.
fn bracketed(text: &str) -> Option<&str> {
    text.strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .or_else(|| text.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')))
}

/// Non-global groups are moved under `Set` on import, so references to them
/// move too.
fn native_alias_target(target: &str) -> String {
    let first = target.split('.').next().unwrap_or_default();
    if first == GLOBAL_NAMESPACE || first == SET_NAMESPACE {
        target.to_string()
    } else {
        format!("{SET_NAMESPACE}.{target}")
    }
}

/// Parses the leading number of a JSON number or a string such as `"4px"`.
fn leading_number(value: &Json) -> Option<f64> {
    match value {
        Json::Number(number) => number.as_f64(),
        Json::String(text) => {
            let text = text.trim();
            let end = text
                .char_indices()
                .find(|&(index, c)| {
                    !(c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && index == 0))
                })
                .map_or(text.len(), |(index, _)| index);
            text[..end].parse().ok()
        }
        _ => None,
    }
}

fn number_or_null(value: &Json) -> Json {
    json_number(leading_number(value))
}

fn json_number(number: Option<f64>) -> Json {
    match number {
        Some(number) if number.fract() == 0.0 && number.abs() < 1e15 => json!(number as i64),
        Some(number) => json!(number),
        None => Json::Null,
    }
}
