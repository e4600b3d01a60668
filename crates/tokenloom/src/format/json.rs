//! JSON output: a flat debug dump and the grouped camelCase document used by
//! web and React Native code.

use serde_json::{Map, Value as Json};

use tokenloom_core::path::{GLOBAL_NAMESPACE, SET_NAMESPACE};

use super::{Error, FileContext, Format, insert_nested, to_tab_indented_json};
use crate::{
    naming::camel_case,
    property::{Property, sort_for_readability},
};

/// Writes `{ "name": value }` for every property, in document order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatJson;

impl Format for FlatJson {
    fn format(&self, properties: &[Property], _: &FileContext<'_>) -> Result<String, Error> {
        let tokens: Map<String, Json> = properties
            .iter()
            .map(|property| (property.name.clone(), property.value.to_json()))
            .collect();
        Ok(serde_json::to_string_pretty(&Json::Object(tokens))?)
    }
}

/// Groups tokens into a two- or three-level object keyed by camelCase names.
///
/// Global tokens are grouped by category and, when deep enough, by the next
/// segment (`Global.Color.Grey.94` is `color.grey["94"]`). Set tokens are
/// grouped by their set, and control tokens by their control.
#[derive(Debug, Default, Clone, Copy)]
pub struct GroupedJson;

/// Where a token lands in the grouped document.
#[derive(Debug, PartialEq)]
struct Placement {
    group: String,
    subgroup: Option<String>,
    key: String,
}

fn placement(property: &Property) -> Placement {
    let path = property.path.segments();
    let camel = |index: usize| camel_case(&path[index]);

    let mut group = camel(0);
    let mut subgroup = None;
    let mut start = 1;
    let is_global = path[0] == GLOBAL_NAMESPACE;
    if is_global && path.len() > 3 {
        start = 3;
        group = camel(1);
        subgroup = Some(camel(2));
    } else if (is_global || path[0] == SET_NAMESPACE) && path.len() > 2 {
        start = 2;
        group = camel(1);
    }
    if path.len() > 2 && path[1] == "Base" {
        start = 2;
    }
    let start = start.min(path.len() - 1);

    Placement {
        group,
        subgroup,
        key: camel_case(&path[start..].join(" ")),
    }
}

impl Format for GroupedJson {
    fn format(&self, properties: &[Property], _: &FileContext<'_>) -> Result<String, Error> {
        let mut sorted = properties.to_vec();
        sort_for_readability(&mut sorted);

        let mut tokens = Map::new();
        for property in &sorted {
            if property.path.is_empty() {
                continue;
            }
            let Placement {
                group,
                subgroup,
                key,
            } = placement(property);
            let groups: Vec<String> = std::iter::once(group).chain(subgroup).collect();
            insert_nested(&mut tokens, &groups, key, property.value.to_json());
        }
        to_tab_indented_json(&Json::Object(tokens))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokenloom_core::value::TokenValue;

    use super::*;
    use crate::{format::test_support::file, transform::test_support::property};

    fn token(dotted: &str, value: &str) -> Property {
        let mut property = property(dotted, TokenValue::String(value.into()), None);
        property.name = property.export_path().join("");
        property
    }

    fn place(dotted: &str) -> (String, Option<String>, String) {
        let Placement {
            group,
            subgroup,
            key,
        } = placement(&token(dotted, ""));
        (group, subgroup, key)
    }

    #[test]
    fn test_placements() {
        assert_eq!(
            place("Global.Color.Grey.94"),
            ("color".into(), Some("grey".into()), "94".into())
        );
        assert_eq!(place("Global.Color.Blue"), ("color".into(), None, "blue".into()));
        assert_eq!(
            place("Set.Accent.Fill.Rest"),
            ("accent".into(), None, "fillRest".into())
        );
        assert_eq!(
            place("Button.Rest.Corner.Radius"),
            ("button".into(), None, "restCornerRadius".into())
        );
        assert_eq!(place("Set.Base.Size"), ("base".into(), None, "size".into()));
    }

    #[test]
    fn test_grouped_document() {
        let properties = [
            token("Set.Accent.Fill.Rest", "#0078d4"),
            token("Global.Color.Grey.10", "#1a1a1a"),
            token("Global.Color.Blue", "#0000ff"),
            token("Global.Color.Grey.2", "#050505"),
        ];
        let text = GroupedJson.format(&properties, &file("json/grouped.json")).unwrap();
        let document: Json = serde_json::from_str(&text).unwrap();

        assert_eq!(
            document,
            json!({
                "color": {
                    "blue": "#0000ff",
                    "grey": { "2": "#050505", "10": "#1a1a1a" },
                },
                "accent": { "fillRest": "#0078d4" },
            })
        );
        assert!(text.contains("\n\t\"color\": {\n"));
    }

    #[test]
    fn test_flat_json() {
        let mut blue = token("Global.Color.Blue", "#0000ff");
        blue.name = "Global.Color.Blue".into();
        let text = FlatJson.format(&[blue], &file("debug.json")).unwrap();
        assert_eq!(text, "{\n  \"Global.Color.Blue\": \"#0000ff\"\n}");
    }
}
