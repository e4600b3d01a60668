//! Output properties.
//!
//! A [`Property`] is one value token of a resolved tree, flattened out of the
//! hierarchy so that transforms and formats can treat every token alike. Its
//! [`Attributes`] record what kind of token it is for each output format.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde_json::{Map, Value as Json};

use tokenloom_core::{
    path::{GLOBAL_NAMESPACE, SET_NAMESPACE, TokenPath},
    tree::Node,
    value::TokenValue,
};

/// The semantic category of a token, which selects the value transforms
/// that apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Size,
    StrokeAlignment,
    Color,
    Font,
    FontWeight,
    LetterSpacing,
    Shadow,
    /// A resolved alias. The concrete category is kept in
    /// [`Attributes::alias_category`].
    Alias,
}

impl Category {
    /// Returns the camelCase identifier of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Size => "size",
            Category::StrokeAlignment => "strokeAlignment",
            Category::Color => "color",
            Category::Font => "font",
            Category::FontWeight => "fontWeight",
            Category::LetterSpacing => "letterSpacing",
            Category::Shadow => "shadow",
            Category::Alias => "alias",
        }
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Category::Size,
            Category::StrokeAlignment,
            Category::Color,
            Category::Font,
            Category::FontWeight,
            Category::LetterSpacing,
            Category::Shadow,
            Category::Alias,
        ]
        .into_iter()
        .find(|category| category.as_str() == s)
        .ok_or(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-format type information attached to a property.
///
/// Attribute transforms return a partial `Attributes`; the fields they set
/// replace the property's current ones (see [`Attributes::merge`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub category: Option<Category>,
    /// The category an alias would have had as a plain value.
    pub alias_category: Option<Category>,
    pub xaml_type: Option<String>,
    pub w3c_type: Option<String>,
    pub figma_tokens_type: Option<String>,
    /// Identifier of the resource an alias refers to, for formats that
    /// write references by name.
    pub alias_resource_name: Option<String>,
}

impl Attributes {
    /// Reads attributes preset on a token, such as those added by the W3C
    /// importer. Unknown keys are ignored.
    pub fn from_preset(preset: &Map<String, Json>) -> Self {
        let text = |key: &str| preset.get(key).and_then(Json::as_str).map(str::to_string);
        Self {
            category: text("category").and_then(|category| category.parse().ok()),
            alias_category: text("aliasCategory").and_then(|category| category.parse().ok()),
            xaml_type: text("xamlType"),
            w3c_type: text("w3cType"),
            figma_tokens_type: text("figmaTokensType"),
            alias_resource_name: text("aliasResourceName"),
        }
    }

    /// Overwrites every field that `patch` sets.
    pub fn merge(&mut self, patch: Attributes) {
        fn take<T>(field: &mut Option<T>, patch: Option<T>) {
            if patch.is_some() {
                *field = patch;
            }
        }
        take(&mut self.category, patch.category);
        take(&mut self.alias_category, patch.alias_category);
        take(&mut self.xaml_type, patch.xaml_type);
        take(&mut self.w3c_type, patch.w3c_type);
        take(&mut self.figma_tokens_type, patch.figma_tokens_type);
        take(&mut self.alias_resource_name, patch.alias_resource_name);
    }

    /// Returns the concrete category: the alias category for aliases, the
    /// category otherwise.
    pub fn effective_category(&self) -> Option<Category> {
        self.alias_category.or(self.category)
    }
}

/// A single token as seen by transforms and formats.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Full path in the token tree, including any `Set` namespace.
    pub path: TokenPath,
    /// Export identifier, set by the name transform.
    pub name: String,
    /// Current value, rewritten by value transforms.
    pub value: TokenValue,
    /// Value as resolved, before any transform ran.
    pub original_value: TokenValue,
    pub attributes: Attributes,
    pub full_name: Option<String>,
    pub resolved_alias_path: Option<TokenPath>,
    pub was_computed: bool,
}

impl Property {
    /// Creates a property for the value token at `path`.
    ///
    /// Returns `None` if the node is not a value token.
    pub fn from_node(path: TokenPath, node: &Node) -> Option<Self> {
        let value = node.value_ref()?.clone();
        let meta = node.meta();
        Some(Self {
            name: path.last().unwrap_or_default().to_string(),
            path,
            original_value: value.clone(),
            value,
            attributes: meta
                .attributes
                .as_ref()
                .map(Attributes::from_preset)
                .unwrap_or_default(),
            full_name: meta.full_name.clone(),
            resolved_alias_path: meta.resolved_alias_path.clone(),
            was_computed: meta.was_computed,
        })
    }

    /// Returns the path the token is exported under: its `fullName` when it
    /// has one, else its path without a leading `Set`.
    pub fn export_path(&self) -> TokenPath {
        self.path.export_path(self.full_name.as_deref())
    }

    /// Returns `true` if the token was an alias to a value token.
    pub fn is_alias(&self) -> bool {
        self.resolved_alias_path.is_some()
    }

    /// Returns `true` if resolution replaced the value with an error
    /// placeholder.
    pub fn is_error(&self) -> bool {
        self.value
            .as_str()
            .is_some_and(|text| text.starts_with("<ERROR: "))
    }

    /// Returns the root namespace of the token (`Global`, `Set`, or a
    /// control name).
    pub fn root(&self) -> &str {
        self.path.first().unwrap_or_default()
    }
}

/// Flattens a resolved tree into properties, in document order.
pub fn flatten(tree: &Node) -> Vec<Property> {
    tree.leaves()
        .into_iter()
        .filter_map(|(path, node)| Property::from_node(path, node))
        .collect()
}

/// Sorts properties for human readers.
///
/// `Global` tokens come first, then `Set` tokens, then control tokens.
/// Tokens that differ only in their last segment are ordered by interaction
/// state (`Rest`, `Hover`, `Press`, `Disabled`) and then numerically, so
/// that `Grey.2` precedes `Grey.10`. Everything else is ordered by name.
pub fn sort_for_readability(properties: &mut [Property]) {
    properties.sort_by(compare_for_readability);
}

fn compare_for_readability(a: &Property, b: &Property) -> Ordering {
    let namespace_rank = |property: &Property| match property.root() {
        GLOBAL_NAMESPACE => 0,
        SET_NAMESPACE => 1,
        _ => 2,
    };
    let by_namespace = namespace_rank(a).cmp(&namespace_rank(b));
    if by_namespace != Ordering::Equal {
        return by_namespace;
    }

    if let Some(ordering) = compare_final_segments(&a.path, &b.path) {
        return ordering;
    }
    a.name.cmp(&b.name)
}

/// Compares paths of equal length that agree on every segment but the last.
fn compare_final_segments(a: &TokenPath, b: &TokenPath) -> Option<Ordering> {
    let (a, b) = (a.segments(), b.segments());
    let (Some((last_a, head_a)), Some((last_b, head_b))) = (a.split_last(), b.split_last()) else {
        return None;
    };
    if head_a.len() != head_b.len() || head_a != head_b {
        return None;
    }

    let by_state = interaction_rank(last_a).cmp(&interaction_rank(last_b));
    if by_state != Ordering::Equal {
        return Some(by_state);
    }
    match (leading_integer(last_a), leading_integer(last_b)) {
        (Some(index_a), Some(index_b)) if index_a != index_b => Some(index_a.cmp(&index_b)),
        _ => None,
    }
}

fn interaction_rank(segment: &str) -> u8 {
    match segment {
        "Rest" => 1,
        "Hover" => 2,
        "Press" => 3,
        _ => 4,
    }
}

/// Parses the integer at the start of `segment`, the way `10Percent` reads
/// as `10`.
fn leading_integer(segment: &str) -> Option<i64> {
    let end = segment
        .char_indices()
        .find(|&(index, c)| !(c.is_ascii_digit() || (index == 0 && c == '-')))
        .map_or(segment.len(), |(index, _)| index);
    segment[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn property(dotted: &str) -> Property {
        let path = TokenPath::parse(dotted).unwrap();
        let mut property =
            Property::from_node(path.clone(), &Node::value(TokenValue::Number(1.0))).unwrap();
        property.name = path.join("");
        property
    }

    fn sorted(paths: &[&str]) -> Vec<String> {
        let mut properties: Vec<_> = paths.iter().map(|path| property(path)).collect();
        sort_for_readability(&mut properties);
        properties.iter().map(|p| p.path.to_string()).collect()
    }

    #[test]
    fn test_namespaces_first() {
        assert_eq!(
            sorted(&["Button.Fill", "Set.Accent", "Global.Color.Blue"]),
            vec!["Global.Color.Blue", "Set.Accent", "Button.Fill"]
        );
    }

    #[test]
    fn test_interaction_states_and_numbers() {
        assert_eq!(
            sorted(&[
                "Set.Fill.Disabled",
                "Set.Fill.Hover",
                "Set.Fill.Rest",
                "Set.Fill.Press",
            ]),
            vec!["Set.Fill.Rest", "Set.Fill.Hover", "Set.Fill.Press", "Set.Fill.Disabled"]
        );
        assert_eq!(
            sorted(&["Global.Color.Grey.10", "Global.Color.Grey.2", "Global.Color.Grey.100"]),
            vec!["Global.Color.Grey.2", "Global.Color.Grey.10", "Global.Color.Grey.100"]
        );
    }

    #[test]
    fn test_different_parents_sort_by_name() {
        assert_eq!(
            sorted(&["Set.B.Rest", "Set.A.Hover"]),
            vec!["Set.A.Hover", "Set.B.Rest"]
        );
    }

    #[test]
    fn test_preset_attributes() {
        let mut node = Node::value(TokenValue::Number(600.0));
        node.meta_mut().attributes = json!({ "category": "fontWeight", "w3cType": "fontWeight" })
            .as_object()
            .cloned();
        let property = Property::from_node(TokenPath::parse("Global.Weight").unwrap(), &node).unwrap();

        assert_eq!(property.attributes.category, Some(Category::FontWeight));
        assert_eq!(property.attributes.w3c_type.as_deref(), Some("fontWeight"));
        assert_eq!(property.name, "Weight");
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut attributes = Attributes {
            category: Some(Category::Color),
            xaml_type: Some("SolidColorBrush".into()),
            ..Attributes::default()
        };
        attributes.merge(Attributes {
            category: Some(Category::Alias),
            alias_category: Some(Category::Color),
            ..Attributes::default()
        });

        assert_eq!(attributes.category, Some(Category::Alias));
        assert_eq!(attributes.effective_category(), Some(Category::Color));
        assert_eq!(attributes.xaml_type.as_deref(), Some("SolidColorBrush"));
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("94"), Some(94));
        assert_eq!(leading_integer("10Percent"), Some(10));
        assert_eq!(leading_integer("Rest"), None);
    }

    fn check_sort_is_stable_under_shuffle(indices: Vec<usize>) -> Result<(), TestCaseError> {
        let paths: Vec<String> = (0..indices.len())
            .map(|index| format!("Global.Color.Grey.{}", index * 2))
            .collect();
        let shuffled: Vec<&str> = indices.iter().map(|&index| paths[index].as_str()).collect();
        prop_assert_eq!(sorted(&shuffled), paths);
        Ok(())
    }

    proptest! {
        #[test]
        fn sort_is_stable_under_shuffle(
            indices in (1usize..12).prop_flat_map(|len| Just((0..len).collect::<Vec<_>>()).prop_shuffle())
        ) {
            check_sort_is_stable_under_shuffle(indices)?;
        }
    }
}
