//! Attribute classification.
//!
//! Token names follow a loose `Category.Attribute` convention rather than a
//! strict category/type/item hierarchy, so the type of a token is inferred
//! from two segments of its path:
//!
//! | path | segments used |
//! |---|---|
//! | `Global.Stroke.Width.Thin` | `Stroke`, `Width` (then `Stroke` alone on failure) |
//! | `Global.Stroke.Width` | `Stroke`, `Width` |
//! | `Global.Color.Blue` | `Color` alone |
//! | `Set.Accent.Fill.Color.Rest` | `Fill`, `Color` |
//! | `Button.Rest.Corner.Radius` | `Corner`, `Radius` |
//!
//! The category word is optional in `Global` tokens, which is why they are
//! tried twice.

use log::trace;

use tokenloom_core::path::{GLOBAL_NAMESPACE, TokenPath};

use crate::property::{Attributes, Category};

/// Infers the attributes of the token at `path`.
///
/// Alias tokens are classified like plain tokens and then reported as
/// [`Category::Alias`], with the concrete category in
/// [`Attributes::alias_category`].
///
/// Returns `None` if the path matches no known token type.
///
/// # Examples
///
/// ```
/// use tokenloom::{classify::classify, property::Category};
/// use tokenloom_core::path::TokenPath;
///
/// let width = classify(&TokenPath::parse("Global.Stroke.Width.Thin").unwrap(), false).unwrap();
/// assert_eq!(width.category, Some(Category::Size));
/// assert_eq!(width.xaml_type.as_deref(), Some("Thickness"));
///
/// let accent = classify(&TokenPath::parse("Set.Accent.Fill.Color.Rest").unwrap(), true).unwrap();
/// assert_eq!(accent.category, Some(Category::Alias));
/// assert_eq!(accent.alias_category, Some(Category::Color));
/// ```
pub fn classify(path: &TokenPath, is_alias: bool) -> Option<Attributes> {
    let token_type = if path.is_in(GLOBAL_NAMESPACE) {
        path.get(1)
            .zip(path.get(2))
            .filter(|_| path.len() >= 3)
            .and_then(|(category, attribute)| lookup(Some(category), attribute))
            .or_else(|| path.get(1).and_then(|attribute| lookup(None, attribute)))
    } else if path.from_end(2) == Some("Color") {
        lookup(path.from_end(3), "Color")
    } else {
        path.get(3).and_then(|attribute| lookup(path.get(2), attribute))
    }?;

    trace!(path:%, category = token_type.category.as_str(); "Token classified");
    let mut attributes = token_type.to_attributes();
    if is_alias {
        attributes.alias_category = attributes.category;
        attributes.category = Some(Category::Alias);
    }
    Some(attributes)
}

/// A row of the classification table.
#[derive(Debug, Clone, Copy)]
struct TokenType {
    category: Category,
    w3c_type: &'static str,
    figma_tokens_type: Option<&'static str>,
    xaml_type: &'static str,
}

impl TokenType {
    const fn new(
        category: Category,
        w3c_type: &'static str,
        figma_tokens_type: Option<&'static str>,
        xaml_type: &'static str,
    ) -> Self {
        Self {
            category,
            w3c_type,
            figma_tokens_type,
            xaml_type,
        }
    }

    fn to_attributes(self) -> Attributes {
        Attributes {
            category: Some(self.category),
            xaml_type: Some(self.xaml_type.to_string()),
            w3c_type: Some(self.w3c_type.to_string()),
            figma_tokens_type: self.figma_tokens_type.map(str::to_string),
            ..Attributes::default()
        }
    }
}

const SIZE: Category = Category::Size;

/// Looks up the token type named by a category word and an attribute word.
///
/// `Color` is matched in either position, so color sets need not say
/// whether they are fills or strokes.
fn lookup(category: Option<&str>, attribute: &str) -> Option<TokenType> {
    let token_type = match (category, attribute) {
        (Some("Stroke"), "Width") => {
            TokenType::new(SIZE, "dimension", Some("borderWidth"), "Thickness")
        }
        (Some("Stroke"), "Alignment") => {
            TokenType::new(Category::StrokeAlignment, "string", None, "BackgroundSizing")
        }
        (Some("Corner"), "Radius") => {
            TokenType::new(SIZE, "dimension", Some("borderRadius"), "CornerRadius")
        }
        (Some("Color"), _) | (_, "Color") => {
            TokenType::new(Category::Color, "color", Some("color"), "SolidColorBrush")
        }
        (_, "Padding") => TokenType::new(SIZE, "dimension", Some("spacing"), "Thickness"),
        (_, "Spacing") => TokenType::new(SIZE, "dimension", Some("spacing"), "x:Double"),
        (Some("Layout"), "Width" | "Height") => {
            TokenType::new(SIZE, "dimension", Some("sizing"), "x:Double")
        }
        (Some("Font"), "Family") => {
            TokenType::new(Category::Font, "fontFamily", Some("fontFamilies"), "FontFamily")
        }
        (Some("Font"), "Size") => TokenType::new(SIZE, "fontSize", Some("fontSizes"), "x:Double"),
        (Some("Font"), "LineHeight") => {
            TokenType::new(SIZE, "dimension", Some("lineHeights"), "x:Double")
        }
        (Some("Font"), "Weight") => {
            TokenType::new(Category::FontWeight, "fontWeight", Some("fontWeights"), "x:Double")
        }
        (Some("Font"), "LetterSpacing") => TokenType::new(
            Category::LetterSpacing,
            "dimension",
            Some("letterSpacing"),
            "x:Int32",
        ),
        (Some("Shadow"), _) | (_, "Shadow") => {
            TokenType::new(Category::Shadow, "shadow", Some("boxShadow"), NO_XAML_TYPE)
        }
        _ => return None,
    };
    Some(token_type)
}

/// XAML type of tokens WinUI has no resource for.
pub const NO_XAML_TYPE: &str = "none";
