//! XAML resource dictionaries.
//!
//! Aliases become `StaticResource` references to the resource they point at.
//! Tokens without a XAML representation, such as shadows, are left out.

use super::{Error, FileContext, Format, escape_xml};
use crate::{classify::NO_XAML_TYPE, property::Property};

const DICTIONARY_HEADER: &str = "<ResourceDictionary\n\
    \txmlns=\"http://schemas.microsoft.com/winfx/2006/xaml/presentation\"\n\
    \txmlns:x=\"http://schemas.microsoft.com/winfx/2006/xaml\">\n\n";

/// Theme dictionaries WinUI looks up, in order.
const THEME_KEYS: [&str; 3] = ["Default", "Light", "HighContrast"];

/// Writes a `ResourceDictionary`.
///
/// The themed variant repeats the resources in each theme dictionary, so that
/// they can be overridden per theme.
#[derive(Debug, Default, Clone, Copy)]
pub struct XamlResources {
    themed: bool,
}

impl XamlResources {
    pub fn new(themed: bool) -> Self {
        Self { themed }
    }
}

impl Format for XamlResources {
    fn format(&self, properties: &[Property], file: &FileContext<'_>) -> Result<String, Error> {
        let mut out = format!(
            "{DICTIONARY_HEADER}\t<!--\n\t\tDo not edit this file directly.\n\t\tGenerated on {}\n\t-->\n\n",
            file.generated_on()
        );
        if self.themed {
            let resources = resources(properties, 3);
            out.push_str("    <ResourceDictionary.ThemeDictionaries>\n");
            for key in THEME_KEYS {
                out.push_str(&format!(
                    "\t\t<ResourceDictionary x:Key=\"{key}\">\n{resources}\n\t\t</ResourceDictionary>\n"
                ));
            }
            out.push_str("\t</ResourceDictionary.ThemeDictionaries>\n\n");
        } else {
            out.push_str(&resources(properties, 1));
            out.push_str("\n\n");
        }
        out.push_str("</ResourceDictionary>");
        Ok(out)
    }
}

fn resources(properties: &[Property], indent: usize) -> String {
    let tabs = "\t".repeat(indent);
    properties
        .iter()
        .filter(|property| property.attributes.xaml_type.as_deref() != Some(NO_XAML_TYPE))
        .map(|property| match &property.attributes.alias_resource_name {
            Some(target) => format!(
                "{tabs}<StaticResource x:Key=\"{}\" ResourceKey=\"{target}\" />",
                property.name
            ),
            None => {
                let xaml_type = property.attributes.xaml_type.as_deref().unwrap_or("x:String");
                format!(
                    "{tabs}<{xaml_type} x:Key=\"{}\">{}</{xaml_type}>",
                    property.name,
                    escape_xml(&property.value.to_display_string())
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use tokenloom_core::value::TokenValue;

    use super::*;
    use crate::{format::test_support::file, property::Attributes, transform::test_support::property};

    fn resource(name: &str, value: &str, attributes: Attributes) -> Property {
        let mut property = property("Global.Test", TokenValue::String(value.into()), None);
        property.name = name.into();
        property.attributes = attributes;
        property
    }

    fn typed(xaml_type: &str) -> Attributes {
        Attributes {
            xaml_type: Some(xaml_type.into()),
            ..Attributes::default()
        }
    }

    #[test]
    fn test_plain_dictionary() {
        let properties = [
            resource("GlobalColorBlue", "#FF0078D4", typed("SolidColorBrush")),
            resource(
                "AccentFillColorRest",
                "ignored",
                Attributes {
                    alias_resource_name: Some("GlobalColorBlue".into()),
                    ..typed("SolidColorBrush")
                },
            ),
            resource("FontFamilyBase", "Segoe UI & Friends", Attributes::default()),
            resource("ShadowCard", "0px 1px 2px #000000", typed(NO_XAML_TYPE)),
        ];
        let xaml = XamlResources::new(false)
            .format(&properties, &file("winui/Tokens.xaml"))
            .unwrap();

        assert!(xaml.starts_with("<ResourceDictionary\n\txmlns=\"http://schemas.microsoft.com/winfx/2006/xaml/presentation\"\n"));
        assert!(xaml.contains("\t\tGenerated on Tue, 05 Mar 2024 14:07:09 GMT\n\t-->\n\n"));
        assert!(xaml.contains(
            "\t<SolidColorBrush x:Key=\"GlobalColorBlue\">#FF0078D4</SolidColorBrush>\n\
             \t<StaticResource x:Key=\"AccentFillColorRest\" ResourceKey=\"GlobalColorBlue\" />\n\
             \t<x:String x:Key=\"FontFamilyBase\">Segoe UI &amp; Friends</x:String>\n\n\
             </ResourceDictionary>"
        ));
        assert!(!xaml.contains("ShadowCard"));
    }

    #[test]
    fn test_themed_dictionary() {
        let properties = [resource("Thin", "1", typed("Thickness"))];
        let xaml = XamlResources::new(true)
            .format(&properties, &file("winui/Themed.xaml"))
            .unwrap();

        assert_eq!(xaml.matches("\t\t\t<Thickness x:Key=\"Thin\">1</Thickness>").count(), 3);
        assert!(xaml.contains(
            "    <ResourceDictionary.ThemeDictionaries>\n\t\t<ResourceDictionary x:Key=\"Default\">\n"
        ));
        assert!(xaml.ends_with("\t</ResourceDictionary.ThemeDictionaries>\n\n</ResourceDictionary>"));
    }
}
