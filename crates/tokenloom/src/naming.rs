//! Identifier casing.
//!
//! Token paths such as `Set.NeutralForeground1.Rest` are turned into platform
//! identifiers (`neutralForeground1Rest`, `NeutralForeground1Rest`). Words are
//! split the same way for every casing: at non-alphanumeric characters, at a
//! lowercase-to-uppercase step, between letters and digits, and before the
//! last capital of an acronym (`HTMLParser` is `HTML` + `Parser`).

use tokenloom_core::path::{SET_NAMESPACE, TokenPath};

/// Splits `text` into words.
///
/// # Examples
///
/// ```
/// use tokenloom::naming::words;
///
/// assert_eq!(words("Neutral Foreground1"), ["Neutral", "Foreground", "1"]);
/// assert_eq!(words("HTMLParser"), ["HTML", "Parser"]);
/// assert_eq!(words("stroke-width"), ["stroke", "width"]);
/// ```
pub fn words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    for run in text.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = run.chars().collect();
        let mut start = 0;
        for index in 1..chars.len() {
            if is_boundary(chars[index - 1], chars[index], chars.get(index + 1).copied()) {
                words.push(chars[start..index].iter().collect());
                start = index;
            }
        }
        if start < chars.len() {
            words.push(chars[start..].iter().collect());
        }
    }
    words
}

fn is_boundary(previous: char, current: char, next: Option<char>) -> bool {
    let case_step = previous.is_lowercase() && current.is_uppercase();
    let digit_step = previous.is_numeric() != current.is_numeric();
    let acronym_end = previous.is_uppercase()
        && current.is_uppercase()
        && next.is_some_and(char::is_lowercase);
    case_step || digit_step || acronym_end
}

/// Converts `text` to camelCase.
///
/// # Examples
///
/// ```
/// use tokenloom::naming::camel_case;
///
/// assert_eq!(camel_case("Global Color Blue"), "globalColorBlue");
/// assert_eq!(camel_case("Shade10"), "shade10");
/// assert_eq!(camel_case("CTA Background"), "ctaBackground");
/// ```
pub fn camel_case(text: &str) -> String {
    let mut camel = String::new();
    for (index, word) in words(text).iter().enumerate() {
        let lower = word.to_lowercase();
        if index == 0 {
            camel.push_str(&lower);
        } else {
            camel.push_str(&upper_first(&lower));
        }
    }
    camel
}

/// Converts `text` to PascalCase.
pub fn pascal_case(text: &str) -> String {
    upper_first(&camel_case(text))
}

/// Uppercases the first character of `text`.
pub fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns the words used to name a token: the path without a leading `Set`
/// segment, behind `prefix` when one is configured.
pub fn naming_segments(path: &TokenPath, prefix: Option<&str>) -> Vec<String> {
    let segments = path.segments();
    let segments = match segments.first() {
        Some(first) if first == SET_NAMESPACE => &segments[1..],
        _ => segments,
    };
    prefix
        .map(str::to_string)
        .into_iter()
        .chain(segments.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_words() {
        assert_eq!(words("Shade10"), vec!["Shade", "10"]);
        assert_eq!(words("10px"), vec!["10", "px"]);
        assert_eq!(words("  "), Vec::<String>::new());
        assert_eq!(words("NeutralForegroundRest"), vec!["Neutral", "Foreground", "Rest"]);
    }

    #[test]
    fn test_casing() {
        assert_eq!(camel_case("Neutral Foreground 1 Rest"), "neutralForeground1Rest");
        assert_eq!(pascal_case("Set Accent Fill Color"), "SetAccentFillColor");
        assert_eq!(camel_case("Global.Color.Grey.94"), "globalColorGrey94");
        assert_eq!(upper_first("aB"), "AB");
        assert_eq!(upper_first(""), "");
    }

    #[test]
    fn test_naming_segments() {
        let path = TokenPath::parse("Set.Accent.Rest").unwrap();
        assert_eq!(naming_segments(&path, None), vec!["Accent", "Rest"]);
        assert_eq!(
            naming_segments(&path, Some("Fluent")),
            vec!["Fluent", "Accent", "Rest"]
        );

        let global = TokenPath::parse("Global.Color.Blue").unwrap();
        assert_eq!(naming_segments(&global, None).len(), 3);
    }

    fn check_camel_case_is_identifier(text: String) -> Result<(), TestCaseError> {
        let camel = camel_case(&text);
        prop_assert!(camel.chars().all(char::is_alphanumeric));
        prop_assert_eq!(camel_case(&camel), camel.clone());
        Ok(())
    }

    proptest! {
        #[test]
        fn camel_case_is_identifier(text in "[A-Za-z][a-z]{0,6}( [A-Za-z0-9][a-z0-9]{0,6}){0,4}") {
            check_camel_case_is_identifier(text)?;
        }
    }
}
