//! The HTML style reference page.
//!
//! Tokens are listed in readability order, under a heading for global tokens
//! and one per alias set or control. Colors get a swatch.

use std::fmt::Write;

use tokenloom_core::path::GLOBAL_NAMESPACE;

use super::{Error, FileContext, Format, escape_xml};
use crate::property::{Category, Property, sort_for_readability};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en-us">
<head>
<meta charset="utf-8" />
<title>Fluent UI style reference</title>
<style type="text/css">
*, *::before, *::after
{
	box-sizing: inherit;
}

html
{
	box-sizing: border-box;
	min-height: 100%;

	font-family: "Segoe UI", Roboto, "Helvetica Neue", Helvetica, Arial, sans-serif;
	font-size: 14px;
	font-weight: 400;
	line-height: 20px;
	color: black;
	background-color: white;

	cursor: default;
}

body
{
	color: black;
	padding: 0 2em 2em 2em;
}

p, h1, h2
{
	margin-block-start: 1em;
	margin-block-end: 1em;
}

h1
{
	font-family: "Segoe UI", Roboto, "Helvetica Neue", Helvetica, Arial, sans-serif;
	font-size: 32px;
	font-weight: 600;
	line-height: 40px;
}

h2
{
	font-family: "Segoe UI", Roboto, "Helvetica Neue", Helvetica, Arial, sans-serif;
	font-size: 24px;
	font-weight: 600;
	line-height: 32px;
}

h3
{
	font-family: "Segoe UI", Roboto, "Helvetica Neue", Helvetica, Arial, sans-serif;
	font-size: 16px;
	font-weight: 600;
	line-height: 24px;
}

.tokentable
{
	display: grid;
	grid-template-columns: [swatch] 32px [name] auto [alias] auto [value] 1fr;
	grid-auto-rows: 32px;
	gap: .25em 1em;
	justify-content: start;
}

.tokentable > h1, .tokentable > h2, .tokentable > h3
{
	grid-column: 1 / -1;
}

.tokentable > *
{
	margin: auto 0;
	overflow: hidden;

	white-space: nowrap;
	text-overflow: ellipsis;
}

.tokentable > .swatch
{
	user-select: none;
}

.tokentable > .unknown.swatch
{
	color: #c0c0c0;
	text-align: center;
}

.tokentable > .color.swatch
{
	height: 100%;
}

.tokentable > .transparent.color.swatch
{
	background-position: 0px 0px, 8px 8px;
	background-size: 16px 16px;
	background-image: linear-gradient(45deg, #eee 25%, transparent 25%, transparent 75%, #eee 75%, #eee 100%), linear-gradient(45deg, #eee 25%, white 25%, white 75%, #eee 75%, #eee 100%);
}

.tokentable > .text.swatch
{
	color: #404040;
	user-select: none;
}

.tokentable > .value:not(:empty)::before, .tokentable > .finalvalue::before
{
	content: " = ";
	color: #808080;
}

.tokentable > .finalvalue
{
	font-family: Inconsolata, Consolas, SFMono-Regular, monospace;
}

</style>
</head>
<body>

"#;

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlReference;

impl Format for HtmlReference {
    fn format(&self, properties: &[Property], file: &FileContext<'_>) -> Result<String, Error> {
        let mut sorted = properties.to_vec();
        sort_for_readability(&mut sorted);

        Ok(format!(
            "{PAGE_HEAD}<h1>Fluent UI style reference</h1>\n\n\
             <p>Generated on <time datetime=\"{}\">{}</time></p>\n\n\
             {}\n\n</body></html>",
            file.generated_at_iso(),
            file.generated_on(),
            token_tables(&sorted)
        ))
    }
}

/// Lists sorted tokens, opening a new table at every heading.
fn token_tables(sorted: &[Property]) -> String {
    let mut list = String::new();
    let mut previous: Option<&Property> = None;
    for property in sorted {
        let root = property.root();
        let is_global = root == GLOBAL_NAMESPACE;
        let mut header = String::new();
        match previous {
            None if is_global => header.push_str("<h1>Global tokens</h1>\n\n"),
            None => header.push_str("<h1>Alias tokens</h1>\n\n"),
            Some(prev) if !is_global && prev.root() == GLOBAL_NAMESPACE => {
                header.push_str("<h1>Alias tokens</h1>\n\n")
            }
            Some(_) => {}
        }
        if !is_global && previous.is_none_or(|prev| prev.root() != root) {
            let _ = write!(header, "<h2>{root}</h2>\n\n");
        }

        if !header.is_empty() {
            if previous.is_some() {
                list.push_str("</div>\n\n");
            }
            list.push_str(&header);
            list.push_str("<div class=\"tokentable\">\n\n");
        }
        previous = Some(property);
        list.push_str(&token_row(property));
    }
    if previous.is_some() {
        list.push_str("</div>\n\n");
    }
    list
}

fn token_row(property: &Property) -> String {
    let alias = if property.was_computed {
        "<em>(computed)</em>"
    } else {
        property.attributes.alias_resource_name.as_deref().unwrap_or("")
    };
    let value = escape_xml(&property.value.to_display_string());
    format!(
        "\t{}\n\t<div class=\"name\">{}</div>\n\t<div class=\"value\">{alias}</div>\n\t<div class=\"finalvalue\">{value}</div>\n\n",
        swatch(property, &value),
        property.name
    )
}

fn swatch(property: &Property, value: &str) -> String {
    if property.attributes.effective_category() != Some(Category::Color) {
        return r#"<div class="unknown swatch">&bull;</div>"#.to_string();
    }
    match value {
        "transparent" => r#"<div class="transparent color swatch"></div>"#.to_string(),
        "#ffffff" => format!(
            r#"<div class="color swatch" style="background-color: {value}; border: 1px solid #dddddd;"></div>"#
        ),
        _ if value.starts_with("linear-gradient(") => {
            format!(r#"<div class="color swatch" style="background-image: {value};"></div>"#)
        }
        _ => format!(r#"<div class="color swatch" style="background-color: {value};"></div>"#),
    }
}
