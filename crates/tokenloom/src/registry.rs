//! Named transforms, transform groups, filters, and formats.
//!
//! Platform builds refer to every stage by name. The [`Registry`] owns the
//! mapping from names to implementations and checks, when something is
//! registered or a build is validated, that every name refers to something.

use std::fmt;

use indexmap::IndexMap;
use log::debug;

use crate::{
    TokenloomError,
    build::PlatformBuild,
    filter::{self, Filter},
    format::{
        Format, css::CssVariables, css::ScssVariables, html::HtmlReference,
        javascript::Es6Module, json::FlatJson, json::GroupedJson, swift::SwiftClass,
        w3c::FigmaTokensJson, w3c::W3cJson, xaml::XamlResources,
    },
    transform::{self, Transform},
};

type GroupTable = Vec<(&'static str, Vec<&'static str>)>;

/// Lookup tables for every named pipeline stage.
///
/// # Examples
///
/// ```
/// use tokenloom::registry::Registry;
///
/// let registry = Registry::builtin().unwrap();
/// assert!(registry.transform("fluentui/name/kebab").is_some());
/// assert!(registry.group("fluentui/css").is_some());
/// assert!(registry.filter("isColor").is_some());
/// assert!(registry.format("css/variables").is_some());
/// ```
#[derive(Default)]
pub struct Registry {
    transforms: IndexMap<&'static str, Transform>,
    groups: IndexMap<&'static str, Vec<Transform>>,
    filters: IndexMap<&'static str, Filter>,
    formats: IndexMap<&'static str, Box<dyn Format>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in stage.
    ///
    /// # Errors
    ///
    /// Returns [`TokenloomError::Registry`] if two built-ins share a name or
    /// a built-in group names an unknown transform.
    pub fn builtin() -> Result<Self, TokenloomError> {
        let mut registry = Self::new();

        let transforms = [
            transform::shared::transforms(),
            transform::css::transforms(),
            transform::winui::transforms(),
            transform::swift::transforms(),
            transform::json::transforms(),
            transform::w3c::transforms(),
            transform::figma::transforms(),
            transform::dcs::transforms(),
            transform::react::transforms(),
            transform::reference::transforms(),
        ];
        for transform in transforms.into_iter().flatten() {
            registry.register_transform(transform)?;
        }

        let groups: [GroupTable; 10] = [
            transform::shared::groups(),
            transform::css::groups(),
            transform::winui::groups(),
            transform::swift::groups(),
            transform::json::groups(),
            transform::w3c::groups(),
            transform::figma::groups(),
            transform::dcs::groups(),
            transform::react::groups(),
            transform::reference::groups(),
        ];
        for (name, members) in groups.into_iter().flatten() {
            registry.register_group(name, &members)?;
        }

        for (name, filter) in filter::builtin() {
            registry.register_filter(name, filter)?;
        }

        let formats: [(&'static str, Box<dyn Format>); 11] = [
            ("json/flat", Box::new(FlatJson)),
            ("fluentui/json/grouped", Box::new(GroupedJson)),
            ("fluentui/html/reference", Box::new(HtmlReference)),
            ("css/variables", Box::new(CssVariables)),
            ("scss/variables", Box::new(ScssVariables)),
            ("ios-swift/class.swift", Box::new(SwiftClass)),
            ("fluentui/xaml/res", Box::new(XamlResources::new(false))),
            ("fluentui/xaml/res/themed", Box::new(XamlResources::new(true))),
            ("fluentui/w3c", Box::new(W3cJson)),
            ("fluentui/figmatokens", Box::new(FigmaTokensJson)),
            ("javascript/es6", Box::new(Es6Module)),
        ];
        for (name, format) in formats {
            registry.register_format(name, format)?;
        }

        debug!(
            transforms = registry.transforms.len(),
            groups = registry.groups.len(),
            filters = registry.filters.len(),
            formats = registry.formats.len();
            "Built-in registry created"
        );
        Ok(registry)
    }

    /// Registers a transform under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`TokenloomError::Registry`] if the name is taken.
    pub fn register_transform(&mut self, transform: Transform) -> Result<(), TokenloomError> {
        if self.transforms.contains_key(transform.name()) {
            return Err(duplicate("transform", transform.name()));
        }
        self.transforms.insert(transform.name(), transform);
        Ok(())
    }

    /// Registers a group made of already registered transforms, in order.
    ///
    /// # Errors
    ///
    /// Returns [`TokenloomError::Registry`] if the name is taken or a member
    /// is not a registered transform.
    pub fn register_group(
        &mut self,
        name: &'static str,
        members: &[&str],
    ) -> Result<(), TokenloomError> {
        if self.groups.contains_key(name) {
            return Err(duplicate("transform group", name));
        }
        let transforms = members
            .iter()
            .map(|member| {
                self.transforms.get(*member).copied().ok_or_else(|| {
                    TokenloomError::Registry(format!(
                        "transform group `{name}` names unknown transform `{member}`"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.groups.insert(name, transforms);
        Ok(())
    }

    /// Registers a filter.
    ///
    /// # Errors
    ///
    /// Returns [`TokenloomError::Registry`] if the name is taken.
    pub fn register_filter(
        &mut self,
        name: &'static str,
        filter: Filter,
    ) -> Result<(), TokenloomError> {
        if self.filters.contains_key(name) {
            return Err(duplicate("filter", name));
        }
        self.filters.insert(name, filter);
        Ok(())
    }

    /// Registers a format.
    ///
    /// # Errors
    ///
    /// Returns [`TokenloomError::Registry`] if the name is taken.
    pub fn register_format(
        &mut self,
        name: &'static str,
        format: Box<dyn Format>,
    ) -> Result<(), TokenloomError> {
        if self.formats.contains_key(name) {
            return Err(duplicate("format", name));
        }
        self.formats.insert(name, format);
        Ok(())
    }

    pub fn transform(&self, name: &str) -> Option<&Transform> {
        self.transforms.get(name)
    }

    pub fn group(&self, name: &str) -> Option<&[Transform]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn filter(&self, name: &str) -> Option<Filter> {
        self.filters.get(name).copied()
    }

    pub fn format(&self, name: &str) -> Option<&dyn Format> {
        self.formats.get(name).map(Box::as_ref)
    }

    /// Checks that every stage `build` names is registered.
    ///
    /// # Errors
    ///
    /// Returns [`TokenloomError::Registry`] naming the first missing stage.
    pub fn validate(&self, build: &PlatformBuild) -> Result<(), TokenloomError> {
        let missing = |kind: &str, name: &str| {
            TokenloomError::Registry(format!(
                "platform `{}` uses unknown {kind} `{name}`",
                build.platform
            ))
        };

        if self.group(build.transform_group).is_none() {
            return Err(missing("transform group", build.transform_group));
        }
        for file in &build.files {
            if self.format(file.format).is_none() {
                return Err(missing("format", file.format));
            }
            if let Some(filter) = file.filter {
                if self.filter(filter).is_none() {
                    return Err(missing("filter", filter));
                }
            }
        }
        Ok(())
    }
}

fn duplicate(kind: &str, name: &str) -> TokenloomError {
    TokenloomError::Registry(format!("{kind} `{name}` is already registered"))
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("transforms", &self.transforms.keys().collect::<Vec<_>>())
            .field("groups", &self.groups.keys().collect::<Vec<_>>())
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .field("formats", &self.formats.keys().collect::<Vec<_>>())
            .finish()
    }
}
