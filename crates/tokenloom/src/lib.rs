//! Tokenloom - A design-token pipeline for Fluent UI style token documents.
//!
//! Loading, resolution, and per-platform rendering of token documents. One
//! resolved token set is turned into CSS, SCSS, Swift, XAML, JSON, W3C,
//! Figma Tokens, JavaScript, and HTML reference outputs.

pub mod build;
pub mod classify;
pub mod config;
pub mod filter;
pub mod format;
pub mod naming;
pub mod property;
pub mod registry;
pub mod transform;

mod error;

pub use tokenloom_core::{color, path, platform, tree, value};
pub use tokenloom_resolve::error::{Diagnostic, ErrorCode, Severity};

pub use error::TokenloomError;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::{debug, info, trace};

use tokenloom_resolve::{error::DiagnosticCollector, load};

use build::PlatformBuild;
use config::AppConfig;
use format::FileContext;
use platform::{Platform, Theme};
use property::Property;
use registry::Registry;
use tree::Node;

/// A loaded, merged, and classified token set, ready to be built.
///
/// The tree is not resolved yet: every platform build resolves its own copy
/// with that platform's overrides.
#[derive(Debug, Clone)]
pub struct Tokens {
    tree: Node,
    diagnostics: Vec<Diagnostic>,
}

impl Tokens {
    /// Returns the classified token tree.
    pub fn tree(&self) -> &Node {
        &self.tree
    }

    /// Returns the problems found while classifying the documents.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// One generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub contents: String,
}

/// Result of building one platform.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub platform: Platform,
    pub files: Vec<OutputFile>,
    /// Problems found while resolving and transforming this platform's copy.
    pub diagnostics: Vec<Diagnostic>,
}

/// Builder for loading token documents and rendering them per platform.
///
/// # Examples
///
/// ```
/// use tokenloom::{TokenBuilder, config::AppConfig, platform::Platform};
///
/// let source = r##"{
///     "Meta": { "FluentUITokensVersion": 0 },
///     "Global": { "Color": { "Blue": { "value": "#0000ff" } } },
///     "Set": { "Accent": { "aliasOf": "Global.Color.Blue" } }
/// }"##;
///
/// let builder = TokenBuilder::new(AppConfig::default()).unwrap();
/// let tokens = builder.load([("tokens.json", source)]).unwrap();
///
/// let output = builder.build(&tokens, Platform::Css, None).unwrap();
/// assert_eq!(output.files[0].path.to_str(), Some("web/fluentuitokens.css"));
/// assert!(output.files[0].contents.contains("--accent: var(--global-color-blue);"));
/// ```
#[derive(Debug)]
pub struct TokenBuilder {
    config: AppConfig,
    registry: Registry,
    timestamp: Option<DateTime<Utc>>,
}

impl TokenBuilder {
    /// Create a new token builder with the built-in registry.
    ///
    /// # Arguments
    ///
    /// * `config` - Naming and per-platform output settings
    ///
    /// # Errors
    ///
    /// Returns `TokenloomError::Registry` if the built-in registry is
    /// inconsistent.
    pub fn new(config: AppConfig) -> Result<Self, TokenloomError> {
        Ok(Self::with_registry(config, Registry::builtin()?))
    }

    /// Create a token builder that looks stages up in `registry`.
    pub fn with_registry(config: AppConfig, registry: Registry) -> Self {
        Self {
            config,
            registry,
            timestamp: None,
        }
    }

    /// Fixes the time written into generated headers, instead of the current
    /// time at each build.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parse, merge, and classify token documents.
    ///
    /// Later documents override earlier ones.
    ///
    /// # Arguments
    ///
    /// * `sources` - Pairs of a document name, used in errors, and its text
    ///
    /// # Errors
    ///
    /// Returns `TokenloomError::Load` naming the first document that is not
    /// valid JSON, not an object, of an unsupported version, or an invalid
    /// W3C token file.
    pub fn load<'a, I>(&self, sources: I) -> Result<Tokens, TokenloomError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let documents = sources
            .into_iter()
            .map(|(name, source)| {
                info!(source = name; "Loading token document");
                load::parse_document(source)
                    .map_err(|err| TokenloomError::new_load_error(err, name))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let merged = load::merge_documents(documents);
        let mut collector = DiagnosticCollector::new();
        let tree = load::classify(&merged, &mut collector);

        debug!(diagnostics = collector.diagnostics().len(); "Token documents classified");
        trace!(tree:?; "Classified token tree");

        Ok(Tokens {
            tree,
            diagnostics: collector.into_diagnostics(),
        })
    }

    /// Build one platform from a private copy of `tokens`.
    ///
    /// Data problems do not stop the build; they are returned in
    /// [`BuildOutput::diagnostics`] and the affected tokens carry
    /// `<ERROR: ...>` values.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Loaded token set
    /// * `platform` - Platform to build
    /// * `theme` - Theme for platforms that need one
    ///
    /// # Errors
    ///
    /// Returns `TokenloomError` for a missing theme, a build naming an
    /// unregistered stage, a resolution precondition failure, or a format
    /// that cannot render its tokens.
    pub fn build(
        &self,
        tokens: &Tokens,
        platform: Platform,
        theme: Option<Theme>,
    ) -> Result<BuildOutput, TokenloomError> {
        info!(platform:%, theme:?; "Building platform");

        let build = PlatformBuild::for_platform(platform, theme, &self.config)?;
        self.registry.validate(&build)?;

        let mut collector = DiagnosticCollector::new();
        let mut tree = tokens.tree.clone();
        tokenloom_resolve::resolve(&mut tree, build.override_platform, &mut collector)?;

        let mut properties = property::flatten(&tree);
        let group = self
            .registry
            .group(build.transform_group)
            .ok_or_else(|| unregistered("transform group", build.transform_group))?;
        transform::run_group(group, &mut properties, &self.config, &mut collector);
        debug!(
            platform:%,
            properties = properties.len(),
            transform_group = build.transform_group;
            "Properties transformed"
        );

        let generated_at = self.timestamp.unwrap_or_else(Utc::now);
        let files = build
            .files
            .iter()
            .map(|file| {
                let selected: Vec<Property> = match file.filter {
                    Some(name) => {
                        let filter = self
                            .registry
                            .filter(name)
                            .ok_or_else(|| unregistered("filter", name))?;
                        properties.iter().filter(|p| filter(p)).cloned().collect()
                    }
                    None => properties.clone(),
                };
                let format = self
                    .registry
                    .format(file.format)
                    .ok_or_else(|| unregistered("format", file.format))?;
                let context = FileContext {
                    destination: &file.destination,
                    class_name: file.class_name.as_deref(),
                    theme,
                    generated_at,
                };
                let contents = format.format(&selected, &context)?;
                debug!(
                    destination = file.destination,
                    tokens = selected.len();
                    "File rendered"
                );
                Ok(OutputFile {
                    path: PathBuf::from(&file.destination),
                    contents,
                })
            })
            .collect::<Result<Vec<_>, TokenloomError>>()?;

        info!(platform:%, files = files.len(), diagnostics = collector.diagnostics().len(); "Platform built");
        Ok(BuildOutput {
            platform,
            files,
            diagnostics: collector.into_diagnostics(),
        })
    }

    /// Build several platforms, each from its own copy of `tokens`.
    ///
    /// An empty `platforms` list builds every platform. In that case a
    /// platform that needs a theme is skipped when `theme` is `None`.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`build`](Self::build), including a missing
    /// theme for an explicitly requested platform.
    pub fn build_all(
        &self,
        tokens: &Tokens,
        platforms: &[Platform],
        theme: Option<Theme>,
    ) -> Result<Vec<BuildOutput>, TokenloomError> {
        let requested = if platforms.is_empty() {
            Platform::ALL
                .into_iter()
                .filter(|platform| {
                    let skip = platform.requires_theme() && theme.is_none();
                    if skip {
                        info!(platform:%; "No theme given, skipping platform");
                    }
                    !skip
                })
                .collect()
        } else {
            platforms.to_vec()
        };

        requested
            .into_iter()
            .map(|platform| self.build(tokens, platform, theme))
            .collect()
    }
}

fn unregistered(kind: &str, name: &str) -> TokenloomError {
    TokenloomError::Registry(format!("unknown {kind} `{name}`"))
}
