//! The platform build table.
//!
//! Every [`Platform`] maps to one [`PlatformBuild`]: the platform whose
//! overrides are merged during resolution, the transform group run over the
//! properties, and the files written from the result.

use tokenloom_core::platform::{Platform, Theme};

use crate::{TokenloomError, config::AppConfig};

/// One output file of a platform build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    /// Path relative to the output directory.
    pub destination: String,
    /// Registered name of the format that renders the file.
    pub format: &'static str,
    /// Registered name of the filter selecting the file's tokens, if any.
    pub filter: Option<&'static str>,
    /// Name of the generated class, for formats that need one.
    pub class_name: Option<String>,
}

impl FileSpec {
    fn new(destination: impl Into<String>, format: &'static str) -> Self {
        Self {
            destination: destination.into(),
            format,
            filter: None,
            class_name: None,
        }
    }

    fn with_filter(mut self, filter: &'static str) -> Self {
        self.filter = Some(filter);
        self
    }

    fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

/// How one platform is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformBuild {
    pub platform: Platform,
    /// Platform whose override entries apply; `None` keeps base values.
    pub override_platform: Option<Platform>,
    /// Registered name of the transform group.
    pub transform_group: &'static str,
    pub files: Vec<FileSpec>,
}

impl PlatformBuild {
    /// Returns the build for `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenloomError::MissingTheme`] for a platform that needs a
    /// theme when `theme` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tokenloom::{build::PlatformBuild, config::AppConfig};
    /// use tokenloom_core::platform::Platform;
    ///
    /// let build = PlatformBuild::for_platform(Platform::Cssflat, None, &AppConfig::default()).unwrap();
    /// assert_eq!(build.override_platform, Some(Platform::Css));
    /// assert_eq!(build.files[0].destination, "web/fluentuitokens-flat.css");
    /// ```
    pub fn for_platform(
        platform: Platform,
        theme: Option<Theme>,
        config: &AppConfig,
    ) -> Result<Self, TokenloomError> {
        let (override_platform, transform_group, files) = match platform {
            Platform::Debug => (
                None,
                "fluentui/debug",
                vec![FileSpec::new("debug/fluentuitokens-debug.json", "json/flat")],
            ),
            Platform::Json => (
                None,
                "fluentui/json/grouped",
                vec![FileSpec::new(
                    "json/fluentuitokens-grouped.json",
                    "fluentui/json/grouped",
                )],
            ),
            Platform::Reference => (
                None,
                "fluentui/reference",
                vec![FileSpec::new(
                    "reference/fluentuitokens.html",
                    "fluentui/html/reference",
                )],
            ),
            Platform::Css => (
                Some(Platform::Css),
                "fluentui/css",
                vec![FileSpec::new("web/fluentuitokens.css", "css/variables")],
            ),
            Platform::Cssflat => (
                Some(Platform::Css),
                "fluentui/cssflat",
                vec![FileSpec::new("web/fluentuitokens-flat.css", "css/variables")],
            ),
            Platform::Scss => (
                Some(Platform::Css),
                "fluentui/scss",
                vec![FileSpec::new("web/fluentuitokens.scss", "scss/variables")],
            ),
            Platform::Ios => (Some(Platform::Ios), "fluentui/swift", swift_files(config)),
            Platform::Reactnative => (
                Some(Platform::Reactnative),
                "fluentui/reactnative",
                vec![FileSpec::new(
                    "reactnative/fluentuitokens.json",
                    "fluentui/json/grouped",
                )],
            ),
            Platform::Winui => (
                Some(Platform::Winui),
                "fluentui/winui",
                vec![
                    FileSpec::new("winui/FluentUITokens.xaml", "fluentui/xaml/res"),
                    FileSpec::new("winui/FluentUITokensThemed.xaml", "fluentui/xaml/res/themed"),
                ],
            ),
            Platform::React => (
                Some(Platform::React),
                "fluentui/react",
                vec![FileSpec::new("react/fluentuitokens.js", "javascript/es6")],
            ),
            Platform::W3c => (
                None,
                "fluentui/w3c",
                vec![FileSpec::new("w3c/fluentuitokens.json", "fluentui/w3c")],
            ),
            Platform::Figmatokens => (
                None,
                "fluentui/figmatokens",
                vec![FileSpec::new(
                    "figmatokens/fluentuitokens.json",
                    "fluentui/figmatokens",
                )],
            ),
            Platform::Dcs => {
                let theme = theme.ok_or(TokenloomError::MissingTheme(platform))?;
                (
                    Some(Platform::Css),
                    "fluentui/dcs",
                    vec![FileSpec::new(
                        format!("dcs/fluentuitokens-{theme}.css"),
                        "css/variables",
                    )],
                )
            }
        };

        Ok(Self {
            platform,
            override_platform,
            transform_group,
            files,
        })
    }
}

fn swift_files(config: &AppConfig) -> Vec<FileSpec> {
    let prefix = config.ios().class_prefix();
    let class = |suffix: &str| format!("{prefix}{suffix}");
    let file = |class_name: String| {
        FileSpec::new(format!("ios/{class_name}.swift"), "ios-swift/class.swift")
            .with_class_name(class_name)
    };
    vec![
        file(class("Tokens")),
        file(class("ColorTokens")).with_filter("isColor"),
        file(class("SizeTokens")).with_filter("isSize"),
        file(class("FontTokens")).with_filter("isFont"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IosConfig;

    #[test]
    fn test_override_platforms() {
        let config = AppConfig::default();
        let override_of = |platform| {
            PlatformBuild::for_platform(platform, Some(Theme::Dark), &config)
                .unwrap()
                .override_platform
        };
        for platform in [Platform::Debug, Platform::Json, Platform::Reference, Platform::W3c, Platform::Figmatokens] {
            assert_eq!(override_of(platform), None, "{platform}");
        }
        for platform in [Platform::Css, Platform::Cssflat, Platform::Scss, Platform::Dcs] {
            assert_eq!(override_of(platform), Some(Platform::Css), "{platform}");
        }
        for platform in [Platform::Ios, Platform::Reactnative, Platform::Winui, Platform::React] {
            assert_eq!(override_of(platform), Some(platform));
        }
    }

    #[test]
    fn test_swift_files_use_class_prefix() {
        let config = AppConfig::new(Default::default(), Default::default(), IosConfig::new("Contoso"));
        let build = PlatformBuild::for_platform(Platform::Ios, None, &config).unwrap();

        let names: Vec<_> = build.files.iter().map(|file| file.destination.as_str()).collect();
        assert_eq!(
            names,
            [
                "ios/ContosoTokens.swift",
                "ios/ContosoColorTokens.swift",
                "ios/ContosoSizeTokens.swift",
                "ios/ContosoFontTokens.swift",
            ]
        );
        assert_eq!(build.files[0].filter, None);
        assert_eq!(build.files[1].filter, Some("isColor"));
        assert_eq!(build.files[3].class_name.as_deref(), Some("ContosoFontTokens"));
    }

    #[test]
    fn test_dcs_needs_theme() {
        let config = AppConfig::default();
        assert!(matches!(
            PlatformBuild::for_platform(Platform::Dcs, None, &config),
            Err(TokenloomError::MissingTheme(Platform::Dcs))
        ));

        let build = PlatformBuild::for_platform(Platform::Dcs, Some(Theme::Highcontrast), &config).unwrap();
        assert_eq!(build.files[0].destination, "dcs/fluentuitokens-highcontrast.css");
    }
}
