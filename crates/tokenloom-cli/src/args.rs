//! Command-line argument definitions for the Tokenloom CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input documents, the output
//! directory, the platforms to build, and logging verbosity.

use clap::Parser;

use tokenloom::platform::{Platform, Theme};

/// Command-line arguments for the Tokenloom token pipeline
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Token documents to load, merged in order
    #[arg(long = "in", value_name = "FILE", required = true, num_args = 1..)]
    pub inputs: Vec<String>,

    /// Directory the generated files are written to
    #[arg(short, long, default_value = "build")]
    pub out: String,

    /// Platforms to build (all when omitted)
    #[arg(short, long = "platform", value_name = "NAME")]
    pub platforms: Vec<Platform>,

    /// Theme for platforms that need one (light, dark, highcontrast)
    #[arg(short, long)]
    pub theme: Option<Theme>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_are_required() {
        assert!(Args::try_parse_from(["tokenloom"]).is_err());
    }

    #[test]
    fn test_platform_and_theme_parse() {
        let args = Args::try_parse_from([
            "tokenloom", "--in", "a.json", "b.json", "--platform", "css", "-p", "dcs", "--theme",
            "dark",
        ])
        .unwrap();
        assert_eq!(args.inputs, ["a.json", "b.json"]);
        assert_eq!(args.platforms, [Platform::Css, Platform::Dcs]);
        assert_eq!(args.theme, Some(Theme::Dark));
        assert_eq!(args.out, "build");
    }

    #[test]
    fn test_unknown_platform_is_rejected() {
        assert!(Args::try_parse_from(["tokenloom", "--in", "a.json", "--platform", "android"]).is_err());
    }
}
