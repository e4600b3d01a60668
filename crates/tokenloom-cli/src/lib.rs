//! CLI logic for the Tokenloom design-token pipeline.
//!
//! This module loads the input documents, builds the requested platforms,
//! reports token diagnostics, and writes the generated files.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::{error, info, warn};

use tokenloom::{BuildOutput, Diagnostic, TokenBuilder, TokenloomError};

use error_adapter::{diagnostics_to_reportables, render};

/// Totals of a successful run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub platforms: usize,
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Run the Tokenloom CLI application
///
/// This loads and merges the input documents, builds every requested
/// platform, and writes the generated files under the output directory.
/// Token diagnostics are logged and do not fail the run.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TokenloomError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid or unsupported token documents
/// - A platform that needs a theme when none is given
/// - Format failures
pub fn run(args: &Args) -> Result<RunSummary, TokenloomError> {
    info!(
        inputs:? = args.inputs,
        output_dir = args.out;
        "Processing token documents"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let sources = args
        .inputs
        .iter()
        .map(|input| -> Result<_, TokenloomError> {
            Ok((input.as_str(), fs::read_to_string(input)?))
        })
        .collect::<Result<Vec<_>, TokenloomError>>()?;

    let builder = TokenBuilder::new(app_config)?;
    let tokens = builder.load(
        sources
            .iter()
            .map(|(name, source)| (*name, source.as_str())),
    )?;

    let mut summary = RunSummary::default();
    tally(&mut summary, tokens.diagnostics());
    report_diagnostics(tokens.diagnostics());

    let outputs = builder.build_all(&tokens, &args.platforms, args.theme)?;
    for output in &outputs {
        tally(&mut summary, &output.diagnostics);
        report_diagnostics(&output.diagnostics);
        summary.files += write_output(Path::new(&args.out), output)?;
        summary.platforms += 1;
    }

    info!(
        platforms = summary.platforms,
        files = summary.files,
        errors = summary.errors,
        warnings = summary.warnings;
        "Token build finished"
    );
    Ok(summary)
}

fn tally(summary: &mut RunSummary, diagnostics: &[Diagnostic]) {
    let errors = diagnostics
        .iter()
        .filter(|diag| diag.severity().is_error())
        .count();
    summary.errors += errors;
    summary.warnings += diagnostics.len() - errors;
}

fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for reportable in diagnostics_to_reportables(diagnostics) {
        let rendered = render(&reportable);
        if reportable.is_error() {
            error!("{rendered}");
        } else {
            warn!("{rendered}");
        }
    }
}

fn write_output(out_dir: &Path, output: &BuildOutput) -> Result<usize, TokenloomError> {
    for file in &output.files {
        let path = out_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.contents)?;
        info!(platform:% = output.platform, path = path.display().to_string(); "File written");
    }
    Ok(output.files.len())
}
