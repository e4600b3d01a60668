use std::{fs, path::PathBuf};

use tempfile::tempdir;

use tokenloom::platform::{Platform, Theme};
use tokenloom_cli::{Args, run};

/// Demo documents live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(&dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
                })
                .collect()
        })
        .unwrap_or_default();

    // Sort for consistent test output
    files.sort();
    files
}

fn args(inputs: &[PathBuf], out: &str) -> Args {
    Args {
        inputs: inputs
            .iter()
            .map(|path| path.to_string_lossy().to_string())
            .collect(),
        out: out.to_string(),
        platforms: Vec::new(),
        theme: None,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_all_platforms() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let out = temp_dir.path().to_string_lossy().to_string();

    let inputs = [
        demos_path().join("fluentui-tokens.json"),
        demos_path().join("accent-w3c.json"),
    ];
    let mut args = args(&inputs, &out);
    args.theme = Some(Theme::Light);

    let summary = run(&args).expect("Demo tokens should build");
    assert_eq!(summary.platforms, Platform::ALL.len());
    assert_eq!(summary.files, 17);

    for file in [
        "debug/fluentuitokens-debug.json",
        "json/fluentuitokens-grouped.json",
        "reference/fluentuitokens.html",
        "web/fluentuitokens.css",
        "web/fluentuitokens-flat.css",
        "web/fluentuitokens.scss",
        "ios/FluentUITokens.swift",
        "ios/FluentUIColorTokens.swift",
        "ios/FluentUISizeTokens.swift",
        "ios/FluentUIFontTokens.swift",
        "reactnative/fluentuitokens.json",
        "winui/FluentUITokens.xaml",
        "winui/FluentUITokensThemed.xaml",
        "react/fluentuitokens.js",
        "w3c/fluentuitokens.json",
        "figmatokens/fluentuitokens.json",
        "dcs/fluentuitokens-light.css",
    ] {
        assert!(temp_dir.path().join(file).is_file(), "Missing {file}");
    }

    let css = fs::read_to_string(temp_dir.path().join("web/fluentuitokens.css")).unwrap();
    assert!(css.contains("  --accent-fill-color-rest: var(--global-color-blue);\n"));
    assert!(css.contains("  --accent-fill-color-selected: var(--global-color-teal);\n"));
    assert!(css.contains("  --global-color-berry-100: #c239b3;\n"));
    assert!(css.contains("  --global-color-berry-140: "));

    let flat = fs::read_to_string(temp_dir.path().join("web/fluentuitokens-flat.css")).unwrap();
    assert!(flat.contains("  --accent-fill-color-rest: #0f6cbd;\n"));
}

#[test]
fn e2e_selected_platforms_only() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let out = temp_dir.path().to_string_lossy().to_string();

    let mut args = args(&[demos_path().join("fluentui-tokens.json")], &out);
    args.platforms = vec![Platform::Winui, Platform::Ios];

    let summary = run(&args).expect("Demo tokens should build");
    assert_eq!(summary.platforms, 2);
    assert_eq!(summary.files, 6);
    assert!(!temp_dir.path().join("web").exists());

    let xaml = fs::read_to_string(temp_dir.path().join("winui/FluentUITokens.xaml")).unwrap();
    assert!(xaml.contains("<CornerRadius x:Key=\"GlobalCornerRadiusCircular\">18</CornerRadius>"));
}

#[test]
fn e2e_dcs_without_theme_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let out = temp_dir.path().to_string_lossy().to_string();

    let mut args = args(&[demos_path().join("fluentui-tokens.json")], &out);
    args.platforms = vec![Platform::Dcs];

    assert!(run(&args).is_err(), "dcs needs a theme");
}

#[test]
fn e2e_smoke_test_error_examples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let out = temp_dir.path().to_string_lossy().to_string();

    let error_examples = collect_json_files(demos_path().join("errors"));
    assert!(
        !error_examples.is_empty(),
        "No error examples found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();
    for example_path in &error_examples {
        if run(&args(std::slice::from_ref(example_path), &out)).is_ok() {
            unexpectedly_succeeded.push(example_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError examples that succeeded unexpectedly:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error example(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let out = temp_dir.path().to_string_lossy().to_string();

    let missing = temp_dir.path().join("absent.json");
    assert!(run(&args(&[missing], &out)).is_err());
}
