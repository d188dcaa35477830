//! Command dispatch tests against temp files.
//!
//! Settings come from a temp config via `load_layers`, never from the
//! host's global config or `TREEBOX_*` variables.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use treebox::cli::commands::execute_with_settings;
use treebox::cli::{Cli, CliError, Commands};
use treebox::config::Settings;
use treebox::exitcode;
use treebox::util::testing::init_test_setup;

const SAMPLE: &str = "A\n+--B\n|  +--C\n|  +--D\n|     +--G\n+--F\n";

struct Workspace {
    dir: TempDir,
    settings: Settings,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("treebox.toml");
        fs::write(&config, "line_ending = \"lf\"\ndisplay = \"ascii\"\n").unwrap();
        let settings = Settings::load_layers(None, Some(&config)).unwrap();
        Self { dir, settings }
    }

    fn write_tree(&self, content: &str) -> PathBuf {
        let path = self.dir.path().join("tree.txt");
        fs::write(&path, content).unwrap();
        path
    }

    fn run(&self, args: &[&str]) -> Result<(), CliError> {
        let cli = Cli::try_parse_from(std::iter::once("treebox").chain(args.iter().copied()))
            .expect("valid arguments");
        execute_with_settings(&cli, &self.settings)
    }
}

#[test]
fn given_canonical_file_when_fmt_check_then_ok() {
    init_test_setup();
    let ws = Workspace::new();
    let path = ws.write_tree(SAMPLE);

    ws.run(&["fmt", "--check", path.to_str().unwrap()]).unwrap();
}

#[test]
fn given_sloppy_file_when_fmt_check_then_not_canonical() {
    init_test_setup();
    let ws = Workspace::new();
    let path = ws.write_tree("\n\nA\n+--   B   \n");

    let err = ws.run(&["fmt", "--check", path.to_str().unwrap()]).unwrap_err();

    assert!(matches!(err, CliError::NotCanonical(_)));
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_sloppy_file_when_fmt_then_prints_without_error() {
    init_test_setup();
    let ws = Workspace::new();
    let path = ws.write_tree("\n\nA\n+--   B   \n");

    ws.run(&["fmt", path.to_str().unwrap()]).unwrap();
}

#[test]
fn given_blank_file_when_fmt_then_ok() {
    let ws = Workspace::new();
    let path = ws.write_tree("   \n");

    ws.run(&["fmt", path.to_str().unwrap()]).unwrap();
}

#[test]
fn given_tree_file_when_running_read_commands_then_ok() {
    init_test_setup();
    let ws = Workspace::new();
    let path = ws.write_tree(SAMPLE);
    let input = path.to_str().unwrap();

    ws.run(&["show", input]).unwrap();
    ws.run(&["show", "--style", "unicode", input]).unwrap();
    ws.run(&["stats", input]).unwrap();
    ws.run(&["path", input, "G", "F"]).unwrap();
    ws.run(&["config"]).unwrap();
}

#[test]
fn given_unknown_label_when_path_then_label_not_found() {
    init_test_setup();
    let ws = Workspace::new();
    let path = ws.write_tree(SAMPLE);

    let err = ws.run(&["path", path.to_str().unwrap(), "G", "Z"]).unwrap_err();

    assert!(matches!(err, CliError::LabelNotFound(ref label) if label == "Z"));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_blank_file_when_stats_then_empty_input() {
    let ws = Workspace::new();
    let path = ws.write_tree("  \n\n");

    let err = ws.run(&["stats", path.to_str().unwrap()]).unwrap_err();

    assert!(matches!(err, CliError::EmptyInput));
}

#[test]
fn given_missing_file_when_show_then_noinput() {
    let ws = Workspace::new();
    let missing = ws.dir.path().join("absent.txt");

    let err = ws.run(&["show", missing.to_str().unwrap()]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_missing_config_file_when_loading_then_config_exit_code() {
    let ws = Workspace::new();
    let missing = ws.dir.path().join("missing.toml");

    let err = CliError::from(Settings::load_layers(None, Some(&missing)).unwrap_err());

    assert!(matches!(err, CliError::Config(_)));
    assert_eq!(err.exit_code(), exitcode::CONFIG);
}

#[test]
fn given_show_without_style_when_parsing_then_style_deferred_to_settings() {
    let cli = Cli::try_parse_from(["treebox", "show", "tree.txt"]).unwrap();
    assert!(matches!(cli.command, Commands::Show { style: None, .. }));
}
