//! Integration tests for Settings layered loading.
//!
//! Precedence: defaults < global file < explicit file < `TREEBOX_*` env vars.
//! File layers are exercised through `load_layers` so the host's global
//! config and environment never leak in.

use std::fs;

use tempfile::TempDir;

use treebox::config::{ConfigError, DisplayStyle, Settings};
use treebox::driver::LineEnding;

#[test]
fn given_no_files_when_loading_layers_then_defaults() {
    let settings = Settings::load_layers(None, None).expect("load defaults");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.line_ending, LineEnding::Lf);
    assert_eq!(settings.display, DisplayStyle::Ascii);
}

#[test]
fn given_missing_global_file_when_loading_layers_then_skipped() {
    let dir = TempDir::new().unwrap();
    let settings =
        Settings::load_layers(Some(&dir.path().join("treebox.toml")), None).expect("load");
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_global_and_explicit_files_when_loading_then_explicit_wins_per_field() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.toml");
    let explicit = dir.path().join("explicit.toml");
    fs::write(&global, "line_ending = \"crlf\"\ndisplay = \"unicode\"\n").unwrap();
    fs::write(&explicit, "display = \"ascii\"\n").unwrap();

    let settings = Settings::load_layers(Some(&global), Some(&explicit)).expect("load");

    // line_ending inherited from global, display overridden
    assert_eq!(settings.line_ending, LineEnding::CrLf);
    assert_eq!(settings.display, DisplayStyle::Ascii);
}

#[test]
fn given_missing_explicit_file_when_loading_then_read_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let result = Settings::load_layers(None, Some(&missing));

    assert!(matches!(result, Err(ConfigError::Read { ref path, .. }) if path == &missing));
}

#[test]
fn given_unknown_enum_value_when_loading_then_parse_error() {
    let dir = TempDir::new().unwrap();
    let explicit = dir.path().join("bad.toml");
    fs::write(&explicit, "line_ending = \"cr\"\n").unwrap();

    let result = Settings::load_layers(None, Some(&explicit));

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn given_loaded_settings_when_rendering_toml_then_parses_back() {
    let settings = Settings {
        line_ending: LineEnding::CrLf,
        display: DisplayStyle::Unicode,
    };
    let rendered = settings.to_toml().unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rendered.toml");
    fs::write(&path, rendered).unwrap();

    assert_eq!(Settings::load_layers(None, Some(&path)).unwrap(), settings);
}

// The only test in this binary that touches the process environment.
#[test]
fn given_env_override_when_applying_then_replaces_file_value() {
    let dir = TempDir::new().unwrap();
    let explicit = dir.path().join("explicit.toml");
    fs::write(&explicit, "display = \"ascii\"\n").unwrap();

    std::env::set_var("TREEBOX_DISPLAY", "unicode");
    let result =
        Settings::load_layers(None, Some(&explicit)).and_then(Settings::with_env_overrides);
    std::env::remove_var("TREEBOX_DISPLAY");

    let settings = result.expect("env override applies");
    assert_eq!(settings.display, DisplayStyle::Unicode);
    assert_eq!(settings.line_ending, LineEnding::Lf);
}
