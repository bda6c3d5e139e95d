//! Integration tests for CLI argument handling
//!
//! Tests the --location / --locale / --raw-country-code flags from the
//! command line.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_citydash"))
        .args(args)
        .output()
        .expect("Failed to execute citydash")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("citydash"), "Help should mention citydash");
    assert!(
        stdout.contains("location"),
        "Help should mention --location flag"
    );
    assert!(
        stdout.contains("raw-country-code"),
        "Help should mention --raw-country-code flag"
    );
}

#[test]
fn test_version_flag_exits_successfully() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success());
}

#[test]
fn test_location_without_country_prints_error_and_exits() {
    let output = run_cli(&["--location", "Munich"]);
    assert!(
        !output.status.success(),
        "Expected a location without a country token to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid location"),
        "Should print error message about the invalid location: {}",
        stderr
    );
}

#[test]
fn test_unknown_flag_is_rejected() {
    let output = run_cli(&["--definitely-not-a-flag"]);
    assert!(!output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use citydash::cli::{Cli, StartupConfig};
    use citydash::location::parse_input;
    use clap::Parser;

    #[test]
    fn test_cli_location_round_trips_into_startup_config() {
        let cli = Cli::parse_from(["citydash", "--location", "Munich, Germany"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.initial_search.as_deref(), Some("Munich, Germany"));

        let (city, country) = parse_input(config.initial_search.as_deref().unwrap()).unwrap();
        assert_eq!(city, "Munich");
        assert_eq!(country, "Germany");
    }

    #[test]
    fn test_cli_locale_flows_into_startup_config() {
        let cli = Cli::parse_from(["citydash", "--locale", "es"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.locale, "es");
    }

    #[test]
    fn test_cli_default_is_strict_resolution() {
        let cli = Cli::parse_from(["citydash"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.resolve_country_names);
    }
}
