use clap::Parser;
use pennywise_cli::config::{ConfigSource, LogFormat, PennywiseConfig};
use pennywise_cli::{Cli, Command, OutputFormat};
use std::fs;

fn run(args: &[&str]) -> (bool, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let succeeded = cli.execute(&PennywiseConfig::default(), &mut out).unwrap();
    (succeeded, String::from_utf8(out).unwrap())
}

#[test]
fn split_prints_each_payment() {
    let (ok, text) = run(&[
        "pennywise", "split", "--salary1", "2.000,00", "--salary2", "1000", "--salary3", "500",
        "--bill", "R$ 2.750,00",
    ]);
    assert!(ok);
    assert!(text.contains("R$ 2.000,00"), "{text}");
    assert!(text.contains("R$ 500,00"), "{text}");
    assert!(text.contains("R$ 250,00"), "{text}");
    assert!(text.contains("R$ 2.750,00"), "{text}");
}

#[test]
fn split_reports_rejection() {
    let (ok, text) =
        run(&["pennywise", "split", "--salary1", "100", "--salary2", "50", "--bill", "200"]);
    assert!(!ok);
    assert!(text.starts_with("Error: total salaries (150.00)"), "{text}");
}

#[test]
fn negative_amounts_reach_the_engine() {
    let (ok, text) =
        run(&["pennywise", "split", "--salary1", "-1", "--salary2", "0", "--bill", "0"]);
    assert!(!ok);
    assert_eq!(text, "Error: salary1 cannot be negative\n");
}

#[test]
fn split_as_json() {
    let (ok, text) = run(&[
        "pennywise", "--format", "json", "split", "--salary1", "3000", "--salary2", "2000",
        "--bill", "2500",
    ]);
    assert!(ok);
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["result"]["salary1Payment"], 2500.0);
    assert_eq!(json["result"]["success"], true);
    assert_eq!(json["input"]["salary3"], 0.0);
}

#[test]
fn summary_command() {
    let (ok, text) = run(&[
        "pennywise", "summary", "--salary1", "2000", "--salary2", "1000", "--salary3", "1000",
        "--bill", "2750",
    ]);
    assert!(ok);
    assert!(text.contains("R$ 4.000,00"), "{text}");
    assert!(text.contains("R$ 750,00"), "{text}");
    assert!(text.contains("68,8%"), "{text}");
}

#[test]
fn unreadable_amount_is_an_error() {
    let cli =
        Cli::try_parse_from(["pennywise", "split", "--salary1", "abc", "--salary2", "1", "--bill", "1"])
            .unwrap();
    let err = cli.execute(&PennywiseConfig::default(), &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("could not read --salary1"), "{err:#}");
}

#[test]
fn parses_global_options_after_subcommand() {
    let cli = Cli::try_parse_from(["pennywise", "config", "--format", "json"]).unwrap();
    assert!(matches!(cli.command, Command::Config));
    assert_eq!(cli.format, OutputFormat::Json);
}

#[test]
fn config_command_prints_toml() {
    let (ok, text) = run(&["pennywise", "config"]);
    assert!(ok);
    assert!(text.contains("[display]"), "{text}");
    assert!(text.contains("[logging]"), "{text}");
}

#[test]
fn load_reads_file_and_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pennywise.toml");
    fs::write(&path, "[display]\ncurrency_symbol = \"$\"\n[logging]\nformat = \"json\"\n").unwrap();

    let loaded = PennywiseConfig::load(Some(&path)).unwrap();
    assert_eq!(loaded.source, ConfigSource::File(path.clone()));
    assert_eq!(loaded.config.display.currency_symbol, "$");
    assert_eq!(loaded.config.logging.format, LogFormat::Json);

    let missing = dir.path().join("absent.toml");
    let loaded = PennywiseConfig::load(Some(&missing)).unwrap();
    assert_eq!(loaded.source, ConfigSource::Defaults(missing));
    assert_eq!(loaded.config, PennywiseConfig::default());
}

#[test]
fn load_rejects_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[display\n").unwrap();
    let err = PennywiseConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("invalid configuration"), "{err}");
}

#[test]
fn calc_without_name_lists_calculators() {
    let (ok, text) = run(&["pennywise", "calc"]);
    assert!(ok);
    let names: Vec<&str> = text.lines().filter_map(|line| line.split_whitespace().next()).collect();
    assert_eq!(names, ["commitment_ratio", "contribution_percentages", "salary_split"]);
}

#[test]
fn calc_runs_named_calculator() {
    let (ok, text) = run(&[
        "pennywise", "calc", "salary_split", "--arg", "salary1=3000", "--arg", "salary2=2.000,00",
        "--arg", "bill_amount=R$ 2.500,00",
    ]);
    assert!(ok);
    let line = text.lines().find(|line| line.contains("salary1Payment")).unwrap();
    assert!(line.ends_with("2500,00"), "{text}");
}

#[test]
fn calc_as_plain_json() {
    let (ok, text) = run(&[
        "pennywise", "-f", "json", "calc", "commitment_ratio", "-a", "salary1=2000", "-a",
        "salary2=1000", "-a", "salary3=1000", "-a", "bill=2750",
    ]);
    assert!(ok);
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json, serde_json::json!(68.75));
}

#[test]
fn calc_reports_calculator_errors() {
    let (ok, text) = run(&[
        "pennywise", "calc", "salary_split", "-a", "salary1=1", "-a", "salary2=1", "-a",
        "bill_amount=abc",
    ]);
    assert!(!ok);
    assert!(text.starts_with("Error: Invalid argument 'bill_amount'"), "{text}");

    let (ok, text) = run(&["pennywise", "calc", "payroll_tax"]);
    assert!(!ok);
    assert_eq!(text, "Error: calculator 'payroll_tax' not found\n");
}

#[test]
fn calc_argument_needs_key_and_value() {
    assert!(Cli::try_parse_from(["pennywise", "calc", "salary_split", "-a", "salary1"]).is_err());
    assert!(Cli::try_parse_from(["pennywise", "calc", "salary_split", "-a", "=3"]).is_err());
}
