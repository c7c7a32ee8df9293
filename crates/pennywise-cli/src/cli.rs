//! Argument parsing and command dispatch.

use crate::config::PennywiseConfig;
use crate::render::{
    SplitReport, calculation_json, render_calculation_text, render_json, render_split_text,
    render_summary_text,
};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pennywise_calculator::{
    Calculator, CalculatorArgs, allocate, parse_amount, percentages_of, summarize,
};
use pennywise_types::{AllocationInput, InputValue};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Split a shared bill across up to three salaries
#[derive(Parser, Debug)]
#[command(name = "pennywise")]
#[command(about = "Split a shared bill: salary 1 pays first, salaries 2 and 3 share the rest")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to $PENNYWISE_CONFIG_PATH or pennywise.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute who pays what
    Split(AmountArgs),

    /// Show totals, excess over salary 1 and income committed
    Summary(AmountArgs),

    /// Run a named calculator, or list them when no name is given
    Calc(CalcArgs),

    /// Print the effective configuration
    Config,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Amounts as typed, e.g. `3000`, `2.500,50` or `R$ 1.234,56`.
#[derive(Args, Debug, Clone)]
pub struct AmountArgs {
    /// Priority salary, used in full before any other
    #[arg(long, allow_hyphen_values = true)]
    pub salary1: String,

    /// Second salary
    #[arg(long, allow_hyphen_values = true)]
    pub salary2: String,

    /// Third salary
    #[arg(long, allow_hyphen_values = true)]
    pub salary3: Option<String>,

    /// Bill to split
    #[arg(long, allow_hyphen_values = true)]
    pub bill: String,
}

/// A calculator name and its `key=value` arguments.
#[derive(Args, Debug, Clone)]
pub struct CalcArgs {
    /// Calculator to run
    pub name: Option<String>,

    /// Argument as `key=value`, e.g. `--arg salary1=3000`
    #[arg(short, long = "arg", value_parser = parse_key_value, allow_hyphen_values = true)]
    pub args: Vec<(String, String)>,
}

fn parse_key_value(text: &str) -> Result<(String, String), String> {
    let (key, value) =
        text.split_once('=').ok_or_else(|| format!("expected key=value, found '{text}'"))?;
    if key.trim().is_empty() {
        return Err(format!("missing argument name in '{text}'"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

impl AmountArgs {
    pub fn to_input(&self) -> Result<AllocationInput> {
        let read = |name: &str, text: &str| {
            parse_amount(text).with_context(|| format!("could not read --{name}"))
        };
        Ok(AllocationInput {
            salary1: read("salary1", &self.salary1)?,
            salary2: read("salary2", &self.salary2)?,
            salary3: read("salary3", self.salary3.as_deref().unwrap_or_default())?,
            bill_amount: read("bill", &self.bill)?,
        })
    }
}

impl Cli {
    /// Runs the command, writing results to `out`.
    ///
    /// Returns `Ok(false)` when the split was rejected; the rejection has
    /// already been rendered.
    pub fn execute(&self, config: &PennywiseConfig, out: &mut impl Write) -> Result<bool> {
        match &self.command {
            Command::Split(args) => self.split(args, config, out),
            Command::Summary(args) => self.summary(args, config, out),
            Command::Calc(args) => self.calc(args, config, out),
            Command::Config => {
                out.write_all(config.to_toml_string()?.as_bytes())?;
                Ok(true)
            }
        }
    }

    fn split(&self, args: &AmountArgs, config: &PennywiseConfig, out: &mut impl Write) -> Result<bool> {
        let input = args.to_input()?;
        debug!(?input, "splitting bill");

        let report = SplitReport {
            input,
            result: allocate(&input),
            percentages: percentages_of(&input),
            summary: summarize(&input),
        };
        info!(
            success = report.result.success,
            total_distributed = report.result.total_distributed,
            "bill split computed"
        );

        let rendered = match self.format {
            OutputFormat::Text => render_split_text(&report, &config.display),
            OutputFormat::Json => render_json(&report)? + "\n",
        };
        out.write_all(rendered.as_bytes())?;
        Ok(report.result.success)
    }

    fn calc(&self, args: &CalcArgs, config: &PennywiseConfig, out: &mut impl Write) -> Result<bool> {
        let calculator = Calculator::new();
        let Some(name) = &args.name else {
            for (name, description) in calculator.descriptions() {
                writeln!(out, "{name:<26}{description}")?;
            }
            return Ok(true);
        };

        let values: Vec<(String, InputValue)> = args
            .args
            .iter()
            .map(|(key, value)| (key.clone(), InputValue::String(value.clone())))
            .collect();
        let inputs: CalculatorArgs<'_> = values.iter().map(|(key, value)| (key.clone(), value)).collect();

        match calculator.calculate(name, &inputs) {
            Ok(value) => {
                info!(calculator = %name, "calculation completed");
                let rendered = match self.format {
                    OutputFormat::Text => render_calculation_text(&value, &config.display),
                    OutputFormat::Json => render_json(&calculation_json(&value))? + "\n",
                };
                out.write_all(rendered.as_bytes())?;
                Ok(true)
            }
            Err(message) => {
                debug!(calculator = %name, %message, "calculation rejected");
                writeln!(out, "Error: {message}")?;
                Ok(false)
            }
        }
    }

    fn summary(&self, args: &AmountArgs, config: &PennywiseConfig, out: &mut impl Write) -> Result<bool> {
        let summary = summarize(&args.to_input()?);
        let rendered = match self.format {
            OutputFormat::Text => render_summary_text(&summary, &config.display),
            OutputFormat::Json => render_json(&summary)? + "\n",
        };
        out.write_all(rendered.as_bytes())?;
        Ok(true)
    }
}
