//! Text and JSON renderings of a split.

use crate::config::DisplayConfig;
use pennywise_types::{
    AllocationInput, AllocationResult, AllocationSummary, ContributionPercentages, InputValue,
    Payer,
};
use serde::Serialize;
use std::fmt::Write as _;

/// Everything computed for one invocation, serialized for `--format json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitReport {
    pub input: AllocationInput,
    pub result: AllocationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentages: Option<ContributionPercentages>,
    pub summary: AllocationSummary,
}

fn payer_label(payer: Payer) -> &'static str {
    match payer {
        Payer::Salary1 => "Salary 1 (priority)",
        Payer::Salary2 => "Salary 2",
        Payer::Salary3 => "Salary 3",
    }
}

/// The split as a small table.
///
/// Rows are shown only for salaries above zero. A failed split renders the
/// error message alone, never a partial table.
pub fn render_split_text(report: &SplitReport, display: &DisplayConfig) -> String {
    let format = display.currency_format();
    let mut out = String::new();

    if !report.result.success {
        let message = report.result.error_message.as_deref().unwrap_or("allocation failed");
        let _ = writeln!(out, "Error: {message}");
        return out;
    }

    let _ = writeln!(out, "Bill split");
    for payer in Payer::ALL {
        if report.input.salary(payer) <= 0.0 {
            continue;
        }
        let percentage = report
            .percentages
            .map(|p| format.format_percentage(p.percentage(payer), display.percentage_decimals))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:<24}{:>18}  {} of salary",
            payer_label(payer),
            format.format_currency(report.result.payment(payer)),
            percentage
        );
        if payer == Payer::Salary1
            && report.result.salary1_payment >= report.input.salary1
            && report.input.bill_amount > report.input.salary1
        {
            let _ = writeln!(out, "  {:<24}fully used, excess split below", "");
        }
    }
    let _ = writeln!(
        out,
        "  {:<24}{:>18}",
        "Total",
        format.format_currency(report.result.total_distributed)
    );
    out.push_str(&render_summary_text(&report.summary, display));
    out
}

/// The figures shown before splitting.
pub fn render_summary_text(summary: &AllocationSummary, display: &DisplayConfig) -> String {
    let format = display.currency_format();
    let mut out = String::new();
    let _ = writeln!(out, "Summary");
    let _ = writeln!(
        out,
        "  {:<24}{:>18}",
        "Total salaries",
        format.format_currency(summary.total_salaries)
    );
    let _ = writeln!(out, "  {:<24}{:>18}", "Bill", format.format_currency(summary.bill_amount));
    if let Some(excess) = summary.excess_over_priority {
        let _ = writeln!(
            out,
            "  {:<24}{:>18}",
            "Excess (salary 2 + 3)",
            format.format_currency(excess)
        );
    }
    let _ = writeln!(
        out,
        "  {:<24}{:>18}",
        "Income committed",
        format.format_percentage(summary.committed_percentage, display.percentage_decimals)
    );
    out
}

/// A calculator result, one `name  value` line per field of an object.
pub fn render_calculation_text(value: &InputValue, display: &DisplayConfig) -> String {
    let mut out = String::new();
    match value {
        InputValue::Object(fields) => {
            for (name, field) in fields {
                let _ = writeln!(out, "  {name:<24}{:>18}", plain_value(field, display));
            }
        }
        other => {
            let _ = writeln!(out, "{}", plain_value(other, display));
        }
    }
    out
}

fn plain_value(value: &InputValue, display: &DisplayConfig) -> String {
    match value {
        InputValue::String(text) => text.clone(),
        InputValue::Float(number) => {
            let fixed = format!("{number:.prec$}", prec = display.percentage_decimals.max(2));
            fixed.replace('.', &display.decimal_separator.to_string())
        }
        other => other.to_string(),
    }
}

/// A calculator result as plain JSON, without enum tags.
pub fn calculation_json(value: &InputValue) -> serde_json::Value {
    match value {
        InputValue::String(text) => serde_json::Value::String(text.clone()),
        InputValue::Integer(number) => serde_json::Value::from(*number),
        InputValue::Float(number) => serde_json::Number::from_f64(*number)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        InputValue::Boolean(flag) => serde_json::Value::Bool(*flag),
        InputValue::Object(fields) => serde_json::Value::Object(
            fields.iter().map(|(name, field)| (name.clone(), calculation_json(field))).collect(),
        ),
        InputValue::Null => serde_json::Value::Null,
    }
}

pub fn render_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
