//! Contribution Percentages Calculator
//!
//! Same arguments as `salary_split`; returns the share of each salary used,
//! in percent of that salary.

use pennywise_types::InputValue;

use super::salary_split::failure_message;
use crate::CalculatorInputs;
use crate::allocation::{allocate, contribution_percentages};
use crate::plugin::{CalculationResult, CalculatorArgs, CalculatorPlugin};

#[derive(Debug, Default)]
pub struct ContributionPercentagesCalculator;

impl CalculatorPlugin for ContributionPercentagesCalculator {
    fn name(&self) -> &'static str {
        "contribution_percentages"
    }

    fn description(&self) -> &'static str {
        "Share of each salary used by the split, in percent"
    }

    fn calculate(&self, args: &CalculatorArgs<'_>) -> CalculationResult {
        let input = CalculatorInputs::new(args).allocation_input()?;
        let result = allocate(&input);
        if !result.success {
            return Err(failure_message(result));
        }

        let percentages = contribution_percentages(&input, &result);
        Ok([
            ("salary1Percentage", InputValue::Float(percentages.salary1_percentage)),
            ("salary2Percentage", InputValue::Float(percentages.salary2_percentage)),
            ("salary3Percentage", InputValue::Float(percentages.salary3_percentage)),
        ]
        .into_iter()
        .collect())
    }
}
