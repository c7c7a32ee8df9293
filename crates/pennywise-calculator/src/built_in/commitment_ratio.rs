//! Commitment Ratio Calculator
//!
//! Percentage of total household income a bill takes:
//!
//! result = bill_amount / (salary1 + salary2 + salary3) * 100
//!
//! Returns 0 when there is no income. Inputs are not validated, so a bill
//! larger than the income yields more than 100.

use pennywise_types::{AllocationInput, InputValue};

use crate::CalculatorInputs;
use crate::allocation::summarize;
use crate::plugin::{CalculationResult, CalculatorArgs, CalculatorPlugin};

#[derive(Debug, Default)]
pub struct CommitmentRatioCalculator;

impl CalculatorPlugin for CommitmentRatioCalculator {
    fn name(&self) -> &'static str {
        "commitment_ratio"
    }

    fn description(&self) -> &'static str {
        "Bill as a percentage of total income"
    }

    fn calculate(&self, args: &CalculatorArgs<'_>) -> CalculationResult {
        let inputs = CalculatorInputs::new(args);
        let input = AllocationInput {
            salary1: inputs.get_optional_amount("salary1")?,
            salary2: inputs.get_optional_amount("salary2")?,
            salary3: inputs.get_optional_amount("salary3")?,
            bill_amount: inputs.bill_amount()?,
        };
        Ok(InputValue::Float(summarize(&input).committed_percentage))
    }
}
