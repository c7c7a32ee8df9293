//! Salary Split Calculator
//!
//! Splits `bill_amount` (alias `bill`) across `salary1`, `salary2` and the
//! optional `salary3`. Returns an object with `salary1Payment`,
//! `salary2Payment`, `salary3Payment` and `totalDistributed`, or the
//! allocation's error message.

use pennywise_types::{AllocationResult, InputValue};

use crate::CalculatorInputs;
use crate::allocation::allocate;
use crate::plugin::{CalculationResult, CalculatorArgs, CalculatorPlugin};

#[derive(Debug, Default)]
pub struct SalarySplitCalculator;

impl CalculatorPlugin for SalarySplitCalculator {
    fn name(&self) -> &'static str {
        "salary_split"
    }

    fn description(&self) -> &'static str {
        "Splits bill_amount (or bill) across salary1, salary2 and optional salary3"
    }

    fn calculate(&self, args: &CalculatorArgs<'_>) -> CalculationResult {
        let input = CalculatorInputs::new(args).allocation_input()?;
        let result = allocate(&input);
        if !result.success {
            return Err(failure_message(result));
        }

        Ok([
            ("salary1Payment", InputValue::Float(result.salary1_payment)),
            ("salary2Payment", InputValue::Float(result.salary2_payment)),
            ("salary3Payment", InputValue::Float(result.salary3_payment)),
            ("totalDistributed", InputValue::Float(result.total_distributed)),
        ]
        .into_iter()
        .collect())
    }
}

pub(crate) fn failure_message(result: AllocationResult) -> String {
    result.error_message.unwrap_or_else(|| "allocation failed".to_string())
}
