//! The seam between the registry and individual calculators.

use pennywise_types::InputValue;
use std::collections::HashMap;

/// Outcome of a named calculation. Errors are user-facing messages.
pub type CalculationResult = Result<InputValue, String>;

/// Arguments keyed by name, borrowed from the caller.
pub type CalculatorArgs<'a> = HashMap<String, &'a InputValue>;

/// A calculator the [`crate::Calculator`] registry can dispatch to.
pub trait CalculatorPlugin: Send + Sync {
    /// Name callers use to select this calculator.
    fn name(&self) -> &'static str;

    /// One line describing the arguments and the result.
    fn description(&self) -> &'static str;

    /// Runs the calculation.
    fn calculate(&self, args: &CalculatorArgs<'_>) -> CalculationResult;
}
