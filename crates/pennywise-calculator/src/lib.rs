#![deny(warnings)]
//! Bill splitting for the pennywise household budget tools.
//!
//! The heart of the crate is [`allocation`]: a pure function that decides how
//! much of a shared bill each of up to three salaries pays. Salary 1 pays
//! first; any remainder is shared by salaries 2 and 3 in proportion to their
//! size, to the cent.
//!
//! Presentation layers that only hold loosely typed form values can go
//! through the named calculators in [`calculator`] instead.

use pennywise_types::{AllocationInput, InputValue};

pub mod allocation;
pub mod built_in;
pub mod calculator;
pub mod error;
pub mod money;
pub mod plugin;

pub use allocation::{
    Allocation, allocate, contribution_percentages, payments_of, percentages_of, summarize,
    try_allocate, validate,
};
pub use calculator::Calculator;
pub use plugin::{CalculationResult, CalculatorArgs, CalculatorPlugin};
pub use error::{AllocationError, ParseAmountError};
pub use money::{Cents, CurrencyFormat, parse_amount, round2};

/// Typed access to the arguments handed to a calculator plugin.
#[derive(Debug)]
pub struct CalculatorInputs<'a> {
    variables: &'a CalculatorArgs<'a>,
}

impl<'a> CalculatorInputs<'a> {
    /// Creates a new `CalculatorInputs`.
    pub fn new(variables: &'a CalculatorArgs<'a>) -> Self {
        Self { variables }
    }

    /// Gets a required amount. Text is parsed with [`parse_amount`].
    pub fn get_amount(&self, name: &str) -> Result<f64, String> {
        match self.variables.get(name) {
            Some(InputValue::Float(f)) => Ok(*f),
            Some(InputValue::Integer(i)) => Ok(*i as f64),
            Some(InputValue::String(s)) => {
                parse_amount(s).map_err(|e| format!("Invalid argument '{name}': {e}"))
            }
            Some(other) => Err(format!(
                "Invalid argument '{name}': expected amount, found {}",
                other.type_name()
            )),
            None => Err(format!("Required amount '{name}' was not found.")),
        }
    }

    /// Gets an amount that defaults to zero when missing or null.
    pub fn get_optional_amount(&self, name: &str) -> Result<f64, String> {
        match self.variables.get(name) {
            None | Some(InputValue::Null) => Ok(0.0),
            Some(_) => self.get_amount(name),
        }
    }

    /// Gets the bill from `bill_amount`, or from `bill` when `bill_amount`
    /// is absent.
    pub fn bill_amount(&self) -> Result<f64, String> {
        if self.variables.contains_key("bill_amount") {
            self.get_amount("bill_amount")
        } else {
            self.get_amount("bill")
        }
    }

    /// Reads the salaries and the bill; `salary3` is optional.
    pub fn allocation_input(&self) -> Result<AllocationInput, String> {
        let bill_amount = self.bill_amount()?;
        Ok(AllocationInput {
            salary1: self.get_amount("salary1")?,
            salary2: self.get_amount("salary2")?,
            salary3: self.get_optional_amount("salary3")?,
            bill_amount,
        })
    }
}
