//! Error types for the allocation engine and the amount parser.

use thiserror::Error;

/// Why a bill could not be split.
///
/// The `Display` text is what ends up in `AllocationResult::error_message`
/// and is shown to users verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// An input amount is below zero.
    #[error("{field} cannot be negative")]
    NegativeAmount { field: &'static str },

    /// An input amount is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFiniteAmount { field: &'static str },

    /// An input amount does not fit the fixed-point representation.
    #[error("{field} exceeds the largest supported amount ({max:.2})")]
    AmountTooLarge { field: &'static str, max: f64 },

    /// The salaries together cannot cover the bill.
    #[error("total salaries ({total_salaries:.2}) are insufficient to cover the bill ({bill_amount:.2})")]
    InsufficientFunds { total_salaries: f64, bill_amount: f64 },

    /// Every salary is zero while something is still owed.
    #[error("no salaries available to cover the bill.")]
    NoFundsAvailable,

    /// Salary 1 is exhausted and salaries 2 and 3 are both zero.
    #[error("salary2 and salary3 insufficient to cover the remainder")]
    RemainderUncovered,
}

impl AllocationError {
    /// Stable machine readable code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::NonFiniteAmount { .. } => "NON_FINITE_AMOUNT",
            Self::AmountTooLarge { .. } => "AMOUNT_TOO_LARGE",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::NoFundsAvailable => "NO_FUNDS_AVAILABLE",
            Self::RemainderUncovered => "REMAINDER_UNCOVERED",
        }
    }

    /// Whether the error can only come from a guard behind `validate`.
    pub const fn is_defensive(&self) -> bool {
        matches!(self, Self::NoFundsAvailable | Self::RemainderUncovered)
    }
}

/// Why user-typed text could not be read as an amount.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    /// Nothing numeric was typed.
    #[error("'{input}' does not contain an amount")]
    NoDigits { input: String },

    /// Digits were found but do not form a number.
    #[error("'{input}' is not a valid amount")]
    Malformed { input: String },
}
