use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three income sources a bill can be split across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Payer {
    /// The priority payer, consumed before anyone else.
    Salary1,
    /// First proportional payer.
    Salary2,
    /// Second proportional payer.
    Salary3,
}

impl Payer {
    /// All payers in priority order.
    pub const ALL: [Self; 3] = [Self::Salary1, Self::Salary2, Self::Salary3];

    /// Field name used in messages and loosely typed argument maps.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Salary1 => "salary1",
            Self::Salary2 => "salary2",
            Self::Salary3 => "salary3",
        }
    }

    /// Position of the payer in `ALL`.
    pub const fn index(self) -> usize {
        match self {
            Self::Salary1 => 0,
            Self::Salary2 => 1,
            Self::Salary3 => 2,
        }
    }
}

impl fmt::Display for Payer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Amounts a bill split is computed from.
///
/// Amounts are plain currency units (not cents). `salary3` is optional for
/// callers and defaults to zero, both through [`AllocationInput::new`] and
/// when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationInput {
    /// Priority payer.
    pub salary1: f64,
    /// Second salary.
    pub salary2: f64,
    /// Third salary, zero when absent.
    #[serde(default)]
    pub salary3: f64,
    /// The bill to be covered.
    pub bill_amount: f64,
}

impl AllocationInput {
    /// Two-salary input; `salary3` is zero.
    pub const fn new(salary1: f64, salary2: f64, bill_amount: f64) -> Self {
        Self { salary1, salary2, salary3: 0.0, bill_amount }
    }

    /// Sets the third salary.
    #[must_use]
    pub const fn with_salary3(mut self, salary3: f64) -> Self {
        self.salary3 = salary3;
        self
    }

    /// The salary belonging to `payer`.
    pub const fn salary(&self, payer: Payer) -> f64 {
        match payer {
            Payer::Salary1 => self.salary1,
            Payer::Salary2 => self.salary2,
            Payer::Salary3 => self.salary3,
        }
    }

    /// Sum of the three salaries, unrounded.
    pub fn total_salaries(&self) -> f64 {
        self.salary1 + self.salary2 + self.salary3
    }
}

/// Outcome of a bill split.
///
/// Failures are reported through `success` and `error_message` rather than
/// as an error value so the record can be handed to a display layer as is.
/// A failed result always carries zero payments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    /// Amount paid from salary 1.
    pub salary1_payment: f64,
    /// Amount paid from salary 2.
    pub salary2_payment: f64,
    /// Amount paid from salary 3.
    pub salary3_payment: f64,
    /// Sum of the three payments.
    pub total_distributed: f64,
    /// Whether the whole bill was allocated.
    pub success: bool,
    /// Human readable reason when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AllocationResult {
    /// Successful result with nothing to pay.
    pub fn settled_with_nothing() -> Self {
        Self { success: true, ..Self::default() }
    }

    /// Failed result carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, error_message: Some(message.into()), ..Self::default() }
    }

    /// The payment made by `payer`.
    pub const fn payment(&self, payer: Payer) -> f64 {
        match payer {
            Payer::Salary1 => self.salary1_payment,
            Payer::Salary2 => self.salary2_payment,
            Payer::Salary3 => self.salary3_payment,
        }
    }

    /// Payments in priority order.
    pub const fn payments(&self) -> [f64; 3] {
        [self.salary1_payment, self.salary2_payment, self.salary3_payment]
    }
}

/// Share of each salary committed to the bill, in percent of that salary.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionPercentages {
    /// Percentage of salary 1 used.
    pub salary1_percentage: f64,
    /// Percentage of salary 2 used.
    pub salary2_percentage: f64,
    /// Percentage of salary 3 used.
    pub salary3_percentage: f64,
}

impl ContributionPercentages {
    /// The percentage for `payer`.
    pub const fn percentage(&self, payer: Payer) -> f64 {
        match payer {
            Payer::Salary1 => self.salary1_percentage,
            Payer::Salary2 => self.salary2_percentage,
            Payer::Salary3 => self.salary3_percentage,
        }
    }
}

/// Figures shown alongside the inputs before a split is computed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    /// Sum of all salaries.
    pub total_salaries: f64,
    /// The bill.
    pub bill_amount: f64,
    /// Part of the bill salary 1 cannot absorb; only set when salary 1 is
    /// nonzero and smaller than the bill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excess_over_priority: Option<f64>,
    /// Bill as a percentage of total salaries, zero when there are none.
    pub committed_percentage: f64,
}
