//! Priority-then-proportional bill splitting.
//!
//! Salary 1 pays as much of the bill as it can. Whatever is left is shared
//! by salaries 2 and 3 so that both give up the same fraction of their own
//! amount. Shares are computed in whole cents and any rounding residue is
//! moved onto the larger of the two proportional payers (salary 2 on a
//! tie), which keeps the payments summing to the bill exactly.

use crate::error::AllocationError;
use crate::money::{Cents, round2};
use pennywise_types::{
    AllocationInput, AllocationResult, AllocationSummary, ContributionPercentages, Payer,
};
use tracing::{debug, warn};

/// Largest amount accepted for any single input, in currency units.
pub const MAX_AMOUNT: f64 = 1e15;

const BILL_FIELD: &str = "bill amount";

const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// Payments of a successful split, in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Allocation {
    pub salary1: Cents,
    pub salary2: Cents,
    pub salary3: Cents,
}

impl Allocation {
    /// The payment made by `payer`.
    pub const fn payment(&self, payer: Payer) -> Cents {
        match payer {
            Payer::Salary1 => self.salary1,
            Payer::Salary2 => self.salary2,
            Payer::Salary3 => self.salary3,
        }
    }

    /// Sum of the three payments.
    pub fn total(&self) -> Cents {
        self.salary1 + self.salary2 + self.salary3
    }
}

impl From<Allocation> for AllocationResult {
    fn from(allocation: Allocation) -> Self {
        Self {
            salary1_payment: allocation.salary1.to_amount(),
            salary2_payment: allocation.salary2.to_amount(),
            salary3_payment: allocation.salary3.to_amount(),
            total_distributed: allocation.total().to_amount(),
            success: true,
            error_message: None,
        }
    }
}

/// Checks that every amount is usable and that the salaries cover the bill.
///
/// Amounts are checked in the order salary 1, salary 2, salary 3, bill and
/// the first problem found is reported. Zero salaries and a zero bill are
/// valid.
///
/// The salaries must cover the bill both as entered and once each amount
/// is rounded to whole cents, so an input that passes always splits.
pub fn validate(input: &AllocationInput) -> Result<(), AllocationError> {
    for payer in Payer::ALL {
        check_amount(payer.field_name(), input.salary(payer))?;
    }
    check_amount(BILL_FIELD, input.bill_amount)?;

    let total_salaries = input.total_salaries();
    let short_as_entered = Payer::ALL
        .into_iter()
        .map(|payer| micros(input.salary(payer)))
        .sum::<i128>()
        < micros(input.bill_amount);
    let short_in_cents = Payer::ALL
        .into_iter()
        .map(|payer| Cents::from_amount(input.salary(payer)))
        .fold(Cents::ZERO, |total, salary| total + salary)
        < Cents::from_amount(input.bill_amount);

    if short_as_entered || short_in_cents {
        debug!(total_salaries, bill_amount = input.bill_amount, "salaries do not cover bill");
        return Err(AllocationError::InsufficientFunds {
            total_salaries,
            bill_amount: input.bill_amount,
        });
    }

    Ok(())
}

/// Fixed-point millionths, fine enough to compare typed amounts without
/// float residue from summing.
fn micros(value: f64) -> i128 {
    (value * MICROS_PER_UNIT).round() as i128
}

fn check_amount(field: &'static str, value: f64) -> Result<(), AllocationError> {
    if !value.is_finite() {
        return Err(AllocationError::NonFiniteAmount { field });
    }
    if value < 0.0 {
        return Err(AllocationError::NegativeAmount { field });
    }
    if value > MAX_AMOUNT {
        return Err(AllocationError::AmountTooLarge { field, max: MAX_AMOUNT });
    }
    Ok(())
}

/// Splits the bill, reporting failure as an error.
pub fn try_allocate(input: &AllocationInput) -> Result<Allocation, AllocationError> {
    validate(input)?;

    // Bills below half a cent round to nothing owed.
    let bill = Cents::from_amount(input.bill_amount);
    if bill.is_zero() {
        return Ok(Allocation::default());
    }

    // Unreachable after validate: a bill of a cent or more with no salaries
    // fails the coverage check first.
    if input.total_salaries() == 0.0 {
        warn!(bill_amount = input.bill_amount, "bill owed with no salaries after validation");
        return Err(AllocationError::NoFundsAvailable);
    }

    let salary1 = Cents::from_amount(input.salary1);

    let salary1_payment = bill.min(salary1);
    let remaining = bill - salary1_payment;

    if remaining.is_zero() {
        return Ok(Allocation { salary1: salary1_payment, ..Allocation::default() });
    }

    let (salary2_payment, salary3_payment) = split_remainder(input, remaining)?;

    Ok(Allocation { salary1: salary1_payment, salary2: salary2_payment, salary3: salary3_payment })
}

fn split_remainder(
    input: &AllocationInput,
    remaining: Cents,
) -> Result<(Cents, Cents), AllocationError> {
    let salary2 = Cents::from_amount(input.salary2);
    let salary3 = Cents::from_amount(input.salary3);
    let pool = salary2 + salary3;

    if pool.is_zero() {
        warn!(remaining = %remaining, "remainder owed but salaries 2 and 3 are empty");
        return Err(AllocationError::RemainderUncovered);
    }

    // Unreachable after validate: the rounded salaries cover the rounded bill.
    if remaining > pool {
        warn!(remaining = %remaining, pool = %pool, "remainder exceeds proportional pool");
        return Err(AllocationError::InsufficientFunds {
            total_salaries: input.total_salaries(),
            bill_amount: input.bill_amount,
        });
    }

    let mut salary2_payment =
        salary2.scale(remaining, pool).ok_or(AllocationError::RemainderUncovered)?;
    let mut salary3_payment =
        salary3.scale(remaining, pool).ok_or(AllocationError::RemainderUncovered)?;

    let diff = remaining - (salary2_payment + salary3_payment);
    if !diff.is_zero() {
        debug!(diff = %diff, "reconciling proportional rounding");
        if input.salary2 >= input.salary3 {
            salary2_payment = salary2_payment + diff;
        } else {
            salary3_payment = salary3_payment + diff;
        }
    }

    Ok((salary2_payment, salary3_payment))
}

/// Splits the bill into a tagged result.
///
/// Never panics. On failure every payment is zero and `error_message`
/// holds the reason.
pub fn allocate(input: &AllocationInput) -> AllocationResult {
    match try_allocate(input) {
        Ok(allocation) => {
            debug!(
                salary1 = %allocation.salary1,
                salary2 = %allocation.salary2,
                salary3 = %allocation.salary3,
                "bill allocated"
            );
            allocation.into()
        }
        Err(err) => {
            debug!(code = err.code(), error = %err, "bill allocation rejected");
            AllocationResult::failure(err.to_string())
        }
    }
}

/// The three payments of a successful split, `None` otherwise.
pub fn payments_of(input: &AllocationInput) -> Option<[f64; 3]> {
    let result = allocate(input);
    result.success.then(|| result.payments())
}

/// Percentage of each salary consumed by the split, `None` on failure.
pub fn percentages_of(input: &AllocationInput) -> Option<ContributionPercentages> {
    let result = allocate(input);
    result.success.then(|| contribution_percentages(input, &result))
}

/// Percentages for an already computed result.
///
/// A zero salary contributes zero percent. No rounding is applied.
pub fn contribution_percentages(
    input: &AllocationInput,
    result: &AllocationResult,
) -> ContributionPercentages {
    let percentage = |payer: Payer| {
        let salary = input.salary(payer);
        if salary > 0.0 { result.payment(payer) / salary * 100.0 } else { 0.0 }
    };

    ContributionPercentages {
        salary1_percentage: percentage(Payer::Salary1),
        salary2_percentage: percentage(Payer::Salary2),
        salary3_percentage: percentage(Payer::Salary3),
    }
}

/// Totals displayed next to the inputs, computed without validation.
pub fn summarize(input: &AllocationInput) -> AllocationSummary {
    let total_salaries = input.total_salaries();
    let excess_over_priority = (input.salary1 > 0.0 && input.bill_amount > input.salary1)
        .then(|| round2(input.bill_amount - input.salary1));
    let committed_percentage = if total_salaries > 0.0 {
        input.bill_amount / total_salaries * 100.0
    } else {
        0.0
    };

    AllocationSummary {
        total_salaries,
        bill_amount: input.bill_amount,
        excess_over_priority,
        committed_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(salary1: f64, salary2: f64, salary3: f64, bill_amount: f64) -> AllocationInput {
        AllocationInput::new(salary1, salary2, bill_amount).with_salary3(salary3)
    }

    #[test]
    fn bill_within_priority_salary() {
        let result = allocate(&AllocationInput::new(3000.0, 2000.0, 2500.0));
        assert!(result.success);
        assert_eq!(result.payments(), [2500.0, 0.0, 0.0]);
        assert_eq!(result.total_distributed, 2500.0);
        assert_eq!(result.error_message, None);
    }

    #[test]
    fn remainder_split_proportionally() {
        let result = allocate(&input(2000.0, 1000.0, 500.0, 2750.0));
        assert!(result.success);
        assert_eq!(result.payments(), [2000.0, 500.0, 250.0]);
        assert_eq!(result.total_distributed, 2750.0);
    }

    #[test]
    fn all_zero_is_a_successful_empty_split() {
        let result = allocate(&input(0.0, 0.0, 0.0, 0.0));
        assert_eq!(result, AllocationResult::settled_with_nothing());
    }

    #[test]
    fn sub_cent_bill_owes_nothing() {
        let result = allocate(&input(1.0, 0.0, 0.0, 0.004));
        assert_eq!(result, AllocationResult::settled_with_nothing());
    }

    #[test]
    fn sub_cent_bill_without_salaries_rejected() {
        let err = validate(&input(0.0, 0.0, 0.0, 0.004)).unwrap_err();
        assert!(matches!(err, AllocationError::InsufficientFunds { .. }));
    }

    #[test]
    fn zero_bill_short_circuits() {
        let result = allocate(&input(100.0, 50.0, 25.0, 0.0));
        assert!(result.success);
        assert_eq!(result.payments(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn insufficient_single_salary() {
        let result = allocate(&AllocationInput::new(100.0, 0.0, 150.0));
        assert!(!result.success);
        assert_eq!(result.payments(), [0.0, 0.0, 0.0]);
        assert_eq!(result.total_distributed, 0.0);
    }

    #[test]
    fn insufficient_message_reports_both_totals() {
        let result = allocate(&AllocationInput::new(100.0, 50.0, 200.0));
        assert!(!result.success);
        let message = result.error_message.unwrap();
        assert!(message.contains("150.00"), "{message}");
        assert!(message.contains("200.00"), "{message}");
    }

    #[test]
    fn negative_salary_rejected() {
        let result = allocate(&input(-1.0, 0.0, 0.0, 0.0));
        assert!(!result.success);
        assert_eq!(result.error_message.as_deref(), Some("salary1 cannot be negative"));
    }

    #[test]
    fn negatives_reported_in_field_order() {
        assert_eq!(
            validate(&input(1.0, -1.0, -1.0, -1.0)),
            Err(AllocationError::NegativeAmount { field: "salary2" })
        );
        assert_eq!(
            validate(&input(1.0, 1.0, -1.0, -1.0)),
            Err(AllocationError::NegativeAmount { field: "salary3" })
        );
        assert_eq!(
            validate(&input(1.0, 1.0, 1.0, -1.0)),
            Err(AllocationError::NegativeAmount { field: "bill amount" })
        );
    }

    #[test]
    fn non_finite_amounts_are_validation_failures() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = allocate(&input(bad, 0.0, 0.0, 0.0));
            assert!(!result.success);
            assert_eq!(result.error_message.as_deref(), Some("salary1 must be a finite number"));

            let result = allocate(&input(10.0, 0.0, 0.0, bad));
            assert!(!result.success);
        }
    }

    #[test]
    fn oversized_amount_rejected() {
        assert!(matches!(
            validate(&input(MAX_AMOUNT * 2.0, 0.0, 0.0, 1.0)),
            Err(AllocationError::AmountTooLarge { field: "salary1", .. })
        ));
    }

    #[test]
    fn exact_cover_uses_every_salary() {
        let result = allocate(&input(100.0, 200.0, 300.0, 600.0));
        assert!(result.success);
        assert_eq!(result.payments(), [100.0, 200.0, 300.0]);
    }

    #[test]
    fn thirds_sum_to_remainder() {
        let result = allocate(&input(0.0, 100.0, 200.0, 100.0));
        assert!(result.success);
        assert_eq!(result.payments(), [0.0, 33.33, 66.67]);
        assert_eq!(result.total_distributed, 100.0);
    }

    #[test]
    fn rounding_residue_goes_to_salary2_on_tie() {
        // 0.005 each rounds up to 0.01, one cent too many.
        let result = allocate(&input(0.0, 1.0, 1.0, 0.01));
        assert!(result.success);
        assert_eq!(result.payments(), [0.0, 0.0, 0.01]);
        assert_eq!(result.total_distributed, 0.01);
    }

    #[test]
    fn rounding_residue_goes_to_larger_salary() {
        // Shares of 0.005 and 0.015 both round up.
        let result = allocate(&input(0.0, 1.0, 3.0, 0.02));
        assert!(result.success);
        assert_eq!(result.payments(), [0.0, 0.01, 0.01]);
        assert_eq!(result.total_distributed, 0.02);
    }

    #[test]
    fn salaries_short_once_rounded_to_cents_rejected() {
        // Each salary rounds down to 50.00 while the bill rounds up to 100.01.
        for value in [input(50.004, 50.004, 0.0, 100.008), input(10.004, 0.004, 0.0, 10.006)] {
            assert!(matches!(validate(&value), Err(AllocationError::InsufficientFunds { .. })));
            assert!(!allocate(&value).success);
        }
    }

    #[test]
    fn sub_cent_shortfall_as_entered_rejected() {
        let value = AllocationInput::new(100.0, 0.0, 100.004);
        assert!(matches!(validate(&value), Err(AllocationError::InsufficientFunds { .. })));
        assert!(!allocate(&value).success);
    }

    #[test]
    fn unscalable_share_is_an_error_not_a_zero_payment() {
        // Unvalidated negative salary 2 makes its share unscalable.
        let err = split_remainder(&input(0.0, -1.0, 5.0, 0.0), Cents(100)).unwrap_err();
        assert_eq!(err, AllocationError::RemainderUncovered);
    }

    #[test]
    fn float_residue_does_not_reject_exact_cover() {
        // 0.7 + 0.1 sums to 0.7999999999999999 in f64.
        let result = allocate(&AllocationInput::new(0.7, 0.1, 0.8));
        assert!(result.success);
        assert_eq!(result.payments(), [0.7, 0.1, 0.0]);
    }

    #[test]
    fn allocation_is_deterministic() {
        let value = input(1234.56, 789.01, 234.5, 2000.0);
        assert_eq!(allocate(&value), allocate(&value));
    }

    #[test]
    fn payments_of_mirrors_allocate() {
        assert_eq!(payments_of(&input(2000.0, 1000.0, 500.0, 2750.0)), Some([2000.0, 500.0, 250.0]));
        assert_eq!(payments_of(&AllocationInput::new(100.0, 0.0, 150.0)), None);
    }

    #[test]
    fn percentages_for_proportional_split() {
        let percentages = percentages_of(&input(2000.0, 1000.0, 500.0, 2750.0)).unwrap();
        assert_eq!(percentages.salary1_percentage, 100.0);
        assert_eq!(percentages.salary2_percentage, 50.0);
        assert_eq!(percentages.salary3_percentage, 50.0);
    }

    #[test]
    fn percentages_zero_for_zero_salary() {
        let percentages = percentages_of(&AllocationInput::new(3000.0, 0.0, 1500.0)).unwrap();
        assert_eq!(percentages.salary1_percentage, 50.0);
        assert_eq!(percentages.salary2_percentage, 0.0);
        assert_eq!(percentages.salary3_percentage, 0.0);
    }

    #[test]
    fn percentages_absent_on_failure() {
        assert_eq!(percentages_of(&AllocationInput::new(100.0, 50.0, 200.0)), None);
        // An all-zero split is a real answer, not an absence.
        assert_eq!(
            percentages_of(&input(0.0, 0.0, 0.0, 0.0)),
            Some(ContributionPercentages::default())
        );
    }

    #[test]
    fn summary_reports_excess_and_commitment() {
        let summary = summarize(&input(2000.0, 1000.0, 1000.0, 2750.0));
        assert_eq!(summary.total_salaries, 4000.0);
        assert_eq!(summary.excess_over_priority, Some(750.0));
        assert_eq!(summary.committed_percentage, 68.75);
    }

    #[test]
    fn summary_without_salaries() {
        let summary = summarize(&input(0.0, 0.0, 0.0, 100.0));
        assert_eq!(summary.excess_over_priority, None);
        assert_eq!(summary.committed_percentage, 0.0);

        let summary = summarize(&AllocationInput::new(3000.0, 0.0, 2500.0));
        assert_eq!(summary.excess_over_priority, None);
    }
}
