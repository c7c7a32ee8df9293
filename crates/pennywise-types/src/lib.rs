//! Pennywise Types
//!
//! This crate defines the value records exchanged between the allocation
//! engine (`pennywise-calculator`) and its callers (`pennywise-cli` or any
//! other presentation layer). Keeping them here lets callers depend on the
//! data shapes without pulling in the engine.

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(missing_docs)]

mod types;
mod value;

pub use types::{AllocationInput, AllocationResult, AllocationSummary, ContributionPercentages, Payer};
pub use value::InputValue;
