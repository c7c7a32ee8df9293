//! Built-in calculators registered by [`crate::Calculator::new`].

// Allocation calculators
pub mod contribution_percentages;
pub mod salary_split;

// Summary calculators
pub mod commitment_ratio;
