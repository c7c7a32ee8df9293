use crate::built_in::{
    commitment_ratio::CommitmentRatioCalculator,
    contribution_percentages::ContributionPercentagesCalculator,
    salary_split::SalarySplitCalculator,
};
use crate::plugin::{CalculationResult, CalculatorArgs, CalculatorPlugin};
use std::collections::BTreeMap;
use tracing::debug;

/// Named calculators over loosely typed arguments.
///
/// Names are unique; registering a second calculator under a taken name
/// replaces the first.
pub struct Calculator {
    plugins: BTreeMap<&'static str, Box<dyn CalculatorPlugin>>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// A registry holding the built-in calculators.
    pub fn new() -> Self {
        let mut calculator = Self { plugins: BTreeMap::new() };
        calculator.register(Box::new(SalarySplitCalculator));
        calculator.register(Box::new(ContributionPercentagesCalculator));
        calculator.register(Box::new(CommitmentRatioCalculator));
        calculator
    }

    pub fn register(&mut self, plugin: Box<dyn CalculatorPlugin>) {
        self.plugins.insert(plugin.name(), plugin);
    }

    pub fn calculate(&self, calculator_name: &str, args: &CalculatorArgs<'_>) -> CalculationResult {
        debug!(calculator = calculator_name, args = args.len(), "invoking calculator");
        match self.plugins.get(calculator_name) {
            Some(plugin) => plugin.calculate(args),
            None => Err(format!("calculator '{calculator_name}' not found")),
        }
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.keys().copied().collect()
    }

    /// `(name, description)` pairs, sorted by name.
    pub fn descriptions(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.plugins.values().map(|plugin| (plugin.name(), plugin.description()))
    }
}
