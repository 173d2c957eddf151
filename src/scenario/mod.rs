//! Scenario runner for batch what-if projections
//!
//! Projections share no mutable state, so independent configurations are
//! evaluated in parallel.

pub mod loader;

pub use loader::{load_scenarios, load_scenarios_from_reader, Scenario};

use std::ops::RangeInclusive;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, ProjectionSummary};

/// Summary of one named scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario_id: String,
    pub summary: ProjectionSummary,
}

/// Shared assumptions for many projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let results = runner.sweep_retirement_ages(&ProjectionConfig::default(), 55..=70);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with the standard NHS assumptions
    pub fn new() -> Self {
        Self {
            assumptions: Assumptions::default_nhs(),
        }
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    /// Run a single projection with the given config
    pub fn run(&self, config: ProjectionConfig) -> ProjectionResult {
        ProjectionEngine::new(self.assumptions.clone(), config).project()
    }

    /// Run many configurations in parallel; results keep the input order
    pub fn run_batch(&self, configs: &[ProjectionConfig]) -> Vec<ProjectionResult> {
        configs
            .par_iter()
            .map(|config| self.run(config.clone()))
            .collect()
    }

    /// Run named scenarios in parallel and keep only their summaries
    pub fn run_scenarios(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        info!("Running {} scenarios", scenarios.len());
        scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                scenario_id: scenario.id.clone(),
                summary: self.run(scenario.config.clone()).summary(),
            })
            .collect()
    }

    /// Summaries for each retirement age in `ages`, all else held fixed
    pub fn sweep_retirement_ages(
        &self,
        base: &ProjectionConfig,
        ages: RangeInclusive<u32>,
    ) -> Vec<(u32, ProjectionSummary)> {
        let ages: Vec<u32> = ages.collect();
        ages.par_iter()
            .map(|&retirement_age| {
                let config = ProjectionConfig {
                    retirement_age,
                    ..base.clone()
                };
                (retirement_age, self.run(config).summary())
            })
            .collect()
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_matches_sequential_runs() {
        let runner = ScenarioRunner::new();
        let configs: Vec<_> = [0.01, 0.02, 0.03]
            .iter()
            .map(|&growth| ProjectionConfig {
                salary_growth_rate: growth,
                ..Default::default()
            })
            .collect();

        let results = runner.run_batch(&configs);
        assert_eq!(results.len(), 3);
        for (config, result) in configs.iter().zip(&results) {
            let expected = ProjectionEngine::with_default_assumptions(config.clone()).project();
            assert_eq!(result, &expected);
        }

        // Faster salary growth gives a bigger pension
        assert!(
            results[2].summary().annual_pension_at_retirement
                > results[0].summary().annual_pension_at_retirement
        );
    }

    #[test]
    fn test_retirement_age_sweep() {
        let runner = ScenarioRunner::new();
        let sweep = runner.sweep_retirement_ages(&ProjectionConfig::default(), 55..=70);

        assert_eq!(sweep.len(), 16);
        assert_eq!(sweep[0].0, 55);
        assert_eq!(sweep[15].0, 70);
        for pair in sweep.windows(2) {
            assert!(pair[1].1.salary_at_retirement > pair[0].1.salary_at_retirement);
        }
    }

    #[test]
    fn test_custom_assumptions_are_used() {
        let mut runner = ScenarioRunner::new();
        runner.assumptions_mut().state_pension.annual_amount = 12_000.0;
        let result = runner.run(ProjectionConfig::default());
        assert_eq!(result.record_at_age(70).unwrap().state_pension, 12_000.0);
    }
}
