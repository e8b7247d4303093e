use crate::config::scenario_config::ScenarioConfig;
use crate::core::tables::CostTables;
use crate::core::validators;
use crate::domain::model::{CalculatorRequest, CalculatorResponse, SystemKind};
use crate::domain::ports::{Estimate, TableSource};
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::Violation;

impl Estimate for CalculatorRequest {
    fn system(&self) -> SystemKind {
        CalculatorRequest::system(self)
    }

    fn estimate_with(&self, tables: &CostTables) -> CalculatorResponse {
        match self {
            CalculatorRequest::Rainwater(rain) => rain.estimate_with(tables),
            CalculatorRequest::Hvac(hvac) => hvac.estimate_with(tables),
        }
    }

    fn violations(&self) -> Vec<Violation> {
        validators::validate_request(self)
    }
}

/// Result of one named scenario in a batch.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub system: SystemKind,
    pub result: std::result::Result<CalculatorResponse, Vec<Violation>>,
}

pub struct EstimatorEngine<T: TableSource = CostTables> {
    source: T,
}

impl EstimatorEngine<CostTables> {
    pub fn builtin() -> Self {
        Self::new(CostTables::builtin().clone())
    }
}

impl<T: TableSource> EstimatorEngine<T> {
    pub fn new(source: T) -> Self {
        Self { source }
    }

    pub fn source_label(&self) -> &str {
        self.source.label()
    }

    /// Prices the request as given, without validation.
    pub fn estimate<R: Estimate + ?Sized>(&self, request: &R) -> CalculatorResponse {
        request.estimate_with(self.source.tables())
    }

    /// Validates first and refuses to price a request with any violation.
    pub fn run<R: Estimate + ?Sized>(&self, request: &R) -> Result<CalculatorResponse> {
        let violations = request.violations();
        if !violations.is_empty() {
            tracing::debug!(
                "Rejected {} request with {} violation(s)",
                request.system(),
                violations.len()
            );
            return Err(EstimatorError::validation(violations));
        }

        let response = self.estimate(request);
        tracing::debug!(
            "Estimated {} system with {} tables: {}..{}",
            request.system(),
            self.source.label(),
            response.cost_range_min,
            response.cost_range_max
        );
        Ok(response)
    }

    pub fn run_scenarios(&self, config: &ScenarioConfig) -> Vec<ScenarioOutcome> {
        config
            .enabled_scenarios()
            .map(|scenario| {
                let violations = scenario.request.violations();
                let result = if violations.is_empty() {
                    Ok(self.estimate(&scenario.request))
                } else {
                    tracing::warn!(
                        "Scenario '{}' skipped: {} violation(s)",
                        scenario.name,
                        violations.len()
                    );
                    Err(violations)
                };
                ScenarioOutcome {
                    name: scenario.name.clone(),
                    system: scenario.request.system(),
                    result,
                }
            })
            .collect()
    }
}

impl Default for EstimatorEngine<CostTables> {
    fn default() -> Self {
        Self::builtin()
    }
}
