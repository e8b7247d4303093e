use crate::core::tables::CostTables;
use crate::domain::model::{CalculatorResponse, SystemKind};
use crate::utils::validation::Violation;

/// A request the engine knows how to price.
pub trait Estimate {
    fn system(&self) -> SystemKind;

    fn estimate_with(&self, tables: &CostTables) -> CalculatorResponse;

    /// Advisory checks; estimation never calls this itself.
    fn violations(&self) -> Vec<Violation>;
}

/// Where an engine gets its pricing constants from.
pub trait TableSource {
    fn tables(&self) -> &CostTables;

    fn label(&self) -> &str {
        "built-in"
    }
}
