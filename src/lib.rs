pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{CostTableConfig, ScenarioConfig};

pub use core::{
    engine::{EstimatorEngine, ScenarioOutcome},
    hvac::{estimate_hvac, estimate_hvac_with},
    rainwater::{estimate_rainwater, estimate_rainwater_with},
    tables::CostTables,
    validators::{validate_hvac, validate_rainwater, validate_request},
};
pub use domain::model::{
    Breakdown, CalculatorRequest, CalculatorResponse, CostRange, HvacRequest, RainwaterRequest,
    SystemKind,
};
pub use utils::error::{EstimatorError, Result};
pub use utils::validation::Violation;
