pub mod engine;
pub mod hvac;
pub mod rainwater;
pub mod tables;
pub mod validators;

pub use crate::domain::model::{CalculatorRequest, CalculatorResponse};
pub use crate::domain::ports::{Estimate, TableSource};
pub use crate::utils::error::Result;
