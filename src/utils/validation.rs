use crate::utils::error::{EstimatorError, Result};
use serde::Serialize;
use std::fmt;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// One advisory rule broken by a calculator request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    MissingField {
        field: &'static str,
        label: &'static str,
    },
    NonPositiveValue {
        field: &'static str,
        label: &'static str,
    },
    NonIntegerValue {
        field: &'static str,
        label: &'static str,
    },
    NonFiniteValue {
        field: &'static str,
        label: &'static str,
    },
    OutOfRange {
        field: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
    },
}

impl Violation {
    pub fn field(&self) -> &'static str {
        match self {
            Violation::MissingField { field, .. }
            | Violation::NonPositiveValue { field, .. }
            | Violation::NonIntegerValue { field, .. }
            | Violation::NonFiniteValue { field, .. }
            | Violation::OutOfRange { field, .. } => *field,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingField { label, .. } => write!(f, "{} is required", label),
            Violation::NonPositiveValue { label, .. } => {
                write!(f, "{} must be greater than 0", label)
            }
            Violation::NonIntegerValue { label, .. } => {
                write!(f, "{} must be a positive integer", label)
            }
            Violation::NonFiniteValue { label, .. } => write!(f, "{} must be a finite number", label),
            Violation::OutOfRange {
                label, min, max, ..
            } => write!(f, "{} must be between {} and {}", label, min, max),
        }
    }
}

/// Absent numeric inputs are carried as NaN.
pub fn check_positive(
    violations: &mut Vec<Violation>,
    field: &'static str,
    label: &'static str,
    value: f64,
) -> bool {
    if value.is_nan() {
        violations.push(Violation::MissingField { field, label });
        false
    } else if value <= 0.0 {
        violations.push(Violation::NonPositiveValue { field, label });
        false
    } else if value.is_infinite() {
        violations.push(Violation::NonFiniteValue { field, label });
        false
    } else {
        true
    }
}

pub fn check_whole_number(
    violations: &mut Vec<Violation>,
    field: &'static str,
    label: &'static str,
    value: f64,
) {
    if value.is_finite() && value.fract() != 0.0 {
        violations.push(Violation::NonIntegerValue { field, label });
    }
}

pub fn check_within(
    violations: &mut Vec<Violation>,
    field: &'static str,
    label: &'static str,
    value: f64,
    min: f64,
    max: f64,
) {
    if value.is_nan() {
        violations.push(Violation::MissingField { field, label });
    } else if value < min || value > max {
        violations.push(Violation::OutOfRange {
            field,
            label,
            min,
            max,
        });
    }
}

pub fn check_optional_positive(
    violations: &mut Vec<Violation>,
    field: &'static str,
    label: &'static str,
    value: Option<f64>,
) {
    match value {
        Some(v) if v.is_nan() || v == f64::INFINITY => {
            violations.push(Violation::NonFiniteValue { field, label })
        }
        Some(v) if v <= 0.0 => violations.push(Violation::NonPositiveValue { field, label }),
        _ => {}
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, path: &str, allowed: &[&str]) -> Result<()> {
    match std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) if allowed.contains(&ext) => Ok(()),
        Some(ext) => Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                ext,
                allowed.join(", ")
            ),
        }),
        None => Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if value.is_nan() || value < 0.0 {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a non-negative number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_ordered(field_name: &str, min: f64, max: f64) -> Result<()> {
    validate_non_negative(&format!("{}.min", field_name), min)?;
    validate_non_negative(&format!("{}.max", field_name), max)?;
    if min > max {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("{}..{}", min, max),
            reason: "Minimum must not exceed maximum".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if !(value >= min && value <= max) {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
