use crate::utils::validation::Violation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV rendering error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Request validation failed: {}", join_violations(.violations))]
    ValidationError { violations: Vec<Violation> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Output,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EstimatorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EstimatorError::IoError(_) => ErrorCategory::Io,
            EstimatorError::SerializationError(_) | EstimatorError::CsvError(_) => {
                ErrorCategory::Output
            }
            EstimatorError::ConfigError { .. }
            | EstimatorError::ConfigValidationError { .. }
            | EstimatorError::InvalidConfigValueError { .. }
            | EstimatorError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EstimatorError::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EstimatorError::IoError(e) => format!("Could not read or write a file: {}", e),
            EstimatorError::SerializationError(_) | EstimatorError::CsvError(_) => {
                "The estimate was computed but could not be rendered".to_string()
            }
            EstimatorError::ConfigError { message } => message.clone(),
            EstimatorError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            EstimatorError::InvalidConfigValueError { field, reason, .. } => {
                format!("'{}' is not valid: {}", field, reason)
            }
            EstimatorError::MissingConfigError { field } => {
                format!("'{}' must be set in the configuration", field)
            }
            EstimatorError::ValidationError { violations } => {
                format!("Please correct the input: {}", join_violations(violations))
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the file exists and is readable",
            ErrorCategory::Output => "Try a different --format",
            ErrorCategory::Configuration => {
                "Compare the TOML file with the documented cost table layout"
            }
            ErrorCategory::Input => "All measurements must be positive numbers",
        }
    }

    /// Process exit code for this error, by severity.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn validation(violations: Vec<Violation>) -> Self {
        EstimatorError::ValidationError { violations }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, EstimatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_violation() {
        let err = EstimatorError::validation(vec![
            Violation::NonPositiveValue {
                field: "roof_area_sqft",
                label: "Roof area",
            },
            Violation::OutOfRange {
                field: "days_per_year",
                label: "Days per year",
                min: 1.0,
                max: 365.0,
            },
        ]);

        let text = err.to_string();
        assert!(text.contains("Roof area must be greater than 0"));
        assert!(text.contains("Days per year must be between 1 and 365"));
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: EstimatorError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_friendly_message().contains("missing"));
    }
}
