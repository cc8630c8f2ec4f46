//! Error types for the payroll calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll computation.

use thiserror::Error;

/// The main error type for the payroll calculation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application. Engines never
/// catch-and-log; every error is returned to the caller, which decides
/// whether to retry, surface, or record it as a per-item batch failure.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tax.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tax.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Tax configuration was present but structurally invalid (slab overlap,
    /// gap in coverage, negative rate, and similar).
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// A description of what made the configuration invalid.
        message: String,
    },

    /// A statutory deduction rule was not found in the configuration.
    #[error("Statutory deduction rule not found: {code}")]
    RuleNotFound {
        /// The rule code that was not found.
        code: String,
    },

    /// An input value was malformed or out of range, rejected before any
    /// computation began.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A state transition was requested that the entity's lifecycle does
    /// not permit (for example, cancelling a paid arrear).
    #[error("Invalid {entity} transition from '{from}' to '{to}'")]
    InvalidTransition {
        /// The kind of entity whose transition was rejected.
        entity: String,
        /// The current state.
        from: String,
        /// The requested state.
        to: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/tax.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/tax.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_configuration_displays_message() {
        let error = EngineError::InvalidConfiguration {
            message: "tax slabs do not start at zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration: tax slabs do not start at zero"
        );
    }

    #[test]
    fn test_rule_not_found_displays_code() {
        let error = EngineError::RuleNotFound {
            code: "pf".to_string(),
        };
        assert_eq!(error.to_string(), "Statutory deduction rule not found: pf");
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "tenure_months".to_string(),
            message: "must be at least 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input 'tenure_months': must be at least 1"
        );
    }

    #[test]
    fn test_invalid_transition_displays_states() {
        let error = EngineError::InvalidTransition {
            entity: "arrear".to_string(),
            from: "paid".to_string(),
            to: "cancelled".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid arrear transition from 'paid' to 'cancelled'"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "negative outstanding balance".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Calculation error: negative outstanding balance"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_rule_not_found() -> EngineResult<()> {
            Err(EngineError::RuleNotFound {
                code: "esi".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_rule_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
