//! Arithmetic core: error taxonomy, number handling, operators, parsing
//! and evaluation.
//!
//! Nothing in here knows about keypads or displays. The engine drives it.

pub mod evaluator;
pub mod functions;
pub mod number;
mod operations;
pub mod parser;

pub use functions::Function;
pub use operations::Operation;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// None of these ever reach a caller of the engine; they are absorbed and
/// replaced by the error marker on the display.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Division (or modulo) by zero attempted
    #[error("Division by zero")]
    DivisionByZero,

    /// Result overflowed to infinity
    #[error("Overflow: result exceeds maximum value")]
    Overflow,

    /// Invalid expression syntax
    #[error("Invalid expression: {0}")]
    ParseError(String),

    /// Nothing left to evaluate
    #[error("Empty expression")]
    EmptyExpression,

    /// Invalid result (NaN or other)
    #[error("Invalid result: {0}")]
    InvalidResult(String),

    /// Unary function applied outside its domain
    #[error("{function} is undefined for {value}")]
    Domain {
        /// Function that rejected the operand
        function: Function,
        /// The rejected operand
        value: f64,
    },

    /// Input name that maps to no event
    #[error("Unknown input: '{0}'")]
    UnknownInput(String),
}

impl CalcError {
    /// Create a parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }

    /// Create an unknown-input error
    #[must_use]
    pub fn unknown_input(name: impl Into<String>) -> Self {
        Self::UnknownInput(name.into())
    }

    /// Classifies a non-finite value as an error, passing finite ones through
    pub fn check_finite(value: f64) -> CalcResult<f64> {
        if value.is_nan() {
            Err(Self::InvalidResult("NaN".into()))
        } else if value.is_infinite() {
            Err(Self::Overflow)
        } else {
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== CalcError display tests =====

    #[test]
    fn test_calc_error_display_division_by_zero() {
        assert_eq!(CalcError::DivisionByZero.to_string(), "Division by zero");
    }

    #[test]
    fn test_calc_error_display_overflow() {
        assert_eq!(
            CalcError::Overflow.to_string(),
            "Overflow: result exceeds maximum value"
        );
    }

    #[test]
    fn test_calc_error_display_parse_error() {
        let err = CalcError::parse("unexpected token");
        assert_eq!(err.to_string(), "Invalid expression: unexpected token");
    }

    #[test]
    fn test_calc_error_display_empty_expression() {
        assert_eq!(CalcError::EmptyExpression.to_string(), "Empty expression");
    }

    #[test]
    fn test_calc_error_display_domain() {
        let err = CalcError::Domain {
            function: Function::Sqrt,
            value: -4.0,
        };
        assert_eq!(err.to_string(), "sqrt is undefined for -4");
    }

    #[test]
    fn test_calc_error_display_unknown_input() {
        assert_eq!(
            CalcError::unknown_input("foo").to_string(),
            "Unknown input: 'foo'"
        );
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::DivisionByZero);
        assert!(err.to_string().contains("Division"));
    }

    // ===== check_finite tests =====

    #[test]
    fn test_check_finite_passes_finite() {
        assert_eq!(CalcError::check_finite(1.5), Ok(1.5));
        assert_eq!(CalcError::check_finite(-0.0), Ok(-0.0));
    }

    #[test]
    fn test_check_finite_nan() {
        assert!(matches!(
            CalcError::check_finite(f64::NAN),
            Err(CalcError::InvalidResult(_))
        ));
    }

    #[test]
    fn test_check_finite_infinity() {
        assert_eq!(
            CalcError::check_finite(f64::NEG_INFINITY),
            Err(CalcError::Overflow)
        );
    }
}
