//! Binary operators of the keypad grammar

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

/// Every character that can end an operand in the accumulated expression
pub const OPERATOR_CHARS: [char; 5] = ['+', '-', '*', '/', '%'];

/// Type-safe binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Modulo (%)
    Modulo,
}

impl Operation {
    /// All operators in keypad order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
    ];

    /// Returns the operator symbol as it appears in the expression
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Modulo => '%',
        }
    }

    /// Parses an operator symbol
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '%' => Some(Self::Modulo),
            _ => None,
        }
    }

    /// Returns true if `c` is one of the five operator characters
    #[must_use]
    pub fn is_operator_char(c: char) -> bool {
        OPERATOR_CHARS.contains(&c)
    }

    /// Binding strength (higher = evaluated first)
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide | Self::Modulo => 2,
        }
    }

    /// Applies the operator, rejecting results that are not finite
    pub fn apply(self, a: f64, b: f64) -> CalcResult<f64> {
        let result = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide | Self::Modulo if b == 0.0 => return Err(CalcError::DivisionByZero),
            Self::Divide => a / b,
            // Truncated remainder, sign follows the dividend
            Self::Modulo => a % b,
        };
        CalcError::check_finite(result)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
