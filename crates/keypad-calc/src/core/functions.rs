//! Unary keypad functions and the power primitive

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Function keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Function {
    /// Square root
    Sqrt,
    /// x²
    Square,
    /// 1/x
    Reciprocal,
    /// Sine of an angle in degrees
    Sin,
    /// Cosine of an angle in degrees
    Cos,
    /// Tangent of an angle in degrees
    Tan,
    /// Inverse sine, result in degrees
    Asin,
    /// Inverse cosine, result in degrees
    Acos,
    /// Inverse tangent, result in degrees
    Atan,
    /// xʸ: captures the base, the exponent is typed afterwards
    Power,
}

fn to_radians(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

fn to_degrees(rad: f64) -> f64 {
    rad * (180.0 / PI)
}

impl Function {
    /// All functions in keypad order
    pub const ALL: [Self; 10] = [
        Self::Sqrt,
        Self::Square,
        Self::Reciprocal,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Power,
    ];

    /// The action name of the key
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Reciprocal => "reciprocal",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Power => "power",
        }
    }

    /// Looks a function up by its action name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Computes the function for operand `x`.
    ///
    /// Returns `None` for [`Function::Power`], which has no single-operand
    /// result; the engine turns it into a mode change instead.
    #[must_use]
    pub fn apply(self, x: f64) -> Option<CalcResult<f64>> {
        let domain_error = || {
            Err(CalcError::Domain {
                function: self,
                value: x,
            })
        };

        let result = match self {
            Self::Sqrt if x < 0.0 => domain_error(),
            Self::Sqrt => Ok(x.sqrt()),
            Self::Square => Ok(x * x),
            Self::Reciprocal if x == 0.0 => domain_error(),
            Self::Reciprocal => Ok(1.0 / x),
            Self::Sin => Ok(to_radians(x).sin()),
            Self::Cos => Ok(to_radians(x).cos()),
            Self::Tan => {
                // Coarse asymptote guard: -90 and drifted angles pass through
                let reduced = x % 360.0;
                if reduced == 90.0 || reduced == 270.0 {
                    domain_error()
                } else {
                    Ok(to_radians(x).tan())
                }
            }
            Self::Asin | Self::Acos if !(-1.0..=1.0).contains(&x) => domain_error(),
            Self::Asin => Ok(to_degrees(x.asin())),
            Self::Acos => Ok(to_degrees(x.acos())),
            Self::Atan => Ok(to_degrees(x.atan())),
            Self::Power => return None,
        };
        Some(result)
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// `base` raised to `exponent` with the usual floating-point rules.
///
/// Negative bases work with integer exponents, `0^0` is `1`, and a
/// non-integer exponent of a negative base is `NaN`. A base of magnitude one
/// raised to an infinite exponent is `NaN` as well.
#[must_use]
pub fn power(base: f64, exponent: f64) -> f64 {
    if base.abs() == 1.0 && exponent.is_infinite() {
        return f64::NAN;
    }
    base.powf(exponent)
}
