//! Keypad Calculator - an input-driven calculator engine
//!
//! The engine models a desk calculator with memory, scientific functions and
//! a power key. It is driven one keypad event at a time and always has a
//! two-line display to show: the accumulated expression and the operand
//! being typed. Errors never escape; they appear as `Error` on the display.
//!
//! # Example
//!
//! ```rust
//! use keypad_calc::prelude::*;
//!
//! let mut session = Session::new(RecordingSink::new());
//! session.feed_script("12 * 3 =").unwrap();
//! assert_eq!(session.display().current_input, "36");
//!
//! // A second operator replaces the first, dropping the operand between them
//! session.feed_script("C 2 + 3 * 4 =").unwrap();
//! assert_eq!(session.display().current_input, "8");
//!
//! // Power: base, pow, exponent, then `=`
//! session.feed_script("C 2 pow 10 =").unwrap();
//! assert_eq!(session.display().current_input, "1024");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;
pub mod engine;
pub mod input;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::number::{format_number, parse_float};
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{CalcError, CalcResult, Function, Operation};
    pub use crate::driver::{DisplaySink, RecordingSink, Session};
    pub use crate::engine::{Display, Engine, Mode, Outcome, ERROR_MARKER};
    pub use crate::input::{InputEvent, MemoryCommand};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("2 + 3").unwrap(), 5.0);
    }

    #[test]
    fn test_parser_direct() {
        let ast = Parser::parse_str("1 + 2 * 3").unwrap();
        assert_eq!(Evaluator::new().evaluate(&ast).unwrap(), 7.0);
    }

    #[test]
    fn test_error_handling() {
        let eval = Evaluator::new();
        assert!(matches!(
            eval.evaluate_str("1 / 0"),
            Err(CalcError::DivisionByZero)
        ));
        assert!(matches!(
            eval.evaluate_str(""),
            Err(CalcError::EmptyExpression)
        ));
        assert!(matches!(
            eval.evaluate_str("1 + * 2"),
            Err(CalcError::ParseError(_))
        ));
    }

    #[test]
    fn test_engine_through_events() {
        let mut engine = Engine::new();
        for token in ["9", "sqrt", "M+", "C", "MR"] {
            engine.handle(InputEvent::from_token(token).unwrap());
        }
        assert_eq!(engine.display().current_input, "3");
        assert_eq!(engine.memory(), 3.0);
    }

    #[test]
    fn test_error_marker_on_display() {
        let mut session = Session::new(RecordingSink::new());
        session.feed_script("5 / 0 =").unwrap();
        assert!(session.display().is_error());
        assert_eq!(session.display().current_input, ERROR_MARKER);
        assert_eq!(format_number(parse_float("1e+21").unwrap()), "1e+21");
    }
}
