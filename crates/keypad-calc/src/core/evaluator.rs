//! AST evaluator and the `=` pipeline

use crate::core::parser::{AstNode, Parser};
use crate::core::{CalcError, CalcResult, Operation};

/// Scale applied by a postfix percent
const PERCENT_SCALE: f64 = 0.01;

/// Drops a dangling run of operator characters from the end of `statement`
#[must_use]
pub fn strip_trailing_operators(statement: &str) -> &str {
    statement.trim_end_matches(|c| Operation::is_operator_char(c))
}

/// Evaluator for AST expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates an AST node and returns the result
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<f64> {
        match node {
            AstNode::Number(n) => Ok(*n),
            AstNode::Negate(inner) => Ok(-self.evaluate(inner)?),
            AstNode::Percent(inner) => Operation::Multiply.apply(self.evaluate(inner)?, PERCENT_SCALE),
            AstNode::BinaryOp { left, op, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                op.apply(left_val, right_val)
            }
        }
    }

    /// Parses and evaluates an expression string
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        self.evaluate(&ast)
    }

    /// Evaluates an accumulated keypad statement.
    ///
    /// A trailing operator is dropped silently before parsing, so `"5+"`
    /// evaluates to `5`.
    pub fn evaluate_statement(&self, statement: &str) -> CalcResult<f64> {
        let value = self.evaluate_str(strip_trailing_operators(statement))?;
        CalcError::check_finite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ===== AST evaluation =====

    #[test]
    fn test_evaluate_number() {
        assert_eq!(Evaluator::new().evaluate(&AstNode::number(42.0)), Ok(42.0));
    }

    #[test]
    fn test_evaluate_negate() {
        let ast = AstNode::negate(AstNode::negate(AstNode::number(5.0)));
        assert_eq!(Evaluator::new().evaluate(&ast), Ok(5.0));
    }

    #[test]
    fn test_evaluate_percent() {
        let ast = AstNode::percent(AstNode::number(50.0));
        assert_eq!(Evaluator::new().evaluate(&ast), Ok(0.5));
    }

    #[test]
    fn test_evaluate_error_propagates_from_left() {
        let ast = AstNode::binary(
            AstNode::binary(
                AstNode::number(10.0),
                Operation::Divide,
                AstNode::number(0.0),
            ),
            Operation::Add,
            AstNode::number(5.0),
        );
        assert_eq!(Evaluator::new().evaluate(&ast), Err(CalcError::DivisionByZero));
    }

    // ===== String evaluation =====

    #[test]
    fn test_evaluate_str_all_operations() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("10+5"), Ok(15.0));
        assert_eq!(eval.evaluate_str("10-3"), Ok(7.0));
        assert_eq!(eval.evaluate_str("6*7"), Ok(42.0));
        assert_eq!(eval.evaluate_str("20/4"), Ok(5.0));
        assert_eq!(eval.evaluate_str("500%%3"), Ok(2.0));
    }

    #[test]
    fn test_evaluate_str_precedence() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("2+3*4"), Ok(14.0));
        assert_eq!(eval.evaluate_str("10-4/2"), Ok(8.0));
        assert_eq!(eval.evaluate_str("1+50%*4"), Ok(3.0));
        assert_eq!(eval.evaluate_str("2*3-8/4+1"), Ok(5.0));
    }

    #[test]
    fn test_evaluate_str_percent_rewrite() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("200+50%"), Ok(200.5));
        assert_eq!(eval.evaluate_str("50%-2"), Ok(-1.5));
    }

    #[test]
    fn test_evaluate_str_percent_then_number_fails() {
        assert!(matches!(
            Evaluator::new().evaluate_str("10%3"),
            Err(CalcError::ParseError(_))
        ));
    }

    #[test]
    fn test_evaluate_str_negative_operands() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("3+-5"), Ok(-2.0));
        assert_eq!(eval.evaluate_str("-4*-2"), Ok(8.0));
        assert!(matches!(eval.evaluate_str("5--3"), Err(CalcError::ParseError(_))));
    }

    #[test]
    fn test_evaluate_str_division_by_zero() {
        assert_eq!(
            Evaluator::new().evaluate_str("5/0"),
            Err(CalcError::DivisionByZero)
        );
    }

    // ===== Statement pipeline =====

    #[test]
    fn test_strip_trailing_operators() {
        assert_eq!(strip_trailing_operators("5+"), "5");
        assert_eq!(strip_trailing_operators("5+3*%"), "5+3");
        assert_eq!(strip_trailing_operators("5+3"), "5+3");
        assert_eq!(strip_trailing_operators("+-"), "");
    }

    #[test]
    fn test_evaluate_statement_drops_dangling_operator() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_statement("5+"), Ok(5.0));
        assert_eq!(eval.evaluate_statement("200+50%"), Ok(250.0));
    }

    #[test]
    fn test_evaluate_statement_empty_after_strip() {
        assert_eq!(
            Evaluator::new().evaluate_statement("-"),
            Err(CalcError::EmptyExpression)
        );
    }

    #[test]
    fn test_evaluate_statement_overflow() {
        assert_eq!(
            Evaluator::new().evaluate_statement("1e308*10"),
            Err(CalcError::Overflow)
        );
    }

    // ===== Property-based tests =====

    /// Reference evaluation: fold `*` `/` runs first, then `+` `-`
    fn two_pass(numbers: &[f64], ops: &[Operation]) -> f64 {
        let mut terms = vec![numbers[0]];
        let mut additive = Vec::new();
        for (op, &n) in ops.iter().zip(&numbers[1..]) {
            match op {
                Operation::Add | Operation::Subtract => {
                    additive.push(*op);
                    terms.push(n);
                }
                _ => {
                    let last = terms.len() - 1;
                    terms[last] = op.apply(terms[last], n).unwrap();
                }
            }
        }
        let mut total = terms[0];
        for (op, t) in additive.iter().zip(&terms[1..]) {
            total = op.apply(total, *t).unwrap();
        }
        total
    }

    fn op_strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            Just(Operation::Add),
            Just(Operation::Subtract),
            Just(Operation::Multiply),
            Just(Operation::Divide),
        ]
    }

    proptest! {
        #[test]
        fn prop_conventional_precedence(
            first in 1u32..1000,
            rest in prop::collection::vec((op_strategy(), 1u32..1000), 0..6)
        ) {
            let mut numbers = vec![f64::from(first)];
            let mut ops = Vec::new();
            let mut text = first.to_string();
            for (op, n) in &rest {
                ops.push(*op);
                numbers.push(f64::from(*n));
                text.push(op.symbol());
                text.push_str(&n.to_string());
            }
            let expected = two_pass(&numbers, &ops);
            prop_assert_eq!(Evaluator::new().evaluate_str(&text), Ok(expected));
        }
    }
}
