//! Tokenizer and precedence-climbing parser for the flat keypad grammar
//!
//! The accumulated expression only ever contains number literals and the
//! five operator characters, so the token set is closed: anything else is a
//! parse error rather than something to interpret.

use crate::core::{CalcError, CalcResult, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Operator character
    Operator(Operation),
}

impl Token {
    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
    /// Postfix percent, `N%` meaning `N*0.01`
    Percent(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }

    /// Creates a new percent node
    #[must_use]
    pub fn percent(inner: AstNode) -> Self {
        Self::Percent(Box::new(inner))
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the remaining input
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            '-' if self.peek_char(1) == Some('-') => {
                return Err(CalcError::parse(format!(
                    "Unexpected '--' at position {}",
                    self.pos
                )));
            }
            _ => match Operation::from_char(ch) {
                Some(op) => {
                    self.advance();
                    Token::Operator(op)
                }
                None => {
                    return Err(CalcError::parse(format!("Unexpected character: '{ch}'")));
                }
            },
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn skip_digits(&mut self) {
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Reads `digits[.digits][e[+-]digits]`, the shape of every formatted result
    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;

        self.skip_digits();
        if self.current_char() == Some('.') {
            self.advance();
            self.skip_digits();
        }

        if matches!(self.current_char(), Some('e' | 'E')) {
            let exponent_digit = match self.peek_char(1) {
                Some('+' | '-') => self.peek_char(2),
                other => other,
            };
            if exponent_digit.is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
                if matches!(self.current_char(), Some('+' | '-')) {
                    self.advance();
                }
                self.skip_digits();
            }
        }

        let num_str = &self.input[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| CalcError::parse(format!("Invalid number: '{num_str}'")))?;

        Ok(Token::Number(value))
    }
}

/// Precedence-climbing parser
///
/// Grammar:
/// ```text
/// expression ::= operand (binop operand)*      // climbing on Operation::precedence
/// operand    ::= '-' operand | NUMBER '%'?
/// ```
///
/// The first `%` after a number literal is always its postfix percent, so
/// `10%3` reads as a percent term followed by a stray number and is
/// rejected. A further `%` (`5%%3`) is binary modulo.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let tokens = Tokenizer::new(input).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into an AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let ast = self.parse_expression(1)?;

        if let Some(token) = self.current() {
            return Err(CalcError::parse(format!(
                "Unexpected token {token:?} at position {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self, min_precedence: u8) -> CalcResult<AstNode> {
        let mut left = self.parse_operand()?;

        while let Some(Token::Operator(op)) = self.current().copied() {
            if op.precedence() < min_precedence {
                break;
            }
            self.advance();
            // Left associative: the right side only takes tighter operators
            let right = self.parse_expression(op.precedence() + 1)?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_operand(&mut self) -> CalcResult<AstNode> {
        let mut node = match self.advance() {
            Some(Token::Operator(Operation::Subtract)) => {
                return Ok(AstNode::negate(self.parse_operand()?));
            }
            Some(Token::Number(n)) => AstNode::number(n),
            Some(token) => {
                return Err(CalcError::parse(format!("Unexpected token: {token:?}")));
            }
            None => return Err(CalcError::parse("Unexpected end of expression")),
        };

        if self.current() == Some(&Token::Operator(Operation::Modulo)) {
            self.advance();
            node = AstNode::percent(node);
        }

        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> AstNode {
        AstNode::number(n)
    }

    // ===== Token tests =====

    #[test]
    fn test_token_predicates() {
        assert!(Token::Operator(Operation::Add).is_operator());
        assert!(!Token::Number(5.0).is_operator());
        assert!(Token::Number(5.0).is_number());
        assert!(!Token::Operator(Operation::Add).is_number());
    }

    // ===== Tokenizer tests =====

    #[test]
    fn test_tokenize_single_number() {
        let tokens = Tokenizer::new("42").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Number(42.0)]);
    }

    #[test]
    fn test_tokenize_decimal_forms() {
        let tokens = Tokenizer::new("3.25 .5 7.").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(3.25), Token::Number(0.5), Token::Number(7.0)]
        );
    }

    #[test]
    fn test_tokenize_exponent_literals() {
        let tokens = Tokenizer::new("1e+21+1.5e-7").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(1e21),
                Token::Operator(Operation::Add),
                Token::Number(1.5e-7),
            ]
        );
    }

    #[test]
    fn test_tokenize_bare_e_is_not_exponent() {
        let result = Tokenizer::new("2e").tokenize();
        assert!(matches!(result, Err(CalcError::ParseError(_))));
    }

    #[test]
    fn test_tokenize_operators() {
        let tokens = Tokenizer::new("+-*/%").tokenize().unwrap();
        let ops: Vec<Token> = Operation::ALL.into_iter().map(Token::Operator).collect();
        assert_eq!(tokens, ops);
    }

    #[test]
    fn test_tokenize_no_spaces() {
        let tokens = Tokenizer::new("1+2*3").tokenize().unwrap();
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_tokenize_rejects_foreign_characters() {
        for input in ["2 ^ 3", "(1+2)", "Error+1", "NaN", "alert(1)"] {
            let result = Tokenizer::new(input).tokenize();
            assert!(
                matches!(result, Err(CalcError::ParseError(_))),
                "accepted {input}"
            );
        }
    }

    #[test]
    fn test_tokenize_lone_decimal_point() {
        let result = Tokenizer::new(".").tokenize();
        assert!(matches!(result, Err(CalcError::ParseError(_))));
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(Tokenizer::new("").tokenize().unwrap().is_empty());
        assert!(Tokenizer::new("   ").tokenize().unwrap().is_empty());
    }

    #[test]
    fn test_tokenizer_remaining() {
        let mut t = Tokenizer::new("1 + 2");
        t.next_token().unwrap();
        assert_eq!(t.remaining(), " + 2");
    }

    // ===== Parser tests =====

    #[test]
    fn test_parse_single_number() {
        assert_eq!(Parser::parse_str("42").unwrap(), num(42.0));
    }

    #[test]
    fn test_parse_precedence_mul_over_add() {
        let ast = Parser::parse_str("2+3*4").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                num(2.0),
                Operation::Add,
                AstNode::binary(num(3.0), Operation::Multiply, num(4.0))
            )
        );
    }

    #[test]
    fn test_parse_left_associative() {
        // 8-3-2 = (8-3)-2
        let ast = Parser::parse_str("8-3-2").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::binary(num(8.0), Operation::Subtract, num(3.0)),
                Operation::Subtract,
                num(2.0)
            )
        );
    }

    #[test]
    fn test_parse_percent_followed_by_number_rejected() {
        for input in ["10%3", "1+10%4*2", "2.5%.5"] {
            assert!(
                matches!(Parser::parse_str(input), Err(CalcError::ParseError(_))),
                "accepted {input}"
            );
        }
    }

    #[test]
    fn test_parse_modulo_after_percent_term() {
        let ast = Parser::parse_str("5%%3").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(AstNode::percent(num(5.0)), Operation::Modulo, num(3.0))
        );
    }

    #[test]
    fn test_parse_negative_percent_term() {
        assert_eq!(
            Parser::parse_str("-50%").unwrap(),
            AstNode::negate(AstNode::percent(num(50.0)))
        );
    }

    #[test]
    fn test_parse_trailing_percent() {
        let ast = Parser::parse_str("200+50%").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(num(200.0), Operation::Add, AstNode::percent(num(50.0)))
        );
    }

    #[test]
    fn test_parse_percent_before_operator() {
        let ast = Parser::parse_str("50%-2").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(AstNode::percent(num(50.0)), Operation::Subtract, num(2.0))
        );
    }

    #[test]
    fn test_parse_unary_minus() {
        assert_eq!(Parser::parse_str("-5").unwrap(), AstNode::negate(num(5.0)));
    }

    #[test]
    fn test_parse_unary_minus_after_operator() {
        let ast = Parser::parse_str("3*-2").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(num(3.0), Operation::Multiply, AstNode::negate(num(2.0)))
        );
    }

    #[test]
    fn test_tokenize_rejects_double_minus() {
        for input in ["5--3", "--5", "2*--1"] {
            assert!(
                matches!(Tokenizer::new(input).tokenize(), Err(CalcError::ParseError(_))),
                "accepted {input}"
            );
        }
    }

    #[test]
    fn test_parse_spaced_minus_pair_is_double_negation() {
        assert_eq!(
            Parser::parse_str("5- -3").unwrap(),
            AstNode::binary(num(5.0), Operation::Subtract, AstNode::negate(num(3.0)))
        );
    }

    #[test]
    fn test_parse_empty_expression() {
        assert!(matches!(
            Parser::parse_str(""),
            Err(CalcError::EmptyExpression)
        ));
    }

    #[test]
    fn test_parse_missing_operand() {
        assert!(matches!(
            Parser::parse_str("2+"),
            Err(CalcError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_consecutive_binary_operators() {
        assert!(matches!(
            Parser::parse_str("2+*3"),
            Err(CalcError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_adjacent_numbers() {
        // "1.2.3" tokenizes as 1.2 then .3
        assert!(matches!(
            Parser::parse_str("1.2.3"),
            Err(CalcError::ParseError(_))
        ));
    }

    #[test]
    fn test_parser_parse_empty_tokens() {
        let mut parser = Parser::new(vec![]);
        assert!(matches!(parser.parse(), Err(CalcError::EmptyExpression)));
    }
}
