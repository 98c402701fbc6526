//! Amount expression evaluator
//!
//! Evaluates what a user types on a numeric pad (`12.50+3*2`, `-5+2`, `90/3`)
//! into a single number. Supports `+ - * /`, decimal literals and unary minus
//! with the usual precedence. No general-purpose evaluation is involved:
//! the input is reduced to a fixed character set, tokenized, and walked by a
//! small recursive-descent parser.
//!
//! Malformed input is an expected outcome, not an exceptional one. Every
//! failure is reported through [`CalcError`], whose messages form a closed set.
//!
//! # Example
//!
//! ```
//! use tally::calc::{parse_math_expression, CalcError};
//!
//! assert_eq!(parse_math_expression("2+3*4"), Ok(14.0));
//! assert_eq!(parse_math_expression("10/0"), Err(CalcError::DivisionByZero));
//! ```

mod parser;
mod token;

use thiserror::Error;

use crate::models::Money;

pub use parser::evaluate;
pub use token::{tokenize, Op, Token};

/// Reasons an amount expression could not be evaluated
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    /// Malformed literal, dangling operator or leftover tokens
    #[error("Invalid expression")]
    InvalidExpression,

    /// Right-hand side of `/` evaluated to exactly zero
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// The result overflowed or is not a number
    #[error("Invalid result")]
    InvalidResult,
}

/// Result of evaluating an amount expression
pub type ParseResult = Result<f64, CalcError>;

/// Strip every character outside `0-9 + - * / .`
pub fn sanitize_amount_input(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '.'))
        .collect()
}

/// Evaluate an amount expression
pub fn parse_math_expression(expression: &str) -> ParseResult {
    let tokens = tokenize(expression)?;
    evaluate(&tokens)
}

/// Evaluate an amount expression and round the result to cents
pub fn evaluate_amount(expression: &str) -> Result<Money, CalcError> {
    let value = parse_math_expression(expression)?;
    Money::from_amount(value).ok_or(CalcError::InvalidResult)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_only_allowed_chars() {
        assert_eq!(sanitize_amount_input("$1,234.50 + 3x"), "1234.50+3");
        assert_eq!(sanitize_amount_input("(2+3)*4"), "2+3*4");
        assert_eq!(sanitize_amount_input("   "), "");
        assert_eq!(sanitize_amount_input("١٢٣"), "");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = ["", "abc", "1+1", "€ 12,30 - 4", "7/\t2*x.y", "--..++"];
        for input in inputs {
            let once = sanitize_amount_input(input);
            assert_eq!(sanitize_amount_input(&once), once);
            assert!(once
                .chars()
                .all(|c| c.is_ascii_digit() || "+-*/.".contains(c)));
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(parse_math_expression("2+3*4"), Ok(14.0));
        assert_eq!(parse_math_expression("2*3+4"), Ok(10.0));
        assert_eq!(parse_math_expression("20-6/2"), Ok(17.0));
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(parse_math_expression("-5+2"), Ok(-3.0));
        assert_eq!(parse_math_expression("3*-2"), Ok(-6.0));
        assert_eq!(parse_math_expression("5--3"), Ok(8.0));
    }

    #[test]
    fn test_decimals() {
        assert_eq!(parse_math_expression("12.5+0.5"), Ok(13.0));
        assert_eq!(parse_math_expression("7/2"), Ok(3.5));
    }

    #[test]
    fn test_division_by_zero_is_evaluated_not_tokenized() {
        assert_eq!(parse_math_expression("10/0"), Err(CalcError::DivisionByZero));
        assert_eq!(parse_math_expression("0/1"), Ok(0.0));
        assert_eq!(parse_math_expression("1/0.0"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_invalid_expressions() {
        assert_eq!(parse_math_expression("1..2"), Err(CalcError::InvalidExpression));
        assert_eq!(parse_math_expression("3+"), Err(CalcError::InvalidExpression));
        assert_eq!(parse_math_expression(""), Err(CalcError::InvalidExpression));
        assert_eq!(parse_math_expression("   "), Err(CalcError::InvalidExpression));
        assert_eq!(parse_math_expression("*3"), Err(CalcError::InvalidExpression));
        assert_eq!(parse_math_expression("2**3"), Err(CalcError::InvalidExpression));
    }

    #[test]
    fn test_overflow_is_invalid_result() {
        let huge = "9".repeat(400);
        assert_eq!(parse_math_expression(&huge), Err(CalcError::InvalidResult));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(CalcError::InvalidExpression.to_string(), "Invalid expression");
        assert_eq!(CalcError::DivisionByZero.to_string(), "Cannot divide by zero");
        assert_eq!(CalcError::InvalidResult.to_string(), "Invalid result");
    }

    #[test]
    fn test_evaluate_amount() {
        assert_eq!(evaluate_amount("12.50+3*2"), Ok(Money::from_cents(1850)));
        assert_eq!(evaluate_amount("-10/3"), Ok(Money::from_cents(-333)));
        assert_eq!(evaluate_amount("1/0"), Err(CalcError::DivisionByZero));
    }
}
