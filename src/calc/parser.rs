//! Recursive-descent evaluation over a token stream
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := NUMBER | '-' factor
//! ```

use super::token::{Op, Token};
use super::CalcError;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek_op(&self) -> Option<Op> {
        match self.tokens.get(self.pos) {
            Some(Token::Operator(op)) => Some(*op),
            _ => None,
        }
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;

        while let Some(op @ (Op::Add | Op::Sub)) = self.peek_op() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Op::Add { value + rhs } else { value - rhs };
        }

        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.factor()?;

        while let Some(op @ (Op::Mul | Op::Div)) = self.peek_op() {
            self.pos += 1;
            let rhs = self.factor()?;
            if op == Op::Mul {
                value *= rhs;
            } else {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                value /= rhs;
            }
        }

        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, CalcError> {
        match self.tokens.get(self.pos) {
            Some(Token::Number(n)) => {
                self.pos += 1;
                Ok(*n)
            }
            Some(Token::Operator(Op::Sub)) => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            _ => Err(CalcError::InvalidExpression),
        }
    }
}

/// Evaluate a complete token stream
///
/// Every token must be consumed and the result must be finite.
pub fn evaluate(tokens: &[Token]) -> Result<f64, CalcError> {
    let mut parser = Parser::new(tokens);
    let value = parser.expr()?;

    if parser.pos != tokens.len() {
        return Err(CalcError::InvalidExpression);
    }

    if !value.is_finite() {
        return Err(CalcError::InvalidResult);
    }

    Ok(value)
}
