//! Tokenizer for amount expressions
//!
//! Unary minus never survives as its own token: a `-` at the start of the
//! input or right after an operator is fused into the following literal.

use super::{sanitize_amount_input, CalcError};

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }
}

/// A single lexical unit of an amount expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Op),
}

/// Split an expression into tokens
///
/// Disallowed characters are stripped before scanning. A literal is a maximal
/// run of digits and `.` with at most one `.`.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, CalcError> {
    let cleaned = sanitize_amount_input(expression);
    if cleaned.is_empty() {
        return Err(CalcError::InvalidExpression);
    }

    let chars: Vec<char> = cleaned.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if is_literal_char(c) {
            let (value, next) = read_literal(&chars, i)?;
            tokens.push(Token::Number(value));
            i = next;
            continue;
        }

        if c == '-' && expects_operand(&tokens) {
            let start = i + 1;
            if start >= chars.len() || !is_literal_char(chars[start]) {
                return Err(CalcError::InvalidExpression);
            }
            let (value, next) = read_literal(&chars, start)?;
            tokens.push(Token::Number(-value));
            i = next;
            continue;
        }

        if let Some(op) = Op::from_char(c) {
            tokens.push(Token::Operator(op));
        }
        i += 1;
    }

    Ok(tokens)
}

fn is_literal_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// A `-` is unary at the start or directly after another operator
fn expects_operand(tokens: &[Token]) -> bool {
    matches!(tokens.last(), None | Some(Token::Operator(_)))
}

/// Read the literal starting at `start`, returning its value and the index after it
fn read_literal(chars: &[char], start: usize) -> Result<(f64, usize), CalcError> {
    let mut end = start;
    while end < chars.len() && is_literal_char(chars[end]) {
        end += 1;
    }

    let literal: String = chars[start..end].iter().collect();
    if literal.matches('.').count() > 1 {
        return Err(CalcError::InvalidExpression);
    }

    let value = literal
        .parse::<f64>()
        .map_err(|_| CalcError::InvalidExpression)?;

    Ok((value, end))
}
