//! Closed-grammar arithmetic: token expressions, their evaluation and their
//! display forms.
//!
//! Only generators build [`Expression`]s, so the grammar is tiny: integers,
//! parentheses and `+ - * / ^`. Evaluation is recursive descent with the
//! usual precedence (`^` binds tightest and is right-associative, then
//! `* /`, then `+ -`, both left-to-right).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::drill_engine::error::EvalError;
use crate::drill_engine::numeric::normalize_signs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    /// ASCII symbol used in plain text.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "^",
        }
    }

    /// Glyph used in display markup.
    pub fn glyph(self) -> &'static str {
        match self {
            Operator::Mul => "×",
            Operator::Div => "÷",
            other         => other.symbol(),
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
            Operator::Pow                 => 3,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Num(i64),
    Op(Operator),
    LParen,
    RParen,
}

/// A flat token sequence such as `[3, *, -4, +, 2]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    pub fn new(tokens: Vec<Token>) -> Self {
        Expression { tokens }
    }

    /// `lhs op rhs`.
    pub fn binary(lhs: i64, op: Operator, rhs: i64) -> Self {
        Expression::new(vec![Token::Num(lhs), Token::Op(op), Token::Num(rhs)])
    }

    /// Append `op rhs` to the end of the sequence.
    pub fn then(mut self, op: Operator, rhs: i64) -> Self {
        self.tokens.push(Token::Op(op));
        self.tokens.push(Token::Num(rhs));
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn operators(&self) -> impl Iterator<Item = Operator> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            Token::Op(op) => Some(*op),
            _ => None,
        })
    }

    /// Render with sign normalisation. `pow` formats `base` and `exponent`.
    fn render(&self, glyphs: bool, pow: impl Fn(&str, &str) -> String) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.tokens.len());
        let mut prev: Option<Token> = None;
        let mut i = 0;
        while i < self.tokens.len() {
            let token = self.tokens[i];
            match token {
                Token::Num(n) => {
                    let text = number_text(n, prev);
                    // A power binds its operands without spaces.
                    if let (Some(Token::Op(Operator::Pow)), Some(Token::Num(e))) =
                        (self.tokens.get(i + 1).copied(), self.tokens.get(i + 2).copied())
                    {
                        parts.push(pow(&text, &number_text(e, Some(Token::Op(Operator::Pow)))));
                        prev = Some(Token::Num(e));
                        i += 3;
                        continue;
                    }
                    parts.push(text);
                }
                Token::Op(op) => {
                    parts.push(if glyphs { op.glyph() } else { op.symbol() }.to_string())
                }
                Token::LParen => parts.push("(".to_string()),
                Token::RParen => parts.push(")".to_string()),
            }
            prev = Some(token);
            i += 1;
        }
        let joined = parts.join(" ").replace("( ", "(").replace(" )", ")");
        normalize_signs(&joined)
    }
}

/// Negative operands of `*`, `/` and `^` are parenthesised; after `+`/`-`
/// they stay bare so sign normalisation can collapse them.
fn number_text(n: i64, prev: Option<Token>) -> String {
    match prev {
        Some(Token::Op(Operator::Mul | Operator::Div | Operator::Pow)) if n < 0 => {
            format!("({})", n)
        }
        _ => n.to_string(),
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.render(false, |base, exp| format!("{}^{}", base, exp));
        write!(f, "{}", text)
    }
}

/// Display markup: `×`, `÷` and `<sup>` exponents. Numeric meaning unchanged.
pub fn format(expr: &Expression) -> String {
    expr.render(true, |base, exp| format!("{}<sup>{}</sup>", base, exp))
}

/// Evaluate `expr` with standard precedence.
pub fn evaluate(expr: &Expression) -> Result<f64, EvalError> {
    if expr.tokens.is_empty() {
        return Err(EvalError::Empty);
    }
    let mut parser = Parser { tokens: &expr.tokens, pos: 0 };
    let value = parser.sum()?;
    if parser.pos != expr.tokens.len() {
        return Err(EvalError::Trailing(parser.pos));
    }
    Ok(value)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek_op(&self) -> Option<Operator> {
        match self.tokens.get(self.pos) {
            Some(Token::Op(op)) => Some(*op),
            _ => None,
        }
    }

    fn sum(&mut self) -> Result<f64, EvalError> {
        let mut acc = self.product()?;
        while let Some(op @ (Operator::Add | Operator::Sub)) = self.peek_op() {
            self.pos += 1;
            let rhs = self.product()?;
            acc = if op == Operator::Add { acc + rhs } else { acc - rhs };
        }
        Ok(acc)
    }

    fn product(&mut self) -> Result<f64, EvalError> {
        let mut acc = self.power()?;
        while let Some(op @ (Operator::Mul | Operator::Div)) = self.peek_op() {
            self.pos += 1;
            let rhs = self.power()?;
            acc = if op == Operator::Mul {
                acc * rhs
            } else {
                if rhs == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                acc / rhs
            };
        }
        Ok(acc)
    }

    fn power(&mut self) -> Result<f64, EvalError> {
        let base = self.primary()?;
        if self.peek_op() == Some(Operator::Pow) {
            self.pos += 1;
            let exponent = self.power()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        let at = self.pos;
        match self.tokens.get(at) {
            Some(Token::Num(n)) => {
                self.pos += 1;
                Ok(*n as f64)
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let inner = self.sum()?;
                if self.tokens.get(self.pos) != Some(&Token::RParen) {
                    return Err(EvalError::Unbalanced(at));
                }
                self.pos += 1;
                Ok(inner)
            }
            _ => Err(EvalError::ExpectedOperand(at)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: i64) -> Token {
        Token::Num(n)
    }

    fn op(o: Operator) -> Token {
        Token::Op(o)
    }

    #[test]
    fn multiplication_before_addition() {
        let e = Expression::binary(2, Operator::Add, 3).then(Operator::Mul, 4);
        assert_eq!(evaluate(&e), Ok(14.0));
    }

    #[test]
    fn left_to_right_within_a_level() {
        let e = Expression::binary(12, Operator::Div, 2).then(Operator::Mul, 3);
        assert_eq!(evaluate(&e), Ok(18.0));
        let e = Expression::binary(10, Operator::Sub, 4).then(Operator::Sub, 3);
        assert_eq!(evaluate(&e), Ok(3.0));
    }

    #[test]
    fn power_binds_tightest() {
        let e = Expression::binary(3, Operator::Pow, 2).then(Operator::Mul, 2);
        assert_eq!(evaluate(&e), Ok(18.0));
        let e = Expression::new(vec![num(2), op(Operator::Pow), num(3), op(Operator::Pow), num(2)]);
        assert_eq!(evaluate(&e), Ok(512.0));
    }

    #[test]
    fn parentheses_override_precedence() {
        let e = Expression::new(vec![
            Token::LParen, num(2), op(Operator::Add), num(3), Token::RParen,
            op(Operator::Mul), num(4),
        ]);
        assert_eq!(evaluate(&e), Ok(20.0));
    }

    #[test]
    fn malformed_sequences_are_errors() {
        assert_eq!(evaluate(&Expression::default()), Err(EvalError::Empty));
        assert_eq!(
            evaluate(&Expression::new(vec![num(1), op(Operator::Add)])),
            Err(EvalError::ExpectedOperand(2))
        );
        assert_eq!(
            evaluate(&Expression::new(vec![num(1), num(2)])),
            Err(EvalError::Trailing(1))
        );
        assert_eq!(
            evaluate(&Expression::new(vec![Token::LParen, num(1)])),
            Err(EvalError::Unbalanced(0))
        );
        assert_eq!(
            evaluate(&Expression::binary(4, Operator::Div, 0)),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn plain_text_collapses_signs() {
        assert_eq!(Expression::binary(12, Operator::Div, 4).to_string(), "12 / 4");
        assert_eq!(Expression::binary(5, Operator::Add, -3).to_string(), "5 - 3");
        assert_eq!(Expression::binary(5, Operator::Sub, -3).to_string(), "5 + 3");
        assert_eq!(Expression::binary(-5, Operator::Mul, -3).to_string(), "-5 * (-3)");
        assert_eq!(Expression::binary(2, Operator::Pow, 3).to_string(), "2^3");
    }

    #[test]
    fn display_markup_uses_glyphs_and_superscript() {
        let e = Expression::binary(7, Operator::Mul, 3).then(Operator::Div, 7);
        assert_eq!(format(&e), "7 × 3 ÷ 7");
        assert_eq!(format(&Expression::binary(4, Operator::Pow, 2)), "4<sup>2</sup>");
    }

    #[test]
    fn sign_collapse_keeps_value() {
        let e = Expression::binary(5, Operator::Sub, -3).then(Operator::Mul, 2);
        assert_eq!(evaluate(&e), Ok(11.0));
        assert_eq!(e.to_string(), "5 + 3 * 2");
    }
}
