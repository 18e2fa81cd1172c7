//! The restricted arithmetic evaluator behind `calc`.
//!
//! Evaluates a numeric expression after the caller has substituted
//! variables, `result`, and nested command spans. Supports:
//!
//! - float arithmetic: `+`, `-`, `*`, `/`, `%`
//! - exponentiation: `^` (right-associative)
//! - parentheses for grouping
//! - unary `+`/`-`
//!
//! Anything outside the allowed character set is rejected before
//! evaluation. Division by zero and malformed input are distinct
//! failure kinds.

use crate::error::ArithmeticError;

/// Characters permitted in a fully substituted expression.
const ALLOWED: &str = "0123456789+-*/.%()^ \t";

/// Reject an expression containing characters outside the allowed set.
pub fn validate(expr: &str) -> Result<(), ArithmeticError> {
    match expr.chars().find(|c| !ALLOWED.contains(*c)) {
        Some(c) => Err(ArithmeticError::InvalidExpression(format!(
            "unexpected character {c:?}"
        ))),
        None => Ok(()),
    }
}

/// Evaluate a fully substituted arithmetic expression.
pub fn eval_expression(expr: &str) -> Result<f64, ArithmeticError> {
    validate(expr)?;
    let mut parser = ExprParser::new(expr);
    let result = parser.parse_expr()?;
    parser.expect_end()?;
    if result.is_finite() {
        Ok(result)
    } else {
        Err(ArithmeticError::Overflow)
    }
}

/// Recursive descent parser with standard operator precedence.
struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() {
            let ch = self.input.as_bytes()[self.pos];
            if ch == b' ' || ch == b'\t' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        self.skip_whitespace();
        let ch = self.input[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn expect_end(&mut self) -> Result<(), ArithmeticError> {
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(ArithmeticError::InvalidExpression(format!(
                "unexpected trailing input: {:?}",
                &self.input[self.pos..]
            )));
        }
        Ok(())
    }

    /// `+` and `-` (lowest precedence).
    fn parse_expr(&mut self) -> Result<f64, ArithmeticError> {
        let mut left = self.parse_term()?;
        loop {
            match self.peek() {
                Some('+') => {
                    self.advance();
                    left += self.parse_term()?;
                }
                Some('-') => {
                    self.advance();
                    left -= self.parse_term()?;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    /// `*`, `/`, `%` (higher precedence).
    fn parse_term(&mut self) -> Result<f64, ArithmeticError> {
        let mut left = self.parse_unary()?;
        loop {
            match self.peek() {
                Some('*') => {
                    self.advance();
                    left *= self.parse_unary()?;
                }
                Some('/') => {
                    self.advance();
                    let right = self.parse_unary()?;
                    if right == 0.0 {
                        return Err(ArithmeticError::DivideByZero);
                    }
                    left /= right;
                }
                Some('%') => {
                    self.advance();
                    let right = self.parse_unary()?;
                    if right == 0.0 {
                        return Err(ArithmeticError::DivideByZero);
                    }
                    left %= right;
                }
                _ => break,
            }
        }
        Ok(left)
    }

    /// Unary `+`/`-` prefix; binds looser than `^` so `-2^2` is `-4`.
    fn parse_unary(&mut self) -> Result<f64, ArithmeticError> {
        match self.peek() {
            Some('+') => {
                self.advance();
                self.parse_unary()
            }
            Some('-') => {
                self.advance();
                Ok(-self.parse_unary()?)
            }
            _ => self.parse_power(),
        }
    }

    /// `^` exponentiation, right-associative.
    fn parse_power(&mut self) -> Result<f64, ArithmeticError> {
        let base = self.parse_primary()?;
        if self.peek() == Some('^') {
            self.advance();
            let exponent = self.parse_unary()?;
            Ok(base.powf(exponent))
        } else {
            Ok(base)
        }
    }

    /// Numbers and parenthesized expressions.
    fn parse_primary(&mut self) -> Result<f64, ArithmeticError> {
        match self.peek() {
            Some('(') => {
                self.advance();
                let value = self.parse_expr()?;
                match self.peek() {
                    Some(')') => {
                        self.advance();
                        Ok(value)
                    }
                    _ => Err(ArithmeticError::InvalidExpression(
                        "expected closing parenthesis".into(),
                    )),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.parse_number(),
            Some(c) => Err(ArithmeticError::InvalidExpression(format!(
                "unexpected character {c:?}"
            ))),
            None => Err(ArithmeticError::InvalidExpression(
                "unexpected end of expression".into(),
            )),
        }
    }

    fn parse_number(&mut self) -> Result<f64, ArithmeticError> {
        let start = self.pos;
        while self.pos < self.input.len() {
            let ch = self.input.as_bytes()[self.pos];
            if ch.is_ascii_digit() || ch == b'.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = &self.input[start..self.pos];
        text.parse()
            .map_err(|_| ArithmeticError::InvalidExpression(format!("bad number {text:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expr: &str) -> f64 {
        eval_expression(expr).expect("eval should succeed")
    }

    #[test]
    fn precedence_is_standard() {
        assert_eq!(eval("2 + 3 * 4"), 14.0);
        assert_eq!(eval("10 - 6 / 2"), 7.0);
        assert_eq!(eval("10 % 3"), 1.0);
    }

    #[test]
    fn parentheses_group() {
        assert_eq!(eval("(2 + 3) * 4"), 20.0);
        assert_eq!(eval("((1 + 2) * (3 + 4))"), 21.0);
    }

    #[test]
    fn float_arithmetic() {
        assert_eq!(eval("2.5 * 2"), 5.0);
        assert_eq!(eval("1 / 4"), 0.25);
    }

    #[test]
    fn exponent_is_right_associative() {
        assert_eq!(eval("2 ^ 10"), 1024.0);
        assert_eq!(eval("2 ^ 3 ^ 2"), 512.0);
        assert_eq!(eval("-2 ^ 2"), -4.0);
        assert_eq!(eval("2 ^ -1"), 0.5);
    }

    #[test]
    fn unary_signs() {
        assert_eq!(eval("-5"), -5.0);
        assert_eq!(eval("10 + -3"), 7.0);
        assert_eq!(eval("--5"), 5.0);
    }

    #[test]
    fn division_by_zero_is_distinct() {
        assert!(matches!(
            eval_expression("10 / 0"),
            Err(ArithmeticError::DivideByZero)
        ));
        assert!(matches!(
            eval_expression("10 % 0"),
            Err(ArithmeticError::DivideByZero)
        ));
    }

    #[test]
    fn malformed_input_is_invalid_expression() {
        assert!(matches!(
            eval_expression("2 +"),
            Err(ArithmeticError::InvalidExpression(_))
        ));
        assert!(matches!(
            eval_expression("(2 + 3"),
            Err(ArithmeticError::InvalidExpression(_))
        ));
        assert!(matches!(
            eval_expression("1..2 + 1"),
            Err(ArithmeticError::InvalidExpression(_))
        ));
    }

    #[test]
    fn charset_is_enforced() {
        assert!(matches!(
            eval_expression("2 + x"),
            Err(ArithmeticError::InvalidExpression(_))
        ));
        assert!(matches!(
            eval_expression("import os"),
            Err(ArithmeticError::InvalidExpression(_))
        ));
    }

    #[test]
    fn overflow_is_reported() {
        assert!(matches!(
            eval_expression("10 ^ 400"),
            Err(ArithmeticError::Overflow)
        ));
    }
}
