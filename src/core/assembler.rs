//! Expression Assembler
//!
//! Scans normalized tokens left to right and emits operators and numerals.
//! Unknown words are skipped.

use super::expression::{Expression, Lexeme, Operator};
use super::numerals::{parse_numeral, Numeral};
use crate::config::AdjacentNumerals;
use crate::error::ParseError;
use tracing::{debug, trace};

/// Builds expressions from token streams
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionAssembler {
    adjacent_numerals: AdjacentNumerals,
}

impl ExpressionAssembler {
    pub fn new(adjacent_numerals: AdjacentNumerals) -> Self {
        Self { adjacent_numerals }
    }

    /// Translate tokens into an expression
    ///
    /// At each position, in order:
    /// 1. "minus"/"-" where an operand is expected, as a sign
    /// 2. operator words
    /// 3. numeral phrases
    /// 4. single-character symbols
    ///
    /// Anything else is skipped.
    pub fn assemble<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Expression, ParseError> {
        let mut expr = Expression::default();
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i].as_ref();

            if expects_operand(&expr) && matches!(token, "minus" | "-") {
                if let Some(numeral) = signed_operand(tokens, i) {
                    i += numeral.consumed;
                    self.push_number(&mut expr, numeral.text)?;
                    continue;
                }
            }

            if let Some(op) = Operator::from_word(token) {
                push_operator(&mut expr, op, token);
                i += 1;
                continue;
            }

            if let Some(numeral) = parse_numeral(tokens, i) {
                i += numeral.consumed;
                self.push_number(&mut expr, numeral.text)?;
                continue;
            }

            if let Some(lexeme) = Lexeme::from_symbol_token(token) {
                match lexeme {
                    Lexeme::Operator(op) => push_operator(&mut expr, op, token),
                    other => expr.push(other),
                }
                i += 1;
                continue;
            }

            trace!("Skipping filler token '{}'", token);
            i += 1;
        }

        if expr.is_empty() {
            return Err(ParseError::EmptyExpression);
        }
        debug!("Assembled expression: {}", expr);
        Ok(expr)
    }

    fn push_number(&self, expr: &mut Expression, text: String) -> Result<(), ParseError> {
        if let Some(Lexeme::Number(left)) = expr.last() {
            match self.adjacent_numerals {
                AdjacentNumerals::Reject => {
                    return Err(ParseError::AmbiguousAdjacentNumerals {
                        left: left.clone(),
                        right: text,
                    });
                }
                AdjacentNumerals::Concatenate => {
                    debug!("Concatenating adjacent numerals '{}' and '{}'", left, text);
                    if let Some(magnitude) = text.strip_prefix('-') {
                        expr.push(Lexeme::Operator(Operator::Subtract));
                        expr.push(Lexeme::Number(magnitude.to_string()));
                    } else if let Some(Lexeme::Number(left)) = expr.last_mut() {
                        left.push_str(&text);
                    }
                    return Ok(());
                }
            }
        }

        expr.push(Lexeme::Number(text));
        Ok(())
    }
}

/// Start of input, after an operator, or after '('
fn expects_operand(expr: &Expression) -> bool {
    matches!(
        expr.last(),
        None | Some(Lexeme::Operator(_)) | Some(Lexeme::OpenParen)
    )
}

/// A numeral carrying an explicit sign ("minus five", "- 5")
fn signed_operand<S: AsRef<str>>(tokens: &[S], start: usize) -> Option<Numeral> {
    if tokens.get(start)?.as_ref() != "-" {
        return parse_numeral(tokens, start);
    }
    let inner = parse_numeral(tokens, start + 1)?;
    if inner.text.starts_with('-') {
        return None;
    }
    Some(Numeral {
        text: format!("-{}", inner.text),
        consumed: inner.consumed + 1,
    })
}

/// Append an operator unless the previous item already is one
fn push_operator(expr: &mut Expression, op: Operator, token: &str) {
    if let Some(Lexeme::Operator(previous)) = expr.last() {
        debug!(
            "Dropping '{}' after operator '{}'",
            token,
            previous.symbol()
        );
        return;
    }
    expr.push(Lexeme::Operator(op));
}
