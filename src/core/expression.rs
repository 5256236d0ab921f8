//! Expression Types
//!
//! The flat lexeme list the assembler produces and the evaluator consumes
//! as text.

use serde::{Serialize, Serializer};
use std::fmt;

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Operator {
    /// Map a spoken operator word
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "plus" | "add" | "added" => Some(Operator::Add),
            "minus" | "subtract" | "less" => Some(Operator::Subtract),
            "times" | "x" | "multiply" | "multiplied" | "into" => Some(Operator::Multiply),
            // "by" usually trails "divided"/"multiplied" and is dropped there
            "divide" | "divided" | "over" | "by" => Some(Operator::Divide),
            "mod" | "modulo" => Some(Operator::Modulo),
            _ => None,
        }
    }

    /// Map a single-character symbol
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '%' => Some(Operator::Modulo),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Modulo => '%',
        }
    }
}

/// One item of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme {
    /// Decimal literal, possibly with a leading '-'
    Number(String),
    Operator(Operator),
    OpenParen,
    CloseParen,
    /// A lone '.' passed through from the transcript
    Point,
}

impl Lexeme {
    /// Lexeme for a single-symbol token like "+" or "("
    pub fn from_symbol_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let symbol = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match symbol {
            '(' => Some(Lexeme::OpenParen),
            ')' => Some(Lexeme::CloseParen),
            '.' => Some(Lexeme::Point),
            other => Operator::from_symbol(other).map(Lexeme::Operator),
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Lexeme::Operator(_))
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lexeme::Number(text) => f.write_str(text),
            Lexeme::Operator(op) => write!(f, "{}", op.symbol()),
            Lexeme::OpenParen => f.write_str("("),
            Lexeme::CloseParen => f.write_str(")"),
            Lexeme::Point => f.write_str("."),
        }
    }
}

/// An arithmetic expression assembled from a transcript
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Expression {
    lexemes: Vec<Lexeme>,
}

impl Expression {
    pub fn lexemes(&self) -> &[Lexeme] {
        &self.lexemes
    }

    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }

    pub fn last(&self) -> Option<&Lexeme> {
        self.lexemes.last()
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut Lexeme> {
        self.lexemes.last_mut()
    }

    pub(crate) fn push(&mut self, lexeme: Lexeme) {
        self.lexemes.push(lexeme);
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lexeme in &self.lexemes {
            write!(f, "{}", lexeme)?;
        }
        Ok(())
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_words() {
        assert_eq!(Operator::from_word("plus"), Some(Operator::Add));
        assert_eq!(Operator::from_word("less"), Some(Operator::Subtract));
        assert_eq!(Operator::from_word("into"), Some(Operator::Multiply));
        assert_eq!(Operator::from_word("x"), Some(Operator::Multiply));
        assert_eq!(Operator::from_word("over"), Some(Operator::Divide));
        assert_eq!(Operator::from_word("by"), Some(Operator::Divide));
        assert_eq!(Operator::from_word("modulo"), Some(Operator::Modulo));
        assert_eq!(Operator::from_word("negative"), None);
    }

    #[test]
    fn test_symbol_tokens() {
        assert_eq!(Lexeme::from_symbol_token("("), Some(Lexeme::OpenParen));
        assert_eq!(Lexeme::from_symbol_token("."), Some(Lexeme::Point));
        assert_eq!(
            Lexeme::from_symbol_token("%"),
            Some(Lexeme::Operator(Operator::Modulo))
        );
        assert_eq!(Lexeme::from_symbol_token("++"), None);
        assert_eq!(Lexeme::from_symbol_token(""), None);
        assert_eq!(Lexeme::from_symbol_token("a"), None);
    }

    #[test]
    fn test_display_has_no_whitespace() {
        let mut expr = Expression::default();
        expr.push(Lexeme::OpenParen);
        expr.push(Lexeme::Number("-5".to_string()));
        expr.push(Lexeme::Operator(Operator::Multiply));
        expr.push(Lexeme::Number("2.5".to_string()));
        expr.push(Lexeme::CloseParen);
        assert_eq!(expr.to_string(), "(-5*2.5)");
    }

    #[test]
    fn test_serializes_as_string() {
        let mut expr = Expression::default();
        expr.push(Lexeme::Number("5".to_string()));
        expr.push(Lexeme::Operator(Operator::Add));
        expr.push(Lexeme::Number("7".to_string()));
        assert_eq!(serde_json::to_string(&expr).expect("serialize"), "\"5+7\"");
    }
}
