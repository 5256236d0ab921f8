//! Expression Evaluation
//!
//! Evaluates the flat expressions the parser produces. Only digits,
//! whitespace, '.', parentheses and `+ - * / %` are accepted; anything else
//! is rejected before evaluation starts.
//!
//! Integer arithmetic stays integral, `/` always yields a float, `//` and `%`
//! round toward negative infinity and `**` is right-associative.

use crate::error::EvalError;
use std::fmt;

/// Nesting limit for parentheses and unary signs
const MAX_DEPTH: usize = 200;

/// Trait for expression evaluators
pub trait Evaluator: Send + Sync {
    /// Evaluate an expression string
    fn evaluate(&self, expression: &str) -> Result<Number, EvalError>;

    /// Get the evaluator name
    fn name(&self) -> &str;
}

/// The built-in restricted-character evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct SafeEvaluator;

impl Evaluator for SafeEvaluator {
    fn evaluate(&self, expression: &str) -> Result<Number, EvalError> {
        evaluate(expression)
    }

    fn name(&self) -> &str {
        "safe"
    }
}

/// Result of an evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Number::Int(v) => v == 0,
            Number::Float(v) => v == 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            Number::Float(v) if v.fract() == 0.0 => write!(f, "{:.1}", v),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

fn real(value: f64) -> Result<Number, EvalError> {
    if value.is_nan() {
        Err(EvalError::NotReal)
    } else if value.is_infinite() {
        Err(EvalError::Overflow)
    } else {
        Ok(Number::Float(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(Number),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Token::Num(n) => return write!(f, "{}", n),
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::DoubleStar => "**",
            Token::Slash => "/",
            Token::DoubleSlash => "//",
            Token::Percent => "%",
            Token::LParen => "(",
            Token::RParen => ")",
        };
        f.write_str(symbol)
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || "+-*/().%".contains(c)
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let (token, width) = match c {
            '+' => (Token::Plus, 1),
            '-' => (Token::Minus, 1),
            '*' if next == Some('*') => (Token::DoubleStar, 2),
            '*' => (Token::Star, 1),
            '/' if next == Some('/') => (Token::DoubleSlash, 2),
            '/' => (Token::Slash, 1),
            '%' => (Token::Percent, 1),
            '(' => (Token::LParen, 1),
            ')' => (Token::RParen, 1),
            _ => {
                let (number, width) = read_number(&chars[i..])?;
                (Token::Num(number), width)
            }
        };
        tokens.push(token);
        i += width;
    }

    Ok(tokens)
}

/// Read "12", "3.5", "3." or ".5" from the start of `chars`
fn read_number(chars: &[char]) -> Result<(Number, usize), EvalError> {
    let int_len = chars.iter().take_while(|c| c.is_ascii_digit()).count();
    if chars.get(int_len) != Some(&'.') {
        let text: String = chars[..int_len].iter().collect();
        return text
            .parse::<i64>()
            .map(|v| (Number::Int(v), int_len))
            .map_err(|_| EvalError::Overflow);
    }

    let frac_len = chars[int_len + 1..]
        .iter()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if int_len == 0 && frac_len == 0 {
        return Err(EvalError::UnexpectedToken(".".to_string()));
    }

    let width = int_len + 1 + frac_len;
    let text: String = chars[..width].iter().collect();
    let value = text
        .parse::<f64>()
        .map_err(|_| EvalError::UnexpectedToken(text.clone()))?;
    Ok((real(value)?, width))
}

/// Recursive-descent evaluator over the token list
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        Ok(())
    }

    /// expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<Number, EvalError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = match op {
                Token::Plus => add(value, rhs)?,
                _ => sub(value, rhs)?,
            };
        }
        Ok(value)
    }

    /// term := unary (('*' | '/' | '//' | '%') unary)*
    fn term(&mut self) -> Result<Number, EvalError> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash | Token::DoubleSlash | Token::Percent)) =
            self.peek()
        {
            self.pos += 1;
            let rhs = self.unary()?;
            value = match op {
                Token::Star => mul(value, rhs)?,
                Token::Slash => div(value, rhs)?,
                Token::DoubleSlash => floor_div(value, rhs)?,
                _ => modulo(value, rhs)?,
            };
        }
        Ok(value)
    }

    /// unary := ('+' | '-') unary | power
    fn unary(&mut self) -> Result<Number, EvalError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            Some(Token::Minus) => {
                self.pos += 1;
                self.descend()?;
                let value = negate(self.unary()?)?;
                self.depth -= 1;
                Ok(value)
            }
            _ => self.power(),
        }
    }

    /// power := atom ('**' unary)?
    fn power(&mut self) -> Result<Number, EvalError> {
        let base = self.atom()?;
        if self.peek() == Some(Token::DoubleStar) {
            self.pos += 1;
            self.descend()?;
            let exponent = self.unary()?;
            self.depth -= 1;
            return pow(base, exponent);
        }
        Ok(base)
    }

    /// atom := number | '(' expr ')'
    fn atom(&mut self) -> Result<Number, EvalError> {
        match self.advance() {
            Some(Token::Num(n)) => Ok(n),
            Some(Token::LParen) => {
                self.descend()?;
                let value = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => {
                        self.depth -= 1;
                        Ok(value)
                    }
                    Some(other) => Err(EvalError::UnexpectedToken(other.to_string())),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some(other) => Err(EvalError::UnexpectedToken(other.to_string())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

fn negate(value: Number) -> Result<Number, EvalError> {
    match value {
        Number::Int(v) => v.checked_neg().map(Number::Int).ok_or(EvalError::Overflow),
        Number::Float(v) => Ok(Number::Float(-v)),
    }
}

fn add(a: Number, b: Number) -> Result<Number, EvalError> {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => {
            x.checked_add(y).map(Number::Int).ok_or(EvalError::Overflow)
        }
        _ => real(a.as_f64() + b.as_f64()),
    }
}

fn sub(a: Number, b: Number) -> Result<Number, EvalError> {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => {
            x.checked_sub(y).map(Number::Int).ok_or(EvalError::Overflow)
        }
        _ => real(a.as_f64() - b.as_f64()),
    }
}

fn mul(a: Number, b: Number) -> Result<Number, EvalError> {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => {
            x.checked_mul(y).map(Number::Int).ok_or(EvalError::Overflow)
        }
        _ => real(a.as_f64() * b.as_f64()),
    }
}

fn div(a: Number, b: Number) -> Result<Number, EvalError> {
    if b.is_zero() {
        return Err(EvalError::DivisionByZero);
    }
    real(a.as_f64() / b.as_f64())
}

fn floor_div(a: Number, b: Number) -> Result<Number, EvalError> {
    if b.is_zero() {
        return Err(EvalError::DivisionByZero);
    }
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => {
            let q = x.checked_div(y).ok_or(EvalError::Overflow)?;
            if x % y != 0 && (x < 0) != (y < 0) {
                Ok(Number::Int(q - 1))
            } else {
                Ok(Number::Int(q))
            }
        }
        _ => real((a.as_f64() / b.as_f64()).floor()),
    }
}

fn modulo(a: Number, b: Number) -> Result<Number, EvalError> {
    if b.is_zero() {
        return Err(EvalError::DivisionByZero);
    }
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => {
            // i64::MIN % -1 is 0 mathematically but overflows in hardware
            let r = x.checked_rem(y).unwrap_or(0);
            if r != 0 && (r < 0) != (y < 0) {
                Ok(Number::Int(r + y))
            } else {
                Ok(Number::Int(r))
            }
        }
        _ => {
            let (x, y) = (a.as_f64(), b.as_f64());
            let r = x % y;
            if r != 0.0 && (r < 0.0) != (y < 0.0) {
                real(r + y)
            } else {
                real(r)
            }
        }
    }
}

fn pow(base: Number, exponent: Number) -> Result<Number, EvalError> {
    if base.is_zero() && exponent.as_f64() < 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    match (base, exponent) {
        (Number::Int(x), Number::Int(y)) if y >= 0 => match x {
            // Huge exponents are fine when the base cannot grow
            0 => Ok(Number::Int(if y == 0 { 1 } else { 0 })),
            1 => Ok(Number::Int(1)),
            -1 => Ok(Number::Int(if y % 2 == 0 { 1 } else { -1 })),
            _ => {
                let y = u32::try_from(y).map_err(|_| EvalError::Overflow)?;
                x.checked_pow(y).map(Number::Int).ok_or(EvalError::Overflow)
            }
        },
        _ => real(base.as_f64().powf(exponent.as_f64())),
    }
}

/// Evaluate an arithmetic expression string
pub fn evaluate(expression: &str) -> Result<Number, EvalError> {
    if expression.trim().is_empty() {
        return Err(EvalError::EmptyExpression);
    }
    if let Some(c) = expression.chars().find(|c| !is_allowed(*c)) {
        return Err(EvalError::DisallowedCharacter(c));
    }

    let mut parser = Parser {
        tokens: tokenize(expression)?,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    match parser.peek() {
        Some(extra) => Err(EvalError::UnexpectedToken(extra.to_string())),
        None => Ok(value),
    }
}
