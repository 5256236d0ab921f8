//! voxcalc Error Types
//!
//! Parse failures, evaluation failures and the crate-wide error that wraps them.

use thiserror::Error;

/// Why a transcript could not be turned into an expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Blank transcript, or punctuation only
    #[error("nothing was said")]
    EmptyInput,

    /// Nothing arithmetic was left after scanning
    #[error("no arithmetic expression found")]
    EmptyExpression,

    /// Two numbers spoken back to back with no operator between them
    #[error("ambiguous numbers '{left}' and '{right}' with no operator between them")]
    AmbiguousAdjacentNumerals { left: String, right: String },
}

impl ParseError {
    /// Message shown to the user when a spoken expression is rejected
    pub fn user_message(&self) -> String {
        match self {
            ParseError::EmptyInput => "I didn't hear anything. Please try again.".to_string(),
            ParseError::EmptyExpression => {
                "Couldn't parse the spoken math expression.".to_string()
            }
            ParseError::AmbiguousAdjacentNumerals { left, right } => format!(
                "Heard '{}' and '{}' with nothing between them. Please say the operator.",
                left, right
            ),
        }
    }
}

/// Why an expression string could not be evaluated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("empty expression")]
    EmptyExpression,

    #[error("disallowed character '{0}' in expression")]
    DisallowedCharacter(char),

    #[error("unexpected '{0}' in expression")]
    UnexpectedToken(String),

    #[error("expression ended unexpectedly")]
    UnexpectedEnd,

    #[error("division by zero")]
    DivisionByZero,

    #[error("number too large")]
    Overflow,

    #[error("result is not a real number")]
    NotReal,

    #[error("expression nested too deeply")]
    TooDeep,
}

/// Central error type for voxcalc
#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for voxcalc operations
pub type CalcResult<T> = Result<T, CalcError>;
