//! Core processing modules
//!
//! Transcript normalization, numeral recognition and expression assembly.

pub mod assembler;
pub mod expression;
pub mod numerals;
pub mod parser;
pub mod text_normalizer;

pub use assembler::ExpressionAssembler;
pub use expression::{Expression, Lexeme, Operator};
pub use numerals::{parse_numeral, Numeral};
pub use parser::{text_to_expression, UtteranceParser};
pub use text_normalizer::TextNormalizer;
