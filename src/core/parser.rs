//! Utterance Parser
//!
//! Normalizer + assembler behind one call: transcript in, expression out.

use super::assembler::ExpressionAssembler;
use super::expression::Expression;
use super::text_normalizer::TextNormalizer;
use crate::config::Config;
use crate::error::{CalcResult, ParseError};

/// Translates spoken transcripts into arithmetic expressions
#[derive(Debug, Clone, Default)]
pub struct UtteranceParser {
    normalizer: TextNormalizer,
    assembler: ExpressionAssembler,
}

impl UtteranceParser {
    pub fn new(normalizer: TextNormalizer, assembler: ExpressionAssembler) -> Self {
        Self {
            normalizer,
            assembler,
        }
    }

    /// Build a parser from the user's configuration
    pub fn from_config(config: &Config) -> CalcResult<Self> {
        let normalizer = TextNormalizer::new(&config.voice_corrections, &config.extra_fillers)?;
        Ok(Self::new(
            normalizer,
            ExpressionAssembler::new(config.adjacent_numerals),
        ))
    }

    /// Parse a transcript
    pub fn parse(&self, transcript: &str) -> Result<Expression, ParseError> {
        if self.normalizer.is_blank(transcript) {
            return Err(ParseError::EmptyInput);
        }

        let tokens = self.normalizer.normalize(transcript);
        self.assembler.assemble(&tokens)
    }
}

/// Parse a transcript with default settings
///
/// ```
/// assert_eq!(voxcalc::text_to_expression("five plus seven").as_deref(), Ok("5+7"));
/// ```
pub fn text_to_expression(transcript: &str) -> Result<String, ParseError> {
    UtteranceParser::default()
        .parse(transcript)
        .map(|expr| expr.to_string())
}
