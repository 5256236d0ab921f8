//! Transcript Processor
//!
//! Routes a finished transcript through the parser and the evaluator and
//! reports what happened in a form a UI or a TTS engine can use directly.

use crate::config::Config;
use crate::core::UtteranceParser;
use crate::error::{CalcResult, EvalError, ParseError};
use crate::evaluator::{Evaluator, SafeEvaluator};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of processing a transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProcessResult {
    /// Expression parsed and evaluated
    Computed {
        transcript: String,
        expression: String,
        result: String,
    },
    /// Expression parsed, evaluation disabled
    Parsed {
        transcript: String,
        expression: String,
    },
    /// No usable expression in the transcript
    ParseFailed {
        transcript: String,
        #[serde(serialize_with = "as_display")]
        error: ParseError,
    },
    /// Expression parsed but could not be evaluated
    EvalFailed {
        transcript: String,
        expression: String,
        #[serde(serialize_with = "as_display")]
        error: EvalError,
    },
}

fn as_display<T: std::fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

impl ProcessResult {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ProcessResult::Computed { .. } | ProcessResult::Parsed { .. }
        )
    }

    /// Expression text, when parsing got that far
    pub fn expression(&self) -> Option<&str> {
        match self {
            ProcessResult::Computed { expression, .. }
            | ProcessResult::Parsed { expression, .. }
            | ProcessResult::EvalFailed { expression, .. } => Some(expression),
            ProcessResult::ParseFailed { .. } => None,
        }
    }

    /// Status line for a display
    pub fn message(&self) -> String {
        match self {
            ProcessResult::Computed { result, .. } => result.clone(),
            ProcessResult::Parsed { expression, .. } => expression.clone(),
            ProcessResult::ParseFailed { error, .. } => error.user_message(),
            ProcessResult::EvalFailed {
                expression, error, ..
            } => format!("Could not compute '{}': {}", expression, error),
        }
    }

    /// Feedback for a text-to-speech engine
    pub fn spoken_text(&self) -> String {
        match self {
            ProcessResult::Computed { result, .. } => format!("The result is {}", result),
            ProcessResult::Parsed { expression, .. } => format!("I heard {}", expression),
            ProcessResult::ParseFailed { .. } => {
                "Sorry, I couldn't understand that calculation.".to_string()
            }
            ProcessResult::EvalFailed { .. } => "Sorry, I couldn't compute that.".to_string(),
        }
    }
}

/// Turns transcripts into calculation results
#[derive(Clone)]
pub struct Processor {
    parser: UtteranceParser,
    evaluator: Option<Arc<dyn Evaluator>>,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(UtteranceParser::default(), Some(Arc::new(SafeEvaluator)))
    }
}

impl Processor {
    /// Create a processor; `None` disables evaluation
    pub fn new(parser: UtteranceParser, evaluator: Option<Arc<dyn Evaluator>>) -> Self {
        Self { parser, evaluator }
    }

    /// Build a processor from the user's configuration
    pub fn from_config(config: &Config) -> CalcResult<Self> {
        let parser = UtteranceParser::from_config(config)?;
        let evaluator: Option<Arc<dyn Evaluator>> = if config.evaluate {
            Some(Arc::new(SafeEvaluator))
        } else {
            None
        };
        Ok(Self::new(parser, evaluator))
    }

    /// Process one transcript
    pub fn process(&self, transcript: &str) -> ProcessResult {
        let transcript = transcript.trim().to_string();
        debug!("Processing transcript: '{}'", transcript);

        let expression = match self.parser.parse(&transcript) {
            Ok(expr) => expr.to_string(),
            Err(error) => {
                warn!("❌ Could not parse '{}': {}", transcript, error);
                return ProcessResult::ParseFailed { transcript, error };
            }
        };

        let Some(evaluator) = &self.evaluator else {
            info!("📝 '{}' -> {}", transcript, expression);
            return ProcessResult::Parsed {
                transcript,
                expression,
            };
        };

        match evaluator.evaluate(&expression) {
            Ok(value) => {
                info!("🧮 '{}' -> {} = {}", transcript, expression, value);
                ProcessResult::Computed {
                    transcript,
                    expression,
                    result: value.to_string(),
                }
            }
            Err(error) => {
                warn!(
                    "❌ {} evaluator failed on '{}': {}",
                    evaluator.name(),
                    expression,
                    error
                );
                ProcessResult::EvalFailed {
                    transcript,
                    expression,
                    error,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed() {
        let result = Processor::default().process("what is five plus seven");
        assert_eq!(
            result,
            ProcessResult::Computed {
                transcript: "what is five plus seven".to_string(),
                expression: "5+7".to_string(),
                result: "12".to_string(),
            }
        );
        assert_eq!(result.spoken_text(), "The result is 12");
        assert!(result.is_success());
    }

    #[test]
    fn test_parse_failure() {
        let result = Processor::default().process("ok please");
        assert!(matches!(
            result,
            ProcessResult::ParseFailed {
                error: ParseError::EmptyExpression,
                ..
            }
        ));
        assert_eq!(result.message(), "Couldn't parse the spoken math expression.");
        assert_eq!(result.expression(), None);
    }

    #[test]
    fn test_eval_failure() {
        let result = Processor::default().process("five divided by zero");
        assert_eq!(result.expression(), Some("5/0"));
        assert_eq!(result.message(), "Could not compute '5/0': division by zero");
        assert!(!result.is_success());
    }

    #[test]
    fn test_evaluation_disabled() {
        let mut config = Config::default();
        config.evaluate = false;
        let processor = Processor::from_config(&config).expect("valid config");
        let result = processor.process("negative five times two");
        assert_eq!(
            result,
            ProcessResult::Parsed {
                transcript: "negative five times two".to_string(),
                expression: "-5*2".to_string(),
            }
        );
    }

    #[test]
    fn test_result_serializes_tagged() {
        let result = Processor::default().process("twelve divided by four");
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["type"], "computed");
        assert_eq!(json["expression"], "12/4");
        assert_eq!(json["result"], "3.0");

        let failed = Processor::default().process("five ten");
        let json = serde_json::to_value(&failed).expect("serialize");
        assert_eq!(json["type"], "parse_failed");
        assert!(json["error"].as_str().unwrap_or_default().contains("'5'"));
    }
}
