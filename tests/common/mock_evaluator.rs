//! Mock Evaluator for Testing
//!
//! Records every expression it is asked to evaluate.

use std::sync::{Arc, Mutex};
use voxcalc::evaluator::Evaluator;
use voxcalc::{EvalError, Number};

/// Mock evaluator that returns a canned answer
#[derive(Debug)]
pub struct MockEvaluator {
    /// All expressions that were evaluated
    pub seen: Arc<Mutex<Vec<String>>>,
    /// Answer returned for every call
    pub answer: Result<Number, EvalError>,
}

impl MockEvaluator {
    pub fn new(answer: Result<Number, EvalError>) -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
            answer,
        }
    }

    /// Get all evaluated expressions
    pub fn get_seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Evaluator for MockEvaluator {
    fn evaluate(&self, expression: &str) -> Result<Number, EvalError> {
        self.seen.lock().unwrap().push(expression.to_string());
        self.answer.clone()
    }

    fn name(&self) -> &str {
        "mock"
    }
}
