//! voxcalc Library
//!
//! Turns spoken arithmetic ("what is twelve divided by three point five")
//! into expressions ("12/3.5") and evaluates them.

pub mod config;
pub mod core;
pub mod error;
pub mod evaluator;
pub mod processor;
pub mod session;

pub use crate::core::{text_to_expression, Expression, UtteranceParser};
pub use error::{CalcError, CalcResult, EvalError, ParseError};
pub use evaluator::{evaluate, Number};
pub use processor::{ProcessResult, Processor};
