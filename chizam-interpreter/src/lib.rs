pub mod environment;
pub mod evaluator;
pub mod object;

use chizam_core::lexer::{LexError, Tokenizer};
use chizam_core::parser::{self, ParseError};
use thiserror::Error;

use environment::Environment;
use object::{Echo, EvaluationError, Object};

/// Why a line produced no result. Lex and syntax errors happen before any
/// evaluation, so they never leave the environment half updated.
#[derive(Debug, PartialEq, Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Evaluation(#[from] EvaluationError),
}

/// Lexes, parses and evaluates one source line against `environment`.
///
/// `line_number` is only used for diagnostics. Everything the line prints is
/// appended to `echoes`, including the output of a line that later fails.
pub fn run_line(
    line: &str,
    line_number: usize,
    environment: &mut Environment,
    echoes: &mut Vec<Echo>,
) -> Result<Option<Object>, Error> {
    let tokens = Tokenizer::starting_at(line, line_number).collect::<Result<Vec<_>, _>>()?;
    let statement = parser::parse(tokens)?;
    tracing::debug!(line = line_number, %statement, "parsed");

    Ok(evaluator::eval_line(&statement, environment, echoes)?)
}
