use std::io::Write;

use crate::repl::evaluator::{Evaluator, InterpreterEvaluator};
use crate::repl::printer::{InterpreterPrinter, Printer};

/// Runs a script one line at a time against a single environment, the same
/// way an interactive session would. Returns how many lines failed.
pub fn execute<W: Write>(source: &str, out: &mut W) -> std::io::Result<usize> {
    let mut evaluator = InterpreterEvaluator::new();
    let mut printer = InterpreterPrinter::new(out);
    let mut failures = 0;

    for line in source.lines() {
        let output = evaluator.evaluate(line);
        if output.result.is_err() {
            failures += 1;
        }
        printer.print(output)?;
    }
    Ok(failures)
}
