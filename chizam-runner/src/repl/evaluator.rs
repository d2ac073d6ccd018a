use chizam_interpreter::environment::Environment;
use chizam_interpreter::object::{Echo, Object};
use chizam_interpreter::{run_line, Error};

pub trait Evaluator {
    type Object;

    fn evaluate(&mut self, line: &str) -> Self::Object;
}

/// What one line produced: its echoes, in order, and how it ended.
pub struct LineOutput {
    pub echoes: Vec<Echo>,
    pub result: Result<Option<Object>, Error>,
}

pub struct InterpreterEvaluator {
    environment: Environment,
    line_number: usize,
}

impl InterpreterEvaluator {
    pub fn new() -> Self {
        Self {
            environment: Environment::new(),
            line_number: 0,
        }
    }
}

impl Evaluator for InterpreterEvaluator {
    type Object = LineOutput;

    fn evaluate(&mut self, line: &str) -> LineOutput {
        self.line_number += 1;
        let mut echoes = Vec::new();
        let result = run_line(line, self.line_number, &mut self.environment, &mut echoes);
        if let Err(err) = &result {
            tracing::debug!(line = self.line_number, %err, "line failed");
        }
        LineOutput { echoes, result }
    }
}
