use std::io::Write;

use super::evaluator::LineOutput;

pub trait Printer {
    type Object;

    fn print(&mut self, object: Self::Object) -> std::io::Result<()>;
}

pub struct InterpreterPrinter<W: Write> {
    out: W,
}

impl<W: Write> InterpreterPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Printer for InterpreterPrinter<W> {
    type Object = LineOutput;

    fn print(&mut self, output: LineOutput) -> std::io::Result<()> {
        for echo in &output.echoes {
            writeln!(self.out, "{}", echo)?;
        }
        if let Err(err) = &output.result {
            writeln!(self.out, "Error: {}", err)?;
        }
        self.out.flush()
    }
}
