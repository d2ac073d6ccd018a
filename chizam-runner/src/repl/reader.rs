use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

const PROMPT: &str = "chizam > ";

pub enum ReadOutput {
    Exit,
    Clear,
    Line(String),
}

pub struct Reader {
    rl: Editor<(), DefaultHistory>,
}

impl Reader {
    pub fn new(rl: Editor<(), DefaultHistory>) -> Self {
        Self { rl }
    }

    pub fn read(&mut self) -> Result<ReadOutput, ReadlineError> {
        match self.rl.readline(PROMPT) {
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                Ok(ReadOutput::Clear)
            }
            Err(ReadlineError::Eof) => Ok(ReadOutput::Exit),
            Err(err) => Err(err),
            Ok(line) => {
                if let Err(err) = self.rl.add_history_entry(line.as_str()) {
                    tracing::warn!(%err, "could not add line to history");
                }
                Ok(ReadOutput::Line(line))
            }
        }
    }
}
