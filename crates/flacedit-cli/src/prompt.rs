use anyhow::{Context, Result};
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Line-oriented question/answer channel over any reader and writer.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` without a newline and read one line of input.
    ///
    /// Returns the answer with surrounding whitespace trimmed, or `None`
    /// once the input is exhausted.
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;

        if read == 0 {
            writeln!(self.output).context("Failed to write output")?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`Prompter::ask`], but end of input reads as a blank answer.
    pub fn ask_or_blank(&mut self, question: &str) -> Result<String> {
        Ok(self.ask(question)?.unwrap_or_default())
    }

    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{}", line).context("Failed to write output")
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
