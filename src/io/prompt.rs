//! Line-oriented operator prompts.
//!
//! Collection is interactive; keeping the prompter generic over `BufRead`
//! and `Write` lets tests script an entire session from a string.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Paired input reader and output writer for one interactive session.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `label` and read one line, trimmed of surrounding whitespace.
    ///
    /// Returns `None` at end of input so callers can tell exhausted input
    /// apart from a blank line (`Some("")`); the collection loop treats
    /// `None` at any prompt as the termination signal, so piped input can
    /// never hang a run.
    pub fn ask(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}").context("write prompt")?;
        self.output.flush().context("flush prompt")?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("read prompt input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Print one line of product output (progress, notices).
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").context("write output")?;
        Ok(())
    }
}
