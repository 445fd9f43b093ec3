// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive line prompts.
//!
//! Prompts are written to stderr so command output on stdout stays clean
//! for redirection.

use std::io::{self, BufRead, Stderr, StdinLock, Write};

use crate::error::{Error, Result};

/// Reads answers from `input` after writing questions to `output`.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<StdinLock<'static>, Stderr> {
    /// Prompts on the terminal.
    pub fn stdio() -> Self {
        Prompt::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompt { input, output }
    }

    /// Writes a line of information.
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Asks a question and returns the trimmed answer.
    ///
    /// End of input cancels the operation.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Cancelled);
        }
        Ok(line.trim().to_string())
    }

    /// Asks until a non-empty answer is given.
    pub fn ask_required(&mut self, question: &str) -> Result<String> {
        loop {
            let answer = self.ask(question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
        }
    }

    /// Asks a yes/no question defaulting to no.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        match self.ask(&format!("{} [y/N] ", question)) {
            Ok(answer) => Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes")),
            Err(Error::Cancelled) => Ok(false),
            Err(e) => Err(e),
        }
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &W {
        &self.output
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
