//! Interactive confirmation and line input.
//!
//! Pages ask through the [`Confirm`] trait so the same code runs behind a
//! terminal prompt, a `--yes` flag, or a scripted answer list in tests.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Asks a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Answers every question the same way (`--yes` gives `AutoConfirm(true)`).
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _question: &str) -> bool {
        self.0
    }
}

/// Answers from a fixed list, then declines once it runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        ScriptedConfirm {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        self.asked.push(question.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}

/// Line-oriented terminal prompt over any reader and writer.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompt { input, output }
    }

    /// Prints `label` and reads one trimmed line. `None` at end of input.
    pub fn read_line(&mut self, label: &str) -> Option<String> {
        // A closed stdout only loses the label; the answer is still read.
        let _ = write!(self.output, "{}", label);
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// Writes a block of text followed by a newline.
    pub fn say(&mut self, text: &str) {
        let _ = writeln!(self.output, "{}", text);
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Confirm for Prompt<R, W> {
    fn confirm(&mut self, question: &str) -> bool {
        match self.read_line(&format!("{} [y/N] ", question)) {
            Some(answer) => matches!(answer.to_lowercase().as_str(), "y" | "ya" | "yes"),
            None => false,
        }
    }
}
