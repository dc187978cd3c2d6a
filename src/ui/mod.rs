//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use console::Term;

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_changed_paths, display_error, display_proposed_version,
    display_push_guidance, display_rollback, display_status, display_success,
    display_version_line, format_push_guidance,
};

/// Source of yes/no decisions.
///
/// The release workflow asks every question through this trait so tests can
/// answer deterministically instead of reading a terminal.
pub trait Confirm {
    /// Ask `prompt`; `true` only for an explicit yes
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Only `y` or `Y` counts as yes; anything else, including nothing, is no.
pub fn is_affirmative(answer: Option<char>) -> bool {
    matches!(answer, Some('y') | Some('Y'))
}

/// Prompts on the terminal, reading a single key press.
///
/// When stdin is not a terminal a whole line is read and its first
/// character is used as the answer.
pub struct TerminalPrompt {
    term: Term,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        TerminalPrompt {
            term: Term::stdout(),
        }
    }

    fn read_answer(&self) -> Result<Option<char>> {
        // Piped answers must win even when stdout is a terminal
        if io::stdin().is_terminal() {
            let key = self.term.read_char()?;
            self.term.write_line(&key.to_string())?;
            return Ok(Some(key));
        }

        read_line_answer(io::stdin().lock())
    }
}

/// First non-blank character of the next line, if any
pub fn read_line_answer<R: BufRead>(mut reader: R) -> Result<Option<char>> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().chars().next())
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirm for TerminalPrompt {
    /// Displays the prompt with a "(y/N)" suffix and waits for one key.
    ///
    /// # Returns
    /// * `Ok(true)` - If user pressed "y" or "Y"
    /// * `Ok(false)` - Otherwise (including Enter)
    /// * `Err` - If input error occurs
    fn confirm(&self, prompt: &str) -> Result<bool> {
        print!("\n{} (y/N) ", prompt);
        io::stdout().flush()?;

        let answer = self.read_answer()?;
        log::debug!("prompt '{}' answered {:?}", prompt, answer);
        Ok(is_affirmative(answer))
    }
}

/// Answers yes to everything without asking
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        println!("\n{} (y/N) y [--yes]", prompt);
        Ok(true)
    }
}

/// Replays canned answers in order, recording each prompt asked.
///
/// Running out of answers counts as a plain Enter, which is a "no".
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<char>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: &str) -> Self {
        ScriptedPrompt {
            answers: RefCell::new(answers.chars().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Prompts asked so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Confirm for ScriptedPrompt {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.asked.borrow_mut().push(prompt.to_string());
        let answer = self.answers.borrow_mut().pop_front();
        Ok(is_affirmative(answer))
    }
}
