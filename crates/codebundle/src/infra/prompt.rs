//! Interactive question/answer adapters.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};

/// Source of answers for interactive workflows.
pub trait Prompter {
    /// Ask for free text. An empty answer yields `default`, or the empty string.
    fn text(&mut self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Show a message between questions, e.g. why an answer was rejected.
    fn notice(&mut self, message: &str) -> Result<()>;
}

/// Styled prompts for an attached terminal.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompter for TerminalPrompter {
    fn text(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_owned());
        }
        input
            .interact_text()
            .with_context(|| format!("failed to read answer for '{prompt}'"))
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .with_context(|| format!("failed to read answer for '{prompt}'"))
    }

    fn notice(&mut self, message: &str) -> Result<()> {
        eprintln!("{message}");
        Ok(())
    }
}

/// Plain line-oriented prompts over any reader/writer pair, used when input is piped.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        writeln!(self.writer, "{question}")?;
        self.writer.flush()?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("failed to read answer")?;
        if read == 0 {
            return Err(anyhow!("input closed before answering '{question}'"));
        }
        Ok(line.trim().to_owned())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn text(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        let question = match default {
            Some(default) => format!("{prompt} [{default}]:"),
            None => format!("{prompt}:"),
        };
        let answer = self.ask(&question)?;
        if answer.is_empty() {
            return Ok(default.unwrap_or_default().to_owned());
        }
        Ok(answer)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        let answer = self.ask(&format!("{prompt} ({hint}):"))?;
        if answer.is_empty() {
            return Ok(default);
        }
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    fn notice(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{message}")?;
        Ok(())
    }
}
