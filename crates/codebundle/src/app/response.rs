//! Interactive creation of reusable response files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::app::validate::{parse_language_selector, parse_sort_mode};
use crate::domain::model::DEFAULT_OUTPUT;
use crate::infra::prompt::Prompter;

/// File written by `create-rsp` in the working directory.
pub const RESPONSE_FILE: &str = "response.rsp";

/// Answers collected for a `bundle` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseAnswers {
    pub language: String,
    pub output: String,
    pub note: bool,
    pub sort: String,
    pub remove_empty_lines: bool,
    pub author: String,
}

impl ResponseAnswers {
    /// Ask the six bundle questions in order, re-asking until language and sort validate.
    pub fn collect(prompter: &mut dyn Prompter) -> Result<Self> {
        let language = loop {
            let answer = prompter.text("Languages to bundle (comma separated, or 'all')", None)?;
            match parse_language_selector(&answer) {
                Ok(_) => break answer,
                Err(err) => prompter.notice(&err.to_string())?,
            }
        };

        let output = prompter.text("Bundle file name", Some(DEFAULT_OUTPUT))?;
        let note = prompter.confirm("Add a source path note before each file?", false)?;

        let sort = loop {
            let answer = prompter.text("Sort files by 'name' or 'type'", Some("name"))?;
            match parse_sort_mode(Some(&answer)) {
                Ok(_) => break answer,
                Err(err) => prompter.notice(&err.to_string())?,
            }
        };

        let remove_empty_lines = prompter.confirm("Remove empty lines?", false)?;
        let author = prompter.text("Author (leave empty to skip)", None)?;

        Ok(Self {
            language,
            output,
            note,
            sort,
            remove_empty_lines,
            author,
        })
    }

    /// Render the answers as a single `bundle` command line.
    pub fn command_line(&self) -> String {
        let mut args = vec![
            "bundle".to_owned(),
            "--language".to_owned(),
            quote(self.language.trim()),
        ];
        if !self.output.trim().is_empty() {
            args.push("--output".to_owned());
            args.push(quote(self.output.trim()));
        }
        if self.note {
            args.push("--note".to_owned());
        }
        let sort = match self.sort.trim() {
            "" => "name",
            other => other,
        };
        args.push("--sort".to_owned());
        args.push(quote(sort));
        if self.remove_empty_lines {
            args.push("--remove-empty-lines".to_owned());
        }
        if !self.author.trim().is_empty() {
            args.push("--author".to_owned());
            args.push(quote(self.author.trim()));
        }
        args.join(" ")
    }

    /// Write the command line to [`RESPONSE_FILE`] under `root`, replacing any previous file.
    pub fn write(&self, root: &Path) -> Result<PathBuf> {
        let path = root.join(RESPONSE_FILE);
        fs::write(&path, format!("{}\n", self.command_line()))
            .with_context(|| format!("failed to write response file {}", path.display()))?;
        tracing::info!(path = %path.display(), "response file written");
        Ok(path)
    }
}

/// Quote values the argument-file reader would otherwise split or treat as a quote.
///
/// Uses whichever quote character the value does not contain.
fn quote(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|ch| ch.is_whitespace() || ch == '\'' || ch == '"');
    if !needs_quotes {
        return value.to_owned();
    }
    let mark = if value.contains('"') { '\'' } else { '"' };
    format!("{mark}{value}{mark}")
}
