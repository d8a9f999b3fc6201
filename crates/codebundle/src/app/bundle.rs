//! Writing selected files into a single bundle.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::app::order::order;
use crate::app::scan::{normalize, select};
use crate::domain::errors::BundleError;
use crate::domain::model::{BundleRequest, CandidateFile};

/// Outcome of a successful bundle run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleReport {
    pub output_path: PathBuf,
    pub files: usize,
}

/// Streams candidate files into one text artifact.
#[derive(Debug, Clone)]
pub struct Bundler {
    generated_at: OffsetDateTime,
}

impl Default for Bundler {
    fn default() -> Self {
        Self::new()
    }
}

impl Bundler {
    /// Bundler stamping output with the current UTC time.
    pub fn new() -> Self {
        Self::with_timestamp(OffsetDateTime::now_utc())
    }

    /// Bundler stamping output with a fixed time.
    pub fn with_timestamp(generated_at: OffsetDateTime) -> Self {
        Self { generated_at }
    }

    /// Select, order, and bundle the files under `root` as `request` describes.
    ///
    /// Nothing is written when validation or selection fails.
    pub fn run(&self, root: &Path, request: &BundleRequest) -> Result<BundleReport, BundleError> {
        let output_path = normalize(&root.join(&request.output));
        let mut files = select(root, request, &output_path)?;
        order(&mut files, request.sort);
        self.bundle(&files, request, &output_path)
    }

    /// Write `files` to `output_path`, replacing anything already there.
    ///
    /// The destination is opened once and released on every path out of this function. A
    /// failure part way through can leave a truncated file behind.
    pub fn bundle(
        &self,
        files: &[CandidateFile],
        request: &BundleRequest,
        output_path: &Path,
    ) -> Result<BundleReport, BundleError> {
        let output_error = |source: io::Error| BundleError::OutputWrite {
            path: output_path.to_path_buf(),
            source,
        };

        let file = File::create(output_path).map_err(output_error)?;
        let mut writer = BufWriter::new(file);
        self.write_bundle(&mut writer, files, request, output_path)?;
        writer.flush().map_err(output_error)?;

        tracing::info!(
            output = %output_path.display(),
            files = files.len(),
            "bundle written"
        );
        Ok(BundleReport {
            output_path: output_path.to_path_buf(),
            files: files.len(),
        })
    }

    /// Render the bundle in memory.
    pub fn render(
        &self,
        files: &[CandidateFile],
        request: &BundleRequest,
    ) -> Result<String, BundleError> {
        let mut buffer = Vec::new();
        self.write_bundle(&mut buffer, files, request, Path::new("<memory>"))?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn write_bundle<W: Write>(
        &self,
        writer: &mut W,
        files: &[CandidateFile],
        request: &BundleRequest,
        output_path: &Path,
    ) -> Result<(), BundleError> {
        let output_error = |source: io::Error| BundleError::OutputWrite {
            path: output_path.to_path_buf(),
            source,
        };

        if let Some(author) = request.author.as_deref().filter(|a| !a.trim().is_empty()) {
            writeln!(writer, "// Author: {author}").map_err(output_error)?;
        }
        writeln!(writer, "// Generated: {}", self.timestamp()).map_err(output_error)?;
        writeln!(writer).map_err(output_error)?;

        for file in files {
            tracing::debug!(path = %file.absolute_path.display(), "bundling");
            if request.note {
                let line = file.language.comment(&format!("Source: {}", file.display_path()));
                writeln!(writer, "{line}").map_err(output_error)?;
            }

            let content =
                fs::read_to_string(&file.absolute_path).map_err(|source| BundleError::FileRead {
                    path: file.absolute_path.clone(),
                    source,
                })?;

            let content = if request.remove_empty_lines {
                strip_blank_lines(&content)
            } else {
                content
            };

            writer.write_all(content.as_bytes()).map_err(output_error)?;
            if !content.is_empty() && !content.ends_with('\n') {
                writeln!(writer).map_err(output_error)?;
            }
            writeln!(writer).map_err(output_error)?;
        }
        Ok(())
    }

    fn timestamp(&self) -> String {
        self.generated_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.generated_at.unix_timestamp().to_string())
    }
}

/// Drop every empty or whitespace-only line, keeping the rest in order.
///
/// Accepts LF and CRLF input; the result uses LF and ends with a newline unless empty.
pub fn strip_blank_lines(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for line in content.lines().filter(|line| !line.trim().is_empty()) {
        out.push_str(line);
        out.push('\n');
    }
    out
}
