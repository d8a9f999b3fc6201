//! Command-line definitions and dispatch.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::app::bundle::Bundler;
use crate::app::response::ResponseAnswers;
use crate::app::validate::{RawBundleOptions, validate};
use crate::domain::errors::BundleError;
use crate::domain::model::ScanDepth;
use crate::infra::config::Config;
use crate::infra::prompt::{LinePrompter, TerminalPrompter};

#[derive(Debug, Parser)]
#[command(
    name = "codebundle",
    author,
    version,
    about = "Bundle a directory's source files into a single text file",
    long_about = None,
    after_help = "Arguments of the form @FILE are replaced by the arguments stored in FILE."
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory to scan and write into (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR", global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Concatenate matching source files into one bundle
    Bundle(BundleArgs),
    /// Answer the bundle questions interactively and save them to response.rsp
    CreateRsp,
}

#[derive(Debug, Args)]
pub struct BundleArgs {
    /// Comma separated languages (csharp, java, python, html) or 'all'
    #[arg(short = 'l', long, value_name = "SELECTOR")]
    pub language: String,

    /// Bundle file name or path [default: bundle.txt]
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<String>,

    /// Write each file's relative path as a comment before its content
    #[arg(short = 'n', long)]
    pub note: bool,

    /// Order files by 'name' or 'type' [default: name]
    #[arg(short = 's', long, value_name = "MODE")]
    pub sort: Option<String>,

    /// Drop empty and whitespace-only lines from every file
    #[arg(short = 'r', long)]
    pub remove_empty_lines: bool,

    /// Author written at the top of the bundle
    #[arg(short = 'a', long, value_name = "NAME")]
    pub author: Option<String>,

    /// Scan only the working directory or every subdirectory
    #[arg(long, value_enum, value_name = "DEPTH")]
    pub depth: Option<ScanDepth>,
}

impl BundleArgs {
    /// Combine command-line values with configured defaults.
    pub fn into_raw(self, config: &Config) -> RawBundleOptions {
        RawBundleOptions {
            language: self.language,
            output: self.output.or_else(|| Some(config.bundle.output())),
            note: self.note || config.bundle.note(),
            sort: self.sort.or_else(|| config.bundle.sort()),
            remove_empty_lines: self.remove_empty_lines || config.bundle.remove_empty_lines(),
            author: self.author.or_else(|| config.bundle.author()),
            depth: self.depth.unwrap_or_else(|| config.scan.depth()),
        }
    }
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let explicit_directory = cli.directory.is_some();
    let root = match cli.directory {
        Some(dir) => std::path::absolute(&dir)
            .with_context(|| format!("invalid directory {}", dir.display()))?,
        None => std::env::current_dir().context("unable to determine working directory")?,
    };
    let config = Config::load(&root)?;

    match cli.command {
        Commands::Bundle(args) => {
            let request = validate(args.into_raw(&config))?;
            tracing::debug!(?request, root = %root.display(), "bundle request");
            let report = Bundler::new().run(&root, &request)?;
            println!(
                "Bundled {} file(s) into {}",
                report.files,
                report.output_path.display()
            );
        }
        Commands::CreateRsp => {
            let answers = if io::stdin().is_terminal() {
                ResponseAnswers::collect(&mut TerminalPrompter::new())?
            } else {
                let mut prompter = LinePrompter::new(io::stdin().lock(), io::stdout());
                ResponseAnswers::collect(&mut prompter)?
            };
            let path = answers.write(&root)?;
            println!("Response file created: {}", path.display());
            let directory = explicit_directory.then_some(root.as_path());
            println!("Run it with: {}", rerun_hint(directory, &path));
        }
    }
    Ok(())
}

/// Command that replays a response file against the directory it was created for.
///
/// The file stores no directory, so an explicit `-C` has to be repeated.
pub fn rerun_hint(directory: Option<&Path>, response_file: &Path) -> String {
    match directory {
        Some(dir) => format!(
            "codebundle -C \"{}\" @\"{}\"",
            dir.display(),
            response_file.display()
        ),
        None => format!("codebundle @{}", response_file.display()),
    }
}

/// Exit status for a failed run: 2 for invalid input, 1 for everything else.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<BundleError>() {
        Some(bundle_err) if bundle_err.is_validation() => 2,
        _ => 1,
    }
}
