//! Expansion of `@file` arguments into the arguments stored in that file.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Replace every `@path` argument after the program name with the tokens read from `path`.
///
/// Relative paths resolve against `cwd`. Files are not expanded recursively.
pub fn expand_args<I>(args: I, cwd: &Path) -> Result<Vec<OsString>>
where
    I: IntoIterator<Item = OsString>,
{
    let mut expanded = Vec::new();
    for (index, arg) in args.into_iter().enumerate() {
        let file = arg
            .to_str()
            .filter(|_| index > 0)
            .and_then(|value| value.strip_prefix('@'))
            .filter(|path| !path.is_empty());

        match file {
            Some(path) => {
                let path = cwd.join(path);
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read response file {}", path.display()))?;
                let tokens = tokenize(&contents)
                    .with_context(|| format!("invalid response file {}", path.display()))?;
                tracing::debug!(path = %path.display(), count = tokens.len(), "expanded response file");
                expanded.extend(tokens.into_iter().map(OsString::from));
            }
            None => expanded.push(arg),
        }
    }
    Ok(expanded)
}

/// Split on whitespace; single or double quotes group characters into one token.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in input.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("unterminated {q} quote");
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
