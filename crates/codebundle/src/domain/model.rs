//! Domain models for bundle requests and the files they select.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// File name used when no output path is given.
pub const DEFAULT_OUTPUT: &str = "bundle.txt";

/// Languages recognized by the selector, each bound to exactly one file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LanguageTag {
    CSharp,
    Java,
    Python,
    Html,
}

impl LanguageTag {
    /// Every known language, in declaration order.
    pub const ALL: [LanguageTag; 4] = [
        LanguageTag::CSharp,
        LanguageTag::Java,
        LanguageTag::Python,
        LanguageTag::Html,
    ];

    /// Tag accepted by `--language`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::CSharp => "csharp",
            LanguageTag::Java => "java",
            LanguageTag::Python => "python",
            LanguageTag::Html => "html",
        }
    }

    /// Extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            LanguageTag::CSharp => "cs",
            LanguageTag::Java => "java",
            LanguageTag::Python => "py",
            LanguageTag::Html => "html",
        }
    }

    /// Map a file extension (with or without leading dot, any case) to its language.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        Self::ALL.into_iter().find(|tag| tag.extension() == ext)
    }

    /// Render `text` as a single-line comment in this language's syntax.
    pub fn comment(&self, text: &str) -> String {
        match self {
            LanguageTag::CSharp | LanguageTag::Java => format!("// {text}"),
            LanguageTag::Python => format!("# {text}"),
            LanguageTag::Html => format!("<!-- {text} -->"),
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageTag {
    type Err = UnknownLanguage;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == needle)
            .ok_or_else(|| UnknownLanguage(value.trim().to_owned()))
    }
}

/// Returned when a language term is not one of the known tags.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("unknown language '{0}'")]
pub struct UnknownLanguage(pub String);

/// Which languages a bundle draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSelector {
    All,
    /// Never empty once validated.
    Only(BTreeSet<LanguageTag>),
}

impl LanguageSelector {
    pub fn includes(&self, tag: LanguageTag) -> bool {
        match self {
            LanguageSelector::All => true,
            LanguageSelector::Only(tags) => tags.contains(&tag),
        }
    }
}

impl fmt::Display for LanguageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageSelector::All => f.write_str("all"),
            LanguageSelector::Only(tags) => {
                let joined: Vec<_> = tags.iter().map(LanguageTag::as_str).collect();
                f.write_str(&joined.join(","))
            }
        }
    }
}

/// Ordering applied to the selected files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Ordinal comparison of the file name.
    #[default]
    ByName,
    /// Ascending extension, enumeration order within an extension.
    ByType,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::ByName => "name",
            SortMode::ByType => "type",
        }
    }
}

/// How far the file selector descends below the working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum ScanDepth {
    /// Only files directly inside the working directory.
    Shallow,
    /// Every subdirectory except build output (`bin`, `obj`, `debug`).
    #[default]
    Deep,
}

impl ScanDepth {
    /// Depth limit handed to the directory walker.
    pub fn max_depth(&self) -> Option<usize> {
        match self {
            ScanDepth::Shallow => Some(1),
            ScanDepth::Deep => None,
        }
    }
}

/// Validated bundle options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRequest {
    pub languages: LanguageSelector,
    /// Destination as given by the user, relative paths resolve against the working directory.
    pub output: PathBuf,
    pub note: bool,
    pub sort: SortMode,
    pub remove_empty_lines: bool,
    pub author: Option<String>,
    pub depth: ScanDepth,
}

/// A source file chosen for bundling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub absolute_path: PathBuf,
    pub relative_path: PathBuf,
    /// Lower-cased, without the leading dot.
    pub extension: String,
    pub language: LanguageTag,
}

impl CandidateFile {
    pub fn file_name(&self) -> &std::ffi::OsStr {
        self.absolute_path
            .file_name()
            .unwrap_or(self.absolute_path.as_os_str())
    }

    /// Relative path as written into note lines.
    pub fn display_path(&self) -> String {
        self.relative_path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_map_back_to_tags() {
        for tag in LanguageTag::ALL {
            assert_eq!(LanguageTag::from_extension(tag.extension()), Some(tag));
        }
        assert_eq!(LanguageTag::from_extension(".CS"), Some(LanguageTag::CSharp));
        assert_eq!(LanguageTag::from_extension("Py"), Some(LanguageTag::Python));
        assert_eq!(LanguageTag::from_extension("rs"), None);
        assert_eq!(LanguageTag::from_extension("htm"), None);
    }

    #[test]
    fn parses_tags_case_insensitively() {
        assert_eq!("CSharp".parse::<LanguageTag>(), Ok(LanguageTag::CSharp));
        assert_eq!(" html ".parse::<LanguageTag>(), Ok(LanguageTag::Html));
        assert_eq!(
            "rust".parse::<LanguageTag>(),
            Err(UnknownLanguage("rust".into()))
        );
    }

    #[test]
    fn comments_follow_language_syntax() {
        assert_eq!(LanguageTag::Java.comment("x"), "// x");
        assert_eq!(LanguageTag::Python.comment("x"), "# x");
        assert_eq!(LanguageTag::Html.comment("x"), "<!-- x -->");
    }

    #[test]
    fn selector_display_is_comma_separated() {
        let selector =
            LanguageSelector::Only([LanguageTag::Python, LanguageTag::CSharp].into_iter().collect());
        assert_eq!(selector.to_string(), "csharp,python");
        assert!(selector.includes(LanguageTag::Python));
        assert!(!selector.includes(LanguageTag::Html));
        assert!(LanguageSelector::All.includes(LanguageTag::Html));
    }
}
