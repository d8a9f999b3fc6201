//! Validation of raw command-line and prompt input into a [`BundleRequest`].

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::domain::errors::BundleError;
use crate::domain::model::{
    BundleRequest, DEFAULT_OUTPUT, LanguageSelector, LanguageTag, ScanDepth, SortMode,
};

/// Unvalidated options as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBundleOptions {
    pub language: String,
    pub output: Option<String>,
    pub note: bool,
    pub sort: Option<String>,
    pub remove_empty_lines: bool,
    pub author: Option<String>,
    pub depth: ScanDepth,
}

/// Validate every field, failing on the first offending one.
pub fn validate(raw: RawBundleOptions) -> Result<BundleRequest, BundleError> {
    let languages = parse_language_selector(&raw.language)?;
    let sort = parse_sort_mode(raw.sort.as_deref())?;

    let output = raw
        .output
        .as_deref()
        .map(strip_quotes)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_OUTPUT);

    let author = raw
        .author
        .as_deref()
        .map(strip_quotes)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned);

    Ok(BundleRequest {
        languages,
        output: PathBuf::from(output),
        note: raw.note,
        sort,
        remove_empty_lines: raw.remove_empty_lines,
        author,
        depth: raw.depth,
    })
}

/// Parse `all` or a comma-separated list of language tags.
///
/// Terms are trimmed and lower-cased. Unknown terms are dropped with a warning; the
/// selector only fails when nothing valid remains.
pub fn parse_language_selector(raw: &str) -> Result<LanguageSelector, BundleError> {
    let raw = strip_quotes(raw.trim());
    let mut tags = BTreeSet::new();

    for term in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if term.eq_ignore_ascii_case("all") {
            return Ok(LanguageSelector::All);
        }
        match term.parse::<LanguageTag>() {
            Ok(tag) => {
                tags.insert(tag);
            }
            Err(err) => tracing::warn!(%err, "ignoring language term"),
        }
    }

    if tags.is_empty() {
        return Err(BundleError::InvalidLanguage {
            selector: raw.to_owned(),
        });
    }
    Ok(LanguageSelector::Only(tags))
}

/// Parse the sort mode. Matching is exact and case-sensitive; unset means `name`.
pub fn parse_sort_mode(raw: Option<&str>) -> Result<SortMode, BundleError> {
    match raw.map(str::trim) {
        None | Some("") | Some("name") => Ok(SortMode::ByName),
        Some("type") => Ok(SortMode::ByType),
        Some(other) => Err(BundleError::InvalidSort {
            value: other.to_owned(),
        }),
    }
}

/// Remove one pair of matching surrounding quotes.
pub fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(language: &str) -> RawBundleOptions {
        RawBundleOptions {
            language: language.into(),
            ..RawBundleOptions::default()
        }
    }

    #[test]
    fn all_selects_every_language() {
        assert_eq!(parse_language_selector("all").unwrap(), LanguageSelector::All);
        assert_eq!(parse_language_selector(" ALL ").unwrap(), LanguageSelector::All);
        assert_eq!(
            parse_language_selector("java,all").unwrap(),
            LanguageSelector::All
        );
    }

    #[test]
    fn splits_trims_and_lowercases_terms() {
        let selector = parse_language_selector(" Python , JAVA,,").unwrap();
        let expected: BTreeSet<_> = [LanguageTag::Python, LanguageTag::Java].into_iter().collect();
        assert_eq!(selector, LanguageSelector::Only(expected));
    }

    #[test]
    fn unknown_terms_are_dropped_when_others_remain() {
        let selector = parse_language_selector("rust,html").unwrap();
        assert_eq!(
            selector,
            LanguageSelector::Only([LanguageTag::Html].into_iter().collect())
        );
    }

    #[test]
    fn only_unknown_terms_is_invalid_language() {
        for input in ["rust", "rust, go", "", " , "] {
            let err = parse_language_selector(input).unwrap_err();
            assert!(
                matches!(err, BundleError::InvalidLanguage { .. }),
                "{input:?} gave {err:?}"
            );
            assert!(err.is_validation());
        }
    }

    #[test]
    fn sort_mode_is_case_sensitive_with_name_default() {
        assert_eq!(parse_sort_mode(None).unwrap(), SortMode::ByName);
        assert_eq!(parse_sort_mode(Some("")).unwrap(), SortMode::ByName);
        assert_eq!(parse_sort_mode(Some("name")).unwrap(), SortMode::ByName);
        assert_eq!(parse_sort_mode(Some("type")).unwrap(), SortMode::ByType);
        for bad in ["Name", "TYPE", "size"] {
            assert!(matches!(
                parse_sort_mode(Some(bad)),
                Err(BundleError::InvalidSort { .. })
            ));
        }
    }

    #[test]
    fn output_defaults_and_loses_quotes() {
        let request = validate(raw("all")).unwrap();
        assert_eq!(request.output, PathBuf::from(DEFAULT_OUTPUT));

        let mut options = raw("all");
        options.output = Some("\"my bundle.txt\"".into());
        options.author = Some("'Ada'".into());
        let request = validate(options).unwrap();
        assert_eq!(request.output, PathBuf::from("my bundle.txt"));
        assert_eq!(request.author.as_deref(), Some("Ada"));
    }

    #[test]
    fn blank_author_is_dropped() {
        let mut options = raw("java");
        options.author = Some("   ".into());
        assert_eq!(validate(options).unwrap().author, None);
    }

    #[test]
    fn language_is_checked_before_sort() {
        let mut options = raw("cobol");
        options.sort = Some("size".into());
        assert!(matches!(
            validate(options),
            Err(BundleError::InvalidLanguage { .. })
        ));
    }

    #[test]
    fn strip_quotes_only_removes_matching_pair() {
        assert_eq!(strip_quotes("\"a\""), "a");
        assert_eq!(strip_quotes("'a'"), "a");
        assert_eq!(strip_quotes("\"a'"), "\"a'");
        assert_eq!(strip_quotes("\""), "\"");
        assert_eq!(strip_quotes("plain"), "plain");
    }
}
