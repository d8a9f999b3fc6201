//! Source file selection.

use std::path::{Component, Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};

use crate::domain::errors::BundleError;
use crate::domain::model::{BundleRequest, CandidateFile, LanguageSelector, LanguageTag, ScanDepth};

/// Directory names treated as build output and never descended into.
pub const EXCLUDED_DIRS: [&str; 3] = ["bin", "obj", "debug"];

/// Walks a working directory and yields the files a request asks for.
#[derive(Debug, Clone)]
pub struct FileSelector {
    root: PathBuf,
    languages: LanguageSelector,
    depth: ScanDepth,
    skip: Option<PathBuf>,
}

impl FileSelector {
    pub fn new(root: impl Into<PathBuf>, request: &BundleRequest) -> Self {
        Self {
            root: root.into(),
            languages: request.languages.clone(),
            depth: request.depth,
            skip: None,
        }
    }

    /// Never yield `path`, typically the bundle's own output file.
    pub fn skipping(mut self, path: impl AsRef<Path>) -> Self {
        self.skip = Some(normalize(path.as_ref()));
        self
    }

    /// Lazily enumerate matching files. Siblings are visited in file name order.
    pub fn candidates(&self) -> impl Iterator<Item = CandidateFile> + '_ {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .max_depth(self.depth.max_depth())
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| !is_excluded_dir(entry));

        builder.build().filter_map(move |result| match result {
            Ok(entry) => self.to_candidate(&entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
    }

    fn to_candidate(&self, entry: &DirEntry) -> Option<CandidateFile> {
        let path = entry.path();
        // Symlinked files are bundled; symlinked directories are not descended into.
        let is_file = match entry.file_type() {
            Some(kind) if kind.is_symlink() => path.is_file(),
            Some(kind) => kind.is_file(),
            None => false,
        };
        if !is_file {
            return None;
        }
        if self.skip.as_deref() == Some(normalize(path).as_path()) {
            tracing::debug!(path = %path.display(), "skipping bundle output");
            return None;
        }

        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        let language = LanguageTag::from_extension(&extension)?;
        if !self.languages.includes(language) {
            return None;
        }

        tracing::debug!(path = %path.display(), %language, "selected");
        Some(CandidateFile {
            absolute_path: path.to_path_buf(),
            relative_path: path.strip_prefix(&self.root).unwrap_or(path).to_path_buf(),
            extension,
            language,
        })
    }
}

/// Resolve `.` and `..` components lexically, without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::ParentDir) | None => out.push(".."),
                _ => {}
            },
            other => out.push(other),
        }
    }
    out
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_some_and(|kind| kind.is_dir())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

/// Collect the candidates for `request` under `root`, excluding `output` itself.
pub fn select(
    root: &Path,
    request: &BundleRequest,
    output: &Path,
) -> Result<Vec<CandidateFile>, BundleError> {
    let files: Vec<_> = FileSelector::new(root, request)
        .skipping(output)
        .candidates()
        .collect();

    if files.is_empty() {
        return Err(BundleError::NoMatchingFiles {
            root: root.to_path_buf(),
        });
    }
    tracing::info!(count = files.len(), root = %root.display(), "selected files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::validate::{RawBundleOptions, validate};
    use anyhow::Result;
    use std::fs;

    fn request(language: &str, depth: ScanDepth) -> BundleRequest {
        validate(RawBundleOptions {
            language: language.into(),
            depth,
            ..RawBundleOptions::default()
        })
        .unwrap()
    }

    fn relative_paths(files: &[CandidateFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.relative_path.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    fn fixture() -> Result<tempfile::TempDir> {
        let temp = tempfile::tempdir()?;
        let root = temp.path();
        fs::create_dir_all(root.join("src/nested"))?;
        fs::create_dir_all(root.join("bin/Release"))?;
        fs::create_dir_all(root.join("obj"))?;
        fs::create_dir_all(root.join("debug"))?;
        fs::create_dir_all(root.join("Debugging"))?;
        fs::write(root.join("Program.cs"), "class Program {}")?;
        fs::write(root.join("script.py"), "print('hi')")?;
        fs::write(root.join("notes.txt"), "not source")?;
        fs::write(root.join("src/Main.java"), "class Main {}")?;
        fs::write(root.join("src/nested/index.HTML"), "<p></p>")?;
        fs::write(root.join("bin/Release/Gen.cs"), "// generated")?;
        fs::write(root.join("obj/Temp.cs"), "// temp")?;
        fs::write(root.join("debug/trace.py"), "# trace")?;
        fs::write(root.join("Debugging/kept.py"), "# kept")?;
        Ok(temp)
    }

    #[test]
    fn deep_scan_recurses_and_skips_build_output() -> Result<()> {
        let temp = fixture()?;
        let selector = FileSelector::new(temp.path(), &request("all", ScanDepth::Deep));
        let files: Vec<_> = selector.candidates().collect();

        assert_eq!(
            relative_paths(&files),
            vec![
                "Debugging/kept.py",
                "Program.cs",
                "script.py",
                "src/Main.java",
                "src/nested/index.HTML",
            ]
        );
        let html = files.last().unwrap();
        assert_eq!(html.extension, "html");
        assert_eq!(html.language, LanguageTag::Html);
        assert!(html.absolute_path.is_absolute());
        Ok(())
    }

    #[test]
    fn shallow_scan_stays_in_root() -> Result<()> {
        let temp = fixture()?;
        let selector = FileSelector::new(temp.path(), &request("all", ScanDepth::Shallow));
        let files: Vec<_> = selector.candidates().collect();
        assert_eq!(relative_paths(&files), vec!["Program.cs", "script.py"]);
        Ok(())
    }

    #[test]
    fn filters_by_language() -> Result<()> {
        let temp = fixture()?;
        let selector = FileSelector::new(temp.path(), &request("python,java", ScanDepth::Deep));
        let files: Vec<_> = selector.candidates().collect();
        assert_eq!(
            relative_paths(&files),
            vec!["Debugging/kept.py", "script.py", "src/Main.java"]
        );
        Ok(())
    }

    #[test]
    fn output_file_is_never_selected() -> Result<()> {
        let temp = tempfile::tempdir()?;
        fs::write(temp.path().join("a.py"), "a = 1")?;
        fs::write(temp.path().join("out.py"), "stale bundle")?;

        let req = request("python", ScanDepth::Deep);
        let files = select(temp.path(), &req, &temp.path().join("out.py"))?;
        assert_eq!(relative_paths(&files), vec!["a.py"]);
        Ok(())
    }

    #[test]
    fn output_file_is_skipped_through_dot_dot() -> Result<()> {
        let temp = tempfile::tempdir()?;
        fs::create_dir_all(temp.path().join("sub"))?;
        fs::write(temp.path().join("a.py"), "a = 1")?;
        fs::write(temp.path().join("out.py"), "previous bundle")?;

        let req = request("python", ScanDepth::Deep);
        let output = temp.path().join("sub/../out.py");
        let files = select(temp.path(), &req, &output)?;
        assert_eq!(relative_paths(&files), vec!["a.py"]);
        Ok(())
    }

    #[test]
    fn normalize_resolves_dot_components() {
        assert_eq!(normalize(Path::new("/w/sub/../out.py")), PathBuf::from("/w/out.py"));
        assert_eq!(normalize(Path::new("/w/./a/./b.cs")), PathBuf::from("/w/a/b.cs"));
        assert_eq!(normalize(Path::new("../x/../y")), PathBuf::from("../y"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_selected() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let shared = tempfile::tempdir()?;
        fs::write(shared.path().join("util.py"), "x = 1")?;
        std::os::unix::fs::symlink(shared.path().join("util.py"), temp.path().join("util.py"))?;
        std::os::unix::fs::symlink(shared.path(), temp.path().join("linked"))?;

        let req = request("python", ScanDepth::Deep);
        let files: Vec<_> = FileSelector::new(temp.path(), &req).candidates().collect();
        assert_eq!(relative_paths(&files), vec!["util.py"]);
        Ok(())
    }

    #[test]
    fn empty_selection_is_reported() -> Result<()> {
        let temp = tempfile::tempdir()?;
        fs::write(temp.path().join("readme.md"), "# hi")?;

        let req = request("all", ScanDepth::Deep);
        let err = select(temp.path(), &req, &temp.path().join("bundle.txt")).unwrap_err();
        assert!(matches!(err, BundleError::NoMatchingFiles { .. }));
        assert!(!err.is_validation());
        Ok(())
    }
}
