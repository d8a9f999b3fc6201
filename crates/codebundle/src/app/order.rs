//! Ordering of selected files.

use crate::domain::model::{CandidateFile, SortMode};

/// Sort `files` in place. The sort is stable, so equal keys keep enumeration order.
///
/// Names compare ordinally (byte-wise), which puts upper-case names first.
pub fn order(files: &mut [CandidateFile], mode: SortMode) {
    match mode {
        SortMode::ByName => files.sort_by(|a, b| a.file_name().cmp(b.file_name())),
        SortMode::ByType => files.sort_by(|a, b| a.extension.cmp(&b.extension)),
    }
}
