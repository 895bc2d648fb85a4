// Turns a validated batch into what the upload transport consumes.

use indexmap::IndexMap;

use crate::solution::Solution;
use crate::validate::SubmissionBatch;

/// Files keyed by their exercise-relative path, in argument order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub solution: Solution,
    pub files: IndexMap<String, Vec<u8>>,
}

impl Package {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Contents are passed through untouched; `solution` is the record returned
/// by migration, which may be fresher than the one the batch was built from.
pub fn package(batch: SubmissionBatch, solution: Solution) -> Package {
    let files = batch
        .files
        .into_iter()
        .map(|file| (file.relative, file.content))
        .collect();
    Package { solution, files }
}
