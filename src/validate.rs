// Checks that a set of resolved arguments forms one submittable batch.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::SubmitError;
use crate::paths::ResolvedPath;
use crate::solution::Solution;
use crate::workspace::{Exercise, Located};

/// A file argument together with the exercise it was located in.
#[derive(Debug, Clone)]
pub struct LocatedFile {
    pub path: PathBuf,
    pub located: Located,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFile {
    pub path: PathBuf,
    /// Path below the exercise directory, `/`-separated.
    pub relative: String,
    pub content: Vec<u8>,
}

/// Non-empty set of files that all belong to one solution.
#[derive(Debug, Clone)]
pub struct SubmissionBatch {
    pub exercise: Exercise,
    pub solution: Solution,
    pub files: Vec<SubmissionFile>,
}

/// Directories are never accepted as arguments, even inside an exercise.
pub fn reject_directories(paths: &[ResolvedPath]) -> Result<(), SubmitError> {
    match paths.iter().find(|p| p.is_dir()) {
        Some(dir) => Err(SubmitError::IsDirectory {
            path: dir.path.clone(),
        }),
        None => Ok(()),
    }
}

/// Build the batch: one solution, empty files dropped, at least one file left.
pub fn build_batch(files: Vec<LocatedFile>) -> Result<SubmissionBatch, SubmitError> {
    // The first file's exercise is the reference every other file must match.
    let Some(head) = files.first() else {
        return Err(SubmitError::EmptySubmission);
    };
    let first_path = head.path.clone();
    let reference = head.located.clone();
    for file in &files[1..] {
        if reference.exercise.dir != file.located.exercise.dir
            || !reference.solution.same_attempt(&file.located.solution)
        {
            return Err(SubmitError::MixedSolutions {
                first: first_path,
                second: file.path.clone(),
            });
        }
    }

    if !reference.solution.is_requester {
        return Err(SubmitError::NotRequester {
            url: reference.solution.url.clone(),
        });
    }

    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(files.len());
    for file in files {
        let content =
            fs::read(&file.path).map_err(|e| SubmitError::io("failed to read", &file.path, e))?;
        if content.is_empty() {
            debug!(path = %file.path.display(), "skipping empty file");
            continue;
        }
        let Some(relative) = reference.exercise.relative_path(&file.path) else {
            return Err(SubmitError::MixedSolutions {
                first: reference.exercise.dir.clone(),
                second: file.path,
            });
        };
        if !seen.insert(relative.clone()) {
            debug!(%relative, "skipping duplicate argument");
            continue;
        }
        kept.push(SubmissionFile {
            path: file.path,
            relative,
            content,
        });
    }

    if kept.is_empty() {
        return Err(SubmitError::EmptySubmission);
    }

    Ok(SubmissionBatch {
        exercise: reference.exercise,
        solution: reference.solution,
        files: kept,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::PathKind;
    use crate::solution::{sample, MetadataFormat};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn located(dir: &Path, solution: Solution) -> Located {
        Located {
            exercise: Exercise {
                dir: dir.to_path_buf(),
                team: None,
            },
            solution,
            format: MetadataFormat::Current,
        }
    }

    fn file(dir: &Path, name: &str, body: &str, solution: &Solution) -> LocatedFile {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, body).unwrap();
        LocatedFile {
            path,
            located: located(dir, solution.clone()),
        }
    }

    #[test]
    fn directories_are_rejected() {
        let paths = vec![
            ResolvedPath {
                path: "/w/a.txt".into(),
                canonical: "/w/a.txt".into(),
                kind: PathKind::File,
            },
            ResolvedPath {
                path: "/w".into(),
                canonical: "/w".into(),
                kind: PathKind::Directory,
            },
        ];
        match reject_directories(&paths).unwrap_err() {
            SubmitError::IsDirectory { path } => assert_eq!(path, PathBuf::from("/w")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_files_are_dropped_silently() {
        let tmp = tempfile::tempdir().unwrap();
        let s = sample("S1", "t", "e");
        let batch = build_batch(vec![
            file(tmp.path(), "file-1.txt", "", &s),
            file(tmp.path(), "file-2.txt", "This is file 2.", &s),
        ])
        .unwrap();

        assert_eq!(batch.files.len(), 1);
        assert_eq!(batch.files[0].relative, "file-2.txt");
    }

    #[test]
    fn only_empty_files_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let s = sample("S1", "t", "e");
        let err = build_batch(vec![file(tmp.path(), "file.txt", "", &s)]).unwrap_err();
        assert!(matches!(err, SubmitError::EmptySubmission));
    }

    #[test]
    fn mixed_solutions_in_either_order() {
        let tmp = tempfile::tempdir().unwrap();
        let a_dir = tmp.path().join("a");
        let b_dir = tmp.path().join("b");
        let a = file(&a_dir, "x.txt", "x", &sample("S1", "t", "a"));
        let b = file(&b_dir, "y.txt", "y", &sample("S1", "t", "b"));

        for files in [vec![a.clone(), b.clone()], vec![b, a]] {
            let err = build_batch(files).unwrap_err();
            assert!(matches!(err, SubmitError::MixedSolutions { .. }), "{err}");
        }
    }

    #[test]
    fn same_metadata_in_two_directories_is_still_mixed() {
        let tmp = tempfile::tempdir().unwrap();
        let s = sample("S1", "t", "e");
        let err = build_batch(vec![
            file(&tmp.path().join("one"), "x.txt", "x", &s),
            file(&tmp.path().join("two"), "y.txt", "y", &s),
        ])
        .unwrap_err();
        assert!(matches!(err, SubmitError::MixedSolutions { .. }));
    }

    #[test]
    fn duplicates_collapse_to_one_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let s = sample("S1", "t", "e");
        let a = file(tmp.path(), "sub/a.txt", "hi", &s);
        let batch = build_batch(vec![a.clone(), a]).unwrap();
        assert_eq!(batch.files.len(), 1);
        assert_eq!(batch.files[0].relative, "sub/a.txt");
    }

    #[test]
    fn shared_solutions_cannot_be_submitted() {
        let tmp = tempfile::tempdir().unwrap();
        let mut s = sample("S1", "t", "e");
        s.is_requester = false;
        let err = build_batch(vec![file(tmp.path(), "a.txt", "a", &s)]).unwrap_err();
        assert!(matches!(err, SubmitError::NotRequester { .. }));
    }
}
