// Rewrites legacy `.solution.json` files into the current metadata location.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::SubmitError;
use crate::solution::{self, MetadataFormat, Solution};
use crate::workspace::Exercise;

/// Per-run migration state. Each exercise directory is handled at most once.
#[derive(Debug, Default)]
pub struct Migrator {
    done: HashMap<PathBuf, Solution>,
}

impl Migrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `exercise` has current-format metadata and return it.
    ///
    /// The new file is fully written before the legacy one is removed, so a
    /// failure part way leaves at least one readable record behind. If only
    /// the removal fails, the next run sees the current file and ignores the
    /// leftover.
    pub fn ensure_current(&mut self, exercise: &Exercise) -> Result<Solution, SubmitError> {
        if let Some(solution) = self.done.get(&exercise.dir) {
            return Ok(solution.clone());
        }

        let solution = match solution::read(&exercise.dir)? {
            Some((solution, MetadataFormat::Current)) => solution,
            Some((solution, MetadataFormat::Legacy)) => {
                let written = solution.write(&exercise.dir)?;
                let legacy = exercise.legacy_metadata_path();
                match fs::remove_file(&legacy) {
                    Ok(()) => info!(
                        from = %legacy.display(),
                        to = %written.display(),
                        "migrated legacy solution metadata"
                    ),
                    Err(e) => warn!(
                        path = %legacy.display(),
                        error = %e,
                        "wrote current metadata but could not remove the legacy file"
                    ),
                }
                solution
            }
            None => {
                return Err(SubmitError::NoMetadata {
                    dir: exercise.dir.clone(),
                })
            }
        };

        self.done.insert(exercise.dir.clone(), solution.clone());
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::sample;
    use pretty_assertions::assert_eq;

    fn exercise(dir: &std::path::Path) -> Exercise {
        Exercise {
            dir: dir.to_path_buf(),
            team: None,
        }
    }

    #[test]
    fn legacy_only_is_migrated() {
        let tmp = tempfile::tempdir().unwrap();
        let ex = exercise(tmp.path());
        let mut legacy = sample("S2", "go", "bob");
        legacy.handle = Some("alice".into());
        fs::write(ex.legacy_metadata_path(), serde_json::to_vec(&legacy).unwrap()).unwrap();

        let solution = Migrator::new().ensure_current(&ex).unwrap();
        assert_eq!(solution, legacy);
        assert!(!ex.legacy_metadata_path().exists());

        let on_disk: Solution =
            serde_json::from_slice(&fs::read(ex.metadata_path()).unwrap()).unwrap();
        assert_eq!(on_disk, legacy);
    }

    #[test]
    fn second_run_is_a_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let ex = exercise(tmp.path());
        fs::write(
            ex.legacy_metadata_path(),
            serde_json::to_vec(&sample("S2", "go", "bob")).unwrap(),
        )
        .unwrap();

        Migrator::new().ensure_current(&ex).unwrap();
        let before = fs::read(ex.metadata_path()).unwrap();
        let again = Migrator::new().ensure_current(&ex).unwrap();
        assert_eq!(again.id, "S2");
        assert_eq!(fs::read(ex.metadata_path()).unwrap(), before);
    }

    #[test]
    fn leftover_legacy_after_partial_migration_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let ex = exercise(tmp.path());
        sample("S3", "go", "bob").write(&ex.dir).unwrap();
        fs::write(
            ex.legacy_metadata_path(),
            serde_json::to_vec(&sample("OLD", "go", "bob")).unwrap(),
        )
        .unwrap();

        let solution = Migrator::new().ensure_current(&ex).unwrap();
        assert_eq!(solution.id, "S3");
        assert!(ex.legacy_metadata_path().exists());
    }

    #[test]
    fn memoized_per_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let ex = exercise(tmp.path());
        sample("S4", "go", "bob").write(&ex.dir).unwrap();

        let mut migrator = Migrator::new();
        migrator.ensure_current(&ex).unwrap();
        fs::remove_file(ex.metadata_path()).unwrap();
        assert_eq!(migrator.ensure_current(&ex).unwrap().id, "S4");
    }

    #[test]
    fn nothing_to_migrate() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Migrator::new().ensure_current(&exercise(tmp.path())).unwrap_err();
        assert!(matches!(err, SubmitError::NoMetadata { .. }));
    }
}
