// Maps a file inside the workspace to the exercise directory that owns it.
//
// Exercises usually live at `<root>/<track>/<exercise>`, and team exercises
// at `<root>/teams/<team>/<track>/<exercise>`. Rather than trusting that
// layout, the owner is the closest directory above the file that carries
// solution metadata, searched no higher than the workspace (or team) root.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::SubmitError;
use crate::paths;
use crate::solution::{self, MetadataFormat, Solution};

/// First path segment under the workspace root that introduces a team.
pub const TEAMS_DIR: &str = "teams";

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

/// An exercise directory found inside a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Exercise {
    pub dir: PathBuf,
    pub team: Option<String>,
}

impl Exercise {
    pub fn metadata_path(&self) -> PathBuf {
        solution::current_path(&self.dir)
    }

    pub fn legacy_metadata_path(&self) -> PathBuf {
        solution::legacy_path(&self.dir)
    }

    /// `file` relative to this exercise, `/`-separated.
    pub fn relative_path(&self, file: &Path) -> Option<String> {
        file.strip_prefix(&self.dir).ok().map(paths::to_slash)
    }
}

/// Result of locating one file.
#[derive(Debug, Clone)]
pub struct Located {
    pub exercise: Exercise,
    pub solution: Solution,
    pub format: MetadataFormat,
}

impl Workspace {
    /// The root is canonicalized when it exists so that a workspace
    /// configured through a symlink still contains the files below it.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Workspace {
            root: paths::canonical(root.as_ref()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the exercise owning `file` (an absolute path) and read its
    /// solution metadata. Nothing on disk is modified.
    pub fn locate(&self, file: &Path) -> Result<Located, SubmitError> {
        let file = &paths::canonical(file);
        let relative = file
            .strip_prefix(&self.root)
            .map_err(|_| SubmitError::OutsideWorkspace {
                path: file.to_path_buf(),
                workspace: self.root.clone(),
            })?;

        let mut segments: Vec<&OsStr> = relative
            .parent()
            .map(|p| {
                p.components()
                    .filter_map(|c| match c {
                        Component::Normal(s) => Some(s),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mut base = self.root.clone();
        let mut team = None;
        if segments.len() >= 2 && segments[0] == TEAMS_DIR {
            base = base.join(TEAMS_DIR).join(segments[1]);
            team = Some(segments[1].to_string_lossy().into_owned());
            segments = segments.split_off(2);
        }

        // Walk from the file's directory up to and including `base`.
        for depth in (0..=segments.len()).rev() {
            let mut dir = base.clone();
            dir.extend(&segments[..depth]);
            if !solution::has_metadata(&dir) {
                continue;
            }
            let Some((solution, format)) = solution::read(&dir)? else {
                continue;
            };
            debug!(dir = %dir.display(), id = %solution.id, ?format, "found solution metadata");
            return Ok(Located {
                exercise: Exercise { dir, team },
                solution,
                format,
            });
        }

        Err(SubmitError::NoMetadata {
            dir: file.parent().unwrap_or(file).to_path_buf(),
        })
    }
}
