// Path normalization for submit arguments.
//
// Arguments may be relative to the directory the command was started in.
// They are joined onto that directory and cleaned lexically, so `./a/../b`
// and `b` name the same file. Symlinks are not resolved here; the existence
// check follows them like any other stat.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::SubmitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
}

/// A submit argument after it was made absolute and checked on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Lexically cleaned spelling, as the user would recognise it.
    pub path: PathBuf,
    /// Symlink-free location, used for workspace containment.
    pub canonical: PathBuf,
    pub kind: PathKind,
}

impl ResolvedPath {
    pub fn is_dir(&self) -> bool {
        self.kind == PathKind::Directory
    }
}

/// Resolve `arg` against `cwd` and classify what exists there.
pub fn normalize(arg: &str, cwd: &Path) -> Result<ResolvedPath, SubmitError> {
    let path = absolute(Path::new(arg), cwd);
    let metadata = match std::fs::metadata(&path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SubmitError::NotFound { path });
        }
        Err(e) => return Err(SubmitError::io("failed to inspect", path, e)),
    };
    let kind = if metadata.is_dir() {
        PathKind::Directory
    } else {
        PathKind::File
    };
    let canonical = std::fs::canonicalize(&path)
        .map_err(|e| SubmitError::io("failed to resolve", &path, e))?;
    Ok(ResolvedPath {
        path,
        canonical,
        kind,
    })
}

/// Resolve symlinks when `path` (or at least its parent) exists; otherwise
/// fall back to the lexically cleaned path.
pub fn canonical(path: &Path) -> PathBuf {
    let cleaned = clean(path);
    if let Ok(resolved) = std::fs::canonicalize(&cleaned) {
        return resolved;
    }
    let via_parent = cleaned
        .parent()
        .zip(cleaned.file_name())
        .and_then(|(parent, name)| std::fs::canonicalize(parent).ok().map(|p| p.join(name)));
    via_parent.unwrap_or(cleaned)
}

/// Join `path` onto `base` when relative and clean the result.
pub fn absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        clean(path)
    } else {
        clean(&base.join(path))
    }
}

/// Lexical cleanup: drops `.` components and folds `..` into its parent.
/// A `..` directly under the root stays at the root.
pub fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Render a relative path with `/` separators regardless of the host.
pub fn to_slash(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
