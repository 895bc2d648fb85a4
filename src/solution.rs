// Solution metadata stored inside an exercise directory.
//
// Two on-disk encodings exist. The current one lives at
// `.exercise/metadata.json`; the legacy one is a `.solution.json` file in the
// exercise directory itself. Both hold the same JSON object. Legacy files are
// only ever read, then rewritten in the current location by `migrate`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SubmitError;

pub const METADATA_DIR: &str = ".exercise";
pub const METADATA_FILE: &str = "metadata.json";
pub const LEGACY_METADATA_FILE: &str = ".solution.json";

/// Identity of one exercise attempt on the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub id: String,
    pub track: String,
    pub exercise: String,
    pub url: String,
    /// False for solutions shared with the user (for example a mentee's
    /// solution), which are read-only locally.
    pub is_requester: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(default)]
    pub auto_approve: bool,
}

impl Solution {
    /// Two records describe the same attempt when id, track and exercise agree.
    pub fn same_attempt(&self, other: &Solution) -> bool {
        self.id == other.id && self.track == other.track && self.exercise == other.exercise
    }

    /// Write the record in the current format under `dir`.
    ///
    /// The JSON goes to a sibling temp file first and is renamed into place,
    /// so readers never observe a half-written metadata file.
    pub fn write(&self, dir: &Path) -> Result<PathBuf, SubmitError> {
        let meta_dir = dir.join(METADATA_DIR);
        fs::create_dir_all(&meta_dir)
            .map_err(|e| SubmitError::io("failed to create", &meta_dir, e))?;

        let path = meta_dir.join(METADATA_FILE);
        let tmp = meta_dir.join(format!("{METADATA_FILE}.tmp"));
        let contents = serde_json::to_vec_pretty(self).map_err(|e| SubmitError::InvalidMetadata {
            path: path.clone(),
            source: e,
        })?;
        fs::write(&tmp, contents).map_err(|e| SubmitError::io("failed to write", &tmp, e))?;
        fs::rename(&tmp, &path)
            .map_err(|e| SubmitError::io("failed to move into place", &path, e))?;
        Ok(path)
    }
}

/// Which encoding a record was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataFormat {
    Current,
    Legacy,
}

pub fn current_path(dir: &Path) -> PathBuf {
    dir.join(METADATA_DIR).join(METADATA_FILE)
}

pub fn legacy_path(dir: &Path) -> PathBuf {
    dir.join(LEGACY_METADATA_FILE)
}

/// True if `dir` carries metadata in either format.
pub fn has_metadata(dir: &Path) -> bool {
    current_path(dir).is_file() || legacy_path(dir).is_file()
}

/// Read whichever record `dir` holds, preferring the current format.
///
/// A legacy file left next to a current one is ignored.
pub fn read(dir: &Path) -> Result<Option<(Solution, MetadataFormat)>, SubmitError> {
    if let Some(solution) = read_file(&current_path(dir))? {
        return Ok(Some((solution, MetadataFormat::Current)));
    }
    Ok(read_file(&legacy_path(dir))?.map(|s| (s, MetadataFormat::Legacy)))
}

fn read_file(path: &Path) -> Result<Option<Solution>, SubmitError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SubmitError::io("failed to read", path, e)),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| SubmitError::InvalidMetadata {
            path: path.to_path_buf(),
            source: e,
        })
}

#[cfg(test)]
pub(crate) fn sample(id: &str, track: &str, exercise: &str) -> Solution {
    Solution {
        id: id.to_string(),
        track: track.to_string(),
        exercise: exercise.to_string(),
        url: format!("http://example.com/solutions/{id}"),
        is_requester: true,
        handle: None,
        auto_approve: false,
    }
}
