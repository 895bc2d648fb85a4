#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use exsubmit_cli::api::SubmitResponse;
use exsubmit_cli::config::Config;
use exsubmit_cli::package::Package;
use exsubmit_cli::solution::{self, Solution};
use exsubmit_cli::submit::Uploader;
use tempfile::TempDir;

/// Remembers every package it was given instead of talking to a server.
#[derive(Default)]
pub struct RecordingUploader {
    pub packages: RefCell<Vec<Package>>,
}

impl Uploader for RecordingUploader {
    fn upload(&self, package: &Package) -> Result<SubmitResponse> {
        self.packages.borrow_mut().push(package.clone());
        Ok(SubmitResponse::default())
    }
}

impl RecordingUploader {
    pub fn calls(&self) -> usize {
        self.packages.borrow().len()
    }
}

pub fn workspace(prefix: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("tempdir")
}

pub fn config_for(workspace: &Path) -> Config {
    Config {
        token: Some("abc123".into()),
        workspace: Some(workspace.to_path_buf()),
        ..Config::default()
    }
}

pub fn fake_solution(id: &str, track: &str, exercise: &str) -> Solution {
    Solution {
        id: id.to_string(),
        track: track.to_string(),
        exercise: exercise.to_string(),
        url: "http://example.com/bogus-url".to_string(),
        is_requester: true,
        handle: None,
        auto_approve: false,
    }
}

/// Create `<root>/<segments...>` with current-format metadata.
pub fn exercise_dir(root: &Path, segments: &[&str], solution: &Solution) -> PathBuf {
    let dir = segments.iter().fold(root.to_path_buf(), |d, s| d.join(s));
    fs::create_dir_all(&dir).expect("create exercise dir");
    solution.write(&dir).expect("write metadata");
    dir
}

/// Like `exercise_dir` but only writes the legacy `.solution.json`.
pub fn legacy_exercise_dir(root: &Path, segments: &[&str], solution: &Solution) -> PathBuf {
    let dir = segments.iter().fold(root.to_path_buf(), |d, s| d.join(s));
    fs::create_dir_all(&dir).expect("create exercise dir");
    fs::write(
        solution::legacy_path(&dir),
        serde_json::to_vec(solution).expect("serialize"),
    )
    .expect("write legacy metadata");
    dir
}

pub fn write(path: &Path, contents: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, contents).expect("write file");
    path.to_path_buf()
}

pub fn arg(path: &Path) -> String {
    path.to_str().expect("utf-8 path").to_string()
}

pub fn text(package: &Package, key: &str) -> String {
    String::from_utf8(package.files[key].clone()).expect("utf-8 content")
}
