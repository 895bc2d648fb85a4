// Library root
// -----------
// The binary (`main.rs`) is a thin shell around these modules.
//
// Module responsibilities:
// - `paths`: turns submit arguments into absolute, cleaned paths.
// - `workspace`: finds the exercise directory owning a file.
// - `solution`: solution metadata records, current and legacy files.
// - `migrate`: rewrites legacy metadata into the current location.
// - `validate`: one solution per run, no directories, no empty files.
// - `package`: relative path -> content map handed to the uploader.
// - `submit`: wires the steps above into one run.
// - `api`: HTTP client that performs the upload.
// - `config`: token / workspace / API URL loading.
// - `ui`: spinner and summary output.
pub mod api;
pub mod config;
pub mod error;
pub mod migrate;
pub mod package;
pub mod paths;
pub mod solution;
pub mod submit;
pub mod ui;
pub mod validate;
pub mod workspace;

pub use error::SubmitError;
