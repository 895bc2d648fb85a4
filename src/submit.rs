// The submit pipeline: arguments in, one validated package out, then upload.
//
//   ensure configured -> normalize -> reject directories -> locate
//     -> build batch -> migrate -> package -> upload
//
// Every check runs before metadata is migrated or anything is uploaded, so a
// failed run leaves the workspace exactly as it found it.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::api::{ApiClient, SubmitResponse};
use crate::config::Config;
use crate::error::SubmitError;
use crate::migrate::Migrator;
use crate::package::{self, Package};
use crate::paths;
use crate::validate::{self, LocatedFile};
use crate::workspace::Workspace;

/// Receives a finished package. Implemented by the HTTP client; tests use
/// recording fakes.
pub trait Uploader {
    fn upload(&self, package: &Package) -> Result<SubmitResponse>;
}

impl Uploader for ApiClient {
    fn upload(&self, package: &Package) -> Result<SubmitResponse> {
        self.submit(package)
    }
}

/// Resolve `args` (relative ones against `cwd`) into a package.
///
/// Legacy metadata of the submitted exercise is migrated as a side effect,
/// but only once all checks passed.
pub fn prepare(config: &Config, args: &[String], cwd: &Path) -> Result<Package, SubmitError> {
    let configured = config.ensure_configured()?;
    let workspace = Workspace::new(paths::absolute(configured.workspace, cwd));

    let resolved = args
        .iter()
        .map(|arg| paths::normalize(arg, cwd))
        .collect::<Result<Vec<_>, _>>()?;
    validate::reject_directories(&resolved)?;

    let located = resolved
        .into_iter()
        .map(|r| -> Result<LocatedFile, SubmitError> {
            let located = workspace.locate(&r.canonical)?;
            Ok(LocatedFile {
                path: r.canonical,
                located,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let batch = validate::build_batch(located)?;
    debug!(
        workspace = %workspace.root().display(),
        exercise = %batch.exercise.dir.display(),
        team = batch.exercise.team.as_deref().unwrap_or("-"),
        files = batch.files.len(),
        "validated submission"
    );

    let solution = Migrator::new().ensure_current(&batch.exercise)?;
    Ok(package::package(batch, solution))
}

/// Prepare and hand the package to `uploader`. Nothing is uploaded when
/// preparation fails.
pub fn run<U: Uploader>(
    config: &Config,
    args: &[String],
    cwd: &Path,
    uploader: &U,
) -> Result<(Package, SubmitResponse)> {
    let package = prepare(config, args, cwd)?;
    let response = uploader.upload(&package)?;
    info!(id = %package.solution.id, files = package.len(), "solution submitted");
    Ok((package, response))
}
