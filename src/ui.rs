// Terminal output around an upload: a spinner while the request is in
// flight and a short summary afterwards.

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::SubmitResponse;
use crate::package::Package;
use crate::submit::Uploader;

/// Wraps another uploader and shows a spinner while it runs.
pub struct WithSpinner<'a, U> {
    inner: &'a U,
}

impl<'a, U: Uploader> WithSpinner<'a, U> {
    pub fn new(inner: &'a U) -> Self {
        WithSpinner { inner }
    }
}

impl<U: Uploader> Uploader for WithSpinner<'_, U> {
    fn upload(&self, package: &Package) -> Result<SubmitResponse> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        spinner.set_message(format!("Submitting {} file(s)...", package.len()));
        spinner.enable_steady_tick(Duration::from_millis(100));
        let result = self.inner.upload(package);
        spinner.finish_and_clear();
        result
    }
}

/// Success message printed after an upload.
pub fn summary(package: &Package, response: &SubmitResponse) -> String {
    let url = response.url.as_deref().unwrap_or(&package.solution.url);
    format!(
        "Your solution for {} ({}) has been submitted successfully.\nView it at:\n\n    {}\n",
        package.solution.exercise, package.solution.track, url
    )
}
