// Error kinds for the submit pipeline. Every variant aborts the run before
// anything is uploaded, so the messages are written for the person at the
// terminal rather than for a log file.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(
        "Welcome! No API token is configured yet. Set `token` in {} or export EXSUBMIT_TOKEN, then try again.",
        .config.display()
    )]
    MissingToken { config: PathBuf },

    #[error(
        "No workspace is configured. Please re-run the configure step (set `workspace` in {} or export EXSUBMIT_WORKSPACE).",
        .config.display()
    )]
    MissingWorkspace { config: PathBuf },

    #[error("The file you are trying to submit cannot be found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error(
        "You are submitting a directory, which is not currently supported: {}. Pass the files inside it instead.",
        .path.display()
    )]
    IsDirectory { path: PathBuf },

    #[error(
        "{} is not inside your workspace ({}).",
        .path.display(),
        .workspace.display()
    )]
    OutsideWorkspace { path: PathBuf, workspace: PathBuf },

    #[error(
        "The exercise directory {} doesn't have the necessary metadata. Download the exercise again before submitting.",
        .dir.display()
    )]
    NoMetadata { dir: PathBuf },

    #[error("could not parse solution metadata at {}", .path.display())]
    InvalidMetadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "You are submitting files belonging to different solutions: {} and {}. Submit each exercise separately.",
        .first.display(),
        .second.display()
    )]
    MixedSolutions { first: PathBuf, second: PathBuf },

    #[error("The solution you are submitting is not connected to your account. View it at {url}")]
    NotRequester { url: String },

    #[error("No files found to submit. Empty files are skipped.")]
    EmptySubmission,

    #[error("{action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SubmitError {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        SubmitError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
