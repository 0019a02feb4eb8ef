use std::path::PathBuf;

use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    #[error("could not read payload from {}", .path.display())]
    Encoding {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unsupported payload type: {0}")]
    UnsupportedPayload(String),
    #[error("unknown backend: {0}")]
    UnknownBackend(String),
    #[error("duplicate backend name: {0}")]
    DuplicateBackend(String),
    #[error("no backends configured")]
    NoBackends,
    #[error("an upload is already in progress")]
    Busy,
    #[error("clipboard error: {source}")]
    Clipboard {
        #[from]
        source: arboard::Error,
    },
    #[error("could not run clipboard helper {program}")]
    ClipboardHelper {
        program: String,
        source: std::io::Error,
    },
    #[error("clipboard helper {program} exited with {status}")]
    ClipboardHelperStatus {
        program: String,
        status: std::process::ExitStatus,
    },
    #[error("could not access preferences at {}", .path.display())]
    Preferences {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    #[error("http client error")]
    Http {
        #[from]
        source: reqwest::Error,
    },
}

impl AppError {
    pub(crate) fn preferences(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Preferences {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
