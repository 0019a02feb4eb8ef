use serde::Serialize;

use super::UploadResult;

/// JSON form of an [`UploadResult`], printed by `--json`.
#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadReport<'a> {
    Success {
        source: &'a str,
        backend: &'a str,
        url: &'a str,
    },
    Failure {
        source: &'a str,
        backend: &'a str,
        status_code: u16,
        body: &'a str,
    },
    TransportError {
        source: &'a str,
        backend: &'a str,
        cause: &'a str,
    },
    /// The item never reached a backend.
    Error { source: &'a str, error: String },
}

impl<'a> UploadReport<'a> {
    pub fn new(source: &'a str, backend: &'a str, result: &'a UploadResult) -> Self {
        match result {
            UploadResult::Success { url } => UploadReport::Success {
                source,
                backend,
                url,
            },
            UploadResult::Failure { status_code, body } => UploadReport::Failure {
                source,
                backend,
                status_code: *status_code,
                body,
            },
            UploadResult::TransportError { cause } => UploadReport::TransportError {
                source,
                backend,
                cause,
            },
        }
    }
}
