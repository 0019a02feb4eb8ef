use bytes::Bytes;

pub mod api;

/// A single file or snippet ready to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    pub bytes: Bytes,
    pub file_name: String,
    pub mime_type: String,
}

/// Outcome of one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    Success { url: String },
    Failure { status_code: u16, body: String },
    TransportError { cause: String },
}

impl UploadResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadResult::Success { .. })
    }
}
