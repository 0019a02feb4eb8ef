//! `multipart/form-data` encoding for a single file field.
//!
//! The receiving servers expect exactly one part named `file`, so this is a
//! small fixed layout rather than a general form builder.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

use crate::types::UploadPayload;

/// Name of the form field carrying the payload.
pub const FIELD_NAME: &str = "file";

/// Delimiter token separating parts of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Boundary(String);

impl Boundary {
    /// A fresh random boundary backed by a v4 UUID.
    pub fn generate() -> Self {
        Boundary(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Boundary {
    fn from(value: &str) -> Self {
        Boundary(value.to_owned())
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value for the request's `Content-Type` header.
pub fn content_type(boundary: &Boundary) -> String {
    format!("multipart/form-data; boundary={boundary}")
}

/// Encode `payload` as a complete multipart body delimited by `boundary`.
pub fn encode(payload: &UploadPayload, boundary: &Boundary) -> Bytes {
    let file_name = escape_file_name(&payload.file_name);
    let head = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{FIELD_NAME}\"; filename=\"{file_name}\"\r\n\
         Content-Type: {mime_type}\r\n\
         \r\n",
        mime_type = payload.mime_type,
    );
    let tail = format!("\r\n--{boundary}--\r\n");

    let mut body = BytesMut::with_capacity(head.len() + payload.bytes.len() + tail.len());
    body.put(head.as_bytes());
    body.put(&payload.bytes[..]);
    body.put(tail.as_bytes());
    body.freeze()
}

// percent-encode the characters that would break out of the quoted header value
fn escape_file_name(file_name: &str) -> String {
    let mut escaped = String::with_capacity(file_name.len());
    for c in file_name.chars() {
        match c {
            '"' => escaped.push_str("%22"),
            '\r' => escaped.push_str("%0D"),
            '\n' => escaped.push_str("%0A"),
            c => escaped.push(c),
        }
    }
    escaped
}
