use std::error::Error as _;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::backend::Backend;
use crate::multipart::{self, Boundary};
use crate::types::{UploadPayload, UploadResult};

/// Stand-in for a success body that is not valid UTF-8.
pub const UNPRINTABLE_BODY: &str = "Data could not be printed";

/// Posts payloads to a backend as `multipart/form-data`.
#[derive(Debug, Clone)]
pub struct Uploader {
    client: Client,
}

impl Uploader {
    pub fn new(user_agent: &str) -> crate::AppResult<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Uploader { client })
    }

    /// Upload `payload` to `backend`.
    ///
    /// Runs to completion: there is no retry, no cancellation and no timeout
    /// beyond the HTTP client's own.
    pub async fn upload(&self, payload: &UploadPayload, backend: &Backend) -> UploadResult {
        let boundary = Boundary::generate();
        let body = multipart::encode(payload, &boundary);

        info!(
            "uploading: file='{file_name}', content_type='{mime_type}', size={size}, \
             backend='{name}' ({endpoint})",
            file_name = payload.file_name,
            mime_type = payload.mime_type,
            size = payload.bytes.len(),
            name = backend.name,
            endpoint = backend.endpoint,
        );

        let response = match self
            .client
            .post(backend.endpoint.clone())
            .header(CONTENT_TYPE, multipart::content_type(&boundary))
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return transport_error(&e),
        };

        let status = response.status();
        let data = match response.bytes().await {
            Ok(data) => data,
            Err(e) => return transport_error(&e),
        };
        debug!("response: status={status}, size={}", data.len());

        if status == StatusCode::OK {
            let url =
                String::from_utf8(data.to_vec()).unwrap_or_else(|_| UNPRINTABLE_BODY.to_owned());
            UploadResult::Success { url }
        } else {
            UploadResult::Failure {
                status_code: status.as_u16(),
                body: String::from_utf8_lossy(&data).into_owned(),
            }
        }
    }
}

fn transport_error(error: &reqwest::Error) -> UploadResult {
    let mut cause = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        cause.push_str(": ");
        cause.push_str(&inner.to_string());
        source = inner.source();
    }
    UploadResult::TransportError { cause }
}
