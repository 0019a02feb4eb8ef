//! Handling of a single drop event, from raw item to clipboard.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::backend::Backend;
use crate::clipboard::ClipboardSink;
use crate::payload::{DropItem, PayloadOptions};
use crate::prefs::BackendSelection;
use crate::types::UploadResult;
use crate::upload::Uploader;
use crate::AppError;

/// What happened to one drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub source: String,
    pub backend: Backend,
    pub result: UploadResult,
}

/// Turns drop events into uploads, one at a time.
///
/// A drop arriving while another upload is in flight is rejected with
/// [`AppError::Busy`] rather than queued.
pub struct Dispatcher {
    uploader: Uploader,
    selection: Arc<BackendSelection>,
    sink: Mutex<Box<dyn ClipboardSink>>,
    options: PayloadOptions,
    slot: Semaphore,
}

impl Dispatcher {
    pub fn new(
        uploader: Uploader,
        selection: Arc<BackendSelection>,
        sink: impl ClipboardSink + 'static,
        options: PayloadOptions,
    ) -> Self {
        Dispatcher {
            uploader,
            selection,
            sink: Mutex::new(Box::new(sink)),
            options,
            slot: Semaphore::new(1),
        }
    }

    pub async fn handle(&self, item: DropItem) -> crate::AppResult<Outcome> {
        let _permit = self.slot.try_acquire().map_err(|_| AppError::Busy)?;

        let source = item.to_string();
        let payload = item.into_payload(self.options).await?;
        let backend = self.selection.current();

        let result = self.uploader.upload(&payload, &backend).await;
        self.report(&source, &result);

        Ok(Outcome {
            source,
            backend,
            result,
        })
    }

    // only called once the response is complete, so the sink never sees a partial result
    fn report(&self, source: &str, result: &UploadResult) {
        match result {
            UploadResult::Success { url } => {
                info!("uploaded {source}: {}", url.trim_end());
                let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
                match sink.set_text(url) {
                    Ok(()) => info!("copied to clipboard"),
                    Err(e) => error!("failed to copy url to clipboard: {e}"),
                }
            }
            UploadResult::Failure { status_code, body } => {
                warn!(
                    "upload of {source} failed with status {status_code}: {}",
                    body.trim_end()
                );
            }
            UploadResult::TransportError { cause } => {
                error!("upload of {source} failed: {cause}");
            }
        }
    }
}
