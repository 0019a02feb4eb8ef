use std::io::Write;

use tracing::error;

use crate::clipboard::{NoClipboard, SystemClipboard};
use crate::dispatch::{Dispatcher, Outcome};
use crate::payload::{DropItem, PayloadOptions};
use crate::types::api::UploadReport;
use crate::types::UploadResult;
use crate::upload::Uploader;
use crate::App;

/// Upload `items` one after another. Returns whether every upload succeeded.
pub async fn run(app: &App, items: Vec<DropItem>, json: bool) -> anyhow::Result<bool> {
    let uploader = Uploader::new(&app.config.upload.user_agent)?;
    let options = PayloadOptions {
        anonymize_file_names: app.config.upload.anonymize_file_names,
    };
    let dispatcher = if app.config.upload.copy_to_clipboard {
        Dispatcher::new(uploader, app.selection.clone(), SystemClipboard, options)
    } else {
        Dispatcher::new(uploader, app.selection.clone(), NoClipboard, options)
    };

    let mut all_ok = true;
    for item in items {
        let source = item.to_string();
        match dispatcher.handle(item).await {
            Ok(outcome) => {
                all_ok &= outcome.result.is_success();
                let mut stdout = std::io::stdout().lock();
                if json {
                    write_json(&mut stdout, &outcome)?;
                } else {
                    write_plain(&mut stdout, &outcome)?;
                }
            }
            Err(e) => {
                all_ok = false;
                let e = anyhow::Error::from(e);
                error!("{source}: {e:#}");
                if json {
                    write_json_error(&mut std::io::stdout().lock(), &source, &e)?;
                }
            }
        }
    }

    Ok(all_ok)
}

fn write_json(out: &mut impl Write, outcome: &Outcome) -> anyhow::Result<()> {
    let report = UploadReport::new(&outcome.source, &outcome.backend.name, &outcome.result);
    serde_json::to_writer(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

// keeps --json at one line per item even when the item never reached a backend
fn write_json_error(
    out: &mut impl Write,
    source: &str,
    error: &anyhow::Error,
) -> anyhow::Result<()> {
    let report = UploadReport::Error {
        source,
        error: format!("{error:#}"),
    };
    serde_json::to_writer(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

// only the url goes to stdout; failures are already logged
fn write_plain(out: &mut impl Write, outcome: &Outcome) -> anyhow::Result<()> {
    if let UploadResult::Success { url } = &outcome.result {
        writeln!(out, "{}", url.trim_end())?;
    }
    Ok(())
}
