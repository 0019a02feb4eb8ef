//! Where successful upload URLs end up.

#[cfg(target_os = "linux")]
use std::io::Write;
#[cfg(target_os = "linux")]
use std::process::{Command, Stdio};
#[cfg(test)]
use std::sync::{Arc, Mutex, PoisonError};

#[cfg(target_os = "linux")]
use tracing::warn;

#[cfg(target_os = "linux")]
use crate::AppError;

/// Receives the URL text of a successful upload.
///
/// Implementations replace whatever the sink held before; they never append.
pub trait ClipboardSink: Send {
    fn set_text(&mut self, text: &str) -> crate::AppResult<()>;
}

/// The system clipboard.
///
/// On Linux the selection is owned by whoever set it and disappears when
/// that process exits, so the text is handed to `wl-copy` or `xclip`,
/// which stay behind to serve it. Elsewhere a fresh `arboard` handle is
/// opened per write.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> crate::AppResult<()> {
        #[cfg(target_os = "linux")]
        {
            let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
            match HandoffCommand::for_session(wayland).run(text) {
                Ok(()) => return Ok(()),
                Err(e) => warn!("{e}; falling back to arboard, the url may not outlive pasteup"),
            }
        }

        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_owned())?;
        Ok(())
    }
}

/// A clipboard helper that takes the text on stdin and keeps serving it
/// after we exit.
#[cfg(target_os = "linux")]
#[derive(Debug, Clone, PartialEq, Eq)]
struct HandoffCommand {
    program: String,
    args: Vec<String>,
}

#[cfg(target_os = "linux")]
impl HandoffCommand {
    fn for_session(wayland: bool) -> Self {
        let (program, args): (&str, &[&str]) = if wayland {
            ("wl-copy", &[])
        } else {
            ("xclip", &["-selection", "clipboard"])
        };
        HandoffCommand {
            program: program.to_owned(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    fn run(&self, text: &str) -> crate::AppResult<()> {
        let helper_error = |source| AppError::ClipboardHelper {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(helper_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).map_err(helper_error)?;
            // dropping stdin closes the pipe so the helper can detach
        }

        let status = child.wait().map_err(helper_error)?;
        if status.success() {
            Ok(())
        } else {
            Err(AppError::ClipboardHelperStatus {
                program: self.program.clone(),
                status,
            })
        }
    }
}

/// A sink that drops everything, for `copy_to_clipboard = false`.
#[derive(Debug, Default)]
pub struct NoClipboard;

impl ClipboardSink for NoClipboard {
    fn set_text(&mut self, _text: &str) -> crate::AppResult<()> {
        Ok(())
    }
}

/// In-memory sink that records every write. Clones share the same record.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    writes: Arc<Mutex<Vec<String>>>,
}

#[cfg(test)]
impl MemoryClipboard {
    /// Current contents, i.e. the most recent write.
    pub fn contents(&self) -> Option<String> {
        self.writes().last().cloned()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> crate::AppResult<()> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_owned());
        Ok(())
    }
}
