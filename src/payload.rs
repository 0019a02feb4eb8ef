use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs;

use crate::mime;
use crate::types::UploadPayload;
use crate::AppError;

/// File name used for text snippets.
pub const TEXT_FILE_NAME: &str = "file.txt";
/// Content type used for text snippets.
pub const TEXT_MIME_TYPE: &str = "text/plain";

/// The raw contents of one drop event, before anything has been read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropItem {
    File(PathBuf),
    Text(String),
    /// Anything else the drop surface handed over, named by its kind.
    Unsupported(String),
}

/// How file names are presented to the backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadOptions {
    /// Send `file.<ext>` instead of the real file name.
    pub anonymize_file_names: bool,
}

impl DropItem {
    /// Classify a dropped path. Directories are not uploadable.
    pub fn from_path(path: PathBuf) -> Self {
        if path.is_dir() {
            DropItem::Unsupported(format!("directory {}", path.display()))
        } else {
            DropItem::File(path)
        }
    }

    /// Read the item into an upload payload.
    pub async fn into_payload(self, options: PayloadOptions) -> crate::AppResult<UploadPayload> {
        match self {
            DropItem::File(path) => {
                let data = fs::read(&path).await.map_err(|source| AppError::Encoding {
                    path: path.clone(),
                    source,
                })?;

                Ok(UploadPayload {
                    bytes: Bytes::from(data),
                    file_name: file_name(&path, options),
                    mime_type: mime::resolve_path(&path),
                })
            }
            DropItem::Text(text) => Ok(UploadPayload {
                bytes: Bytes::from(text),
                file_name: TEXT_FILE_NAME.to_owned(),
                mime_type: TEXT_MIME_TYPE.to_owned(),
            }),
            DropItem::Unsupported(kind) => Err(AppError::UnsupportedPayload(kind)),
        }
    }
}

impl fmt::Display for DropItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropItem::File(path) => write!(f, "{}", path.display()),
            DropItem::Text(text) => write!(f, "text ({} bytes)", text.len()),
            DropItem::Unsupported(kind) => write!(f, "unsupported ({kind})"),
        }
    }
}

fn file_name(path: &Path, options: PayloadOptions) -> String {
    let extension = path.extension().map(|ext| ext.to_string_lossy());

    if options.anonymize_file_names {
        return match extension {
            Some(ext) if !ext.is_empty() => format!("file.{ext}"),
            _ => "file".to_owned(),
        };
    }

    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => "file".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"%PDF-1.4 test")
            .unwrap();

        let payload = DropItem::File(path)
            .into_payload(PayloadOptions::default())
            .await
            .unwrap();
        assert_eq!(&payload.bytes[..], b"%PDF-1.4 test");
        assert_eq!(payload.file_name, "report.pdf");
        assert_eq!(payload.mime_type, "application/pdf");
    }

    #[tokio::test]
    async fn anonymized_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holiday photo.png");
        std::fs::write(&path, b"png").unwrap();

        let payload = DropItem::File(path)
            .into_payload(PayloadOptions {
                anonymize_file_names: true,
            })
            .await
            .unwrap();
        assert_eq!(payload.file_name, "file.png");
        assert_eq!(payload.mime_type, "image/png");
    }

    #[test]
    fn anonymized_without_extension() {
        let options = PayloadOptions {
            anonymize_file_names: true,
        };
        assert_eq!(file_name(Path::new("/tmp/Makefile"), options), "file");
        assert_eq!(
            file_name(Path::new("/tmp/Makefile"), PayloadOptions::default()),
            "Makefile"
        );
    }

    #[tokio::test]
    async fn missing_file_is_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.bin");

        let err = DropItem::File(path.clone())
            .into_payload(PayloadOptions::default())
            .await
            .unwrap_err();
        match err {
            AppError::Encoding { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn text_snippet() {
        let payload = DropItem::Text("hello there".into())
            .into_payload(PayloadOptions::default())
            .await
            .unwrap();
        assert_eq!(&payload.bytes[..], b"hello there");
        assert_eq!(payload.file_name, "file.txt");
        assert_eq!(payload.mime_type, "text/plain");
    }

    #[test]
    fn directories_are_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            DropItem::from_path(dir.path().to_owned()),
            DropItem::Unsupported(_)
        ));

        let file = dir.path().join("a.txt");
        assert_eq!(DropItem::from_path(file.clone()), DropItem::File(file));
    }

    #[tokio::test]
    async fn unsupported_is_recoverable() {
        let err = DropItem::Unsupported("public.url".into())
            .into_payload(PayloadOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedPayload(kind) if kind == "public.url"));
    }
}
