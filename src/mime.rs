use std::path::Path;

/// Content type used when an extension has no known mapping.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Guess a content type from a file extension (without the leading dot).
pub fn resolve(extension: &str) -> String {
    if extension.is_empty() {
        return OCTET_STREAM.to_owned();
    }

    mime_guess::from_ext(extension)
        .first()
        .map(|mime| mime.essence_str().to_owned())
        .unwrap_or_else(|| OCTET_STREAM.to_owned())
}

/// Guess a content type from the extension of `path`.
pub fn resolve_path(path: impl AsRef<Path>) -> String {
    let extension = path
        .as_ref()
        .extension()
        .map(|ext| ext.to_string_lossy())
        .unwrap_or_default();
    resolve(&extension)
}
