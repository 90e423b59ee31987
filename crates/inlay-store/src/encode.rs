use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;

use crate::error::StoreError;

/// MIME type assumed when an image's extension is missing or unknown.
pub const DEFAULT_MIME: &str = "image/png";

/// Encode raw image bytes as a canonical data-URI string.
///
/// The output is `data:<mime>;base64,<payload>` — the textual form the
/// blob store persists and the renderer consumes directly. Pure and
/// deterministic: identical input bytes and MIME always produce the same
/// string, which is what makes value-level deduplication in the store
/// possible. No size limit is enforced here; oversized payloads are the
/// caller's tradeoff.
#[must_use]
pub fn encode_data_uri(bytes: &[u8], mime: &str) -> String {
    let mut out = String::with_capacity(6 + mime.len() + 8 + (bytes.len() * 4).div_ceil(3));
    out.push_str("data:");
    out.push_str(mime);
    out.push_str(";base64,");
    STANDARD.encode_string(bytes, &mut out);
    out
}

/// Guess the MIME type for an image path from its extension.
///
/// Covers the formats editors commonly paste or drop. Unrecognised or
/// absent extensions fall back to [`DEFAULT_MIME`] — a wrong MIME label
/// degrades rendering, never storage, so guessing is safe here.
#[must_use]
pub fn mime_for_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return DEFAULT_MIME;
    };
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        _ => DEFAULT_MIME,
    }
}

/// Read an image file and encode it as a data URI in one step.
///
/// The MIME type is `mime` when given, otherwise guessed from the
/// path's extension. This is the path-fed entry into the encoder:
/// a source that cannot be read surfaces as
/// [`StoreError::Encoding`], keeping read failures in the same
/// taxonomy as the store operations the payload is headed for.
///
/// # Errors
///
/// Returns [`StoreError::Encoding`] with the path and the underlying
/// I/O error when the file cannot be read.
pub fn read_and_encode(path: &Path, mime: Option<&str>) -> Result<String, StoreError> {
    let bytes = std::fs::read(path).map_err(|e| StoreError::Encoding {
        reason: format!("{}: {e}", path.display()),
    })?;
    Ok(encode_data_uri(
        &bytes,
        mime.unwrap_or_else(|| mime_for_path(path)),
    ))
}
