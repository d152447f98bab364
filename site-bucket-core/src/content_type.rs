//! # content_type: Extension-based MIME type resolution
//!
//! Maps an object key to the MIME type recorded on upload. Resolution looks
//! only at the extension of the final path segment, compared
//! case-insensitively against a fixed table; anything unknown (including
//! extensionless files and dotfiles) falls back to `text/plain`.
//!
//! Browsers render a static site off these values, so the table leans towards
//! the formats sites actually ship: markup, styles, scripts, images, fonts
//! and common media/archive types.

use std::path::Path;

/// Fallback for unknown or missing extensions.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Extension (lowercase, no dot) to MIME type.
static CONTENT_TYPES: &[(&str, &str)] = &[
    // Markup and text
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("mjs", "text/javascript"),
    ("json", "application/json"),
    ("map", "application/json"),
    ("webmanifest", "application/manifest+json"),
    ("xml", "application/xml"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("pdf", "application/pdf"),
    // Images
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("ico", "image/x-icon"),
    ("bmp", "image/bmp"),
    // Fonts
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
    ("eot", "application/vnd.ms-fontobject"),
    // Media
    ("mp3", "audio/mpeg"),
    ("ogg", "audio/ogg"),
    ("wav", "audio/wav"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    // Binaries and archives
    ("wasm", "application/wasm"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("tar", "application/x-tar"),
];

/// Resolve the MIME type for an object key.
///
/// Never fails: a key the table does not know resolves to
/// [`DEFAULT_CONTENT_TYPE`].
pub fn resolve(key: &str) -> &'static str {
    let Some(extension) = Path::new(key).extension().and_then(|e| e.to_str()) else {
        return DEFAULT_CONTENT_TYPE;
    };
    let extension = extension.to_ascii_lowercase();
    CONTENT_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
