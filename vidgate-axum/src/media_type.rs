//! Content-type resolution for video delivery.
//!
//! The stored content type is untrusted in this domain (uploads routinely
//! arrive as `application/octet-stream`), so the serving type is always
//! derived from the file extension. The resolver never fails: the player
//! must be able to render a `<video>` element for any key.

/// Fallback when the extension is unknown or missing
pub const DEFAULT_VIDEO_TYPE: &str = "video/mp4";

/// The one authoritative extension table for common video containers
const VIDEO_TYPES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("m4v", "video/x-m4v"),
    ("webm", "video/webm"),
    ("ogg", "video/ogg"),
    ("ogv", "video/ogg"),
    ("avi", "video/x-msvideo"),
    ("mov", "video/quicktime"),
    ("wmv", "video/x-ms-wmv"),
    ("flv", "video/x-flv"),
    ("mkv", "video/x-matroska"),
    ("3gp", "video/3gpp"),
    ("ts", "video/mp2t"),
    ("mpg", "video/mpeg"),
    ("mpeg", "video/mpeg"),
];

/// Resolve the serving content type from a file name.
///
/// Pure function over the lowercase extension; unknown or missing
/// extensions resolve to [`DEFAULT_VIDEO_TYPE`].
pub fn content_type_for(filename: &str) -> &'static str {
    let Some((_, ext)) = filename.rsplit_once('.') else {
        return DEFAULT_VIDEO_TYPE;
    };
    let ext = ext.to_ascii_lowercase();
    VIDEO_TYPES
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, content_type)| *content_type)
        .unwrap_or(DEFAULT_VIDEO_TYPE)
}
