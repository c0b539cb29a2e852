// crates/lumacut-core/src/media.rs
//
// Upload validation for the editors.
//
// A file is checked against the target editor's accepted MIME types and size
// ceiling before anything else happens: a rejected file creates no MediaInfo,
// resets no history and leaves the current editor untouched.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const MIB: u64 = 1024 * 1024;

/// Which editor a file is destined for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Document,
    Text,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image    => "image",
            MediaKind::Video    => "video",
            MediaKind::Audio    => "audio",
            MediaKind::Document => "document",
            MediaKind::Text     => "text",
        }
    }

    pub fn max_bytes(self) -> u64 {
        match self {
            MediaKind::Image    => 10 * MIB,
            MediaKind::Video    => 100 * MIB,
            MediaKind::Audio    => 50 * MIB,
            MediaKind::Document => 25 * MIB,
            MediaKind::Text     => MIB,
        }
    }

    pub fn accepts(self, mime: &str) -> bool {
        let mime = mime.trim().to_ascii_lowercase();
        match self {
            MediaKind::Image => mime.starts_with("image/"),
            MediaKind::Video => mime.starts_with("video/"),
            MediaKind::Audio => mime.starts_with("audio/"),
            MediaKind::Document => matches!(
                mime.as_str(),
                "application/pdf"
                    | "application/msword"
                    | "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                    | "application/rtf"
                    | "text/plain"
                    | "text/markdown"
            ),
            MediaKind::Text => mime.starts_with("text/"),
        }
    }
}

/// Best-effort MIME type from a file extension. Unknown → `application/octet-stream`.
///
/// ```
/// use lumacut_core::media::mime_from_extension;
/// assert_eq!(mime_from_extension("PNG"), "image/png");
/// assert_eq!(mime_from_extension("mp4"), "video/mp4");
/// assert_eq!(mime_from_extension("xyz"), "application/octet-stream");
/// ```
pub fn mime_from_extension(ext: &str) -> &'static str {
    match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "png"          => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "bmp"          => "image/bmp",
        "svg"          => "image/svg+xml",
        "mp4" | "m4v"  => "video/mp4",
        "webm"         => "video/webm",
        "mov"          => "video/quicktime",
        "mkv"          => "video/x-matroska",
        "avi"          => "video/x-msvideo",
        "mp3"          => "audio/mpeg",
        "wav"          => "audio/wav",
        "ogg"          => "audio/ogg",
        "flac"         => "audio/flac",
        "aac"          => "audio/aac",
        "m4a"          => "audio/mp4",
        "pdf"          => "application/pdf",
        "doc"          => "application/msword",
        "docx"         => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "rtf"          => "application/rtf",
        "md"           => "text/markdown",
        "txt"          => "text/plain",
        _              => "application/octet-stream",
    }
}

pub fn mime_from_path(path: &Path) -> &'static str {
    path.extension()
        .map(|e| mime_from_extension(&e.to_string_lossy()))
        .unwrap_or("application/octet-stream")
}

/// An accepted upload. Held by the editor for the session only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub id:         Uuid,
    pub name:       String,
    pub kind:       MediaKind,
    pub mime:       String,
    pub size_bytes: u64,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum MediaError {
    #[error("{name} is not a supported {kind} file ({mime})")]
    UnsupportedType { name: String, kind: &'static str, mime: String },
    #[error("{name} is too large ({size_mb:.1} MB, limit {limit_mb} MB)")]
    TooLarge { name: String, size_mb: f64, limit_mb: u64 },
    #[error("{name} is empty")]
    Empty { name: String },
}

/// Accept or reject an upload for `kind`.
pub fn validate_upload(
    kind:       MediaKind,
    name:       &str,
    mime:       &str,
    size_bytes: u64,
) -> Result<MediaInfo, MediaError> {
    if !kind.accepts(mime) {
        return Err(MediaError::UnsupportedType {
            name: name.to_string(),
            kind: kind.label(),
            mime: mime.to_string(),
        });
    }
    if size_bytes == 0 {
        return Err(MediaError::Empty { name: name.to_string() });
    }
    if size_bytes > kind.max_bytes() {
        return Err(MediaError::TooLarge {
            name:     name.to_string(),
            size_mb:  size_bytes as f64 / MIB as f64,
            limit_mb: kind.max_bytes() / MIB,
        });
    }
    Ok(MediaInfo {
        id:         Uuid::new_v4(),
        name:       name.to_string(),
        kind,
        mime:       mime.to_ascii_lowercase(),
        size_bytes,
    })
}
