use std::path::PathBuf;

use thiserror::Error;

use crate::export::ExportFormat;

/// Errors that can occur while turning the canvas into a file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported image type: {0}")]
    UnsupportedMime(String),

    #[error("Failed to encode {format}: {source}")]
    Encode {
        format: ExportFormat,
        #[source]
        source: image::ImageError,
    },

    #[error("Malformed data URL: {0}")]
    MalformedDataUrl(String),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Download failed: {0}")]
    Download(String),
}

/// Errors reported by the host application
#[derive(Debug, Error)]
pub enum HostError {
    #[error("No active table")]
    NoActiveTable,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown record: {0}")]
    UnknownRecord(String),

    #[error("{0}")]
    Rejected(String),
}

/// Errors that abort inserting the signature into a cell
#[derive(Debug, Error)]
pub enum InsertError {
    /// Nothing selected, or the selected field can't hold attachments.
    /// Shown as an info message; nothing was written.
    #[error("Please select an empty attachment cell")]
    InvalidSelection,

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Host(#[from] HostError),
}

impl InsertError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidSelection)
    }
}
