use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::ExportError;

/// Decoded `data:` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Build `data:<mime>;base64,<payload>`
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Split a base64 `data:` URI back into its MIME type and payload bytes.
pub fn decode(url: &str) -> Result<DataUrl, ExportError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ExportError::MalformedDataUrl("missing `data:` scheme".to_owned()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ExportError::MalformedDataUrl("missing `,` before payload".to_owned()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| {
            ExportError::MalformedDataUrl(format!("payload is not base64 encoded: `{header}`"))
        })?;

    let bytes = STANDARD.decode(payload.trim())?;
    Ok(DataUrl {
        mime: mime.to_owned(),
        bytes,
    })
}
