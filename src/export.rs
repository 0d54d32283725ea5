use std::fmt;
use std::io::Cursor;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};

use crate::data_url;
use crate::error::ExportError;
use crate::pad::SignaturePad;
use crate::raster::PixelBuffer;

/// Base name of every exported file
pub const FILE_STEM: &str = "signature";

/// Same default quality browsers use for `image/jpeg`
const JPEG_QUALITY: u8 = 92;

/// Highest `signature (N)` suffix tried before giving up on a free name
#[cfg(not(target_arch = "wasm32"))]
const MAX_COPIES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Svg,
}

impl ExportFormat {
    /// Order shown in menus
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Jpeg, ExportFormat::Png, ExportFormat::Svg];

    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Svg => "image/svg+xml",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => ".png",
            Self::Jpeg => ".jpg",
            Self::Svg => ".svg",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPG",
            Self::Svg => "SVG",
        }
    }

    pub fn from_mime(mime: &str) -> Result<Self, ExportError> {
        match mime {
            "image/png" => Ok(Self::Png),
            "image/jpeg" => Ok(Self::Jpeg),
            "image/svg+xml" => Ok(Self::Svg),
            other => Err(ExportError::UnsupportedMime(other.to_owned())),
        }
    }

    pub fn is_raster(self) -> bool {
        !matches!(self, Self::Svg)
    }

    /// `signature` plus the format's extension
    pub fn file_name(self) -> String {
        format!("{FILE_STEM}{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// An encoded signature, ready to upload or save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub name: String,
}

/// Encode the pixel buffer as PNG or JPEG
pub fn encode_raster(buffer: &PixelBuffer, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    let result = match format {
        ExportFormat::Png => buffer
            .image()
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png),
        ExportFormat::Jpeg => {
            // JPEG has no alpha; the buffer is opaque so this only drops the channel
            let rgb = DynamicImage::ImageRgba8(buffer.image().clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(&rgb)
        }
        ExportFormat::Svg => {
            return Err(ExportError::UnsupportedMime(format!(
                "{} is not a raster format",
                format.mime()
            )));
        }
    };
    result.map_err(|source| ExportError::Encode { format, source })?;
    Ok(bytes)
}

/// Encode the current signature, background included.
///
/// Raster formats encode the pixel buffer. SVG goes through the pad's own
/// vector data URI, whose payload is decoded back into bytes.
pub fn export(pad: &SignaturePad, format: ExportFormat) -> Result<ExportedFile, ExportError> {
    let bytes = if format.is_raster() {
        encode_raster(pad.buffer(), format)?
    } else {
        data_url::decode(&pad.to_data_url(format)?)?.bytes
    };

    log::info!("Exported {} ({} bytes)", format.file_name(), bytes.len());
    Ok(ExportedFile {
        bytes,
        mime: format.mime().to_owned(),
        name: format.file_name(),
    })
}

/// Like [`export`], taking a MIME string
pub fn export_mime(pad: &SignaturePad, mime: &str) -> Result<ExportedFile, ExportError> {
    export(pad, ExportFormat::from_mime(mime)?)
}

/// Save the signature as `signature.<ext>` inside `dir`.
///
/// Existing files are never overwritten: like a browser download, the name
/// becomes `signature (1).<ext>`, `signature (2).<ext>` and so on.
#[cfg(not(target_arch = "wasm32"))]
pub fn download(
    pad: &SignaturePad,
    format: ExportFormat,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    use std::io::Write as _;

    let file = export(pad, format)?;
    let (mut out, path) = create_unused(dir, format)?;
    out.write_all(&file.bytes).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    log::info!("Saved signature to {}", path.display());
    Ok(path)
}

#[cfg(not(target_arch = "wasm32"))]
fn create_unused(
    dir: &Path,
    format: ExportFormat,
) -> Result<(std::fs::File, PathBuf), ExportError> {
    use std::io::ErrorKind;

    for copy in 0..=MAX_COPIES {
        let path = match copy {
            0 => dir.join(format.file_name()),
            n => dir.join(format!("{FILE_STEM} ({n}){}", format.extension())),
        };
        match std::fs::OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(out) => {
                if copy > 0 {
                    log::warn!(
                        "{} already exists in {}, saving as {}",
                        format.file_name(),
                        dir.display(),
                        path.display()
                    );
                }
                return Ok((out, path));
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(ExportError::Write { path, source }),
        }
    }
    Err(ExportError::Write {
        path: dir.join(format.file_name()),
        source: std::io::Error::new(ErrorKind::AlreadyExists, "no free file name left"),
    })
}

/// Trigger a browser download of the signature's data URI
#[cfg(target_arch = "wasm32")]
pub fn download(pad: &SignaturePad, format: ExportFormat) -> Result<(), ExportError> {
    use eframe::wasm_bindgen::JsCast as _;

    let url = pad.to_data_url(format)?;
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExportError::Download("no document".to_owned()))?;
    let link = document
        .create_element("a")
        .map_err(|err| ExportError::Download(format!("{err:?}")))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Download("not an anchor element".to_owned()))?;
    link.set_href(&url);
    link.set_download(FILE_STEM);
    link.click();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_table() {
        assert_eq!(ExportFormat::Png.file_name(), "signature.png");
        assert_eq!(ExportFormat::Jpeg.file_name(), "signature.jpg");
        assert_eq!(ExportFormat::Svg.file_name(), "signature.svg");
    }

    #[test]
    fn test_mime_lookup() {
        for format in ExportFormat::ALL {
            assert_eq!(ExportFormat::from_mime(format.mime()).unwrap(), format);
        }
        assert!(matches!(
            ExportFormat::from_mime("image/gif"),
            Err(ExportError::UnsupportedMime(_))
        ));
    }

    #[test]
    fn test_svg_is_not_raster() {
        let pad = SignaturePad::with_size(egui::Vec2::new(10.0, 10.0));
        assert!(encode_raster(pad.buffer(), ExportFormat::Svg).is_err());
    }
}
