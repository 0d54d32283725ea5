use egui::{Context, TextureHandle, TextureId, TextureOptions};

use crate::raster::PixelBuffer;

/// GPU copy of the signature buffer, re-uploaded only when the buffer's
/// revision changes.
#[derive(Default)]
pub struct CanvasTexture {
    handle: Option<TextureHandle>,
    revision: Option<u64>,
}

impl std::fmt::Debug for CanvasTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasTexture")
            .field("uploaded", &self.handle.is_some())
            .field("revision", &self.revision)
            .finish()
    }
}

impl CanvasTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for the current buffer contents, uploading if stale
    pub fn update(&mut self, ctx: &Context, buffer: &PixelBuffer) -> TextureId {
        let revision = buffer.revision();
        match &mut self.handle {
            Some(handle) if self.revision == Some(revision) => return handle.id(),
            Some(handle) => {
                log::trace!("Re-uploading signature texture (revision {revision})");
                handle.set(buffer.to_color_image(), TextureOptions::LINEAR);
            }
            None => {
                self.handle = Some(ctx.load_texture(
                    "signature_canvas",
                    buffer.to_color_image(),
                    TextureOptions::LINEAR,
                ));
            }
        }
        self.revision = Some(revision);
        self.handle
            .as_ref()
            .map(TextureHandle::id)
            .unwrap_or_default()
    }

    /// Force a re-upload on the next frame (e.g. after the buffer was replaced)
    pub fn invalidate(&mut self) {
        self.revision = None;
    }

    /// Free the GPU texture
    pub fn release(&mut self) {
        self.handle = None;
        self.revision = None;
    }
}
