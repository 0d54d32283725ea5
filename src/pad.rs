use egui::{Color32, Pos2, Vec2};

use crate::error::ExportError;
use crate::export::{self, ExportFormat};
use crate::history::StrokeHistory;
use crate::options::PadOptions;
use crate::raster::PixelBuffer;
use crate::stroke::{Stroke, StrokeBuilder};
use crate::style::{self, Style};
use crate::{data_url, svg};

/// Pressure reported for devices that don't measure it
pub const DEFAULT_PRESSURE: f32 = 0.5;

/// The drawing surface of one signature widget.
///
/// Owns the stroke history, the style and the pixel buffer. The buffer only
/// ever reflects committed strokes: the stroke being drawn is exposed through
/// [`SignaturePad::active_stroke`] for previewing and lands in the buffer on
/// [`SignaturePad::end_stroke`].
#[derive(Debug, Clone)]
pub struct SignaturePad {
    history: StrokeHistory,
    style: Style,
    options: PadOptions,
    buffer: PixelBuffer,
    active: Option<StrokeBuilder>,
}

impl SignaturePad {
    pub fn new(
        logical_size: Vec2,
        pixels_per_point: f32,
        style: Style,
        options: PadOptions,
    ) -> Self {
        let style = Style::new(style.pen_color, style.background_color);
        Self {
            history: StrokeHistory::new(),
            buffer: PixelBuffer::new(logical_size, pixels_per_point, style.background_color),
            style,
            options: options.sanitized(),
            active: None,
        }
    }

    /// Black pen on white at 1:1 pixel ratio
    pub fn with_size(logical_size: Vec2) -> Self {
        Self::new(logical_size, 1.0, Style::default(), PadOptions::default())
    }

    // --- stroke capture ---

    /// Pointer went down. A stroke still in progress is committed first.
    pub fn begin_stroke(&mut self, pos: Pos2, time: f64, pressure: f32) {
        if self.active.is_some() {
            self.end_stroke();
        }
        log::trace!("Begin stroke at {:?}", pos);
        let builder = StrokeBuilder::begin(self.style.pen_color, self.options, pos, time, pressure);
        self.active = Some(builder);
    }

    /// Pointer moved. Ignored when no stroke is in progress.
    pub fn extend_stroke(&mut self, pos: Pos2, time: f64, pressure: f32) -> bool {
        match &mut self.active {
            Some(builder) => builder.add_point(pos, time, pressure),
            None => false,
        }
    }

    /// Pointer went up or left the canvas: commit the stroke to history and
    /// rasterize it. Returns false when no stroke was in progress.
    pub fn end_stroke(&mut self) -> bool {
        let Some(builder) = self.active.take() else {
            return false;
        };
        let stroke = builder.finish();
        log::debug!("Committing stroke with {} points", stroke.points().len());
        self.buffer.draw_stroke(&stroke);
        self.history.commit(stroke);
        true
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Snapshot of the stroke being drawn, for previews
    pub fn active_stroke(&self) -> Option<Stroke> {
        self.active.as_ref().map(StrokeBuilder::to_stroke)
    }

    // --- history ---

    /// Remove the most recent stroke and rebuild the buffer. No-op on an
    /// empty history.
    pub fn undo(&mut self) -> bool {
        if self.history.undo().is_none() {
            return false;
        }
        self.redraw();
        true
    }

    /// Drop every stroke and reset the buffer to the background color
    pub fn clear(&mut self) {
        self.active = None;
        self.history.clear();
        self.buffer.fill(self.style.background_color);
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Committed strokes, suitable for saving
    pub fn to_data(&self) -> Vec<Stroke> {
        self.history.strokes().to_vec()
    }

    /// Replace history with saved strokes and rebuild the buffer
    pub fn from_data(&mut self, strokes: Vec<Stroke>) {
        self.active = None;
        self.history.replace(strokes);
        self.redraw();
    }

    // --- style ---

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn options(&self) -> &PadOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: PadOptions) {
        self.options = options.sanitized();
    }

    /// Affects strokes begun after this call only
    pub fn set_pen_color(&mut self, color: Color32) {
        self.style.pen_color = style::opaque(color);
    }

    /// Repaint the background under all existing strokes
    pub fn set_background_color(&mut self, color: Color32) {
        let color = style::opaque(color);
        if color == self.style.background_color {
            return;
        }
        self.style.background_color = color;
        self.redraw();
    }

    // --- surface ---

    /// Resize the backing buffer and replay history into it. Returns false
    /// when size and ratio are unchanged.
    pub fn resize(&mut self, logical_size: Vec2, pixels_per_point: f32) -> bool {
        // Called every frame; only allocate when something changed
        if self.buffer.has_dimensions(logical_size, pixels_per_point) {
            return false;
        }
        let resized =
            PixelBuffer::new(logical_size, pixels_per_point, self.style.background_color);
        log::debug!(
            "Resizing signature canvas to {}x{} px (ratio {})",
            resized.width(),
            resized.height(),
            resized.pixels_per_point()
        );
        self.buffer = resized;
        self.redraw();
        true
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Rebuild the buffer from (style, history)
    fn redraw(&mut self) {
        self.buffer.fill(self.style.background_color);
        for stroke in self.history.strokes() {
            self.buffer.draw_stroke(stroke);
        }
    }

    // --- export ---

    /// Native vector rendering of the signature
    pub fn to_svg(&self, include_background: bool) -> String {
        svg::render_svg(
            self.history.strokes(),
            &self.style,
            self.buffer.logical_size(),
            include_background,
        )
    }

    /// Base64 `data:` URI of the signature in the requested format, with the
    /// background included.
    pub fn to_data_url(&self, format: ExportFormat) -> Result<String, ExportError> {
        let bytes = match format {
            ExportFormat::Svg => self.to_svg(true).into_bytes(),
            raster => export::encode_raster(&self.buffer, raster)?,
        };
        Ok(data_url::encode(format.mime(), &bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad() -> SignaturePad {
        SignaturePad::with_size(Vec2::new(40.0, 20.0))
    }

    fn draw_line(pad: &mut SignaturePad, from: Pos2, to: Pos2) {
        pad.begin_stroke(from, 0.0, DEFAULT_PRESSURE);
        pad.extend_stroke(to, 0.5, DEFAULT_PRESSURE);
        pad.end_stroke();
    }

    #[test]
    fn test_active_stroke_not_in_buffer() {
        let mut pad = pad();
        let revision = pad.buffer().revision();
        pad.begin_stroke(Pos2::new(5.0, 10.0), 0.0, DEFAULT_PRESSURE);
        pad.extend_stroke(Pos2::new(30.0, 10.0), 0.5, DEFAULT_PRESSURE);

        assert!(pad.is_drawing());
        assert!(pad.is_empty());
        assert_eq!(pad.buffer().revision(), revision);
        assert_eq!(pad.active_stroke().unwrap().points().len(), 2);

        assert!(pad.end_stroke());
        assert!(!pad.is_drawing());
        assert_eq!(pad.history().len(), 1);
        assert_eq!(pad.buffer().pixel(20, 10), Color32::BLACK);
    }

    #[test]
    fn test_end_without_begin() {
        let mut pad = pad();
        assert!(!pad.end_stroke());
        assert!(!pad.extend_stroke(Pos2::new(1.0, 1.0), 0.0, DEFAULT_PRESSURE));
        assert!(pad.is_empty());
    }

    #[test]
    fn test_begin_while_drawing_commits_previous() {
        let mut pad = pad();
        pad.begin_stroke(Pos2::new(5.0, 5.0), 0.0, DEFAULT_PRESSURE);
        pad.begin_stroke(Pos2::new(15.0, 5.0), 0.1, DEFAULT_PRESSURE);
        assert_eq!(pad.history().len(), 1);
        assert!(pad.is_drawing());
    }

    #[test]
    fn test_pen_color_is_captured_per_stroke() {
        let mut pad = pad();
        draw_line(&mut pad, Pos2::new(2.0, 5.0), Pos2::new(38.0, 5.0));
        pad.set_pen_color(Color32::RED);
        draw_line(&mut pad, Pos2::new(2.0, 15.0), Pos2::new(38.0, 15.0));

        let strokes = pad.to_data();
        assert_eq!(strokes[0].color(), Color32::BLACK);
        assert_eq!(strokes[1].color(), Color32::RED);

        // Replay after undo keeps the first stroke black
        pad.undo();
        assert_eq!(pad.buffer().pixel(20, 5), Color32::BLACK);
        assert_eq!(pad.buffer().pixel(20, 15), Color32::WHITE);
    }

    #[test]
    fn test_resize_keeps_history() {
        let mut pad = pad();
        draw_line(&mut pad, Pos2::new(2.0, 10.0), Pos2::new(38.0, 10.0));

        assert!(pad.resize(Vec2::new(40.0, 20.0), 2.0));
        assert_eq!(pad.buffer().width(), 80);
        assert_eq!(pad.history().len(), 1);
        assert_eq!(pad.buffer().pixel(40, 20), Color32::BLACK);

        assert!(!pad.resize(Vec2::new(40.0, 20.0), 2.0));
    }

    #[test]
    fn test_unchanged_resize_leaves_buffer_untouched() {
        let mut pad = pad();
        draw_line(&mut pad, Pos2::new(2.0, 10.0), Pos2::new(38.0, 10.0));
        let revision = pad.buffer().revision();

        // One second of frames at the same size
        for _ in 0..60 {
            assert!(!pad.resize(Vec2::new(40.0, 20.0), 1.0));
        }
        // Ratios below one clamp to the current 1.0
        assert!(!pad.resize(Vec2::new(40.0, 20.0), 0.5));
        assert_eq!(pad.buffer().revision(), revision);
    }

    #[test]
    fn test_set_options_applies_to_later_strokes() {
        let mut pad = pad();
        let mut options = *pad.options();
        options.min_width = 4.0;
        options.max_width = 1.0;
        pad.set_options(options);

        // Inverted range is clamped so max never drops below min
        assert_eq!(pad.options().max_width, 4.0);
        pad.begin_stroke(Pos2::new(5.0, 10.0), 0.0, DEFAULT_PRESSURE);
        let first = pad.active_stroke().unwrap().points()[0];
        assert_eq!(first.width, 4.0);
    }

    #[test]
    fn test_from_data_replaces_history() {
        let mut source = pad();
        draw_line(&mut source, Pos2::new(2.0, 10.0), Pos2::new(38.0, 10.0));

        let mut target = pad();
        target.from_data(source.to_data());
        assert_eq!(target.history(), source.history());
        assert_eq!(target.buffer().image(), source.buffer().image());
    }

    #[test]
    fn test_translucent_colors_become_opaque() {
        let mut pad = pad();
        pad.set_background_color(Color32::from_rgba_unmultiplied(0, 0, 255, 255));
        pad.set_pen_color(Color32::TRANSPARENT);
        assert_eq!(pad.style().background_color, Color32::BLUE);
        assert_eq!(pad.style().pen_color.a(), 255);
    }
}
