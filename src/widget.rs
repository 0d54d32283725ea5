use std::cell::Cell;
use std::rc::Rc;

use egui::{Color32, Pos2, Rect, Sense, Vec2};
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt as _;

use crate::export::ExportFormat;
use crate::host::{self, HostBridge};
use crate::input::{self, InputHandler};
use crate::notice::{Notice, NoticeBoard, NoticeSink as _};
use crate::options::PadOptions;
use crate::pad::SignaturePad;
use crate::stroke::Stroke;
use crate::style::Style;
use crate::texture::CanvasTexture;

/// Border drawn around the canvas
const BORDER_COLOR: Color32 = Color32::from_rgb(0x8f, 0x95, 0x9e);

/// One mounted signature widget.
///
/// Owns its pad, input state, texture and the pool that drives insert tasks.
/// Build one per mount and call [`SignatureWidget::teardown`] when the host
/// unmounts it.
pub struct SignatureWidget<H> {
    pad: SignaturePad,
    host: H,
    input: InputHandler,
    texture: CanvasTexture,
    notices: NoticeBoard,
    pool: LocalPool,
    in_flight: Rc<Cell<usize>>,
}

impl<H> std::fmt::Debug for SignatureWidget<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureWidget")
            .field("strokes", &self.pad.history().len())
            .field("texture", &self.texture)
            .field("in_flight", &self.in_flight.get())
            .finish()
    }
}

impl<H> SignatureWidget<H>
where
    H: HostBridge + Clone + 'static,
{
    pub fn new(host: H, style: Style, options: PadOptions) -> Self {
        Self {
            pad: SignaturePad::new(Vec2::new(300.0, 150.0), 1.0, style, options),
            host,
            input: InputHandler::new(Rect::NOTHING),
            texture: CanvasTexture::new(),
            notices: NoticeBoard::new(),
            pool: LocalPool::new(),
            in_flight: Rc::new(Cell::new(0)),
        }
    }

    pub fn pad(&self) -> &SignaturePad {
        &self.pad
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Number of inserts started but not yet finished
    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    pub fn clear(&mut self) {
        self.pad.clear();
    }

    pub fn undo(&mut self) {
        self.pad.undo();
    }

    pub fn set_pen_color(&mut self, color: Color32) {
        self.pad.set_pen_color(color);
    }

    pub fn set_background_color(&mut self, color: Color32) {
        self.pad.set_background_color(color);
    }

    /// Pen tuning for strokes begun after this call
    pub fn set_options(&mut self, options: PadOptions) {
        self.pad.set_options(options);
    }

    pub fn restore(&mut self, strokes: Vec<Stroke>) {
        self.pad.from_data(strokes);
    }

    /// Start inserting the signature into the host's selected cell.
    ///
    /// Runs on the widget's pool; progress shows up on the notice board.
    /// A second call before the first finishes starts a second insert.
    pub fn insert(&mut self, format: ExportFormat) {
        let host = self.host.clone();
        let pad = self.pad.clone();
        let notices = self.notices.clone();
        let in_flight = Rc::clone(&self.in_flight);

        self.in_flight.set(self.in_flight.get() + 1);
        let task = async move {
            if let Err(err) = host::insert_signature(&host, &pad, format, &notices).await {
                log::debug!("Insert as {format} did not complete: {err}");
            }
            in_flight.set(in_flight.get().saturating_sub(1));
        };

        if let Err(err) = self.pool.spawner().spawn_local(task) {
            log::error!("Failed to start insert task: {err}");
            self.in_flight.set(self.in_flight.get().saturating_sub(1));
            self.notices.show(Notice::error(format!("Insert failed: {err}")));
        }
    }

    /// Save the signature locally
    #[cfg(not(target_arch = "wasm32"))]
    pub fn download(&mut self, format: ExportFormat, dir: &std::path::Path) {
        match crate::export::download(&self.pad, format, dir) {
            Ok(path) => {
                let message = format!("Saved {}", path.display());
                self.notices.show(Notice::success(message));
            }
            Err(err) => self.notices.show(Notice::error(format!("Download failed: {err}"))),
        }
    }

    /// Save the signature locally
    #[cfg(target_arch = "wasm32")]
    pub fn download(&mut self, format: ExportFormat) {
        if let Err(err) = crate::export::download(&self.pad, format) {
            self.notices.show(Notice::error(format!("Download failed: {err}")));
        }
    }

    /// Drive in-flight inserts as far as they can go without blocking
    pub fn poll(&mut self, ctx: &egui::Context) {
        self.pool.run_until_stalled();
        if self.in_flight.get() > 0 {
            ctx.request_repaint();
        }
    }

    /// Draw the canvas filling `desired_size` and feed it pointer input
    pub fn canvas_ui(&mut self, ui: &mut egui::Ui, desired_size: Vec2) -> egui::Response {
        let (response, painter) = ui.allocate_painter(desired_size, Sense::drag());
        let rect = response.rect;

        if self.pad.resize(rect.size(), ui.ctx().pixels_per_point()) {
            self.texture.invalidate();
        }

        self.input.set_canvas_rect(rect);
        let events = self.input.process_input(ui.ctx());
        if self.pad.is_drawing() || response.hovered() {
            input::apply_events(&mut self.pad, &events);
        }

        let texture_id = self.texture.update(ui.ctx(), self.pad.buffer());
        painter.image(
            texture_id,
            rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );

        if let Some(stroke) = self.pad.active_stroke() {
            paint_preview(&painter, rect.min, &stroke);
            ui.ctx().request_repaint();
        }
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, BORDER_COLOR));

        response
    }

    /// Finish outstanding inserts and free GPU resources.
    ///
    /// Blocks the calling (UI) thread until every in-flight insert has
    /// resolved. Inserts are not cancelled, so a host write that never
    /// completes keeps the app from exiting.
    pub fn teardown(&mut self) {
        log::info!(
            "Tearing down signature widget ({} inserts in flight)",
            self.in_flight.get()
        );
        self.pool.run();
        self.texture.release();
    }
}

/// Vector preview of the stroke being drawn, on top of the buffer texture
fn paint_preview(painter: &egui::Painter, origin: Pos2, stroke: &Stroke) {
    let offset = origin.to_vec2();
    match stroke.points() {
        [] => {}
        [only] => {
            painter.circle_filled(only.pos + offset, stroke.dot_size() / 2.0, stroke.color());
        }
        points => {
            for pair in points.windows(2) {
                let width = (pair[0].width + pair[1].width) / 2.0;
                painter.line_segment(
                    [pair[0].pos + offset, pair[1].pos + offset],
                    egui::Stroke::new(width, stroke.color()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{FieldType, MemoryHost, Selection};
    use crate::notice::NoticeLevel;
    use crate::pad::DEFAULT_PRESSURE;

    fn widget_with_selection() -> (SignatureWidget<MemoryHost>, MemoryHost) {
        let host = MemoryHost::new();
        let field = host.add_field("Signature", FieldType::Attachment);
        let record = host.add_record();
        host.select(Selection::cell(field, record));
        let widget = SignatureWidget::new(host.clone(), Style::default(), PadOptions::default());
        (widget, host)
    }

    #[test]
    fn test_insert_runs_on_poll() {
        let (mut widget, host) = widget_with_selection();
        widget.pad.begin_stroke(Pos2::new(10.0, 10.0), 0.0, DEFAULT_PRESSURE);
        widget.pad.end_stroke();

        widget.insert(ExportFormat::Png);
        assert_eq!(widget.in_flight(), 1);
        assert!(host.writes().is_empty());

        widget.poll(&egui::Context::default());
        assert_eq!(widget.in_flight(), 0);
        assert_eq!(host.writes().len(), 1);
        assert_eq!(widget.notices().current().unwrap().level, NoticeLevel::Success);
    }

    #[test]
    fn test_repeated_inserts_are_not_serialized() {
        let (mut widget, host) = widget_with_selection();
        widget.insert(ExportFormat::Svg);
        widget.insert(ExportFormat::Svg);
        assert_eq!(widget.in_flight(), 2);

        widget.teardown();
        assert_eq!(widget.in_flight(), 0);
        assert_eq!(host.writes().len(), 2);
    }

    #[test]
    fn test_insert_uses_snapshot_of_pad() {
        let (mut widget, host) = widget_with_selection();
        widget.insert(ExportFormat::Svg);
        // Drawing after the click doesn't change what gets uploaded
        widget.pad.begin_stroke(Pos2::new(10.0, 10.0), 0.0, DEFAULT_PRESSURE);
        widget.pad.end_stroke();
        widget.poll(&egui::Context::default());

        let write = &host.writes()[0];
        let files = host.attachments(&write.record_id, &write.field_id);
        let svg = String::from_utf8(files[0].bytes.clone()).unwrap();
        assert!(!svg.contains("<circle"));
    }
}
