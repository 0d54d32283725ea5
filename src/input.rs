use egui::{Context, PointerButton, Pos2, Rect};

use crate::pad::{DEFAULT_PRESSURE, SignaturePad};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Position relative to the canvas' top-left corner, in points
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Pointer events the signature canvas reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed
    PointerDown { location: InputLocation, time: f64 },
    /// Pointer moved
    PointerMove { location: InputLocation, time: f64 },
    /// Primary button released
    PointerUp { location: InputLocation, time: f64 },
    /// Pointer left the window
    PointerLeave { last_known_location: InputLocation },
}

/// Handles converting raw egui input into canvas events
#[derive(Debug, Clone)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Creates a canvas-relative InputLocation from a screen position
    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: (pos - self.canvas_rect.min).to_pos2(),
            is_in_canvas: self.canvas_rect.contains(pos),
        }
    }

    /// Process raw egui input and generate canvas events
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let time = input.time;

            if let Some(pos) = input.pointer.hover_pos() {
                if input.pointer.button_pressed(PointerButton::Primary) {
                    events.push(InputEvent::PointerDown {
                        location: self.make_location(pos),
                        time,
                    });
                }

                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                        time,
                    });
                }

                if input.pointer.button_released(PointerButton::Primary) {
                    events.push(InputEvent::PointerUp {
                        location: self.make_location(pos),
                        time,
                    });
                }

                self.last_pointer_pos = Some(pos);
            } else if let Some(last) = self.last_pointer_pos.take() {
                events.push(InputEvent::PointerLeave {
                    last_known_location: self.make_location(last),
                });
            }
        });

        events
    }
}

/// Feed canvas events into the pad. Returns true if a stroke was committed.
///
/// Strokes start only inside the canvas and end on release or as soon as
/// the pointer leaves it.
pub fn apply_events(pad: &mut SignaturePad, events: &[InputEvent]) -> bool {
    let mut committed = false;
    for event in events {
        match event {
            InputEvent::PointerDown { location, time } => {
                if location.is_in_canvas {
                    pad.begin_stroke(location.position, *time, DEFAULT_PRESSURE);
                }
            }
            InputEvent::PointerMove { location, time } => {
                if !pad.is_drawing() {
                    continue;
                }
                if location.is_in_canvas {
                    pad.extend_stroke(location.position, *time, DEFAULT_PRESSURE);
                } else {
                    committed |= pad.end_stroke();
                }
            }
            InputEvent::PointerUp { location, time } => {
                if location.is_in_canvas {
                    pad.extend_stroke(location.position, *time, DEFAULT_PRESSURE);
                }
                committed |= pad.end_stroke();
            }
            InputEvent::PointerLeave { .. } => {
                committed |= pad.end_stroke();
            }
        }
    }
    committed
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Vec2;

    fn at(x: f32, y: f32, is_in_canvas: bool) -> InputLocation {
        InputLocation {
            position: Pos2::new(x, y),
            is_in_canvas,
        }
    }

    fn down(location: InputLocation, time: f64) -> InputEvent {
        InputEvent::PointerDown { location, time }
    }

    fn moved(location: InputLocation, time: f64) -> InputEvent {
        InputEvent::PointerMove { location, time }
    }

    fn up(location: InputLocation, time: f64) -> InputEvent {
        InputEvent::PointerUp { location, time }
    }

    #[test]
    fn test_location_is_canvas_relative() {
        let canvas = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(200.0, 100.0));
        let handler = InputHandler::new(canvas);
        let location = handler.make_location(Pos2::new(110.0, 60.0));
        assert_eq!(location.position, Pos2::new(10.0, 10.0));
        assert!(location.is_in_canvas);
        assert!(!handler.make_location(Pos2::new(10.0, 10.0)).is_in_canvas);
    }

    #[test]
    fn test_press_drag_release_commits_one_stroke() {
        let mut pad = SignaturePad::with_size(Vec2::new(100.0, 100.0));
        let events = [
            down(at(10.0, 10.0, true), 0.0),
            moved(at(30.0, 10.0, true), 0.1),
            moved(at(60.0, 10.0, true), 0.2),
            up(at(60.0, 10.0, true), 0.3),
        ];
        assert!(apply_events(&mut pad, &events));
        assert_eq!(pad.history().len(), 1);
        assert_eq!(pad.history().strokes()[0].points().len(), 3);
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let mut pad = SignaturePad::with_size(Vec2::new(100.0, 100.0));
        let events = [
            down(at(-5.0, 10.0, false), 0.0),
            moved(at(30.0, 10.0, true), 0.1),
            up(at(30.0, 10.0, true), 0.2),
        ];
        assert!(!apply_events(&mut pad, &events));
        assert!(pad.is_empty());
    }

    #[test]
    fn test_leaving_the_canvas_ends_the_stroke() {
        let mut pad = SignaturePad::with_size(Vec2::new(100.0, 100.0));
        let events = [
            down(at(10.0, 10.0, true), 0.0),
            moved(at(150.0, 10.0, false), 0.1),
            moved(at(50.0, 10.0, true), 0.2),
        ];
        assert!(apply_events(&mut pad, &events));
        assert!(!pad.is_drawing());
        assert_eq!(pad.history().len(), 1);
    }
}
