use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

use crate::options::PadOptions;

/// One pointer sample of a stroke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    /// Position in logical canvas units
    pub pos: Pos2,
    /// Seconds, as reported by the input source
    pub time: f64,
    /// 0..=1, 0.5 when the device doesn't report pressure
    pub pressure: f32,
    /// Pen width at this sample, fixed at capture time
    pub width: f32,
}

// Immutable stroke, committed to history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<StrokePoint>,
    color: Color32,
    dot_size: f32,
}

impl Stroke {
    pub fn new(color: Color32, dot_size: f32, points: Vec<StrokePoint>) -> Self {
        Self {
            points,
            color,
            dot_size,
        }
    }

    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    /// Pen color active when the stroke was drawn
    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn dot_size(&self) -> f32 {
        self.dot_size
    }
}

/// Collects samples for the stroke currently being drawn.
///
/// Pen width follows pointer speed: fast movement thins the line down to
/// `min_width`, slow movement thickens it up to `max_width`.
#[derive(Debug, Clone)]
pub struct StrokeBuilder {
    points: Vec<StrokePoint>,
    color: Color32,
    options: PadOptions,
    last_velocity: f32,
}

impl StrokeBuilder {
    /// Start a stroke at the first sample
    pub fn begin(color: Color32, options: PadOptions, pos: Pos2, time: f64, pressure: f32) -> Self {
        let first = StrokePoint {
            pos,
            time,
            pressure: pressure.clamp(0.0, 1.0),
            width: options.initial_width(),
        };
        Self {
            points: vec![first],
            color,
            options,
            last_velocity: 0.0,
        }
    }

    /// Add a sample. Returns false when it was dropped for being too close
    /// to the previous one.
    pub fn add_point(&mut self, pos: Pos2, time: f64, pressure: f32) -> bool {
        let Some(last) = self.points.last().copied() else {
            return false;
        };

        let distance = last.pos.distance(pos);
        if distance < self.options.min_distance {
            return false;
        }

        let elapsed_ms = ((time - last.time) * 1000.0) as f32;
        let velocity = if elapsed_ms > 0.0 {
            let weight = self.options.velocity_filter_weight;
            weight * (distance / elapsed_ms) + (1.0 - weight) * self.last_velocity
        } else {
            self.last_velocity
        };
        self.last_velocity = velocity;

        let width = (self.options.max_width / (velocity + 1.0)).max(self.options.min_width);
        self.points.push(StrokePoint {
            pos,
            time,
            pressure: pressure.clamp(0.0, 1.0),
            width,
        });
        true
    }

    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Snapshot for previewing without ending the stroke
    pub fn to_stroke(&self) -> Stroke {
        Stroke::new(self.color, self.options.dot_size, self.points.clone())
    }

    pub fn finish(self) -> Stroke {
        Stroke::new(self.color, self.options.dot_size, self.points)
    }
}
