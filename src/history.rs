use crate::stroke::Stroke;

/// Ordered log of committed strokes.
///
/// This is the only record of what has been drawn; the pixel buffer is
/// rebuilt from it whenever strokes are removed or restyled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeHistory {
    strokes: Vec<Stroke>,
}

impl StrokeHistory {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    /// Append a finished stroke
    pub fn commit(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Remove the most recent stroke, if any
    pub fn undo(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Replace the whole log, e.g. when restoring saved data
    pub fn replace(&mut self, strokes: Vec<Stroke>) {
        self.strokes = strokes;
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokePoint;
    use egui::{Color32, Pos2};

    fn dot(x: f32) -> Stroke {
        let point = StrokePoint {
            pos: Pos2::new(x, 0.0),
            time: 0.0,
            pressure: 0.5,
            width: 1.0,
        };
        Stroke::new(Color32::BLACK, 1.5, vec![point])
    }

    #[test]
    fn test_undo_removes_most_recent_only() {
        let mut history = StrokeHistory::new();
        history.commit(dot(1.0));
        history.commit(dot(2.0));
        history.commit(dot(3.0));

        let removed = history.undo().unwrap();
        assert_eq!(removed, dot(3.0));
        assert_eq!(history.strokes(), &[dot(1.0), dot(2.0)]);
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut history = StrokeHistory::new();
        assert!(history.undo().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut history = StrokeHistory::new();
        history.commit(dot(1.0));
        history.clear();
        assert_eq!(history.len(), 0);
    }
}
