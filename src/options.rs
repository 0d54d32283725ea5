use serde::{Deserialize, Serialize};

/// Tuning for how pointer samples turn into pen strokes.
///
/// All lengths are in logical canvas units; the pixel buffer scales them by
/// the device pixel ratio when rasterizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadOptions {
    /// Thinnest line the pen produces when moving fast
    pub min_width: f32,
    /// Thickest line the pen produces when moving slowly
    pub max_width: f32,
    /// Diameter of a stroke made of a single tap
    pub dot_size: f32,
    /// Samples closer than this to the previous one are dropped
    pub min_distance: f32,
    /// Weight of the newest velocity sample in the low-pass filter (0..=1)
    pub velocity_filter_weight: f32,
}

impl Default for PadOptions {
    fn default() -> Self {
        Self {
            min_width: 0.5,
            max_width: 2.5,
            dot_size: 1.5,
            min_distance: 5.0,
            velocity_filter_weight: 0.7,
        }
    }
}

impl PadOptions {
    /// Parse options from a JSON blob. Missing keys fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let options: Self = serde_json::from_str(json)?;
        Ok(options.sanitized())
    }

    /// Width used for the first sample of a stroke, before any velocity is known
    pub fn initial_width(&self) -> f32 {
        (self.min_width + self.max_width) / 2.0
    }

    /// Clamp values into ranges the capture code can work with
    pub fn sanitized(mut self) -> Self {
        self.min_width = self.min_width.max(0.0);
        self.max_width = self.max_width.max(self.min_width);
        self.dot_size = self.dot_size.max(0.0);
        self.min_distance = self.min_distance.max(0.0);
        self.velocity_filter_weight = self.velocity_filter_weight.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let options = PadOptions::from_json(r#"{ "max_width": 4.0 }"#).unwrap();
        assert_eq!(options.max_width, 4.0);
        assert_eq!(options.min_width, PadOptions::default().min_width);
        assert_eq!(options.initial_width(), 2.25);
    }

    #[test]
    fn test_sanitize_inverted_range() {
        let json = r#"{ "min_width": 3.0, "max_width": 1.0, "velocity_filter_weight": 7.0 }"#;
        let options = PadOptions::from_json(json).unwrap();
        assert_eq!(options.max_width, 3.0);
        assert_eq!(options.velocity_filter_weight, 1.0);
    }

    #[test]
    fn test_invalid_json() {
        assert!(PadOptions::from_json("not json").is_err());
    }
}
