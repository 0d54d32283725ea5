use egui::Color32;
use serde::{Deserialize, Serialize};

/// Pen and background colors of one signature pad.
///
/// Owned by the pad; changing the background goes through
/// [`crate::SignaturePad::set_background_color`] so the buffer is replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub pen_color: Color32,
    pub background_color: Color32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            pen_color: Color32::BLACK,
            background_color: Color32::WHITE,
        }
    }
}

impl Style {
    pub fn new(pen_color: Color32, background_color: Color32) -> Self {
        Self {
            pen_color: opaque(pen_color),
            background_color: opaque(background_color),
        }
    }
}

/// The pad never uses translucent colors
pub fn opaque(color: Color32) -> Color32 {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    Color32::from_rgb(r, g, b)
}

/// Parse `#rgb` / `#rrggbb` (alpha, if present, is dropped)
pub fn parse_hex_color(hex: &str) -> Option<Color32> {
    Color32::from_hex(hex.trim()).ok().map(opaque)
}

/// `#rrggbb`, lowercase
pub fn to_hex(color: Color32) -> String {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = Style::default();
        assert_eq!(to_hex(style.pen_color), "#000000");
        assert_eq!(to_hex(style.background_color), "#ffffff");
    }

    #[test]
    fn test_hex_round_trip() {
        let color = parse_hex_color("#1a2B3c").unwrap();
        assert_eq!(color, Color32::from_rgb(0x1a, 0x2b, 0x3c));
        assert_eq!(to_hex(color), "#1a2b3c");
    }

    #[test]
    fn test_hex_drops_alpha() {
        let color = parse_hex_color("#ff0000ff").unwrap();
        assert_eq!(color, Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_invalid_hex() {
        assert!(parse_hex_color("red").is_none());
        assert!(parse_hex_color("#12345").is_none());
    }
}
