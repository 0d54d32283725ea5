//! Vector rendering of a signature.
//!
//! The SVG is built from stroke history directly, never traced from pixels,
//! so it stays resolution independent.

use std::fmt::Write as _;

use egui::Vec2;

use crate::stroke::Stroke;
use crate::style::{self, Style};

/// Render strokes to a standalone SVG document sized in logical units.
pub fn render_svg(
    strokes: &[Stroke],
    style: &Style,
    logical_size: Vec2,
    include_background: bool,
) -> String {
    let (width, height) = (logical_size.x, logical_size.y);
    let mut svg = String::new();

    // Writing into a String cannot fail
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
        num(width),
        num(height),
        num(width),
        num(height)
    );

    if include_background {
        let _ = write!(
            svg,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            style::to_hex(style.background_color)
        );
    }

    for stroke in strokes {
        write_stroke(&mut svg, stroke);
    }

    svg.push_str("</svg>");
    svg
}

fn write_stroke(svg: &mut String, stroke: &Stroke) {
    let color = style::to_hex(stroke.color());
    match stroke.points() {
        [] => {}
        [only] => {
            let _ = write!(
                svg,
                r#"<circle r="{}" cx="{}" cy="{}" fill="{}"/>"#,
                num(stroke.dot_size() / 2.0),
                num(only.pos.x),
                num(only.pos.y),
                color
            );
        }
        points => {
            // One path per segment so width can follow pen speed
            for pair in points.windows(2) {
                let width = (pair[0].width + pair[1].width) / 2.0;
                let _ = write!(
                    svg,
                    concat!(
                        r#"<path d="M {} {} L {} {}" stroke-width="{}" stroke="{}" "#,
                        r#"fill="none" stroke-linecap="round"/>"#
                    ),
                    num(pair[0].pos.x),
                    num(pair[0].pos.y),
                    num(pair[1].pos.x),
                    num(pair[1].pos.y),
                    num(width),
                    color
                );
            }
        }
    }
}

/// Three decimals, trailing zeros trimmed
fn num(value: f32) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_owned(),
        other => other.to_owned(),
    }
}
