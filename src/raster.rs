use egui::{Color32, Pos2, Vec2};
use image::{Rgba, RgbaImage};

use crate::geometry;
use crate::stroke::Stroke;

/// Half a physical pixel, so hairline strokes still cover something
const MIN_RADIUS: f32 = 0.5;

/// RGBA backing buffer of the signature canvas.
///
/// Strokes live in logical units; the buffer holds `ceil(logical * ratio)`
/// physical pixels. Coverage is binary (no antialiasing), so a stroke paints
/// the same pixels whatever the background is.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    image: RgbaImage,
    logical_size: Vec2,
    pixels_per_point: f32,
    revision: u64,
}

impl PixelBuffer {
    pub fn new(logical_size: Vec2, pixels_per_point: f32, background: Color32) -> Self {
        let (logical_size, pixels_per_point) = clamp_dimensions(logical_size, pixels_per_point);
        let [width, height] = Self::physical_size_for(logical_size, pixels_per_point);
        Self {
            image: RgbaImage::from_pixel(width, height, to_rgba(background)),
            logical_size,
            pixels_per_point,
            revision: 0,
        }
    }

    /// Physical pixel dimensions for a logical size at a given ratio
    pub fn physical_size_for(logical_size: Vec2, pixels_per_point: f32) -> [u32; 2] {
        let width = (logical_size.x * pixels_per_point).ceil().max(1.0) as u32;
        let height = (logical_size.y * pixels_per_point).ceil().max(1.0) as u32;
        [width, height]
    }

    /// Whether a buffer built for these dimensions would be identical in
    /// size to this one. Doesn't allocate.
    pub fn has_dimensions(&self, logical_size: Vec2, pixels_per_point: f32) -> bool {
        let wanted = clamp_dimensions(logical_size, pixels_per_point);
        (self.logical_size, self.pixels_per_point) == wanted
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn logical_size(&self) -> Vec2 {
        self.logical_size
    }

    pub fn pixels_per_point(&self) -> f32 {
        self.pixels_per_point
    }

    /// Bumped on every mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color32 {
        let Rgba([r, g, b, a]) = *self.image.get_pixel(x, y);
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    /// Paint every pixel with `color`
    pub fn fill(&mut self, color: Color32) {
        let rgba = to_rgba(color);
        for pixel in self.image.pixels_mut() {
            *pixel = rgba;
        }
        self.revision += 1;
    }

    /// Rasterize one stroke on top of the current contents
    pub fn draw_stroke(&mut self, stroke: &Stroke) {
        let scale = self.pixels_per_point;
        let color = to_rgba(stroke.color());
        let points = stroke.points();

        match points {
            [] => return,
            [only] => {
                let center = scaled(only.pos, scale);
                let radius = (stroke.dot_size() / 2.0 * scale).max(MIN_RADIUS);
                self.fill_capsule(center, radius, center, radius, color);
            }
            _ => {
                for pair in points.windows(2) {
                    let a = scaled(pair[0].pos, scale);
                    let b = scaled(pair[1].pos, scale);
                    let ra = (pair[0].width / 2.0 * scale).max(MIN_RADIUS);
                    let rb = (pair[1].width / 2.0 * scale).max(MIN_RADIUS);
                    self.fill_capsule(a, ra, b, rb, color);
                }
            }
        }
        self.revision += 1;
    }

    /// Paint pixels whose centers fall inside the segment `a..b` swept by a
    /// radius interpolated from `ra` to `rb`.
    fn fill_capsule(&mut self, a: Pos2, ra: f32, b: Pos2, rb: f32, color: Rgba<u8>) {
        let reach = ra.max(rb);
        let bounds = geometry::calculate_bounds([a, b], reach);
        let (width, height) = (self.image.width() as i64, self.image.height() as i64);

        let x0 = (bounds.min.x.floor() as i64).max(0);
        let y0 = (bounds.min.y.floor() as i64).max(0);
        let x1 = (bounds.max.x.ceil() as i64).min(width - 1);
        let y1 = (bounds.max.y.ceil() as i64).min(height - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let (distance, t) = geometry::project_onto_segment(center, a, b);
                if distance <= ra + (rb - ra) * t {
                    self.image.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    /// Copy out as an egui image for uploading to the GPU
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.image.width() as usize, self.image.height() as usize],
            self.image.as_raw(),
        )
    }
}

/// At least one logical unit per side, and never fewer pixels than points
fn clamp_dimensions(logical_size: Vec2, pixels_per_point: f32) -> (Vec2, f32) {
    (logical_size.max(Vec2::splat(1.0)), pixels_per_point.max(1.0))
}

fn scaled(pos: Pos2, scale: f32) -> Pos2 {
    Pos2::new(pos.x * scale, pos.y * scale)
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}
