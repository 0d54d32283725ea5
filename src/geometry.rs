use egui::{Pos2, Rect};

/// Calculate distance from a point to a line segment, plus the clamped
/// parameter `t` (0 at `line_start`, 1 at `line_end`) of the closest point.
pub(crate) fn project_onto_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> (f32, f32) {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let len_sq = line_vec.length_sq();
    if len_sq == 0.0 {
        return (point_vec.length(), 0.0);
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / len_sq).clamp(0.0, 1.0);
    let projection = line_start + line_vec * t;
    ((point - projection).length(), t)
}

/// Calculate the bounding box for a set of points
pub(crate) fn calculate_bounds(points: impl IntoIterator<Item = Pos2>, padding: f32) -> Rect {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    let mut any = false;

    for point in points {
        any = true;
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    if !any {
        return Rect::NOTHING;
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}
