//! Coordinate transformation between UI and PDF coordinate systems.

use crate::job::Point;

/// Convert UI coordinates (top-left origin, view pixels) to PDF user space
/// (bottom-left origin, points): scale by the view extent, flip the Y axis.
pub fn ui_to_pdf(
    ui_x: f64,
    ui_y: f64,
    view_width: f64,
    view_height: f64,
    page_width: f64,
    page_height: f64,
) -> Point {
    let x = (ui_x / view_width) * page_width;
    let y = page_height - (ui_y / view_height) * page_height;
    Point::new(x, y)
}

/// Convert PDF user-space coordinates back to UI coordinates.
pub fn pdf_to_ui(
    point: Point,
    view_width: f64,
    view_height: f64,
    page_width: f64,
    page_height: f64,
) -> (f64, f64) {
    let ui_x = (point.x / page_width) * view_width;
    let ui_y = (1.0 - point.y / page_height) * view_height;
    (ui_x, ui_y)
}

/// Clamp an anchor so a mark of `mark_width` x `mark_height` stays inside
/// the page.
pub fn clamp_anchor(point: Point, page_width: f64, page_height: f64, mark_width: f64, mark_height: f64) -> Point {
    Point::new(
        point.x.clamp(0.0, (page_width - mark_width).max(0.0)),
        point.y.clamp(0.0, (page_height - mark_height).max(0.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_origin_maps_to_page_top_left() {
        let p = ui_to_pdf(0.0, 0.0, 1080.0, 1920.0, 595.0, 842.0);
        assert!((p.x - 0.0).abs() < 0.001);
        assert!((p.y - 842.0).abs() < 0.001);
    }

    #[test]
    fn ui_bottom_right_maps_to_page_bottom_right() {
        let p = ui_to_pdf(1080.0, 1920.0, 1080.0, 1920.0, 595.0, 842.0);
        assert!((p.x - 595.0).abs() < 0.001);
        assert!((p.y - 0.0).abs() < 0.001);
    }

    #[test]
    fn checkmark_anchor_clamps_to_a4_margin() {
        // Glyph extent is 40 units, so (600, 900) on A4 clamps to (555, 802).
        let clamped = clamp_anchor(Point::new(600.0, 900.0), 595.0, 842.0, 40.0, 40.0);
        assert_eq!(clamped, Point::new(555.0, 802.0));
    }

    #[test]
    fn clamp_keeps_in_bounds_points_unchanged() {
        let p = Point::new(100.0, 200.0);
        assert_eq!(clamp_anchor(p, 595.0, 842.0, 40.0, 40.0), p);
    }
}
