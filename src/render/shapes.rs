use std::f64::consts::{FRAC_PI_2, PI};

use kurbo::{Arc, Vec2};

use crate::foundation::core::{BezPath, Point, Rect, Rgba8};
use crate::render::surface::DrawSurface;

const ARC_TOLERANCE: f64 = 0.1;

/// Outline of `rect` with quarter-circle corners of `radius`.
///
/// The path starts at the top edge's left interior point and runs clockwise. The rectangle is
/// normalized first, and the radius is clamped into `[0, min(w, h) / 2]` (non-finite radii count
/// as 0), so any input yields a simple closed path. A radius of 0 yields the four rectangle
/// corners joined by straight edges.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    let r = rect.abs();
    let max_radius = (r.width().min(r.height()) / 2.0).max(0.0);
    let radius = if radius.is_finite() {
        radius.clamp(0.0, max_radius)
    } else {
        0.0
    };

    let mut path = BezPath::new();
    path.move_to(Point::new(r.x0 + radius, r.y0));
    path.line_to(Point::new(r.x1 - radius, r.y0));
    corner(
        &mut path,
        Point::new(r.x1 - radius, r.y0 + radius),
        radius,
        -FRAC_PI_2,
    );
    path.line_to(Point::new(r.x1, r.y1 - radius));
    corner(
        &mut path,
        Point::new(r.x1 - radius, r.y1 - radius),
        radius,
        0.0,
    );
    path.line_to(Point::new(r.x0 + radius, r.y1));
    corner(
        &mut path,
        Point::new(r.x0 + radius, r.y1 - radius),
        radius,
        FRAC_PI_2,
    );
    path.line_to(Point::new(r.x0, r.y0 + radius));
    corner(
        &mut path,
        Point::new(r.x0 + radius, r.y0 + radius),
        radius,
        PI,
    );
    path.close_path();
    path
}

// Clockwise (in y-down space) quarter turn around `center` starting at `start_angle`.
fn corner(path: &mut BezPath, center: Point, radius: f64, start_angle: f64) {
    if radius <= 0.0 {
        return;
    }
    let arc = Arc::new(
        center,
        Vec2::new(radius, radius),
        start_angle,
        FRAC_PI_2,
        0.0,
    );
    path.extend(arc.append_iter(ARC_TOLERANCE));
}

/// Fill a rounded rectangle on `surface`.
pub fn fill_rounded_rect<S>(surface: &mut S, rect: Rect, radius: f64, color: Rgba8)
where
    S: DrawSurface + ?Sized,
{
    surface.fill_path(&rounded_rect_path(rect, radius), color);
}

#[cfg(test)]
#[path = "../../tests/unit/render/shapes.rs"]
mod tests;
