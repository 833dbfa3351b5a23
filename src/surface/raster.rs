//! Hard-edged stroking of polylines into an RGBA buffer.
//!
//! Integer path coordinates name pixel centers, so `(3, 3)` is the middle
//! of pixel `(3, 3)`. Colors are written as-is (no blending, no
//! antialiasing) so later exact color comparisons stay valid.

use egui::{Pos2, Vec2};
use image::{Rgba, RgbaImage};

use super::LineCap;
use super::pixels::set_pixel;

/// Resolved stroke parameters for one `stroke()` call.
#[derive(Debug, Clone, Copy)]
pub struct StrokeStyle {
    pub color: Rgba<u8>,
    pub width: f32,
    pub cap: LineCap,
}

impl StrokeStyle {
    fn radius(&self) -> f32 {
        (self.width * 0.5).max(0.5)
    }
}

/// Strokes a sub-path. Interior vertices always get round joins; the ends
/// follow `style.cap` unless the path is closed.
pub fn stroke_polyline(image: &mut RgbaImage, points: &[Pos2], closed: bool, style: &StrokeStyle) {
    let r = style.radius();

    match points {
        [] => {}
        [p] => match style.cap {
            LineCap::Butt => {}
            LineCap::Round => fill_disc(image, *p, r, style.color),
            LineCap::Square => fill_square(image, *p, r, style.color),
        },
        _ => {
            let last = points.len() - 1;
            for (i, pair) in points.windows(2).enumerate() {
                let extend_start = !closed && i == 0 && style.cap == LineCap::Square;
                let extend_end = !closed && i + 1 == last && style.cap == LineCap::Square;
                fill_segment(image, pair[0], pair[1], r, extend_start, extend_end, style.color);
            }
            if closed {
                fill_segment(image, points[last], points[0], r, false, false, style.color);
            }

            for (i, p) in points.iter().enumerate() {
                let is_end = i == 0 || i == last;
                if !is_end || closed || style.cap == LineCap::Round {
                    fill_disc(image, *p, r, style.color);
                }
            }
        }
    }
}

/// Samples the outline of an axis-aligned ellipse as a closed polygon.
pub fn ellipse_points(center: Pos2, radii: Vec2) -> Vec<Pos2> {
    let rx = radii.x.abs();
    let ry = radii.y.abs();
    let approx_perimeter = std::f32::consts::TAU * ((rx * rx + ry * ry) * 0.5).sqrt();
    let segments = ((approx_perimeter / 2.0).ceil() as usize).clamp(8, 720);

    (0..segments)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / segments as f32;
            Pos2::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
        })
        .collect()
}

/// Clipped pixel range covering `[min, max]` on one axis.
fn pixel_span(min: f32, max: f32, limit: u32) -> Option<(u32, u32)> {
    if limit == 0 || max < 0.0 {
        return None;
    }
    let lo = min.ceil().max(0.0) as u32;
    let hi = (max.floor().max(0.0) as u32).min(limit - 1);
    (lo <= hi).then_some((lo, hi))
}

fn for_each_pixel_in(
    image: &mut RgbaImage,
    min: Pos2,
    max: Pos2,
    color: Rgba<u8>,
    mut inside: impl FnMut(Pos2) -> bool,
) {
    let Some((x0, x1)) = pixel_span(min.x, max.x, image.width()) else {
        return;
    };
    let Some((y0, y1)) = pixel_span(min.y, max.y, image.height()) else {
        return;
    };
    for y in y0..=y1 {
        for x in x0..=x1 {
            if inside(Pos2::new(x as f32, y as f32)) {
                set_pixel(image, x, y, color);
            }
        }
    }
}

fn fill_disc(image: &mut RgbaImage, c: Pos2, r: f32, color: Rgba<u8>) {
    let r2 = r * r;
    for_each_pixel_in(image, c - Vec2::splat(r), c + Vec2::splat(r), color, |p| {
        (p - c).length_sq() <= r2
    });
}

fn fill_square(image: &mut RgbaImage, c: Pos2, r: f32, color: Rgba<u8>) {
    for_each_pixel_in(image, c - Vec2::splat(r), c + Vec2::splat(r), color, |p| {
        (p.x - c.x).abs() <= r && (p.y - c.y).abs() <= r
    });
}

fn fill_segment(
    image: &mut RgbaImage,
    a: Pos2,
    b: Pos2,
    r: f32,
    extend_start: bool,
    extend_end: bool,
    color: Rgba<u8>,
) {
    let d = b - a;
    let len = d.length();
    if len <= f32::EPSILON {
        return;
    }
    let dir = d / len;
    let t_min = if extend_start { -r } else { 0.0 };
    let t_max = if extend_end { len + r } else { len };

    let min = a.min(b) - Vec2::splat(2.0 * r);
    let max = a.max(b) + Vec2::splat(2.0 * r);
    for_each_pixel_in(image, min, max, color, |p| {
        let rel = p - a;
        let t = rel.dot(dir);
        if t < t_min || t > t_max {
            return false;
        }
        let perp = rel.x * dir.y - rel.y * dir.x;
        perp.abs() <= r
    });
}
