//! Line and triangle drawing on a [`PixelSink`].
//!
//! Everything here is built on [`interpolate_within`]: the minor axis of a
//! line, the x boundaries of a triangle and the Gouraud intensity are all
//! sampled one integer step at a time between two endpoints. Walks are
//! limited to the sink's canvas ranges, so projected points far off screen
//! cost no more than points on it.
//!
//! Triangles are filled a scanline at a time. Vertices are sorted by y, the
//! short edges (top to middle, middle to bottom) are joined into one boundary
//! and the middle vertex decides which side of the long edge it lies on.

use std::ops::Range;

use cgfs_core::{Color, PixelSink};
use cgfs_math::{interpolate_within, IVec2};

/// Draw a line between two canvas points, both endpoints included.
///
/// Walks the longer axis in integer steps so the line has no gaps at any slope.
/// Only the part of the walk that lies on the canvas is visited.
pub fn draw_line(sink: &mut dyn PixelSink, p0: IVec2, p1: IVec2, color: Color) {
    let dx = (p1.x as i64 - p0.x as i64).abs();
    let dy = (p1.y as i64 - p0.y as i64).abs();

    if dx > dy {
        let (p0, p1) = if p0.x > p1.x { (p1, p0) } else { (p0, p1) };
        for (x, y) in interpolate_within(p0.x, p0.y as f32, p1.x, p1.y as f32, sink.x_range()) {
            sink.put_pixel(x, y.floor() as i32, color);
        }
    } else {
        let (p0, p1) = if p0.y > p1.y { (p1, p0) } else { (p0, p1) };
        for (y, x) in interpolate_within(p0.y, p0.x as f32, p1.y, p1.x as f32, sink.y_range()) {
            sink.put_pixel(x.floor() as i32, y, color);
        }
    }
}

/// Draw the three edges of a triangle.
pub fn draw_wireframe_triangle(
    sink: &mut dyn PixelSink,
    p0: IVec2,
    p1: IVec2,
    p2: IVec2,
    color: Color,
) {
    draw_line(sink, p0, p1, color);
    draw_line(sink, p1, p2, color);
    draw_line(sink, p2, p0, color);
}

/// Fill a triangle with a single color.
pub fn draw_filled_triangle(
    sink: &mut dyn PixelSink,
    p0: IVec2,
    p1: IVec2,
    p2: IVec2,
    color: Color,
) {
    draw_shaded_triangle(sink, [p0, p1, p2], [1.0; 3], color);
}

/// Fill a triangle with Gouraud shading.
///
/// `intensities` holds one value per vertex; it is interpolated down both
/// boundaries and then across every scanline, and scales `color` per pixel.
pub fn draw_shaded_triangle(
    sink: &mut dyn PixelSink,
    points: [IVec2; 3],
    intensities: [f32; 3],
    color: Color,
) {
    let [(p0, h0), (p1, h1), (p2, h2)] = sort_by_y([
        (points[0], intensities[0]),
        (points[1], intensities[1]),
        (points[2], intensities[2]),
    ]);

    if p0.y == p2.y {
        let mut row = [(p0, h0), (p1, h1), (p2, h2)];
        row.sort_by_key(|(p, _)| p.x);
        let [(left, hl), _, (right, hr)] = row;
        fill_span(sink, p0.y, (left.x as f32, hl), (right.x as f32, hr), color);
        return;
    }

    let rows = sink.y_range();
    let x012 = edge_values(p0.y, p0.x as f32, p1.y, p1.x as f32, p2.y, p2.x as f32, rows.clone());
    let h012 = edge_values(p0.y, h0, p1.y, h1, p2.y, h2, rows.clone());
    let x02 = interpolate_within(p0.y, p0.x as f32, p2.y, p2.x as f32, rows.clone());
    let h02 = interpolate_within(p0.y, h0, p2.y, h2, rows);

    let long = x02.iter().zip(&h02).map(|(&(y, x), &(_, h))| (y, x, h));
    let short = x012.iter().zip(&h012).map(|(&(_, x), &(_, h))| (x, h));

    let long_is_left = is_left(p0, p1, p2);
    for ((y, x_long, h_long), (x_short, h_short)) in long.zip(short) {
        let (left, right) = if long_is_left {
            ((x_long, h_long), (x_short, h_short))
        } else {
            ((x_short, h_short), (x_long, h_long))
        };
        fill_span(sink, y, left, right, color);
    }
}

/// Fill row `y` between two `(x, intensity)` boundaries, clipped to the canvas.
fn fill_span(sink: &mut dyn PixelSink, y: i32, left: (f32, f32), right: (f32, f32), color: Color) {
    let (xl, xr) = (left.0.floor() as i32, right.0.floor() as i32);
    for (x, h) in interpolate_within(xl, left.1, xr, right.1, sink.x_range()) {
        sink.put_pixel(x, y, color.adjust_intensity(h));
    }
}

/// Sort vertices, with their attribute, by ascending y.
fn sort_by_y(mut vertices: [(IVec2, f32); 3]) -> [(IVec2, f32); 3] {
    vertices.sort_by_key(|(p, _)| p.y);
    vertices
}

/// Values along the two short edges joined into one top-to-bottom run,
/// restricted to the rows in `rows`.
///
/// The middle vertex ends the first edge and starts the second, so the first
/// edge's value at `y1` is dropped.
fn edge_values(
    y0: i32,
    d0: f32,
    y1: i32,
    d1: f32,
    y2: i32,
    d2: f32,
    rows: Range<i32>,
) -> Vec<(i32, f32)> {
    let mut values = interpolate_within(y0, d0, y1, d1, rows.clone());
    if values.last().is_some_and(|&(y, _)| y == y1) {
        values.pop();
    }
    values.extend(interpolate_within(y1, d1, y2, d2, rows));
    values
}

/// True if the long edge `p0 -> p2` is the left boundary.
///
/// Vertices are sorted by y with `p0.y < p2.y`. Compares the long edge's x at
/// the middle row against `p1.x` without dividing, so it is exact for any
/// integer coordinates.
fn is_left(p0: IVec2, p1: IVec2, p2: IVec2) -> bool {
    let (x0, y0) = (p0.x as i128, p0.y as i128);
    let (x1, y1) = (p1.x as i128, p1.y as i128);
    let (x2, y2) = (p2.x as i128, p2.y as i128);
    (x2 - x0) * (y1 - y0) <= (x1 - x0) * (y2 - y0)
}
