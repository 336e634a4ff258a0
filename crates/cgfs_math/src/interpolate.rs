//! Scalar helpers.

use std::ops::Range;

/// Clamp `x` into `[min, max]`.
#[inline]
pub fn clamp(x: f32, min: f32, max: f32) -> f32 {
    x.max(min).min(max)
}

/// Linearly interpolate a dependent value `d` over the integer range `i0..=i1`.
///
/// Returns one value per integer step, so `i1 - i0 + 1` values in total. The
/// first value is exactly `d0` and the last exactly `d1`. When `i0 == i1` the
/// result is `[d0]`, which avoids a division by zero for degenerate edges.
///
/// This is the primitive behind line drawing and scanline filling: x along an
/// edge, y along a line and per-vertex intensity are all produced by it.
/// Callers order their endpoints; `i0 > i1` yields an empty vector.
pub fn interpolate(i0: i32, d0: f32, i1: i32, d1: f32) -> Vec<f32> {
    if i0 == i1 {
        return vec![d0];
    }
    if i0 > i1 {
        return Vec::new();
    }

    let steps = (i1 as i64 - i0 as i64) as usize;
    let slope = (d1 - d0) / steps as f32;

    let mut values = Vec::with_capacity(steps + 1);
    values.extend((0..steps).map(|k| d0 + slope * k as f32));
    values.push(d1);
    values
}

/// [`interpolate`] restricted to the independent values inside `bounds`.
///
/// Returns `(i, d)` pairs for `i` in both `i0..=i1` and `bounds`, with the same
/// `d` that [`interpolate`] produces at that step. Work and memory are bounded
/// by `bounds`, so endpoints far outside a canvas cost nothing extra.
pub fn interpolate_within(
    i0: i32,
    d0: f32,
    i1: i32,
    d1: f32,
    bounds: Range<i32>,
) -> Vec<(i32, f32)> {
    let first = i0.max(bounds.start);
    let last = i1.min(bounds.end.saturating_sub(1));
    if first > last {
        return Vec::new();
    }
    if i0 == i1 {
        return vec![(i0, d0)];
    }

    let steps = i1 as i64 - i0 as i64;
    let slope = (d1 - d0) / steps as f32;

    (first..=last)
        .map(|i| {
            let d = if i == i1 {
                d1
            } else {
                d0 + slope * (i as i64 - i0 as i64) as f32
            };
            (i, d)
        })
        .collect()
}
