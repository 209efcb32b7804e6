//! Axis-relative remapping of a sampled profile before revolution.

use lathe_math::{Axis, Point2};

/// Points closer than this to the rotation axis are dropped by default.
pub const DEFAULT_MIN_AXIS_DISTANCE: f64 = 5.0;

/// Map editor-space curve samples into the frame the mesher revolves.
///
/// `center` is where the rotation axis crosses the editing plane.
///
/// - [`Axis::Y`]: `(|x - cx|, y - cy)`, i.e. (radius, height).
/// - [`Axis::X`]: `(x - cx, |y - cy|)`, i.e. (height, radius).
/// - [`Axis::Z`]: `(x - cx, y - cy)`, no filtering; this is a planar rotation.
///
/// For the X and Y axes, samples whose radius is below `min_distance` are
/// discarded so the sweep does not collapse onto the axis.
pub fn adjust_profile(
    polyline: &[Point2],
    axis: Axis,
    center: Point2,
    min_distance: f64,
) -> Vec<Point2> {
    polyline
        .iter()
        .filter_map(|p| {
            let dx = p.x - center.x;
            let dy = p.y - center.y;
            match axis {
                Axis::Y => (dx.abs() >= min_distance).then(|| Point2::new(dx.abs(), dy)),
                Axis::X => (dy.abs() >= min_distance).then(|| Point2::new(dx, dy.abs())),
                Axis::Z => Some(Point2::new(dx, dy)),
            }
        })
        .collect()
}
