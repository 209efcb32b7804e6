#![warn(missing_docs)]

//! Weighted control points and the ordered point sets the curve editors own.
//!
//! # Key types
//!
//! - [`ControlPoint`]: planar point with a rational weight
//! - [`Homogeneous`]: a control point lifted to `(w·x, w·y, w)`
//! - [`PointSet`]: ordered, index-addressed control polygon with selection

use lathe_math::{Point2, Transform2};
use serde::{Deserialize, Serialize};

/// Smallest weight a control point may carry. Setters clamp to this value.
pub const MIN_WEIGHT: f64 = 0.1;

fn default_weight() -> f64 {
    1.0
}

// =============================================================================
// Control points
// =============================================================================

/// A 2D control point with a rational weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Rational weight (> 0). Uniform weights of 1 give a polynomial curve.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl ControlPoint {
    /// Create a control point with unit weight.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, weight: 1.0 }
    }

    /// Create a control point with the given weight, clamped to [`MIN_WEIGHT`].
    pub fn weighted(x: f64, y: f64, weight: f64) -> Self {
        Self {
            x,
            y,
            weight: clamp_weight(weight),
        }
    }

    /// Position in the editing plane.
    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Lift to homogeneous coordinates `(w·x, w·y, w)`.
    pub fn to_homogeneous(&self) -> Homogeneous {
        Homogeneous {
            wx: self.weight * self.x,
            wy: self.weight * self.y,
            w: self.weight,
        }
    }
}

impl From<Point2> for ControlPoint {
    fn from(p: Point2) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Clamp a requested weight to the valid range.
///
/// Non-finite requests collapse to [`MIN_WEIGHT`].
pub fn clamp_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(MIN_WEIGHT)
    } else {
        MIN_WEIGHT
    }
}

/// Whether any point carries a weight other than exactly 1.
pub fn is_rational(points: &[ControlPoint]) -> bool {
    points.iter().any(|p| p.weight != 1.0)
}

/// A control point in homogeneous coordinates.
///
/// Arithmetic on un-divided values happens only on this type; call
/// [`Homogeneous::project`] to get back to the editing plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homogeneous {
    /// Weighted x coordinate.
    pub wx: f64,
    /// Weighted y coordinate.
    pub wy: f64,
    /// Weight.
    pub w: f64,
}

impl Homogeneous {
    /// The zero element, used as an accumulator.
    pub const ZERO: Self = Self {
        wx: 0.0,
        wy: 0.0,
        w: 0.0,
    };

    /// Linear interpolation `(1-t)·a + t·b`.
    pub fn lerp(a: &Homogeneous, b: &Homogeneous, t: f64) -> Homogeneous {
        let s = 1.0 - t;
        Homogeneous {
            wx: s * a.wx + t * b.wx,
            wy: s * a.wy + t * b.wy,
            w: s * a.w + t * b.w,
        }
    }

    /// Accumulate `factor · other` into `self`.
    pub fn add_scaled(&mut self, other: &Homogeneous, factor: f64) {
        self.wx += factor * other.wx;
        self.wy += factor * other.wy;
        self.w += factor * other.w;
    }

    /// Perspective division back to the plane. A zero weight maps to the origin.
    pub fn project(&self) -> Point2 {
        if self.w.abs() < 1e-30 {
            Point2::origin()
        } else {
            Point2::new(self.wx / self.w, self.wy / self.w)
        }
    }

    /// Convert back into a weighted control point.
    pub fn to_control_point(&self) -> ControlPoint {
        let p = self.project();
        ControlPoint {
            x: p.x,
            y: p.y,
            weight: self.w,
        }
    }
}

// =============================================================================
// Point set
// =============================================================================

/// Axis-aligned bounds of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum x.
    pub min_x: f64,
    /// Minimum y.
    pub min_y: f64,
    /// Maximum x.
    pub max_x: f64,
    /// Maximum y.
    pub max_y: f64,
}

impl BoundingBox {
    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Ordered control points owned by one editing session.
///
/// Insertion order is the curve's parametrization order. Points are
/// addressed by index; removing a point shifts every greater index down by
/// one, and the tracked selection is revalidated accordingly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointSet {
    points: Vec<ControlPoint>,
    #[serde(skip)]
    selected: Option<usize>,
}

impl PointSet {
    /// Create an empty point set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points in curve order.
    pub fn as_slice(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Point at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ControlPoint> {
        self.points.get(index)
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ControlPoint> {
        self.points.iter()
    }

    /// Positions of all points, weights dropped.
    pub fn positions(&self) -> Vec<Point2> {
        self.points.iter().map(ControlPoint::position).collect()
    }

    /// Append a point and return its index.
    pub fn add(&mut self, x: f64, y: f64, weight: f64) -> usize {
        self.points.push(ControlPoint::weighted(x, y, weight));
        self.points.len() - 1
    }

    /// Remove the point at `index`.
    ///
    /// Returns `false` (and changes nothing) when `index` is out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.points.len() {
            return false;
        }
        self.points.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        true
    }

    /// Move the point at `index` to `(x, y)`.
    pub fn move_point(&mut self, index: usize, x: f64, y: f64) -> bool {
        match self.points.get_mut(index) {
            Some(p) => {
                p.x = x;
                p.y = y;
                true
            }
            None => false,
        }
    }

    /// Set the weight of the point at `index`, clamped to [`MIN_WEIGHT`].
    pub fn set_weight(&mut self, index: usize, weight: f64) -> bool {
        match self.points.get_mut(index) {
            Some(p) => {
                p.weight = clamp_weight(weight);
                true
            }
            None => false,
        }
    }

    /// Find the topmost point within `threshold` of `(x, y)`.
    ///
    /// Searches from the highest index down so the most recently added point
    /// wins when points overlap.
    pub fn find_near(&self, x: f64, y: f64, threshold: f64) -> Option<usize> {
        let target = Point2::new(x, y);
        self.points
            .iter()
            .enumerate()
            .rev()
            .find(|(_, p)| (p.position() - target).norm() <= threshold)
            .map(|(i, _)| i)
    }

    /// Mark `index` as selected. Returns `false` when out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.points.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Currently selected index.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Remove every point and the selection.
    pub fn clear(&mut self) {
        self.points.clear();
        self.selected = None;
    }

    /// Arithmetic mean of the positions, `None` when empty.
    pub fn centroid(&self) -> Option<Point2> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point2::new(sx / n, sy / n))
    }

    /// Axis-aligned bounds, `None` when empty.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.points.first()?;
        let init = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(self.points.iter().fold(init, |b, p| BoundingBox {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    /// Replace every position with `f(position)`. Weights are untouched.
    pub fn transform_all<F>(&mut self, mut f: F)
    where
        F: FnMut(Point2) -> Point2,
    {
        for p in &mut self.points {
            let q = f(p.position());
            p.x = q.x;
            p.y = q.y;
        }
    }

    /// Apply an affine transform to every position.
    pub fn apply_transform(&mut self, t: &Transform2) {
        self.transform_all(|p| t.apply_point(&p));
    }

    /// Uniform scale about `center` (the centroid when `None`).
    pub fn scale(&mut self, factor: f64, center: Option<Point2>) {
        if let Some(c) = center.or_else(|| self.centroid()) {
            self.apply_transform(&Transform2::scale_about(factor, c));
        }
    }

    /// Translate every point by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.apply_transform(&Transform2::translation(dx, dy));
    }

    /// Rotate by `angle` radians about `center` (the centroid when `None`).
    pub fn rotate(&mut self, angle: f64, center: Option<Point2>) {
        if let Some(c) = center.or_else(|| self.centroid()) {
            self.apply_transform(&Transform2::rotation_about(angle, c));
        }
    }

    /// One-shot owned copy of the points, without the selection.
    ///
    /// Used when one editor imports another editor's curve: the two sets
    /// never share storage afterwards.
    pub fn snapshot(&self) -> PointSet {
        PointSet {
            points: self.points.clone(),
            selected: None,
        }
    }
}

impl From<Vec<ControlPoint>> for PointSet {
    fn from(points: Vec<ControlPoint>) -> Self {
        Self {
            points,
            selected: None,
        }
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a ControlPoint;
    type IntoIter = std::slice::Iter<'a, ControlPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn square() -> PointSet {
        let mut set = PointSet::new();
        set.add(0.0, 0.0, 1.0);
        set.add(10.0, 0.0, 1.0);
        set.add(10.0, 10.0, 1.0);
        set.add(0.0, 10.0, 1.0);
        set
    }

    #[test]
    fn test_add_returns_index() {
        let mut set = PointSet::new();
        assert_eq!(set.add(1.0, 2.0, 1.0), 0);
        assert_eq!(set.add(3.0, 4.0, 2.0), 1);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap().weight, 2.0);
    }

    #[test]
    fn test_weight_clamped() {
        let mut set = PointSet::new();
        let i = set.add(0.0, 0.0, -3.0);
        assert_eq!(set.get(i).unwrap().weight, MIN_WEIGHT);
        assert!(set.set_weight(i, 0.01));
        assert_eq!(set.get(i).unwrap().weight, MIN_WEIGHT);
        assert!(set.set_weight(i, f64::NAN));
        assert_eq!(set.get(i).unwrap().weight, MIN_WEIGHT);
        assert!(!set.set_weight(5, 2.0));
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut set = square();
        let before = set.clone();
        assert!(!set.remove(4));
        assert_eq!(set, before);
    }

    #[test]
    fn test_remove_shifts_selection() {
        let mut set = square();
        assert!(set.select(3));
        assert!(set.remove(1));
        assert_eq!(set.selected(), Some(2));
        assert_eq!(set.get(1).unwrap().position(), Point2::new(10.0, 10.0));

        assert!(set.remove(2));
        assert_eq!(set.selected(), None);

        assert!(set.select(0));
        assert!(set.remove(1));
        assert_eq!(set.selected(), Some(0));
    }

    #[test]
    fn test_move_point() {
        let mut set = square();
        assert!(set.move_point(2, 5.0, 6.0));
        assert_eq!(set.get(2).unwrap().position(), Point2::new(5.0, 6.0));
        assert!(!set.move_point(9, 0.0, 0.0));
    }

    #[test]
    fn test_find_near() {
        let mut set = PointSet::new();
        set.add(0.0, 0.0, 1.0);
        set.add(100.0, 100.0, 1.0);
        assert_eq!(set.find_near(1.0, 1.0, 10.0), Some(0));
        assert_eq!(set.find_near(200.0, 200.0, 10.0), None);
    }

    #[test]
    fn test_find_near_prefers_topmost() {
        let mut set = PointSet::new();
        set.add(0.0, 0.0, 1.0);
        set.add(2.0, 0.0, 1.0);
        assert_eq!(set.find_near(1.0, 0.0, 5.0), Some(1));
        // boundary distance is inclusive
        assert_eq!(set.find_near(-3.0, 0.0, 3.0), Some(0));
    }

    #[test]
    fn test_centroid_and_bounds() {
        let set = square();
        let c = set.centroid().unwrap();
        assert!((c - Point2::new(5.0, 5.0)).norm() < 1e-12);
        let b = set.bounding_box().unwrap();
        assert_eq!(b.width(), 10.0);
        assert_eq!(b.height(), 10.0);

        let empty = PointSet::new();
        assert!(empty.centroid().is_none());
        assert!(empty.bounding_box().is_none());
    }

    #[test]
    fn test_scale_about_centroid() {
        let mut set = square();
        set.scale(2.0, None);
        let b = set.bounding_box().unwrap();
        assert!((b.min_x + 5.0).abs() < 1e-12);
        assert!((b.max_x - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_translate_and_rotate() {
        let mut set = square();
        set.translate(1.0, -1.0);
        assert_eq!(set.get(0).unwrap().position(), Point2::new(1.0, -1.0));

        let mut set = square();
        set.rotate(PI / 2.0, Some(Point2::origin()));
        let p = set.get(1).unwrap();
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_keeps_weights() {
        let mut set = PointSet::new();
        set.add(1.0, 1.0, 3.0);
        set.transform_all(|p| Point2::new(p.x * 2.0, p.y));
        let p = set.get(0).unwrap();
        assert_eq!((p.x, p.weight), (2.0, 3.0));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut original = square();
        original.select(1);
        let mut copy = original.snapshot();
        assert_eq!(copy.selected(), None);
        copy.move_point(0, 99.0, 99.0);
        assert_eq!(original.get(0).unwrap().position(), Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_homogeneous_round_trip() {
        let p = ControlPoint::weighted(2.0, -4.0, 0.5);
        let h = p.to_homogeneous();
        assert_eq!((h.wx, h.wy, h.w), (1.0, -2.0, 0.5));
        assert_eq!(h.to_control_point(), p);
        assert_eq!(Homogeneous::ZERO.project(), Point2::origin());
    }

    #[test]
    fn test_is_rational() {
        let set = square();
        assert!(!is_rational(set.as_slice()));
        let mut set = set;
        set.set_weight(2, 2.0);
        assert!(is_rational(set.as_slice()));
    }

    #[test]
    fn test_from_vec() {
        let pts: Vec<ControlPoint> =
            vec![ControlPoint::new(1.0, 2.0), ControlPoint::weighted(3.0, 4.0, 2.0)];
        let set = PointSet::from(pts);
        assert_eq!(set.iter().map(|p| p.weight).sum::<f64>(), 3.0);
    }
}
