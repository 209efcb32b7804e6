#![warn(missing_docs)]

//! Math types for the lathe curve and revolution core.
//!
//! Thin wrappers around nalgebra providing the planar types used by the
//! curve editors, the 3D types produced by the revolution mesher, a 2D
//! affine transform for point-set edits, and tolerance constants.

use nalgebra::{Matrix3, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point in the 2D editing plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in the 2D editing plane.
pub type Vec2 = Vector2<f64>;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// Coordinate axis a profile is revolved around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis (vertical lathe, the editor default).
    #[default]
    Y,
    /// The Z axis (planar rotation in the XY plane).
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an [`Axis`] from text fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAxisError(String);

impl fmt::Display for ParseAxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown axis '{}' (expected x, y or z)", self.0)
    }
}

impl std::error::Error for ParseAxisError {}

impl FromStr for Axis {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(ParseAxisError(s.to_string())),
        }
    }
}

/// A 3x3 homogeneous affine transformation of the editing plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform2 {
    /// The underlying 3x3 matrix.
    pub matrix: Matrix3<f64>,
}

impl Transform2 {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Translation by `(dx, dy)`.
    pub fn translation(dx: f64, dy: f64) -> Self {
        let mut m = Matrix3::identity();
        m[(0, 2)] = dx;
        m[(1, 2)] = dy;
        Self { matrix: m }
    }

    /// Non-uniform scale by `(sx, sy)` about the origin.
    pub fn scale(sx: f64, sy: f64) -> Self {
        let mut m = Matrix3::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        Self { matrix: m }
    }

    /// Counter-clockwise rotation by `angle` radians about the origin.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix3::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Uniform scale by `factor` about `center`.
    pub fn scale_about(factor: f64, center: Point2) -> Self {
        Self::translation(center.x, center.y)
            .then(&Self::scale(factor, factor))
            .then(&Self::translation(-center.x, -center.y))
    }

    /// Rotation by `angle` radians about `center`.
    pub fn rotation_about(angle: f64, center: Point2) -> Self {
        Self::translation(center.x, center.y)
            .then(&Self::rotation(angle))
            .then(&Self::translation(-center.x, -center.y))
    }

    /// Compose: `self * other`, so `other` is applied first.
    pub fn then(&self, other: &Transform2) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point2) -> Point2 {
        let v = self.matrix * Vector3::new(p.x, p.y, 1.0);
        Point2::new(v.x, v.y)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec2) -> Vec2 {
        let r = self.matrix * Vector3::new(v.x, v.y, 0.0);
        Vec2::new(r.x, r.y)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in editor units.
    pub linear: f64,
    /// Threshold below which an accumulated length counts as zero.
    pub degenerate: f64,
}

impl Tolerance {
    /// Default tolerances (1e-9 linear, 1e-12 degenerate length).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        degenerate: 1e-12,
    };

    /// Check if two planar points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a vector length is small enough to be treated as degenerate.
    pub fn is_degenerate(&self, length: f64) -> bool {
        length < self.degenerate
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_transform() {
        let t = Transform2::identity();
        let p = Point2::new(1.0, 2.0);
        assert!((t.apply_point(&p) - p).norm() < 1e-12);
    }

    #[test]
    fn test_translation() {
        let t = Transform2::translation(10.0, -20.0);
        let r = t.apply_point(&Point2::new(1.0, 2.0));
        assert!((r.x - 11.0).abs() < 1e-12);
        assert!((r.y + 18.0).abs() < 1e-12);
        // vectors ignore translation
        let v = t.apply_vec(&Vec2::new(1.0, 0.0));
        assert!((v - Vec2::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_90() {
        let t = Transform2::rotation(PI / 2.0);
        let r = t.apply_point(&Point2::new(1.0, 0.0));
        assert!(r.x.abs() < 1e-12);
        assert!((r.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_about_center_keeps_center_fixed() {
        let c = Point2::new(5.0, 5.0);
        let t = Transform2::scale_about(2.0, c);
        assert!((t.apply_point(&c) - c).norm() < 1e-12);
        let r = t.apply_point(&Point2::new(6.0, 5.0));
        assert!((r.x - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_about_center() {
        let t = Transform2::rotation_about(PI, Point2::new(1.0, 1.0));
        let r = t.apply_point(&Point2::new(2.0, 1.0));
        assert!((r.x - 0.0).abs() < 1e-12);
        assert!((r.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverse() {
        let t = Transform2::rotation_about(0.3, Point2::new(4.0, -2.0));
        let inv = t.inverse().unwrap();
        let p = Point2::new(7.0, 3.0);
        assert!((t.then(&inv).apply_point(&p) - p).norm() < 1e-12);
    }

    #[test]
    fn test_axis_parse_and_display() {
        assert_eq!("Y".parse::<Axis>().unwrap(), Axis::Y);
        assert_eq!(" z ".parse::<Axis>().unwrap(), Axis::Z);
        assert!("w".parse::<Axis>().is_err());
        assert_eq!(Axis::X.to_string(), "x");
        assert_eq!(Axis::default(), Axis::Y);
    }

    #[test]
    fn test_tolerance() {
        let tol = Tolerance::DEFAULT;
        assert!(tol.points_equal(&Point2::new(1.0, 1.0), &Point2::new(1.0 + 1e-12, 1.0)));
        assert!(!tol.points_equal(&Point2::new(1.0, 1.0), &Point2::new(1.001, 1.0)));
        assert!(tol.is_degenerate(0.0));
        assert!(!tol.is_degenerate(1e-6));
    }
}
