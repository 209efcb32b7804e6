#![warn(missing_docs)]

//! B-spline and NURBS curve evaluation for the lathe core.
//!
//! Planar curves are defined by a slice of [`ControlPoint`]s, a polynomial
//! degree and a [`KnotVector`]. The editors always use clamped-uniform knot
//! vectors, so the curve touches its first and last control points.
//!
//! # Algorithms
//!
//! - **Cox-de Boor** basis functions, evaluated bottom-up as a triangular table
//! - **Boehm's algorithm** for knot insertion (refinement)
//! - **Derivative curves** as a degree-lowered B-spline over the inner knots

use std::ops::Deref;

use lathe_math::{Point2, Vec2};
use lathe_points::{ControlPoint, Homogeneous};
use thiserror::Error;
use tracing::warn;

/// Errors from knot-vector construction and refinement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// Not enough control points for the requested degree.
    #[error("degree {degree} needs at least {required} control points, got {actual}")]
    InsufficientPoints {
        /// Requested degree.
        degree: usize,
        /// Minimum number of points (`degree + 1`).
        required: usize,
        /// Number of points supplied.
        actual: usize,
    },

    /// Knot values decrease somewhere or are not finite.
    #[error("knot vector is not non-decreasing at index {0}")]
    NonMonotonicKnots(usize),

    /// Knot count does not match `n + degree + 1`.
    #[error("invalid knot vector: len={actual} but expected {expected}")]
    KnotCountMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// A knot to insert lies outside the open parameter domain.
    #[error("knot {value} lies outside the open domain ({start}, {end})")]
    KnotOutOfDomain {
        /// Requested knot value.
        value: f64,
        /// Domain start `knots[degree]`.
        start: f64,
        /// Domain end `knots[n]`.
        end: f64,
    },
}

// =============================================================================
// Knot vectors
// =============================================================================

/// A non-decreasing sequence of knot values.
#[derive(Debug, Clone, PartialEq)]
pub struct KnotVector(Vec<f64>);

impl KnotVector {
    /// Wrap raw knot values, checking that they never decrease.
    pub fn new(knots: Vec<f64>) -> Result<Self, CurveError> {
        check_monotone(&knots)?;
        Ok(Self(knots))
    }

    /// Clamped-uniform knots for `n` control points of the given degree.
    ///
    /// The first and last `degree + 1` knots are repeated and the interior
    /// knots step by 1, giving the domain `[0, n - degree]`.
    pub fn clamped_uniform(n: usize, degree: usize) -> Result<Self, CurveError> {
        if n < degree + 1 {
            return Err(CurveError::InsufficientPoints {
                degree,
                required: degree + 1,
                actual: n,
            });
        }
        let end = (n - degree) as f64;
        let mut knots = Vec::with_capacity(n + degree + 1);
        knots.extend(std::iter::repeat(0.0).take(degree + 1));
        knots.extend((1..n - degree).map(|i| i as f64));
        knots.extend(std::iter::repeat(end).take(degree + 1));
        Ok(Self(knots))
    }

    /// The knot values.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Valid parameter domain `(knots[degree], knots[n])` for this degree.
    ///
    /// `None` when the vector is too short to hold a curve of that degree.
    pub fn domain(&self, degree: usize) -> Option<(f64, f64)> {
        let n = self.0.len().checked_sub(degree + 1)?;
        if n <= degree {
            return None;
        }
        Some((self.0[degree], self.0[n]))
    }

    /// The knot vector without its first and last entries.
    ///
    /// This is the knot vector of the derivative curve.
    pub fn interior(&self) -> KnotVector {
        match self.0.len() {
            0..=2 => KnotVector(Vec::new()),
            len => KnotVector(self.0[1..len - 1].to_vec()),
        }
    }

    /// Consume into the raw knot values.
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for KnotVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

/// Knot values must be finite and never decrease.
fn check_monotone(knots: &[f64]) -> Result<(), CurveError> {
    if let Some(i) = knots.iter().position(|k| !k.is_finite()) {
        return Err(CurveError::NonMonotonicKnots(i));
    }
    if let Some(i) = (1..knots.len()).find(|&i| knots[i] < knots[i - 1]) {
        return Err(CurveError::NonMonotonicKnots(i));
    }
    Ok(())
}

/// Check that `knots` can carry `n_points` control points of `degree`:
/// enough points, length `n_points + degree + 1`, finite non-decreasing
/// values.
fn validate_knots(knots: &[f64], n_points: usize, degree: usize) -> Result<(), CurveError> {
    if n_points < degree + 1 {
        return Err(CurveError::InsufficientPoints {
            degree,
            required: degree + 1,
            actual: n_points,
        });
    }
    let expected = n_points + degree + 1;
    if knots.len() != expected {
        return Err(CurveError::KnotCountMismatch {
            expected,
            actual: knots.len(),
        });
    }
    check_monotone(knots)
}

// =============================================================================
// Basis functions
// =============================================================================

/// Index of the last span with non-zero length.
fn last_nonempty_span(knots: &[f64]) -> Option<usize> {
    (0..knots.len().saturating_sub(1))
        .rev()
        .find(|&j| knots[j] < knots[j + 1])
}

/// Degree-0 basis: the half-open indicator of span `j`.
///
/// The closing parameter value belongs to the last non-empty span so the
/// curve end evaluates correctly.
fn degree_zero(j: usize, t: f64, knots: &[f64], last_span: Option<usize>) -> f64 {
    if knots[j] <= t && t < knots[j + 1] {
        1.0
    } else if Some(j) == last_span && t == knots[knots.len() - 1] {
        1.0
    } else {
        0.0
    }
}

/// One Cox-de Boor step: `N[j,k]` from `N[j,k-1]` (`lo`) and `N[j+1,k-1]` (`hi`).
///
/// Terms whose knot-span denominator is zero are omitted.
fn raise(j: usize, k: usize, t: f64, knots: &[f64], lo: f64, hi: f64) -> f64 {
    let mut value = 0.0;
    let d_left = knots[j + k] - knots[j];
    if d_left != 0.0 {
        value += (t - knots[j]) / d_left * lo;
    }
    let d_right = knots[j + k + 1] - knots[j + 1];
    if d_right != 0.0 {
        value += (knots[j + k + 1] - t) / d_right * hi;
    }
    value
}

/// Value of basis function `N[i, degree]` at `t` (Cox-de Boor).
///
/// Returns 0 when `i` has no complete support in `knots`.
pub fn basis(i: usize, degree: usize, t: f64, knots: &[f64]) -> f64 {
    if i + degree + 1 >= knots.len() {
        return 0.0;
    }
    let last_span = last_nonempty_span(knots);
    let mut n: Vec<f64> = (0..=degree)
        .map(|j| degree_zero(i + j, t, knots, last_span))
        .collect();
    for k in 1..=degree {
        for j in 0..=degree - k {
            n[j] = raise(i + j, k, t, knots, n[j], n[j + 1]);
        }
    }
    n[0]
}

/// All `knots.len() - degree - 1` basis function values at `t`.
pub fn basis_functions(degree: usize, t: f64, knots: &[f64]) -> Vec<f64> {
    let m = knots.len();
    if m < degree + 2 {
        return Vec::new();
    }
    let last_span = last_nonempty_span(knots);
    let mut n: Vec<f64> = (0..m - 1)
        .map(|j| degree_zero(j, t, knots, last_span))
        .collect();
    for k in 1..=degree {
        for j in 0..m - 1 - k {
            n[j] = raise(j, k, t, knots, n[j], n[j + 1]);
        }
    }
    n.truncate(m - 1 - degree);
    n
}

// =============================================================================
// Evaluation
// =============================================================================

/// Clamp `t` into the curve domain and compute the basis values there.
fn weights_at(n_points: usize, t: f64, degree: usize, knots: &[f64]) -> Option<Vec<f64>> {
    if let Err(err) = validate_knots(knots, n_points, degree) {
        warn!(%err, "cannot evaluate B-spline");
        return None;
    }
    let t = t.clamp(knots[degree], knots[n_points]);
    Some(basis_functions(degree, t, knots))
}

fn evaluate_positions(points: &[Point2], t: f64, degree: usize, knots: &[f64]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let basis = weights_at(points.len(), t, degree, knots)?;
    let mut point = Point2::origin();
    for (b, p) in basis.iter().zip(points) {
        point.x += b * p.x;
        point.y += b * p.y;
    }
    Some(point)
}

/// Evaluate `Σ N[i,degree](t)·p[i]`, ignoring weights.
///
/// Returns `None` for an empty control polygon (or a knot vector of the
/// wrong length). `t` is clamped into `[knots[degree], knots[n]]`.
pub fn evaluate(points: &[ControlPoint], t: f64, degree: usize, knots: &[f64]) -> Option<Point2> {
    let positions: Vec<Point2> = points.iter().map(ControlPoint::position).collect();
    evaluate_positions(&positions, t, degree, knots)
}

/// Rational (NURBS) evaluation: the B-spline sum in homogeneous space,
/// followed by the perspective division.
pub fn evaluate_rational(
    points: &[ControlPoint],
    t: f64,
    degree: usize,
    knots: &[f64],
) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let basis = weights_at(points.len(), t, degree, knots)?;
    let mut acc = Homogeneous::ZERO;
    for (b, p) in basis.iter().zip(points) {
        acc.add_scaled(&p.to_homogeneous(), *b);
    }
    Some(acc.project())
}

fn sample_with<F>(points: &[ControlPoint], degree: usize, resolution: usize, eval: F) -> Vec<Point2>
where
    F: Fn(&[ControlPoint], f64, usize, &[f64]) -> Option<Point2>,
{
    let knots = match KnotVector::clamped_uniform(points.len(), degree) {
        Ok(knots) => knots,
        Err(err) => {
            warn!(%err, "not enough control points to sample B-spline");
            return Vec::new();
        }
    };
    let Some((start, end)) = knots.domain(degree) else {
        return Vec::new();
    };
    let resolution = resolution.max(1);
    let step = (end - start) / resolution as f64;

    let mut samples: Vec<Point2> = (0..resolution)
        .filter_map(|i| eval(points, start + step * i as f64, degree, knots.as_slice()))
        .collect();
    // exact final knot, independent of the step arithmetic
    samples.extend(eval(points, end, degree, knots.as_slice()));
    samples
}

/// Sample the clamped-uniform B-spline at `resolution + 1` parameters.
///
/// Needs at least `degree + 1` points; otherwise a warning is logged and the
/// result is empty. The last sample is taken exactly at the final knot.
pub fn sample(points: &[ControlPoint], degree: usize, resolution: usize) -> Vec<Point2> {
    sample_with(points, degree, resolution, evaluate)
}

/// Like [`sample`], but through [`evaluate_rational`].
pub fn sample_rational(points: &[ControlPoint], degree: usize, resolution: usize) -> Vec<Point2> {
    sample_with(points, degree, resolution, evaluate_rational)
}

/// First derivative at `t`.
///
/// Builds the `n - 1` derivative control points
/// `degree / (knots[i+degree+1] - knots[i+1]) · (p[i+1] - p[i])` (zero where
/// the denominator vanishes) and evaluates them as a degree-`(degree - 1)`
/// spline over `knots[1..len-1]`. Zero when `degree < 1` or fewer than two
/// points.
pub fn derivative(points: &[ControlPoint], t: f64, degree: usize, knots: &[f64]) -> Vec2 {
    if degree < 1 || points.len() < 2 {
        return Vec2::zeros();
    }
    if let Err(err) = validate_knots(knots, points.len(), degree) {
        warn!(%err, "cannot differentiate B-spline");
        return Vec2::zeros();
    }
    let p = degree as f64;
    let derived: Vec<Point2> = points
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let denom = knots[i + degree + 1] - knots[i + 1];
            if denom == 0.0 {
                Point2::origin()
            } else {
                Point2::from((w[1].position() - w[0].position()) * (p / denom))
            }
        })
        .collect();
    evaluate_positions(&derived, t, degree - 1, &knots[1..knots.len() - 1])
        .map(|d| d.coords)
        .unwrap_or_else(Vec2::zeros)
}

// =============================================================================
// Knot insertion
// =============================================================================

/// Insert the knot `u` once using Boehm's algorithm.
///
/// Returns one more control point and the refined knot vector; the curve is
/// unchanged. Affected points are blended in homogeneous space, so weighted
/// curves are preserved too. `u` must lie strictly inside the domain.
pub fn insert_knot(
    points: &[ControlPoint],
    knots: &[f64],
    degree: usize,
    u: f64,
) -> Result<(Vec<ControlPoint>, KnotVector), CurveError> {
    validate_knots(knots, points.len(), degree)?;
    let n = points.len();
    let (start, end) = (knots[degree], knots[n]);
    if !(start < u && u < end) {
        return Err(CurveError::KnotOutOfDomain {
            value: u,
            start,
            end,
        });
    }

    // smallest k >= degree with knots[k] >= u; exists because u < knots[n]
    let k = (degree..knots.len()).find(|&k| knots[k] >= u).unwrap_or(n);
    let span = k - 1;

    let mut new_pts = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let pt = if i + degree <= span {
            points[i]
        } else if i <= span {
            let alpha = (u - knots[i]) / (knots[i + degree] - knots[i]);
            Homogeneous::lerp(
                &points[i - 1].to_homogeneous(),
                &points[i].to_homogeneous(),
                alpha,
            )
            .to_control_point()
        } else {
            points[i - 1]
        };
        new_pts.push(pt);
    }

    let mut new_knots = Vec::with_capacity(knots.len() + 1);
    new_knots.extend_from_slice(&knots[..k]);
    new_knots.push(u);
    new_knots.extend_from_slice(&knots[k..]);

    Ok((new_pts, KnotVector(new_knots)))
}

// =============================================================================
// Tests
// =============================================================================
