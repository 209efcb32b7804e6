#![warn(missing_docs)]

//! Bézier curve evaluation for the lathe core.
//!
//! Curves are defined directly by a slice of [`ControlPoint`]s; the degree is
//! `points.len() - 1`. Evaluation uses de Casteljau's algorithm, lifted to
//! homogeneous coordinates when any weight differs from 1.
//!
//! # Algorithms
//!
//! - **De Casteljau** for evaluation, subdivision and the hodograph
//! - **Bernstein basis** as an independent evaluation path
//! - **Degree elevation** by the standard blend of neighbouring points
//!
//! Parameters outside `[0, 1]` are accepted and extrapolate.

use lathe_math::{Point2, Vec2};
use lathe_points::{is_rational, ControlPoint, Homogeneous};

// =============================================================================
// Evaluation
// =============================================================================

/// Evaluate the curve at `t`.
///
/// Returns `None` for an empty control polygon and the single point for a
/// degree-0 curve. Picks the rational path only when some weight is not 1;
/// with uniform weights both paths agree.
pub fn evaluate(points: &[ControlPoint], t: f64) -> Option<Point2> {
    match points {
        [] => None,
        [only] => Some(only.position()),
        _ if is_rational(points) => evaluate_rational(points, t),
        _ => evaluate_polynomial(points, t),
    }
}

/// De Casteljau evaluation on positions only (weights ignored).
pub fn evaluate_polynomial(points: &[ControlPoint], t: f64) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let mut work: Vec<Point2> = points.iter().map(ControlPoint::position).collect();
    Some(reduce(&mut work, t))
}

/// De Casteljau evaluation in homogeneous space followed by projection.
pub fn evaluate_rational(points: &[ControlPoint], t: f64) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let mut work: Vec<Homogeneous> = points.iter().map(ControlPoint::to_homogeneous).collect();
    let n = work.len();
    for round in 1..n {
        for i in 0..n - round {
            work[i] = Homogeneous::lerp(&work[i], &work[i + 1], t);
        }
    }
    Some(work[0].project())
}

/// Evaluate through the Bernstein polynomials `C(n,i)·tⁱ·(1-t)ⁿ⁻ⁱ`.
///
/// Rational when the weights are non-uniform, like [`evaluate`].
pub fn evaluate_bernstein(points: &[ControlPoint], t: f64) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() - 1;
    let rational = is_rational(points);
    let mut acc = Homogeneous::ZERO;
    let mut binom = 1.0;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            binom = binom * (n - i + 1) as f64 / i as f64;
        }
        let b = binom * t.powi(i as i32) * (1.0 - t).powi((n - i) as i32);
        let h = if rational {
            p.to_homogeneous()
        } else {
            Homogeneous {
                wx: p.x,
                wy: p.y,
                w: 1.0,
            }
        };
        acc.add_scaled(&h, b);
    }
    if rational {
        Some(acc.project())
    } else {
        Some(Point2::new(acc.wx, acc.wy))
    }
}

/// Repeated linear interpolation until one point remains.
fn reduce(work: &mut [Point2], t: f64) -> Point2 {
    let n = work.len();
    for round in 1..n {
        for i in 0..n - round {
            work[i] = work[i] + (work[i + 1] - work[i]) * t;
        }
    }
    work[0]
}

/// Sample `steps + 1` points at `t = i / steps`.
///
/// Returns an empty polyline when fewer than two control points exist.
/// `steps` below 1 is treated as 1.
pub fn sample(points: &[ControlPoint], steps: usize) -> Vec<Point2> {
    if points.len() < 2 {
        return Vec::new();
    }
    let steps = steps.max(1);
    (0..=steps)
        .filter_map(|i| evaluate(points, i as f64 / steps as f64))
        .collect()
}

/// First derivative at `t` from the hodograph `n·(p[i+1] - p[i])`.
///
/// The hodograph is evaluated non-rationally. Zero for fewer than two points.
pub fn derivative(points: &[ControlPoint], t: f64) -> Vec2 {
    if points.len() < 2 {
        return Vec2::zeros();
    }
    let degree = (points.len() - 1) as f64;
    let mut hodograph: Vec<Point2> = points
        .windows(2)
        .map(|w| Point2::from((w[1].position() - w[0].position()) * degree))
        .collect();
    reduce(&mut hodograph, t).coords
}

// =============================================================================
// Subdivision and degree elevation
// =============================================================================

/// Split the curve at `t` into two curves of the same degree.
///
/// `left` covers `[0, t]` and `right` covers `[t, 1]`. Positions are
/// interpolated on the plain points and every intermediate point takes the
/// weight of the earlier point of its segment, so the halves are exact only
/// for uniform weights.
pub fn split(points: &[ControlPoint], t: f64) -> (Vec<ControlPoint>, Vec<ControlPoint>) {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return (Vec::new(), Vec::new());
    };
    let mut left = vec![first];
    let mut right = vec![last];
    let mut level = points.to_vec();
    while level.len() > 1 {
        level = level
            .windows(2)
            .map(|w| {
                let p = w[0].position() + (w[1].position() - w[0].position()) * t;
                ControlPoint {
                    x: p.x,
                    y: p.y,
                    weight: w[0].weight,
                }
            })
            .collect();
        left.push(level[0]);
        right.push(level[level.len() - 1]);
    }
    right.reverse();
    (left, right)
}

/// Raise the degree by one without changing the curve.
///
/// Interior points are `α·p[i-1] + (1-α)·p[i]` with `α = i/(n+1)`, blended in
/// homogeneous space so weighted curves keep their shape as well.
pub fn elevate_degree(points: &[ControlPoint]) -> Vec<ControlPoint> {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    let n = points.len() - 1;
    let mut out = Vec::with_capacity(points.len() + 1);
    out.push(first);
    for i in 1..=n {
        let alpha = i as f64 / (n + 1) as f64;
        let h = Homogeneous::lerp(
            &points[i].to_homogeneous(),
            &points[i - 1].to_homogeneous(),
            alpha,
        );
        out.push(h.to_control_point());
    }
    out.push(last);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<ControlPoint> {
        coords.iter().map(|&(x, y)| ControlPoint::new(x, y)).collect()
    }

    fn arch() -> Vec<ControlPoint> {
        pts(&[(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)])
    }

    fn quarter_circle() -> Vec<ControlPoint> {
        let w = std::f64::consts::FRAC_1_SQRT_2;
        vec![
            ControlPoint::new(1.0, 0.0),
            ControlPoint::weighted(1.0, 1.0, w),
            ControlPoint::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_empty_and_single() {
        assert!(evaluate(&[], 0.5).is_none());
        let one = pts(&[(3.0, 4.0)]);
        assert_eq!(evaluate(&one, 0.7), Some(Point2::new(3.0, 4.0)));
        assert!(sample(&one, 10).is_empty());
        assert_eq!(derivative(&one, 0.5), Vec2::zeros());
    }

    #[test]
    fn test_sample_quadratic_arch() {
        let samples = sample(&arch(), 2);
        assert_eq!(samples.len(), 3);
        assert!((samples[0] - Point2::new(0.0, 0.0)).norm() < 1e-12);
        assert!((samples[1] - Point2::new(50.0, 50.0)).norm() < 1e-12);
        assert!((samples[2] - Point2::new(100.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_sample_zero_steps_clamped() {
        assert_eq!(sample(&arch(), 0).len(), 2);
    }

    #[test]
    fn test_endpoint_interpolation() {
        let curves = [
            arch(),
            pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
            quarter_circle(),
        ];
        for c in &curves {
            let start = evaluate(c, 0.0).unwrap();
            let end = evaluate(c, 1.0).unwrap();
            assert!((start - c[0].position()).norm() < 1e-12);
            assert!((end - c[c.len() - 1].position()).norm() < 1e-12);
        }
    }

    #[test]
    fn test_rational_matches_polynomial_with_unit_weights() {
        let square = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let a = evaluate_rational(&square, 0.3).unwrap();
        let b = evaluate_polynomial(&square, 0.3).unwrap();
        assert!((a - b).norm() < 1e-12);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let a = evaluate_rational(&square, t).unwrap();
            let b = evaluate_polynomial(&square, t).unwrap();
            assert!((a - b).norm() < 1e-12, "mismatch at t={}", t);
        }
    }

    #[test]
    fn test_weighted_quarter_circle() {
        let arc = quarter_circle();
        for i in 0..=16 {
            let t = i as f64 / 16.0;
            let p = evaluate(&arc, t).unwrap();
            assert!((p.coords.norm() - 1.0).abs() < 1e-12, "radius at t={}", t);
        }
        // the polynomial path ignores the weight and leaves the circle
        let p = evaluate_polynomial(&arc, 0.5).unwrap();
        assert!((p.coords.norm() - 1.0).abs() > 1e-3);
    }

    #[test]
    fn test_bernstein_agrees_with_de_casteljau() {
        let curves = [
            pts(&[(0.0, 0.0), (2.0, 5.0), (6.0, -1.0), (9.0, 3.0), (12.0, 0.0)]),
            quarter_circle(),
        ];
        for c in &curves {
            for i in 0..=10 {
                let t = i as f64 / 10.0;
                let a = evaluate(c, t).unwrap();
                let b = evaluate_bernstein(c, t).unwrap();
                assert!((a - b).norm() < 1e-10, "mismatch at t={}", t);
            }
        }
    }

    #[test]
    fn test_extrapolation_does_not_fail() {
        let line = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        let p = evaluate(&line, 1.5).unwrap();
        assert!((p.x - 15.0).abs() < 1e-12);
        let p = evaluate(&line, -0.5).unwrap();
        assert!((p.x + 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_derivative() {
        let d0 = derivative(&arch(), 0.0);
        assert!((d0 - Vec2::new(100.0, 200.0)).norm() < 1e-12);
        let d_mid = derivative(&arch(), 0.5);
        assert!((d_mid - Vec2::new(100.0, 0.0)).norm() < 1e-12);

        let line = pts(&[(0.0, 0.0), (10.0, 4.0)]);
        assert!((derivative(&line, 0.3) - Vec2::new(10.0, 4.0)).norm() < 1e-12);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let c = pts(&[(0.0, 0.0), (3.0, 8.0), (7.0, -2.0), (10.0, 5.0)]);
        let t = 0.37;
        let h = 1e-6;
        let fd = (evaluate(&c, t + h).unwrap() - evaluate(&c, t - h).unwrap()) / (2.0 * h);
        assert!((derivative(&c, t) - fd).norm() < 1e-5);
    }

    #[test]
    fn test_split_reproduces_both_halves() {
        let c = pts(&[(0.0, 0.0), (3.0, 8.0), (7.0, -2.0), (10.0, 5.0)]);
        let t = 0.4;
        let (left, right) = split(&c, t);
        assert_eq!(left.len(), c.len());
        assert_eq!(right.len(), c.len());
        assert_eq!(left[0], c[0]);
        assert_eq!(right[right.len() - 1], c[c.len() - 1]);
        assert!((left[left.len() - 1].position() - right[0].position()).norm() < 1e-12);

        for i in 0..=10 {
            let s = i as f64 / 10.0;
            let on_left = evaluate(&left, s).unwrap();
            let on_curve = evaluate(&c, s * t).unwrap();
            assert!((on_left - on_curve).norm() < 1e-10);

            let on_right = evaluate(&right, s).unwrap();
            let on_curve = evaluate(&c, t + s * (1.0 - t)).unwrap();
            assert!((on_right - on_curve).norm() < 1e-10);
        }
    }

    #[test]
    fn test_split_carries_earlier_weight() {
        let c = vec![
            ControlPoint::weighted(0.0, 0.0, 2.0),
            ControlPoint::weighted(10.0, 0.0, 0.5),
        ];
        let (left, right) = split(&c, 0.5);
        assert_eq!(left[1].weight, 2.0);
        assert_eq!(right[0].weight, 2.0);
        assert_eq!(right[1].weight, 0.5);
    }

    #[test]
    fn test_split_empty() {
        let (l, r) = split(&[], 0.5);
        assert!(l.is_empty() && r.is_empty());
    }

    #[test]
    fn test_elevate_degree_preserves_shape() {
        let c = pts(&[(0.0, 0.0), (3.0, 8.0), (7.0, -2.0), (10.0, 5.0)]);
        let e = elevate_degree(&c);
        assert_eq!(e.len(), c.len() + 1);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let a = evaluate(&c, t).unwrap();
            let b = evaluate(&e, t).unwrap();
            assert!((a - b).norm() < 1e-10, "mismatch at t={}", t);
        }
    }

    #[test]
    fn test_elevate_degree_weighted() {
        let arc = quarter_circle();
        let e = elevate_degree(&elevate_degree(&arc));
        assert_eq!(e.len(), 5);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let p = evaluate(&e, t).unwrap();
            assert!((p.coords.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_elevate_line_to_quadratic() {
        let line = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        let e = elevate_degree(&line);
        assert_eq!(e.len(), 3);
        assert!((e[1].position() - Point2::new(5.0, 0.0)).norm() < 1e-12);
        assert!(elevate_degree(&[]).is_empty());
    }
}
