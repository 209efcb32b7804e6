//! Points to polyline to profile to mesh.

use lathe_math::Point2;
use lathe_nurbs::CurveError;
use lathe_points::ControlPoint;
use lathe_revolve::{adjust_profile, revolve_profile, RevolutionMesh};
use tracing::debug;

use crate::config::{CurveKind, CurveSettings, RevolutionSettings, SessionConfig};
use crate::{LatheError, Polyline};

/// Sample the curve described by `points` under `settings`.
///
/// Fails instead of returning an empty polyline when there are too few
/// points for the curve kind.
pub fn sample_curve(
    points: &[ControlPoint],
    settings: &CurveSettings,
) -> Result<Polyline, LatheError> {
    let polyline = match settings.kind {
        CurveKind::Bezier => {
            if points.len() < 2 {
                return Err(LatheError::TooFewPoints {
                    required: 2,
                    actual: points.len(),
                });
            }
            lathe_bezier::sample(points, settings.resolution)
        }
        CurveKind::BSpline | CurveKind::Nurbs => {
            let required = settings.degree + 1;
            if points.len() < required {
                return Err(CurveError::InsufficientPoints {
                    degree: settings.degree,
                    required,
                    actual: points.len(),
                }
                .into());
            }
            if settings.kind == CurveKind::Nurbs {
                lathe_nurbs::sample_rational(points, settings.degree, settings.resolution)
            } else {
                lathe_nurbs::sample(points, settings.degree, settings.resolution)
            }
        }
    };
    debug!(kind = ?settings.kind, samples = polyline.len(), "curve sampled");
    Ok(polyline)
}

/// Map a sampled polyline into the frame the mesher revolves.
pub fn revolution_profile(polyline: &[Point2], settings: &RevolutionSettings) -> Polyline {
    adjust_profile(
        polyline,
        settings.axis,
        settings.center(),
        settings.min_axis_distance,
    )
}

/// Sample `points`, adjust the result around the axis and revolve it.
pub fn build_revolution(
    points: &[ControlPoint],
    config: &SessionConfig,
) -> Result<RevolutionMesh, LatheError> {
    let polyline = sample_curve(points, &config.curve)?;
    revolve_polyline(&polyline, &config.revolution)
}

/// Like [`revolution_profile`], but fails when fewer than two samples
/// survive the axis-distance filter.
pub fn checked_profile(
    polyline: &[Point2],
    settings: &RevolutionSettings,
) -> Result<Polyline, LatheError> {
    let profile = revolution_profile(polyline, settings);
    if profile.len() < 2 {
        return Err(LatheError::DegenerateProfile {
            sampled: polyline.len(),
            kept: profile.len(),
        });
    }
    Ok(profile)
}

/// Adjust and revolve an already sampled polyline.
pub fn revolve_polyline(
    polyline: &[Point2],
    settings: &RevolutionSettings,
) -> Result<RevolutionMesh, LatheError> {
    let profile = checked_profile(polyline, settings)?;
    revolve_profile(
        &profile,
        settings.axis,
        settings.angle_degrees,
        settings.subdivisions,
    )
    .ok_or(LatheError::MeshRejected)
}
