#![warn(missing_docs)]

//! lathe: parametric curves and surfaces of revolution.
//!
//! Control points are evaluated as Bézier, B-spline or NURBS curves, the
//! sampled curve is remapped around a rotation axis, and the result is swept
//! into a triangle mesh with vertex normals.
//!
//! # Example
//!
//! ```
//! use lathe::{build_revolution, ControlPoint, CurveKind, SessionConfig};
//!
//! let mut config = SessionConfig::default();
//! config.curve.kind = CurveKind::Bezier;
//! config.revolution.subdivisions = 4;
//!
//! let points = [ControlPoint::new(10.0, 0.0), ControlPoint::new(10.0, 20.0)];
//! let mesh = build_revolution(&points, &config).unwrap();
//! assert_eq!(mesh.num_vertices(), 5 * 101);
//! ```

use lathe_nurbs::CurveError;
use thiserror::Error;

pub mod config;
pub mod pipeline;
pub mod session;

pub use config::{ConfigError, CurveKind, CurveSettings, RevolutionSettings, SessionConfig};
pub use lathe_math::{Axis, Point2, Point3, Transform2, Vec2, Vec3};
pub use lathe_points::{is_rational, BoundingBox, ControlPoint, Homogeneous, PointSet, MIN_WEIGHT};
pub use lathe_revolve::{MeshStats, RevolutionMesh, RevolutionMesher};
pub use pipeline::{
    build_revolution, checked_profile, revolution_profile, revolve_polyline, sample_curve,
};
pub use session::{Mode, Session};

/// Re-exported evaluator crates.
pub use lathe_bezier as bezier;
pub use lathe_nurbs as nurbs;
pub use lathe_revolve as revolve;

/// A sampled curve, regenerated wholesale on every change.
pub type Polyline = Vec<Point2>;

/// Reasons the pipeline produced no output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatheError {
    /// A Bézier curve needs at least two control points.
    #[error("need at least {required} control points, got {actual}")]
    TooFewPoints {
        /// Minimum point count.
        required: usize,
        /// Points supplied.
        actual: usize,
    },

    /// Spline construction failed.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Fewer than two samples survived the axis-distance filter.
    #[error("profile kept {kept} of {sampled} samples after axis filtering")]
    DegenerateProfile {
        /// Samples before filtering.
        sampled: usize,
        /// Samples after filtering.
        kept: usize,
    },

    /// The mesher rejected the profile or sweep parameters.
    #[error("revolution parameters produced no mesh")]
    MeshRejected,
}
