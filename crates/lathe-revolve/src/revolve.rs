//! Revolve operation: sweep a 2D profile around an axis into a triangle mesh.

use lathe_math::{Axis, Point2, Point3};
use tracing::{debug, warn};

use crate::mesh::{MeshStats, RevolutionMesh};

/// Rotate a profile point by `theta` radians about `axis`.
///
/// - Y: `(x cosθ, y, x sinθ)`
/// - X: `(x, y cosθ, y sinθ)`
/// - Z: `(x cosθ - y sinθ, x sinθ + y cosθ, 0)`
pub fn rotate_about(axis: Axis, p: &Point2, theta: f64) -> Point3 {
    let (s, c) = theta.sin_cos();
    match axis {
        Axis::Y => Point3::new(p.x * c, p.y, p.x * s),
        Axis::X => Point3::new(p.x, p.y * c, p.y * s),
        Axis::Z => Point3::new(p.x * c - p.y * s, p.x * s + p.y * c, 0.0),
    }
}

/// Sweep `profile` around `axis` through `total_angle_degrees`.
///
/// Produces `subdivisions + 1` rings of `profile.len()` vertices. The last
/// ring duplicates the first for a full turn so the seam closes exactly; a
/// partial sweep leaves both profile edges open. Every cell between
/// adjacent rings and profile points is split into two triangles along the
/// same diagonal.
///
/// Returns `None` (with a warning) when the profile has fewer than two
/// points or `subdivisions` is zero.
pub fn revolve_profile(
    profile: &[Point2],
    axis: Axis,
    total_angle_degrees: f64,
    subdivisions: usize,
) -> Option<RevolutionMesh> {
    if profile.len() < 2 {
        warn!(
            points = profile.len(),
            "revolution needs at least two profile points"
        );
        return None;
    }
    if subdivisions == 0 {
        warn!("revolution needs at least one angular subdivision");
        return None;
    }
    let per_ring = profile.len();
    let vertex_count = (subdivisions + 1) * per_ring;
    if u32::try_from(vertex_count).is_err() {
        warn!(vertex_count, "revolution mesh exceeds the u32 index range");
        return None;
    }

    let angle_step = total_angle_degrees.to_radians() / subdivisions as f64;

    let mut vertices = Vec::with_capacity(vertex_count);
    for ring in 0..=subdivisions {
        let theta = ring as f64 * angle_step;
        vertices.extend(profile.iter().map(|p| rotate_about(axis, p, theta)));
    }

    let mut faces = Vec::with_capacity(2 * subdivisions * (per_ring - 1));
    for ring in 0..subdivisions {
        for j in 0..per_ring - 1 {
            let current = (ring * per_ring + j) as u32;
            let next = current + per_ring as u32;
            faces.push([current, next, current + 1]);
            faces.push([current + 1, next, next + 1]);
        }
    }

    let mesh = RevolutionMesh::from_faces(vertices, faces);
    debug!(
        %axis,
        vertices = mesh.num_vertices(),
        faces = mesh.num_faces(),
        "revolution mesh generated"
    );
    Some(mesh)
}

/// Holds the current revolution mesh.
///
/// Two states: empty, or generated. Every call to [`generate`] rebuilds the
/// mesh from scratch; a failed generation leaves the mesher empty.
///
/// [`generate`]: RevolutionMesher::generate
#[derive(Debug, Clone, Default)]
pub struct RevolutionMesher {
    mesh: Option<RevolutionMesh>,
}

impl RevolutionMesher {
    /// Create an empty mesher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the mesh. Returns the new mesh, or `None` if the inputs were
    /// rejected.
    pub fn generate(
        &mut self,
        profile: &[Point2],
        axis: Axis,
        total_angle_degrees: f64,
        subdivisions: usize,
    ) -> Option<&RevolutionMesh> {
        self.mesh = revolve_profile(profile, axis, total_angle_degrees, subdivisions);
        self.mesh.as_ref()
    }

    /// Counts of the current mesh, zero when empty.
    pub fn stats(&self) -> MeshStats {
        self.mesh
            .as_ref()
            .map(RevolutionMesh::stats)
            .unwrap_or_default()
    }

    /// Drop the current mesh.
    pub fn clear(&mut self) {
        self.mesh = None;
    }

    /// The current mesh, if one has been generated.
    pub fn data(&self) -> Option<&RevolutionMesh> {
        self.mesh.as_ref()
    }

    /// Whether a mesh is currently held.
    pub fn is_generated(&self) -> bool {
        self.mesh.is_some()
    }
}
