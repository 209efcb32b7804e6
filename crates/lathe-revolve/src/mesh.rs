//! Indexed triangle mesh produced by the revolution sweep.

use lathe_math::{Point3, Tolerance, Vec3};

/// Vertex and face counts of a mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshStats {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of triangular faces.
    pub face_count: usize,
}

/// Output triangle mesh for rendering and export.
///
/// `normals` has one entry per vertex. Every face index is below
/// `vertices.len()`. Normals are unit length, or exactly zero where only
/// degenerate faces touched the vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevolutionMesh {
    /// Vertex positions, ring-major.
    pub vertices: Vec<Point3>,
    /// Triangles as indices into `vertices`.
    ///
    /// Face normals follow `(v1 - v0) × (v2 - v0)`. For a revolved profile
    /// they point toward the axis when the profile runs in the axis
    /// direction (e.g. increasing y around Y) and away from it when the
    /// profile runs the other way.
    pub faces: Vec<[u32; 3]>,
    /// Averaged vertex normals.
    pub normals: Vec<Vec3>,
}

impl RevolutionMesh {
    /// Build a mesh from positions and faces, computing vertex normals.
    pub fn from_faces(vertices: Vec<Point3>, faces: Vec<[u32; 3]>) -> Self {
        let normals = vertex_normals(&vertices, &faces);
        Self {
            vertices,
            faces,
            normals,
        }
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Vertex and face counts.
    pub fn stats(&self) -> MeshStats {
        MeshStats {
            vertex_count: self.vertices.len(),
            face_count: self.faces.len(),
        }
    }

    /// Corner positions of face `f`.
    pub fn triangle(&self, f: usize) -> [Point3; 3] {
        let [a, b, c] = self.faces[f];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Unit normal of every face, zero for degenerate faces.
    pub fn face_normals(&self) -> Vec<Vec3> {
        let tol = Tolerance::DEFAULT;
        (0..self.faces.len())
            .map(|f| {
                let n = face_cross(&self.triangle(f));
                let len = n.norm();
                if tol.is_degenerate(len) {
                    Vec3::zeros()
                } else {
                    n / len
                }
            })
            .collect()
    }
}

/// Unnormalized face normal `(v1 - v0) × (v2 - v0)`.
fn face_cross([v0, v1, v2]: &[Point3; 3]) -> Vec3 {
    (v1 - v0).cross(&(v2 - v0))
}

/// Area-weighted vertex normals.
///
/// Each face adds its unnormalized cross product to its three corners; the
/// sums are normalized afterwards and left at zero when their length is ~0.
pub(crate) fn vertex_normals(vertices: &[Point3], faces: &[[u32; 3]]) -> Vec<Vec3> {
    let tol = Tolerance::DEFAULT;
    let mut acc = vec![Vec3::zeros(); vertices.len()];
    for &[a, b, c] in faces {
        let (a, b, c) = (a as usize, b as usize, c as usize);
        let n = face_cross(&[vertices[a], vertices[b], vertices[c]]);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    for n in &mut acc {
        let len = n.norm();
        if tol.is_degenerate(len) {
            *n = Vec3::zeros();
        } else {
            *n /= len;
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> RevolutionMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        RevolutionMesh::from_faces(vertices, vec![[0, 1, 2], [2, 1, 3]])
    }

    #[test]
    fn test_flat_quad_normals() {
        let mesh = quad();
        assert_eq!(mesh.normals.len(), mesh.vertices.len());
        for n in &mesh.normals {
            assert!((n - Vec3::z()).norm() < 1e-12);
        }
        for n in mesh.face_normals() {
            assert!((n - Vec3::z()).norm() < 1e-12);
        }
        assert_eq!(
            mesh.stats(),
            MeshStats {
                vertex_count: 4,
                face_count: 2
            }
        );
    }

    #[test]
    fn test_degenerate_face_leaves_zero_normal() {
        let vertices = vec![
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
        ];
        let mesh = RevolutionMesh::from_faces(vertices, vec![[0, 1, 2]]);
        assert!(mesh.normals.iter().all(|n| *n == Vec3::zeros()));
        assert_eq!(mesh.face_normals(), vec![Vec3::zeros()]);
    }

    #[test]
    fn test_unreferenced_vertex_has_zero_normal() {
        let mut mesh = quad();
        mesh.vertices.push(Point3::new(5.0, 5.0, 5.0));
        let normals = vertex_normals(&mesh.vertices, &mesh.faces);
        assert_eq!(normals[4], Vec3::zeros());
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = RevolutionMesh::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.stats(), MeshStats::default());
    }
}
