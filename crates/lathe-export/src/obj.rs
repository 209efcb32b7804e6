//! Wavefront OBJ writer.

use std::fmt::Write;

use lathe_revolve::RevolutionMesh;

/// Encode `mesh` as OBJ text with per-vertex normals.
///
/// Vertex and normal indices coincide, so faces are written as
/// `f a//a b//b c//c` with 1-based indices.
pub fn export_obj(mesh: &RevolutionMesh) -> String {
    let mut out = String::with_capacity(64 * (mesh.vertices.len() * 2 + mesh.faces.len()));
    out.push_str("# lathe revolution mesh\n");
    writeln!(
        out,
        "# vertices: {} faces: {}",
        mesh.num_vertices(),
        mesh.num_faces()
    )
    .unwrap();
    for v in &mesh.vertices {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z).unwrap();
    }
    for n in &mesh.normals {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z).unwrap();
    }
    for [a, b, c] in &mesh.faces {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}").unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lathe_math::Point3;

    #[test]
    fn test_single_triangle() {
        let mesh = RevolutionMesh::from_faces(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let text = export_obj(&mesh);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "# vertices: 3 faces: 1");
        assert_eq!(lines[3], "v 1 0 0");
        assert_eq!(lines[5], "vn 0 0 1");
        assert_eq!(lines.last(), Some(&"f 1//1 2//2 3//3"));
    }
}
