//! STL writers.

use std::fmt::Write;

use lathe_revolve::RevolutionMesh;

const HEADER: &[u8; 80] =
    b"lathe STL export                                                                ";

/// Encode `mesh` as binary STL.
///
/// Layout: 80-byte header, triangle count as `u32`, then 50 bytes per
/// triangle (normal, three corners, all little-endian `f32`, and a zero
/// attribute count). Degenerate faces get a zero normal.
pub fn export_stl_bytes(mesh: &RevolutionMesh) -> Vec<u8> {
    let num_triangles = mesh.num_faces();
    let mut data = Vec::with_capacity(84 + num_triangles * 50);

    data.extend_from_slice(HEADER);
    data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

    for (f, normal) in mesh.face_normals().iter().enumerate() {
        for c in [normal.x, normal.y, normal.z] {
            data.extend_from_slice(&(c as f32).to_le_bytes());
        }
        for v in mesh.triangle(f) {
            for c in [v.x, v.y, v.z] {
                data.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }
        // attribute byte count
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    data
}

/// Encode `mesh` as ASCII STL under the solid name `name`.
pub fn export_stl_ascii(mesh: &RevolutionMesh, name: &str) -> String {
    let mut out = String::new();
    writeln!(out, "solid {name}").unwrap();
    for (f, n) in mesh.face_normals().iter().enumerate() {
        writeln!(out, "  facet normal {} {} {}", n.x, n.y, n.z).unwrap();
        out.push_str("    outer loop\n");
        for v in mesh.triangle(f) {
            writeln!(out, "      vertex {} {} {}", v.x, v.y, v.z).unwrap();
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    writeln!(out, "endsolid {name}").unwrap();
    out
}
