//! JSON snapshots of meshes and point sets.

use lathe_points::{ControlPoint, PointSet};
use lathe_revolve::RevolutionMesh;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Plain-array mesh layout for JSON consumers.
///
/// Face indices are 0-based into `vertices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDocument {
    /// Vertex positions.
    pub vertices: Vec<[f64; 3]>,
    /// Triangles.
    pub faces: Vec<[u32; 3]>,
    /// One normal per vertex.
    pub normals: Vec<[f64; 3]>,
}

impl MeshDocument {
    /// Copy a mesh into array form.
    pub fn from_mesh(mesh: &RevolutionMesh) -> Self {
        Self {
            vertices: mesh.vertices.iter().map(|v| [v.x, v.y, v.z]).collect(),
            faces: mesh.faces.clone(),
            normals: mesh.normals.iter().map(|n| [n.x, n.y, n.z]).collect(),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Serialize a point set as a JSON array of `{x, y, weight}` objects.
pub fn points_to_json(points: &PointSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(points)?)
}

/// Parse a JSON array of control points. Missing weights default to 1 and
/// weights below the minimum are clamped.
pub fn points_from_json(json: &str) -> Result<PointSet> {
    let raw: Vec<ControlPoint> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .map(|p| ControlPoint::weighted(p.x, p.y, p.weight))
        .collect::<Vec<_>>()
        .into())
}
