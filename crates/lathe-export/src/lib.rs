#![warn(missing_docs)]

//! Export of lathe meshes and point sets.
//!
//! Meshes can be written as a JSON [`MeshDocument`], Wavefront OBJ, or STL
//! (binary or ASCII). Point sets round-trip through JSON.

use std::fs;
use std::path::Path;

use lathe_revolve::RevolutionMesh;
use thiserror::Error;
use tracing::info;

mod json;
mod obj;
mod stl;

pub use json::{points_from_json, points_to_json, MeshDocument};
pub use obj::export_obj;
pub use stl::{export_stl_ascii, export_stl_bytes};

/// Errors raised while exporting.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Mesh has no triangles.
    #[error("mesh is empty")]
    EmptyMesh,

    /// File extension does not name a supported format.
    #[error("unknown output format: {0}")]
    UnknownFormat(String),

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Supported mesh output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// [`MeshDocument`] as pretty-printed JSON.
    Json,
    /// Wavefront OBJ with vertex normals.
    Obj,
    /// Binary STL.
    Stl,
    /// ASCII STL.
    StlAscii,
}

impl ExportFormat {
    /// Pick a format from the file extension (case-insensitive).
    ///
    /// `.stl` maps to binary STL; ASCII STL is only reachable explicitly.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "obj" => Ok(Self::Obj),
            "stl" => Ok(Self::Stl),
            _ => Err(ExportError::UnknownFormat(ext.to_string())),
        }
    }
}

/// Encode `mesh` in `format`.
pub fn mesh_to_bytes(mesh: &RevolutionMesh, format: ExportFormat) -> Result<Vec<u8>> {
    if mesh.is_empty() {
        return Err(ExportError::EmptyMesh);
    }
    let bytes = match format {
        ExportFormat::Json => MeshDocument::from_mesh(mesh).to_json()?.into_bytes(),
        ExportFormat::Obj => export_obj(mesh).into_bytes(),
        ExportFormat::Stl => export_stl_bytes(mesh),
        ExportFormat::StlAscii => export_stl_ascii(mesh, "lathe").into_bytes(),
    };
    Ok(bytes)
}

/// Write `mesh` to `path`, creating parent directories as needed.
pub fn write_mesh(mesh: &RevolutionMesh, path: &Path, format: ExportFormat) -> Result<()> {
    let bytes = mesh_to_bytes(mesh, format)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, &bytes)?;
    info!(
        path = %path.display(),
        ?format,
        bytes = bytes.len(),
        "mesh exported"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ExportFormat::from_path(&PathBuf::from("vase.OBJ")).unwrap(),
            ExportFormat::Obj
        );
        assert_eq!(
            ExportFormat::from_path(&PathBuf::from("out/vase.stl")).unwrap(),
            ExportFormat::Stl
        );
        assert_eq!(
            ExportFormat::from_path(&PathBuf::from("vase.json")).unwrap(),
            ExportFormat::Json
        );
        assert!(matches!(
            ExportFormat::from_path(&PathBuf::from("vase.glb")),
            Err(ExportError::UnknownFormat(ext)) if ext == "glb"
        ));
        assert!(ExportFormat::from_path(&PathBuf::from("vase")).is_err());
    }

    #[test]
    fn test_empty_mesh_rejected() {
        let mesh = RevolutionMesh::default();
        assert!(matches!(
            mesh_to_bytes(&mesh, ExportFormat::Obj),
            Err(ExportError::EmptyMesh)
        ));
    }
}
