#![warn(missing_docs)]

//! Surface-of-revolution meshing for the lathe core.
//!
//! A sampled 2D profile is first remapped into axis-relative coordinates by
//! [`adjust_profile`], then swept around the chosen [`Axis`] by
//! [`revolve_profile`] (or the stateful [`RevolutionMesher`]) into an indexed
//! triangle mesh with averaged per-vertex normals.
//!
//! # Example
//!
//! ```
//! use lathe_math::{Axis, Point2};
//! use lathe_revolve::revolve_profile;
//!
//! let profile = [
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 5.0),
//!     Point2::new(5.0, 10.0),
//! ];
//! let mesh = revolve_profile(&profile, Axis::Y, 360.0, 4).unwrap();
//! assert_eq!(mesh.num_vertices(), 15);
//! assert_eq!(mesh.num_faces(), 16);
//! ```

mod mesh;
mod profile;
mod revolve;

pub use lathe_math::Axis;
pub use mesh::{MeshStats, RevolutionMesh};
pub use profile::{adjust_profile, DEFAULT_MIN_AXIS_DISTANCE};
pub use revolve::{revolve_profile, rotate_about, RevolutionMesher};
