//! Explicit editing context.
//!
//! A [`Session`] owns both point sets, the configuration, and the derived
//! polyline and mesh. Every edit goes through a method that rebuilds the
//! derived data synchronously, so readers never see stale output.

use lathe_math::Point2;
use lathe_points::PointSet;
use lathe_revolve::{MeshStats, RevolutionMesh, RevolutionMesher};
use tracing::debug;

use crate::config::{ConfigError, SessionConfig};
use crate::pipeline::{checked_profile, sample_curve};
use crate::{LatheError, Polyline};

/// Which editor the session edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Free curve editing; no mesh is produced.
    #[default]
    CurveEditor,
    /// Profile editing with a live revolution mesh.
    Lathe,
}

/// Editing state for one curve editor and one lathe profile.
#[derive(Debug, Clone, Default)]
pub struct Session {
    mode: Mode,
    config: SessionConfig,
    curve_points: PointSet,
    profile_points: PointSet,
    polyline: Polyline,
    mesher: RevolutionMesher,
}

impl Session {
    /// Empty session in curve-editor mode.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Control points of the curve editor.
    pub fn curve_points(&self) -> &PointSet {
        &self.curve_points
    }

    /// Control points of the lathe profile.
    pub fn profile_points(&self) -> &PointSet {
        &self.profile_points
    }

    /// The point set edited in the current mode.
    pub fn active_points(&self) -> &PointSet {
        match self.mode {
            Mode::CurveEditor => &self.curve_points,
            Mode::Lathe => &self.profile_points,
        }
    }

    fn active_points_mut(&mut self) -> &mut PointSet {
        match self.mode {
            Mode::CurveEditor => &mut self.curve_points,
            Mode::Lathe => &mut self.profile_points,
        }
    }

    /// Sampled curve of the active point set, empty when it cannot be
    /// sampled.
    pub fn polyline(&self) -> &[Point2] {
        &self.polyline
    }

    /// The revolution mesh, present only in lathe mode after a successful
    /// rebuild.
    pub fn mesh(&self) -> Option<&RevolutionMesh> {
        self.mesher.data()
    }

    /// Counts of the current mesh.
    pub fn mesh_stats(&self) -> MeshStats {
        self.mesher.stats()
    }

    /// Switch editors.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.refresh_logged();
    }

    /// Validate and install a new configuration.
    pub fn set_config(&mut self, config: SessionConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.refresh_logged();
        Ok(())
    }

    /// Append a point to the active set. Returns its index.
    pub fn add_point(&mut self, x: f64, y: f64, weight: f64) -> usize {
        let index = self.active_points_mut().add(x, y, weight);
        self.refresh_logged();
        index
    }

    /// Move a point of the active set.
    pub fn move_point(&mut self, index: usize, x: f64, y: f64) -> bool {
        let moved = self.active_points_mut().move_point(index, x, y);
        if moved {
            self.refresh_logged();
        }
        moved
    }

    /// Change the weight of a point of the active set.
    pub fn set_weight(&mut self, index: usize, weight: f64) -> bool {
        let changed = self.active_points_mut().set_weight(index, weight);
        if changed {
            self.refresh_logged();
        }
        changed
    }

    /// Remove a point of the active set.
    pub fn remove_point(&mut self, index: usize) -> bool {
        let removed = self.active_points_mut().remove(index);
        if removed {
            self.refresh_logged();
        }
        removed
    }

    /// Select the topmost active point within `threshold` of `(x, y)`.
    pub fn select_near(&mut self, x: f64, y: f64, threshold: f64) -> Option<usize> {
        let points = self.active_points_mut();
        match points.find_near(x, y, threshold) {
            Some(index) => {
                points.select(index);
                Some(index)
            }
            None => {
                points.deselect();
                None
            }
        }
    }

    /// Apply an arbitrary edit (scale, rotate, clear, ...) to the active set.
    pub fn edit_active<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut PointSet),
    {
        edit(self.active_points_mut());
        self.refresh_logged();
    }

    /// Replace the lathe profile with an independent copy of the curve
    /// editor's points.
    pub fn copy_curve_to_profile(&mut self) {
        self.profile_points = self.curve_points.snapshot();
        self.refresh_logged();
    }

    /// Rebuild the polyline and, in lathe mode, the mesh.
    ///
    /// The mesh is always cleared first and stays empty on error. The
    /// polyline is empty only when sampling itself fails; a profile rejected
    /// by the revolution step keeps its sampled curve.
    pub fn refresh(&mut self) -> Result<(), LatheError> {
        self.polyline.clear();
        self.mesher.clear();

        let points = match self.mode {
            Mode::CurveEditor => &self.curve_points,
            Mode::Lathe => &self.profile_points,
        };
        self.polyline = sample_curve(points.as_slice(), &self.config.curve)?;

        if self.mode == Mode::Lathe {
            let revolution = &self.config.revolution;
            let profile = checked_profile(&self.polyline, revolution)?;
            self.mesher
                .generate(
                    &profile,
                    revolution.axis,
                    revolution.angle_degrees,
                    revolution.subdivisions,
                )
                .ok_or(LatheError::MeshRejected)?;
        }
        Ok(())
    }

    fn refresh_logged(&mut self) {
        if let Err(err) = self.refresh() {
            debug!(%err, mode = ?self.mode, "session has no derived output");
        }
    }
}
