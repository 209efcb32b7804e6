//! Session configuration.
//!
//! All fields have defaults, so a TOML file only needs the values it
//! changes:
//!
//! ```toml
//! [curve]
//! kind = "bspline"
//! degree = 3
//!
//! [revolution]
//! axis = "y"
//! subdivisions = 48
//! ```

use std::fs;
use std::path::Path;

use lathe_math::{Axis, Point2};
use lathe_revolve::DEFAULT_MIN_AXIS_DISTANCE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The text is not valid TOML for [`SessionConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Encoding to TOML failed.
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    /// A value is out of range.
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Which curve family the control points describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    /// Single Bézier segment over all points, rational when weighted.
    Bezier,
    /// Clamped-uniform B-spline; weights are ignored.
    #[default]
    BSpline,
    /// Clamped-uniform B-spline honoring weights.
    Nurbs,
}

/// Curve evaluation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSettings {
    /// Curve family.
    pub kind: CurveKind,
    /// Spline degree. Ignored for Bézier curves, whose degree is `n - 1`.
    pub degree: usize,
    /// Number of parameter steps when sampling.
    pub resolution: usize,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            kind: CurveKind::BSpline,
            degree: 3,
            resolution: 100,
        }
    }
}

/// Revolution sweep parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevolutionSettings {
    /// Axis to revolve around.
    pub axis: Axis,
    /// Sweep angle in degrees.
    pub angle_degrees: f64,
    /// Angular steps across the sweep.
    pub subdivisions: usize,
    /// Where the axis crosses the editing plane (x).
    pub center_x: f64,
    /// Where the axis crosses the editing plane (y).
    pub center_y: f64,
    /// Profile samples closer to the axis than this are dropped.
    pub min_axis_distance: f64,
}

impl Default for RevolutionSettings {
    fn default() -> Self {
        Self {
            axis: Axis::Y,
            angle_degrees: 360.0,
            subdivisions: 32,
            center_x: 0.0,
            center_y: 0.0,
            min_axis_distance: DEFAULT_MIN_AXIS_DISTANCE,
        }
    }
}

impl RevolutionSettings {
    /// Axis crossing point as a [`Point2`].
    pub fn center(&self) -> Point2 {
        Point2::new(self.center_x, self.center_y)
    }
}

/// Everything the pipeline needs besides the points themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Curve evaluation.
    pub curve: CurveSettings,
    /// Revolution sweep.
    pub revolution: RevolutionSettings,
}

impl SessionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Encode as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.curve.resolution == 0 {
            return Err(ConfigError::Invalid("curve.resolution must be positive".into()));
        }
        if self.curve.kind != CurveKind::Bezier && self.curve.degree == 0 {
            return Err(ConfigError::Invalid(
                "curve.degree must be at least 1 for splines".into(),
            ));
        }
        let rev = &self.revolution;
        if rev.subdivisions == 0 {
            return Err(ConfigError::Invalid(
                "revolution.subdivisions must be positive".into(),
            ));
        }
        if !rev.angle_degrees.is_finite() || rev.angle_degrees <= 0.0 || rev.angle_degrees > 360.0
        {
            return Err(ConfigError::Invalid(
                "revolution.angle_degrees must be in (0, 360]".into(),
            ));
        }
        if !rev.min_axis_distance.is_finite() || rev.min_axis_distance < 0.0 {
            return Err(ConfigError::Invalid(
                "revolution.min_axis_distance must be non-negative".into(),
            ));
        }
        if !rev.center_x.is_finite() || !rev.center_y.is_finite() {
            return Err(ConfigError::Invalid("revolution center must be finite".into()));
        }
        Ok(())
    }
}
