//! Overlay configuration loaded from TOML
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock overlay: 180 hearts in the rose palette, gravity `(0, 1)`, a drag
//! spring of stiffness 0.2 and a 60 Hz physics step.

use crate::error::{HeartfallError, Result};
use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Accepted physics step rates, in Hz
pub const MIN_PHYSICS_HZ: f64 = 1.0;
pub const MAX_PHYSICS_HZ: f64 = 1000.0;
/// Upper bound on `runtime.max_frame_time`, in seconds
pub const MAX_FRAME_TIME: f64 = 1.0;

/// Top-level overlay configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub bodies: BodiesConfig,
    pub world: WorldConfig,
    pub drag: DragConfig,
    pub runtime: RuntimeConfig,
}

/// Population and material of the falling hearts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodiesConfig {
    pub count: usize,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Spawn band above the fold; y grows downward so both are negative
    pub spawn_y_min: f32,
    pub spawn_y_max: f32,
    pub palette: Vec<String>,
    pub restitution: f32,
    pub friction: f32,
    /// Mass per square pixel
    pub density: f32,
    /// Fixed seed for reproducible populations; fresh entropy when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for BodiesConfig {
    fn default() -> Self {
        Self {
            count: 180,
            radius_min: 20.0,
            radius_max: 40.0,
            spawn_y_min: -1100.0,
            spawn_y_max: -100.0,
            palette: vec![
                "#FDA4AF".into(),
                "#F43F5E".into(),
                "#EC4899".into(),
                "#E11D48".into(),
            ],
            restitution: 0.2,
            friction: 0.5,
            density: 0.05,
            seed: None,
        }
    }
}

/// Global forces and boundary geometry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Gravity direction and magnitude in engine units
    pub gravity: [f32; 2],
    /// Engine units to px/ms²
    pub gravity_scale: f32,
    /// Thickness of the floor and side walls, also the containment margin
    pub wall_thickness: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 1.0],
            gravity_scale: 0.001,
            wall_thickness: 100.0,
        }
    }
}

impl WorldConfig {
    /// Gravity acceleration in px/s²
    pub fn gravity_px_per_s2(&self) -> [f32; 2] {
        // px/ms² -> px/s²
        let scale = self.gravity_scale * 1_000_000.0;
        [self.gravity[0] * scale, self.gravity[1] * scale]
    }
}

/// Pointer drag spring
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Fraction of the pointer gap closed per physics step
    pub stiffness: f32,
    /// Fraction of the body's velocity removed per step while dragged
    pub damping: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            stiffness: 0.2,
            damping: 0.1,
        }
    }
}

/// Scheduling and host page settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Physics steps per second
    pub physics_hz: f64,
    /// Longest frame gap fed into the accumulator, in seconds
    pub max_frame_time: f64,
    /// Colour of the host page behind the transparent overlay
    pub page_color: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            physics_hz: 60.0,
            max_frame_time: 0.25,
            page_color: "#FFF1F2".into(),
        }
    }
}

impl OverlayConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: OverlayConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject configurations the factory or engine cannot honour
    pub fn validate(&self) -> Result<()> {
        let b = &self.bodies;
        let w = &self.world;
        for (field, value) in [
            ("bodies.radius_min", b.radius_min),
            ("bodies.radius_max", b.radius_max),
            ("bodies.spawn_y_min", b.spawn_y_min),
            ("bodies.spawn_y_max", b.spawn_y_max),
            ("bodies.density", b.density),
            ("world.gravity[0]", w.gravity[0]),
            ("world.gravity[1]", w.gravity[1]),
            ("world.gravity_scale", w.gravity_scale),
            ("world.wall_thickness", w.wall_thickness),
        ] {
            if !value.is_finite() {
                return Err(HeartfallError::InvalidConfig(format!(
                    "{field} must be a finite number, got {value}"
                )));
            }
        }

        if !(b.radius_min > 0.0 && b.radius_min < b.radius_max) {
            return Err(HeartfallError::InvalidConfig(format!(
                "bodies.radius_min ({}) must be positive and below bodies.radius_max ({})",
                b.radius_min, b.radius_max
            )));
        }
        if b.spawn_y_min >= b.spawn_y_max {
            return Err(HeartfallError::InvalidConfig(format!(
                "bodies.spawn_y_min ({}) must be below bodies.spawn_y_max ({})",
                b.spawn_y_min, b.spawn_y_max
            )));
        }
        if b.palette.is_empty() {
            return Err(HeartfallError::InvalidConfig(
                "bodies.palette must contain at least one color".into(),
            ));
        }
        self.palette_colors()?;
        check_range("bodies.restitution", b.restitution.into(), 0.0, 1.0)?;
        check_range("bodies.friction", b.friction.into(), 0.0, 10.0)?;
        if b.density <= 0.0 {
            return Err(HeartfallError::InvalidConfig(format!(
                "bodies.density must be positive, got {}",
                b.density
            )));
        }

        if w.wall_thickness <= 0.0 {
            return Err(HeartfallError::InvalidConfig(format!(
                "world.wall_thickness must be positive, got {}",
                w.wall_thickness
            )));
        }

        check_range("drag.stiffness", self.drag.stiffness.into(), 0.0, 1.0)?;
        check_range("drag.damping", self.drag.damping.into(), 0.0, 1.0)?;

        let r = &self.runtime;
        check_range("runtime.physics_hz", r.physics_hz, MIN_PHYSICS_HZ, MAX_PHYSICS_HZ)?;
        if !(r.max_frame_time > 0.0 && r.max_frame_time <= MAX_FRAME_TIME) {
            return Err(HeartfallError::InvalidConfig(format!(
                "runtime.max_frame_time must be in (0, {MAX_FRAME_TIME}] seconds, got {}",
                r.max_frame_time
            )));
        }
        Color::parse_hex(&r.page_color)?;
        Ok(())
    }

    /// The body palette as parsed colors
    pub fn palette_colors(&self) -> Result<Vec<Color>> {
        self.bodies
            .palette
            .iter()
            .map(|s| Color::parse_hex(s))
            .collect()
    }

    pub fn page_color(&self) -> Result<Color> {
        Color::parse_hex(&self.runtime.page_color)
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(HeartfallError::ValueOutOfRange {
            field: field.to_string(),
            min,
            max,
            value,
        });
    }
    Ok(())
}
