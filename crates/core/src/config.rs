//! Simulation configuration with silent clamping.
//!
//! `SimConfig` owns every tunable the UI exposes: grid resolution, ball
//! count, boundary policy, launch strength, creation defaults, and the
//! per-layer draw toggles. Out-of-range input is never rejected — setters
//! clamp to the nearest valid bound. Structural changes (resolution, ball
//! count) only take effect at the next rebuild; the driver reads the config
//! fresh each frame for everything else.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::Rgba;
use crate::error::SimError;
use crate::params::{param_bool, param_f64, param_string, param_usize};

/// Smallest allowed grid resolution (nodes per axis).
pub const MIN_RESOLUTION: usize = 4;
/// Largest allowed grid resolution.
pub const MAX_RESOLUTION: usize = 128;
/// Smallest allowed ball count at setup.
pub const MIN_BALL_COUNT: usize = 1;
/// Largest allowed ball count at setup.
pub const MAX_BALL_COUNT: usize = 16;
/// Smallest allowed ball radius.
pub const MIN_BALL_RADIUS: f64 = 10.0;
/// Largest allowed ball radius.
pub const MAX_BALL_RADIUS: f64 = 100.0;

const DEFAULT_RESOLUTION: usize = 16;
const DEFAULT_BALL_COUNT: usize = 4;
const DEFAULT_LAUNCH_STRENGTH: f64 = 0.01;
const DEFAULT_BALL_RADIUS: f64 = 50.0;
const DEFAULT_DECAY_RANGE: f64 = 4.0;

/// Rule governing ball behavior at the simulation-area edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Reflect the velocity component when within `r` of a boundary.
    #[default]
    Bounce,
    /// Teleport to the opposite edge once more than `r × decay_range` out.
    Wrap,
    /// Remove the ball once more than `r × decay_range` out.
    Delete,
}

impl BoundaryPolicy {
    /// Parses a policy name ("bounce", "wrap", "delete").
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bounce" => Some(BoundaryPolicy::Bounce),
            "wrap" => Some(BoundaryPolicy::Wrap),
            "delete" => Some(BoundaryPolicy::Delete),
            _ => None,
        }
    }

    /// The policy's canonical name.
    pub fn name(self) -> &'static str {
        match self {
            BoundaryPolicy::Bounce => "bounce",
            BoundaryPolicy::Wrap => "wrap",
            BoundaryPolicy::Delete => "delete",
        }
    }
}

/// Per-layer draw toggles, applied on the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawLayers {
    /// Filled contour polygons (the blobs).
    pub contours: bool,
    /// Ball outlines.
    pub sources: bool,
    /// Grid node points.
    pub nodes: bool,
    /// Node weight text labels.
    pub node_labels: bool,
    /// Cell corner-quad outlines.
    pub cells: bool,
    /// Cell activation-cost text labels.
    pub cell_labels: bool,
    /// Edge crossing points.
    pub crossings: bool,
}

impl Default for DrawLayers {
    fn default() -> Self {
        Self {
            contours: true,
            sources: true,
            nodes: true,
            node_labels: true,
            cells: true,
            cell_labels: true,
            crossings: false,
        }
    }
}

/// The full simulation configuration.
///
/// Fields with a valid range are private and reached through clamping
/// setters; the rest are plain public state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    width: f64,
    height: f64,
    resolution: usize,
    ball_count: usize,
    ball_radius: f64,
    launch_strength: f64,
    /// Active boundary policy; read by the driver every frame.
    pub boundary_policy: BoundaryPolicy,
    /// Multiplier on `r` for the off-screen margin used by wrap/delete.
    pub decay_range: f64,
    /// Color given to balls created by a pointer click.
    pub create_color: Rgba,
    /// Whether clicking empty space creates a ball.
    pub create_enabled: bool,
    /// Draw toggles for each visual layer.
    pub layers: DrawLayers,
}

impl SimConfig {
    /// Creates a config with default tunables for the given canvas size.
    ///
    /// Returns `SimError::InvalidDimensions` if either dimension is not
    /// finite and positive.
    pub fn new(width: f64, height: f64) -> Result<Self, SimError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SimError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            resolution: DEFAULT_RESOLUTION,
            ball_count: DEFAULT_BALL_COUNT,
            ball_radius: DEFAULT_BALL_RADIUS,
            launch_strength: DEFAULT_LAUNCH_STRENGTH,
            boundary_policy: BoundaryPolicy::default(),
            decay_range: DEFAULT_DECAY_RANGE,
            create_color: Rgba::rgb(255.0, 0.0, 0.0),
            create_enabled: true,
            layers: DrawLayers::default(),
        })
    }

    /// Builds a config from a JSON object, falling back to defaults for
    /// missing or ill-typed keys and clamping out-of-range values.
    ///
    /// Recognized keys: `resolution`, `ball_count`, `ball_radius`,
    /// `launch_strength`, `boundary_policy`, `decay_range`, `create_color`,
    /// `create_enabled`.
    pub fn from_json(width: f64, height: f64, params: &Value) -> Result<Self, SimError> {
        let mut config = Self::new(width, height)?;
        config.set_resolution(param_usize(params, "resolution", DEFAULT_RESOLUTION));
        config.set_ball_count(param_usize(params, "ball_count", DEFAULT_BALL_COUNT));
        config.set_ball_radius(param_f64(params, "ball_radius", DEFAULT_BALL_RADIUS));
        config.set_launch_strength(param_f64(
            params,
            "launch_strength",
            DEFAULT_LAUNCH_STRENGTH,
        ));
        config.boundary_policy =
            BoundaryPolicy::from_name(&param_string(params, "boundary_policy", "bounce"))
                .unwrap_or_default();
        config.decay_range = param_f64(params, "decay_range", DEFAULT_DECAY_RANGE);
        if let Some(hex) = params.get("create_color").and_then(Value::as_str) {
            config.create_color = Rgba::from_hex(hex)?;
        }
        config.create_enabled = param_bool(params, "create_enabled", true);
        Ok(config)
    }

    /// Canvas width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Nodes per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Sets the grid resolution, clamped to [4, 128]. Takes effect on the
    /// next full rebuild.
    pub fn set_resolution(&mut self, resolution: usize) {
        self.resolution = resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
    }

    /// Number of balls created at setup.
    pub fn ball_count(&self) -> usize {
        self.ball_count
    }

    /// Sets the setup ball count, clamped to [1, 16]. Takes effect on the
    /// next ball respawn.
    pub fn set_ball_count(&mut self, count: usize) {
        self.ball_count = count.clamp(MIN_BALL_COUNT, MAX_BALL_COUNT);
    }

    /// Radius given to newly created balls.
    pub fn ball_radius(&self) -> f64 {
        self.ball_radius
    }

    /// Sets the creation radius, clamped to [10, 100].
    pub fn set_ball_radius(&mut self, radius: f64) {
        self.ball_radius = radius.clamp(MIN_BALL_RADIUS, MAX_BALL_RADIUS);
    }

    /// Velocity scale applied on drag-release.
    pub fn launch_strength(&self) -> f64 {
        self.launch_strength
    }

    /// Sets the launch strength, clamped to be non-negative.
    pub fn set_launch_strength(&mut self, strength: f64) {
        self.launch_strength = strength.max(0.0);
    }
}
