/*!
Controller settings and tolerances.

Constants centralize the tuning values used by the resolver, the body step and
the movement helpers. `StepConfig` and `MoveSettings` carry the per-host values
and default to these constants.

Notes
- Distances are in meters, time in seconds.
- Gravity is a positive magnitude; the body integrates it along -Y.
*/

use serde::{Deserialize, Serialize};

use crate::layers::LayerMask;

/// Minimum probe depth of a sweep (meters), applied even at zero speed so resting
/// contacts are re-detected every tick.
pub const MIN_ADVANCE: f32 = 0.02;

/// Cross-axis shrink of the cast box. Keeps a sweep from grazing the corner of
/// a neighbouring cell on the other axis.
pub const CROSS_AXIS_SHRINK: f32 = 0.95;

/// Gravity magnitude in meters per second squared.
pub const DEFAULT_GRAVITY_MPS2: f32 = 10.0;

/// Time between two accepted jumps (seconds).
pub const DEFAULT_JUMP_INTERVAL_S: f32 = 0.1;

/// Fraction of horizontal acceleration available while airborne.
pub const DEFAULT_AIR_CONTROL: f32 = 0.2;

/// Default horizontal top speed (m/s).
pub const DEFAULT_TOP_SPEED_MPS: f32 = 5.5;

/// Default horizontal acceleration toward the top speed (m/s^2).
pub const DEFAULT_ACCELERATION_MPS2: f32 = 30.0;

/// Default fixed simulation rate.
pub const DEFAULT_TICK_HZ: u32 = 50;

/// Per-step configuration handed to [`crate::KinematicBody::step`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Apply gravity while airborne.
    pub use_gravity: bool,
    /// Gravity magnitude (m/s^2). The sign is ignored.
    pub gravity: f32,
    /// Multiplier on `gravity`, for per-body floatiness.
    pub gravity_scale: f32,
    /// Layers the sweeps collide with.
    pub platform_mask: LayerMask,
}

impl StepConfig {
    /// Effective downward acceleration: `|gravity| * gravity_scale`.
    #[inline]
    pub fn gravity_acceleration(&self) -> f32 {
        self.gravity.abs() * self.gravity_scale
    }
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            use_gravity: true,
            gravity: DEFAULT_GRAVITY_MPS2,
            gravity_scale: 1.0,
            platform_mask: LayerMask::all(),
        }
    }
}

/// Horizontal movement tuning for [`crate::KinematicBody::move_horizontal`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveSettings {
    pub top_speed: f32,
    pub acceleration: f32,
    /// Acceleration multiplier while airborne (0 = no air control, 1 = full).
    pub air_control: f32,
    /// Turn the body toward a non-zero input direction.
    pub update_facing: bool,
}

impl Default for MoveSettings {
    fn default() -> Self {
        Self {
            top_speed: DEFAULT_TOP_SPEED_MPS,
            acceleration: DEFAULT_ACCELERATION_MPS2,
            air_control: DEFAULT_AIR_CONTROL,
            update_facing: true,
        }
    }
}

/// Fixed tick length for a simulation rate. A zero rate falls back to [`DEFAULT_TICK_HZ`].
#[inline]
pub fn fixed_delta_time(tick_hz: u32) -> f32 {
    let hz = if tick_hz == 0 { DEFAULT_TICK_HZ } else { tick_hz };
    1.0 / hz as f32
}
