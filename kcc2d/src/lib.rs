/*!
A platformer-style 2D kinematic character controller.

Each fixed tick the body sweeps thin boxes along its movement trend against a
static platform layer, snaps to the surfaces it finds, and reports which sides
touch geometry. The layout:

- types:        shared data types (flags, hits, contacts, events)
- settings:     constants and per-step / movement configuration
- layers:       typed collision layer masks
- query:        the `BoxCaster` capability the resolver consumes
- platforms:    brute-force AABB platform list implementing `BoxCaster`
- rapier_world: Rapier 2D query world implementing `BoxCaster`
- resolver:     per-axis sweep-and-snap
- body:         the kinematic body and its fixed-tick step
- movement:     horizontal acceleration and jump helpers
*/

pub mod body;
pub mod error;
pub mod layers;
pub mod movement;
pub mod platforms;
pub mod query;
pub mod rapier_world;
pub mod resolver;
pub mod settings;
pub mod types;

pub use body::KinematicBody;
pub use error::BodyError;
pub use layers::{BitmaskFlags, LayerBits, LayerMask};
pub use movement::{jump_speed, move_towards};
pub use platforms::{AabbPlatforms, Platform};
pub use query::BoxCaster;
pub use rapier_world::{PlatformDef, RapierPlatformWorld};
pub use resolver::{CollisionResolver, SweepProbe};
pub use settings::{
    DEFAULT_ACCELERATION_MPS2, DEFAULT_AIR_CONTROL, DEFAULT_GRAVITY_MPS2, DEFAULT_JUMP_INTERVAL_S,
    DEFAULT_TICK_HZ, DEFAULT_TOP_SPEED_MPS, MIN_ADVANCE, MoveSettings, StepConfig,
    fixed_delta_time,
};
pub use types::{
    Axis, AxisContact, BoxCastHit, CollisionFlags, PlatformId, Vec2, VerticalCollision, trend,
};
