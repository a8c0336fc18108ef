/*!
The kinematic body and its fixed-tick step.

One [`KinematicBody`] per controlled character. The body owns its position: a
render transform mirrors it and is never read back.

Tick order in [`KinematicBody::step`]:
1. Reset contact flags, then resolve the vertical axis (always swept; downward
   when not moving up) and the horizontal axis (swept only when moving).
2. Apply gravity when airborne.
3. Zero any velocity component still pushing into a flagged side, integrate.
4. Count down the jump cooldown.
*/

use crate::{
    error::BodyError,
    query::BoxCaster,
    resolver::CollisionResolver,
    settings::{DEFAULT_JUMP_INTERVAL_S, StepConfig},
    types::{Axis, CollisionFlags, Vec2, VerticalCollision, trend},
};

#[derive(Clone, Debug)]
pub struct KinematicBody {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    half_extents: Vec2,
    pub(crate) flags: CollisionFlags,
    /// `1` facing right, `-1` facing left.
    pub(crate) facing: i8,
    pub(crate) jump_cooldown: f32,
    pub(crate) jump_interval: f32,
    last_vertical_collision: Option<VerticalCollision>,
}

impl KinematicBody {
    /// Create a body centred at `position` with the given AABB half extents.
    pub fn new(position: Vec2, half_extents: Vec2) -> Result<Self, BodyError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(half_extents.x) || !valid(half_extents.y) {
            return Err(BodyError::InvalidHalfExtents {
                x: half_extents.x,
                y: half_extents.y,
            });
        }
        if !position.x.is_finite() || !position.y.is_finite() {
            return Err(BodyError::NonFinitePosition {
                x: position.x,
                y: position.y,
            });
        }

        Ok(Self {
            position,
            velocity: Vec2::zeros(),
            half_extents,
            flags: CollisionFlags::default(),
            facing: 1,
            jump_cooldown: 0.0,
            jump_interval: DEFAULT_JUMP_INTERVAL_S,
            last_vertical_collision: None,
        })
    }

    /// Create a body from its full collider size.
    pub fn from_size(position: Vec2, size: Vec2) -> Result<Self, BodyError> {
        Self::new(position, size * 0.5)
    }

    /// Override the time between accepted jumps. Negative values are treated as zero.
    pub fn with_jump_interval(mut self, seconds: f32) -> Self {
        self.jump_interval = seconds.max(0.0);
        self
    }

    /// Advance one fixed tick.
    ///
    /// Returns the vertical collision that became active this tick, if any: landing
    /// (`sign == -1`) or hitting a ceiling (`sign == 1`). A contact that persists
    /// from the previous tick is not reported again.
    pub fn step<C: BoxCaster + ?Sized>(
        &mut self,
        caster: &C,
        dt: f32,
        config: &StepConfig,
    ) -> Option<VerticalCollision> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let previous = self.flags;
        self.flags.clear();

        // Zero vertical speed keeps probing the ground.
        let vertical_sign = if self.velocity.y > 0.0 { 1 } else { -1 };
        let horizontal_sign = trend(self.velocity.x);

        let resolver = CollisionResolver::new(caster, config.platform_mask, dt);
        let mut event = None;

        if let Some(contact) = resolver.resolve_axis(
            Axis::Vertical,
            vertical_sign,
            &mut self.position,
            &mut self.velocity,
            self.half_extents,
        ) {
            self.flags.set(Axis::Vertical, contact.sign, true);
            if !previous.vertical(contact.sign) {
                let collision = VerticalCollision::from(contact);
                log::debug!(
                    "vertical collision sign={} collider={} at ({}, {})",
                    collision.sign,
                    collision.collider,
                    collision.point.x,
                    collision.point.y
                );
                self.last_vertical_collision = Some(collision);
                event = Some(collision);
            }
        }

        if let Some(contact) = resolver.resolve_axis(
            Axis::Horizontal,
            horizontal_sign,
            &mut self.position,
            &mut self.velocity,
            self.half_extents,
        ) {
            self.flags.set(Axis::Horizontal, contact.sign, true);
        }

        if config.use_gravity && !self.grounded() {
            self.velocity.y -= config.gravity_acceleration() * dt;
        }

        self.integrate(dt);

        self.jump_cooldown = (self.jump_cooldown - dt).max(0.0);

        event
    }

    fn integrate(&mut self, dt: f32) {
        if self.velocity == Vec2::zeros() {
            return;
        }

        let tx = trend(self.velocity.x);
        if tx != 0 && self.flags.horizontal(tx) {
            self.velocity.x = 0.0;
        }
        let ty = trend(self.velocity.y);
        if ty != 0 && self.flags.vertical(ty) {
            self.velocity.y = 0.0;
        }

        self.position += self.velocity * dt;
    }

    // --- State queries ---

    #[inline]
    pub fn grounded(&self) -> bool {
        self.flags.down
    }

    #[inline]
    pub fn touch_ceiling(&self) -> bool {
        self.flags.up
    }

    #[inline]
    pub fn touch_wall_right(&self) -> bool {
        self.flags.right
    }

    #[inline]
    pub fn touch_wall_left(&self) -> bool {
        self.flags.left
    }

    /// Wall contact on the side the body faces.
    #[inline]
    pub fn touch_wall_front(&self) -> bool {
        self.flags.horizontal(self.facing)
    }

    /// Wall contact on the side behind the body.
    #[inline]
    pub fn touch_wall_back(&self) -> bool {
        self.flags.horizontal(-self.facing)
    }

    #[inline]
    pub fn horizontal_collision_sign(&self) -> i8 {
        self.flags.horizontal_sign()
    }

    #[inline]
    pub fn vertical_collision_sign(&self) -> i8 {
        self.flags.vertical_sign()
    }

    #[inline]
    pub fn flags(&self) -> CollisionFlags {
        self.flags
    }

    #[inline]
    pub fn facing(&self) -> i8 {
        self.facing
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    #[inline]
    pub fn jump_cooldown(&self) -> f32 {
        self.jump_cooldown
    }

    #[inline]
    pub fn jump_interval(&self) -> f32 {
        self.jump_interval
    }

    /// The most recent vertical collision reported by [`Self::step`].
    #[inline]
    pub fn last_vertical_collision(&self) -> Option<VerticalCollision> {
        self.last_vertical_collision
    }
}
