/*!
Core data types and math aliases shared by the controller modules.

This module contains no algorithms. It defines the values exchanged between:
- the box-cast backends (`query`, `platforms`, `rapier_world`)
- the per-axis resolver
- the kinematic body and its movement helpers
*/

use nalgebra as na;

/// Common math alias. Units are meters and meters per second.
pub type Vec2 = na::Vector2<f32>;

/// Stable identifier of a static platform collider.
pub type PlatformId = u32;

/// One of the two axes the resolver sweeps independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Component index into a `Vec2` (x = 0, y = 1).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::Horizontal => 0,
            Axis::Vertical => 1,
        }
    }

    #[inline]
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Unit vector pointing along the positive side of this axis.
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::new(1.0, 0.0),
            Axis::Vertical => Vec2::new(0.0, 1.0),
        }
    }

    #[inline]
    pub fn component(self, v: Vec2) -> f32 {
        v[self.index()]
    }

    #[inline]
    pub fn set_component(self, v: &mut Vec2, value: f32) {
        v[self.index()] = value;
    }
}

/// Movement trend of a scalar: `1`, `-1`, or `0` for zero and NaN.
///
/// `f32::signum` maps `+0.0` to `1.0`, which would make a resting body sweep
/// sideways, so the trend is computed explicitly.
#[inline]
pub fn trend(value: f32) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Per-side contact state for the current tick.
///
/// Booleans, not counters: the last sweep on a side wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionFlags {
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Flag on the side facing `sign` along `axis`. Non-positive signs select left/down.
    #[inline]
    pub fn get(&self, axis: Axis, sign: i8) -> bool {
        match (axis, sign > 0) {
            (Axis::Horizontal, true) => self.right,
            (Axis::Horizontal, false) => self.left,
            (Axis::Vertical, true) => self.up,
            (Axis::Vertical, false) => self.down,
        }
    }

    #[inline]
    pub fn set(&mut self, axis: Axis, sign: i8, value: bool) {
        let flag = match (axis, sign > 0) {
            (Axis::Horizontal, true) => &mut self.right,
            (Axis::Horizontal, false) => &mut self.left,
            (Axis::Vertical, true) => &mut self.up,
            (Axis::Vertical, false) => &mut self.down,
        };
        *flag = value;
    }

    #[inline]
    pub fn horizontal(&self, sign: i8) -> bool {
        self.get(Axis::Horizontal, sign)
    }

    #[inline]
    pub fn vertical(&self, sign: i8) -> bool {
        self.get(Axis::Vertical, sign)
    }

    /// `1` when touching on the right, `-1` on the left, otherwise `0`.
    pub fn horizontal_sign(&self) -> i8 {
        if self.right {
            1
        } else if self.left {
            -1
        } else {
            0
        }
    }

    /// `1` when touching above, `-1` below, otherwise `0`.
    pub fn vertical_sign(&self) -> i8 {
        if self.up {
            1
        } else if self.down {
            -1
        } else {
            0
        }
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// First surface reported by a box cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxCastHit {
    /// World-space contact point on the hit surface.
    pub point: Vec2,
    /// World-space surface normal at the contact, pointing back toward the caster.
    pub normal: Vec2,
    /// Distance travelled along the cast direction before contact.
    pub distance: f32,
    /// Platform that was hit.
    pub collider: PlatformId,
}

/// A contact accepted by the resolver on one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisContact {
    pub axis: Axis,
    /// Direction that was swept (`1` or `-1`).
    pub sign: i8,
    pub point: Vec2,
    pub normal: Vec2,
    pub collider: PlatformId,
}

/// Emitted by [`crate::KinematicBody::step`] when a vertical contact becomes active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalCollision {
    /// `-1` for landing on ground, `1` for hitting a ceiling.
    pub sign: i8,
    pub point: Vec2,
    pub normal: Vec2,
    pub collider: PlatformId,
}

impl From<AxisContact> for VerticalCollision {
    fn from(contact: AxisContact) -> Self {
        Self {
            sign: contact.sign,
            point: contact.point,
            normal: contact.normal,
            collider: contact.collider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_treats_zero_and_nan_as_no_motion() {
        assert_eq!(trend(0.0), 0);
        assert_eq!(trend(-0.0), 0);
        assert_eq!(trend(f32::NAN), 0);
        assert_eq!(trend(1.0e-9), 1);
        assert_eq!(trend(-3.0), -1);
    }

    #[test]
    fn flags_select_side_by_sign() {
        let mut flags = CollisionFlags::default();
        flags.set(Axis::Vertical, -1, true);
        flags.set(Axis::Horizontal, 1, true);

        assert!(flags.down);
        assert!(flags.right);
        assert!(flags.vertical(-1));
        assert!(!flags.vertical(1));
        assert_eq!(flags.vertical_sign(), -1);
        assert_eq!(flags.horizontal_sign(), 1);

        flags.clear();
        assert!(!flags.any());
        assert_eq!(flags.horizontal_sign(), 0);
    }

    #[test]
    fn axis_components_round_trip_through_index() {
        let mut v = Vec2::new(1.0, 2.0);
        Axis::Vertical.set_component(&mut v, 5.0);
        assert_eq!(Axis::Vertical.component(v), 5.0);
        assert_eq!(Axis::Horizontal.component(v), 1.0);
        assert_eq!(Axis::Horizontal.cross(), Axis::Vertical);
    }
}
