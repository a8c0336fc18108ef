use crate::{
    layers::LayerMask,
    query::BoxCaster,
    settings::{CROSS_AXIS_SHRINK, MIN_ADVANCE},
    types::{Axis, AxisContact, Vec2},
};

/// The box cast issued for one axis of one tick.
///
/// The probe is a thin slab of thickness `advance` starting at the body centre
/// and extending toward `sign`, swept by the body's half extent. It therefore
/// reaches `advance` past the body's face: at least [`MIN_ADVANCE`], or the
/// distance the body would travel this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepProbe {
    pub axis: Axis,
    pub sign: i8,
    pub advance: f32,
    pub center: Vec2,
    pub size: Vec2,
    pub direction: Vec2,
    pub max_distance: f32,
}

impl SweepProbe {
    /// Build the probe for `axis` in direction `sign`. Returns `None` for `sign == 0`.
    pub fn new(
        axis: Axis,
        sign: i8,
        position: Vec2,
        velocity: Vec2,
        half_extents: Vec2,
        dt: f32,
    ) -> Option<Self> {
        if sign == 0 {
            return None;
        }
        let s = f32::from(sign.signum());
        let advance = MIN_ADVANCE.max(axis.component(velocity).abs() * dt);

        let mut center = position;
        axis.set_component(&mut center, axis.component(position) + s * advance * 0.5);

        let cross = axis.cross();
        let mut size = Vec2::zeros();
        axis.set_component(&mut size, advance);
        cross.set_component(&mut size, cross.component(half_extents) * 2.0 * CROSS_AXIS_SHRINK);

        Some(Self {
            axis,
            sign: sign.signum(),
            advance,
            center,
            size,
            direction: axis.unit() * s,
            max_distance: axis.component(half_extents),
        })
    }
}

/// Per-axis sweep-and-snap against the platform layer.
///
/// One resolver is built per tick; it borrows the caster immutably.
pub struct CollisionResolver<'a, C: BoxCaster + ?Sized> {
    caster: &'a C,
    mask: LayerMask,
    dt: f32,
}

impl<'a, C: BoxCaster + ?Sized> CollisionResolver<'a, C> {
    pub fn new(caster: &'a C, mask: LayerMask, dt: f32) -> Self {
        Self { caster, mask, dt }
    }

    /// Sweep one axis toward `sign` and snap on contact.
    ///
    /// On a hit whose normal has a component along `axis`:
    /// - the velocity component on `axis` is zeroed,
    /// - `position` on `axis` is set to `hit.point - sign * half_extent`,
    /// - the contact is returned.
    ///
    /// Misses, glancing hits and `sign == 0` leave position and velocity untouched.
    pub fn resolve_axis(
        &self,
        axis: Axis,
        sign: i8,
        position: &mut Vec2,
        velocity: &mut Vec2,
        half_extents: Vec2,
    ) -> Option<AxisContact> {
        let probe = SweepProbe::new(axis, sign, *position, *velocity, half_extents, self.dt)?;

        let hit = self.caster.box_cast(
            probe.center,
            probe.size,
            probe.direction,
            probe.max_distance,
            self.mask,
        )?;
        if axis.component(hit.normal) == 0.0 {
            return None;
        }

        if axis.component(*velocity).abs() > 0.0 {
            axis.set_component(velocity, 0.0);
        }

        let s = f32::from(probe.sign);
        let snapped = axis.component(hit.point) - s * axis.component(half_extents);
        axis.set_component(position, snapped);

        log::trace!(
            "contact {:?} sign={} collider={} snapped to {}",
            axis,
            probe.sign,
            hit.collider,
            snapped
        );

        Some(AxisContact {
            axis,
            sign: probe.sign,
            point: hit.point,
            normal: hit.normal,
            collider: hit.collider,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        platforms::{AabbPlatforms, Platform},
        types::{BoxCastHit, PlatformId},
    };

    const DT: f32 = 0.02;

    fn half() -> Vec2 {
        Vec2::new(0.5, 0.5)
    }

    fn floor_at(top: f32) -> Platform {
        Platform::new(1, Vec2::new(0.0, top - 0.5), Vec2::new(20.0, 0.5), LayerMask::all())
    }

    fn wall_at(left_face: f32) -> Platform {
        Platform::new(2, Vec2::new(left_face + 0.5, 5.0), Vec2::new(0.5, 10.0), LayerMask::all())
    }

    /// Reports a hit whose normal is perpendicular to any vertical sweep.
    struct GlancingCaster;

    impl BoxCaster for GlancingCaster {
        fn box_cast(&self, center: Vec2, _: Vec2, _: Vec2, _: f32, _: LayerMask) -> Option<BoxCastHit> {
            Some(BoxCastHit {
                point: center,
                normal: Vec2::new(1.0, 0.0),
                distance: 0.0,
                collider: 9 as PlatformId,
            })
        }
    }

    #[test]
    fn probe_shape_follows_axis_and_speed() {
        let probe = SweepProbe::new(
            Axis::Vertical,
            -1,
            Vec2::new(0.0, 3.0),
            Vec2::new(0.0, -5.0),
            Vec2::new(0.5, 1.0),
            DT,
        )
        .unwrap();

        // |v| * dt = 0.1 beats the minimum advance.
        assert!((probe.advance - 0.1).abs() < 1.0e-6);
        assert!((probe.center.y - 2.95).abs() < 1.0e-6);
        assert!((probe.size.x - 0.95).abs() < 1.0e-6);
        assert!((probe.size.y - 0.1).abs() < 1.0e-6);
        assert_eq!(probe.direction, Vec2::new(0.0, -1.0));
        assert_eq!(probe.max_distance, 1.0);
    }

    #[test]
    fn zero_sign_skips_the_cast() {
        assert!(SweepProbe::new(Axis::Horizontal, 0, Vec2::zeros(), Vec2::zeros(), half(), DT).is_none());

        let world = AabbPlatforms::new(vec![wall_at(0.5)]);
        let resolver = CollisionResolver::new(&world, LayerMask::all(), DT);
        let mut pos = Vec2::new(0.0, 0.5);
        let mut vel = Vec2::zeros();
        assert!(resolver.resolve_axis(Axis::Horizontal, 0, &mut pos, &mut vel, half()).is_none());
        assert_eq!(pos, Vec2::new(0.0, 0.5));
    }

    #[test]
    fn hit_zeroes_velocity_and_snaps_to_surface() {
        let world = AabbPlatforms::new(vec![floor_at(0.0)]);
        let resolver = CollisionResolver::new(&world, LayerMask::all(), DT);

        // Feet 0.05 above the floor, falling fast enough to reach it this tick.
        let mut pos = Vec2::new(0.0, 0.55);
        let mut vel = Vec2::new(1.0, -4.0);
        let contact = resolver
            .resolve_axis(Axis::Vertical, -1, &mut pos, &mut vel, half())
            .expect("floor within probe reach");

        assert_eq!(vel, Vec2::new(1.0, 0.0));
        assert_eq!(pos.y, contact.point.y + half().y);
        assert_eq!(pos.y, 0.5);
        assert_eq!(pos.x, 0.0);
        assert_eq!(contact.sign, -1);
        assert_eq!(contact.normal, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn minimum_advance_detects_resting_contact_at_zero_speed() {
        let world = AabbPlatforms::new(vec![floor_at(0.0)]);
        let resolver = CollisionResolver::new(&world, LayerMask::all(), DT);

        let mut pos = Vec2::new(0.0, 0.5);
        let mut vel = Vec2::zeros();
        assert!(resolver.resolve_axis(Axis::Vertical, -1, &mut pos, &mut vel, half()).is_some());
        assert_eq!(pos, Vec2::new(0.0, 0.5));

        // Also detects a gap smaller than MIN_ADVANCE, snapping down onto the surface.
        let mut pos = Vec2::new(0.0, 0.51);
        assert!(resolver.resolve_axis(Axis::Vertical, -1, &mut pos, &mut vel, half()).is_some());
        assert_eq!(pos.y, 0.5);
    }

    #[test]
    fn surface_beyond_probe_reach_is_ignored() {
        let world = AabbPlatforms::new(vec![floor_at(0.0)]);
        let resolver = CollisionResolver::new(&world, LayerMask::all(), DT);

        let mut pos = Vec2::new(0.0, 0.6);
        let mut vel = Vec2::new(0.0, -1.0);
        assert!(resolver.resolve_axis(Axis::Vertical, -1, &mut pos, &mut vel, half()).is_none());
        assert_eq!(pos.y, 0.6);
        assert_eq!(vel.y, -1.0);
    }

    #[test]
    fn horizontal_sweep_stops_at_wall() {
        let world = AabbPlatforms::new(vec![wall_at(1.0)]);
        let resolver = CollisionResolver::new(&world, LayerMask::all(), DT);

        let mut pos = Vec2::new(0.49, 0.5);
        let mut vel = Vec2::new(3.0, 0.0);
        let contact = resolver
            .resolve_axis(Axis::Horizontal, 1, &mut pos, &mut vel, half())
            .unwrap();

        assert_eq!(contact.point.x, 1.0);
        assert_eq!(pos.x, 0.5);
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn glancing_normal_is_not_a_contact() {
        let resolver = CollisionResolver::new(&GlancingCaster, LayerMask::all(), DT);
        let mut pos = Vec2::new(0.0, 1.0);
        let mut vel = Vec2::new(0.0, -2.0);

        assert!(resolver.resolve_axis(Axis::Vertical, -1, &mut pos, &mut vel, half()).is_none());
        assert_eq!(pos, Vec2::new(0.0, 1.0));
        assert_eq!(vel, Vec2::new(0.0, -2.0));
    }

    #[test]
    fn cross_axis_shrink_avoids_grazing_adjacent_wall() {
        // Standing on the floor, flush against a wall on the right.
        let world = AabbPlatforms::new(vec![floor_at(0.0), wall_at(0.5)]);
        let resolver = CollisionResolver::new(&world, LayerMask::all(), DT);

        let mut pos = Vec2::new(0.0, 0.5);
        let mut vel = Vec2::zeros();
        let contact = resolver
            .resolve_axis(Axis::Vertical, -1, &mut pos, &mut vel, half())
            .unwrap();
        assert_eq!(contact.collider, 1);
        assert_eq!(contact.normal, Vec2::new(0.0, 1.0));
    }
}
