/*!
Brute-force box casting over a list of static AABB platforms.

Every cast scans all platforms linearly, so this backend suits small levels and
tests. Hits are exact: the reported point lies on the platform face, so a body
snapped against it rests at exactly `face ± half_extent`.

Algorithm (per platform):
- Grow the platform by the cast box's half size (Minkowski sum), reducing the
  sweep to a ray from the cast centre.
- Slab-test the ray; the axis with the latest entry gives the hit face.
- A box already flush with a face on an axis it does not move along reports a
  glancing contact on that face at distance 0 if it starts overlapping on the
  other axis.
*/

use crate::{
    layers::LayerMask,
    query::BoxCaster,
    types::{BoxCastHit, PlatformId, Vec2},
};

/// Directions with a component below this are treated as parallel to that axis.
const PARALLEL_EPS: f32 = 1.0e-7;

/// A static axis-aligned platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Platform {
    pub id: PlatformId,
    pub center: Vec2,
    pub half_extents: Vec2,
    pub layers: LayerMask,
}

impl Platform {
    #[inline]
    pub fn new(id: PlatformId, center: Vec2, half_extents: Vec2, layers: LayerMask) -> Self {
        Self {
            id,
            center,
            half_extents,
            layers,
        }
    }

    /// Build from min/max corners.
    pub fn from_corners(id: PlatformId, min: Vec2, max: Vec2, layers: LayerMask) -> Self {
        Self::new(id, (min + max) * 0.5, (max - min).abs() * 0.5, layers)
    }

    #[inline]
    pub fn mins(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn maxs(&self) -> Vec2 {
        self.center + self.half_extents
    }
}

/// A static platform layer queried by linear scan.
#[derive(Clone, Debug, Default)]
pub struct AabbPlatforms {
    platforms: Vec<Platform>,
}

impl AabbPlatforms {
    pub fn new(mut platforms: Vec<Platform>) -> Self {
        // Deterministic tie-breaking between equally distant hits.
        platforms.sort_by_key(|p| p.id);
        Self { platforms }
    }

    pub fn push(&mut self, platform: Platform) {
        let at = self.platforms.partition_point(|p| p.id <= platform.id);
        self.platforms.insert(at, platform);
    }

    #[inline]
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.platforms.len()
    }
}

impl BoxCaster for AabbPlatforms {
    fn box_cast(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<BoxCastHit> {
        let len = direction.norm();
        if !(len > PARALLEL_EPS) || !(max_distance >= 0.0) || mask.is_empty() {
            return None;
        }
        let dir = direction / len;
        let half = size.abs() * 0.5;

        let mut best: Option<BoxCastHit> = None;
        for platform in &self.platforms {
            if !platform.layers.intersects(mask) {
                continue;
            }
            if let Some(hit) = sweep_against(platform, center, half, dir, max_distance) {
                if best.map_or(true, |b| hit.distance < b.distance) {
                    best = Some(hit);
                }
            }
        }
        best
    }
}

/// Contact point on the face of box `mins..maxs` that `normal` points out of.
///
/// Along the normal's axis the point sits exactly on that face; on the other
/// axis `travelled` is clamped to the face's extent.
pub(crate) fn face_point(travelled: Vec2, mins: Vec2, maxs: Vec2, normal: Vec2) -> Vec2 {
    let mut point = Vec2::new(
        travelled.x.clamp(mins.x, maxs.x),
        travelled.y.clamp(mins.y, maxs.y),
    );
    for i in 0..2 {
        if normal[i] > 0.0 {
            point[i] = maxs[i];
        } else if normal[i] < 0.0 {
            point[i] = mins[i];
        }
    }
    point
}

/// Sweep a box (centre + half size) along unit `dir` against one platform.
fn sweep_against(
    platform: &Platform,
    center: Vec2,
    half: Vec2,
    dir: Vec2,
    max_distance: f32,
) -> Option<BoxCastHit> {
    let grown_min = platform.mins() - half;
    let grown_max = platform.maxs() + half;

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec2::zeros();

    for i in 0..2 {
        let o = center[i];
        let d = dir[i];

        if d.abs() <= PARALLEL_EPS {
            if o < grown_min[i] || o > grown_max[i] {
                return None;
            }
            // Flush with a face we slide along: in contact from the start.
            let side = if o == grown_min[i] {
                -1.0
            } else if o == grown_max[i] {
                1.0
            } else {
                continue;
            };
            if 0.0 > t_enter {
                t_enter = 0.0;
                normal = Vec2::zeros();
                normal[i] = side;
            }
            continue;
        }

        let t1 = (grown_min[i] - o) / d;
        let t2 = (grown_max[i] - o) / d;
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };

        if near > t_enter {
            t_enter = near;
            normal = Vec2::zeros();
            normal[i] = if d > 0.0 { -1.0 } else { 1.0 };
        }
        t_exit = t_exit.min(far);
    }

    if t_enter > t_exit || t_exit < 0.0 || t_enter > max_distance {
        return None;
    }

    if t_enter < 0.0 {
        // Started overlapping: report at distance 0 against the motion.
        normal = -dir;
    }
    let distance = t_enter.max(0.0);

    let point = face_point(center + dir * distance, platform.mins(), platform.maxs(), normal);

    Some(BoxCastHit {
        point,
        normal,
        distance,
        collider: platform.id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{body::KinematicBody, settings::StepConfig};

    fn floor() -> Platform {
        // Top face at y = 0.
        Platform::new(1, Vec2::new(0.0, -0.5), Vec2::new(10.0, 0.5), LayerMask::all())
    }

    #[test]
    fn downward_cast_hits_top_face_exactly() {
        let world = AabbPlatforms::new(vec![floor()]);
        let hit = world
            .box_cast(
                Vec2::new(1.0, 2.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, -1.0),
                5.0,
                LayerMask::all(),
            )
            .expect("floor is below the box");

        assert_eq!(hit.collider, 1);
        assert_eq!(hit.point.y, 0.0);
        assert_eq!(hit.point.x, 1.0);
        assert_eq!(hit.normal, Vec2::new(0.0, 1.0));
        assert!((hit.distance - 1.5).abs() < 1.0e-6);
    }

    #[test]
    fn cast_respects_max_distance() {
        let world = AabbPlatforms::new(vec![floor()]);
        let hit = world.box_cast(
            Vec2::new(0.0, 2.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, -1.0),
            1.0,
            LayerMask::all(),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn cast_filters_by_layer() {
        let mut platform = floor();
        platform.layers = LayerMask::new(0b10);
        let world = AabbPlatforms::new(vec![platform]);

        let args = (Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, -1.0), 5.0);
        assert!(world.box_cast(args.0, args.1, args.2, args.3, LayerMask::new(0b01)).is_none());
        assert!(world.box_cast(args.0, args.1, args.2, args.3, LayerMask::new(0b10)).is_some());
    }

    #[test]
    fn nearest_platform_wins() {
        let near = Platform::new(7, Vec2::new(3.0, 0.0), Vec2::new(0.5, 0.5), LayerMask::all());
        let far = Platform::new(2, Vec2::new(6.0, 0.0), Vec2::new(0.5, 0.5), LayerMask::all());
        let world = AabbPlatforms::new(vec![far, near]);

        let hit = world
            .box_cast(
                Vec2::zeros(),
                Vec2::new(1.0, 1.0),
                Vec2::new(1.0, 0.0),
                10.0,
                LayerMask::all(),
            )
            .unwrap();
        assert_eq!(hit.collider, 7);
        assert_eq!(hit.point.x, 2.5);
        assert_eq!(hit.normal, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn box_sliding_along_a_face_reports_glancing_contact() {
        // Box resting on the floor, cast sideways: flush on Y, overlapping on X.
        let world = AabbPlatforms::new(vec![floor()]);
        let hit = world
            .box_cast(
                Vec2::new(0.0, 0.5),
                Vec2::new(1.0, 1.0),
                Vec2::new(1.0, 0.0),
                1.0,
                LayerMask::all(),
            )
            .unwrap();
        assert_eq!(hit.distance, 0.0);
        assert_eq!(hit.normal, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn cast_starting_inside_a_platform_reports_the_face_it_entered() {
        // Cast box spans y in [-0.3, 0.7]: already overlapping the floor's top.
        let world = AabbPlatforms::new(vec![floor()]);
        let hit = world
            .box_cast(
                Vec2::new(2.0, 0.2),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, -1.0),
                0.5,
                LayerMask::all(),
            )
            .unwrap();

        assert_eq!(hit.distance, 0.0);
        assert_eq!(hit.normal, Vec2::new(0.0, 1.0));
        assert_eq!(hit.point, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn fast_falling_body_snaps_onto_the_surface_in_one_tick() {
        let world = AabbPlatforms::new(vec![floor()]);
        let config = StepConfig {
            use_gravity: false,
            ..StepConfig::default()
        };

        // Each speed moves the probe past the body's face before the sweep starts.
        for vy in [-30.0, -60.0, -100.0] {
            let mut body = KinematicBody::new(Vec2::new(0.0, 0.5), Vec2::new(0.5, 0.5)).unwrap();
            body.set_velocity(Vec2::new(0.0, vy));

            let landing = body.step(&world, 0.02, &config).unwrap();

            assert_eq!(landing.point.y, 0.0);
            assert_eq!(body.position().y, 0.5);
            assert_eq!(body.velocity().y, 0.0);
            assert!(body.grounded());
        }
    }

    #[test]
    fn empty_mask_never_hits() {
        let world = AabbPlatforms::new(vec![floor()]);
        let hit = world.box_cast(
            Vec2::new(0.0, 2.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, -1.0),
            5.0,
            LayerMask::default(),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn zero_direction_never_hits() {
        let world = AabbPlatforms::new(vec![floor()]);
        let hit = world.box_cast(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::zeros(),
            1.0,
            LayerMask::all(),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn push_keeps_platforms_sorted_by_id() {
        let mut world = AabbPlatforms::new(vec![floor()]);
        world.push(Platform::from_corners(0, Vec2::new(-1.0, 0.0), Vec2::new(1.0, 1.0), LayerMask::all()));
        assert_eq!(world.len(), 2);
        assert_eq!(world.platforms()[0].id, 0);
        assert_eq!(world.platforms()[0].half_extents, Vec2::new(1.0, 0.5));
    }
}
