//! Rapier-based query world for immutable platform geometry.
//!
//! Hosts build an in-memory Rapier 2D scene from a set of platform definitions
//! and hand it to the body as its [`BoxCaster`].
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Query-focused: only scene queries are run; nothing is ever stepped dynamically.
//! - Immutable world: platforms do not move after construction.

// Re-export Rapier so hosts can reach its types without depending on `rapier2d` directly.
pub use rapier2d;

use rapier2d::parry::{
    query::{ShapeCastOptions, ShapeCastStatus},
    shape::Cuboid,
};
use rapier2d::prelude::*;

use crate::{
    layers::{LayerBits, LayerMask},
    platforms::face_point,
    query::BoxCaster,
    types::{BoxCastHit, PlatformId, Vec2},
};

/// Schema-agnostic definition of an immutable platform collider.
///
/// Conventions
/// - Units are meters.
/// - Platforms are axis-aligned boxes; there is no rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: PlatformId,
    /// World-space centre.
    pub center: Vec2,
    pub half_extents: Vec2,
    pub layers: LayerMask,
}

/// Collider `user_data` layout: id in bits 32..64, layer bits in bits 0..32.
#[inline]
fn pack_user_data(id: PlatformId, layers: LayerMask) -> u128 {
    ((id as u128) << LayerBits::BITS) | layers.bits as u128
}

#[inline]
fn unpack_layers(user_data: u128) -> LayerMask {
    LayerMask::new((user_data & LayerBits::MAX as u128) as LayerBits)
}

#[inline]
fn unpack_id(user_data: u128) -> PlatformId {
    ((user_data >> LayerBits::BITS) & PlatformId::MAX as u128) as PlatformId
}

/// In-memory Rapier structures needed for shape casts against static platforms.
///
/// For immutable statics, this is built once at startup and reused every tick.
pub struct RapierPlatformWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
}

impl RapierPlatformWorld {
    /// Build a query world from a list of platform definitions.
    ///
    /// The input is sorted by `id` before insertion. Platforms with non-positive or
    /// non-finite extents are skipped with a warning.
    pub fn build(mut defs: Vec<PlatformDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for def in defs {
            let he = def.half_extents;
            if !(he.x > 0.0 && he.y > 0.0 && he.x.is_finite() && he.y.is_finite()) {
                log::warn!("skipping platform {} with half extents {:?}", def.id, he);
                continue;
            }

            let rb = RigidBodyBuilder::fixed()
                .translation(def.center)
                .build();
            let rb_handle = bodies.insert(rb);

            let collider = ColliderBuilder::cuboid(he.x, he.y)
                .user_data(pack_user_data(def.id, def.layers))
                .build();
            colliders.insert_with_parent(collider, rb_handle, &mut bodies);
        }

        // Run collision detection once so the broad-phase BVH holds every collider.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        let mut collision_pipeline = CollisionPipeline::new();

        let hooks = ();
        let events = ();

        collision_pipeline.step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &hooks,
            &events,
        );

        log::info!("built platform world with {} colliders", colliders.len());

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
        }
    }

    /// Create a borrowed `QueryPipeline` view for scene queries.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl BoxCaster for RapierPlatformWorld {
    fn box_cast(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<BoxCastHit> {
        let dir = direction.try_normalize(1.0e-7)?;
        if !(max_distance >= 0.0) || mask.is_empty() {
            return None;
        }

        let predicate =
            |_: ColliderHandle, collider: &Collider| unpack_layers(collider.user_data).intersects(mask);
        let filter = QueryFilter::default().predicate(&predicate);
        let pipeline = self.query_pipeline(filter);

        let half = size.abs() * 0.5;
        let shape = Cuboid::new(half);
        let shape_pos = Isometry::new(center, 0.0);

        // Unit velocity: time of impact is the travelled distance.
        let mut options = ShapeCastOptions::with_max_time_of_impact(max_distance);
        options.stop_at_penetration = true;

        let (handle, hit) = pipeline.cast_shape(&shape_pos, &dir, &shape, options)?;
        let collider = self.colliders.get(handle)?;

        let penetrating = matches!(hit.status, ShapeCastStatus::PenetratingOrWithinTargetDist)
            || hit.time_of_impact <= 0.0;

        let (point, normal, distance) = if penetrating {
            // Started inside the platform: the leading face is already past the
            // surface, so report the face the cast entered through.
            let aabb = collider.compute_aabb();
            let normal = -dir;
            let point = face_point(center, aabb.mins.coords, aabb.maxs.coords, normal);
            (point, normal, 0.0)
        } else {
            // Neither shape is rotated, so the local normal is also the world normal.
            // Orient it against the motion so it is the surface normal of the platform.
            let n = hit.normal1.into_inner();
            let normal = if n.dot(&dir) > 0.0 { -n } else { n };

            let distance = hit.time_of_impact;
            // Leading face of the cast box at impact.
            let point = center + dir * distance + dir.component_mul(&half);
            (point, normal, distance)
        };

        Some(BoxCastHit {
            point,
            normal,
            distance,
            collider: unpack_id(collider.user_data),
        })
    }
}
