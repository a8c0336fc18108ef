use kcc2d::{LayerMask, PlatformDef, RapierPlatformWorld, Vec2};

use crate::scene::{PlatformRecord, Scene};

/// Convert a single scene platform record to the schema-agnostic definition.
///
/// Corners may be given in any order; the box spans both.
pub fn platform_def(record: &PlatformRecord) -> PlatformDef {
    let a = Vec2::new(record.min[0], record.min[1]);
    let b = Vec2::new(record.max[0], record.max[1]);
    PlatformDef {
        id: record.id,
        center: (a + b) * 0.5,
        half_extents: (b - a).abs() * 0.5,
        layers: LayerMask::new(record.layers),
    }
}

/// Build the immutable query world for a scene.
pub fn build_world(scene: &Scene) -> RapierPlatformWorld {
    let defs = scene.platforms.iter().map(platform_def).collect();
    RapierPlatformWorld::build(defs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_corners_become_center_and_half_extents() {
        let def = platform_def(&PlatformRecord {
            id: 7,
            min: [4.0, 2.0],
            max: [0.0, 0.0],
            layers: 0b100,
        });

        assert_eq!(def.id, 7);
        assert_eq!(def.center, Vec2::new(2.0, 1.0));
        assert_eq!(def.half_extents, Vec2::new(2.0, 1.0));
        assert_eq!(def.layers, LayerMask::new(0b100));
    }

    #[test]
    fn default_scene_builds_every_platform() {
        let scene = Scene::default();
        let world = build_world(&scene);
        assert_eq!(world.len(), scene.platforms.len());
    }
}
