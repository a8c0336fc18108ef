use crate::{
    layers::LayerMask,
    types::{BoxCastHit, Vec2},
};

/// Box-sweep query against the static platform layer.
///
/// Implementations move an axis-aligned box of `size` (full extents) centred at
/// `center` along `direction` for at most `max_distance`, and report the first
/// platform surface whose layers intersect `mask`.
///
/// - `direction` does not need to be normalized; a zero direction yields `None`.
/// - A box that starts overlapping a platform reports a hit at distance 0.
/// - No hit is the common case and is `None`, not an error.
pub trait BoxCaster {
    fn box_cast(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<BoxCastHit>;
}

impl<T: BoxCaster + ?Sized> BoxCaster for &T {
    #[inline]
    fn box_cast(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<BoxCastHit> {
        (**self).box_cast(center, size, direction, max_distance, mask)
    }
}
