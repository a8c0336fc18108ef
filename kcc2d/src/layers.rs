use num_traits::PrimInt;
use serde::{Deserialize, Serialize};

/// Primitive storage for collision layer masks.
pub type LayerBits = u32;

/// The filter a body sweeps against. Platforms collide when their layers intersect it.
pub type LayerMask = BitmaskFlags<LayerBits>;

/// A plain bitmask container over a primitive integer.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    /// Every bit set: matches any platform with at least one layer.
    pub fn all() -> Self {
        Self { bits: !T::zero() }
    }

    /// True when the two masks share at least one layer.
    #[inline]
    pub fn intersects(&self, other: Self) -> bool {
        (self.bits & other.bits) != T::zero()
    }

    /// An empty mask never matches, so a sweep with it can be skipped.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }
}
