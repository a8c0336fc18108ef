use thiserror::Error;

/// Errors raised when constructing a [`crate::KinematicBody`].
///
/// These are the only failures in the crate; per-tick operations never fail.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BodyError {
    #[error("half extents must be finite and positive, got ({x}, {y})")]
    InvalidHalfExtents { x: f32, y: f32 },

    #[error("initial position must be finite, got ({x}, {y})")]
    NonFinitePosition { x: f32, y: f32 },
}
