use crate::landmark::LANDMARK_COUNT;

/// Why a raw landmark array could not be turned into a [`HandLandmarks`].
///
/// [`HandLandmarks`]: crate::HandLandmarks
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LandmarkError {
    #[error("expected {LANDMARK_COUNT} landmarks, got {0}")]
    WrongCount(usize),
    #[error("landmark {0} has a non-finite coordinate")]
    NonFinite(usize),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GestureError {
    #[error("pinch threshold must be finite and > 0, got {0}")]
    InvalidThreshold(f32),
    #[error("surface must have a positive size, got {width}x{height}")]
    InvalidSurface { width: f32, height: f32 },
}
