//! Landmark topology and the surface coordinate system.

use serde::{Deserialize, Serialize};

use crate::error::{GestureError, LandmarkError};

// ════════════════════════════════════════════════════════════════════════════
// Hand landmark indices (21-point topology)
// ════════════════════════════════════════════════════════════════════════════

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Bone connections, used by the skeleton overlay.
pub const HAND_SKELETON: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (WRIST, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (WRIST, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (INDEX_MCP, MIDDLE_MCP),
];

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One tracked point in normalized image coordinates.
///
/// `x`/`y` are in `[0, 1]` relative to the source frame; `z` is relative depth
/// and is carried through untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }

    /// Planar distance to `other`, ignoring depth.
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A validated hand: exactly [`LANDMARK_COUNT`] finite landmarks.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks([Landmark; LANDMARK_COUNT]);

impl HandLandmarks {
    /// Landmark at `index`, or `None` past [`LANDMARK_COUNT`].
    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.0.get(index).copied()
    }

    pub fn thumb_tip(&self) -> Landmark { self.0[THUMB_TIP] }
    pub fn index_tip(&self) -> Landmark { self.0[INDEX_TIP] }
    pub fn wrist(&self)     -> Landmark { self.0[WRIST] }

    pub fn as_slice(&self) -> &[Landmark] {
        &self.0
    }
}

impl TryFrom<&[Landmark]> for HandLandmarks {
    type Error = LandmarkError;

    fn try_from(raw: &[Landmark]) -> Result<Self, Self::Error> {
        let arr: [Landmark; LANDMARK_COUNT] = raw
            .try_into()
            .map_err(|_| LandmarkError::WrongCount(raw.len()))?;
        if let Some(bad) = arr.iter().position(|lm| !lm.is_finite()) {
            return Err(LandmarkError::NonFinite(bad));
        }
        Ok(HandLandmarks(arr))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Surface coordinates
// ════════════════════════════════════════════════════════════════════════════

/// A position on the presentation surface, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The presentation surface that landmarks are projected onto.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width:  f32,
    pub height: f32,
}

impl Default for Surface {
    fn default() -> Self {
        Surface::new(800.0, 600.0)
    }
}

impl Surface {
    pub const fn new(width: f32, height: f32) -> Self {
        Surface { width, height }
    }

    pub fn validate(&self) -> Result<(), GestureError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(GestureError::InvalidSurface { width: self.width, height: self.height })
        }
    }

    /// Project a normalized landmark onto the surface, mirroring x.
    pub fn project(&self, lm: Landmark) -> Point {
        Point {
            x: (1.0 - lm.x) * self.width,
            y: lm.y * self.height,
        }
    }

    /// Inverse of [`Surface::project`] for the planar part.
    pub fn unproject(&self, p: Point) -> Landmark {
        Landmark {
            x: 1.0 - p.x / self.width,
            y: p.y / self.height,
            z: 0.0,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
