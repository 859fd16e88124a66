//! Detector-Facing Observation Types
//!
//! The hand-landmark detector is an external collaborator treated as a
//! black box. Per frame it yields zero or more [`HandObservation`]s, each
//! carrying 21 image-normalized landmarks, 21 world-scale landmarks and a
//! handedness classification. Observations are ephemeral: produced fresh
//! every frame, read, never mutated.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::core::vec3::Vec3;
use crate::LANDMARKS_PER_HAND;

// =============================================================================
// LANDMARK INDICES (fixed hand topology)
// =============================================================================

/// Wrist landmark index
pub const WRIST: usize = 0;
/// Thumb base landmark index
pub const THUMB_BASE: usize = 2;
/// Thumb middle-joint landmark index
pub const THUMB_MID: usize = 3;
/// Thumb tip landmark index
pub const THUMB_TIP: usize = 4;
/// Index-finger MCP (base knuckle) landmark index
pub const INDEX_MCP: usize = 5;
/// Index-finger PIP (middle knuckle) landmark index
pub const INDEX_PIP: usize = 6;
/// Index-finger tip landmark index
pub const INDEX_TIP: usize = 8;
/// Pinky MCP landmark index
pub const PINKY_MCP: usize = 17;

// =============================================================================
// LANDMARK
// =============================================================================

/// A single tracked anatomical point.
///
/// Either image-normalized (`x`, `y` in `[0, 1]`, `z` relative depth) or
/// world-scale (meters, origin at the hand centroid), depending on which
/// of the two observation arrays it came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate (image convention: grows downward)
    pub y: f32,
    /// Depth coordinate
    pub z: f32,
}

impl Landmark {
    /// Create a new landmark.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Interpret as a 3D point.
    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Map an image-normalized landmark to pixel coordinates.
    #[inline]
    pub fn to_pixels(self, width: f32, height: f32) -> Vec2 {
        Vec2::new(self.x * width, self.y * height)
    }
}

// =============================================================================
// HANDEDNESS
// =============================================================================

/// Handedness classification of a detected hand.
///
/// Doubles as the player's display identity: with a front-facing camera
/// there are at most two hands in frame and the label is stable enough to
/// key scores by.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Handedness {
    /// Detector's "Left" label
    Left,
    /// Detector's "Right" label
    Right,
}

impl Handedness {
    /// The opposite label.
    ///
    /// A front-facing camera mirrors the scene, so the detector's "Left"
    /// is the player's right hand. Display strings use the mirrored label.
    pub fn mirrored(self) -> Self {
        match self {
            Handedness::Left => Handedness::Right,
            Handedness::Right => Handedness::Left,
        }
    }
}

impl std::fmt::Display for Handedness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Handedness::Left => write!(f, "Left"),
            Handedness::Right => write!(f, "Right"),
        }
    }
}

// =============================================================================
// HAND OBSERVATION
// =============================================================================

/// One detected hand in one frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandObservation {
    /// 21 image-normalized landmarks (x, y in `[0, 1]`, z relative depth)
    pub image: [Landmark; LANDMARKS_PER_HAND],
    /// 21 world-scale landmarks (meters, origin at the hand centroid)
    pub world: [Landmark; LANDMARKS_PER_HAND],
    /// Handedness classification
    pub handedness: Handedness,
    /// Classification confidence in `[0, 1]`
    pub confidence: f32,
}

impl HandObservation {
    /// Create an observation from complete landmark arrays.
    pub fn new(
        image: [Landmark; LANDMARKS_PER_HAND],
        world: [Landmark; LANDMARKS_PER_HAND],
        handedness: Handedness,
        confidence: f32,
    ) -> Self {
        Self {
            image,
            world,
            handedness,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_to_pixels() {
        let lm = Landmark::new(0.5, 0.25, 0.0);
        let px = lm.to_pixels(640.0, 480.0);
        assert_eq!(px, Vec2::new(320.0, 120.0));
    }

    #[test]
    fn test_handedness_mirrored() {
        assert_eq!(Handedness::Left.mirrored(), Handedness::Right);
        assert_eq!(Handedness::Right.mirrored(), Handedness::Left);
        assert_eq!(Handedness::Left.mirrored().mirrored(), Handedness::Left);
    }

    #[test]
    fn test_handedness_display() {
        assert_eq!(Handedness::Left.to_string(), "Left");
        assert_eq!(Handedness::Right.to_string(), "Right");
    }
}
