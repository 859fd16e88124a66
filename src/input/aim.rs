//! Aim-Point Projection
//!
//! Maps the index finger to a screen-space aim point by extrapolating
//! forward along the finger's 2D direction. The pixel length of the
//! index MCP-to-tip segment, divided by an assumed anatomical finger
//! length, gives a pixels-per-unit scale without touching the world
//! landmarks. The result is mirrored horizontally to match the flipped
//! camera feed the player sees.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::landmarks::{HandObservation, INDEX_MCP, INDEX_TIP};
use crate::core::vec2::Vec2;

/// Tunables for the aim projection.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AimConfig {
    /// Assumed anatomical index-finger length (world units)
    pub finger_length: f32,
    /// How far past the fingertip to project the aim point (world units)
    pub forward_distance: f32,
    /// Pixel fallback extrapolation when the finger segment is too short
    /// to derive a scale
    pub fallback_px: f32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            finger_length: 0.4,
            forward_distance: 0.5,
            fallback_px: 10.0,
        }
    }
}

/// Minimum pixel length of the finger segment for a stable scale estimate.
const MIN_SEGMENT_PX: f32 = 1e-6;

/// Project the aim point for an observation, in mirrored pixel space.
///
/// Degenerate finger segments fall back to a short fixed extrapolation,
/// or to the raw tip position when there is no direction at all; neither
/// case produces NaN.
pub fn project_aim(obs: &HandObservation, width: f32, height: f32, cfg: &AimConfig) -> Vec2 {
    let mcp = obs.image[INDEX_MCP].to_pixels(width, height);
    let tip = obs.image[INDEX_TIP].to_pixels(width, height);

    let segment = tip - mcp;
    let len = segment.length();

    let projected = if len > MIN_SEGMENT_PX {
        let pixels_per_unit = len / cfg.finger_length;
        let dir = segment.scale(1.0 / len);
        tip + dir.scale(pixels_per_unit * cfg.forward_distance)
    } else if let Some(dir) = segment.try_normalize() {
        debug!("aim projection fallback: finger segment below scale threshold");
        tip + dir.scale(cfg.fallback_px)
    } else {
        debug!("aim projection fallback: no finger direction, using tip");
        tip
    };

    mirror_x(projected, width)
}

/// Mirrored pixel position of the index fingertip (the cursor's origin,
/// drawn on the hand itself).
pub fn screen_position(obs: &HandObservation, width: f32, height: f32) -> Vec2 {
    let tip = obs.image[INDEX_TIP];
    Vec2::new((1.0 - tip.x) * width, tip.y * height)
}

/// Flip the x coordinate to match a horizontally mirrored display.
#[inline]
fn mirror_x(p: Vec2, width: f32) -> Vec2 {
    Vec2::new(width - p.x, p.y)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::landmarks::{Handedness, Landmark};
    use crate::LANDMARKS_PER_HAND;

    const W: f32 = 640.0;
    const H: f32 = 480.0;

    fn obs_with_index(mcp: (f32, f32), tip: (f32, f32)) -> HandObservation {
        let mut image = [Landmark::default(); LANDMARKS_PER_HAND];
        image[INDEX_MCP] = Landmark::new(mcp.0, mcp.1, 0.0);
        image[INDEX_TIP] = Landmark::new(tip.0, tip.1, 0.0);
        HandObservation::new(
            image,
            [Landmark::default(); LANDMARKS_PER_HAND],
            Handedness::Right,
            0.9,
        )
    }

    #[test]
    fn test_projection_extends_past_tip() {
        // Finger pointing straight up: mcp (320, 312) -> tip (320, 264),
        // segment 48 px. Scale = 48 / 0.4 = 120 px/unit, forward 0.5
        // units = 60 px further up. Mirror leaves x = 320 unchanged.
        let obs = obs_with_index((0.5, 0.65), (0.5, 0.55));
        let aim = project_aim(&obs, W, H, &AimConfig::default());
        assert!((aim.x - 320.0).abs() < 1e-3);
        assert!((aim.y - 204.0).abs() < 1e-3);
    }

    #[test]
    fn test_projection_is_mirrored() {
        // Finger on the left third of the image lands on the right third
        // of the mirrored display
        let obs = obs_with_index((0.25, 0.65), (0.25, 0.55));
        let aim = project_aim(&obs, W, H, &AimConfig::default());
        assert!((aim.x - 480.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_segment_returns_tip() {
        // MCP and tip coincide: no direction, tip position (mirrored)
        let obs = obs_with_index((0.5, 0.5), (0.5, 0.5));
        let aim = project_aim(&obs, W, H, &AimConfig::default());
        assert_eq!(aim, Vec2::new(320.0, 240.0));
        assert!(aim.x.is_finite() && aim.y.is_finite());
    }

    #[test]
    fn test_screen_position_mirrors_tip() {
        let obs = obs_with_index((0.5, 0.65), (0.25, 0.5));
        let pos = screen_position(&obs, W, H);
        assert_eq!(pos, Vec2::new(480.0, 240.0));
    }

    #[test]
    fn test_forward_distance_scales_projection() {
        let obs = obs_with_index((0.5, 0.65), (0.5, 0.55));
        let near = AimConfig {
            forward_distance: 0.25,
            ..AimConfig::default()
        };
        let aim = project_aim(&obs, W, H, &near);
        // Half the forward distance: 30 px instead of 60
        assert!((aim.y - 234.0).abs() < 1e-3);
    }
}
