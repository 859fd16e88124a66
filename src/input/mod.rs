//! Landmark Interpretation
//!
//! The detector-facing half of the core: raw [`HandObservation`]s in,
//! one interpreted [`HandReading`] out per hand per frame.
//!
//! ## Module Structure
//!
//! - `landmarks`: observation types and landmark index constants
//! - `pose`: orthonormal hand basis and Euler angles
//! - `gesture`: thumb-bend shoot intent and pinch distance
//! - `aim`: aim-point projection and display mirroring

pub mod aim;
pub mod gesture;
pub mod landmarks;
pub mod pose;

use tracing::debug;

use crate::core::vec2::Vec2;
use aim::AimConfig;
use gesture::TriggerConfig;
use landmarks::{HandObservation, Handedness};
use pose::OrientationAngles;

/// One hand's interpreted input for a single frame.
///
/// Everything the game half needs, with the landmark geometry already
/// boiled away. `angles` is `None` when the hand frame was degenerate
/// this frame; the registry then keeps the previous orientation.
#[derive(Clone, Copy, Debug)]
pub struct HandReading {
    /// Detector's handedness label
    pub label: Handedness,
    /// Handedness classification confidence
    pub confidence: f32,
    /// Orientation angles, if the frame was well-defined
    pub angles: Option<OrientationAngles>,
    /// Mirrored fingertip position (cursor origin), pixels
    pub screen_pos: Vec2,
    /// Mirrored projected aim point, pixels
    pub aim_pos: Vec2,
    /// Shoot-intent flag for this frame
    pub shooting: bool,
    /// Raw 3D thumb-tip to index-base distance (meters), pre-smoothing
    pub pinch_distance: f32,
}

/// Interpret a single observation into a [`HandReading`].
///
/// Degenerate orientation geometry is logged and reported as
/// `angles: None`; it never aborts the rest of the reading.
pub fn interpret(
    obs: &HandObservation,
    width: f32,
    height: f32,
    trigger: &TriggerConfig,
    aim_cfg: &AimConfig,
) -> HandReading {
    let angles = match pose::estimate_orientation(obs) {
        Ok(angles) => Some(angles),
        Err(err) => {
            debug!(hand = %obs.handedness, %err, "skipping orientation update");
            None
        }
    };

    HandReading {
        label: obs.handedness,
        confidence: obs.confidence,
        angles,
        screen_pos: aim::screen_position(obs, width, height),
        aim_pos: aim::project_aim(obs, width, height, aim_cfg),
        shooting: gesture::is_shooting(obs, trigger),
        pinch_distance: gesture::pinch_distance(obs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::landmarks::{
        Landmark, INDEX_MCP, INDEX_PIP, INDEX_TIP, PINKY_MCP, THUMB_BASE, THUMB_MID, THUMB_TIP,
        WRIST,
    };
    use crate::LANDMARKS_PER_HAND;

    fn plausible_observation() -> HandObservation {
        let mut image = [Landmark::default(); LANDMARKS_PER_HAND];
        image[INDEX_MCP] = Landmark::new(0.5, 0.65, 0.0);
        image[INDEX_PIP] = Landmark::new(0.5, 0.60, 0.0);
        image[INDEX_TIP] = Landmark::new(0.5, 0.55, 0.0);
        // Straight thumb, above the index PIP
        image[THUMB_BASE] = Landmark::new(0.42, 0.58, 0.0);
        image[THUMB_MID] = Landmark::new(0.40, 0.54, 0.0);
        image[THUMB_TIP] = Landmark::new(0.38, 0.50, 0.0);

        let mut world = [Landmark::default(); LANDMARKS_PER_HAND];
        world[WRIST] = Landmark::new(0.0, 0.04, 0.0);
        world[INDEX_MCP] = Landmark::new(-0.03, -0.04, 0.005);
        world[PINKY_MCP] = Landmark::new(0.03, -0.035, -0.005);
        world[THUMB_TIP] = Landmark::new(-0.05, 0.0, 0.02);

        HandObservation::new(image, world, Handedness::Right, 0.93)
    }

    #[test]
    fn test_interpret_well_formed_hand() {
        let obs = plausible_observation();
        let reading = interpret(
            &obs,
            640.0,
            480.0,
            &TriggerConfig::default(),
            &AimConfig::default(),
        );

        assert_eq!(reading.label, Handedness::Right);
        assert!(reading.angles.is_some());
        assert!(!reading.shooting);
        assert!(reading.pinch_distance > 0.0);
        // Aim extrapolates past the fingertip (upward here)
        assert!(reading.aim_pos.y < reading.screen_pos.y);
    }

    #[test]
    fn test_interpret_degenerate_world_landmarks() {
        let mut obs = plausible_observation();
        obs.world = [Landmark::default(); LANDMARKS_PER_HAND];

        let reading = interpret(
            &obs,
            640.0,
            480.0,
            &TriggerConfig::default(),
            &AimConfig::default(),
        );

        // Orientation skipped, the rest of the reading still usable
        assert!(reading.angles.is_none());
        assert!(reading.screen_pos.x.is_finite());
        assert!(reading.aim_pos.x.is_finite());
    }
}
