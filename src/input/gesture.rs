//! Shoot-Intent Detection
//!
//! Classifies a hand as "shooting" from its thumb geometry alone, using
//! only image-normalized landmarks. Two rules, in order:
//!
//! 1. Short circuit: thumb tip lower than the index PIP in image space
//!    (image y grows downward) means the thumb is tucked - shooting.
//! 2. Otherwise, rebuild the thumb as a synthetic planar two-segment
//!    chain of fixed segment length and measure the bend angle at the
//!    middle joint; past the threshold means shooting.
//!
//! The synthetic chain keeps the test scale-invariant: only the segment
//! *directions* come from the detector, so hand size and distance to the
//! camera drop out.

use serde::{Deserialize, Serialize};

use super::landmarks::{
    HandObservation, INDEX_MCP, INDEX_PIP, THUMB_BASE, THUMB_MID, THUMB_TIP,
};

/// Tunables for shoot-intent classification.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Thumb bend angle (degrees) past which the gesture counts as shooting
    pub bend_threshold_deg: f32,
    /// Synthetic length assigned to each rebuilt thumb segment
    pub segment_length: f32,
    /// Optional extra gate: 3D thumb-tip to index-MCP distance (meters)
    /// must also fall below this. Disabled by default; the bend test is
    /// authoritative on its own.
    pub pinch_threshold: Option<f32>,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            bend_threshold_deg: 40.0,
            segment_length: 0.2,
            pinch_threshold: None,
        }
    }
}

/// Thumb bend angle in degrees, or `None` if either thumb segment is
/// degenerate (coincident landmarks).
pub fn thumb_bend_degrees(obs: &HandObservation, cfg: &TriggerConfig) -> Option<f32> {
    let base = obs.image[THUMB_BASE].to_vec3();
    let mid = obs.image[THUMB_MID].to_vec3();
    let tip = obs.image[THUMB_TIP].to_vec3();

    let dir_proximal = (mid - base).try_normalize()?;
    let dir_distal = (tip - mid).try_normalize()?;

    // Synthetic chain: both segments get the same fixed length, so only
    // the directions matter
    let p_mid = dir_proximal.scale(cfg.segment_length);
    let p_tip = p_mid + dir_distal.scale(cfg.segment_length);

    let to_base = -p_mid;
    let to_tip = p_tip - p_mid;
    let denom = to_base.length() * to_tip.length();
    if denom <= f32::EPSILON {
        return None;
    }

    // Clamp: rounding can push the cosine slightly outside [-1, 1]
    let cos_interior = (to_base.dot(to_tip) / denom).clamp(-1.0, 1.0);
    let interior_deg = cos_interior.acos().to_degrees();

    Some((180.0 - interior_deg).abs())
}

/// Whether the thumb reads as bent for this observation.
pub fn thumb_bent(obs: &HandObservation, cfg: &TriggerConfig) -> bool {
    // Thumb tip below the index PIP: tucked regardless of bend angle
    if obs.image[THUMB_TIP].y > obs.image[INDEX_PIP].y {
        return true;
    }

    match thumb_bend_degrees(obs, cfg) {
        Some(bend) => bend > cfg.bend_threshold_deg,
        None => false,
    }
}

/// 3D distance (meters) between the thumb tip and the index-finger base,
/// from world landmarks. Fed into the registry's smoothed pinch distance.
pub fn pinch_distance(obs: &HandObservation) -> f32 {
    obs.world[THUMB_TIP]
        .to_vec3()
        .distance(obs.world[INDEX_MCP].to_vec3())
}

/// The frame's shoot-intent signal.
///
/// The thumb-bend flag is authoritative; the pinch-distance gate only
/// applies when [`TriggerConfig::pinch_threshold`] is set.
pub fn is_shooting(obs: &HandObservation, cfg: &TriggerConfig) -> bool {
    let bent = thumb_bent(obs, cfg);
    match cfg.pinch_threshold {
        Some(threshold) => bent && pinch_distance(obs) < threshold,
        None => bent,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::landmarks::{Handedness, Landmark};
    use crate::LANDMARKS_PER_HAND;

    /// Observation with a thumb laid out along the given landmark chain.
    fn obs_with_thumb(
        base: (f32, f32, f32),
        mid: (f32, f32, f32),
        tip: (f32, f32, f32),
        index_pip_y: f32,
    ) -> HandObservation {
        let mut image = [Landmark::default(); LANDMARKS_PER_HAND];
        image[THUMB_BASE] = Landmark::new(base.0, base.1, base.2);
        image[THUMB_MID] = Landmark::new(mid.0, mid.1, mid.2);
        image[THUMB_TIP] = Landmark::new(tip.0, tip.1, tip.2);
        image[INDEX_PIP] = Landmark::new(0.5, index_pip_y, 0.0);

        HandObservation::new(
            image,
            [Landmark::default(); LANDMARKS_PER_HAND],
            Handedness::Right,
            0.95,
        )
    }

    #[test]
    fn test_straight_thumb_not_bent() {
        // Collinear chain pointing up-left, tip above the index PIP
        let obs = obs_with_thumb(
            (0.40, 0.70, 0.0),
            (0.35, 0.60, 0.0),
            (0.30, 0.50, 0.0),
            0.65,
        );
        let bend = thumb_bend_degrees(&obs, &TriggerConfig::default()).unwrap();
        assert!(bend < 1.0, "straight chain should have ~0 bend, got {bend}");
        assert!(!thumb_bent(&obs, &TriggerConfig::default()));
    }

    #[test]
    fn test_right_angle_thumb_bent() {
        // Proximal segment goes up, distal turns 90 degrees right
        let obs = obs_with_thumb(
            (0.40, 0.70, 0.0),
            (0.40, 0.60, 0.0),
            (0.50, 0.60, 0.0),
            0.75,
        );
        let bend = thumb_bend_degrees(&obs, &TriggerConfig::default()).unwrap();
        assert!((bend - 90.0).abs() < 1.0, "expected ~90 deg, got {bend}");
        assert!(thumb_bent(&obs, &TriggerConfig::default()));
    }

    #[test]
    fn test_tip_below_pip_short_circuits() {
        // Perfectly straight thumb, but the tip sits below the index PIP
        let obs = obs_with_thumb(
            (0.40, 0.50, 0.0),
            (0.40, 0.60, 0.0),
            (0.40, 0.70, 0.0),
            0.65,
        );
        assert!(thumb_bent(&obs, &TriggerConfig::default()));
    }

    #[test]
    fn test_degenerate_segments_not_bent() {
        // All thumb landmarks coincide: no direction to measure
        let obs = obs_with_thumb(
            (0.40, 0.60, 0.0),
            (0.40, 0.60, 0.0),
            (0.40, 0.60, 0.0),
            0.65,
        );
        assert_eq!(thumb_bend_degrees(&obs, &TriggerConfig::default()), None);
        assert!(!thumb_bent(&obs, &TriggerConfig::default()));
    }

    #[test]
    fn test_threshold_is_configurable() {
        // ~30 degree bend: below the default 40 but above a 25 threshold
        let obs = obs_with_thumb(
            (0.40, 0.70, 0.0),
            (0.40, 0.60, 0.0),
            (0.45, 0.513, 0.0),
            0.75,
        );
        let bend = thumb_bend_degrees(&obs, &TriggerConfig::default()).unwrap();
        assert!(bend > 25.0 && bend < 40.0, "bend was {bend}");

        assert!(!thumb_bent(&obs, &TriggerConfig::default()));
        let loose = TriggerConfig {
            bend_threshold_deg: 25.0,
            ..TriggerConfig::default()
        };
        assert!(thumb_bent(&obs, &loose));
    }

    #[test]
    fn test_pinch_gate() {
        // Bent thumb via short circuit, world landmarks 5 cm apart
        let mut obs = obs_with_thumb(
            (0.40, 0.50, 0.0),
            (0.40, 0.60, 0.0),
            (0.40, 0.70, 0.0),
            0.65,
        );
        obs.world[THUMB_TIP] = Landmark::new(0.05, 0.0, 0.0);
        obs.world[INDEX_MCP] = Landmark::new(0.0, 0.0, 0.0);

        // No gate: bend alone decides
        assert!(is_shooting(&obs, &TriggerConfig::default()));

        // Gate tighter than the actual distance suppresses the shot
        let gated = TriggerConfig {
            pinch_threshold: Some(0.035),
            ..TriggerConfig::default()
        };
        assert!(!is_shooting(&obs, &gated));

        // Gate looser than the distance lets it through
        let loose = TriggerConfig {
            pinch_threshold: Some(0.10),
            ..TriggerConfig::default()
        };
        assert!(is_shooting(&obs, &loose));
    }
}
