//! Hand Orientation Estimation
//!
//! Builds an orthonormal frame from three world-scale landmarks (wrist,
//! index MCP, pinky MCP) and derives Euler angles from it. A hand that
//! collapses to a point or a line in world space has no usable frame;
//! that case is reported as a typed error rather than letting NaN leak
//! into downstream smoothing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::landmarks::{HandObservation, INDEX_MCP, PINKY_MCP, WRIST};
use crate::core::vec3::Vec3;

/// Errors from the orientation math.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoseError {
    /// A source vector of the hand frame had (near-)zero length, so the
    /// basis is undefined for this frame.
    #[error("degenerate hand frame: {0}")]
    DegenerateFrame(&'static str),
}

/// Orthonormal basis attached to the hand.
///
/// `y_axis` points from the wrist toward the knuckle line, `x_axis` runs
/// across the knuckles from index to pinky, `z_axis` completes the frame.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct HandBasis {
    /// Across the knuckles (index MCP toward pinky MCP)
    pub x_axis: Vec3,
    /// Along the palm (wrist toward knuckle midpoint)
    pub y_axis: Vec3,
    /// Out of the palm (cross of the other two)
    pub z_axis: Vec3,
}

/// Euler angles of a hand frame, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientationAngles {
    /// Rotation tipping the palm toward/away from the camera
    pub pitch: f32,
    /// Rotation around the forearm axis
    pub roll: f32,
    /// Rotation turning the hand left/right
    pub yaw: f32,
}

/// Build the orthonormal hand basis from three world landmarks.
///
/// `y = normalize(midpoint(index, pinky) - wrist)`,
/// `z = normalize(normalize(pinky - index) × y)`, `x = y × z`.
///
/// The knuckle line is not exactly perpendicular to the palm direction on
/// a real hand, so the x axis is re-projected through the double cross
/// product to keep the frame orthonormal.
///
/// # Errors
///
/// [`PoseError::DegenerateFrame`] if any source vector has (near-)zero
/// length, including the collinear case where the cross product vanishes.
pub fn hand_basis(wrist: Vec3, index_mcp: Vec3, pinky_mcp: Vec3) -> Result<HandBasis, PoseError> {
    let y_axis = (index_mcp.midpoint(pinky_mcp) - wrist)
        .try_normalize()
        .ok_or(PoseError::DegenerateFrame("wrist to knuckle midpoint"))?;

    let knuckle_line = (pinky_mcp - index_mcp)
        .try_normalize()
        .ok_or(PoseError::DegenerateFrame("index to pinky"))?;

    let z_axis = knuckle_line
        .cross(y_axis)
        .try_normalize()
        .ok_or(PoseError::DegenerateFrame("collinear knuckle line"))?;

    // Unit by construction: y and z are orthogonal unit vectors
    let x_axis = y_axis.cross(z_axis);

    Ok(HandBasis {
        x_axis,
        y_axis,
        z_axis,
    })
}

impl HandBasis {
    /// Euler angles of this frame, in degrees.
    pub fn angles(&self) -> OrientationAngles {
        OrientationAngles {
            pitch: (-self.y_axis.z).atan2(self.y_axis.y).to_degrees(),
            roll: self.x_axis.y.atan2(self.x_axis.x).to_degrees(),
            yaw: self.z_axis.x.atan2(self.z_axis.z).to_degrees(),
        }
    }
}

/// Estimate orientation angles straight from an observation's world landmarks.
pub fn estimate_orientation(obs: &HandObservation) -> Result<OrientationAngles, PoseError> {
    let basis = hand_basis(
        obs.world[WRIST].to_vec3(),
        obs.world[INDEX_MCP].to_vec3(),
        obs.world[PINKY_MCP].to_vec3(),
    )?;
    Ok(basis.angles())
}

// =============================================================================
// TESTS
// =============================================================================
