//! Frame Snapshot
//!
//! The render-facing view of one tick: everything the host needs to draw
//! a frame, with no references back into live game state. Built once per
//! tick after the simulation half has run.

use serde::{Deserialize, Serialize};

use super::round::RoundState;
use super::target::TargetView;
use crate::core::vec2::Vec2;

/// One cursor as the renderer sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CursorView {
    /// Smoothed cursor position, pixels
    pub position: Vec2,
    /// On-hand origin of the aim line, pixels
    pub origin: Vec2,
    /// Whether the shooting gesture is held (drawn hot)
    pub active: bool,
    /// Optional text label next to the cursor
    pub label: Option<String>,
}

/// Complete render view of a tick.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// One view per active cursor
    pub cursors: Vec<CursorView>,
    /// Drawable targets (regions that draw nothing are absent)
    pub targets: Vec<TargetView>,
    /// Score display strings
    pub score_lines: Vec<String>,
    /// Current round state (drives the win banner)
    pub round_state: RoundState,
    /// Banner text while game over
    pub banner: Option<String>,
    /// Whether the help panel is open
    pub show_help: bool,
    /// False once the quit button or quit key fired
    pub running: bool,
}
