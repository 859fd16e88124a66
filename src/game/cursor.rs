//! Cursor
//!
//! Smooths a player's projected aim point and turns the held "shooting"
//! gesture into a one-frame click edge. Each cursor is owned one-to-one
//! by an active player and dropped when that player is evicted.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// Cursor smoothing tunables.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Weight kept from the previous smoothed position each frame.
    /// Governs perceived input lag against jitter rejection.
    pub smoothing: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            smoothing: 2.0 / 3.0,
        }
    }
}

/// Smoothed aim cursor with click-edge detection.
#[derive(Clone, Debug)]
pub struct Cursor {
    smoothed_pos: Vec2,
    origin_pos: Vec2,
    active: bool,
    active_streak: u32,
    label: Option<String>,
}

impl Cursor {
    /// Create a cursor at an initial position (no smoothing lag on the
    /// first frame).
    pub fn new(pos: Vec2) -> Self {
        Self {
            smoothed_pos: pos,
            origin_pos: pos,
            active: false,
            active_streak: 0,
            label: None,
        }
    }

    /// Per-frame update.
    ///
    /// `raw` is the freshly projected aim point, `origin` the on-hand
    /// position the aim line is drawn from, `active` the frame's
    /// shoot-intent flag.
    pub fn update(&mut self, raw: Vec2, origin: Vec2, active: bool, cfg: &CursorConfig) {
        self.origin_pos = origin;
        self.active = active;

        if active {
            self.active_streak += 1;
        } else {
            self.active_streak = 0;
        }

        let s = cfg.smoothing;
        self.smoothed_pos = self.smoothed_pos.scale(s) + raw.scale(1.0 - s);
    }

    /// Smoothed cursor position.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.smoothed_pos
    }

    /// On-hand origin of the aim line.
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin_pos
    }

    /// Whether the shooting gesture is currently held.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Rising edge of the shooting gesture: true for exactly one frame
    /// per continuous hold.
    #[inline]
    pub fn just_clicked(&self) -> bool {
        self.active && self.active_streak == 1
    }

    /// Set the display label drawn next to the cursor.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Display label, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

// =============================================================================
// TESTS
// =============================================================================
