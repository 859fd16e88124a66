//! Player Registry
//!
//! One slot per concurrent player identity. Hands come and go between
//! frames (occlusion, detector dropouts), so each record carries a
//! missed-frame counter: aged every tick before fresh observations are
//! applied, reset to zero on a match, evicted once it reaches the stale
//! limit.
//!
//! Records are keyed by a durable [`PlayerToken`] handed out on first
//! sight; the detector's handedness label is a mutable attribute looked
//! up per frame, so a noisy relabel cannot silently mint a new identity
//! mid-streak.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::vec2::Vec2;
use crate::input::landmarks::Handedness;
use crate::input::pose::OrientationAngles;
use crate::input::HandReading;
use crate::{MAX_PLAYERS, STALE_FRAME_LIMIT};

/// Blend weight for the smoothed pinch distance (equal-weight running
/// average of previous smoothed value and fresh measurement).
const PINCH_BLEND: f32 = 0.5;

// =============================================================================
// PLAYER TOKEN
// =============================================================================

/// Durable per-player handle, assigned on first sight.
///
/// Implements `Ord` for deterministic BTreeMap iteration.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PlayerToken(u32);

impl PlayerToken {
    /// Create from a raw index.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw index value.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

// =============================================================================
// PLAYER HAND
// =============================================================================

/// Persistent per-player state, updated from each matching observation.
#[derive(Clone, Debug)]
pub struct PlayerHand {
    /// Durable handle
    pub token: PlayerToken,
    /// Detector's current handedness label (display identity)
    pub label: Handedness,
    /// Last well-defined orientation; retained across degenerate frames
    pub angles: Option<OrientationAngles>,
    /// Mirrored fingertip position (cursor origin), pixels
    pub screen_pos: Vec2,
    /// Mirrored projected aim point, pixels
    pub aim_pos: Vec2,
    /// Shoot-intent flag from the latest observation
    pub shooting: bool,
    /// Smoothed 3D pinch distance (meters)
    pub pinch_distance: f32,
    /// Consecutive frames without a matching observation
    frames_missed: u32,
}

impl PlayerHand {
    fn new(token: PlayerToken, reading: &HandReading) -> Self {
        Self {
            token,
            label: reading.label,
            angles: reading.angles,
            screen_pos: reading.screen_pos,
            aim_pos: reading.aim_pos,
            shooting: reading.shooting,
            // Seed the running average with the first raw measurement
            pinch_distance: reading.pinch_distance,
            frames_missed: 0,
        }
    }

    /// A player is active while it has been seen recently.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.frames_missed < STALE_FRAME_LIMIT
    }

    /// Frames since the last matching observation.
    #[inline]
    pub fn frames_missed(&self) -> u32 {
        self.frames_missed
    }

    /// Fold a fresh reading into this record and reset the miss counter.
    fn apply(&mut self, reading: &HandReading) {
        self.label = reading.label;
        self.screen_pos = reading.screen_pos;
        self.aim_pos = reading.aim_pos;
        self.shooting = reading.shooting;
        self.pinch_distance =
            reading.pinch_distance * PINCH_BLEND + self.pinch_distance * (1.0 - PINCH_BLEND);

        // Degenerate frame: keep the previous orientation
        if let Some(angles) = reading.angles {
            self.angles = Some(angles);
        }

        self.frames_missed = 0;
    }
}

// =============================================================================
// PLAYER REGISTRY
// =============================================================================

/// Slot table for all currently tracked players.
///
/// Uses BTreeMap so per-tick iteration order is deterministic.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: BTreeMap<PlayerToken, PlayerHand>,
    next_token: u32,
}

impl PlayerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Age every player by one frame and evict the stale ones.
    ///
    /// Must run once per tick *before* fresh observations are applied.
    /// Returns the evicted tokens so owners of per-player resources
    /// (cursors) can clean up.
    pub fn tick(&mut self) -> Vec<PlayerToken> {
        for player in self.players.values_mut() {
            player.frames_missed = player.frames_missed.saturating_add(1);
        }

        let evicted: Vec<PlayerToken> = self
            .players
            .values()
            .filter(|p| !p.is_active())
            .map(|p| p.token)
            .collect();

        for token in &evicted {
            debug!(%token, "evicting stale player");
            self.players.remove(token);
        }

        evicted
    }

    /// Apply one interpreted reading.
    ///
    /// Updates the existing player with the matching label, or creates a
    /// new one if a slot is free. A reading that would exceed the player
    /// cap is logged and discarded; it never overwrites a live slot.
    pub fn observe(&mut self, reading: &HandReading) -> Option<PlayerToken> {
        if let Some(player) = self
            .players
            .values_mut()
            .find(|p| p.label == reading.label)
        {
            player.apply(reading);
            return Some(player.token);
        }

        if self.players.len() >= MAX_PLAYERS {
            warn!(
                label = %reading.label,
                slots = MAX_PLAYERS,
                "all player slots taken, ignoring extra hand"
            );
            return None;
        }

        let token = PlayerToken::new(self.next_token);
        self.next_token += 1;
        debug!(%token, label = %reading.label, "registering new player");
        self.players.insert(token, PlayerHand::new(token, reading));
        Some(token)
    }

    /// Get a player by token.
    pub fn get(&self, token: PlayerToken) -> Option<&PlayerHand> {
        self.players.get(&token)
    }

    /// Find a player by its current handedness label.
    pub fn find_by_label(&self, label: Handedness) -> Option<&PlayerHand> {
        self.players.values().find(|p| p.label == label)
    }

    /// Iterate players in token order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerHand> {
        self.players.values()
    }

    /// Number of tracked players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether no players are tracked.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
