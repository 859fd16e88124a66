//! Round and Scoring State Machine
//!
//! Accumulates per-player hit counts, flips the round into `GameOver`
//! when someone reaches the win threshold, and restarts (clearing all
//! scores) on the next click edge. Scores are keyed by handedness label,
//! the display identity; score and banner strings use the mirrored
//! labels the player sees in the flipped camera feed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::events::GameEvent;
use super::target::TargetKind;
use crate::input::landmarks::Handedness;

/// Phase of the current round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Normal play: clicks hit targets and score
    #[default]
    Playing,
    /// A player won; interaction is suppressed until the restart click
    GameOver,
}

/// Scores plus the round state machine.
#[derive(Debug)]
pub struct Scoreboard {
    scores: BTreeMap<Handedness, u32>,
    state: RoundState,
    win_threshold: u32,
}

impl Scoreboard {
    /// Create an empty board in the `Playing` state.
    pub fn new(win_threshold: u32) -> Self {
        Self {
            scores: BTreeMap::new(),
            state: RoundState::Playing,
            win_threshold,
        }
    }

    /// Subscriber for `target_hit` events.
    ///
    /// Only circular targets score; button and region hits pass through
    /// without touching the board. The win condition is checked
    /// immediately after each scoring hit.
    pub fn on_target_hit(&mut self, event: &GameEvent) {
        let GameEvent::TargetHit { label, kind, .. } = event;
        if *kind != TargetKind::Circular {
            return;
        }

        let score = self.scores.entry(*label).or_insert(0);
        *score += 1;
        info!(player = %label, score = *score, "target hit");

        if *score >= self.win_threshold {
            info!(player = %label, "round won");
            self.state = RoundState::GameOver;
        }
    }

    /// Current score for a handedness label (0 if it never scored).
    pub fn score(&self, label: Handedness) -> u32 {
        self.scores.get(&label).copied().unwrap_or(0)
    }

    /// Current round state.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Whether the round is in the game-over display state.
    pub fn is_game_over(&self) -> bool {
        self.state == RoundState::GameOver
    }

    /// Clear all scores and return to `Playing`.
    pub fn restart(&mut self) {
        info!("round restarting");
        self.scores.clear();
        self.state = RoundState::Playing;
    }

    /// Score display strings, one per side, in mirrored display labels.
    pub fn score_lines(&self) -> Vec<String> {
        [Handedness::Right, Handedness::Left]
            .into_iter()
            .map(|stored| {
                format!("{} Score: {}", stored.mirrored(), self.score(stored))
            })
            .collect()
    }

    /// Win banner text while game over (mirrored display labels).
    pub fn winner_banner(&self) -> Option<String> {
        if !self.is_game_over() {
            return None;
        }
        // Display-left is the detector's "Right" hand and vice versa
        let display_left = self.score(Handedness::Right);
        let display_right = self.score(Handedness::Left);
        Some(if display_left > display_right {
            "Left Won".to_string()
        } else {
            "Right Won".to_string()
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::registry::PlayerToken;
    use crate::game::target::TargetId;

    fn hit(label: Handedness, kind: TargetKind) -> GameEvent {
        GameEvent::TargetHit {
            player: PlayerToken::new(0),
            label,
            target: TargetId::new(0),
            kind,
        }
    }

    #[test]
    fn test_circular_hits_score() {
        let mut board = Scoreboard::new(5);

        board.on_target_hit(&hit(Handedness::Left, TargetKind::Circular));
        assert_eq!(board.score(Handedness::Left), 1);
        assert_eq!(board.score(Handedness::Right), 0);
    }

    #[test]
    fn test_button_hits_do_not_score() {
        let mut board = Scoreboard::new(5);

        board.on_target_hit(&hit(Handedness::Left, TargetKind::QuitButton));
        board.on_target_hit(&hit(Handedness::Left, TargetKind::HitRegion));
        assert_eq!(board.score(Handedness::Left), 0);
        assert_eq!(board.state(), RoundState::Playing);
    }

    #[test]
    fn test_win_threshold_triggers_game_over() {
        let mut board = Scoreboard::new(5);

        for n in 1..=4 {
            board.on_target_hit(&hit(Handedness::Right, TargetKind::Circular));
            assert_eq!(board.score(Handedness::Right), n);
            assert_eq!(board.state(), RoundState::Playing);
        }

        board.on_target_hit(&hit(Handedness::Right, TargetKind::Circular));
        assert_eq!(board.state(), RoundState::GameOver);
    }

    #[test]
    fn test_restart_clears_scores() {
        let mut board = Scoreboard::new(2);
        board.on_target_hit(&hit(Handedness::Left, TargetKind::Circular));
        board.on_target_hit(&hit(Handedness::Left, TargetKind::Circular));
        board.on_target_hit(&hit(Handedness::Right, TargetKind::Circular));
        assert!(board.is_game_over());

        board.restart();
        assert_eq!(board.state(), RoundState::Playing);
        assert_eq!(board.score(Handedness::Left), 0);
        assert_eq!(board.score(Handedness::Right), 0);
    }

    #[test]
    fn test_scores_are_independent_per_player() {
        let mut board = Scoreboard::new(5);
        board.on_target_hit(&hit(Handedness::Left, TargetKind::Circular));
        board.on_target_hit(&hit(Handedness::Left, TargetKind::Circular));
        board.on_target_hit(&hit(Handedness::Right, TargetKind::Circular));

        assert_eq!(board.score(Handedness::Left), 2);
        assert_eq!(board.score(Handedness::Right), 1);
    }

    #[test]
    fn test_score_lines_use_mirrored_labels() {
        let mut board = Scoreboard::new(5);
        board.on_target_hit(&hit(Handedness::Left, TargetKind::Circular));

        let lines = board.score_lines();
        // The detector's Left hand shows up as the Right player on screen
        assert!(lines.contains(&"Right Score: 1".to_string()));
        assert!(lines.contains(&"Left Score: 0".to_string()));
    }

    #[test]
    fn test_winner_banner() {
        let mut board = Scoreboard::new(1);
        assert_eq!(board.winner_banner(), None);

        board.on_target_hit(&hit(Handedness::Right, TargetKind::Circular));
        // Detector-Right is display-Left
        assert_eq!(board.winner_banner(), Some("Left Won".to_string()));
    }
}
