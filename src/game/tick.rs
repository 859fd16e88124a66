//! Per-Tick Orchestration
//!
//! The [`Game`] owns every subsystem and runs them in a fixed order each
//! tick: registry aging/eviction, observation interpretation, cursor
//! updates, click-edge hit-testing with event emission, then target
//! physics. Single-threaded and synchronous; each tick runs to
//! completion before the frame is considered done.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::cursor::{Cursor, CursorConfig};
use super::events::{EventBus, GameEvent, TARGET_HIT};
use super::registry::{PlayerRegistry, PlayerToken};
use super::round::{RoundState, Scoreboard};
use super::snapshot::{CursorView, FrameSnapshot};
use super::target::{Playfield, Target, TargetId};
use crate::core::rng::GameRng;
use crate::core::vec2::Vec2;
use crate::input::aim::AimConfig;
use crate::input::gesture::TriggerConfig;
use crate::input::landmarks::{HandObservation, Handedness};
use crate::input::{self, HandReading};
use crate::{MAX_PLAYERS, WIN_SCORE};

/// Discrete key command forwarded from the host, at most one per tick.
///
/// Camera selection and other purely host-side keys stay in the host;
/// only commands that touch core state arrive here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCommand {
    /// Toggle the help panel
    ToggleHelp,
    /// Clear the running flag
    Quit,
}

/// All tunables for one game, aggregated for config-file loading.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield dimensions, pixels
    pub playfield: Playfield,
    /// Score at which a player wins the round
    pub win_threshold: u32,
    /// Seed for all in-core randomness (target spawns)
    pub rng_seed: u64,
    /// Shoot-intent tunables
    pub trigger: TriggerConfig,
    /// Aim-projection tunables
    pub aim: AimConfig,
    /// Cursor smoothing tunables
    pub cursor: CursorConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            win_threshold: WIN_SCORE,
            rng_seed: 0,
            trigger: TriggerConfig::default(),
            aim: AimConfig::default(),
            cursor: CursorConfig::default(),
        }
    }
}

/// What one tick produced.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Hit events emitted this tick, in emission order
    pub events: Vec<GameEvent>,
    /// True once the running flag has been cleared (quit button or key)
    pub quit: bool,
}

/// The assembled game: input pipeline, player registry, cursors,
/// targets, event bus and scoring.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    bus: EventBus,
    rng: GameRng,
    registry: PlayerRegistry,
    cursors: BTreeMap<PlayerToken, Cursor>,
    targets: Vec<Target>,
    board: Rc<RefCell<Scoreboard>>,
    show_help: Rc<Cell<bool>>,
    next_target_id: u32,
}

impl Game {
    /// Build a game with the stock target layout: a quit button in the
    /// bottom-left corner, one circular target in the center, and a
    /// help-panel hit region in the upper-left quadrant.
    pub fn new(config: GameConfig) -> Self {
        let mut bus = EventBus::new();
        let board = Rc::new(RefCell::new(Scoreboard::new(config.win_threshold)));
        {
            let board = Rc::clone(&board);
            bus.subscribe(TARGET_HIT, move |event| {
                board.borrow_mut().on_target_hit(event);
            });
        }

        let show_help = Rc::new(Cell::new(false));
        let mut game = Self {
            config,
            bus,
            rng: GameRng::new(config.rng_seed),
            registry: PlayerRegistry::new(),
            cursors: BTreeMap::new(),
            targets: Vec::new(),
            board,
            show_help,
            next_target_id: 0,
        };

        let Playfield { width, height } = game.config.playfield;
        let quit_id = game.alloc_target_id();
        game.targets.push(Target::quit_button(
            quit_id,
            Vec2::new(20.0, height - height / 20.0 - 10.0),
            width / 5.0,
            height / 20.0,
        ));

        game.spawn_circular(Vec2::new(width / 2.0, height / 2.0), 30.0);

        let region_id = game.alloc_target_id();
        let help_flag = Rc::clone(&game.show_help);
        game.targets.push(Target::hit_region(
            region_id,
            Vec2::new(width / 4.0, height / 4.0),
            80.0,
            80.0,
            move || help_flag.set(!help_flag.get()),
        ));

        game
    }

    fn alloc_target_id(&mut self) -> TargetId {
        let id = TargetId::new(self.next_target_id);
        self.next_target_id += 1;
        id
    }

    /// Add a circular target with a random initial velocity.
    pub fn spawn_circular(&mut self, pos: Vec2, radius: f32) -> TargetId {
        let id = self.alloc_target_id();
        self.targets.push(Target::circular(id, pos, radius, &mut self.rng));
        id
    }

    /// Run one tick.
    ///
    /// `observations` are this frame's detector outputs (possibly empty),
    /// `key` the host's forwarded key command, `dt` the elapsed wall time
    /// since the previous tick in seconds.
    pub fn tick(
        &mut self,
        observations: &[HandObservation],
        key: Option<KeyCommand>,
        dt: f32,
    ) -> TickResult {
        let fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
        self.bus.set_timing(dt, fps);

        // 0. Host key commands
        match key {
            Some(KeyCommand::ToggleHelp) => self.show_help.set(!self.show_help.get()),
            Some(KeyCommand::Quit) => self.bus.stop(),
            None => {}
        }

        // 1. Age every player; drop cursors of the evicted
        for token in self.registry.tick() {
            self.cursors.remove(&token);
        }

        // 2. Apply this frame's observations
        let Playfield { width, height } = self.config.playfield;
        for (index, obs) in observations.iter().enumerate() {
            if index >= MAX_PLAYERS {
                warn!(
                    detected = observations.len(),
                    slots = MAX_PLAYERS,
                    "more hands than player slots, ignoring extra detection"
                );
                continue;
            }
            let reading: HandReading =
                input::interpret(obs, width, height, &self.config.trigger, &self.config.aim);
            self.registry.observe(&reading);
        }

        // 3. Cursor updates (collect player data first to release the
        // registry borrow)
        let players: Vec<(PlayerToken, Handedness, Vec2, Vec2, bool)> = self
            .registry
            .iter()
            .map(|p| (p.token, p.label, p.aim_pos, p.screen_pos, p.shooting))
            .collect();

        for (token, label, aim, origin, shooting) in &players {
            let cursor = self
                .cursors
                .entry(*token)
                .or_insert_with(|| Cursor::new(*aim));
            cursor.set_label(format!("Player {}", label.mirrored()));
            cursor.update(*aim, *origin, *shooting, &self.config.cursor);
        }

        // 4. Click edges, in token order
        let mut result = TickResult::default();
        for (token, label, ..) in &players {
            let click_point = match self.cursors.get(token) {
                Some(cursor) if cursor.just_clicked() => cursor.position(),
                _ => continue,
            };

            if self.board.borrow().is_game_over() {
                // Interaction is suppressed; the click only restarts
                self.board.borrow_mut().restart();
                continue;
            }

            self.handle_click(*token, *label, click_point, &mut result);
        }

        // 5. Target physics, independent of hits
        for target in &mut self.targets {
            target.update(dt, &self.config.playfield);
        }

        result.quit = !self.bus.is_running();
        result
    }

    /// Test the click point against every target; each match is shot and
    /// announced individually (overlapping targets all register).
    fn handle_click(
        &mut self,
        player: PlayerToken,
        label: Handedness,
        point: Vec2,
        result: &mut TickResult,
    ) {
        let matches: Vec<usize> = self
            .targets
            .iter()
            .enumerate()
            .filter(|(_, target)| target.is_hit(point))
            .map(|(index, _)| index)
            .collect();

        for index in matches {
            let event = GameEvent::TargetHit {
                player,
                label,
                target: self.targets[index].id(),
                kind: self.targets[index].kind(),
            };
            self.bus.emit(TARGET_HIT, &event);
            self.targets[index].on_shot(&mut self.rng, &self.config.playfield, &mut self.bus);
            result.events.push(event);
        }
    }

    /// Subscribe a host-side callback to an event name.
    pub fn subscribe(&mut self, name: impl Into<String>, callback: impl FnMut(&GameEvent) + 'static) {
        self.bus.subscribe(name, callback);
    }

    /// Build the render view of the current state.
    pub fn snapshot(&self) -> FrameSnapshot {
        let board = self.board.borrow();
        FrameSnapshot {
            cursors: self
                .cursors
                .values()
                .map(|cursor| CursorView {
                    position: cursor.position(),
                    origin: cursor.origin(),
                    active: cursor.is_active(),
                    label: cursor.label().map(str::to_string),
                })
                .collect(),
            targets: self.targets.iter().filter_map(Target::view).collect(),
            score_lines: board.score_lines(),
            round_state: board.state(),
            banner: board.winner_banner(),
            show_help: self.show_help.get(),
            running: self.bus.is_running(),
        }
    }

    /// Whether the outer loop should keep running.
    pub fn is_running(&self) -> bool {
        self.bus.is_running()
    }

    /// The player registry.
    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    /// All targets, in creation (and hit-test) order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Current score for a handedness label.
    pub fn score(&self, label: Handedness) -> u32 {
        self.board.borrow().score(label)
    }

    /// Current round state.
    pub fn round_state(&self) -> RoundState {
        self.board.borrow().state()
    }

    /// Whether the help panel is open.
    pub fn show_help(&self) -> bool {
        self.show_help.get()
    }

    /// The event bus (frame timing, running flag).
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// The game's configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

// =============================================================================
// TESTS
// =============================================================================
