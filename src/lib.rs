//! # Fingergun Core
//!
//! Turns noisy per-frame 3D hand-landmark samples into stable multiplayer
//! game input, and resolves that input against a set of shootable targets
//! to produce scores and round transitions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      FINGERGUN CORE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Math primitives                           │
//! │  ├── vec2.rs     - 2D vector (pixel / playfield space)       │
//! │  ├── vec3.rs     - 3D vector (world-landmark space)          │
//! │  └── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │                                                              │
//! │  input/          - Landmark interpretation                   │
//! │  ├── landmarks.rs- Detector-facing observation types         │
//! │  ├── pose.rs     - Hand basis and Euler angles               │
//! │  ├── gesture.rs  - Thumb-bend shoot intent                   │
//! │  └── aim.rs      - Aim-point projection and mirroring        │
//! │                                                              │
//! │  game/           - Game logic                                │
//! │  ├── registry.rs - Player slots, liveness, eviction          │
//! │  ├── cursor.rs   - Smoothing and click-edge detection        │
//! │  ├── target.rs   - Shootable target variants and physics     │
//! │  ├── events.rs   - Event bus, running flag, frame timing     │
//! │  ├── round.rs    - Scores and round state machine            │
//! │  ├── snapshot.rs - Per-frame render view for the host        │
//! │  └── tick.rs     - Per-tick orchestration                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Execution Model
//!
//! Single-threaded and frame-stepped. Each tick runs player eviction,
//! per-hand pose/cursor updates, click-edge hit-testing with event
//! emission, then target physics, strictly in that order. The host loop
//! owns the camera, the landmark detector, rendering and timing; the core
//! only consumes [`HandObservation`]s and a `dt` scalar per tick.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod input;

// Re-export commonly used types
pub use crate::core::rng::GameRng;
pub use crate::core::vec2::Vec2;
pub use crate::core::vec3::Vec3;
pub use input::landmarks::{HandObservation, Handedness, Landmark};
pub use input::pose::{HandBasis, OrientationAngles, PoseError};
pub use game::events::{EventBus, GameEvent, TARGET_HIT};
pub use game::registry::{PlayerHand, PlayerRegistry, PlayerToken};
pub use game::tick::{Game, GameConfig, KeyCommand, TickResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Playfield width in pixels (logical camera-frame space)
pub const PLAYFIELD_WIDTH: f32 = 640.0;

/// Playfield height in pixels (logical camera-frame space)
pub const PLAYFIELD_HEIGHT: f32 = 480.0;

/// Maximum number of concurrent players (one per tracked hand)
pub const MAX_PLAYERS: usize = 2;

/// A player missing for this many consecutive frames is evicted
pub const STALE_FRAME_LIMIT: u32 = 5;

/// Score at which a player wins the round
pub const WIN_SCORE: u32 = 5;

/// Landmarks per detected hand (MediaPipe-style hand topology)
pub const LANDMARKS_PER_HAND: usize = 21;
