//! Game Logic Module
//!
//! Everything downstream of the interpreted hand readings.
//!
//! ## Module Structure
//!
//! - `registry`: player slots, liveness tracking, eviction
//! - `cursor`: aim smoothing and click-edge detection
//! - `target`: shootable target variants, hit tests, physics
//! - `events`: injected event bus, running flag, frame timing
//! - `round`: scores and the Playing/GameOver state machine
//! - `snapshot`: per-frame render view for the host
//! - `tick`: per-tick orchestration

pub mod cursor;
pub mod events;
pub mod registry;
pub mod round;
pub mod snapshot;
pub mod target;
pub mod tick;

// Re-export key types
pub use cursor::{Cursor, CursorConfig};
pub use events::{EventBus, GameEvent, TARGET_HIT};
pub use registry::{PlayerHand, PlayerRegistry, PlayerToken};
pub use round::{RoundState, Scoreboard};
pub use snapshot::FrameSnapshot;
pub use target::{Playfield, Target, TargetId, TargetKind};
pub use tick::{Game, GameConfig, KeyCommand, TickResult};
