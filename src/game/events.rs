//! Event Bus
//!
//! Decouples "a target was hit" from whoever reacts to it (scoring, the
//! quit flag, host-side sound effects). Explicitly constructed and
//! injected; nothing in the crate reaches for ambient global state.
//!
//! Callbacks for one event name run synchronously, on the calling
//! thread, in subscription order. There is no deduplication and no
//! unsubscribe. Emitting a name nobody subscribed to is a no-op, never
//! an error. Subscribers cannot reach the bus from inside a callback
//! (`emit` holds the only `&mut`), so subscription changes during an
//! in-flight emit are impossible by construction; a concurrent port
//! would have to keep serializing `emit` against `subscribe`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::registry::PlayerToken;
use super::target::{TargetId, TargetKind};
use crate::input::landmarks::Handedness;

/// Event name fired once per target matched by a click edge.
pub const TARGET_HIT: &str = "target_hit";

/// Payload delivered to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A click edge landed on a target.
    TargetHit {
        /// Durable handle of the shooting player
        player: PlayerToken,
        /// The player's handedness label (score/display identity)
        label: Handedness,
        /// Which target was hit
        target: TargetId,
        /// The target's variant (scoring only counts circular targets)
        kind: TargetKind,
    },
}

type Subscriber = Box<dyn FnMut(&GameEvent)>;

/// Injected event service plus the shared frame-scope state: the
/// `running` flag and the current tick's `dt`/`fps`.
#[derive(Default)]
pub struct EventBus {
    channels: HashMap<String, Vec<Subscriber>>,
    stopped: bool,
    dt: f32,
    fps: f32,
}

impl EventBus {
    /// Create a bus with no subscribers and the running flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a callback to an event name's ordered subscriber list.
    pub fn subscribe(&mut self, name: impl Into<String>, callback: impl FnMut(&GameEvent) + 'static) {
        self.channels
            .entry(name.into())
            .or_default()
            .push(Box::new(callback));
    }

    /// Invoke every subscriber for `name`, in subscription order.
    ///
    /// An empty or never-subscribed name is a no-op.
    pub fn emit(&mut self, name: &str, event: &GameEvent) {
        if name.is_empty() {
            return;
        }
        if let Some(subscribers) = self.channels.get_mut(name) {
            for callback in subscribers.iter_mut() {
                callback(event);
            }
        }
    }

    /// Number of subscribers for an event name.
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.channels.get(name).map_or(0, Vec::len)
    }

    /// Whether the outer loop should keep running.
    #[inline]
    pub fn is_running(&self) -> bool {
        !self.stopped
    }

    /// Clear the running flag; the host tears down on seeing it.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Record the frame's elapsed time and derived frame rate.
    pub fn set_timing(&mut self, dt: f32, fps: f32) {
        self.dt = dt;
        self.fps = fps;
    }

    /// Elapsed wall time of the current frame, as supplied by the host.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Frame rate estimate for the current frame.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("channels", &self.channels.keys().collect::<Vec<_>>())
            .field("stopped", &self.stopped)
            .field("dt", &self.dt)
            .field("fps", &self.fps)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
