//! Shootable Targets
//!
//! A closed set of target variants sharing position and overlay placement
//! through an embedded [`TargetBase`]. Each variant answers hit tests,
//! advances its physics, and reacts to being shot; drawable geometry is
//! exposed as [`TargetView`]s because pixel rendering belongs to the host.
//!
//! Targets live for the whole round; only position and velocity mutate.

use serde::{Deserialize, Serialize};

use super::events::EventBus;
use crate::core::rng::GameRng;
use crate::core::vec2::Vec2;
use crate::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Edge clearance when respawning a shot circular target.
const SPAWN_MARGIN: f32 = 50.0;

/// Respawn speed range, pixels per second.
const RESPAWN_MIN_SPEED: f32 = 50.0;
/// Respawn speed range, pixels per second.
const RESPAWN_MAX_SPEED: f32 = 150.0;

/// Click tolerance around labeled buttons, pixels.
const BUTTON_HIT_TOLERANCE: f32 = 5.0;

// =============================================================================
// PLAYFIELD
// =============================================================================

/// The logical coordinate space targets move and collide in.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Playfield {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

// =============================================================================
// COMMON TARGET STATE
// =============================================================================

/// Identifier of a target within one game.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TargetId(u32);

impl TargetId {
    /// Create from a raw index.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw index value.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Variant tag, carried in hit events so subscribers can filter
/// (only circular targets score).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// Bouncing circular target
    Circular,
    /// Invisible rectangular hit region with a callback
    HitRegion,
    /// Labeled quit button
    QuitButton,
}

/// Fields shared by every target variant.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TargetBase {
    /// Target identifier
    pub id: TargetId,
    /// Position: circle center, or rectangle top-left corner
    pub pos: Vec2,
    /// Overlay targets render above the mirrored camera feed,
    /// non-overlay behind it
    pub draw_on_overlay: bool,
}

// =============================================================================
// VARIANTS
// =============================================================================

/// Bouncing circle that respawns somewhere else when shot.
#[derive(Clone, Debug)]
pub struct CircularTarget {
    /// Shared fields
    pub base: TargetBase,
    /// Collision radius, pixels
    pub radius: f32,
    /// Velocity, pixels per second
    pub velocity: Vec2,
}

impl CircularTarget {
    fn is_hit(&self, p: Vec2) -> bool {
        p.distance_squared(self.base.pos) <= self.radius * self.radius
    }

    /// Advance position and reflect off the playfield edges.
    ///
    /// Reflection negates the crossing velocity component and clamps the
    /// position back inside bounds. Not tunneling-safe for very large
    /// `dt`; acceptable at camera frame rates.
    fn update(&mut self, dt: f32, field: &Playfield) {
        self.base.pos = self.base.pos + self.velocity.scale(dt);

        let r = self.radius;
        if self.base.pos.x - r < 0.0 || self.base.pos.x + r > field.width {
            self.velocity.x = -self.velocity.x;
            self.base.pos.x = self.base.pos.x.clamp(r, field.width - r);
        }
        if self.base.pos.y - r < 0.0 || self.base.pos.y + r > field.height {
            self.velocity.y = -self.velocity.y;
            self.base.pos.y = self.base.pos.y.clamp(r, field.height - r);
        }
    }

    /// Teleport to a fresh random spot with a fresh random velocity.
    fn respawn(&mut self, rng: &mut GameRng, field: &Playfield) {
        self.base.pos = rng.position_with_margin(field.width, field.height, SPAWN_MARGIN);
        self.velocity = rng.velocity_in_range(RESPAWN_MIN_SPEED, RESPAWN_MAX_SPEED);
    }
}

/// Invisible rectangle that fires a callback when shot (e.g. toggling
/// the help panel). Draws nothing itself.
pub struct HitRegion {
    /// Shared fields
    pub base: TargetBase,
    /// Width, pixels
    pub width: f32,
    /// Height, pixels
    pub height: f32,
    callback: Box<dyn FnMut()>,
}

impl HitRegion {
    fn is_hit(&self, p: Vec2) -> bool {
        let o = self.base.pos;
        (o.x..=o.x + self.width).contains(&p.x) && (o.y..=o.y + self.height).contains(&p.y)
    }
}

impl std::fmt::Debug for HitRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRegion")
            .field("base", &self.base)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Labeled button that clears the running flag when shot.
#[derive(Clone, Debug)]
pub struct QuitButton {
    /// Shared fields
    pub base: TargetBase,
    /// Width, pixels
    pub width: f32,
    /// Height, pixels
    pub height: f32,
    /// Button caption
    pub label: String,
}

impl QuitButton {
    fn is_hit(&self, p: Vec2) -> bool {
        let o = self.base.pos;
        let give = BUTTON_HIT_TOLERANCE;
        (o.x - give..=o.x + self.width + give).contains(&p.x)
            && (o.y - give..=o.y + self.height + give).contains(&p.y)
    }
}

// =============================================================================
// TARGET SUM TYPE
// =============================================================================

/// A shootable target.
#[derive(Debug)]
pub enum Target {
    /// Bouncing circular target
    Circular(CircularTarget),
    /// Invisible callback region
    HitRegion(HitRegion),
    /// Quit button
    Quit(QuitButton),
}

impl Target {
    /// Create a circular target with a random initial velocity.
    pub fn circular(id: TargetId, pos: Vec2, radius: f32, rng: &mut GameRng) -> Self {
        Self::Circular(CircularTarget {
            base: TargetBase {
                id,
                pos,
                draw_on_overlay: false,
            },
            radius,
            velocity: rng.velocity_in_range(RESPAWN_MIN_SPEED, RESPAWN_MAX_SPEED),
        })
    }

    /// Create an invisible hit region wired to a callback.
    pub fn hit_region(
        id: TargetId,
        pos: Vec2,
        width: f32,
        height: f32,
        callback: impl FnMut() + 'static,
    ) -> Self {
        Self::HitRegion(HitRegion {
            base: TargetBase {
                id,
                pos,
                draw_on_overlay: false,
            },
            width,
            height,
            callback: Box::new(callback),
        })
    }

    /// Create the quit button.
    pub fn quit_button(id: TargetId, pos: Vec2, width: f32, height: f32) -> Self {
        Self::Quit(QuitButton {
            base: TargetBase {
                id,
                pos,
                draw_on_overlay: true,
            },
            width,
            height,
            label: "Quit".to_string(),
        })
    }

    /// Shared fields of whichever variant this is.
    pub fn base(&self) -> &TargetBase {
        match self {
            Target::Circular(t) => &t.base,
            Target::HitRegion(t) => &t.base,
            Target::Quit(t) => &t.base,
        }
    }

    /// Target identifier.
    pub fn id(&self) -> TargetId {
        self.base().id
    }

    /// Variant tag.
    pub fn kind(&self) -> TargetKind {
        match self {
            Target::Circular(_) => TargetKind::Circular,
            Target::HitRegion(_) => TargetKind::HitRegion,
            Target::Quit(_) => TargetKind::QuitButton,
        }
    }

    /// Whether a click at `p` hits this target.
    pub fn is_hit(&self, p: Vec2) -> bool {
        match self {
            Target::Circular(t) => t.is_hit(p),
            Target::HitRegion(t) => t.is_hit(p),
            Target::Quit(t) => t.is_hit(p),
        }
    }

    /// Advance physics by `dt` seconds. Rectangular targets are static.
    pub fn update(&mut self, dt: f32, field: &Playfield) {
        if let Target::Circular(t) = self {
            t.update(dt, field);
        }
    }

    /// React to being shot.
    pub fn on_shot(&mut self, rng: &mut GameRng, field: &Playfield, bus: &mut EventBus) {
        match self {
            Target::Circular(t) => t.respawn(rng, field),
            Target::HitRegion(t) => (t.callback)(),
            Target::Quit(_) => bus.stop(),
        }
    }

    /// Drawable geometry for the host renderer, or `None` for targets
    /// that draw nothing.
    pub fn view(&self) -> Option<TargetView> {
        match self {
            Target::Circular(t) => Some(TargetView::Circle {
                center: t.base.pos,
                radius: t.radius,
                overlay: t.base.draw_on_overlay,
            }),
            Target::HitRegion(_) => None,
            Target::Quit(t) => Some(TargetView::Button {
                origin: t.base.pos,
                width: t.width,
                height: t.height,
                label: t.label.clone(),
                overlay: t.base.draw_on_overlay,
            }),
        }
    }
}

/// Geometry a target hands to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TargetView {
    /// Filled circle
    Circle {
        /// Center, pixels
        center: Vec2,
        /// Radius, pixels
        radius: f32,
        /// Draw above the camera feed
        overlay: bool,
    },
    /// Labeled rectangle
    Button {
        /// Top-left corner, pixels
        origin: Vec2,
        /// Width, pixels
        width: f32,
        /// Height, pixels
        height: f32,
        /// Caption text
        label: String,
        /// Draw above the camera feed
        overlay: bool,
    },
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn circle_at(pos: Vec2, velocity: Vec2) -> CircularTarget {
        CircularTarget {
            base: TargetBase {
                id: TargetId::new(0),
                pos,
                draw_on_overlay: false,
            },
            radius: 30.0,
            velocity,
        }
    }

    #[test]
    fn test_circle_hit_test() {
        let t = Target::Circular(circle_at(Vec2::new(320.0, 240.0), Vec2::ZERO));

        assert!(t.is_hit(Vec2::new(320.0, 240.0)));
        // On the rim counts
        assert!(t.is_hit(Vec2::new(350.0, 240.0)));
        assert!(!t.is_hit(Vec2::new(351.0, 240.0)));
    }

    #[test]
    fn test_bounce_left_boundary() {
        let field = Playfield::default();
        let mut t = circle_at(Vec2::new(35.0, 240.0), Vec2::new(-100.0, 40.0));

        // One 100 ms step carries the circle past x - r < 0
        t.update(0.1, &field);

        assert_eq!(t.velocity, Vec2::new(100.0, 40.0));
        assert_eq!(t.base.pos.x, 30.0);
    }

    #[test]
    fn test_bounce_bottom_boundary() {
        let field = Playfield::default();
        let mut t = circle_at(Vec2::new(320.0, 445.0), Vec2::new(0.0, 100.0));

        t.update(0.1, &field);

        assert_eq!(t.velocity, Vec2::new(0.0, -100.0));
        assert_eq!(t.base.pos.y, 450.0);
    }

    #[test]
    fn test_no_bounce_inside_field() {
        let field = Playfield::default();
        let mut t = circle_at(Vec2::new(320.0, 240.0), Vec2::new(60.0, -30.0));

        t.update(0.5, &field);

        assert_eq!(t.base.pos, Vec2::new(350.0, 225.0));
        assert_eq!(t.velocity, Vec2::new(60.0, -30.0));
    }

    #[test]
    fn test_respawn_inside_margin_with_new_velocity() {
        let field = Playfield::default();
        let mut rng = GameRng::new(123);
        let mut t = Target::circular(TargetId::new(0), Vec2::new(320.0, 240.0), 30.0, &mut rng);
        let mut bus = EventBus::new();

        for _ in 0..50 {
            t.on_shot(&mut rng, &field, &mut bus);
            let Target::Circular(c) = &t else {
                unreachable!()
            };
            assert!(c.base.pos.x >= SPAWN_MARGIN && c.base.pos.x < field.width - SPAWN_MARGIN);
            assert!(c.base.pos.y >= SPAWN_MARGIN && c.base.pos.y < field.height - SPAWN_MARGIN);
            let speed = c.velocity.length();
            assert!((RESPAWN_MIN_SPEED - 1e-3..RESPAWN_MAX_SPEED + 1e-3).contains(&speed));
        }
        // Shooting a circle never touches the running flag
        assert!(bus.is_running());
    }

    #[test]
    fn test_hit_region_invokes_callback() {
        let field = Playfield::default();
        let mut rng = GameRng::new(1);
        let mut bus = EventBus::new();
        let fired = Rc::new(Cell::new(0u32));

        let mut t = {
            let fired = Rc::clone(&fired);
            Target::hit_region(TargetId::new(1), Vec2::new(160.0, 120.0), 80.0, 80.0, move || {
                fired.set(fired.get() + 1)
            })
        };

        assert!(t.is_hit(Vec2::new(200.0, 150.0)));
        assert!(!t.is_hit(Vec2::new(100.0, 150.0)));
        // Exact edges count, no tolerance beyond them
        assert!(t.is_hit(Vec2::new(160.0, 120.0)));
        assert!(!t.is_hit(Vec2::new(159.0, 120.0)));

        t.on_shot(&mut rng, &field, &mut bus);
        t.on_shot(&mut rng, &field, &mut bus);
        assert_eq!(fired.get(), 2);
        // A region draws nothing
        assert!(t.view().is_none());
    }

    #[test]
    fn test_quit_button_stops_bus() {
        let field = Playfield::default();
        let mut rng = GameRng::new(1);
        let mut bus = EventBus::new();
        let mut t = Target::quit_button(TargetId::new(2), Vec2::new(20.0, 446.0), 128.0, 24.0);

        // Click tolerance extends slightly past the rectangle
        assert!(t.is_hit(Vec2::new(16.0, 446.0)));
        assert!(!t.is_hit(Vec2::new(10.0, 446.0)));

        assert!(bus.is_running());
        t.on_shot(&mut rng, &field, &mut bus);
        assert!(!bus.is_running());
    }

    #[test]
    fn test_static_targets_ignore_physics() {
        let field = Playfield::default();
        let mut t = Target::quit_button(TargetId::new(3), Vec2::new(20.0, 446.0), 128.0, 24.0);
        t.update(1.0, &field);
        assert_eq!(t.base().pos, Vec2::new(20.0, 446.0));
    }

    #[test]
    fn test_overlay_flags() {
        let mut rng = GameRng::new(7);
        let circle = Target::circular(TargetId::new(0), Vec2::ZERO, 30.0, &mut rng);
        let quit = Target::quit_button(TargetId::new(1), Vec2::ZERO, 10.0, 10.0);

        assert!(!circle.base().draw_on_overlay);
        assert!(quit.base().draw_on_overlay);
    }
}
