//! Fingergun Demo Driver
//!
//! Headless stand-in for the camera/render host: feeds the core scripted
//! synthetic hand observations and logs what the game does with them.
//! No video I/O, no rendering - just the core exercised end to end.
//!
//! Usage: `fingergun-demo [config.json]`

use std::fs;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use fingergun::game::target::TargetKind;
use fingergun::input::landmarks::{
    Landmark, INDEX_MCP, INDEX_PIP, INDEX_TIP, PINKY_MCP, THUMB_BASE, THUMB_MID, THUMB_TIP, WRIST,
};
use fingergun::{
    Game, GameConfig, GameEvent, HandObservation, Handedness, KeyCommand, Vec2,
    LANDMARKS_PER_HAND, VERSION,
};

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {path}"))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse config file {path}"))?
        }
        None => GameConfig {
            rng_seed: 12345,
            ..GameConfig::default()
        },
    };

    info!("Fingergun Core v{}", VERSION);
    info!(
        "Playfield: {}x{}, win at {} hits, seed {}",
        config.playfield.width, config.playfield.height, config.win_threshold, config.rng_seed
    );

    demo_round(config);
    Ok(())
}

/// Play one scripted round to the win screen, restart, then quit.
fn demo_round(config: GameConfig) {
    info!("=== Starting Demo Round ===");
    let mut game = Game::new(config);
    let dt = 1.0 / 30.0;

    let mut tick_count = 0u32;
    let mut total_hits = 0usize;

    // Chase the circular target: settle the cursor on it, squeeze off one
    // shot, repeat until the round is won
    while game.is_running() && tick_count < 10_000 {
        let target_pos = circular_target_pos(&game);
        let phase = tick_count % 20;
        let shooting = phase == 19;

        let obs = synthetic_hand(target_pos, shooting, Handedness::Right);
        let result = game.tick(&[obs], None, dt);
        tick_count += 1;

        for event in &result.events {
            let GameEvent::TargetHit { label, kind, .. } = event;
            if *kind == TargetKind::Circular {
                total_hits += 1;
                info!(
                    "Hit! player={} score={} (tick {})",
                    label,
                    game.score(*label),
                    tick_count
                );
            }
        }

        if game.snapshot().banner.is_some() {
            break;
        }
    }

    let snapshot = game.snapshot();
    info!("=== Round Over ===");
    for line in &snapshot.score_lines {
        info!("{line}");
    }
    if let Some(banner) = &snapshot.banner {
        info!("Banner: {banner}");
    }
    info!("Circular hits this round: {total_hits}");

    // One more click restarts the round
    let restart_point = Vec2::new(100.0, 100.0);
    game.tick(&[synthetic_hand(restart_point, false, Handedness::Right)], None, dt);
    game.tick(&[synthetic_hand(restart_point, true, Handedness::Right)], None, dt);
    info!(
        "After restart click: state={:?}, scores={:?}",
        game.round_state(),
        game.snapshot().score_lines
    );

    // And the quit key tears the loop down, host-style
    let result = game.tick(&[], Some(KeyCommand::Quit), dt);
    info!("Quit requested: {}", result.quit);
    info!("Ran {tick_count} ticks total");
}

fn circular_target_pos(game: &Game) -> Vec2 {
    game.targets()
        .iter()
        .find(|t| t.kind() == TargetKind::Circular)
        .map(|t| t.base().pos)
        .expect("demo layout always has a circular target")
}

/// Synthesize a finger-gun observation whose projected aim point lands on
/// `point` in mirrored display space.
///
/// The index segment is 48 px pointing straight up, so the aim projection
/// extends 48 / 0.4 * 0.5 = 60 px past the fingertip.
fn synthetic_hand(point: Vec2, shooting: bool, handedness: Handedness) -> HandObservation {
    let (width, height) = (640.0, 480.0);
    let tip_px = Vec2::new(width - point.x, point.y + 60.0);
    let mcp_px = tip_px + Vec2::new(0.0, 48.0);
    let pip_px = tip_px + Vec2::new(0.0, 24.0);

    let mut image = [Landmark::default(); LANDMARKS_PER_HAND];
    image[INDEX_MCP] = Landmark::new(mcp_px.x / width, mcp_px.y / height, 0.0);
    image[INDEX_PIP] = Landmark::new(pip_px.x / width, pip_px.y / height, 0.0);
    image[INDEX_TIP] = Landmark::new(tip_px.x / width, tip_px.y / height, 0.0);

    let pip_y = pip_px.y / height;
    if shooting {
        // Thumb tucked below the index PIP
        image[THUMB_BASE] = Landmark::new(0.42, pip_y + 0.02, 0.0);
        image[THUMB_MID] = Landmark::new(0.44, pip_y + 0.05, 0.0);
        image[THUMB_TIP] = Landmark::new(0.46, pip_y + 0.08, 0.0);
    } else {
        // Straight thumb held high
        image[THUMB_BASE] = Landmark::new(0.42, pip_y - 0.02, 0.0);
        image[THUMB_MID] = Landmark::new(0.40, pip_y - 0.06, 0.0);
        image[THUMB_TIP] = Landmark::new(0.38, pip_y - 0.10, 0.0);
    }

    let mut world = [Landmark::default(); LANDMARKS_PER_HAND];
    world[WRIST] = Landmark::new(0.0, 0.04, 0.0);
    world[INDEX_MCP] = Landmark::new(-0.03, -0.04, 0.005);
    world[PINKY_MCP] = Landmark::new(0.03, -0.035, -0.005);
    world[THUMB_TIP] = Landmark::new(-0.05, 0.0, 0.02);

    HandObservation::new(image, world, handedness, 0.95)
}
