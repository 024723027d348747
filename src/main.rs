//! Emberwood Demo Runner
//!
//! Loads a level (or the built-in fallback), drives it with a scripted
//! input stream and logs the resulting event flow. Useful as a smoke test
//! and as a worked example of the host-side loop.

use anyhow::Result;
use tracing::{info, Level as LogLevel};
use tracing_subscriber::FmtSubscriber;

use emberwood::{
    game::{
        config::SimConfig,
        events::GameEventData,
        tick::{load_or_fallback, tick},
    },
    InputFrame, Level, TICK_RATE, VERSION,
};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(LogLevel::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Emberwood Engine v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "levels/level1.json".to_string());
    let data = load_or_fallback(&path);
    let mut level = Level::from_data(&data, SimConfig::default());

    info!(level = %level.name, width = level.world_w, height = level.world_h, "level loaded");

    demo_run(&mut level);
    Ok(())
}

/// Drive the level with a canned input script for up to 30 seconds.
fn demo_run(level: &mut Level) {
    const MAX_TICKS: u32 = 30 * TICK_RATE;

    let mut total_events = 0;
    let mut last_report_tick = 0;

    for t in 0..MAX_TICKS {
        let input = scripted_input(t);
        let result = tick(level, &input);
        total_events += result.events.len();

        // Report every 5 seconds
        if t - last_report_tick >= 5 * TICK_RATE {
            let player = level.player().map(|p| p.motion.position);
            info!(
                tick = t,
                enemies = level.enemies_remaining(),
                score = level.score,
                ?player,
                "progress"
            );
            last_report_tick = t;
        }

        for event in &result.events {
            match &event.data {
                GameEventData::DamageDealt { target, amount, health_after, .. } => {
                    info!(?target, amount, health_after, "damage dealt");
                }
                GameEventData::ActorDied { actor, kind } => {
                    info!(?actor, ?kind, "actor died");
                }
                GameEventData::ItemCollected { kind, .. } => {
                    info!(?kind, "item collected");
                }
                GameEventData::DoorsOpened => info!("doors opened"),
                _ => {}
            }
        }

        if result.level_complete {
            info!(tick = t, "level complete");
            break;
        }
        if result.player_dead {
            info!(tick = t, "player died");
            break;
        }
    }

    info!(
        ticks = level.tick,
        events = total_events,
        score = level.score,
        "demo finished"
    );
}

/// Canned input: walk right with periodic jumps and attacks, interact held
/// near the end so an open door completes the level.
fn scripted_input(t: u32) -> InputFrame {
    let mut frame = InputFrame::new().with(InputFrame::FLAG_RIGHT);
    if t % 120 == 60 {
        frame = frame.with(InputFrame::FLAG_UP);
    }
    if t % 45 == 0 {
        frame = frame.with(InputFrame::FLAG_ATTACK);
    }
    if t > 10 * TICK_RATE {
        frame = frame.with(InputFrame::FLAG_INTERACT);
    }
    frame
}
