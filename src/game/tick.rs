//! Frame Pipeline
//!
//! One `tick()` call advances a level by exactly one frame in a fixed pass
//! order, so every run over the same level data and input script produces
//! the same entity states and the same event stream.
//!
//! The `Campaign` orchestrator sits above single levels: it loads level
//! files (falling back to the built-in level when a file is missing or
//! malformed) and advances to the next level on completion.

use tracing::{info, warn};

use crate::game::events::{GameEvent, GameEventData};
use crate::game::input::InputFrame;
use crate::game::level::Level;
use crate::game::loader::{self, LevelData};
use crate::game::config::SimConfig;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick, in processing order
    pub events: Vec<GameEvent>,
    /// The player used an open exit door this tick
    pub level_complete: bool,
    /// The player was destroyed this tick
    pub player_dead: bool,
}

/// Run one simulation tick.
///
/// The pass order is load-bearing: attacks resolve against last frame's
/// positions, enemies see the player's last position, and the camera chases
/// this frame's result.
pub fn tick(level: &mut Level, input: &InputFrame) -> TickResult {
    let mut result = TickResult::default();

    // 1. Advance the level clock
    level.advance_clock();

    // 2. Resolve and expire melee attacks
    level.update_attacks();

    // 3. Enemy AI, physics and animation
    level.update_enemies();

    // 4. Item pickup
    level.update_items();

    // 5. Player input, physics and animation
    level.update_player(input);

    // 6. Open doors once the map is cleared
    level.update_doors();

    // 7. Level exit
    level.try_use_door(input);

    // 8. Camera follow
    level.update_camera();

    // Collect events
    result.events = level.take_events();
    for event in &result.events {
        match event.data {
            GameEventData::PlayerDied => result.player_dead = true,
            GameEventData::LevelCompleted => result.level_complete = true,
            _ => {}
        }
    }

    result
}

/// Run a level against a prerecorded input script, collecting every event.
///
/// Stops early when the level completes or the player dies.
pub fn run_script(level: &mut Level, script: &[InputFrame]) -> Vec<GameEvent> {
    let mut all_events = Vec::new();
    for input in script {
        let result = tick(level, input);
        all_events.extend(result.events);
        if result.level_complete || result.player_dead {
            break;
        }
    }
    all_events
}

/// Where the campaign currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CampaignPhase {
    /// A level is in progress
    Playing,
    /// The player died; the campaign is over
    GameOver,
    /// Every level was completed
    Finished,
}

/// Sequence of levels played back to back.
pub struct Campaign {
    levels: Vec<LevelData>,
    config: SimConfig,
    current: usize,
    /// The live level; `None` once the campaign is over
    pub level: Option<Level>,
    /// Campaign state machine
    pub phase: CampaignPhase,
}

impl Campaign {
    /// Start a campaign over a list of level files.
    ///
    /// Each path is loaded eagerly; a missing or malformed file is replaced
    /// by the built-in fallback level so a bad file never aborts the run.
    pub fn from_files(paths: &[&str], config: SimConfig) -> Self {
        let levels: Vec<LevelData> = paths
            .iter()
            .map(|path| load_or_fallback(path))
            .collect();
        Self::from_data(levels, config)
    }

    /// Start a campaign over already-loaded level data.
    pub fn from_data(mut levels: Vec<LevelData>, config: SimConfig) -> Self {
        if levels.is_empty() {
            warn!("campaign started with no levels, using fallback");
            levels.push(loader::fallback_level());
        }
        let level = Level::from_data(&levels[0], config);
        info!(level = %level.name, "campaign started");
        Self {
            levels,
            config,
            current: 0,
            level: Some(level),
            phase: CampaignPhase::Playing,
        }
    }

    /// Advance the live level one frame and handle transitions.
    pub fn tick(&mut self, input: &InputFrame) -> TickResult {
        let Some(level) = self.level.as_mut() else {
            return TickResult::default();
        };
        let result = tick(level, input);

        if result.player_dead {
            info!(level = %level.name, "player died, campaign over");
            self.phase = CampaignPhase::GameOver;
            self.level = None;
        } else if result.level_complete {
            self.advance();
        }

        result
    }

    fn advance(&mut self) {
        self.current += 1;
        match self.levels.get(self.current) {
            Some(data) => {
                let level = Level::from_data(data, self.config);
                info!(level = %level.name, "advanced to next level");
                self.level = Some(level);
            }
            None => {
                info!("campaign finished");
                self.phase = CampaignPhase::Finished;
                self.level = None;
            }
        }
    }
}

/// Load a level file, substituting the built-in level on any failure.
pub fn load_or_fallback(path: &str) -> LevelData {
    match loader::from_file(path) {
        Ok(data) => data,
        Err(err) => {
            warn!(path, error = %err, "level load failed, using fallback");
            loader::fallback_level()
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
