//! Level Data Loading
//!
//! The simulation consumes already-parsed level data: world dimensions,
//! kind-tagged static rectangles and actor/item spawn points. JSON is the
//! carrier format here; map-editor formats are a host concern.
//!
//! Loading is an explicit `Result` contract. The loader never falls back on
//! its own; the orchestrator decides what to substitute when a level is
//! missing or malformed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::actor::ActorKind;
use crate::game::geometry::StaticKind;
use crate::game::item::ItemKind;

/// Level-loading failures.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level file could not be read.
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),

    /// The level data did not parse.
    #[error("malformed level data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Zero or several player spawns were defined.
    #[error("level `{name}` must define exactly one player spawn, found {found}")]
    PlayerSpawnCount {
        /// Level name
        name: String,
        /// Number of player spawns found
        found: usize,
    },

    /// A static rectangle had a non-positive width or height.
    #[error("level `{name}` geometry entry {index} has non-positive size")]
    BadGeometry {
        /// Level name
        name: String,
        /// Index into the geometry list
        index: usize,
    },

    /// World dimensions were non-positive.
    #[error("level `{name}` has non-positive world dimensions")]
    BadDimensions {
        /// Level name
        name: String,
    },
}

/// One static rectangle in level data.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GeometryDef {
    /// Body kind
    pub kind: StaticKind,
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

/// One actor spawn point.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SpawnDef {
    /// Actor kind to spawn
    pub kind: ActorKind,
    /// Hit-box top-left
    pub x: f32,
    /// Hit-box top-left
    pub y: f32,
    /// Optional starting-health override
    #[serde(default)]
    pub health: Option<i32>,
}

/// One item placement.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ItemDef {
    /// Item kind
    pub kind: ItemKind,
    /// Top-left position
    pub x: f32,
    /// Top-left position
    pub y: f32,
}

/// Parsed, validated level data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LevelData {
    /// Display name
    pub name: String,
    /// World width in pixels
    pub width: f32,
    /// World height in pixels
    pub height: f32,
    /// Static geometry
    pub geometry: Vec<GeometryDef>,
    /// Actor spawns (exactly one player)
    pub spawns: Vec<SpawnDef>,
    /// Item placements
    #[serde(default)]
    pub items: Vec<ItemDef>,
}

impl LevelData {
    /// Structural validation beyond what serde enforces.
    pub fn validate(self) -> Result<Self, LevelError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(LevelError::BadDimensions {
                name: self.name,
            });
        }

        if let Some(index) = self
            .geometry
            .iter()
            .position(|g| g.w <= 0.0 || g.h <= 0.0)
        {
            return Err(LevelError::BadGeometry {
                name: self.name,
                index,
            });
        }

        let players = self
            .spawns
            .iter()
            .filter(|s| s.kind == ActorKind::Player)
            .count();
        if players != 1 {
            return Err(LevelError::PlayerSpawnCount {
                name: self.name,
                found: players,
            });
        }

        Ok(self)
    }
}

/// Parse and validate level data from a JSON string.
pub fn from_json(json: &str) -> Result<LevelData, LevelError> {
    let data: LevelData = serde_json::from_str(json)?;
    data.validate()
}

/// Read, parse and validate a level file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<LevelData, LevelError> {
    let json = fs::read_to_string(path)?;
    from_json(&json)
}

/// Built-in fallback level: a floored box with two walls, a ladder, a water
/// pool, a couple of enemies, an item and an exit door.
pub fn fallback_level() -> LevelData {
    let data = LevelData {
        name: "fallback".to_string(),
        width: 1280.0,
        height: 480.0,
        geometry: vec![
            // Floor and boundary walls
            GeometryDef { kind: StaticKind::Wall, x: 0.0, y: 440.0, w: 1280.0, h: 40.0 },
            GeometryDef { kind: StaticKind::Wall, x: 0.0, y: 0.0, w: 20.0, h: 440.0 },
            GeometryDef { kind: StaticKind::Wall, x: 1260.0, y: 0.0, w: 20.0, h: 440.0 },
            // Mid platform with a ladder up to it
            GeometryDef { kind: StaticKind::Wall, x: 500.0, y: 340.0, w: 160.0, h: 20.0 },
            GeometryDef { kind: StaticKind::Ladder, x: 640.0, y: 340.0, w: 16.0, h: 100.0 },
            // Water pool
            GeometryDef { kind: StaticKind::Water, x: 800.0, y: 400.0, w: 120.0, h: 40.0 },
            // Exit door on the far right
            GeometryDef { kind: StaticKind::Door, x: 1220.0, y: 392.0, w: 24.0, h: 48.0 },
        ],
        spawns: vec![
            SpawnDef { kind: ActorKind::Player, x: 60.0, y: 416.0, health: None },
            SpawnDef { kind: ActorKind::Slime, x: 400.0, y: 428.0, health: None },
            SpawnDef { kind: ActorKind::Brute, x: 1000.0, y: 412.0, health: None },
        ],
        items: vec![ItemDef { kind: ItemKind::Heart, x: 560.0, y: 324.0 }],
    };

    data.validate().expect("fallback level data must be valid")
}

// =============================================================================
// TESTS
// =============================================================================
