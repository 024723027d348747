//! # Emberwood Simulation Engine
//!
//! Deterministic entity simulation for a 2D side-scrolling action
//! platformer: kinematics, collision, action state machines, melee combat,
//! camera follow and level orchestration. Rendering, audio and input
//! devices are host concerns; the engine consumes one `InputFrame` per
//! tick and emits entity states and events.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    EMBERWOOD ENGINE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Geometry primitives                     │
//! │  ├── vec2.rs      - 2D float vector                          │
//! │  └── rect.rs      - Axis-aligned rectangle                   │
//! │                                                              │
//! │  game/            - Simulation (deterministic)               │
//! │  ├── input.rs     - Held-button snapshot                     │
//! │  ├── kinematics.rs- Euler integration, friction, gravity     │
//! │  ├── collision.rs - Axis-separated solid resolution          │
//! │  ├── action.rs    - Action tables and animation cursors      │
//! │  ├── actor.rs     - Player/enemy control and damage          │
//! │  ├── attack.rs    - Transient melee hitboxes                 │
//! │  ├── level.rs     - World state, entity ownership            │
//! │  └── tick.rs      - Frame pipeline, campaign orchestration   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! The simulation never reads wall-clock time or polls devices. Time is a
//! millisecond counter owned by the level and advanced a fixed step per
//! tick; entity collections are `BTreeMap`s so iteration order is stable.
//! The same level data and input script always produce the same entity
//! states and event stream.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::{Rect, Vec2};
pub use game::input::InputFrame;
pub use game::level::Level;
pub use game::tick::{tick, Campaign, TickResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;

/// Milliseconds of level-clock time per tick
pub const MS_PER_TICK: u32 = 16;
