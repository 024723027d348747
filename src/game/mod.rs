//! Game Logic Module
//!
//! The whole entity simulation. Every pass runs in a fixed order off the
//! level clock, so the same level data and input script always produce the
//! same world.
//!
//! ## Module Structure
//!
//! - `input`: Held-button snapshot handed in once per tick
//! - `config`: Physics and camera tunables
//! - `kinematics`: Acceleration/velocity/position integration
//! - `collision`: Axis-separated solid resolution and ground probing
//! - `action`: Action state machines and frame-effect tables
//! - `actor`: Player and enemy actors, control logic, damage
//! - `attack`: Transient melee hitboxes
//! - `camera`: Lagged viewport follow
//! - `registry`: Entity ids and group membership
//! - `geometry`: Static level bodies (walls, ladders, water, doors)
//! - `item`: Collectible pickups
//! - `events`: Game events emitted by the simulation
//! - `level`: World state owning every entity
//! - `loader`: Level-data parsing and validation
//! - `tick`: Frame pipeline and campaign orchestration

pub mod action;
pub mod actor;
pub mod attack;
pub mod camera;
pub mod collision;
pub mod config;
pub mod events;
pub mod geometry;
pub mod input;
pub mod item;
pub mod kinematics;
pub mod level;
pub mod loader;
pub mod registry;
pub mod tick;

// Re-export key types
pub use actor::{Actor, ActorKind, Facing};
pub use config::SimConfig;
pub use events::{GameEvent, GameEventData};
pub use input::InputFrame;
pub use level::Level;
pub use registry::{EntityId, Group};
pub use tick::{Campaign, TickResult};
