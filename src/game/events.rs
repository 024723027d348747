//! Game Events
//!
//! Discrete signals the simulation emits for the orchestrator: deaths,
//! pickups, door state, level completion. Events carry a processing priority
//! and a total order so a tick's batch can be handled deterministically.

use serde::{Deserialize, Serialize};

use crate::game::actor::ActorKind;
use crate::game::item::ItemKind;
use crate::game::registry::EntityId;

/// Priority for event processing order. Lower value = processed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// Player death ends the level; handle before anything else
    PlayerDeath = 0,
    /// Actor deaths
    ActorDeath = 1,
    /// Damage application
    Damage = 2,
    /// Pickups
    Item = 3,
    /// Door / completion signals
    Progress = 4,
    /// Bookkeeping (removals)
    Other = 255,
}

/// Event payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// The player's death animation completed, or the player fell out of
    /// the world.
    PlayerDied,

    /// An actor entered its death action.
    ActorDied {
        /// Dying actor
        actor: EntityId,
        /// Its kind
        kind: ActorKind,
    },

    /// An actor took damage and entered its hurt action.
    DamageDealt {
        /// Hitbox entity that connected
        attack: EntityId,
        /// Actor that was hit
        target: EntityId,
        /// Damage applied
        amount: i32,
        /// Target health after the hit
        health_after: i32,
    },

    /// The player collected an item.
    ItemCollected {
        /// Collected item
        item: EntityId,
        /// Its kind
        kind: ItemKind,
    },

    /// All enemies cleared; doors opened.
    DoorsOpened,

    /// The player used an open door.
    LevelCompleted,

    /// An entity left every group (expiry, death completion, out of bounds).
    EntityRemoved {
        /// Removed entity
        entity: EntityId,
    },
}

/// A simulation event with tick stamp and priority.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when the event occurred
    pub tick: u32,
    /// Processing priority
    pub priority: EventPriority,
    /// Entity involved (for tie-breaking)
    pub entity: Option<EntityId>,
    /// Payload
    pub data: GameEventData,
}

impl GameEvent {
    /// Create an event; the priority and tie-break entity are derived from
    /// the payload.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        let (priority, entity) = match &data {
            GameEventData::PlayerDied => (EventPriority::PlayerDeath, None),
            GameEventData::ActorDied { actor, .. } => (EventPriority::ActorDeath, Some(*actor)),
            GameEventData::DamageDealt { target, .. } => (EventPriority::Damage, Some(*target)),
            GameEventData::ItemCollected { item, .. } => (EventPriority::Item, Some(*item)),
            GameEventData::DoorsOpened => (EventPriority::Progress, None),
            GameEventData::LevelCompleted => (EventPriority::Progress, None),
            GameEventData::EntityRemoved { entity } => (EventPriority::Other, Some(*entity)),
        };

        Self {
            tick,
            priority,
            entity,
            data,
        }
    }
}

impl PartialEq for GameEvent {
    fn eq(&self, other: &Self) -> bool {
        self.tick == other.tick && self.priority == other.priority && self.entity == other.entity
    }
}

impl Eq for GameEvent {}

impl PartialOrd for GameEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GameEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: tick, then priority, then entity
        self.tick
            .cmp(&other.tick)
            .then(self.priority.cmp(&other.priority))
            .then(self.entity.cmp(&other.entity))
    }
}

// =============================================================================
// TESTS
// =============================================================================
