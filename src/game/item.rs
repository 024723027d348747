//! Collectible Items
//!
//! Pickups placed by level data or dropped at runtime. The player collects
//! an item by overlapping it; melee attacks can also break items outright.

use serde::{Deserialize, Serialize};

use crate::core::Rect;

/// Kind of pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Restores one health on pickup
    Heart,
    /// Score pickup
    Coin,
}

impl ItemKind {
    /// Health restored on pickup.
    pub fn heal_amount(self) -> i32 {
        match self {
            ItemKind::Heart => 1,
            ItemKind::Coin => 0,
        }
    }

    /// Score granted on pickup.
    pub fn score_value(self) -> u32 {
        match self {
            ItemKind::Heart => 0,
            ItemKind::Coin => 10,
        }
    }
}

/// A pickup sitting in the level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Pickup kind
    pub kind: ItemKind,
    /// World-space hit box
    pub rect: Rect,
}

impl Item {
    /// Create an item with its standard hit-box size at a position.
    pub fn new(kind: ItemKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            rect: Rect::new(x, y, 12.0, 12.0),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
