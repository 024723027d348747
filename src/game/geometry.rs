//! Static Geometry
//!
//! Immutable kind-tagged rectangles created once at level load. Only the
//! door's `open` flag ever changes after that.

use serde::{Deserialize, Serialize};

use crate::core::Rect;

/// Kind of static body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaticKind {
    /// Blocks movement on both axes
    Wall,
    /// Climbable zone; suspends gravity while overlapped
    Ladder,
    /// Swimmable zone; suspends gravity while submerged
    Water,
    /// Level exit; solid while closed, passable and usable once open
    Door,
}

/// A static body in the level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticBody {
    /// Body kind
    pub kind: StaticKind,
    /// World-space rectangle
    pub rect: Rect,
    /// Door state; meaningless for other kinds
    pub open: bool,
}

impl StaticBody {
    /// Create a static body. Doors start closed.
    pub fn new(kind: StaticKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            open: false,
        }
    }

    /// Whether this body currently blocks movement.
    #[inline]
    pub fn is_solid(&self) -> bool {
        match self.kind {
            StaticKind::Wall => true,
            StaticKind::Door => !self.open,
            StaticKind::Ladder | StaticKind::Water => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_is_solid() {
        let wall = StaticBody::new(StaticKind::Wall, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(wall.is_solid());
    }

    #[test]
    fn test_door_solidity_follows_open_flag() {
        let mut door = StaticBody::new(StaticKind::Door, Rect::new(0.0, 0.0, 10.0, 20.0));
        assert!(door.is_solid());
        door.open = true;
        assert!(!door.is_solid());
    }

    #[test]
    fn test_zones_are_never_solid() {
        let ladder = StaticBody::new(StaticKind::Ladder, Rect::new(0.0, 0.0, 8.0, 40.0));
        let water = StaticBody::new(StaticKind::Water, Rect::new(0.0, 0.0, 50.0, 30.0));
        assert!(!ladder.is_solid());
        assert!(!water.is_solid());
    }
}
