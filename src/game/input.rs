//! Input Snapshot
//!
//! The simulation never polls a device. Once per tick the host hands it an
//! `InputFrame`: the set of logical buttons currently held. The frame is a
//! plain value, so scripted and recorded input drive the engine the same way
//! live input does.

use serde::{Deserialize, Serialize};

/// Held-button snapshot for a single tick.
///
/// Flags are level-triggered ("held"), not edge-triggered. Edge detection
/// (attack cooldowns, door use) is the consumer's job.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Packed button bits, see `FLAG_*` constants.
    pub flags: u8,
}

impl InputFrame {
    /// Move left held
    pub const FLAG_LEFT: u8 = 0x01;

    /// Move right held
    pub const FLAG_RIGHT: u8 = 0x02;

    /// Up held (jump / climb / swim up)
    pub const FLAG_UP: u8 = 0x04;

    /// Down held (climb / swim down)
    pub const FLAG_DOWN: u8 = 0x08;

    /// Attack held
    pub const FLAG_ATTACK: u8 = 0x10;

    /// Interact held (doors)
    pub const FLAG_INTERACT: u8 = 0x20;

    /// Create an empty frame (nothing held).
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Create a frame from raw flags.
    pub const fn from_flags(flags: u8) -> Self {
        Self { flags }
    }

    /// Builder-style flag set, handy in tests and scripted demos.
    pub const fn with(self, flag: u8) -> Self {
        Self {
            flags: self.flags | flag,
        }
    }

    #[inline]
    fn held(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    /// Left currently held.
    #[inline]
    pub fn left(&self) -> bool {
        self.held(Self::FLAG_LEFT)
    }

    /// Right currently held.
    #[inline]
    pub fn right(&self) -> bool {
        self.held(Self::FLAG_RIGHT)
    }

    /// Up currently held.
    #[inline]
    pub fn up(&self) -> bool {
        self.held(Self::FLAG_UP)
    }

    /// Down currently held.
    #[inline]
    pub fn down(&self) -> bool {
        self.held(Self::FLAG_DOWN)
    }

    /// Attack currently held.
    #[inline]
    pub fn attack(&self) -> bool {
        self.held(Self::FLAG_ATTACK)
    }

    /// Interact currently held.
    #[inline]
    pub fn interact(&self) -> bool {
        self.held(Self::FLAG_INTERACT)
    }

    /// Net horizontal direction: -1 (left), 0, or +1 (right).
    ///
    /// Opposing directions held together cancel out.
    #[inline]
    pub fn horizontal(&self) -> i8 {
        match (self.left(), self.right()) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    /// Net vertical direction: -1 (up), 0, or +1 (down).
    #[inline]
    pub fn vertical(&self) -> i8 {
        match (self.up(), self.down()) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    /// Check if this is an idle frame (nothing held).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }
}

// =============================================================================
// TESTS
// =============================================================================
