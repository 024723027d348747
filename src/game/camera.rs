//! Camera Controller
//!
//! Lagged viewport follow. The offset chases the target center with an
//! integer truncating division, which gives exponential-style smoothing plus
//! a small resting dead-zone from the truncation, then clamps so the view
//! never leaves the map.

use serde::{Deserialize, Serialize};

use crate::core::Rect;
use crate::game::config::CameraConfig;

/// Viewport camera. `offset` is the world-space top-left of the view, in
/// whole pixels.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Camera {
    /// World-space top-left of the viewport
    pub offset_x: i32,
    /// World-space top-left of the viewport
    pub offset_y: i32,
    /// Map size in pixels
    pub world_w: i32,
    /// Map size in pixels
    pub world_h: i32,
    /// Viewport size and lag divisor
    pub config: CameraConfig,
}

impl Camera {
    /// Create a camera at the map origin.
    pub fn new(world_w: i32, world_h: i32, config: CameraConfig) -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            world_w,
            world_h,
            config,
        }
    }

    /// Chase the target rect's center for one tick, then clamp to the map.
    pub fn update(&mut self, target: &Rect) {
        let center = target.center();
        // Truncating integer division is deliberate: it makes the pursuit
        // settle into a dead-zone instead of oscillating.
        let dx = (center.x as i32 - self.offset_x - self.config.viewport_w / 2) / self.config.lag;
        let dy = (center.y as i32 - self.offset_y - self.config.viewport_h / 2) / self.config.lag;
        self.offset_x += dx;
        self.offset_y += dy;

        self.offset_x = self.offset_x.clamp(0, (self.world_w - self.config.viewport_w).max(0));
        self.offset_y = self.offset_y.clamp(0, (self.world_h - self.config.viewport_h).max(0));
    }

    /// Translate a world rect into view space for drawing. Pure transform.
    pub fn apply(&self, rect: &Rect) -> Rect {
        Rect::new(
            rect.x - self.offset_x as f32,
            rect.y - self.offset_y as f32,
            rect.w,
            rect.h,
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
