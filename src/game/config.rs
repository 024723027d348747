//! Simulation Tunables
//!
//! All gameplay-feel constants in one place, loadable from JSON so a host
//! can reskin the physics without recompiling.

use serde::{Deserialize, Serialize};

/// Kinematics tunables shared by every mobile entity.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Constant downward acceleration (units/tick^2)
    pub gravity: f32,
    /// Horizontal damping coefficient, must be negative.
    /// Folded into acceleration as `accel.x += vel.x * friction`.
    pub friction: f32,
    /// Cap on downward velocity (units/tick)
    pub terminal_velocity: f32,
    /// Below this horizontal speed, velocity snaps to exactly 0
    pub rest_epsilon: f32,
    /// Horizontal speed applied to a hurt actor, sign from the attack
    pub knockback: f32,
    /// How far below the bottom world edge an entity may fall before removal
    pub out_of_bounds_margin: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            friction: -0.12,
            terminal_velocity: 15.0,
            rest_epsilon: 0.2,
            knockback: 6.0,
            out_of_bounds_margin: 200.0,
        }
    }
}

/// Camera-follow tunables.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Viewport width (pixels)
    pub viewport_w: i32,
    /// Viewport height (pixels)
    pub viewport_h: i32,
    /// Smoothing divisor; larger values lag further behind the target
    pub lag: i32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            viewport_w: 640,
            viewport_h: 480,
            lag: 20,
        }
    }
}

/// Top-level simulation configuration.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct SimConfig {
    /// Kinematics tunables
    pub physics: PhysicsConfig,
    /// Camera tunables
    pub camera: CameraConfig,
}

// =============================================================================
// TESTS
// =============================================================================
