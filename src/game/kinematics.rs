//! Kinematics Integrator
//!
//! Semi-implicit Euler with damping, shared by every mobile entity.
//!
//! The order of operations is load-bearing and must not be rearranged:
//!
//! 1. fold horizontal friction into acceleration (`accel.x += vel.x * friction`)
//! 2. `vel += accel`
//! 3. clamp `vel.y` to the terminal velocity
//! 4. `pos += vel + 0.5 * accel`
//! 5. snap `|vel.x| < rest_epsilon` to exactly 0
//!
//! Friction is proportional to current horizontal speed, not a constant
//! deceleration, so folding it into the acceleration before the velocity
//! update is what gives the motion its terminal behavior.

use serde::{Deserialize, Serialize};

use crate::core::Vec2;
use crate::game::config::PhysicsConfig;

/// Kinematic state of a mobile entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Top-left position (world units)
    pub position: Vec2,
    /// Velocity (units/tick)
    pub velocity: Vec2,
    /// Acceleration for this tick (units/tick^2), rebuilt by control logic
    /// every tick before integration
    pub acceleration: Vec2,
}

impl Motion {
    /// Create motion at rest at a position.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
        }
    }

    /// Add the gravity term for this tick. Call before `integrate` unless
    /// the entity is submerged or on a ladder.
    #[inline]
    pub fn apply_gravity(&mut self, physics: &PhysicsConfig) {
        self.acceleration.y += physics.gravity;
    }

    /// Advance one tick. Returns the displacement applied to `position`;
    /// the collision resolver re-applies it one axis at a time.
    pub fn integrate(&mut self, physics: &PhysicsConfig) -> Vec2 {
        // Damping folded into the acceleration before the velocity update.
        self.acceleration.x += self.velocity.x * physics.friction;

        self.velocity += self.acceleration;
        if self.velocity.y > physics.terminal_velocity {
            self.velocity.y = physics.terminal_velocity;
        }

        let delta = self.velocity + self.acceleration * 0.5;
        self.position += delta;

        // Kill sub-epsilon creep so idle actors come to an exact rest.
        if self.velocity.x.abs() < physics.rest_epsilon {
            self.velocity.x = 0.0;
        }

        delta
    }

    /// Reset per-tick acceleration. Control logic rebuilds it next tick.
    #[inline]
    pub fn clear_acceleration(&mut self) {
        self.acceleration = Vec2::ZERO;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn physics() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    #[test]
    fn test_rest_state_is_idempotent() {
        // Zero acceleration, sub-epsilon velocity: converges to exact zero
        // and stays there.
        let physics = physics();
        let mut motion = Motion::at(Vec2::ZERO);
        motion.velocity.x = 0.15;

        motion.integrate(&physics);
        motion.clear_acceleration();
        assert_eq!(motion.velocity.x, 0.0);

        let pos = motion.position;
        motion.integrate(&physics);
        assert_eq!(motion.velocity.x, 0.0);
        assert_eq!(motion.position, pos);
    }

    #[test]
    fn test_friction_opposes_motion() {
        let physics = physics();
        let mut motion = Motion::at(Vec2::ZERO);
        motion.velocity.x = 10.0;

        motion.integrate(&physics);
        assert!(motion.velocity.x < 10.0);
        assert!(motion.velocity.x > 0.0);
    }

    #[test]
    fn test_gravity_accumulates_until_terminal() {
        let physics = physics();
        let mut motion = Motion::at(Vec2::ZERO);

        let mut last_vy = 0.0;
        for _ in 0..10 {
            motion.clear_acceleration();
            motion.apply_gravity(&physics);
            motion.integrate(&physics);
            assert!(motion.velocity.y > last_vy);
            last_vy = motion.velocity.y;
        }
    }

    #[test]
    fn test_falling_position_strictly_increases() {
        let physics = physics();
        let mut motion = Motion::at(Vec2::ZERO);

        let mut last_y = motion.position.y;
        for _ in 0..50 {
            motion.clear_acceleration();
            motion.apply_gravity(&physics);
            motion.integrate(&physics);
            assert!(motion.position.y > last_y);
            last_y = motion.position.y;
        }
    }

    proptest! {
        #[test]
        fn prop_terminal_velocity_never_exceeded(ticks in 1usize..500) {
            let physics = physics();
            let mut motion = Motion::at(Vec2::ZERO);

            for _ in 0..ticks {
                motion.clear_acceleration();
                motion.apply_gravity(&physics);
                motion.integrate(&physics);
                prop_assert!(motion.velocity.y <= physics.terminal_velocity);
            }
        }

        #[test]
        fn prop_friction_never_reverses_direction(v0 in 0.3f32..50.0) {
            let physics = physics();
            let mut motion = Motion::at(Vec2::ZERO);
            motion.velocity.x = v0;

            for _ in 0..200 {
                motion.clear_acceleration();
                motion.integrate(&physics);
                prop_assert!(motion.velocity.x >= 0.0);
            }
        }
    }
}
