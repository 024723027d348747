//! Melee Attacks
//!
//! Short-lived hitbox entities spawned by attack-action frames. An attack
//! overlaps a target group each tick until it expires; single-hit attacks
//! die after their first successful overlap resolution. Damage application
//! itself lives with the level, which owns the targets.

use serde::{Deserialize, Serialize};

use crate::core::{Rect, Vec2};
use crate::game::action::MeleeSpec;
use crate::game::actor::Facing;
use crate::game::registry::{EntityId, Group};

/// A transient melee hitbox.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MeleeAttack {
    /// World-space hitbox
    pub rect: Rect,
    /// Group whose members this attack damages
    pub target_group: Group,
    /// Actor that swung; never damaged by its own attack
    pub owner: EntityId,
    /// Clock ms at spawn
    pub spawn_ms: u32,
    /// Lifetime in ms
    pub life_ms: u32,
    /// Knockback sign (+1 pushes right, -1 pushes left)
    pub direction: f32,
    /// Damage per successful hit
    pub damage: i32,
    /// Deactivate after the first successful overlap resolution
    pub single_hit: bool,
}

impl MeleeAttack {
    /// Spawn a hitbox from an action-frame spec, mirrored by the attacker's
    /// facing and centered relative to the attacker's hit-box center.
    pub fn spawn(
        spec: &MeleeSpec,
        owner: EntityId,
        owner_center: Vec2,
        facing: Facing,
        target_group: Group,
        now_ms: u32,
    ) -> Self {
        let center = Vec2::new(
            owner_center.x + facing.sign() * spec.reach,
            owner_center.y + spec.y_offset,
        );
        Self {
            rect: Rect::centered(center, spec.w, spec.h),
            target_group,
            owner,
            spawn_ms: now_ms,
            life_ms: spec.life_ms,
            direction: facing.sign(),
            damage: spec.damage,
            single_hit: spec.single_hit,
        }
    }

    /// Whether the lifetime has elapsed.
    #[inline]
    pub fn expired(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.spawn_ms) >= self.life_ms
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> MeleeSpec {
        MeleeSpec {
            w: 20.0,
            h: 10.0,
            reach: 15.0,
            y_offset: 2.0,
            damage: 1,
            life_ms: 100,
            single_hit: true,
        }
    }

    #[test]
    fn test_spawn_mirrors_facing() {
        let spec = spec();
        let center = Vec2::new(100.0, 50.0);

        let right = MeleeAttack::spawn(
            &spec,
            EntityId(1),
            center,
            Facing::Right,
            Group::Enemies,
            0,
        );
        let left = MeleeAttack::spawn(&spec, EntityId(1), center, Facing::Left, Group::Enemies, 0);

        assert_eq!(right.rect.center(), Vec2::new(115.0, 52.0));
        assert_eq!(left.rect.center(), Vec2::new(85.0, 52.0));
        assert_eq!(right.direction, 1.0);
        assert_eq!(left.direction, -1.0);
    }

    #[test]
    fn test_expiry() {
        let attack = MeleeAttack::spawn(
            &spec(),
            EntityId(1),
            Vec2::ZERO,
            Facing::Right,
            Group::Enemies,
            1000,
        );
        assert!(!attack.expired(1000));
        assert!(!attack.expired(1099));
        assert!(attack.expired(1100));
        assert!(attack.expired(2000));
    }
}
