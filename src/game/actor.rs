//! Mobile Actors
//!
//! The player and every enemy kind share one `Actor` struct; kind-specific
//! behavior is tagged-union dispatch on `ActorKind` plus per-kind stat and
//! action tables. An actor never reaches into the level directly; control
//! logic receives an `Environment` snapshot (ground/ladder/water probes) and
//! returns frame effects for the level to realize.

use serde::{Deserialize, Serialize};

use crate::core::{Rect, Vec2};
use crate::game::action::{ActionId, AnimState, FrameEffect};
use crate::game::config::PhysicsConfig;
use crate::game::input::InputFrame;
use crate::game::kinematics::Motion;
use crate::game::registry::Group;

/// Actor kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    /// The player character
    Player,
    /// Slow patroller with a short lunge
    Slime,
    /// Heavy chaser; goes berserk under half health
    Brute,
}

/// Per-kind tunables.
#[derive(Clone, Copy, Debug)]
pub struct ActorStats {
    /// Starting and maximum health
    pub max_health: i32,
    /// Horizontal acceleration applied while steering (units/tick^2)
    pub move_accel: f32,
    /// Upward velocity applied on jump (units/tick)
    pub jump_speed: f32,
    /// Vertical speed while on a ladder or in water (units/tick)
    pub climb_speed: f32,
    /// Minimum ms between attacks
    pub attack_cooldown_ms: u32,
    /// Distance at which an enemy notices the player (0 = not an AI)
    pub vision_radius: f32,
    /// Distance at which an enemy starts its attack action
    pub attack_range: f32,
    /// Hit-box size
    pub hit_w: f32,
    /// Hit-box size
    pub hit_h: f32,
}

const PLAYER_STATS: ActorStats = ActorStats {
    max_health: 10,
    move_accel: 0.9,
    jump_speed: 12.0,
    climb_speed: 2.5,
    attack_cooldown_ms: 400,
    vision_radius: 0.0,
    attack_range: 0.0,
    hit_w: 16.0,
    hit_h: 24.0,
};

const SLIME_STATS: ActorStats = ActorStats {
    max_health: 2,
    move_accel: 0.3,
    jump_speed: 0.0,
    climb_speed: 0.0,
    attack_cooldown_ms: 1200,
    vision_radius: 120.0,
    attack_range: 16.0,
    hit_w: 14.0,
    hit_h: 12.0,
};

const BRUTE_STATS: ActorStats = ActorStats {
    max_health: 5,
    move_accel: 0.5,
    jump_speed: 0.0,
    climb_speed: 0.0,
    attack_cooldown_ms: 1500,
    vision_radius: 160.0,
    attack_range: 28.0,
    hit_w: 20.0,
    hit_h: 28.0,
};

/// Acceleration multiplier for an enraged brute.
const BERSERK_ACCEL_MULT: f32 = 1.6;

impl ActorKind {
    /// Static tunables for this kind.
    pub fn stats(self) -> &'static ActorStats {
        match self {
            ActorKind::Player => &PLAYER_STATS,
            ActorKind::Slime => &SLIME_STATS,
            ActorKind::Brute => &BRUTE_STATS,
        }
    }

    /// Canonical registry groups for this kind.
    pub fn groups(self) -> &'static [Group] {
        match self {
            ActorKind::Player => &[Group::Player],
            ActorKind::Slime => &[Group::Enemies, Group::Slimes],
            ActorKind::Brute => &[Group::Enemies, Group::Brutes],
        }
    }
}

/// Horizontal facing; selects the mirrored frame set and the attack side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    /// Facing -X
    Left,
    /// Facing +X
    Right,
}

impl Facing {
    /// -1.0 for left, +1.0 for right.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing derived from a horizontal delta. Zero keeps the current value.
    pub fn from_delta(self, dx: f32) -> Self {
        if dx > 0.0 {
            Facing::Right
        } else if dx < 0.0 {
            Facing::Left
        } else {
            self
        }
    }
}

/// Environment snapshot handed to control logic each tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct Environment {
    /// Solid ground within one unit below the hit box
    pub on_ground: bool,
    /// Hit box overlaps a ladder
    pub on_ladder: bool,
    /// Hit box overlaps water
    pub in_water: bool,
    /// Patrol probe: no floor just past the leading edge
    pub edge_ahead: bool,
}

/// Result of applying damage to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Damage was suppressed (invincible or already dead)
    Ignored,
    /// Actor entered its hurt action
    Hurt,
    /// Actor entered its death action
    Died,
}

/// A simulated mobile actor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Actor {
    /// Kind tag; selects stats, action tables and AI
    pub kind: ActorKind,
    /// Kinematic state; `motion.position` is the hit box top-left
    pub motion: Motion,
    /// Current health, clamped >= 0
    pub health: i32,
    /// Suppresses further damage while hurt/death plays
    pub invincible: bool,
    /// Mirrors frames and attack direction
    pub facing: Facing,
    /// Animation cursor
    pub anim: AnimState,
    /// Clock ms of the last attack start
    pub last_attack_ms: u32,
    /// Brute rage latch, set once health drops below half
    pub enraged: bool,
}

impl Actor {
    /// Spawn an actor of a kind at a hit-box top-left position.
    pub fn new(kind: ActorKind, position: Vec2, now_ms: u32) -> Self {
        Self {
            kind,
            motion: Motion::at(position),
            health: kind.stats().max_health,
            invincible: false,
            facing: Facing::Right,
            anim: AnimState::start(ActionId::Idle, now_ms),
            last_attack_ms: 0,
            enraged: false,
        }
    }

    /// Spawn with a non-default health value (level-data override).
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    /// The authoritative collision/combat rectangle.
    #[inline]
    pub fn hit_box(&self) -> Rect {
        let stats = self.kind.stats();
        Rect::new(
            self.motion.position.x,
            self.motion.position.y,
            stats.hit_w,
            stats.hit_h,
        )
    }

    /// The visual bounding box: hit box inflated for sprite placement.
    pub fn bounding_box(&self) -> Rect {
        let hit = self.hit_box();
        Rect::centered(hit.center(), hit.w + 8.0, hit.h + 4.0)
    }

    /// Current frame index for sprite selection.
    #[inline]
    pub fn frame_index(&self) -> u32 {
        self.anim.frame
    }

    /// Whether the actor is in (or entering) its terminal action.
    #[inline]
    pub fn is_dying(&self) -> bool {
        self.anim.action == ActionId::Death
    }

    /// Whether this actor can currently be damaged.
    #[inline]
    pub fn damageable(&self) -> bool {
        self.health > 0 && !self.invincible
    }

    fn attack_ready(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_attack_ms) >= self.kind.stats().attack_cooldown_ms
    }

    // =========================================================================
    // CONTROL
    // =========================================================================

    /// Apply one tick of player input: steering, jump, climb, attack intent.
    ///
    /// Returns effects fired by forced action switches.
    pub fn control_player(
        &mut self,
        input: &InputFrame,
        env: &Environment,
        now_ms: u32,
    ) -> Vec<FrameEffect> {
        let stats = self.kind.stats();
        if self.anim.locked(self.kind) {
            // Attack/hurt/death play out; no steering.
            return Vec::new();
        }

        let dir = input.horizontal() as f32;
        self.motion.acceleration.x += dir * stats.move_accel;
        self.facing = self.facing.from_delta(dir);

        if env.on_ladder || env.in_water {
            // Gravity is suppressed here; vertical speed is driven directly.
            self.motion.velocity.y = input.vertical() as f32 * stats.climb_speed;
        } else if input.up() && env.on_ground {
            self.motion.velocity.y = -stats.jump_speed;
        }

        if input.attack() && self.attack_ready(now_ms) {
            self.last_attack_ms = now_ms;
            let action = if env.on_ground {
                ActionId::Attack
            } else {
                ActionId::AirAttack
            };
            return self.anim.force(self.kind, action, now_ms);
        }

        Vec::new()
    }

    /// One tick of enemy decision-making: chase the player inside the vision
    /// radius, attack in range, patrol otherwise.
    ///
    /// `player_center` is `None` when no living player exists.
    pub fn control_enemy(
        &mut self,
        player_center: Option<Vec2>,
        env: &Environment,
        now_ms: u32,
    ) -> Vec<FrameEffect> {
        let stats = self.kind.stats();
        if self.anim.locked(self.kind) {
            return Vec::new();
        }

        // Rage latch before steering so the speed boost applies this tick.
        if self.kind == ActorKind::Brute && !self.enraged && self.health * 2 <= stats.max_health {
            self.enraged = true;
        }

        let accel = if self.enraged {
            stats.move_accel * BERSERK_ACCEL_MULT
        } else {
            stats.move_accel
        };

        let center = self.hit_box().center();
        let target = player_center.filter(|p| p.distance(center) <= stats.vision_radius);

        match target {
            Some(player) => {
                let dx = player.x - center.x;
                self.facing = self.facing.from_delta(dx);

                if dx.abs() <= stats.attack_range && self.attack_ready(now_ms) {
                    self.last_attack_ms = now_ms;
                    return self.anim.force(self.kind, ActionId::Attack, now_ms);
                }
                self.motion.acceleration.x += dx.signum() * accel;
            }
            None => {
                // Patrol: walk the current facing, turn at edges.
                if env.edge_ahead && env.on_ground {
                    self.facing = match self.facing {
                        Facing::Left => Facing::Right,
                        Facing::Right => Facing::Left,
                    };
                }
                self.motion.acceleration.x += self.facing.sign() * accel;
            }
        }

        Vec::new()
    }

    /// Pick the velocity-derived default action unless the current action is
    /// locked. Returns effects from an actual switch (normally none).
    pub fn derive_default_action(&mut self, env: &Environment, now_ms: u32) -> Vec<FrameEffect> {
        if self.anim.locked(self.kind) {
            return Vec::new();
        }

        let moving = self.motion.velocity.x != 0.0 || self.motion.acceleration.x != 0.0;
        let airborne_actions = self.kind == ActorKind::Player;

        let action = if airborne_actions && !env.on_ground && !env.on_ladder && !env.in_water {
            if self.motion.velocity.y < 0.0 {
                ActionId::Jump
            } else {
                ActionId::Fall
            }
        } else if moving {
            if self.enraged {
                ActionId::Berserk
            } else {
                ActionId::Move
            }
        } else {
            ActionId::Idle
        };

        self.anim.switch(self.kind, action, now_ms)
    }

    // =========================================================================
    // DAMAGE
    // =========================================================================

    /// Apply melee damage: decrement health, knock back, force the hurt (or
    /// death) transition. Exactly one hurt/death entry per call; invincible
    /// or dead targets are untouched.
    pub fn apply_damage(
        &mut self,
        amount: i32,
        direction: f32,
        physics: &PhysicsConfig,
        now_ms: u32,
    ) -> DamageOutcome {
        if !self.damageable() {
            return DamageOutcome::Ignored;
        }

        self.health = (self.health - amount).max(0);
        self.motion.velocity.x = direction.signum() * physics.knockback;
        self.invincible = true;

        if self.health == 0 {
            self.enter_death(now_ms);
            DamageOutcome::Died
        } else {
            self.anim.force(self.kind, ActionId::Hurt, now_ms);
            DamageOutcome::Hurt
        }
    }

    /// Force the terminal death action. Re-entrant calls are no-ops.
    pub fn enter_death(&mut self, now_ms: u32) {
        if self.anim.action == ActionId::Death {
            return;
        }
        self.invincible = true;
        self.anim.force(self.kind, ActionId::Death, now_ms);
    }

    /// Hook for completed locked actions: hurt completion clears
    /// invincibility.
    pub fn on_action_completed(&mut self, completed: ActionId) {
        if completed == ActionId::Hurt {
            self.invincible = false;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn physics() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    fn grounded() -> Environment {
        Environment {
            on_ground: true,
            ..Environment::default()
        }
    }

    #[test]
    fn test_player_steering_sets_accel_and_facing() {
        let mut actor = Actor::new(ActorKind::Player, Vec2::ZERO, 0);
        let input = InputFrame::new().with(InputFrame::FLAG_LEFT);

        actor.control_player(&input, &grounded(), 0);

        assert!(actor.motion.acceleration.x < 0.0);
        assert_eq!(actor.facing, Facing::Left);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut actor = Actor::new(ActorKind::Player, Vec2::ZERO, 0);
        let input = InputFrame::new().with(InputFrame::FLAG_UP);

        actor.control_player(&input, &Environment::default(), 0);
        assert_eq!(actor.motion.velocity.y, 0.0);

        actor.control_player(&input, &grounded(), 0);
        assert_eq!(actor.motion.velocity.y, -PLAYER_STATS.jump_speed);
    }

    #[test]
    fn test_ladder_suppresses_jump_and_drives_velocity() {
        let mut actor = Actor::new(ActorKind::Player, Vec2::ZERO, 0);
        let env = Environment {
            on_ground: true,
            on_ladder: true,
            ..Environment::default()
        };
        let input = InputFrame::new().with(InputFrame::FLAG_UP);

        actor.control_player(&input, &env, 0);
        assert_eq!(actor.motion.velocity.y, -PLAYER_STATS.climb_speed);
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let mut actor = Actor::new(ActorKind::Player, Vec2::ZERO, 1000);
        actor.last_attack_ms = 1000;
        let input = InputFrame::new().with(InputFrame::FLAG_ATTACK);

        actor.control_player(&input, &grounded(), 1100);
        assert_ne!(actor.anim.action, ActionId::Attack, "cooldown not elapsed");

        actor.control_player(&input, &grounded(), 1000 + PLAYER_STATS.attack_cooldown_ms);
        assert_eq!(actor.anim.action, ActionId::Attack);
    }

    #[test]
    fn test_airborne_attack_uses_air_action() {
        let mut actor = Actor::new(ActorKind::Player, Vec2::ZERO, 0);
        actor.last_attack_ms = 0;
        let input = InputFrame::new().with(InputFrame::FLAG_ATTACK);

        actor.control_player(&input, &Environment::default(), 5000);
        assert_eq!(actor.anim.action, ActionId::AirAttack);
    }

    #[test]
    fn test_locked_action_blocks_steering() {
        let mut actor = Actor::new(ActorKind::Player, Vec2::ZERO, 0);
        actor.anim.force(ActorKind::Player, ActionId::Hurt, 0);
        let input = InputFrame::new().with(InputFrame::FLAG_RIGHT);

        actor.control_player(&input, &grounded(), 16);
        assert_eq!(actor.motion.acceleration.x, 0.0);
    }

    #[test]
    fn test_default_action_from_velocity() {
        let mut actor = Actor::new(ActorKind::Player, Vec2::ZERO, 0);

        actor.motion.velocity.y = -3.0;
        actor.derive_default_action(&Environment::default(), 0);
        assert_eq!(actor.anim.action, ActionId::Jump);

        actor.motion.velocity.y = 3.0;
        actor.derive_default_action(&Environment::default(), 0);
        assert_eq!(actor.anim.action, ActionId::Fall);

        actor.motion.velocity = Vec2::new(2.0, 0.0);
        actor.derive_default_action(&grounded(), 0);
        assert_eq!(actor.anim.action, ActionId::Move);

        actor.motion.velocity = Vec2::ZERO;
        actor.derive_default_action(&grounded(), 0);
        assert_eq!(actor.anim.action, ActionId::Idle);
    }

    #[test]
    fn test_damage_hurt_transition() {
        let physics = physics();
        let mut actor = Actor::new(ActorKind::Player, Vec2::ZERO, 0);

        let outcome = actor.apply_damage(1, 1.0, &physics, 100);

        assert_eq!(outcome, DamageOutcome::Hurt);
        assert_eq!(actor.health, PLAYER_STATS.max_health - 1);
        assert_eq!(actor.motion.velocity.x, physics.knockback);
        assert!(actor.invincible);
        assert_eq!(actor.anim.action, ActionId::Hurt);
    }

    #[test]
    fn test_invincibility_suppresses_damage() {
        let physics = physics();
        let mut actor = Actor::new(ActorKind::Player, Vec2::ZERO, 0);

        actor.apply_damage(1, 1.0, &physics, 100);
        let health = actor.health;

        let outcome = actor.apply_damage(1, -1.0, &physics, 120);
        assert_eq!(outcome, DamageOutcome::Ignored);
        assert_eq!(actor.health, health);
    }

    #[test]
    fn test_hurt_completion_clears_invincibility() {
        let physics = physics();
        let mut actor = Actor::new(ActorKind::Player, Vec2::ZERO, 0);
        actor.apply_damage(1, 1.0, &physics, 0);

        actor.on_action_completed(ActionId::Hurt);
        assert!(!actor.invincible);
    }

    #[test]
    fn test_lethal_damage_enters_death_once() {
        let physics = physics();
        let mut actor = Actor::new(ActorKind::Slime, Vec2::ZERO, 0);
        actor.health = 1;

        let outcome = actor.apply_damage(1, -1.0, &physics, 0);
        assert_eq!(outcome, DamageOutcome::Died);
        assert_eq!(actor.anim.action, ActionId::Death);
        assert_eq!(actor.health, 0);

        // Re-entrant death and further damage are no-ops.
        let frame = actor.anim.frame;
        actor.enter_death(50);
        assert_eq!(actor.anim.frame, frame);
        assert_eq!(actor.apply_damage(1, 1.0, &physics, 60), DamageOutcome::Ignored);
    }

    #[test]
    fn test_brute_enrages_below_half_health() {
        let mut actor = Actor::new(ActorKind::Brute, Vec2::ZERO, 0);
        actor.health = 2; // max 5

        actor.control_enemy(None, &grounded(), 0);
        assert!(actor.enraged);

        actor.motion.velocity.x = 1.0;
        actor.derive_default_action(&grounded(), 0);
        assert_eq!(actor.anim.action, ActionId::Berserk);
    }

    #[test]
    fn test_enemy_chases_player_in_vision() {
        let mut actor = Actor::new(ActorKind::Slime, Vec2::new(100.0, 0.0), 0);
        let player = Vec2::new(160.0, 6.0);

        actor.control_enemy(Some(player), &grounded(), 0);
        assert!(actor.motion.acceleration.x > 0.0);
        assert_eq!(actor.facing, Facing::Right);
    }

    #[test]
    fn test_enemy_ignores_player_outside_vision() {
        let mut actor = Actor::new(ActorKind::Slime, Vec2::new(100.0, 0.0), 0);
        actor.facing = Facing::Left;
        let player = Vec2::new(500.0, 6.0);

        actor.control_enemy(Some(player), &grounded(), 0);
        // Patrols left instead of chasing right.
        assert!(actor.motion.acceleration.x < 0.0);
    }

    #[test]
    fn test_enemy_attacks_in_range_with_cooldown() {
        let mut actor = Actor::new(ActorKind::Slime, Vec2::new(100.0, 0.0), 0);
        actor.last_attack_ms = 0;
        let player = actor.hit_box().center() + Vec2::new(10.0, 0.0);

        actor.control_enemy(Some(player), &grounded(), 2000);
        assert_eq!(actor.anim.action, ActionId::Attack);

        // Immediately after, cooldown gates the next attack.
        let mut again = Actor::new(ActorKind::Slime, Vec2::new(100.0, 0.0), 0);
        again.last_attack_ms = 1900;
        again.control_enemy(Some(player), &grounded(), 2000);
        assert_ne!(again.anim.action, ActionId::Attack);
    }

    #[test]
    fn test_patrol_turns_at_edges() {
        let mut actor = Actor::new(ActorKind::Slime, Vec2::ZERO, 0);
        actor.facing = Facing::Right;
        let env = Environment {
            on_ground: true,
            edge_ahead: true,
            ..Environment::default()
        };

        actor.control_enemy(None, &env, 0);
        assert_eq!(actor.facing, Facing::Left);
        assert!(actor.motion.acceleration.x < 0.0);
    }
}
