//! Action State Machine
//!
//! Every actor kind owns a table of discrete actions (idle, move, attack,
//! hurt, death, ...). An action is static data: a frame count, a per-frame
//! interval, an end policy, a locked flag, and a list of
//! `(frame_index, effect)` markers. The machine advances frames on the level
//! clock and evaluates markers generically; no actor kind special-cases a
//! magic frame number.
//!
//! Velocity-derived defaults (idle/move/jump/fall) are chosen by actor
//! control logic each tick unless the current action is locked. Locked
//! actions (attack, hurt, death) play to completion or to their declared
//! successor.

use serde::{Deserialize, Serialize};

use crate::game::actor::ActorKind;

/// Discrete action states. Not every kind defines every action; asking for
/// an undefined combination is a corrupted-table programming error and
/// panics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionId {
    /// Standing still
    Idle,
    /// Grounded horizontal movement
    Move,
    /// Airborne, moving up
    Jump,
    /// Airborne, moving down
    Fall,
    /// Grounded melee swing
    Attack,
    /// Airborne melee swing (player only)
    AirAttack,
    /// Knocked back after taking damage
    Hurt,
    /// Terminal action; entity removal follows completion
    Death,
    /// Enraged movement (brute under half health)
    Berserk,
}

/// What happens when the frame index runs past the end of the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndPolicy {
    /// Wrap back to frame 0 (idle/move cycles)
    Loop,
    /// Clamp on the last frame (airborne poses hold)
    HoldLast,
    /// Transition to a successor action
    Then(ActionId),
    /// Sequence finished and the entity should be removed (death)
    Despawn,
}

/// Geometry and damage of a melee hitbox spawned by an attack frame.
///
/// `reach` is measured forward from the attacker's hit-box center and is
/// mirrored by facing; `y_offset` is relative to that center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeleeSpec {
    /// Hitbox width
    pub w: f32,
    /// Hitbox height
    pub h: f32,
    /// Forward offset of the hitbox center from the attacker's center
    pub reach: f32,
    /// Vertical offset of the hitbox center
    pub y_offset: f32,
    /// Damage per successful hit
    pub damage: i32,
    /// Lifetime in ms
    pub life_ms: u32,
    /// Deactivate after the first successful overlap resolution
    pub single_hit: bool,
}

/// Side effect bound to a frame index of an action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameEffect {
    /// Spawn a melee hitbox in front of the actor
    SpawnMelee(MeleeSpec),
}

/// Static definition of one action.
#[derive(Debug)]
pub struct ActionDef {
    /// Number of frames in the sequence (mirrored variants share indices)
    pub frames: u32,
    /// Milliseconds between frame advances
    pub interval_ms: u32,
    /// End-of-sequence policy
    pub end: EndPolicy,
    /// Locked actions suppress velocity-derived transitions until they end
    pub locked: bool,
    /// `(frame_index, effect)` markers, fired on entering the frame
    pub effects: &'static [(u32, FrameEffect)],
}

// =============================================================================
// PER-KIND ACTION TABLES
// =============================================================================

const PLAYER_SLASH: MeleeSpec = MeleeSpec {
    w: 24.0,
    h: 20.0,
    reach: 18.0,
    y_offset: 0.0,
    damage: 1,
    life_ms: 90,
    single_hit: true,
};

const PLAYER_AIR_SLASH: MeleeSpec = MeleeSpec {
    w: 26.0,
    h: 26.0,
    reach: 16.0,
    y_offset: 4.0,
    damage: 1,
    life_ms: 120,
    single_hit: false,
};

const SLIME_LUNGE: MeleeSpec = MeleeSpec {
    w: 16.0,
    h: 12.0,
    reach: 10.0,
    y_offset: 2.0,
    damage: 1,
    life_ms: 80,
    single_hit: true,
};

const BRUTE_SWING: MeleeSpec = MeleeSpec {
    w: 30.0,
    h: 24.0,
    reach: 22.0,
    y_offset: 0.0,
    damage: 2,
    life_ms: 110,
    single_hit: true,
};

const PLAYER_IDLE: ActionDef = ActionDef {
    frames: 4,
    interval_ms: 150,
    end: EndPolicy::Loop,
    locked: false,
    effects: &[],
};

const PLAYER_MOVE: ActionDef = ActionDef {
    frames: 6,
    interval_ms: 100,
    end: EndPolicy::Loop,
    locked: false,
    effects: &[],
};

const PLAYER_JUMP: ActionDef = ActionDef {
    frames: 2,
    interval_ms: 120,
    end: EndPolicy::HoldLast,
    locked: false,
    effects: &[],
};

const PLAYER_FALL: ActionDef = ActionDef {
    frames: 2,
    interval_ms: 120,
    end: EndPolicy::HoldLast,
    locked: false,
    effects: &[],
};

const PLAYER_ATTACK: ActionDef = ActionDef {
    frames: 4,
    interval_ms: 80,
    end: EndPolicy::Then(ActionId::Idle),
    locked: true,
    effects: &[(2, FrameEffect::SpawnMelee(PLAYER_SLASH))],
};

const PLAYER_AIR_ATTACK: ActionDef = ActionDef {
    frames: 4,
    interval_ms: 80,
    end: EndPolicy::Then(ActionId::Fall),
    locked: true,
    effects: &[(1, FrameEffect::SpawnMelee(PLAYER_AIR_SLASH))],
};

const PLAYER_HURT: ActionDef = ActionDef {
    frames: 3,
    interval_ms: 100,
    end: EndPolicy::Then(ActionId::Idle),
    locked: true,
    effects: &[],
};

const PLAYER_DEATH: ActionDef = ActionDef {
    frames: 6,
    interval_ms: 120,
    end: EndPolicy::Despawn,
    locked: true,
    effects: &[],
};

const SLIME_IDLE: ActionDef = ActionDef {
    frames: 2,
    interval_ms: 200,
    end: EndPolicy::Loop,
    locked: false,
    effects: &[],
};

const SLIME_MOVE: ActionDef = ActionDef {
    frames: 4,
    interval_ms: 150,
    end: EndPolicy::Loop,
    locked: false,
    effects: &[],
};

const SLIME_ATTACK: ActionDef = ActionDef {
    frames: 3,
    interval_ms: 120,
    end: EndPolicy::Then(ActionId::Move),
    locked: true,
    effects: &[(1, FrameEffect::SpawnMelee(SLIME_LUNGE))],
};

const SLIME_HURT: ActionDef = ActionDef {
    frames: 2,
    interval_ms: 100,
    end: EndPolicy::Then(ActionId::Move),
    locked: true,
    effects: &[],
};

const SLIME_DEATH: ActionDef = ActionDef {
    frames: 4,
    interval_ms: 120,
    end: EndPolicy::Despawn,
    locked: true,
    effects: &[],
};

const BRUTE_IDLE: ActionDef = ActionDef {
    frames: 3,
    interval_ms: 180,
    end: EndPolicy::Loop,
    locked: false,
    effects: &[],
};

const BRUTE_MOVE: ActionDef = ActionDef {
    frames: 4,
    interval_ms: 160,
    end: EndPolicy::Loop,
    locked: false,
    effects: &[],
};

const BRUTE_BERSERK: ActionDef = ActionDef {
    frames: 4,
    interval_ms: 90,
    end: EndPolicy::Loop,
    locked: false,
    effects: &[],
};

const BRUTE_ATTACK: ActionDef = ActionDef {
    frames: 5,
    interval_ms: 100,
    end: EndPolicy::Then(ActionId::Idle),
    locked: true,
    effects: &[(3, FrameEffect::SpawnMelee(BRUTE_SWING))],
};

const BRUTE_HURT: ActionDef = ActionDef {
    frames: 2,
    interval_ms: 120,
    end: EndPolicy::Then(ActionId::Idle),
    locked: true,
    effects: &[],
};

const BRUTE_DEATH: ActionDef = ActionDef {
    frames: 5,
    interval_ms: 130,
    end: EndPolicy::Despawn,
    locked: true,
    effects: &[],
};

/// Look up the static definition for a kind's action.
///
/// # Panics
///
/// Panics if the kind does not define the action. That is a corrupted state
/// table, not a runtime condition.
pub fn action_def(kind: ActorKind, action: ActionId) -> &'static ActionDef {
    use ActionId::*;
    use ActorKind::*;

    match (kind, action) {
        (Player, Idle) => &PLAYER_IDLE,
        (Player, Move) => &PLAYER_MOVE,
        (Player, Jump) => &PLAYER_JUMP,
        (Player, Fall) => &PLAYER_FALL,
        (Player, Attack) => &PLAYER_ATTACK,
        (Player, AirAttack) => &PLAYER_AIR_ATTACK,
        (Player, Hurt) => &PLAYER_HURT,
        (Player, Death) => &PLAYER_DEATH,

        (Slime, Idle) => &SLIME_IDLE,
        (Slime, Move) => &SLIME_MOVE,
        (Slime, Attack) => &SLIME_ATTACK,
        (Slime, Hurt) => &SLIME_HURT,
        (Slime, Death) => &SLIME_DEATH,

        (Brute, Idle) => &BRUTE_IDLE,
        (Brute, Move) => &BRUTE_MOVE,
        (Brute, Berserk) => &BRUTE_BERSERK,
        (Brute, Attack) => &BRUTE_ATTACK,
        (Brute, Hurt) => &BRUTE_HURT,
        (Brute, Death) => &BRUTE_DEATH,

        (kind, action) => panic!("{kind:?} has no action {action:?}"),
    }
}

// =============================================================================
// ANIMATION STATE
// =============================================================================

/// Outcome of one frame-advance step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepResult {
    /// Effects whose frame was entered during this step
    pub fired: Vec<FrameEffect>,
    /// An action with a `Then`/`Despawn` policy ran off its last frame
    pub completed: Option<ActionId>,
    /// The entity finished its terminal sequence and should be removed
    pub despawn: bool,
}

/// Per-entity animation cursor: current action, frame, and the clock reading
/// of the last frame advance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimState {
    /// Current action
    pub action: ActionId,
    /// Index into the action's frame sequence; always in range
    pub frame: u32,
    /// Level-clock ms of the last frame advance
    pub last_advance_ms: u32,
}

impl AnimState {
    /// Start in an action at frame 0.
    pub fn start(action: ActionId, now_ms: u32) -> Self {
        Self {
            action,
            frame: 0,
            last_advance_ms: now_ms,
        }
    }

    /// Force-switch to an action, restarting its sequence. Effects bound to
    /// frame 0 fire immediately.
    pub fn force(&mut self, kind: ActorKind, action: ActionId, now_ms: u32) -> Vec<FrameEffect> {
        self.action = action;
        self.frame = 0;
        self.last_advance_ms = now_ms;
        effects_at(action_def(kind, action), 0)
    }

    /// Switch only if not already in the action. Returns frame-0 effects on
    /// an actual switch.
    pub fn switch(&mut self, kind: ActorKind, action: ActionId, now_ms: u32) -> Vec<FrameEffect> {
        if self.action == action {
            return Vec::new();
        }
        self.force(kind, action, now_ms)
    }

    /// Whether the current action suppresses velocity-derived transitions.
    pub fn locked(&self, kind: ActorKind) -> bool {
        action_def(kind, self.action).locked
    }

    /// Advance the frame cursor if the action's interval has elapsed,
    /// applying the end policy on overflow.
    pub fn step(&mut self, kind: ActorKind, now_ms: u32) -> StepResult {
        let mut result = StepResult::default();
        let def = action_def(kind, self.action);
        debug_assert!(self.frame < def.frames, "frame cursor out of range");

        if now_ms.wrapping_sub(self.last_advance_ms) < def.interval_ms {
            return result;
        }
        self.last_advance_ms = now_ms;
        self.frame += 1;

        if self.frame < def.frames {
            result.fired = effects_at(def, self.frame);
            return result;
        }

        // Ran off the end of the sequence: apply the end policy.
        match def.end {
            EndPolicy::Loop => {
                self.frame = 0;
                result.fired = effects_at(def, 0);
            }
            EndPolicy::HoldLast => {
                self.frame = def.frames - 1;
            }
            EndPolicy::Then(next) => {
                result.completed = Some(self.action);
                result.fired = self.force(kind, next, now_ms);
            }
            EndPolicy::Despawn => {
                self.frame = def.frames - 1;
                result.completed = Some(self.action);
                result.despawn = true;
            }
        }
        result
    }
}

fn effects_at(def: &ActionDef, frame: u32) -> Vec<FrameEffect> {
    def.effects
        .iter()
        .filter(|(f, _)| *f == frame)
        .map(|(_, e)| *e)
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
