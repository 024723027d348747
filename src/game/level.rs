//! Level World State
//!
//! A `Level` exclusively owns every entity for one map: static geometry,
//! actors, items and transient attacks live in typed `BTreeMap` collections
//! keyed by `EntityId`, with the registry tracking group tags. Dropping the
//! `Level` value is the whole teardown; a level transition discards the
//! entity set atomically between frames.
//!
//! Update passes iterate sorted id snapshots, so destroying entities during
//! a pass (attack expiry, death completion, out-of-bounds falls) is routine
//! and safe.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::{Rect, Vec2};
use crate::game::action::FrameEffect;
use crate::game::actor::{Actor, ActorKind, DamageOutcome, Environment, Facing};
use crate::game::attack::MeleeAttack;
use crate::game::camera::Camera;
use crate::game::collision::{self, resolve};
use crate::game::config::SimConfig;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::geometry::{StaticBody, StaticKind};
use crate::game::input::InputFrame;
use crate::game::item::Item;
use crate::game::loader::LevelData;
use crate::game::registry::{EntityId, Group, Registry};
use crate::MS_PER_TICK;

/// One loaded level: all entities, the camera, and the level clock.
#[derive(Clone, Debug)]
pub struct Level {
    /// Display name from level data
    pub name: String,
    /// World width in pixels
    pub world_w: f32,
    /// World height in pixels
    pub world_h: f32,
    /// Ticks since load
    pub tick: u32,
    /// Level clock in ms; every timestamp in the simulation reads this
    pub clock_ms: u32,
    /// Simulation tunables
    pub config: SimConfig,
    /// Viewport camera
    pub camera: Camera,
    /// Score from collected items
    pub score: u32,

    registry: Registry,
    statics: BTreeMap<EntityId, StaticBody>,
    actors: BTreeMap<EntityId, Actor>,
    items: BTreeMap<EntityId, Item>,
    attacks: BTreeMap<EntityId, MeleeAttack>,
    player_id: EntityId,
    doors_opened: bool,
    completed: bool,
    pending_events: Vec<GameEvent>,
}

impl Level {
    /// Build a level from validated load data.
    pub fn from_data(data: &LevelData, config: SimConfig) -> Self {
        let camera = Camera::new(data.width as i32, data.height as i32, config.camera);
        let mut level = Self {
            name: data.name.clone(),
            world_w: data.width,
            world_h: data.height,
            tick: 0,
            clock_ms: 0,
            config,
            camera,
            score: 0,
            registry: Registry::new(),
            statics: BTreeMap::new(),
            actors: BTreeMap::new(),
            items: BTreeMap::new(),
            attacks: BTreeMap::new(),
            player_id: EntityId::default(),
            doors_opened: false,
            completed: false,
            pending_events: Vec::new(),
        };

        for def in &data.geometry {
            let group = match def.kind {
                StaticKind::Wall => Group::Walls,
                StaticKind::Ladder => Group::Ladders,
                StaticKind::Water => Group::Water,
                StaticKind::Door => Group::Doors,
            };
            let id = level.registry.allocate(&[group]);
            level.statics.insert(
                id,
                StaticBody::new(def.kind, Rect::new(def.x, def.y, def.w, def.h)),
            );
        }

        for def in &data.spawns {
            let id = level.registry.allocate(def.kind.groups());
            let mut actor = Actor::new(def.kind, Vec2::new(def.x, def.y), 0);
            if let Some(health) = def.health {
                actor = actor.with_health(health);
            }
            if def.kind == ActorKind::Player {
                level.player_id = id;
            }
            level.actors.insert(id, actor);
        }

        for def in &data.items {
            let id = level.registry.allocate(&[Group::Items]);
            level.items.insert(id, Item::new(def.kind, def.x, def.y));
        }

        debug!(
            level = %level.name,
            statics = level.statics.len(),
            actors = level.actors.len(),
            "level built"
        );
        level
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Id of the player actor.
    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    /// The player, while it exists.
    pub fn player(&self) -> Option<&Actor> {
        self.actors.get(&self.player_id)
    }

    /// Living-player hit-box center, for enemy AI.
    fn player_center(&self) -> Option<Vec2> {
        self.player()
            .filter(|p| p.health > 0)
            .map(|p| p.hit_box().center())
    }

    /// Access an actor by id.
    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Number of enemies still registered (dying ones included until their
    /// death action completes).
    pub fn enemies_remaining(&self) -> usize {
        self.registry.count(Group::Enemies)
    }

    /// Whether the level-exit condition has fired.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Hit box of any registered entity.
    pub fn hit_box(&self, id: EntityId) -> Option<Rect> {
        if let Some(body) = self.statics.get(&id) {
            return Some(body.rect);
        }
        if let Some(actor) = self.actors.get(&id) {
            return Some(actor.hit_box());
        }
        if let Some(item) = self.items.get(&id) {
            return Some(item.rect);
        }
        self.attacks.get(&id).map(|a| a.rect)
    }

    /// Draw-space rect for an entity: hit box through the camera transform.
    pub fn draw_rect(&self, id: EntityId) -> Option<Rect> {
        self.hit_box(id).map(|r| self.camera.apply(&r))
    }

    /// Members of a group whose hit box overlaps a rect, in id order.
    ///
    /// Linear in the group size; the narrow interface leaves room for a
    /// spatial index without touching call sites.
    pub fn overlapping(&self, group: Group, rect: &Rect) -> Vec<EntityId> {
        self.registry
            .members(group)
            .into_iter()
            .filter(|id| self.hit_box(*id).is_some_and(|hb| rect.intersects(&hb)))
            .collect()
    }

    /// Solid rectangles in id order (walls plus closed doors).
    pub fn solids(&self) -> Vec<Rect> {
        self.statics
            .values()
            .filter(|body| body.is_solid())
            .map(|body| body.rect)
            .collect()
    }

    /// Environment snapshot for an actor's control logic.
    fn environment(&self, actor: &Actor, solids: &[Rect]) -> Environment {
        let hitbox = actor.hit_box();
        let on_ground = collision::on_ground(&hitbox, solids);

        let on_ladder = self
            .statics
            .values()
            .any(|b| b.kind == StaticKind::Ladder && hitbox.intersects(&b.rect));
        let in_water = self
            .statics
            .values()
            .any(|b| b.kind == StaticKind::Water && b.rect.contains(hitbox.center()));

        // Patrol probe one body-width ahead of the leading edge.
        let ahead = hitbox.shifted(Vec2::new(actor.facing.sign() * hitbox.w, 0.0));
        let edge_ahead = on_ground && !collision::on_ground(&ahead, solids);

        Environment {
            on_ground,
            on_ladder,
            in_water,
            edge_ahead,
        }
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Queue an event for this tick.
    pub fn push_event(&mut self, data: GameEventData) {
        self.pending_events.push(GameEvent::new(self.tick, data));
    }

    /// Take this tick's events, sorted into processing order.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        let mut events = std::mem::take(&mut self.pending_events);
        events.sort();
        events
    }

    // =========================================================================
    // UPDATE PASSES
    // =========================================================================

    /// Advance the level clock by one tick.
    pub fn advance_clock(&mut self) {
        self.tick += 1;
        self.clock_ms += MS_PER_TICK;
    }

    /// Expire and resolve every live melee attack.
    pub fn update_attacks(&mut self) {
        let physics = self.config.physics;
        let now = self.clock_ms;

        for id in self.registry.members(Group::Attacks) {
            let Some(attack) = self.attacks.get(&id).copied() else {
                continue;
            };

            if attack.expired(now) {
                self.remove_attack(id);
                continue;
            }

            let mut connected = false;

            // Primary targets: actors in the attack's target group.
            let targets = self.overlapping(attack.target_group, &attack.rect);
            for target_id in targets {
                if target_id == attack.owner {
                    continue;
                }
                let Some(target) = self.actors.get_mut(&target_id) else {
                    continue;
                };
                if !target.damageable() {
                    continue;
                }

                let outcome = target.apply_damage(attack.damage, attack.direction, &physics, now);
                let health_after = target.health;
                let kind = target.kind;
                connected = true;

                self.push_event(GameEventData::DamageDealt {
                    attack: id,
                    target: target_id,
                    amount: attack.damage,
                    health_after,
                });
                if outcome == DamageOutcome::Died {
                    self.push_event(GameEventData::ActorDied {
                        actor: target_id,
                        kind,
                    });
                }
            }

            // Secondary interactables: player-side attacks break items.
            if attack.target_group == Group::Enemies {
                for item_id in self.overlapping(Group::Items, &attack.rect) {
                    self.items.remove(&item_id);
                    self.registry.remove(item_id);
                    self.push_event(GameEventData::EntityRemoved { entity: item_id });
                    connected = true;
                }
            }

            if attack.single_hit && connected {
                self.remove_attack(id);
            }
        }
    }

    fn remove_attack(&mut self, id: EntityId) {
        if self.attacks.remove(&id).is_some() {
            self.registry.remove(id);
            self.push_event(GameEventData::EntityRemoved { entity: id });
        }
    }

    /// Run every enemy's AI, physics and animation.
    pub fn update_enemies(&mut self) {
        for id in self.registry.members(Group::Enemies) {
            self.update_actor(id, None);
        }
    }

    /// Let the player pick up overlapped items.
    pub fn update_items(&mut self) {
        let Some(player) = self.player() else {
            return;
        };
        if player.health <= 0 {
            return;
        }
        let player_box = player.hit_box();

        for id in self.overlapping(Group::Items, &player_box) {
            let Some(item) = self.items.remove(&id) else {
                continue;
            };
            self.registry.remove(id);
            self.score += item.kind.score_value();

            let heal = item.kind.heal_amount();
            if heal > 0 {
                let player_id = self.player_id;
                if let Some(player) = self.actors.get_mut(&player_id) {
                    let max = player.kind.stats().max_health;
                    player.health = (player.health + heal).min(max);
                }
            }

            self.push_event(GameEventData::ItemCollected {
                item: id,
                kind: item.kind,
            });
            self.push_event(GameEventData::EntityRemoved { entity: id });
        }
    }

    /// Run the player's input handling, physics and animation.
    pub fn update_player(&mut self, input: &InputFrame) {
        self.update_actor(self.player_id, Some(*input));
    }

    /// One actor's full tick: control, integration, collision, animation.
    fn update_actor(&mut self, id: EntityId, input: Option<InputFrame>) {
        let Some(mut actor) = self.actors.remove(&id) else {
            return;
        };
        let physics = self.config.physics;
        let now = self.clock_ms;
        let solids = self.solids();
        let env = self.environment(&actor, &solids);

        actor.motion.clear_acceleration();

        // Health invariant: zero health means the terminal action, whatever
        // drove it there.
        if actor.health <= 0 {
            actor.enter_death(now);
        }

        let mut effects: Vec<FrameEffect> = Vec::new();
        match input {
            Some(frame) => effects.extend(actor.control_player(&frame, &env, now)),
            None => {
                let player = self.player_center();
                effects.extend(actor.control_enemy(player, &env, now));
            }
        }
        effects.extend(actor.derive_default_action(&env, now));

        if !(env.on_ladder || env.in_water) {
            actor.motion.apply_gravity(&physics);
        }
        let delta = actor.motion.integrate(&physics);
        let stats = actor.kind.stats();
        let size = Vec2::new(stats.hit_w, stats.hit_h);
        let outcome = resolve(&mut actor.motion, size, delta, &solids);

        // Patrolling enemies turn around when they run into a wall.
        if input.is_none() && outcome.hit_x && !actor.anim.locked(actor.kind) {
            actor.facing = match actor.facing {
                Facing::Left => Facing::Right,
                Facing::Right => Facing::Left,
            };
        }

        let step = actor.anim.step(actor.kind, now);
        effects.extend(step.fired.iter().copied());
        if let Some(done) = step.completed {
            actor.on_action_completed(done);
        }

        let out_of_bounds =
            actor.motion.position.y > self.world_h + physics.out_of_bounds_margin;

        if step.despawn || out_of_bounds {
            self.registry.remove(id);
            if actor.kind == ActorKind::Player {
                self.push_event(GameEventData::PlayerDied);
            }
            self.push_event(GameEventData::EntityRemoved { entity: id });
            return;
        }

        self.actors.insert(id, actor);
        self.realize_effects(id, effects);
    }

    /// Turn fired frame effects into entities.
    fn realize_effects(&mut self, owner: EntityId, effects: Vec<FrameEffect>) {
        for effect in effects {
            match effect {
                FrameEffect::SpawnMelee(spec) => {
                    let Some(actor) = self.actors.get(&owner) else {
                        continue;
                    };
                    let target_group = if actor.kind == ActorKind::Player {
                        Group::Enemies
                    } else {
                        Group::Player
                    };
                    let attack = MeleeAttack::spawn(
                        &spec,
                        owner,
                        actor.hit_box().center(),
                        actor.facing,
                        target_group,
                        self.clock_ms,
                    );
                    let id = self.registry.allocate(&[Group::Attacks]);
                    self.attacks.insert(id, attack);
                }
            }
        }
    }

    /// Open every door once the last enemy is gone.
    pub fn update_doors(&mut self) {
        if self.doors_opened || self.enemies_remaining() > 0 {
            return;
        }
        for body in self.statics.values_mut() {
            if body.kind == StaticKind::Door {
                body.open = true;
            }
        }
        self.doors_opened = true;
        self.push_event(GameEventData::DoorsOpened);
        debug!(level = %self.name, "enemies cleared, doors opened");
    }

    /// Complete the level when the player uses an open door.
    pub fn try_use_door(&mut self, input: &InputFrame) {
        if self.completed || !input.interact() {
            return;
        }
        let Some(player) = self.player() else {
            return;
        };
        let player_box = player.hit_box();

        let at_open_door = self
            .statics
            .values()
            .any(|b| b.kind == StaticKind::Door && b.open && player_box.intersects(&b.rect));
        if at_open_door {
            self.completed = true;
            self.push_event(GameEventData::LevelCompleted);
        }
    }

    /// Chase the player with the camera.
    pub fn update_camera(&mut self) {
        if let Some(target) = self.player().map(|p| p.hit_box()) {
            self.camera.update(&target);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::MeleeSpec;
    use crate::game::loader::{self, GeometryDef, LevelData, SpawnDef};

    /// Flat test arena: a floor, side walls and a door, player plus
    /// optional extra spawns.
    fn arena(extra: &[SpawnDef]) -> Level {
        let mut spawns = vec![SpawnDef {
            kind: ActorKind::Player,
            x: 50.0,
            y: 176.0,
            health: None,
        }];
        spawns.extend_from_slice(extra);

        let data = LevelData {
            name: "arena".to_string(),
            width: 800.0,
            height: 240.0,
            geometry: vec![
                GeometryDef { kind: StaticKind::Wall, x: 0.0, y: 200.0, w: 800.0, h: 40.0 },
                GeometryDef { kind: StaticKind::Wall, x: 0.0, y: 0.0, w: 10.0, h: 200.0 },
                GeometryDef { kind: StaticKind::Wall, x: 790.0, y: 0.0, w: 10.0, h: 200.0 },
                GeometryDef { kind: StaticKind::Door, x: 760.0, y: 152.0, w: 24.0, h: 48.0 },
            ],
            spawns,
            items: Vec::new(),
        }
        .validate()
        .unwrap();

        Level::from_data(&data, SimConfig::default())
    }

    fn slime_at(x: f32) -> SpawnDef {
        SpawnDef {
            kind: ActorKind::Slime,
            x,
            y: 188.0,
            health: None,
        }
    }

    fn run_ticks(level: &mut Level, input: InputFrame, ticks: usize) {
        for _ in 0..ticks {
            level.advance_clock();
            level.update_attacks();
            level.update_enemies();
            level.update_items();
            level.update_player(&input);
            level.update_doors();
            level.try_use_door(&input);
            level.update_camera();
        }
    }

    #[test]
    fn test_from_data_builds_groups() {
        let level = arena(&[slime_at(300.0)]);
        assert_eq!(level.enemies_remaining(), 1);
        assert!(level.player().is_some());
        assert_eq!(level.solids().len(), 4, "walls plus the closed door");
    }

    #[test]
    fn test_fallback_level_loads() {
        let data = loader::fallback_level();
        let level = Level::from_data(&data, SimConfig::default());
        assert!(level.player().is_some());
        assert!(level.enemies_remaining() > 0);
    }

    #[test]
    fn test_player_settles_on_floor() {
        let mut level = arena(&[]);
        run_ticks(&mut level, InputFrame::new(), 60);

        let player = level.player().unwrap();
        assert_eq!(player.hit_box().bottom(), 200.0);
        assert_eq!(player.motion.velocity.y, 0.0);
    }

    #[test]
    fn test_player_walks_right_and_stops_at_wall() {
        let mut level = arena(&[]);
        let right = InputFrame::new().with(InputFrame::FLAG_RIGHT);
        run_ticks(&mut level, right, 600);

        let player = level.player().unwrap();
        assert_eq!(player.hit_box().right(), 790.0, "flush against the wall");
        assert_eq!(player.motion.velocity.x, 0.0);
    }

    #[test]
    fn test_player_attack_kills_slime_and_opens_doors() {
        let mut level = arena(&[slime_at(80.0)]);
        // Let everything settle, then swing twice (slime has 2 health and
        // a hurt window between hits).
        run_ticks(&mut level, InputFrame::new(), 30);

        let attack = InputFrame::new().with(InputFrame::FLAG_ATTACK);
        run_ticks(&mut level, attack, 600);

        assert_eq!(level.enemies_remaining(), 0, "slime removed after death");
        let solids = level.solids();
        assert_eq!(solids.len(), 3, "door no longer solid once opened");
    }

    #[test]
    fn test_single_hit_attack_damages_every_overlap_then_dies() {
        // Hand-placed hitbox overlapping two slimes: one resolution pass
        // must damage both, then consume the hitbox.
        let mut level = arena(&[slime_at(80.0), slime_at(84.0)]);
        let spec = MeleeSpec {
            w: 24.0,
            h: 20.0,
            reach: 18.0,
            y_offset: 0.0,
            damage: 1,
            life_ms: 90,
            single_hit: true,
        };
        let attack = MeleeAttack::spawn(
            &spec,
            level.player_id(),
            Vec2::new(70.0, 194.0),
            Facing::Right,
            Group::Enemies,
            level.clock_ms,
        );
        let id = level.registry.allocate(&[Group::Attacks]);
        level.attacks.insert(id, attack);

        level.advance_clock();
        level.update_attacks();

        let events = level.take_events();
        let hits = events
            .iter()
            .filter(|e| matches!(e.data, GameEventData::DamageDealt { .. }))
            .count();
        assert_eq!(hits, 2, "both overlapped slimes take damage");
        assert!(level.attacks.is_empty(), "single-hit hitbox consumed");

        for slime_id in level.registry.members(Group::Slimes) {
            let slime = level.actor(slime_id).unwrap();
            assert_eq!(slime.health, 1);
            assert!(slime.invincible);
        }
    }

    #[test]
    fn test_attack_expires_without_target() {
        let mut level = arena(&[]);
        run_ticks(&mut level, InputFrame::new(), 30);

        let attack = InputFrame::new().with(InputFrame::FLAG_ATTACK);
        // One swing, then idle long enough for hitbox expiry.
        run_ticks(&mut level, attack, 1);
        run_ticks(&mut level, InputFrame::new(), 60);

        assert!(level.attacks.is_empty());
        assert_eq!(level.registry.count(Group::Attacks), 0);
    }

    #[test]
    fn test_out_of_bounds_fall_removes_player_and_fires_event() {
        // No floor at all: bare world.
        let data = LevelData {
            name: "pit".to_string(),
            width: 400.0,
            height: 200.0,
            geometry: Vec::new(),
            spawns: vec![SpawnDef {
                kind: ActorKind::Player,
                x: 50.0,
                y: 0.0,
                health: None,
            }],
            items: Vec::new(),
        }
        .validate()
        .unwrap();
        let mut level = Level::from_data(&data, SimConfig::default());

        let mut last_y = f32::MIN;
        let mut died = false;
        for _ in 0..200 {
            level.advance_clock();
            level.update_player(&InputFrame::new());
            if let Some(player) = level.player() {
                assert!(player.motion.position.y > last_y, "fall must be monotonic");
                last_y = player.motion.position.y;
            }
            for event in level.take_events() {
                if event.data == GameEventData::PlayerDied {
                    died = true;
                }
            }
            if died {
                break;
            }
        }

        assert!(died, "player fell past the margin");
        assert!(level.player().is_none());
    }

    #[test]
    fn test_door_requires_enemies_cleared() {
        let mut level = arena(&[slime_at(400.0)]);
        run_ticks(&mut level, InputFrame::new(), 10);
        assert_eq!(level.solids().len(), 4, "door stays closed with a live enemy");
    }

    #[test]
    fn test_hitbox_lookup_covers_all_collections() {
        let level = arena(&[slime_at(300.0)]);
        for id in level.registry.members(Group::All) {
            assert!(level.hit_box(id).is_some());
        }
    }

    #[test]
    fn test_draw_rect_applies_camera() {
        let mut level = arena(&[]);
        level.camera.offset_x = 30;
        let id = level.player_id();

        let world = level.hit_box(id).unwrap();
        let draw = level.draw_rect(id).unwrap();
        assert_eq!(draw.x, world.x - 30.0);
        assert_eq!(draw.y, world.y);
    }

    #[test]
    fn test_events_sorted_on_take() {
        let mut level = arena(&[]);
        level.push_event(GameEventData::EntityRemoved { entity: EntityId(9) });
        level.push_event(GameEventData::PlayerDied);

        let events = level.take_events();
        assert_eq!(events[0].data, GameEventData::PlayerDied);
        assert!(level.take_events().is_empty());
    }
}
