use engine::{collide, HasCollisionRadius, InputAction, InputSnapshot, Vec3};
use tracing::{debug, info};

use super::enemy::HitOutcome;
use super::hud::MessageSlot;
use super::player::MoveIntent;
use super::projectile::Allegiance;
use super::tiles::TileKind;
use super::world::WorldState;
use crate::app::config::Tuning;

const LAVA_DAMAGE_PER_SECOND: f32 = 0.3;
const LAVA_MESSAGE: &str = "Ouch!!! Lava hurts!!!";
const LAVA_MESSAGE_TICKS: u32 = 60;
const GOLDEN_MESSAGE_TICKS: u32 = 120;
const CHECKPOINT_MESSAGE: &str = "Checkpoint Saved!";
const CHECKPOINT_MESSAGE_TICKS: u32 = 60;
const TUTORIAL_RING_MESSAGE: &str = "Excellent!!! Now kill the enemies!!!";
const TUTORIAL_CLEARED_MESSAGE: &str = "Great job!!! Move to the next golden tile!";
const TUTORIAL_RING_SIZE: usize = 5;
const TUTORIAL_RING_RADIUS: f32 = 300.0;
const CHECKPOINT_POINT_REACH: f32 = 20.0;
const PICKUP_REACH: f32 = 30.0;
const PICKUP_SCORE: u32 = 5;
const KEY_SCORE: u32 = 3;
const WIN_BONUS: u32 = 500;
const KNOCKBACK_EPSILON: f32 = 1e-6;

pub(crate) const TICK_PHASE_ORDER_TEXT: &str =
    "PlayerMotion>Projectiles>Enemies>BulletHits>Triggers>Portals>Terminal>Timers";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickPhase {
    PlayerMotion,
    Projectiles,
    Enemies,
    BulletHits,
    Triggers,
    Portals,
    Terminal,
    Timers,
}

impl TickPhase {
    #[cfg(test)]
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::PlayerMotion => "PlayerMotion",
            Self::Projectiles => "Projectiles",
            Self::Enemies => "Enemies",
            Self::BulletHits => "BulletHits",
            Self::Triggers => "Triggers",
            Self::Portals => "Portals",
            Self::Terminal => "Terminal",
            Self::Timers => "Timers",
        }
    }
}

pub(crate) const TICK_PHASE_ORDER: [TickPhase; 8] = [
    TickPhase::PlayerMotion,
    TickPhase::Projectiles,
    TickPhase::Enemies,
    TickPhase::BulletHits,
    TickPhase::Triggers,
    TickPhase::Portals,
    TickPhase::Terminal,
    TickPhase::Timers,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    Continue,
    Won,
    Lost,
    AdvanceLevel,
}

/// Player requests for one tick, already resolved from held and pressed actions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct PlayerCommands {
    pub(crate) intent: MoveIntent,
    pub(crate) turn_degrees: f32,
    pub(crate) jump: bool,
    pub(crate) fire: bool,
    pub(crate) interact: bool,
    pub(crate) slot_selected: Option<u8>,
    pub(crate) slot_cycle_steps: i32,
}

impl PlayerCommands {
    pub(crate) fn from_input(
        input: &InputSnapshot,
        tuning: &Tuning,
        scoped: bool,
        dt: f32,
    ) -> Self {
        let axis = |positive: InputAction, negative: InputAction| {
            f32::from(u8::from(input.is_down(positive)))
                - f32::from(u8::from(input.is_down(negative)))
        };
        let turn_rate = if scoped {
            tuning.scoped_turn_rate_degrees
        } else {
            tuning.turn_rate_degrees
        };
        Self {
            intent: MoveIntent {
                forward: axis(InputAction::MoveForward, InputAction::MoveBack),
                strafe: axis(InputAction::StrafeRight, InputAction::StrafeLeft),
            },
            turn_degrees: axis(InputAction::TurnLeft, InputAction::TurnRight) * turn_rate * dt,
            jump: input.was_pressed(InputAction::Jump),
            fire: input.was_pressed(InputAction::FirePrimary),
            interact: input.was_pressed(InputAction::Interact),
            slot_selected: input.slot_selected(),
            slot_cycle_steps: input.slot_cycle_steps(),
        }
    }
}

/// Running score; the best value only ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Score {
    current: u32,
    best: u32,
}

impl Score {
    pub(crate) fn current(&self) -> u32 {
        self.current
    }

    pub(crate) fn best(&self) -> u32 {
        self.best
    }

    pub(crate) fn add(&mut self, points: u32) {
        self.current = self.current.saturating_add(points);
        self.best = self.best.max(self.current);
    }

    pub(crate) fn reset(&mut self) {
        self.current = 0;
    }
}

/// Runs the fixed phase order once per simulation tick.
#[derive(Debug, Default)]
pub(crate) struct WorldPipeline {
    last_tick_order: Vec<TickPhase>,
}

impl WorldPipeline {
    pub(crate) fn last_tick_order(&self) -> &[TickPhase] {
        &self.last_tick_order
    }

    pub(crate) fn run_tick(
        &mut self,
        world: &mut WorldState,
        score: &mut Score,
        commands: &PlayerCommands,
        dt: f32,
    ) -> TickOutcome {
        self.last_tick_order.clear();
        let mut advance = false;
        let mut outcome = TickOutcome::Continue;
        for phase in TICK_PHASE_ORDER {
            self.last_tick_order.push(phase);
            match phase {
                TickPhase::PlayerMotion => player_motion(world, commands, dt),
                TickPhase::Projectiles => projectiles(world, dt),
                TickPhase::Enemies => enemies(world, dt),
                TickPhase::BulletHits => bullet_hits(world, score),
                TickPhase::Triggers => advance = triggers(world, score, dt),
                TickPhase::Portals => portals(world),
                TickPhase::Terminal => outcome = terminal(world, score, advance),
                TickPhase::Timers => world.messages.tick(),
            }
        }
        outcome
    }
}

fn player_motion(world: &mut WorldState, commands: &PlayerCommands, dt: f32) {
    if let Some(slot) = commands.slot_selected {
        world.player.inventory_mut().select_slot(slot);
    }
    if commands.slot_cycle_steps != 0 {
        world
            .player
            .inventory_mut()
            .cycle_slot(commands.slot_cycle_steps);
    }
    world.player.turn(commands.turn_degrees);
    if commands.jump {
        world.player.jump();
    }
    let bounds = world.bounds;
    if world
        .player
        .handle_movement(commands.intent, bounds.as_ref(), dt)
    {
        world.messages.dismiss_sticky();
    }
    world.player.physics(dt);
    if commands.interact {
        world.interact();
    }
    if commands.fire {
        world.use_active_slot();
    }
}

fn projectiles(world: &mut WorldState, dt: f32) {
    world.projectiles.retain_mut(|projectile| projectile.update(dt));
    for pickup in &mut world.pickups {
        pickup.fall(dt);
    }
}

fn enemies(world: &mut WorldState, dt: f32) {
    let target = world.player.position();
    let mut shots = Vec::new();
    for enemy in &mut world.enemies {
        if let Some(shot) = enemy.update(target, dt) {
            shots.push(shot);
        }
    }
    world.projectiles.extend(shots);

    let contact = world
        .enemies
        .iter()
        .position(|enemy| collide(enemy.model(), world.player.model()));
    if let Some(index) = contact {
        if let Some(enemy) = world.enemies.get(index) {
            let (damage, knockback, dies) =
                (enemy.contact_damage(), enemy.knockback(), enemy.dies_on_contact());
            let origin = enemy.position();
            world.player.take_damage(damage);
            if knockback > 0.0 {
                let here = world.player.position();
                let (dx, dy) = (here.x - origin.x, here.y - origin.y);
                let distance = dx.hypot(dy) + KNOCKBACK_EPSILON;
                let push = Vec3::new(dx / distance * knockback, dy / distance * knockback, 0.0);
                let bounds = world.bounds;
                world.player.shift_planar(push, bounds.as_ref());
            }
            debug!(damage, health = world.player.health(), "enemy_contact");
            if dies {
                world.enemies.remove(index);
            }
        }
    }

    world.projectiles.retain(|shot| {
        if shot.allegiance() != Allegiance::Hostile
            || !world.player.within_planar_reach(shot.position(), 0.0)
        {
            return true;
        }
        world.player.take_damage(shot.damage());
        false
    });
}

fn bullet_hits(world: &mut WorldState, score: &mut Score) {
    let mut spent = vec![false; world.projectiles.len()];
    let mut defeated = vec![false; world.enemies.len()];
    for (shot_index, shot) in world.projectiles.iter().enumerate() {
        if shot.allegiance() != Allegiance::Friendly {
            continue;
        }
        for (enemy_index, enemy) in world.enemies.iter_mut().enumerate() {
            if defeated[enemy_index] || !enemy.within_planar_reach(shot.position(), 0.0) {
                continue;
            }
            spent[shot_index] = true;
            if enemy.apply_hit(shot.damage()) == HitOutcome::Defeated {
                defeated[enemy_index] = true;
                score.add(enemy.kill_score());
                debug!(kind = ?enemy.kind(), score = score.current(), "enemy_defeated");
            }
            break;
        }
    }

    let mut index = 0;
    world.projectiles.retain(|_| {
        let keep = !spent[index];
        index += 1;
        keep
    });
    let mut index = 0;
    world.enemies.retain(|_| {
        let keep = !defeated[index];
        index += 1;
        keep
    });
}

/// Returns whether the player reached an exit.
fn triggers(world: &mut WorldState, score: &mut Score, dt: f32) -> bool {
    let here = world.player.position();
    let mut on_lava = false;
    let mut spring_trap = false;
    let mut checkpoint_tile = None;
    let mut advance = false;

    for tile in &mut world.tiles {
        if !tile.covers(here) {
            continue;
        }
        match tile.kind() {
            TileKind::Lava => on_lava = true,
            TileKind::Golden { message, trap } => {
                if !tile.is_triggered() {
                    tile.mark_triggered();
                    world
                        .messages
                        .show(MessageSlot::Golden, message, GOLDEN_MESSAGE_TICKS);
                    spring_trap |= trap;
                }
            }
            TileKind::Checkpoint => checkpoint_tile = Some(tile.position()),
            TileKind::Exit => advance = true,
        }
    }

    if on_lava {
        world.player.take_damage(LAVA_DAMAGE_PER_SECOND * dt);
        world
            .messages
            .show(MessageSlot::Lava, LAVA_MESSAGE, LAVA_MESSAGE_TICKS);
    }

    if spring_trap && !world.trap_sprung {
        world.trap_sprung = true;
        let spawns = world.trap_spawns.clone();
        for spawn in &spawns {
            world.spawn_normal_enemy(spawn.x, spawn.y);
        }
        info!(count = spawns.len(), "trap_sprung");
    }

    if let Some(position) = checkpoint_tile {
        if world.checkpoint.saved() != Some(position) {
            debug!(x = position.x, y = position.y, "checkpoint_tile_reached");
        }
        world.checkpoint.save(position);
        world.messages.show(
            MessageSlot::Checkpoint,
            CHECKPOINT_MESSAGE,
            CHECKPOINT_MESSAGE_TICKS,
        );
        if world.tutorial.active {
            world
                .messages
                .show_sticky(MessageSlot::Tutorial, TUTORIAL_RING_MESSAGE);
            if !world.tutorial.ring_spawned {
                world.tutorial.ring_spawned = true;
                spawn_tutorial_ring(world, here);
            }
        }
    }

    if let Some(point) = world
        .checkpoint_points
        .iter()
        .copied()
        .find(|point| point.planar_distance(here) < CHECKPOINT_POINT_REACH)
    {
        world.checkpoint.save(point);
    }

    let mut collected = Vec::new();
    world.pickups.retain(|pickup| {
        if pickup.position().planar_distance(here) < PICKUP_REACH {
            collected.push(pickup.kind());
            false
        } else {
            true
        }
    });
    for kind in collected {
        world.player.apply_pickup(kind);
        score.add(PICKUP_SCORE);
    }

    let keys_before = world.keys.len();
    world
        .keys
        .retain(|key| key.planar_distance(here) >= PICKUP_REACH);
    for _ in world.keys.len()..keys_before {
        world.player.inventory_mut().keys += 1;
        score.add(KEY_SCORE);
    }

    let tutorial = world.tutorial;
    if tutorial.active
        && tutorial.ring_spawned
        && !tutorial.cleared_announced
        && world.enemies.is_empty()
    {
        world.tutorial.cleared_announced = true;
        world
            .messages
            .show_sticky(MessageSlot::Tutorial, TUTORIAL_CLEARED_MESSAGE);
        info!("tutorial_cleared");
    }

    advance
}

fn spawn_tutorial_ring(world: &mut WorldState, center: Vec3) {
    for index in 0..TUTORIAL_RING_SIZE {
        let angle = index as f32 * std::f32::consts::TAU / TUTORIAL_RING_SIZE as f32;
        world.spawn_normal_enemy(
            center.x + angle.cos() * TUTORIAL_RING_RADIUS,
            center.y + angle.sin() * TUTORIAL_RING_RADIUS,
        );
    }
    info!(count = TUTORIAL_RING_SIZE, "tutorial_ring_spawned");
}

fn portals(world: &mut WorldState) {
    if !world.portals.is_linked() {
        return;
    }
    if let Some(arrival) = world.player.pass_through(&world.portals) {
        debug!(slot = ?arrival, "player_teleported");
    }
    for enemy in &mut world.enemies {
        enemy.pass_through(&world.portals);
    }
}

fn terminal(world: &mut WorldState, score: &mut Score, advance: bool) -> TickOutcome {
    if world.player.health() <= 0.0 {
        return TickOutcome::Lost;
    }
    if world.boss_spawned {
        if world.has_boss() {
            world.boss_seen_alive = true;
        } else if world.boss_seen_alive && world.win_check_cooldown == 0 {
            score.add(WIN_BONUS);
            return TickOutcome::Won;
        }
    }
    world.win_check_cooldown = world.win_check_cooldown.saturating_sub(1);
    if advance {
        TickOutcome::AdvanceLevel
    } else {
        TickOutcome::Continue
    }
}
