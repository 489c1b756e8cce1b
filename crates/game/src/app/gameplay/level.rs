use engine::Vec3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::chest::Chest;
use super::enemy::Enemy;
use super::hud::MessageSlot;
use super::inventory::ItemKind;
use super::player::Player;
use super::tiles::Tile;
use super::world::{Checkpoint, Tutorial, WorldState};
use super::GROUND_Z;
use crate::app::config::Tuning;

pub(crate) const FIRST_LEVEL: u32 = 1;
pub(crate) const LAST_LEVEL: u32 = 3;

pub(crate) const TUTORIAL_START_MESSAGE: &str = "Walk over the green tile to set your checkpoint";

const FIELD_HALF_SIZE: f32 = 1600.0;
const TUTORIAL_WALL_HEIGHT: f32 = 2000.0;
const BOSS_WALL_HEIGHT: f32 = 800.0;
const KEY_EDGE_PADDING: f32 = 80.0;

const CHECKPOINT_POINTS: [(f32, f32); 3] = [(-200.0, -200.0), (0.0, 0.0), (300.0, 200.0)];
const TRAP_SPAWNS: [(f32, f32); 5] = [
    (-1200.0, 400.0),
    (-800.0, 800.0),
    (-400.0, 1200.0),
    (0.0, 800.0),
    (400.0, 400.0),
];

/// Builds a fresh world for `level`, carrying the player's inventory over.
///
/// Levels outside `FIRST_LEVEL..=LAST_LEVEL` are clamped into range.
pub(crate) fn build_level(
    level: u32,
    tuning: &Tuning,
    mut player: Player,
    seed_source: &mut StdRng,
) -> WorldState {
    let level = level.clamp(FIRST_LEVEL, LAST_LEVEL);
    let rng = StdRng::seed_from_u64(seed_source.gen());
    let spawn = match level {
        1 => Vec3::new(-FIELD_HALF_SIZE + 130.0, 100.0, GROUND_Z),
        _ => Vec3::new(0.0, 0.0, GROUND_Z),
    };
    let starting_keys = u32::from(level == 1);
    player.prepare_for_level(spawn.x, spawn.y, starting_keys, tuning);

    let mut world = WorldState::new(
        level,
        GROUND_Z,
        player,
        tuning.portal_radius,
        tuning.checkpoint_load_uses,
        rng,
    );
    world.checkpoint = Checkpoint::new(Some(spawn), tuning.checkpoint_load_uses);
    world.win_check_cooldown = tuning.win_check_cooldown_ticks;
    world.checkpoint_points = CHECKPOINT_POINTS
        .iter()
        .map(|(x, y)| Vec3::new(*x, *y, GROUND_Z))
        .collect();

    match level {
        1 => populate_tutorial(&mut world),
        2 => populate_open_field(&mut world),
        _ => populate_boss_arena(&mut world),
    }
    world
}

fn populate_tutorial(world: &mut WorldState) {
    world.enclose(FIELD_HALF_SIZE, TUTORIAL_WALL_HEIGHT);
    world.tiles.push(Tile::checkpoint(-1500.0, -100.0, GROUND_Z));

    let mut step = 100.0;
    while step <= 1300.0 {
        world.tiles.push(Tile::lava(-1300.0, step, GROUND_Z));
        world.tiles.push(Tile::lava(-1300.0, -step, GROUND_Z));
        step += 200.0;
    }
    let mut y = -1500.0;
    while y <= 100.0 {
        world.tiles.push(Tile::lava(-900.0, y, GROUND_Z));
        y += 200.0;
    }
    world.tiles.push(Tile::lava(-1100.0, 100.0, GROUND_Z));
    let mut y = -1300.0;
    while y <= 1500.0 {
        world.tiles.push(Tile::lava(100.0, y, GROUND_Z));
        y += 200.0;
    }

    world.tiles.push(Tile::secret(-1500.0, -1500.0, GROUND_Z));
    world.tiles.push(Tile::secret(-1100.0, -1500.0, GROUND_Z));
    world.tiles.push(Tile::secret(-1100.0, -100.0, GROUND_Z));
    world.tiles.push(Tile::trap(-500.0, 0.0, GROUND_Z));
    world.tiles.push(Tile::exit(1400.0, 0.0, GROUND_Z));

    world.trap_spawns = TRAP_SPAWNS
        .iter()
        .map(|(x, y)| Vec3::new(*x, *y, GROUND_Z))
        .collect();
    world.tutorial = Tutorial {
        active: true,
        ..Tutorial::default()
    };
    world
        .messages
        .show_sticky(MessageSlot::Tutorial, TUTORIAL_START_MESSAGE);
}

fn populate_open_field(world: &mut WorldState) {
    for _ in 0..8 {
        let (x, y) = random_point(&mut world.rng, 350);
        world.spawn_normal_enemy(x, y);
    }
    for _ in 0..3 {
        let (x, y) = random_point(&mut world.rng, 300);
        world.keys.push(Vec3::new(x, y, GROUND_Z));
    }
    place_chests(world, 3);
    world.tiles.push(Tile::exit(400.0, -400.0, GROUND_Z));
}

fn populate_boss_arena(world: &mut WorldState) {
    place_chests(world, 3);
    let field = FIELD_HALF_SIZE as i32;
    for _ in 0..10 {
        let (x, y) = random_point(&mut world.rng, field);
        world.spawn_normal_enemy(x, y);
    }
    world.enemies.push(Enemy::boss(
        FIELD_HALF_SIZE - 100.0,
        FIELD_HALF_SIZE - 100.0,
        GROUND_Z,
    ));
    world.boss_spawned = world.has_boss();
    world.enclose(FIELD_HALF_SIZE, BOSS_WALL_HEIGHT);

    let key_range = (FIELD_HALF_SIZE - KEY_EDGE_PADDING) as i32;
    for _ in 0..world.chests.len() {
        let (x, y) = random_point(&mut world.rng, key_range);
        world.keys.push(Vec3::new(x, y, GROUND_Z));
    }
}

fn place_chests(world: &mut WorldState, count: usize) {
    for _ in 0..count {
        let (x, y) = random_point(&mut world.rng, 250);
        let contents = ItemKind::ALL.choose(&mut world.rng).copied();
        world.chests.push(Chest::new(x, y, GROUND_Z, contents));
    }
}

fn random_point(rng: &mut StdRng, half_range: i32) -> (f32, f32) {
    (
        rng.gen_range(-half_range..=half_range) as f32,
        rng.gen_range(-half_range..=half_range) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gameplay::tiles::TileKind;

    fn build(level: u32, seed: u64) -> WorldState {
        let tuning = Tuning::default();
        let player = Player::new(0.0, 0.0, GROUND_Z, &tuning);
        build_level(level, &tuning, player, &mut StdRng::seed_from_u64(seed))
    }

    fn count_tiles(world: &WorldState, wanted: fn(TileKind) -> bool) -> usize {
        world
            .tiles
            .iter()
            .filter(|tile| wanted(tile.kind()))
            .count()
    }

    #[test]
    fn tutorial_layout() {
        let world = build(1, 1);
        assert_eq!(world.level, 1);
        assert!(world.enemies.is_empty());
        assert!(world.chests.is_empty());
        assert_eq!(world.player.inventory().keys, 1);
        assert_eq!(world.player.position().x, -1470.0);
        assert_eq!(count_tiles(&world, |kind| kind == TileKind::Lava), 14 + 9 + 1 + 15);
        assert_eq!(
            count_tiles(&world, |kind| matches!(kind, TileKind::Golden { .. })),
            4
        );
        assert_eq!(count_tiles(&world, |kind| kind == TileKind::Checkpoint), 1);
        assert_eq!(count_tiles(&world, |kind| kind == TileKind::Exit), 1);
        assert_eq!(world.trap_spawns.len(), 5);
        assert!(world.tutorial.active);
        assert_eq!(
            world.messages.text(MessageSlot::Tutorial),
            Some(TUTORIAL_START_MESSAGE)
        );
        assert_eq!(world.walls.len(), 4);
    }

    #[test]
    fn open_field_layout() {
        let world = build(2, 2);
        assert_eq!(world.enemies.len(), 8);
        assert_eq!(world.keys.len(), 3);
        assert_eq!(world.chests.len(), 3);
        assert!(world.bounds.is_none());
        assert_eq!(world.player.inventory().keys, 0);
        assert!(world
            .enemies
            .iter()
            .all(|enemy| enemy.position().x.abs() <= 350.0));
        assert!(world.chests.iter().all(|chest| chest.contents().is_some()));
    }

    #[test]
    fn boss_arena_layout() {
        let world = build(3, 3);
        assert_eq!(world.enemies.len(), 11);
        assert_eq!(world.enemies.iter().filter(|enemy| enemy.is_boss()).count(), 1);
        assert!(world.boss_spawned);
        assert!(!world.boss_seen_alive);
        assert_eq!(world.keys.len(), world.chests.len());
        assert!(world.keys.iter().all(|key| key.x.abs() <= 1520.0));
        assert_eq!(world.win_check_cooldown, 120);
        assert!(world.bounds.is_some());
    }

    #[test]
    fn setup_resets_checkpoint_uses_and_saves_spawn() {
        let world = build(2, 4);
        assert_eq!(world.checkpoint.load_uses_left(), 3);
        assert_eq!(world.checkpoint.saved(), Some(Vec3::new(0.0, 0.0, GROUND_Z)));
        assert_eq!(world.checkpoint_points.len(), 3);
    }

    #[test]
    fn same_seed_same_layout() {
        let a = build(2, 99);
        let b = build(2, 99);
        let positions = |world: &WorldState| {
            world
                .enemies
                .iter()
                .map(|enemy| enemy.position())
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn out_of_range_levels_clamp() {
        assert_eq!(build(0, 5).level, 1);
        assert_eq!(build(9, 5).level, 3);
    }
}
