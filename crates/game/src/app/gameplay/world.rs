use engine::{Extent3, GroundGrid, RenderFrame, Rgba, SpatialEntity, Vec3};
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::chest::{Chest, Pickup};
use super::enemy::Enemy;
use super::hud::{HudMessages, MessageSlot};
use super::inventory::SlotItem;
use super::palette;
use super::player::{Player, WorldBounds, MUZZLE_DROP, MUZZLE_FORWARD};
use super::portal::PortalPair;
use super::projectile::{Allegiance, Projectile, ProjectileProfile, HANDGUN, RIFLE};
use super::tiles::Tile;

const CHEST_REACH: f32 = 80.0;
const PORTAL_THROW_DISTANCE: f32 = 120.0;
const PORTAL_LIFT: f32 = 20.0;
const WALL_THICKNESS: f32 = 20.0;
const KEY_SIZE: f32 = 12.0;
const KEY_LIFT: f32 = 10.0;
const CHECKPOINT_MARKER_SIZE: f32 = 16.0;
const GRID_SPACING: f32 = 200.0;
const OPEN_FIELD_HALF_SIZE: f32 = 1600.0;
const NO_KEY_NOTICE_TICKS: u32 = 90;

pub(crate) const NO_KEY_MESSAGE: &str = "You need a key to open this chest";

/// Last saved position plus how many reloads the level still allows.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Checkpoint {
    saved: Option<Vec3>,
    load_uses_left: u32,
}

impl Checkpoint {
    pub(crate) fn new(saved: Option<Vec3>, load_uses: u32) -> Self {
        Self {
            saved,
            load_uses_left: load_uses,
        }
    }

    pub(crate) fn saved(&self) -> Option<Vec3> {
        self.saved
    }

    pub(crate) fn load_uses_left(&self) -> u32 {
        self.load_uses_left
    }

    pub(crate) fn save(&mut self, position: Vec3) {
        self.saved = Some(position);
    }

    /// Spends one use and returns the saved position; `None` without a save or uses left.
    pub(crate) fn load(&mut self) -> Option<Vec3> {
        let saved = self.saved?;
        if self.load_uses_left == 0 {
            return None;
        }
        self.load_uses_left -= 1;
        Some(saved)
    }
}

/// Level-one hint progression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tutorial {
    pub(crate) active: bool,
    pub(crate) ring_spawned: bool,
    pub(crate) cleared_announced: bool,
}

/// Everything alive in the current level. Rebuilt from scratch by level setup.
#[derive(Debug, Clone)]
pub(crate) struct WorldState {
    pub(crate) level: u32,
    pub(crate) ground_z: f32,
    pub(crate) bounds: Option<WorldBounds>,
    pub(crate) walls: Vec<SpatialEntity>,
    pub(crate) player: Player,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) chests: Vec<Chest>,
    pub(crate) pickups: Vec<Pickup>,
    pub(crate) keys: Vec<Vec3>,
    pub(crate) tiles: Vec<Tile>,
    pub(crate) checkpoint_points: Vec<Vec3>,
    pub(crate) trap_spawns: Vec<Vec3>,
    pub(crate) trap_sprung: bool,
    pub(crate) tutorial: Tutorial,
    pub(crate) portals: PortalPair,
    pub(crate) checkpoint: Checkpoint,
    pub(crate) messages: HudMessages,
    pub(crate) boss_spawned: bool,
    pub(crate) boss_seen_alive: bool,
    pub(crate) win_check_cooldown: u32,
    pub(crate) rng: StdRng,
}

impl WorldState {
    pub(crate) fn new(
        level: u32,
        ground_z: f32,
        player: Player,
        portal_radius: f32,
        load_uses: u32,
        rng: StdRng,
    ) -> Self {
        Self {
            level,
            ground_z,
            bounds: None,
            walls: Vec::new(),
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            chests: Vec::new(),
            pickups: Vec::new(),
            keys: Vec::new(),
            tiles: Vec::new(),
            checkpoint_points: Vec::new(),
            trap_spawns: Vec::new(),
            trap_sprung: false,
            tutorial: Tutorial::default(),
            portals: PortalPair::new(portal_radius),
            checkpoint: Checkpoint::new(None, load_uses),
            messages: HudMessages::default(),
            boss_spawned: false,
            boss_seen_alive: false,
            win_check_cooldown: 0,
            rng,
        }
    }

    /// Encloses a square field with walls and clamps the player inside it.
    pub(crate) fn enclose(&mut self, half_size: f32, wall_height: f32) {
        self.bounds = Some(WorldBounds::square(half_size));
        let center_z = self.ground_z + wall_height / 2.0;
        let offset = half_size + WALL_THICKNESS / 2.0;
        let span = half_size * 2.0 + WALL_THICKNESS * 2.0;
        let along_y = Extent3::new(WALL_THICKNESS, span, wall_height);
        let along_x = Extent3::new(span, WALL_THICKNESS, wall_height);
        self.walls = vec![
            SpatialEntity::cuboid(Vec3::new(-offset, 0.0, center_z), along_y, palette::MAHOGANY),
            SpatialEntity::cuboid(Vec3::new(offset, 0.0, center_z), along_y, palette::MAHOGANY),
            SpatialEntity::cuboid(Vec3::new(0.0, -offset, center_z), along_x, palette::MAHOGANY),
            SpatialEntity::cuboid(Vec3::new(0.0, offset, center_z), along_x, palette::MAHOGANY),
        ];
    }

    pub(crate) fn spawn_normal_enemy(&mut self, x: f32, y: f32) {
        let enemy = Enemy::normal(x, y, self.ground_z, &mut self.rng);
        self.enemies.push(enemy);
    }

    pub(crate) fn has_boss(&self) -> bool {
        self.enemies.iter().any(Enemy::is_boss)
    }

    /// Fires, places a portal or consumes, depending on the selected slot.
    pub(crate) fn use_active_slot(&mut self) {
        let item = self.player.inventory().active_item();
        match item {
            SlotItem::Handgun => {
                if self.player.inventory_mut().take_handgun_round() {
                    self.fire(HANDGUN);
                }
            }
            SlotItem::Rifle => {
                if self.player.inventory_mut().take_rifle_round() {
                    self.fire(RIFLE);
                }
            }
            SlotItem::PortalGun => {
                if self.player.inventory().has_portal_gun() {
                    let ahead = self.player.position()
                        + self.player.forward() * PORTAL_THROW_DISTANCE;
                    self.portals
                        .place_next(ahead.with_z(self.ground_z + PORTAL_LIFT));
                }
            }
            SlotItem::Nourishment => {
                self.player.use_nourishment();
            }
            SlotItem::Aegis => {
                self.player.inventory_mut().take_aegis();
            }
            SlotItem::Shard | SlotItem::Empty => {}
        }
    }

    /// Opens or closes the nearest chest in reach. Opening costs a key.
    pub(crate) fn interact(&mut self) {
        let Some(index) = self.nearest_chest_within(CHEST_REACH) else {
            return;
        };
        let Some(chest) = self.chests.get_mut(index) else {
            return;
        };
        if !chest.is_closed() {
            chest.close();
            return;
        }
        if !self.player.inventory_mut().take_key() {
            self.messages
                .show(MessageSlot::Notice, NO_KEY_MESSAGE, NO_KEY_NOTICE_TICKS);
            return;
        }
        let origin = chest.position();
        if let Some(item) = chest.open() {
            self.pickups
                .push(Pickup::tossed_from(origin, item, self.ground_z, &mut self.rng));
        }
    }

    pub(crate) fn nearest_chest_within(&self, reach: f32) -> Option<usize> {
        let here = self.player.position();
        self.chests
            .iter()
            .enumerate()
            .map(|(index, chest)| (index, chest.position().planar_distance(here)))
            .filter(|(_, distance)| *distance < reach)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    pub(crate) fn radar_points(&self) -> Vec<(Vec3, Rgba)> {
        let enemies = self
            .enemies
            .iter()
            .map(|enemy| (enemy.position(), palette::RED));
        let keys = self.keys.iter().map(|key| (*key, palette::YELLOW));
        let chests = self
            .chests
            .iter()
            .map(|chest| (chest.position(), palette::CYAN));
        enemies.chain(keys).chain(chests).collect()
    }

    pub(crate) fn draw(&self, frame: &mut RenderFrame, head_visible: bool) {
        let half_size = self.bounds.map_or(OPEN_FIELD_HALF_SIZE, |bounds| bounds.max_x);
        frame.set_ground(GroundGrid {
            half_size,
            z: self.ground_z,
            spacing: GRID_SPACING,
        });
        for wall in &self.walls {
            wall.draw(frame);
        }
        for tile in &self.tiles {
            tile.draw(frame);
        }
        for point in &self.checkpoint_points {
            SpatialEntity::cuboid(
                point.with_z(self.ground_z + 1.0),
                Extent3::new(CHECKPOINT_MARKER_SIZE, CHECKPOINT_MARKER_SIZE, 2.0),
                palette::BRIGHT_GREEN,
            )
            .draw(frame);
        }
        for key in &self.keys {
            SpatialEntity::cuboid(
                key.with_z(self.ground_z + KEY_LIFT),
                Extent3::cube(KEY_SIZE),
                palette::YELLOW,
            )
            .draw(frame);
        }
        for chest in &self.chests {
            chest.draw(frame);
        }
        for pickup in &self.pickups {
            pickup.draw(frame);
        }
        for enemy in &self.enemies {
            enemy.draw(frame);
        }
        for projectile in &self.projectiles {
            projectile.draw(frame);
        }
        self.portals.draw(frame);
        self.player.draw(frame, head_visible);
    }

    fn fire(&mut self, profile: ProjectileProfile) {
        let forward = self.player.forward();
        let origin = self.player.head_position() + forward * MUZZLE_FORWARD
            - Vec3::new(0.0, 0.0, MUZZLE_DROP);
        let damage = self.player.damage() + profile.bonus_damage;
        debug!(damage, x = origin.x, y = origin.y, "projectile_fired");
        self.projectiles.push(Projectile::new(
            origin,
            forward,
            profile,
            damage,
            Allegiance::Friendly,
        ));
    }

    /// Saves the player's current ground position.
    pub(crate) fn save_checkpoint(&mut self) {
        let position = self.player.position().with_z(self.ground_z);
        self.checkpoint.save(position);
        info!(level = self.level, x = position.x, y = position.y, "checkpoint_saved");
    }

    /// Returns whether a reload happened; only the player moves.
    pub(crate) fn load_checkpoint(&mut self) -> bool {
        let Some(position) = self.checkpoint.load() else {
            debug!(
                uses_left = self.checkpoint.load_uses_left(),
                "checkpoint_load_refused"
            );
            return false;
        };
        self.player.place_at(position.x, position.y);
        info!(
            level = self.level,
            uses_left = self.checkpoint.load_uses_left(),
            "checkpoint_loaded"
        );
        true
    }
}
