use engine::{CompositeEntity, Extent3, HasCollisionRadius, RenderFrame, SpatialEntity, Vec3};
use tracing::debug;

use super::inventory::{Inventory, ItemKind};
use super::palette;
use super::portal::{PortalPair, PortalSlot, Traveler};
use crate::app::config::Tuning;

const LEG_HEIGHT: f32 = 40.0;
const BODY_HEIGHT: f32 = 40.0;
const HEAD_RADIUS: f32 = 12.0;
const ARM_HEIGHT: f32 = 40.0;
const ARM_RADIUS: f32 = 5.0;
const LEG_RADIUS: f32 = 7.0;
const BODY_RADIUS: f32 = 20.0;
const SLIM_BODY_RADIUS: f32 = 10.0;
const SHOULDER_SPAN: f32 = 46.0;
const LEG_OFFSET: f32 = 7.0;
const HEAD_GAP: f32 = 4.0;

const LEG_LEFT: usize = 0;
const LEG_RIGHT: usize = 1;
const ARM_LEFT: usize = 2;
const BODY: usize = 3;
const ARM_RIGHT: usize = 4;
const HEAD: usize = 5;

const GROUNDED_EPSILON: f32 = 0.2;
const BOUNDARY_PADDING: f32 = 10.0;
const WALK_PHASE_PER_SECOND: f32 = 0.9;
const LEG_SWING_DEGREES: f32 = 12.0;

const AMMO_PICKUP_ROUNDS: u32 = 12;
const RIFLE_AMMO_PICKUP_ROUNDS: u32 = 6;
const NOURISHMENT_HEAL: f32 = 25.0;
const SHARD_DAMAGE_BONUS: f32 = 5.0;

/// Muzzle sits this far ahead of the head along the facing direction.
pub(crate) const MUZZLE_FORWARD: f32 = 55.0;
pub(crate) const MUZZLE_DROP: f32 = 15.0;

/// Axis-aligned playable area on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WorldBounds {
    pub(crate) min_x: f32,
    pub(crate) max_x: f32,
    pub(crate) min_y: f32,
    pub(crate) max_y: f32,
}

impl WorldBounds {
    pub(crate) fn square(half_size: f32) -> Self {
        Self {
            min_x: -half_size,
            max_x: half_size,
            min_y: -half_size,
            max_y: half_size,
        }
    }

    fn clamp_padded(&self, x: f32, y: f32, padding: f32) -> (f32, f32) {
        (
            x.clamp(self.min_x + padding, self.max_x - padding),
            y.clamp(self.min_y + padding, self.max_y - padding),
        )
    }
}

/// Movement request for one tick; both axes in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct MoveIntent {
    pub(crate) forward: f32,
    pub(crate) strafe: f32,
}

impl MoveIntent {
    pub(crate) fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.strafe == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayerStyle {
    Regular,
    Hero,
    Hulk,
}

impl PlayerStyle {
    pub(crate) fn next(self) -> Self {
        match self {
            Self::Regular => Self::Hero,
            Self::Hero => Self::Hulk,
            Self::Hulk => Self::Regular,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Hero => "Hero",
            Self::Hulk => "Hulk",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Player {
    model: CompositeEntity,
    ground_z: f32,
    elevation: f32,
    vertical_velocity: f32,
    yaw: f32,
    health: f32,
    max_health: f32,
    damage: f32,
    speed: f32,
    jump_speed: f32,
    gravity: f32,
    inventory: Inventory,
    style: PlayerStyle,
    walk_phase: f32,
    walk_direction: f32,
    portal_lock: Option<PortalSlot>,
}

impl Player {
    pub(crate) fn new(x: f32, y: f32, ground_z: f32, tuning: &Tuning) -> Self {
        Self {
            model: build_model(x, y, ground_z),
            ground_z,
            elevation: 0.0,
            vertical_velocity: 0.0,
            yaw: 0.0,
            health: tuning.max_health,
            max_health: tuning.max_health,
            damage: tuning.base_damage,
            speed: tuning.player_speed,
            jump_speed: tuning.jump_speed,
            gravity: tuning.gravity,
            inventory: Inventory::default(),
            style: PlayerStyle::Regular,
            walk_phase: 0.0,
            walk_direction: 1.0,
            portal_lock: None,
        }
    }

    pub(crate) fn model(&self) -> &CompositeEntity {
        &self.model
    }

    /// Ground-plane position at foot level.
    pub(crate) fn position(&self) -> Vec3 {
        let center = self.model.center();
        Vec3::new(center.x, center.y, self.ground_z + self.elevation)
    }

    pub(crate) fn head_position(&self) -> Vec3 {
        self.model
            .child(HEAD)
            .map(SpatialEntity::center)
            .unwrap_or_else(|| self.model.center())
    }

    pub(crate) fn yaw(&self) -> f32 {
        self.yaw
    }

    pub(crate) fn forward(&self) -> Vec3 {
        Vec3::from_yaw(self.yaw)
    }

    pub(crate) fn health(&self) -> f32 {
        self.health
    }

    pub(crate) fn damage(&self) -> f32 {
        self.damage
    }

    pub(crate) fn elevation(&self) -> f32 {
        self.elevation
    }

    pub(crate) fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub(crate) fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub(crate) fn style(&self) -> PlayerStyle {
        self.style
    }

    /// Teleports through `portals` when standing in one, honoring the arrival lock.
    pub(crate) fn pass_through(&mut self, portals: &PortalPair) -> Option<PortalSlot> {
        let mut lock = self.portal_lock;
        let arrival = portals.try_teleport(self, &mut lock);
        self.portal_lock = lock;
        arrival
    }

    pub(crate) fn is_grounded(&self) -> bool {
        self.elevation.abs() < GROUNDED_EPSILON
    }

    /// Moves along the facing direction and returns whether the player moved.
    pub(crate) fn handle_movement(
        &mut self,
        intent: MoveIntent,
        bounds: Option<&WorldBounds>,
        dt: f32,
    ) -> bool {
        if intent.is_idle() {
            return false;
        }
        let forward = self.forward();
        let right = Vec3::new(forward.y, -forward.x, 0.0);
        let delta = (forward * intent.forward.clamp(-1.0, 1.0)
            + right * intent.strafe.clamp(-1.0, 1.0))
            * (self.speed * dt);
        self.advance_walk_animation(dt);
        let moved = self.shift_planar(delta, bounds);
        moved != Vec3::ZERO
    }

    /// Applies a planar displacement, clamped to the padded boundary; returns the applied delta.
    pub(crate) fn shift_planar(&mut self, delta: Vec3, bounds: Option<&WorldBounds>) -> Vec3 {
        let current = self.model.center();
        let (mut x, mut y) = (current.x + delta.x, current.y + delta.y);
        if let Some(bounds) = bounds {
            (x, y) = bounds.clamp_padded(x, y, BOUNDARY_PADDING);
        }
        let applied = Vec3::new(x - current.x, y - current.y, 0.0);
        if applied != Vec3::ZERO {
            self.model.translate(applied);
        }
        applied
    }

    /// Spawn reset used by level setup; inventory other than keys carries over.
    pub(crate) fn prepare_for_level(&mut self, x: f32, y: f32, keys: u32, tuning: &Tuning) {
        self.model.translate(Vec3::new(0.0, 0.0, -self.elevation));
        self.elevation = 0.0;
        self.vertical_velocity = 0.0;
        self.place_at(x, y);
        self.reset_vitals(tuning.max_health, tuning.base_damage);
        self.inventory.keys = keys;
        self.inventory.portal_gun = 1;
        self.portal_lock = None;
    }

    pub(crate) fn place_at(&mut self, x: f32, y: f32) {
        let current = self.model.center();
        self.model
            .translate(Vec3::new(x - current.x, y - current.y, 0.0));
    }

    pub(crate) fn turn(&mut self, degrees: f32) {
        if degrees == 0.0 {
            return;
        }
        self.yaw = (self.yaw + degrees).rem_euclid(360.0);
        self.model.rotate_z(degrees);
    }

    pub(crate) fn jump(&mut self) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.vertical_velocity = self.jump_speed;
        true
    }

    pub(crate) fn physics(&mut self, dt: f32) {
        if self.vertical_velocity == 0.0 && self.elevation <= 0.0 {
            return;
        }
        let mut rise = self.vertical_velocity * dt;
        self.vertical_velocity -= self.gravity * dt;
        if self.elevation + rise <= 0.0 {
            rise = -self.elevation;
            self.vertical_velocity = 0.0;
        }
        self.elevation += rise;
        self.model.translate(Vec3::new(0.0, 0.0, rise));
    }

    /// Returns true only on the call that takes health from above zero to zero.
    pub(crate) fn take_damage(&mut self, amount: f32) -> bool {
        let was_alive = self.health > 0.0;
        self.health = (self.health - amount).clamp(0.0, self.max_health);
        was_alive && self.health <= 0.0
    }

    pub(crate) fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, self.max_health);
    }

    pub(crate) fn reset_vitals(&mut self, max_health: f32, base_damage: f32) {
        self.max_health = max_health;
        self.health = max_health;
        self.damage = base_damage;
    }

    pub(crate) fn apply_pickup(&mut self, kind: ItemKind) {
        match kind {
            ItemKind::Ammo => self.inventory.handgun_ammo += AMMO_PICKUP_ROUNDS,
            ItemKind::RifleAmmo => self.inventory.rifle_ammo += RIFLE_AMMO_PICKUP_ROUNDS,
            ItemKind::Nourishment => self.heal(NOURISHMENT_HEAL),
            ItemKind::Aegis => self.inventory.aegis += 1,
            ItemKind::Shard => {
                self.inventory.shards += 1;
                self.damage += SHARD_DAMAGE_BONUS;
            }
            ItemKind::PortalGun => self.inventory.portal_gun = 1,
        }
        debug!(item = kind.label(), "pickup_applied");
    }

    /// Consumes one stored ration and heals; false when none are left.
    pub(crate) fn use_nourishment(&mut self) -> bool {
        if !self.inventory.take_nourishment() {
            return false;
        }
        self.heal(NOURISHMENT_HEAL);
        true
    }

    pub(crate) fn cycle_style(&mut self) -> PlayerStyle {
        self.style = self.style.next();
        let (body, legs, arms) = match self.style {
            PlayerStyle::Regular => (palette::ORANGE, palette::GREY, palette::LIGHT_BLUE),
            PlayerStyle::Hero => (palette::HERO_RED, palette::HERO_BLUE, palette::LIGHT_BLUE),
            PlayerStyle::Hulk => (palette::HULK_GREEN, palette::HULK_PURPLE, palette::HULK_GREEN),
        };
        let body_radius = match self.style {
            PlayerStyle::Regular => BODY_RADIUS,
            PlayerStyle::Hero | PlayerStyle::Hulk => SLIM_BODY_RADIUS,
        };
        self.model.with_child_mut(BODY, |child| {
            let extent = child.extent();
            child.set_extent(Extent3::new(
                body_radius * 2.0,
                body_radius * 2.0,
                extent.height,
            ));
            child.set_color(body);
        });
        self.model.set_child_color(LEG_LEFT, legs);
        self.model.set_child_color(LEG_RIGHT, legs);
        self.model.set_child_color(ARM_LEFT, arms);
        self.model.set_child_color(ARM_RIGHT, arms);
        self.style
    }

    fn advance_walk_animation(&mut self, dt: f32) {
        if !(-1.0..=1.0).contains(&self.walk_phase) {
            self.walk_direction = -self.walk_direction;
        }
        self.walk_phase += self.walk_direction * WALK_PHASE_PER_SECOND * dt;
        let swing = LEG_SWING_DEGREES * (self.walk_phase * std::f32::consts::PI).sin();
        let yaw = self.yaw;
        self.model.with_child_mut(LEG_LEFT, |leg| {
            leg.set_rotation(Vec3::new(swing, 0.0, yaw));
        });
        self.model.with_child_mut(LEG_RIGHT, |leg| {
            leg.set_rotation(Vec3::new(-swing, 0.0, yaw));
        });
    }

    #[cfg(test)]
    pub(crate) fn leg_swing(&self) -> f32 {
        self.model
            .child(LEG_LEFT)
            .map_or(0.0, |leg| leg.rotation().x)
    }

    /// Draws the stick figure; first-person views hide the head.
    pub(crate) fn draw(&self, frame: &mut RenderFrame, head_visible: bool) {
        for (index, child) in self.model.children().iter().enumerate() {
            if index == HEAD && !head_visible {
                continue;
            }
            child.draw(frame);
        }
    }
}

fn build_model(x: f32, y: f32, ground_z: f32) -> CompositeEntity {
    let hip_z = ground_z + LEG_HEIGHT;
    let shoulder_z = hip_z + BODY_HEIGHT;
    let head_z = shoulder_z + HEAD_RADIUS + HEAD_GAP;
    let half_span = SHOULDER_SPAN / 2.0;
    let leg_left = SpatialEntity::cylinder_from_top(
        Vec3::new(x, y - LEG_OFFSET, hip_z),
        LEG_RADIUS,
        LEG_HEIGHT,
        palette::GREY,
    );
    let rest = [
        SpatialEntity::cylinder_from_top(
            Vec3::new(x, y + LEG_OFFSET, hip_z),
            LEG_RADIUS,
            LEG_HEIGHT,
            palette::GREY,
        ),
        SpatialEntity::cylinder_from_top(
            Vec3::new(x, y - half_span, shoulder_z),
            ARM_RADIUS,
            ARM_HEIGHT,
            palette::LIGHT_BLUE,
        ),
        SpatialEntity::cylinder_on_base(
            Vec3::new(x, y, hip_z),
            BODY_RADIUS,
            BODY_HEIGHT,
            palette::ORANGE,
        ),
        SpatialEntity::cylinder_from_top(
            Vec3::new(x, y + half_span, shoulder_z),
            ARM_RADIUS,
            ARM_HEIGHT,
            palette::LIGHT_BLUE,
        ),
        SpatialEntity::sphere(Vec3::new(x, y, head_z), HEAD_RADIUS, palette::BLACK),
    ];
    CompositeEntity::from_parts(leg_left, rest)
}

impl HasCollisionRadius for Player {
    fn collision_center(&self) -> Vec3 {
        self.model.center()
    }

    fn collision_radius(&self) -> f32 {
        BODY_RADIUS
    }
}

impl Traveler for Player {
    fn portal_position(&self) -> Vec3 {
        self.position()
    }

    fn relocate_planar(&mut self, x: f32, y: f32) {
        self.place_at(x, y);
    }
}
