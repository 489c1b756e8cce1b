use engine::{RenderFrame, SpatialEntity, Vec3};

use super::palette;

const PROJECTILE_RADIUS: f32 = 6.0;
const HOSTILE_PROJECTILE_RADIUS: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Allegiance {
    /// Fired by the player; hits enemies.
    Friendly,
    /// Fired by the boss; hits the player.
    Hostile,
}

/// Speed, range and damage bonus of a projectile source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ProjectileProfile {
    pub(crate) speed: f32,
    pub(crate) max_distance: f32,
    pub(crate) bonus_damage: f32,
}

pub(crate) const HANDGUN: ProjectileProfile = ProjectileProfile {
    speed: 960.0,
    max_distance: 800.0,
    bonus_damage: 0.0,
};

pub(crate) const RIFLE: ProjectileProfile = ProjectileProfile {
    speed: 1680.0,
    max_distance: 1600.0,
    bonus_damage: 15.0,
};

pub(crate) const BOSS_SHOT: ProjectileProfile = ProjectileProfile {
    speed: 210.0,
    max_distance: 7000.0,
    bonus_damage: 0.0,
};

pub(crate) const BOSS_SHOT_DAMAGE: f32 = 10.0;

/// A bullet flying on the ground plane until it has flown its full range.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Projectile {
    position: Vec3,
    velocity: Vec3,
    damage: f32,
    allegiance: Allegiance,
    traveled: f32,
    max_distance: f32,
}

impl Projectile {
    /// `direction` is flattened onto the ground plane before scaling by the profile speed.
    pub(crate) fn new(
        position: Vec3,
        direction: Vec3,
        profile: ProjectileProfile,
        damage: f32,
        allegiance: Allegiance,
    ) -> Self {
        let planar = direction.with_z(0.0).normalize_or_zero();
        Self {
            position,
            velocity: planar * profile.speed,
            damage,
            allegiance,
            traveled: 0.0,
            max_distance: profile.max_distance,
        }
    }

    pub(crate) fn position(&self) -> Vec3 {
        self.position
    }

    pub(crate) fn damage(&self) -> f32 {
        self.damage
    }

    pub(crate) fn allegiance(&self) -> Allegiance {
        self.allegiance
    }

    #[cfg(test)]
    pub(crate) fn traveled(&self) -> f32 {
        self.traveled
    }

    /// Integrates one step and reports whether the shot is still alive.
    ///
    /// A shot without velocity would never leave its range, so it dies at once.
    pub(crate) fn update(&mut self, dt: f32) -> bool {
        if self.velocity == Vec3::ZERO {
            return false;
        }
        let step = self.velocity * dt;
        self.position += step;
        self.traveled += step.length();
        self.traveled < self.max_distance
    }

    pub(crate) fn draw(&self, frame: &mut RenderFrame) {
        let (radius, color) = match self.allegiance {
            Allegiance::Friendly => (PROJECTILE_RADIUS, palette::RED),
            Allegiance::Hostile => (HOSTILE_PROJECTILE_RADIUS, palette::YELLOW),
        };
        SpatialEntity::sphere(self.position, radius, color).draw(frame);
    }
}
