use engine::{CompositeEntity, HasCollisionRadius, RenderFrame, Rgba, SpatialEntity, Vec3};
use rand::Rng;
use tracing::debug;

use super::palette;
use super::portal::{PortalPair, PortalSlot, Traveler};
use super::projectile::{Allegiance, Projectile, BOSS_SHOT, BOSS_SHOT_DAMAGE};

const NORMAL_BODY_RADIUS: f32 = 24.0;
const NORMAL_BODY_HEIGHT: f32 = 50.0;
const NORMAL_HEAD_RADIUS: f32 = 24.0;
const NORMAL_HAND_HEIGHT: f32 = 30.0;
const NORMAL_HIT_POINTS: f32 = 20.0;
const NORMAL_CHASE_SPEED: f32 = 6.0;

const BOSS_BODY_RADIUS: f32 = 48.0;
const BOSS_BODY_HEIGHT: f32 = 100.0;
const BOSS_HEAD_RADIUS: f32 = 48.0;
const BOSS_HAND_HEIGHT: f32 = 50.0;
const BOSS_SPIKE_COUNT: usize = 8;
const BOSS_SPIKE_RADIUS: f32 = 2.5;
const BOSS_SPIKE_HEIGHT: f32 = 30.0;
const BOSS_SPIKE_GAP: f32 = 10.0;
const BOSS_SHOOT_COOLDOWN_TICKS: u32 = 220;
const BOSS_SHOT_RISE: f32 = 20.0;

const HAND_RADIUS: f32 = 4.0;
const HAND_GAP: f32 = 5.0;
const HIT_RADIUS_FACTOR: f32 = 1.2;
const CHASE_EPSILON: f32 = 1e-6;

const PULSE_RATE: f32 = 0.18;
const PULSE_AMPLITUDE: f32 = 0.12;

/// Children before the boss spikes: body, head, left hand, right hand.
const FIXED_PARTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EnemyKind {
    Normal,
    Boss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HitOutcome {
    Hit,
    Defeated,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Enemy {
    kind: EnemyKind,
    model: CompositeEntity,
    ground_z: f32,
    hit_points: f32,
    speed: f32,
    hit_radius: f32,
    shoot_cooldown: u32,
    pulse: f32,
    portal_lock: Option<PortalSlot>,
}

impl Enemy {
    pub(crate) fn normal(x: f32, y: f32, ground_z: f32, rng: &mut impl Rng) -> Self {
        let colors = palette::ENEMY_COLORS.len();
        let body_index = rng.gen_range(0..colors);
        let head_index = (body_index + rng.gen_range(1..colors)) % colors;
        let [body, head, left_hand, right_hand] = build_parts(
            Vec3::new(x, y, ground_z),
            &BodyPlan {
                body_radius: NORMAL_BODY_RADIUS,
                body_height: NORMAL_BODY_HEIGHT,
                head_radius: NORMAL_HEAD_RADIUS,
                hand_height: NORMAL_HAND_HEIGHT,
                body_color: palette::ENEMY_COLORS[body_index],
                head_color: palette::ENEMY_COLORS[head_index],
            },
        );
        Self {
            kind: EnemyKind::Normal,
            model: CompositeEntity::from_parts(body, [head, left_hand, right_hand]),
            ground_z,
            hit_points: NORMAL_HIT_POINTS,
            speed: NORMAL_CHASE_SPEED,
            hit_radius: NORMAL_BODY_RADIUS.max(NORMAL_HEAD_RADIUS) * HIT_RADIUS_FACTOR,
            shoot_cooldown: 0,
            pulse: 0.0,
            portal_lock: None,
        }
    }

    pub(crate) fn boss(x: f32, y: f32, ground_z: f32) -> Self {
        let base = Vec3::new(x, y, ground_z);
        let [body, head, left_hand, right_hand] = build_parts(
            base,
            &BodyPlan {
                body_radius: BOSS_BODY_RADIUS,
                body_height: BOSS_BODY_HEIGHT,
                head_radius: BOSS_HEAD_RADIUS,
                hand_height: BOSS_HAND_HEIGHT,
                body_color: palette::MAHOGANY,
                head_color: palette::BLACK,
            },
        );
        let spike_ring = BOSS_BODY_RADIUS + BOSS_HEAD_RADIUS + BOSS_SPIKE_GAP;
        let spike_z = ground_z + BOSS_BODY_HEIGHT + BOSS_HEAD_RADIUS + BOSS_SPIKE_GAP;
        let spikes = (0..BOSS_SPIKE_COUNT).map(|index| {
            let angle = (index as f32 * 360.0 / BOSS_SPIKE_COUNT as f32).to_radians();
            SpatialEntity::cylinder_on_base(
                Vec3::new(
                    x + spike_ring * angle.cos(),
                    y + spike_ring * angle.sin(),
                    spike_z,
                ),
                BOSS_SPIKE_RADIUS,
                BOSS_SPIKE_HEIGHT,
                palette::GREY,
            )
        });
        let model = CompositeEntity::from_parts(
            body,
            [head, left_hand, right_hand].into_iter().chain(spikes),
        );
        Self {
            kind: EnemyKind::Boss,
            model,
            ground_z,
            hit_points: 0.0,
            speed: 0.0,
            hit_radius: BOSS_BODY_RADIUS.max(BOSS_HEAD_RADIUS) * HIT_RADIUS_FACTOR,
            shoot_cooldown: BOSS_SHOOT_COOLDOWN_TICKS,
            pulse: 0.0,
            portal_lock: None,
        }
    }

    pub(crate) fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub(crate) fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Boss
    }

    pub(crate) fn model(&self) -> &CompositeEntity {
        &self.model
    }

    /// Ground point under the body.
    pub(crate) fn position(&self) -> Vec3 {
        let body = self
            .model
            .child(0)
            .map_or_else(|| self.model.center(), SpatialEntity::center);
        Vec3::new(body.x, body.y, self.ground_z)
    }

    pub(crate) fn spike_count(&self) -> usize {
        match self.kind {
            EnemyKind::Normal => 0,
            EnemyKind::Boss => self.model.len().saturating_sub(FIXED_PARTS),
        }
    }

    pub(crate) fn contact_damage(&self) -> f32 {
        match self.kind {
            EnemyKind::Normal => 10.0,
            EnemyKind::Boss => 25.0,
        }
    }

    /// Distance the player is pushed away on contact.
    pub(crate) fn knockback(&self) -> f32 {
        match self.kind {
            EnemyKind::Normal => 0.0,
            EnemyKind::Boss => 30.0,
        }
    }

    /// Normal enemies trade themselves for the contact hit.
    pub(crate) fn dies_on_contact(&self) -> bool {
        self.kind == EnemyKind::Normal
    }

    pub(crate) fn kill_score(&self) -> u32 {
        match self.kind {
            EnemyKind::Normal => 20,
            EnemyKind::Boss => 200,
        }
    }

    pub(crate) fn pass_through(&mut self, portals: &PortalPair) -> Option<PortalSlot> {
        let mut lock = self.portal_lock;
        let arrival = portals.try_teleport(self, &mut lock);
        self.portal_lock = lock;
        arrival
    }

    /// Chases `target` on the ground plane; the boss returns a shot whenever its cooldown expires.
    pub(crate) fn update(&mut self, target: Vec3, dt: f32) -> Option<Projectile> {
        self.pulse += PULSE_RATE * dt;

        if self.speed > 0.0 {
            let here = self.position();
            let dx = target.x - here.x;
            let dy = target.y - here.y;
            let distance = dx.hypot(dy) + CHASE_EPSILON;
            let step = self.speed * dt;
            self.model
                .translate(Vec3::new(dx / distance * step, dy / distance * step, 0.0));
        }

        if self.kind != EnemyKind::Boss {
            return None;
        }
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        if self.shoot_cooldown > 0 {
            return None;
        }
        self.shoot_cooldown = BOSS_SHOOT_COOLDOWN_TICKS;
        let origin = self.model.center() + Vec3::new(0.0, 0.0, BOSS_SHOT_RISE);
        debug!(x = origin.x, y = origin.y, "boss_fired");
        Some(Projectile::new(
            origin,
            target - origin,
            BOSS_SHOT,
            BOSS_SHOT_DAMAGE,
            Allegiance::Hostile,
        ))
    }

    /// Boss hits strip one spike each no matter the damage; normal enemies lose hit points.
    pub(crate) fn apply_hit(&mut self, damage: f32) -> HitOutcome {
        match self.kind {
            EnemyKind::Normal => {
                self.hit_points -= damage;
                if self.hit_points <= 0.0 {
                    HitOutcome::Defeated
                } else {
                    HitOutcome::Hit
                }
            }
            EnemyKind::Boss => {
                let spikes = self.spike_count();
                if spikes > 0 {
                    self.model.remove_child(FIXED_PARTS + spikes - 1);
                }
                if self.spike_count() == 0 {
                    HitOutcome::Defeated
                } else {
                    HitOutcome::Hit
                }
            }
        }
    }

    pub(crate) fn pulse_scale(&self) -> f32 {
        1.0 + PULSE_AMPLITUDE * self.pulse.sin()
    }

    pub(crate) fn draw(&self, frame: &mut RenderFrame) {
        self.model.draw_scaled(frame, self.pulse_scale());
    }
}

impl HasCollisionRadius for Enemy {
    fn collision_center(&self) -> Vec3 {
        self.position()
    }

    fn collision_radius(&self) -> f32 {
        self.hit_radius
    }
}

impl Traveler for Enemy {
    fn portal_position(&self) -> Vec3 {
        self.position()
    }

    fn relocate_planar(&mut self, x: f32, y: f32) {
        let here = self.position();
        self.model.translate(Vec3::new(x - here.x, y - here.y, 0.0));
    }
}

struct BodyPlan {
    body_radius: f32,
    body_height: f32,
    head_radius: f32,
    hand_height: f32,
    body_color: Rgba,
    head_color: Rgba,
}

/// Body, head, left hand, right hand.
fn build_parts(base: Vec3, plan: &BodyPlan) -> [SpatialEntity; FIXED_PARTS] {
    let shoulder_z = base.z + plan.body_height;
    let hand_offset = plan.body_radius + HAND_GAP;
    let body =
        SpatialEntity::cylinder_on_base(base, plan.body_radius, plan.body_height, plan.body_color);
    [
        body,
        SpatialEntity::sphere(
            Vec3::new(base.x, base.y, shoulder_z + plan.head_radius),
            plan.head_radius,
            plan.head_color,
        ),
        SpatialEntity::cylinder_on_base(
            Vec3::new(base.x - hand_offset, base.y, shoulder_z),
            HAND_RADIUS,
            plan.hand_height,
            plan.body_color,
        ),
        SpatialEntity::cylinder_on_base(
            Vec3::new(base.x + hand_offset, base.y, shoulder_z),
            HAND_RADIUS,
            plan.hand_height,
            plan.body_color,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn normal_at(x: f32, y: f32) -> Enemy {
        let mut rng = StdRng::seed_from_u64(7);
        Enemy::normal(x, y, 10.0, &mut rng)
    }

    #[test]
    fn normal_enemy_chases_at_its_speed() {
        let mut enemy = normal_at(100.0, 0.0);
        assert_eq!(enemy.update(Vec3::ZERO, 1.0), None);
        let position = enemy.position();
        assert!((position.x - 94.0).abs() < 1e-3);
        assert!(position.y.abs() < 1e-3);
        assert_eq!(position.z, 10.0);
    }

    #[test]
    fn chase_onto_own_position_stays_finite() {
        let mut enemy = normal_at(0.0, 0.0);
        enemy.update(Vec3::new(0.0, 0.0, 10.0), DT);
        assert!(enemy.position().is_finite());
        assert!(enemy.model().center().is_finite());
    }

    #[test]
    fn head_and_body_colors_differ() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let enemy = Enemy::normal(0.0, 0.0, 10.0, &mut rng);
            let body = enemy.model().child(0).expect("body").color();
            let head = enemy.model().child(1).expect("head").color();
            assert_ne!(body, head);
        }
    }

    #[test]
    fn normal_enemy_falls_to_cumulative_damage() {
        let mut enemy = normal_at(0.0, 0.0);
        assert_eq!(enemy.apply_hit(7.0), HitOutcome::Hit);
        assert_eq!(enemy.apply_hit(7.0), HitOutcome::Hit);
        assert_eq!(enemy.apply_hit(6.0), HitOutcome::Defeated);
    }

    #[test]
    fn boss_needs_one_hit_per_spike_regardless_of_damage() {
        for damage in [0.5, 10.0, 10_000.0] {
            let mut boss = Enemy::boss(0.0, 0.0, 10.0);
            assert_eq!(boss.spike_count(), BOSS_SPIKE_COUNT);
            for _ in 1..BOSS_SPIKE_COUNT {
                assert_eq!(boss.apply_hit(damage), HitOutcome::Hit);
            }
            assert_eq!(boss.apply_hit(damage), HitOutcome::Defeated);
            assert_eq!(boss.spike_count(), 0);
            assert_eq!(boss.model().len(), FIXED_PARTS);
        }
    }

    #[test]
    fn boss_model_layout() {
        let boss = Enemy::boss(1500.0, 1500.0, 10.0);
        let head = boss.model().child(1).expect("head");
        assert_eq!(head.center().z, 10.0 + 100.0 + 48.0);
        let left_hand = boss.model().child(2).expect("left hand");
        assert_eq!(left_hand.center().x, 1500.0 - 53.0);
        assert_eq!(left_hand.bounds().min.z, 110.0);
        let spike = boss.model().child(FIXED_PARTS).expect("spike");
        assert_eq!(spike.bounds().min.z, 10.0 + 100.0 + 48.0 + 10.0);
        assert!((spike.center().x - (1500.0 + 106.0)).abs() < 1e-3);
        assert!((boss.collision_radius() - 57.6).abs() < 1e-4);
    }

    #[test]
    fn boss_stands_still_and_fires_on_cooldown() {
        let mut boss = Enemy::boss(0.0, 0.0, 10.0);
        let start = boss.position();
        let target = Vec3::new(300.0, 0.0, 10.0);
        for tick in 1..BOSS_SHOOT_COOLDOWN_TICKS {
            assert!(boss.update(target, DT).is_none(), "no shot on tick {tick}");
        }
        let shot = boss.update(target, DT).expect("shot after cooldown");
        assert_eq!(shot.allegiance(), Allegiance::Hostile);
        assert_eq!(shot.damage(), BOSS_SHOT_DAMAGE);
        assert_eq!(boss.position(), start);
        assert!(boss.update(target, DT).is_none());
    }

    #[test]
    fn pulse_is_visual_only() {
        let mut enemy = Enemy::boss(0.0, 0.0, 10.0);
        let bounds = *enemy.model().bounds();
        for _ in 0..600 {
            enemy.update(Vec3::new(500.0, 0.0, 0.0), DT);
        }
        assert_ne!(enemy.pulse_scale(), 1.0);
        assert_eq!(*enemy.model().bounds(), bounds);
        let mut frame = RenderFrame::default();
        enemy.draw(&mut frame);
        assert_eq!(frame.items().len(), enemy.model().len());
    }

    #[test]
    fn portal_relocation_moves_whole_model() {
        let mut enemy = normal_at(0.0, 0.0);
        enemy.relocate_planar(100.0, 50.0);
        assert_eq!(enemy.position(), Vec3::new(100.0, 50.0, 10.0));
        let head = enemy.model().child(1).expect("head");
        assert_eq!((head.center().x, head.center().y), (100.0, 50.0));
    }
}
