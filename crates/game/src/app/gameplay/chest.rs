use engine::{CompositeEntity, Extent3, RenderFrame, SpatialEntity, Vec3};
use rand::Rng;
use tracing::debug;

use super::inventory::ItemKind;
use super::palette;

const CHEST_WIDTH: f32 = 60.0;
const CHEST_DEPTH: f32 = 40.0;
const CHEST_HEIGHT: f32 = 40.0;
const BASE_HEIGHT: f32 = 24.0;
const LID_HEIGHT: f32 = CHEST_HEIGHT - BASE_HEIGHT;
const INSERT_INSET: f32 = 10.0;
const INSERT_OFFSET: f32 = 10.0;
const LID_OPEN_DEGREES: f32 = -135.0;

const BASE: usize = 0;
const LOWER_INSERT: usize = 1;
const LID: usize = 2;
const UPPER_INSERT: usize = 3;

const TOSS_JITTER: i32 = 10;
const TOSS_HEIGHT: f32 = 15.0;
const TOSS_SPEED: f32 = 300.0;
const PICKUP_GRAVITY: f32 = 1080.0;
const PICKUP_REST_HEIGHT: f32 = 8.0;
const PICKUP_SIZE: f32 = 12.0;

/// Lockable box that holds at most one item.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Chest {
    model: CompositeEntity,
    hinge: Vec3,
    ground_z: f32,
    closed: bool,
    contents: Option<ItemKind>,
}

impl Chest {
    pub(crate) fn new(x: f32, y: f32, ground_z: f32, contents: Option<ItemKind>) -> Self {
        let rim_z = ground_z + BASE_HEIGHT;
        let insert = Extent3::new(
            CHEST_WIDTH - INSERT_INSET,
            CHEST_DEPTH - INSERT_INSET,
            0.0,
        );
        let base = SpatialEntity::cuboid(
            Vec3::new(x, y, ground_z + BASE_HEIGHT / 2.0),
            Extent3::new(CHEST_WIDTH, CHEST_DEPTH, BASE_HEIGHT),
            palette::CHEST_DARK,
        );
        let lid = SpatialEntity::cuboid(
            Vec3::new(x, y, rim_z + LID_HEIGHT / 2.0),
            Extent3::new(CHEST_WIDTH, CHEST_DEPTH, LID_HEIGHT),
            palette::CHEST_MAROON,
        );
        let hinge = Vec3::new(x, lid.bounds().max.y, lid.bounds().min.z);
        let model = CompositeEntity::from_parts(
            base,
            [
                SpatialEntity::cuboid(
                    Vec3::new(x, y, rim_z - INSERT_OFFSET),
                    insert,
                    palette::CHEST_DARK,
                ),
                lid,
                SpatialEntity::cuboid(
                    Vec3::new(x, y, rim_z + INSERT_OFFSET),
                    insert,
                    palette::CHEST_MAROON,
                ),
            ],
        );
        Self {
            model,
            hinge,
            ground_z,
            closed: true,
            contents,
        }
    }

    pub(crate) fn model(&self) -> &CompositeEntity {
        &self.model
    }

    pub(crate) fn position(&self) -> Vec3 {
        let base = self
            .model
            .child(BASE)
            .map_or_else(|| self.model.center(), SpatialEntity::center);
        Vec3::new(base.x, base.y, self.ground_z)
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn contents(&self) -> Option<ItemKind> {
        self.contents
    }

    /// Swings the lid open and hands out the contents, once.
    pub(crate) fn open(&mut self) -> Option<ItemKind> {
        if !self.closed {
            return None;
        }
        self.model
            .rotate_children_x(&[LID, UPPER_INSERT], LID_OPEN_DEGREES, self.hinge);
        self.model.set_child_color(LOWER_INSERT, palette::GOLD);
        self.model.set_child_color(UPPER_INSERT, palette::CHEST_DARK);
        self.closed = false;
        let item = self.contents.take();
        debug!(item = ?item, "chest_opened");
        item
    }

    pub(crate) fn close(&mut self) {
        if self.closed {
            return;
        }
        self.model
            .rotate_children_x(&[LID, UPPER_INSERT], -LID_OPEN_DEGREES, self.hinge);
        self.model.set_child_color(LOWER_INSERT, palette::CHEST_DARK);
        self.model.set_child_color(UPPER_INSERT, palette::CHEST_MAROON);
        self.closed = true;
    }

    pub(crate) fn draw(&self, frame: &mut RenderFrame) {
        self.model.draw(frame);
    }
}

/// Item tossed out of a chest, falling until it rests just above the ground.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Pickup {
    kind: ItemKind,
    position: Vec3,
    vertical_velocity: f32,
    rest_z: f32,
}

impl Pickup {
    pub(crate) fn tossed_from(
        origin: Vec3,
        kind: ItemKind,
        ground_z: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let jitter_x = rng.gen_range(-TOSS_JITTER..=TOSS_JITTER) as f32;
        let jitter_y = rng.gen_range(-TOSS_JITTER..=TOSS_JITTER) as f32;
        Self {
            kind,
            position: Vec3::new(origin.x + jitter_x, origin.y + jitter_y, ground_z + TOSS_HEIGHT),
            vertical_velocity: TOSS_SPEED,
            rest_z: ground_z + PICKUP_REST_HEIGHT,
        }
    }

    pub(crate) fn kind(&self) -> ItemKind {
        self.kind
    }

    pub(crate) fn position(&self) -> Vec3 {
        self.position
    }

    pub(crate) fn is_resting(&self) -> bool {
        self.vertical_velocity == 0.0 && self.position.z <= self.rest_z
    }

    pub(crate) fn fall(&mut self, dt: f32) {
        if self.is_resting() {
            return;
        }
        self.vertical_velocity -= PICKUP_GRAVITY * dt;
        self.position.z += self.vertical_velocity * dt;
        if self.position.z <= self.rest_z {
            self.position.z = self.rest_z;
            self.vertical_velocity = 0.0;
        }
    }

    pub(crate) fn draw(&self, frame: &mut RenderFrame) {
        SpatialEntity::cuboid(self.position, Extent3::cube(PICKUP_SIZE), palette::PICKUP_WHITE)
            .draw(frame);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn assert_vec_close(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).length() < 1e-3,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn parts_stack_on_the_ground() {
        let chest = Chest::new(0.0, 0.0, 10.0, None);
        let model = chest.model();
        assert_eq!(model.len(), 4);
        assert_eq!(model.child(BASE).expect("base").bounds().min.z, 10.0);
        assert_eq!(model.child(LID).expect("lid").bounds().min.z, 34.0);
        assert_eq!(model.child(LID).expect("lid").bounds().max.z, 50.0);
        assert_eq!(model.child(LOWER_INSERT).expect("insert").center().z, 24.0);
        assert_eq!(model.child(UPPER_INSERT).expect("insert").center().z, 44.0);
    }

    #[test]
    fn open_hands_out_contents_once_and_restyles() {
        let mut chest = Chest::new(0.0, 0.0, 10.0, Some(ItemKind::Aegis));
        assert_eq!(chest.open(), Some(ItemKind::Aegis));
        assert!(!chest.is_closed());
        assert_eq!(
            chest.model().child(LOWER_INSERT).expect("insert").color(),
            palette::GOLD
        );
        assert_eq!(chest.open(), None);

        chest.close();
        assert!(chest.is_closed());
        assert_eq!(chest.open(), None);
        assert_eq!(chest.contents(), None);
    }

    #[test]
    fn lid_swings_about_hinge_and_close_restores_it() {
        let mut chest = Chest::new(0.0, 0.0, 10.0, None);
        let lid_before = chest.model().child(LID).expect("lid").center();
        let insert_before = chest.model().child(UPPER_INSERT).expect("insert").center();
        chest.open();
        let lid_open = chest.model().child(LID).expect("lid").center();
        assert!(lid_open.y > lid_before.y, "lid swings back past the hinge");
        assert_eq!(
            chest.model().child(LID).expect("lid").rotation().x,
            LID_OPEN_DEGREES
        );

        chest.close();
        assert_vec_close(chest.model().child(LID).expect("lid").center(), lid_before);
        assert_vec_close(
            chest.model().child(UPPER_INSERT).expect("insert").center(),
            insert_before,
        );
        assert_eq!(
            chest.model().child(UPPER_INSERT).expect("insert").color(),
            palette::CHEST_MAROON
        );
    }

    #[test]
    fn pickup_arcs_and_settles() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pickup =
            Pickup::tossed_from(Vec3::new(100.0, 0.0, 10.0), ItemKind::Ammo, 10.0, &mut rng);
        let start = pickup.position();
        assert!((start.x - 100.0).abs() <= 10.0);
        assert_eq!(start.z, 25.0);

        pickup.fall(1.0 / 60.0);
        assert!(pickup.position().z > start.z);
        for _ in 0..120 {
            pickup.fall(1.0 / 60.0);
        }
        assert!(pickup.is_resting());
        assert_eq!(pickup.position().z, 18.0);
    }
}
