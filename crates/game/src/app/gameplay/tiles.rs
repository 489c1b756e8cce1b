use engine::{Extent3, RenderFrame, SpatialEntity, Vec3};

use super::palette;

const FLOOR_TILE_REACH: f32 = 100.0;
const EXIT_TILE_REACH: f32 = 60.0;
const EXIT_TILE_HEIGHT: f32 = 8.0;
const TILE_LIFT: f32 = 0.5;

pub(crate) const SECRET_MESSAGE: &str = "You found a secret!";
pub(crate) const TRAP_MESSAGE: &str = "Uh oh!!! A trap";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TileKind {
    /// Hurts while stood on.
    Lava,
    /// Shows its message the first time it is crossed; a trap also spawns enemies.
    Golden { message: &'static str, trap: bool },
    /// Saves the checkpoint while stood on.
    Checkpoint,
    /// Advances to the next level.
    Exit,
}

/// Flat trigger area on the ground plane.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tile {
    kind: TileKind,
    position: Vec3,
    triggered: bool,
}

impl Tile {
    pub(crate) fn new(kind: TileKind, x: f32, y: f32, ground_z: f32) -> Self {
        Self {
            kind,
            position: Vec3::new(x, y, ground_z),
            triggered: false,
        }
    }

    pub(crate) fn lava(x: f32, y: f32, ground_z: f32) -> Self {
        Self::new(TileKind::Lava, x, y, ground_z)
    }

    pub(crate) fn secret(x: f32, y: f32, ground_z: f32) -> Self {
        Self::new(
            TileKind::Golden {
                message: SECRET_MESSAGE,
                trap: false,
            },
            x,
            y,
            ground_z,
        )
    }

    pub(crate) fn trap(x: f32, y: f32, ground_z: f32) -> Self {
        Self::new(
            TileKind::Golden {
                message: TRAP_MESSAGE,
                trap: true,
            },
            x,
            y,
            ground_z,
        )
    }

    pub(crate) fn checkpoint(x: f32, y: f32, ground_z: f32) -> Self {
        Self::new(TileKind::Checkpoint, x, y, ground_z)
    }

    pub(crate) fn exit(x: f32, y: f32, ground_z: f32) -> Self {
        Self::new(TileKind::Exit, x, y, ground_z)
    }

    pub(crate) fn kind(&self) -> TileKind {
        self.kind
    }

    pub(crate) fn position(&self) -> Vec3 {
        self.position
    }

    pub(crate) fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub(crate) fn mark_triggered(&mut self) {
        self.triggered = true;
    }

    pub(crate) fn reach(&self) -> f32 {
        match self.kind {
            TileKind::Exit => EXIT_TILE_REACH,
            TileKind::Lava | TileKind::Golden { .. } | TileKind::Checkpoint => FLOOR_TILE_REACH,
        }
    }

    pub(crate) fn covers(&self, point: Vec3) -> bool {
        self.position.planar_distance(point) < self.reach()
    }

    pub(crate) fn draw(&self, frame: &mut RenderFrame) {
        let size = self.reach() * 2.0;
        let (height, color) = match self.kind {
            TileKind::Lava => (0.0, palette::LAVA),
            TileKind::Golden { .. } => (0.0, palette::GOLD),
            TileKind::Checkpoint => (0.0, palette::BRIGHT_GREEN),
            TileKind::Exit => (EXIT_TILE_HEIGHT, palette::EXIT_DARK),
        };
        let center = self.position + Vec3::new(0.0, 0.0, TILE_LIFT + height / 2.0);
        SpatialEntity::cuboid(center, Extent3::new(size, size, height), color).draw(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reach_depends_on_kind() {
        let lava = Tile::lava(0.0, 0.0, 10.0);
        assert!(lava.covers(Vec3::new(99.0, 0.0, 10.0)));
        assert!(!lava.covers(Vec3::new(100.0, 0.0, 10.0)));

        let exit = Tile::exit(0.0, 0.0, 10.0);
        assert!(exit.covers(Vec3::new(0.0, 59.0, 200.0)));
        assert!(!exit.covers(Vec3::new(0.0, 61.0, 10.0)));
    }

    #[test]
    fn golden_tiles_carry_their_message() {
        let trap = Tile::trap(-500.0, 0.0, 10.0);
        assert_eq!(
            trap.kind(),
            TileKind::Golden {
                message: TRAP_MESSAGE,
                trap: true
            }
        );
        let mut secret = Tile::secret(0.0, 0.0, 10.0);
        assert!(!secret.is_triggered());
        secret.mark_triggered();
        assert!(secret.is_triggered());
    }
}
