use engine::{Extent3, RenderFrame, ShapeKind, SpatialEntity, Vec3};
use tracing::debug;

use super::palette;

const PORTAL_DRAW_WIDTH: f32 = 64.0;
const PORTAL_DRAW_HEIGHT: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PortalSlot {
    First,
    Second,
}

impl PortalSlot {
    pub(crate) fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Anything a portal can move. Only the ground-plane position changes.
pub(crate) trait Traveler {
    fn portal_position(&self) -> Vec3;
    fn relocate_planar(&mut self, x: f32, y: f32);
}

impl Traveler for SpatialEntity {
    fn portal_position(&self) -> Vec3 {
        self.center()
    }

    fn relocate_planar(&mut self, x: f32, y: f32) {
        let center = self.center();
        self.set_center(Vec3::new(x, y, center.z));
    }
}

/// Two linked placement points. Teleporting needs both to be active.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PortalPair {
    first: Option<Vec3>,
    second: Option<Vec3>,
    next_slot: PortalSlot,
    radius: f32,
}

impl PortalPair {
    pub(crate) fn new(radius: f32) -> Self {
        Self {
            first: None,
            second: None,
            next_slot: PortalSlot::First,
            radius,
        }
    }

    pub(crate) fn position(&self, slot: PortalSlot) -> Option<Vec3> {
        match slot {
            PortalSlot::First => self.first,
            PortalSlot::Second => self.second,
        }
    }

    pub(crate) fn is_linked(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    pub(crate) fn place(&mut self, slot: PortalSlot, position: Vec3) {
        match slot {
            PortalSlot::First => self.first = Some(position),
            PortalSlot::Second => self.second = Some(position),
        }
        debug!(?slot, x = position.x, y = position.y, "portal_placed");
    }

    /// Places into alternating slots, starting with `First`.
    pub(crate) fn place_next(&mut self, position: Vec3) -> PortalSlot {
        let slot = self.next_slot;
        self.place(slot, position);
        self.next_slot = slot.other();
        slot
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::new(self.radius);
    }

    /// Moves `traveler` to the opposite portal when it stands inside one.
    ///
    /// `lock` remembers the slot a traveler arrived at; that slot cannot send it
    /// back until the traveler has left its radius. Returns the arrival slot.
    pub(crate) fn try_teleport(
        &self,
        traveler: &mut impl Traveler,
        lock: &mut Option<PortalSlot>,
    ) -> Option<PortalSlot> {
        let (Some(first), Some(second)) = (self.first, self.second) else {
            return None;
        };
        let position = traveler.portal_position();
        let first_distance = position.planar_distance(first);
        let second_distance = position.planar_distance(second);

        if let Some(locked) = *lock {
            let locked_distance = match locked {
                PortalSlot::First => first_distance,
                PortalSlot::Second => second_distance,
            };
            if locked_distance >= self.radius {
                *lock = None;
            }
        }

        let in_first = first_distance < self.radius && *lock != Some(PortalSlot::First);
        let in_second = second_distance < self.radius && *lock != Some(PortalSlot::Second);
        let source = match (in_first, in_second) {
            (true, true) if second_distance < first_distance => PortalSlot::Second,
            (true, _) => PortalSlot::First,
            (false, true) => PortalSlot::Second,
            (false, false) => return None,
        };

        let arrival = source.other();
        let target = match arrival {
            PortalSlot::First => first,
            PortalSlot::Second => second,
        };
        traveler.relocate_planar(target.x, target.y);
        *lock = Some(arrival);
        Some(arrival)
    }

    pub(crate) fn draw(&self, frame: &mut RenderFrame) {
        let slots = [(self.first, palette::CYAN), (self.second, palette::RED)];
        for (position, color) in slots {
            let Some(position) = position else {
                continue;
            };
            SpatialEntity::new(
                ShapeKind::Cylinder,
                position,
                Extent3::new(PORTAL_DRAW_WIDTH, 2.0, PORTAL_DRAW_HEIGHT),
                color,
            )
            .draw(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: [u8; 4] = [255, 255, 255, 255];

    fn linked_pair() -> PortalPair {
        let mut pair = PortalPair::new(25.0);
        pair.place(PortalSlot::First, Vec3::new(0.0, 0.0, 0.0));
        pair.place(PortalSlot::Second, Vec3::new(100.0, 0.0, 0.0));
        pair
    }

    fn traveler_at(x: f32, y: f32, z: f32) -> SpatialEntity {
        SpatialEntity::cuboid(Vec3::new(x, y, z), Extent3::cube(4.0), C)
    }

    #[test]
    fn teleports_both_directions_and_preserves_height() {
        let pair = linked_pair();
        let mut traveler = traveler_at(0.0, 0.0, 0.0);
        let mut lock = None;
        assert_eq!(
            pair.try_teleport(&mut traveler, &mut lock),
            Some(PortalSlot::Second)
        );
        assert_eq!(traveler.center(), Vec3::new(100.0, 0.0, 0.0));

        let mut other = traveler_at(95.0, 5.0, 30.0);
        let mut other_lock = None;
        assert_eq!(
            pair.try_teleport(&mut other, &mut other_lock),
            Some(PortalSlot::First)
        );
        assert_eq!(other.center(), Vec3::new(0.0, 0.0, 30.0));
    }

    #[test]
    fn outside_both_radii_is_unmoved() {
        let pair = linked_pair();
        let mut traveler = traveler_at(50.0, 0.0, 0.0);
        let mut lock = None;
        assert_eq!(pair.try_teleport(&mut traveler, &mut lock), None);
        assert_eq!(traveler.center(), Vec3::new(50.0, 0.0, 0.0));
        assert_eq!(lock, None);
    }

    #[test]
    fn single_portal_does_nothing() {
        let mut pair = PortalPair::new(25.0);
        pair.place_next(Vec3::ZERO);
        let mut traveler = traveler_at(0.0, 0.0, 0.0);
        assert_eq!(pair.try_teleport(&mut traveler, &mut None), None);
    }

    #[test]
    fn arrival_lock_prevents_ping_pong_until_traveler_leaves() {
        let pair = linked_pair();
        let mut traveler = traveler_at(0.0, 0.0, 0.0);
        let mut lock = None;
        pair.try_teleport(&mut traveler, &mut lock);
        for _ in 0..3 {
            assert_eq!(pair.try_teleport(&mut traveler, &mut lock), None);
            assert_eq!(traveler.center().x, 100.0);
        }

        traveler.relocate_planar(160.0, 0.0);
        assert_eq!(pair.try_teleport(&mut traveler, &mut lock), None);
        assert_eq!(lock, None);

        traveler.relocate_planar(100.0, 0.0);
        assert_eq!(
            pair.try_teleport(&mut traveler, &mut lock),
            Some(PortalSlot::First)
        );
    }

    #[test]
    fn overlapping_radii_use_nearer_slot_as_source() {
        let mut pair = PortalPair::new(25.0);
        pair.place(PortalSlot::First, Vec3::new(0.0, 0.0, 0.0));
        pair.place(PortalSlot::Second, Vec3::new(20.0, 0.0, 0.0));

        let mut near_second = traveler_at(15.0, 0.0, 0.0);
        pair.try_teleport(&mut near_second, &mut None);
        assert_eq!(near_second.center().x, 0.0);

        let mut exact_tie = traveler_at(10.0, 0.0, 0.0);
        pair.try_teleport(&mut exact_tie, &mut None);
        assert_eq!(exact_tie.center().x, 20.0);
    }

    #[test]
    fn place_next_alternates_and_overwrites() {
        let mut pair = PortalPair::new(25.0);
        assert_eq!(pair.place_next(Vec3::new(1.0, 0.0, 0.0)), PortalSlot::First);
        assert_eq!(pair.place_next(Vec3::new(2.0, 0.0, 0.0)), PortalSlot::Second);
        assert_eq!(pair.place_next(Vec3::new(3.0, 0.0, 0.0)), PortalSlot::First);
        assert_eq!(pair.position(PortalSlot::First), Some(Vec3::new(3.0, 0.0, 0.0)));
        assert!(pair.is_linked());
        pair.clear();
        assert!(!pair.is_linked());
    }
}
