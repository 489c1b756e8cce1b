use super::{Aabb, CompositeEntity, SpatialEntity, Vec3};

/// Anything the collision oracle can test.
#[derive(Debug, Clone, Copy)]
pub enum Collider<'a> {
    Leaf(&'a SpatialEntity),
    Composite(&'a CompositeEntity),
}

impl<'a> From<&'a SpatialEntity> for Collider<'a> {
    fn from(entity: &'a SpatialEntity) -> Self {
        Collider::Leaf(entity)
    }
}

impl<'a> From<&'a CompositeEntity> for Collider<'a> {
    fn from(entity: &'a CompositeEntity) -> Self {
        Collider::Composite(entity)
    }
}

impl Collider<'_> {
    pub fn bounds(&self) -> Aabb {
        match self {
            Collider::Leaf(entity) => *entity.bounds(),
            Collider::Composite(entity) => *entity.bounds(),
        }
    }
}

/// Symmetric collision test.
///
/// A composite first rejects on its union box, then collides iff any of its
/// children collides with the other side. Two composites test every pair of
/// children.
pub fn collide<'a, 'b>(a: impl Into<Collider<'a>>, b: impl Into<Collider<'b>>) -> bool {
    collide_colliders(a.into(), b.into())
}

fn collide_colliders(a: Collider<'_>, b: Collider<'_>) -> bool {
    if !a.bounds().overlaps(&b.bounds()) {
        return false;
    }
    match (a, b) {
        (Collider::Composite(left), Collider::Composite(right)) => {
            left.children().iter().any(|lc| {
                right
                    .children()
                    .iter()
                    .any(|rc| lc.bounds().overlaps(rc.bounds()))
            })
        }
        (Collider::Composite(composite), other) | (other, Collider::Composite(composite)) => {
            let other_bounds = other.bounds();
            composite
                .children()
                .iter()
                .any(|child| child.bounds().overlaps(&other_bounds))
        }
        _ => true,
    }
}

/// Planar proximity radius used by bullet and contact checks.
pub trait HasCollisionRadius {
    fn collision_center(&self) -> Vec3;
    fn collision_radius(&self) -> f32;

    fn within_planar_reach(&self, point: Vec3, extra: f32) -> bool {
        self.collision_center().planar_distance(point) < self.collision_radius() + extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Extent3;

    const C: [u8; 4] = [0, 0, 0, 255];

    fn cube(x: f32, y: f32, z: f32) -> SpatialEntity {
        SpatialEntity::cuboid(Vec3::new(x, y, z), Extent3::cube(2.0), C)
    }

    fn l_shape() -> CompositeEntity {
        // Union box spans (-1..11, -1..11) but the corner near (10, 10) is empty.
        CompositeEntity::new(vec![
            SpatialEntity::cuboid(Vec3::new(5.0, 0.0, 0.0), Extent3::new(12.0, 2.0, 2.0), C),
            SpatialEntity::cuboid(Vec3::new(0.0, 5.0, 0.0), Extent3::new(2.0, 12.0, 2.0), C),
        ])
        .expect("composite")
    }

    #[test]
    fn leaf_collision_is_symmetric() {
        let a = cube(0.0, 0.0, 0.0);
        let b = cube(1.0, 1.0, 1.0);
        let c = cube(9.0, 0.0, 0.0);
        assert!(collide(&a, &b));
        assert!(collide(&b, &a));
        assert!(!collide(&a, &c));
        assert!(!collide(&c, &a));
    }

    #[test]
    fn composite_hits_only_when_some_child_overlaps() {
        let shape = l_shape();
        let inside_union_but_empty = cube(10.0, 10.0, 0.0);
        let touching_arm = cube(10.0, 0.5, 0.0);

        assert!(shape.bounds().overlaps(inside_union_but_empty.bounds()));
        assert!(!collide(&shape, &inside_union_but_empty));
        assert!(!collide(&inside_union_but_empty, &shape));

        assert!(collide(&shape, &touching_arm));
        assert!(collide(&touching_arm, &shape));
    }

    #[test]
    fn composite_result_matches_child_scan() {
        let shape = l_shape();
        for x in -3..14 {
            for y in -3..14 {
                let probe = cube(x as f32, y as f32, 0.0);
                let expected = shape
                    .children()
                    .iter()
                    .any(|child| child.overlaps(&probe));
                assert_eq!(collide(&shape, &probe), expected, "probe at {x},{y}");
            }
        }
    }

    #[test]
    fn composite_pair_uses_full_cross_product() {
        let a = l_shape();
        let mut b = l_shape();
        b.translate(Vec3::new(9.5, 9.5, 0.0));
        // Unions overlap near (10,10) where neither shape has a child.
        assert!(a.bounds().overlaps(b.bounds()));
        assert!(!collide(&a, &b));
        assert!(!collide(&b, &a));

        b.translate(Vec3::new(-9.0, -12.0, 0.0));
        assert_eq!(collide(&a, &b), collide(&b, &a));
        assert!(collide(&a, &b));
    }

    #[test]
    fn leaf_in_empty_corner_misses_composite() {
        let shape = l_shape();
        let corner = SpatialEntity::cuboid(Vec3::new(9.0, 9.0, 0.0), Extent3::cube(1.0), C);
        assert!(shape.bounds().overlaps(corner.bounds()));
        assert!(!collide(&shape, &corner));
        assert!(!collide(&corner, &shape));
    }

    struct Disk {
        center: Vec3,
        radius: f32,
    }

    impl HasCollisionRadius for Disk {
        fn collision_center(&self) -> Vec3 {
            self.center
        }

        fn collision_radius(&self) -> f32 {
            self.radius
        }
    }

    #[test]
    fn planar_reach_ignores_height() {
        let disk = Disk {
            center: Vec3::ZERO,
            radius: 10.0,
        };
        assert!(disk.within_planar_reach(Vec3::new(9.0, 0.0, 500.0), 0.0));
        assert!(!disk.within_planar_reach(Vec3::new(10.0, 0.0, 0.0), 0.0));
        assert!(disk.within_planar_reach(Vec3::new(10.0, 0.0, 0.0), 1.0));
    }
}
