use crate::app::{DrawItem, RenderFrame, Rgba};

use super::{Aabb, Extent3, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Box,
    Sphere,
    Cylinder,
}

/// Leaf spatial primitive: a positioned volume with an axis-aligned bounding box.
///
/// The box always equals `center ± extent / 2`. Every mutator resyncs it before
/// returning, including rotations about an external pivot. Rotation is tracked
/// as cumulative Euler degrees for rendering; it moves the center but does not
/// reshape the extent.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialEntity {
    kind: ShapeKind,
    center: Vec3,
    extent: Extent3,
    rotation: Vec3,
    color: Rgba,
    bounds: Aabb,
}

impl SpatialEntity {
    pub fn new(kind: ShapeKind, center: Vec3, extent: Extent3, color: Rgba) -> Self {
        Self {
            kind,
            center,
            extent,
            rotation: Vec3::ZERO,
            color,
            bounds: Aabb::from_center_extent(center, extent),
        }
    }

    pub fn cuboid(center: Vec3, extent: Extent3, color: Rgba) -> Self {
        Self::new(ShapeKind::Box, center, extent, color)
    }

    pub fn sphere(center: Vec3, radius: f32, color: Rgba) -> Self {
        Self::new(ShapeKind::Sphere, center, Extent3::cube(radius * 2.0), color)
    }

    /// Upright cylinder whose bottom cap sits at `base.z`.
    pub fn cylinder_on_base(base: Vec3, radius: f32, height: f32, color: Rgba) -> Self {
        Self::new(
            ShapeKind::Cylinder,
            base.with_z(base.z + height * 0.5),
            Extent3::new(radius * 2.0, radius * 2.0, height),
            color,
        )
    }

    /// Upright cylinder hanging down from a top cap at `top.z`.
    pub fn cylinder_from_top(top: Vec3, radius: f32, height: f32, color: Rgba) -> Self {
        Self::new(
            ShapeKind::Cylinder,
            top.with_z(top.z - height * 0.5),
            Extent3::new(radius * 2.0, radius * 2.0, height),
            color,
        )
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn extent(&self) -> Extent3 {
        self.extent
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    /// Overwrites the cumulative rotation without moving the center (visual pose only).
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
        self.sync_bounds();
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.center += delta;
        self.sync_bounds();
    }

    pub fn set_extent(&mut self, extent: Extent3) {
        self.extent = extent;
        self.sync_bounds();
    }

    pub fn rotate_x(&mut self, degrees: f32, pivot: Vec3) {
        self.rotation.x += degrees;
        self.center = self.center.rotated_about_x(degrees, pivot);
        self.sync_bounds();
    }

    pub fn rotate_y(&mut self, degrees: f32, pivot: Vec3) {
        self.rotation.y += degrees;
        self.center = self.center.rotated_about_y(degrees, pivot);
        self.sync_bounds();
    }

    pub fn rotate_z(&mut self, degrees: f32, pivot: Vec3) {
        self.rotation.z += degrees;
        self.center = self.center.rotated_about_z(degrees, pivot);
        self.sync_bounds();
    }

    pub fn overlaps(&self, other: &SpatialEntity) -> bool {
        self.bounds.overlaps(&other.bounds)
    }

    pub fn draw(&self, frame: &mut RenderFrame) {
        self.draw_tinted(frame, self.color);
    }

    pub fn draw_tinted(&self, frame: &mut RenderFrame, color: Rgba) {
        frame.push_item(DrawItem {
            kind: self.kind,
            bounds: self.bounds,
            color,
        });
    }

    fn sync_bounds(&mut self) {
        self.bounds = Aabb::from_center_extent(self.center, self.extent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba = [255, 255, 255, 255];

    fn assert_bounds_synced(entity: &SpatialEntity) {
        let expected = Aabb::from_center_extent(entity.center(), entity.extent());
        let actual = entity.bounds();
        assert!((actual.min - expected.min).length() < 1e-4);
        assert!((actual.max - expected.max).length() < 1e-4);
    }

    #[test]
    fn bounds_follow_center_and_extent() {
        let entity = SpatialEntity::cuboid(
            Vec3::new(10.0, 20.0, 30.0),
            Extent3::new(4.0, 6.0, 8.0),
            WHITE,
        );
        assert_eq!(entity.bounds().min, Vec3::new(8.0, 17.0, 26.0));
        assert_eq!(entity.bounds().max, Vec3::new(12.0, 23.0, 34.0));
    }

    #[test]
    fn every_mutator_resyncs_bounds() {
        let mut entity = SpatialEntity::sphere(Vec3::new(1.0, 1.0, 1.0), 2.0, WHITE);
        entity.translate(Vec3::new(5.0, 0.0, -1.0));
        assert_bounds_synced(&entity);
        entity.set_center(Vec3::new(-3.0, 2.0, 9.0));
        assert_bounds_synced(&entity);
        entity.set_extent(Extent3::new(1.0, 2.0, 3.0));
        assert_bounds_synced(&entity);
        entity.rotate_x(-135.0, Vec3::new(0.0, 4.0, 0.0));
        assert_bounds_synced(&entity);
        entity.rotate_y(30.0, Vec3::ZERO);
        assert_bounds_synced(&entity);
        entity.rotate_z(77.0, Vec3::new(2.0, 2.0, 2.0));
        assert_bounds_synced(&entity);
    }

    #[test]
    fn rotation_about_pivot_moves_center_and_accumulates_angle() {
        let mut entity =
            SpatialEntity::cuboid(Vec3::new(10.0, 0.0, 0.0), Extent3::cube(2.0), WHITE);
        entity.rotate_z(90.0, Vec3::ZERO);
        entity.rotate_z(90.0, Vec3::ZERO);
        assert!((entity.center() - Vec3::new(-10.0, 0.0, 0.0)).length() < 1e-3);
        assert!((entity.rotation().z - 180.0).abs() < 1e-6);
        assert_eq!(entity.extent(), Extent3::cube(2.0));
    }

    #[test]
    fn cylinder_anchors_place_caps_at_requested_height() {
        let standing = SpatialEntity::cylinder_on_base(Vec3::new(0.0, 0.0, 10.0), 5.0, 40.0, WHITE);
        assert!((standing.bounds().min.z - 10.0).abs() < 1e-6);
        assert!((standing.bounds().max.z - 50.0).abs() < 1e-6);

        let hanging = SpatialEntity::cylinder_from_top(Vec3::new(0.0, 0.0, 90.0), 5.0, 40.0, WHITE);
        assert!((hanging.bounds().max.z - 90.0).abs() < 1e-6);
        assert!((hanging.bounds().min.z - 50.0).abs() < 1e-6);
    }

    #[test]
    fn draw_emits_one_item_with_current_bounds() {
        let entity = SpatialEntity::sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, WHITE);
        let mut frame = RenderFrame::default();
        entity.draw(&mut frame);
        entity.draw_tinted(&mut frame, [1, 2, 3, 255]);
        assert_eq!(frame.items().len(), 2);
        assert_eq!(frame.items()[0].bounds, *entity.bounds());
        assert_eq!(frame.items()[1].color, [1, 2, 3, 255]);
    }
}
