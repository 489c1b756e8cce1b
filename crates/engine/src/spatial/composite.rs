use crate::app::{DrawItem, RenderFrame, Rgba};

use super::{Aabb, SpatialEntity, Vec3};

/// Rigid group of leaf entities with derived center and bounds.
///
/// Center is the mean of child centers and bounds are the union of child boxes;
/// both are recomputed after every mutation. A composite never becomes empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeEntity {
    children: Vec<SpatialEntity>,
    center: Vec3,
    bounds: Aabb,
}

impl CompositeEntity {
    /// Returns `None` when `children` is empty.
    pub fn new(children: Vec<SpatialEntity>) -> Option<Self> {
        let mut parts = children.into_iter();
        let first = parts.next()?;
        Some(Self::from_parts(first, parts))
    }

    /// Infallible constructor for models assembled from a fixed part list.
    pub fn from_parts(first: SpatialEntity, rest: impl IntoIterator<Item = SpatialEntity>) -> Self {
        let mut children = vec![first];
        children.extend(rest);
        let mut composite = Self {
            children,
            center: Vec3::ZERO,
            bounds: Aabb::default(),
        };
        composite.sync();
        composite
    }

    pub fn children(&self) -> &[SpatialEntity] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&SpatialEntity> {
        self.children.get(index)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Mutates one child in place and resyncs the derived volume afterwards.
    pub fn with_child_mut<R>(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut SpatialEntity) -> R,
    ) -> Option<R> {
        let result = self.children.get_mut(index).map(edit);
        if result.is_some() {
            self.sync();
        }
        result
    }

    pub fn set_child_color(&mut self, index: usize, color: Rgba) -> bool {
        self.with_child_mut(index, |child| child.set_color(color))
            .is_some()
    }

    /// Removes a child unless it is the last one.
    pub fn remove_child(&mut self, index: usize) -> Option<SpatialEntity> {
        if self.children.len() <= 1 || index >= self.children.len() {
            return None;
        }
        let removed = self.children.remove(index);
        self.sync();
        Some(removed)
    }

    pub fn translate(&mut self, delta: Vec3) {
        for child in &mut self.children {
            child.translate(delta);
        }
        self.sync();
    }

    pub fn rotate_x(&mut self, degrees: f32) {
        let pivot = self.center;
        for child in &mut self.children {
            child.rotate_x(degrees, pivot);
        }
        self.sync();
    }

    pub fn rotate_y(&mut self, degrees: f32) {
        let pivot = self.center;
        for child in &mut self.children {
            child.rotate_y(degrees, pivot);
        }
        self.sync();
    }

    pub fn rotate_z(&mut self, degrees: f32) {
        let pivot = self.center;
        for child in &mut self.children {
            child.rotate_z(degrees, pivot);
        }
        self.sync();
    }

    /// Rotates a subset of children about an external hinge, e.g. a lid.
    pub fn rotate_children_x(&mut self, indices: &[usize], degrees: f32, pivot: Vec3) {
        for index in indices {
            if let Some(child) = self.children.get_mut(*index) {
                child.rotate_x(degrees, pivot);
            }
        }
        self.sync();
    }

    pub fn draw(&self, frame: &mut RenderFrame) {
        for child in &self.children {
            child.draw(frame);
        }
    }

    /// Draws every child scaled about the composite center. The stored volume is untouched.
    pub fn draw_scaled(&self, frame: &mut RenderFrame, scale: f32) {
        for child in &self.children {
            let center = self.center + (child.center() - self.center) * scale;
            frame.push_item(DrawItem {
                kind: child.kind(),
                bounds: Aabb::from_center_extent(center, child.extent().scaled(scale)),
                color: child.color(),
            });
        }
    }

    fn sync(&mut self) {
        let count = self.children.len() as f32;
        let mut sum = Vec3::ZERO;
        let mut bounds = *self.children[0].bounds();
        for child in &self.children {
            sum += child.center();
            bounds = bounds.union(child.bounds());
        }
        self.center = sum * (1.0 / count);
        self.bounds = bounds;
    }
}
