mod aabb;
mod collision;
mod composite;
mod entity;
mod vec3;

pub use aabb::{Aabb, Extent3};
pub use collision::{collide, Collider, HasCollisionRadius};
pub use composite::CompositeEntity;
pub use entity::{ShapeKind, SpatialEntity};
pub use vec3::Vec3;
