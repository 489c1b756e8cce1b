mod camera;
mod chest;
mod enemy;
mod hud;
mod inventory;
mod level;
mod palette;
mod pipeline;
mod player;
mod portal;
mod projectile;
mod scene_impl;
mod session;
mod tiles;
mod world;

use engine::Scene;

use crate::app::config::Tuning;

/// Height of the ground plane every level is built on.
pub(crate) const GROUND_Z: f32 = 10.0;

pub(crate) fn build_scene(tuning: Tuning) -> Box<dyn Scene> {
    Box::new(scene_impl::GameplayScene::new(tuning))
}
