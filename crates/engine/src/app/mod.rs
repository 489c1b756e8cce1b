mod frame;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use frame::{
    CameraParams, DrawItem, GroundGrid, RadarBlip, RenderFrame, Rgba, DEFAULT_FOV_Y_DEGREES,
};
pub use input::InputAction;
pub use loop_runner::{run_app, run_app_with_metrics, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::{LoopMetricsSnapshot, MetricsHandle};
pub use rendering::{Projector, Renderer, Viewport};
pub use scene::{InputSnapshot, Scene, SceneCommand};
