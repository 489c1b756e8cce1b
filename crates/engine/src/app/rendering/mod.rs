mod canvas;
mod projection;
mod renderer;
mod text;

pub use projection::{Projector, Viewport};
pub use renderer::Renderer;
