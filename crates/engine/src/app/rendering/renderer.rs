use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::{DrawItem, RenderFrame, Rgba};
use crate::spatial::{ShapeKind, Vec3};

use super::canvas::Canvas;
use super::projection::{Projector, Viewport};
use super::text::{draw_text_panel, text_width, LINE_ADVANCE, TEXT_SCALE};

const CLEAR_COLOR: Rgba = [18, 20, 28, 255];
const GRID_COLOR: Rgba = [52, 58, 70, 255];
const GRID_BORDER_COLOR: Rgba = [96, 104, 124, 255];
const HUD_TEXT_COLOR: Rgba = [244, 248, 252, 255];
const BANNER_TEXT_COLOR: Rgba = [255, 226, 120, 255];
const OVERLAY_TEXT_COLOR: Rgba = [176, 198, 220, 255];
const PANEL_BG_COLOR: Rgba = [10, 12, 16, 200];
const PANEL_BORDER_COLOR: Rgba = [92, 106, 126, 255];
const RADAR_RADIUS_PX: i32 = 70;
const RADAR_MARGIN_PX: i32 = 16;
const RADAR_RING_COLOR: Rgba = [80, 200, 120, 255];
const PANEL_MARGIN_PX: i32 = 6 * TEXT_SCALE;

/// Wireframe 3D view over a `pixels` framebuffer.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub(crate) fn render(
        &mut self,
        frame: &RenderFrame,
        overlay_lines: Option<&[String]>,
    ) -> Result<(), Error> {
        let viewport = self.viewport;
        if viewport.width == 0 || viewport.height == 0 {
            return Ok(());
        }
        let mut canvas = Canvas::new(self.pixels.frame_mut(), viewport.width, viewport.height);
        paint_frame(&mut canvas, viewport, frame, overlay_lines);
        self.pixels.render()
    }
}

pub(crate) fn paint_frame(
    canvas: &mut Canvas<'_>,
    viewport: Viewport,
    frame: &RenderFrame,
    overlay_lines: Option<&[String]>,
) {
    canvas.clear(CLEAR_COLOR);

    if let Some(projector) = Projector::new(frame.camera(), viewport) {
        draw_ground(canvas, &projector, frame);
        let mut ordered: Vec<&DrawItem> = frame.items().iter().collect();
        ordered.sort_by(|a, b| {
            let da = projector.depth(a.bounds.center());
            let db = projector.depth(b.bounds.center());
            db.total_cmp(&da)
        });
        for item in ordered {
            draw_item(canvas, &projector, item);
        }
    }

    draw_text_panel(
        canvas,
        PANEL_MARGIN_PX,
        PANEL_MARGIN_PX,
        frame.hud_lines(),
        HUD_TEXT_COLOR,
        PANEL_BG_COLOR,
        PANEL_BORDER_COLOR,
    );
    draw_banners(canvas, frame.banners());
    draw_radar(canvas, frame);
    if let Some(lines) = overlay_lines {
        let widest = lines.iter().map(|line| text_width(line)).max().unwrap_or(0);
        let x = canvas.width() - widest - PANEL_MARGIN_PX * 2;
        draw_text_panel(
            canvas,
            x,
            PANEL_MARGIN_PX,
            lines,
            OVERLAY_TEXT_COLOR,
            PANEL_BG_COLOR,
            PANEL_BORDER_COLOR,
        );
    }
}

fn draw_ground(canvas: &mut Canvas<'_>, projector: &Projector, frame: &RenderFrame) {
    let Some(ground) = frame.ground() else {
        return;
    };
    if ground.spacing <= 0.0 || ground.half_size <= 0.0 {
        return;
    }
    let half = ground.half_size;
    let steps = (half / ground.spacing).floor() as i32;
    for index in -steps..=steps {
        let offset = index as f32 * ground.spacing;
        let color = if index.abs() == steps {
            GRID_BORDER_COLOR
        } else {
            GRID_COLOR
        };
        draw_world_line(
            canvas,
            projector,
            Vec3::new(offset, -half, ground.z),
            Vec3::new(offset, half, ground.z),
            color,
        );
        draw_world_line(
            canvas,
            projector,
            Vec3::new(-half, offset, ground.z),
            Vec3::new(half, offset, ground.z),
            color,
        );
    }
}

fn draw_item(canvas: &mut Canvas<'_>, projector: &Projector, item: &DrawItem) {
    match item.kind {
        ShapeKind::Sphere => {
            let center = item.bounds.center();
            let radius = item.bounds.extent().width * 0.5;
            let (Some(screen_center), Some(screen_edge)) = (
                projector.project(center),
                projector.project(center + projector.right() * radius),
            ) else {
                return;
            };
            let screen_radius =
                (screen_edge.0 - screen_center.0).hypot(screen_edge.1 - screen_center.1);
            canvas.circle(screen_center, screen_radius, item.color);
        }
        ShapeKind::Box | ShapeKind::Cylinder => {
            const EDGES: [(usize, usize); 12] = [
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 0),
                (4, 5),
                (5, 6),
                (6, 7),
                (7, 4),
                (0, 4),
                (1, 5),
                (2, 6),
                (3, 7),
            ];
            let corners = item.bounds.corners();
            for (from, to) in EDGES {
                draw_world_line(canvas, projector, corners[from], corners[to], item.color);
            }
        }
    }
}

fn draw_world_line(
    canvas: &mut Canvas<'_>,
    projector: &Projector,
    from: Vec3,
    to: Vec3,
    color: Rgba,
) {
    if let Some((a, b)) = projector.project_segment(from, to) {
        canvas.line(a, b, color);
    }
}

fn draw_banners(canvas: &mut Canvas<'_>, banners: &[String]) {
    if banners.is_empty() {
        return;
    }
    let widest = banners.iter().map(|line| text_width(line)).max().unwrap_or(0);
    let height = banners.len() as i32 * LINE_ADVANCE;
    let x = (canvas.width() - widest) / 2 - 3 * TEXT_SCALE;
    let y = (canvas.height() - height) / 3;
    draw_text_panel(
        canvas,
        x,
        y,
        banners,
        BANNER_TEXT_COLOR,
        PANEL_BG_COLOR,
        PANEL_BORDER_COLOR,
    );
}

fn draw_radar(canvas: &mut Canvas<'_>, frame: &RenderFrame) {
    if frame.radar().is_empty() {
        return;
    }
    let cx = (canvas.width() - RADAR_MARGIN_PX - RADAR_RADIUS_PX) as f32;
    let cy = (canvas.height() - RADAR_MARGIN_PX - RADAR_RADIUS_PX) as f32;
    let radius = RADAR_RADIUS_PX as f32;
    canvas.circle((cx, cy), radius, RADAR_RING_COLOR);
    canvas.line((cx, cy - radius), (cx, cy + radius), GRID_COLOR);
    canvas.line((cx - radius, cy), (cx + radius, cy), GRID_COLOR);
    for blip in frame.radar() {
        let x = cx + blip.x.clamp(-1.0, 1.0) * radius;
        let y = cy - blip.y.clamp(-1.0, 1.0) * radius;
        canvas.fill_rect(x as i32 - 2, y as i32 - 2, 5, 5, blip.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{CameraParams, GroundGrid, RadarBlip};
    use crate::spatial::{Aabb, Extent3};

    fn count_pixels(buffer: &[u8], color: Rgba) -> usize {
        buffer
            .chunks_exact(4)
            .filter(|pixel| *pixel == color)
            .count()
    }

    fn sample_frame() -> RenderFrame {
        let mut frame = RenderFrame::default();
        frame.set_camera(CameraParams {
            fov_y_degrees: 77.3,
            eye: Vec3::new(-200.0, 0.0, 120.0),
            center: Vec3::new(0.0, 0.0, 40.0),
            up: Vec3::UNIT_Z,
        });
        frame.set_ground(GroundGrid {
            half_size: 400.0,
            z: 10.0,
            spacing: 100.0,
        });
        frame
    }

    #[test]
    fn box_item_draws_its_color() {
        let mut frame = sample_frame();
        let color = [250, 10, 10, 255];
        frame.push_item(DrawItem {
            kind: ShapeKind::Box,
            bounds: Aabb::from_center_extent(Vec3::new(0.0, 0.0, 40.0), Extent3::cube(40.0)),
            color,
        });
        let viewport = Viewport {
            width: 320,
            height: 240,
        };
        let mut buffer = vec![0u8; 320 * 240 * 4];
        let mut canvas = Canvas::new(&mut buffer, 320, 240);
        paint_frame(&mut canvas, viewport, &frame, None);
        assert!(count_pixels(&buffer, color) > 20);
    }

    #[test]
    fn items_behind_camera_are_skipped() {
        let mut frame = sample_frame();
        let color = [1, 250, 1, 255];
        frame.push_item(DrawItem {
            kind: ShapeKind::Sphere,
            bounds: Aabb::from_center_extent(Vec3::new(-400.0, 0.0, 120.0), Extent3::cube(20.0)),
            color,
        });
        let viewport = Viewport {
            width: 160,
            height: 120,
        };
        let mut buffer = vec![0u8; 160 * 120 * 4];
        let mut canvas = Canvas::new(&mut buffer, 160, 120);
        paint_frame(&mut canvas, viewport, &frame, None);
        assert_eq!(count_pixels(&buffer, color), 0);
    }

    #[test]
    fn hud_banner_radar_and_overlay_fit_small_viewports() {
        let mut frame = sample_frame();
        frame.push_hud_line("HP: 100");
        frame.push_banner("PAUSED");
        frame.push_radar_blip(RadarBlip {
            x: 0.5,
            y: 2.0,
            color: [255, 0, 0, 255],
        });
        let overlay = vec!["FPS: 60".to_string()];
        for (w, h) in [(1u32, 1u32), (8, 8), (64, 48)] {
            let viewport = Viewport {
                width: w,
                height: h,
            };
            let mut buffer = vec![0u8; (w * h * 4) as usize];
            let mut canvas = Canvas::new(&mut buffer, w, h);
            paint_frame(&mut canvas, viewport, &frame, Some(&overlay));
        }
    }
}
