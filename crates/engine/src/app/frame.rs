use crate::spatial::{Aabb, ShapeKind, Vec3};

pub type Rgba = [u8; 4];

pub const DEFAULT_FOV_Y_DEGREES: f32 = 77.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    pub fov_y_degrees: f32,
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov_y_degrees: DEFAULT_FOV_Y_DEGREES,
            eye: Vec3::new(0.0, -500.0, 500.0),
            center: Vec3::ZERO,
            up: Vec3::UNIT_Z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub kind: ShapeKind,
    pub bounds: Aabb,
    pub color: Rgba,
}

/// Radar blip in normalized radar space, both axes in `[-1, 1]`, +y is forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarBlip {
    pub x: f32,
    pub y: f32,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundGrid {
    pub half_size: f32,
    pub z: f32,
    pub spacing: f32,
}

/// Everything a scene wants drawn this frame. Rebuilt from scratch each render pass.
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    camera: CameraParams,
    items: Vec<DrawItem>,
    hud_lines: Vec<String>,
    banners: Vec<String>,
    radar: Vec<RadarBlip>,
    ground: Option<GroundGrid>,
}

impl RenderFrame {
    pub fn clear(&mut self) {
        self.camera = CameraParams::default();
        self.items.clear();
        self.hud_lines.clear();
        self.banners.clear();
        self.radar.clear();
        self.ground = None;
    }

    pub fn set_camera(&mut self, camera: CameraParams) {
        self.camera = camera;
    }

    pub fn camera(&self) -> &CameraParams {
        &self.camera
    }

    pub fn push_item(&mut self, item: DrawItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn push_hud_line(&mut self, line: impl Into<String>) {
        self.hud_lines.push(line.into());
    }

    pub fn hud_lines(&self) -> &[String] {
        &self.hud_lines
    }

    pub fn push_banner(&mut self, line: impl Into<String>) {
        self.banners.push(line.into());
    }

    pub fn banners(&self) -> &[String] {
        &self.banners
    }

    pub fn push_radar_blip(&mut self, blip: RadarBlip) {
        self.radar.push(blip);
    }

    pub fn radar(&self) -> &[RadarBlip] {
        &self.radar
    }

    pub fn set_ground(&mut self, ground: GroundGrid) {
        self.ground = Some(ground);
    }

    pub fn ground(&self) -> Option<GroundGrid> {
        self.ground
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Extent3;

    #[test]
    fn clear_resets_every_section() {
        let mut frame = RenderFrame::default();
        frame.set_camera(CameraParams {
            fov_y_degrees: 40.0,
            ..CameraParams::default()
        });
        frame.push_item(DrawItem {
            kind: ShapeKind::Box,
            bounds: Aabb::from_center_extent(Vec3::ZERO, Extent3::cube(1.0)),
            color: [0, 0, 0, 255],
        });
        frame.push_hud_line("HP: 100");
        frame.push_banner("PAUSED");
        frame.push_radar_blip(RadarBlip {
            x: 0.0,
            y: 0.5,
            color: [255, 0, 0, 255],
        });
        frame.set_ground(GroundGrid {
            half_size: 1600.0,
            z: 10.0,
            spacing: 200.0,
        });

        frame.clear();

        assert_eq!(frame.camera().fov_y_degrees, DEFAULT_FOV_Y_DEGREES);
        assert!(frame.items().is_empty());
        assert!(frame.hud_lines().is_empty());
        assert!(frame.banners().is_empty());
        assert!(frame.radar().is_empty());
        assert_eq!(frame.ground(), None);
    }
}
