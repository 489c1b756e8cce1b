use crate::app::CameraParams;
use crate::spatial::Vec3;

const NEAR_PLANE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Look-at + perspective projection from world space to viewport pixels.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    eye: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    focal: f32,
    aspect: f32,
    viewport: Viewport,
}

impl Projector {
    /// Returns `None` for a degenerate camera (eye on center, or up parallel to the view).
    pub fn new(camera: &CameraParams, viewport: Viewport) -> Option<Self> {
        if viewport.width == 0 || viewport.height == 0 {
            return None;
        }
        let forward = (camera.center - camera.eye).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        if forward == Vec3::ZERO || right == Vec3::ZERO {
            return None;
        }
        let up = right.cross(forward);
        let half_fov = (camera.fov_y_degrees.clamp(1.0, 179.0) * 0.5).to_radians();
        Some(Self {
            eye: camera.eye,
            right,
            up,
            forward,
            focal: 1.0 / half_fov.tan(),
            aspect: viewport.width as f32 / viewport.height as f32,
            viewport,
        })
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn depth(&self, point: Vec3) -> f32 {
        (point - self.eye).dot(self.forward)
    }

    pub fn project(&self, point: Vec3) -> Option<(f32, f32)> {
        let depth = self.depth(point);
        if depth < NEAR_PLANE {
            return None;
        }
        Some(self.to_screen(point, depth))
    }

    /// Projects a segment, clipping it against the near plane first.
    pub fn project_segment(&self, a: Vec3, b: Vec3) -> Option<((f32, f32), (f32, f32))> {
        let da = self.depth(a);
        let db = self.depth(b);
        if da < NEAR_PLANE && db < NEAR_PLANE {
            return None;
        }
        let (a, da) = if da < NEAR_PLANE {
            let t = (NEAR_PLANE - da) / (db - da);
            (a.lerp(b, t), NEAR_PLANE)
        } else {
            (a, da)
        };
        let (b, db) = if db < NEAR_PLANE {
            let t = (NEAR_PLANE - db) / (da - db);
            (b.lerp(a, t), NEAR_PLANE)
        } else {
            (b, db)
        };
        Some((self.to_screen(a, da), self.to_screen(b, db)))
    }

    fn to_screen(&self, point: Vec3, depth: f32) -> (f32, f32) {
        let offset = point - self.eye;
        let ndc_x = offset.dot(self.right) * self.focal / (self.aspect * depth);
        let ndc_y = offset.dot(self.up) * self.focal / depth;
        (
            (ndc_x + 1.0) * 0.5 * self.viewport.width as f32,
            (1.0 - ndc_y) * 0.5 * self.viewport.height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            width: 800,
            height: 600,
        }
    }

    fn looking_along_x() -> Projector {
        let camera = CameraParams {
            fov_y_degrees: 90.0,
            eye: Vec3::ZERO,
            center: Vec3::new(100.0, 0.0, 0.0),
            up: Vec3::UNIT_Z,
        };
        Projector::new(&camera, viewport()).expect("valid camera")
    }

    #[test]
    fn look_at_target_maps_to_viewport_center() {
        let (x, y) = looking_along_x()
            .project(Vec3::new(50.0, 0.0, 0.0))
            .expect("in front");
        assert!((x - 400.0).abs() < 1e-3);
        assert!((y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn right_and_up_map_to_screen_right_and_top() {
        let projector = looking_along_x();
        // Looking down +x with z up, screen-right is -y.
        let (x, _) = projector.project(Vec3::new(50.0, -10.0, 0.0)).expect("visible");
        let (_, y) = projector.project(Vec3::new(50.0, 0.0, 10.0)).expect("visible");
        assert!(x > 400.0);
        assert!(y < 300.0);
    }

    #[test]
    fn point_at_fov_edge_hits_viewport_edge() {
        // 90 degree vertical fov: a point at 45 degrees up lands on the top edge.
        let (_, y) = looking_along_x()
            .project(Vec3::new(10.0, 0.0, 10.0))
            .expect("visible");
        assert!(y.abs() < 1e-2);
    }

    #[test]
    fn points_behind_camera_are_rejected() {
        assert!(looking_along_x().project(Vec3::new(-5.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn segment_crossing_near_plane_is_clipped() {
        let projector = looking_along_x();
        let clipped =
            projector.project_segment(Vec3::new(-50.0, 0.0, 0.0), Vec3::new(50.0, 0.0, 0.0));
        assert!(clipped.is_some());
        let behind =
            projector.project_segment(Vec3::new(-50.0, 0.0, 0.0), Vec3::new(-10.0, 5.0, 0.0));
        assert!(behind.is_none());
    }

    #[test]
    fn degenerate_cameras_are_refused() {
        let same_point = CameraParams {
            eye: Vec3::ZERO,
            center: Vec3::ZERO,
            ..CameraParams::default()
        };
        assert!(Projector::new(&same_point, viewport()).is_none());

        let up_parallel = CameraParams {
            eye: Vec3::new(0.0, 0.0, 100.0),
            center: Vec3::ZERO,
            up: Vec3::UNIT_Z,
            ..CameraParams::default()
        };
        assert!(Projector::new(&up_parallel, viewport()).is_none());
    }
}
