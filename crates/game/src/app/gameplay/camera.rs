use engine::{CameraParams, Vec3, DEFAULT_FOV_Y_DEGREES};

const SCOPED_FOV_Y_DEGREES: f32 = 40.0;
const EYE_SMOOTHING: f32 = 0.15;
const CENTER_SMOOTHING: f32 = EYE_SMOOTHING * 1.2;
const DEFAULT_BACK: f32 = 120.0;
const DEFAULT_SIDE: f32 = 30.0;
const THIRD_PERSON_HEIGHT: f32 = 120.0;
const THIRD_PERSON_LOOK_RISE: f32 = 40.0;
const FIRST_PERSON_LOOK_AHEAD: f32 = 50.0;
const TOP_DOWN_HEIGHT: f32 = 2500.0;
const NUDGE_STEP: f32 = 5.0;
const MIN_BACK: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CameraMode {
    ThirdPerson,
    FirstPerson,
    TopDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CameraNudge {
    Left,
    Right,
    Closer,
    Farther,
}

/// Follows the player; produces the camera parameters each render.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CameraRig {
    mode: CameraMode,
    mode_before_top_down: CameraMode,
    scoped: bool,
    back: f32,
    side: f32,
    eye: Vec3,
    center: Vec3,
    smoothed: Option<(Vec3, Vec3)>,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            mode: CameraMode::ThirdPerson,
            mode_before_top_down: CameraMode::ThirdPerson,
            scoped: false,
            back: DEFAULT_BACK,
            side: DEFAULT_SIDE,
            eye: Vec3::ZERO,
            center: Vec3::ZERO,
            smoothed: None,
        }
    }
}

impl CameraRig {
    /// Scope overrides the selected mode with first person.
    pub(crate) fn effective_mode(&self) -> CameraMode {
        if self.scoped {
            CameraMode::FirstPerson
        } else {
            self.mode
        }
    }

    pub(crate) fn is_scoped(&self) -> bool {
        self.scoped
    }

    pub(crate) fn set_scoped(&mut self, scoped: bool) {
        if self.scoped != scoped {
            self.scoped = scoped;
            self.smoothed = None;
        }
    }

    pub(crate) fn toggle_perspective(&mut self) {
        if self.scoped {
            return;
        }
        let next = match self.mode {
            CameraMode::ThirdPerson => CameraMode::FirstPerson,
            CameraMode::FirstPerson | CameraMode::TopDown => CameraMode::ThirdPerson,
        };
        self.set_mode(next);
    }

    pub(crate) fn toggle_top_down(&mut self) {
        if self.mode == CameraMode::TopDown {
            self.set_mode(self.mode_before_top_down);
        } else {
            self.mode_before_top_down = self.mode;
            self.set_mode(CameraMode::TopDown);
        }
    }

    /// Offsets only apply to the third-person view.
    pub(crate) fn nudge(&mut self, nudge: CameraNudge) {
        if self.effective_mode() != CameraMode::ThirdPerson {
            return;
        }
        match nudge {
            CameraNudge::Left => self.side -= NUDGE_STEP,
            CameraNudge::Right => self.side += NUDGE_STEP,
            CameraNudge::Closer => self.back = (self.back - NUDGE_STEP).max(MIN_BACK),
            CameraNudge::Farther => self.back += NUDGE_STEP,
        }
    }

    pub(crate) fn follow(&mut self, player_position: Vec3, head: Vec3, yaw_degrees: f32) {
        let forward = Vec3::from_yaw(yaw_degrees);
        match self.effective_mode() {
            CameraMode::ThirdPerson => {
                let side = Vec3::new(-forward.y, forward.x, 0.0);
                let desired_eye = player_position - forward * self.back
                    + side * self.side
                    + Vec3::new(0.0, 0.0, THIRD_PERSON_HEIGHT);
                let desired_center =
                    player_position + Vec3::new(0.0, 0.0, THIRD_PERSON_LOOK_RISE);
                let (eye, center) = self
                    .smoothed
                    .unwrap_or((desired_eye, desired_center));
                let eye = eye.lerp(desired_eye, EYE_SMOOTHING);
                let center = center.lerp(desired_center, CENTER_SMOOTHING);
                self.smoothed = Some((eye, center));
                self.eye = eye;
                self.center = center;
            }
            CameraMode::FirstPerson => {
                self.smoothed = None;
                self.eye = head;
                self.center = head + forward * FIRST_PERSON_LOOK_AHEAD;
            }
            CameraMode::TopDown => {
                self.smoothed = None;
                self.eye = Vec3::new(0.0, 0.0, TOP_DOWN_HEIGHT);
                self.center = Vec3::ZERO;
            }
        }
    }

    pub(crate) fn params(&self) -> CameraParams {
        let up = match self.effective_mode() {
            CameraMode::TopDown => Vec3::new(1.0, 0.0, 0.0),
            CameraMode::ThirdPerson | CameraMode::FirstPerson => Vec3::UNIT_Z,
        };
        CameraParams {
            fov_y_degrees: if self.scoped {
                SCOPED_FOV_Y_DEGREES
            } else {
                DEFAULT_FOV_Y_DEGREES
            },
            eye: self.eye,
            center: self.center,
            up,
        }
    }

    /// First person hides the head so it does not block the view.
    pub(crate) fn shows_player_head(&self) -> bool {
        self.effective_mode() != CameraMode::FirstPerson
    }

    fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
        self.smoothed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_forces_first_person_and_narrow_fov() {
        let mut rig = CameraRig::default();
        rig.set_scoped(true);
        assert_eq!(rig.effective_mode(), CameraMode::FirstPerson);
        rig.toggle_perspective();
        rig.set_scoped(false);
        assert_eq!(rig.effective_mode(), CameraMode::ThirdPerson);

        rig.set_scoped(true);
        rig.follow(Vec3::ZERO, Vec3::new(0.0, 0.0, 100.0), 0.0);
        let params = rig.params();
        assert_eq!(params.fov_y_degrees, SCOPED_FOV_Y_DEGREES);
        assert_eq!(params.center, Vec3::new(50.0, 0.0, 100.0));
        assert!(!rig.shows_player_head());
    }

    #[test]
    fn top_down_toggle_restores_previous_mode() {
        let mut rig = CameraRig::default();
        rig.toggle_perspective();
        rig.toggle_top_down();
        assert_eq!(rig.effective_mode(), CameraMode::TopDown);
        rig.follow(Vec3::new(300.0, 0.0, 0.0), Vec3::ZERO, 0.0);
        assert_eq!(rig.params().eye, Vec3::new(0.0, 0.0, 2500.0));
        assert_eq!(rig.params().up, Vec3::new(1.0, 0.0, 0.0));
        rig.toggle_top_down();
        assert_eq!(rig.effective_mode(), CameraMode::FirstPerson);
    }

    #[test]
    fn third_person_starts_on_target_then_smooths() {
        let mut rig = CameraRig::default();
        rig.follow(Vec3::ZERO, Vec3::ZERO, 0.0);
        let first = rig.params();
        assert!((first.eye - Vec3::new(-120.0, 30.0, 120.0)).length() < 1e-3);
        assert!((first.center - Vec3::new(0.0, 0.0, 40.0)).length() < 1e-3);

        rig.follow(Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO, 0.0);
        let second = rig.params();
        assert!((second.eye.x - (-120.0 + 15.0)).abs() < 1e-3);
        assert!((second.center.x - 18.0).abs() < 1e-3);
    }

    #[test]
    fn nudges_respect_minimum_distance() {
        let mut rig = CameraRig::default();
        for _ in 0..40 {
            rig.nudge(CameraNudge::Closer);
        }
        rig.nudge(CameraNudge::Left);
        rig.follow(Vec3::ZERO, Vec3::ZERO, 0.0);
        let eye = rig.params().eye;
        assert!((eye.x + MIN_BACK).abs() < 1e-3);
        assert!((eye.y - 25.0).abs() < 1e-3);
    }
}
