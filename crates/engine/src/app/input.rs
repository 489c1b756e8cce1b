#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    Jump,
    FirePrimary,
    Scope,
    Interact,
    QuickSave,
    QuickLoad,
    Pause,
    Restart,
    NewGame,
    TogglePerspective,
    ToggleTopDown,
    Customize,
    CycleStyle,
    CameraLeft,
    CameraRight,
    CameraCloser,
    CameraFarther,
    Quit,
}

impl InputAction {
    pub const ALL: [InputAction; ACTION_COUNT] = [
        InputAction::MoveForward,
        InputAction::MoveBack,
        InputAction::StrafeLeft,
        InputAction::StrafeRight,
        InputAction::TurnLeft,
        InputAction::TurnRight,
        InputAction::Jump,
        InputAction::FirePrimary,
        InputAction::Scope,
        InputAction::Interact,
        InputAction::QuickSave,
        InputAction::QuickLoad,
        InputAction::Pause,
        InputAction::Restart,
        InputAction::NewGame,
        InputAction::TogglePerspective,
        InputAction::ToggleTopDown,
        InputAction::Customize,
        InputAction::CycleStyle,
        InputAction::CameraLeft,
        InputAction::CameraRight,
        InputAction::CameraCloser,
        InputAction::CameraFarther,
        InputAction::Quit,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

const ACTION_COUNT: usize = 24;

/// Held state plus a one-tick pressed edge per action.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
    pressed: [bool; ACTION_COUNT],
}

impl ActionStates {
    /// Records a key transition; a press only produces an edge when the action was up.
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        let index = action.index();
        if is_down && !self.down[index] {
            self.pressed[index] = true;
        }
        self.down[index] = is_down;
    }

    pub(crate) fn set_held(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn press(&mut self, action: InputAction) {
        self.pressed[action.index()] = true;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub(crate) fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed[action.index()]
    }

    pub(crate) fn clear_edges(&mut self) {
        self.pressed = [false; ACTION_COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_dense_and_unique() {
        for (expected, action) in InputAction::ALL.iter().enumerate() {
            assert_eq!(action.index(), expected);
        }
    }

    #[test]
    fn press_edge_only_on_transition() {
        let mut states = ActionStates::default();
        states.set(InputAction::Jump, true);
        assert!(states.was_pressed(InputAction::Jump));
        states.clear_edges();
        states.set(InputAction::Jump, true);
        assert!(!states.was_pressed(InputAction::Jump));
        assert!(states.is_down(InputAction::Jump));
        states.set(InputAction::Jump, false);
        states.set(InputAction::Jump, true);
        assert!(states.was_pressed(InputAction::Jump));
    }
}
