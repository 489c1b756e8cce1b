use super::frame::RenderFrame;
use super::input::{ActionStates, InputAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
    slot_selected: Option<u8>,
    slot_cycle_steps: i32,
    level_selected: Option<u32>,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        actions: ActionStates,
        slot_selected: Option<u8>,
        slot_cycle_steps: i32,
        level_selected: Option<u32>,
    ) -> Self {
        Self {
            quit_requested,
            actions,
            slot_selected,
            slot_cycle_steps,
            level_selected,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Level-triggered: true for every tick the action is held.
    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    /// Edge-triggered: true only on the tick the action went down.
    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.actions.was_pressed(action)
    }

    pub fn slot_selected(&self) -> Option<u8> {
        self.slot_selected
    }

    pub fn slot_cycle_steps(&self) -> i32 {
        self.slot_cycle_steps
    }

    pub fn level_selected(&self) -> Option<u32> {
        self.level_selected
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set_held(action, is_down);
        self
    }

    pub fn with_action_pressed(mut self, action: InputAction) -> Self {
        self.actions.set(action, true);
        self.actions.press(action);
        self
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }

    pub fn with_slot_selected(mut self, slot: Option<u8>) -> Self {
        self.slot_selected = slot;
        self
    }

    pub fn with_slot_cycle_steps(mut self, steps: i32) -> Self {
        self.slot_cycle_steps = steps;
        self
    }

    pub fn with_level_selected(mut self, level: Option<u32>) -> Self {
        self.level_selected = level;
        self
    }
}

pub trait Scene {
    fn load(&mut self);
    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand;
    fn render(&self, frame: &mut RenderFrame);
    fn unload(&mut self);
    fn debug_title(&self) -> Option<String> {
        None
    }
    fn debug_lines(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Owns the single active scene and the frame it draws into.
pub(crate) struct SceneRuntime {
    scene: Box<dyn Scene>,
    frame: RenderFrame,
    is_loaded: bool,
    tick_count: u64,
}

impl SceneRuntime {
    pub(crate) fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            frame: RenderFrame::default(),
            is_loaded: false,
            tick_count: 0,
        }
    }

    pub(crate) fn load(&mut self) {
        if self.is_loaded {
            return;
        }
        self.scene.load();
        self.is_loaded = true;
    }

    pub(crate) fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        if !self.is_loaded {
            return SceneCommand::None;
        }
        self.tick_count = self.tick_count.saturating_add(1);
        self.scene.update(fixed_dt_seconds, input)
    }

    pub(crate) fn render(&mut self) -> &RenderFrame {
        self.frame.clear();
        if self.is_loaded {
            self.scene.render(&mut self.frame);
        }
        &self.frame
    }

    pub(crate) fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub(crate) fn debug_title(&self) -> Option<String> {
        self.scene.debug_title()
    }

    pub(crate) fn debug_lines(&self) -> Vec<String> {
        self.scene.debug_lines()
    }

    pub(crate) fn shutdown(&mut self) {
        if !self.is_loaded {
            return;
        }
        self.scene.unload();
        self.is_loaded = false;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct CallLog {
        loads: u32,
        updates: u32,
        unloads: u32,
    }

    struct CountingScene {
        log: Rc<RefCell<CallLog>>,
        quit_after: u32,
    }

    impl Scene for CountingScene {
        fn load(&mut self) {
            self.log.borrow_mut().loads += 1;
        }

        fn update(&mut self, _fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
            let mut log = self.log.borrow_mut();
            log.updates += 1;
            if input.was_pressed(InputAction::Quit) || log.updates >= self.quit_after {
                SceneCommand::Quit
            } else {
                SceneCommand::None
            }
        }

        fn render(&self, frame: &mut RenderFrame) {
            frame.push_hud_line(format!("updates={}", self.log.borrow().updates));
        }

        fn unload(&mut self) {
            self.log.borrow_mut().unloads += 1;
        }
    }

    fn runtime(quit_after: u32) -> (SceneRuntime, Rc<RefCell<CallLog>>) {
        let log = Rc::new(RefCell::new(CallLog::default()));
        let scene = CountingScene {
            log: Rc::clone(&log),
            quit_after,
        };
        (SceneRuntime::new(Box::new(scene)), log)
    }

    #[test]
    fn load_is_idempotent_and_shutdown_unloads_once() {
        let (mut runtime, log) = runtime(100);
        runtime.load();
        runtime.load();
        runtime.shutdown();
        runtime.shutdown();
        assert_eq!(log.borrow().loads, 1);
        assert_eq!(log.borrow().unloads, 1);
    }

    #[test]
    fn update_before_load_is_ignored() {
        let (mut runtime, log) = runtime(1);
        let command = runtime.update(1.0 / 60.0, &InputSnapshot::empty());
        assert_eq!(command, SceneCommand::None);
        assert_eq!(log.borrow().updates, 0);
        assert_eq!(runtime.tick_count(), 0);
    }

    #[test]
    fn update_forwards_commands_and_counts_ticks() {
        let (mut runtime, _log) = runtime(3);
        runtime.load();
        let input = InputSnapshot::empty();
        assert_eq!(runtime.update(0.016, &input), SceneCommand::None);
        assert_eq!(runtime.update(0.016, &input), SceneCommand::None);
        assert_eq!(runtime.update(0.016, &input), SceneCommand::Quit);
        assert_eq!(runtime.tick_count(), 3);
    }

    #[test]
    fn render_rebuilds_frame_each_pass() {
        let (mut runtime, _log) = runtime(100);
        runtime.load();
        runtime.render();
        runtime.update(0.016, &InputSnapshot::empty());
        let frame = runtime.render();
        assert_eq!(frame.hud_lines(), ["updates=1".to_string()]);
    }

    #[test]
    fn snapshot_builders_separate_held_and_pressed() {
        let held = InputSnapshot::empty().with_action_down(InputAction::MoveForward, true);
        assert!(held.is_down(InputAction::MoveForward));
        assert!(!held.was_pressed(InputAction::MoveForward));

        let pressed = InputSnapshot::empty().with_action_pressed(InputAction::Pause);
        assert!(pressed.was_pressed(InputAction::Pause));
        assert!(pressed.is_down(InputAction::Pause));

        let selected = InputSnapshot::empty()
            .with_slot_selected(Some(2))
            .with_slot_cycle_steps(-1)
            .with_level_selected(Some(3));
        assert_eq!(selected.slot_selected(), Some(2));
        assert_eq!(selected.slot_cycle_steps(), -1);
        assert_eq!(selected.level_selected(), Some(3));
    }
}
