use engine::{InputAction, InputSnapshot};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use super::camera::{CameraNudge, CameraRig};
use super::hud::{HudStatus, MenuScreen};
use super::level::{build_level, FIRST_LEVEL, LAST_LEVEL};
use super::pipeline::{PlayerCommands, Score, TickOutcome, WorldPipeline};
use super::player::Player;
use super::world::WorldState;
use super::GROUND_Z;
use crate::app::config::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PauseMenu {
    Main,
    Customization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GameState {
    Title,
    Playing,
    Paused(PauseMenu),
    Win,
    Lose,
}

const CAMERA_NUDGES: [(InputAction, CameraNudge); 4] = [
    (InputAction::CameraLeft, CameraNudge::Left),
    (InputAction::CameraRight, CameraNudge::Right),
    (InputAction::CameraCloser, CameraNudge::Closer),
    (InputAction::CameraFarther, CameraNudge::Farther),
];

/// Owns every piece of mutable game state and routes input by game state.
#[derive(Debug)]
pub(crate) struct GameSession {
    tuning: Tuning,
    state: GameState,
    world: WorldState,
    camera: CameraRig,
    score: Score,
    pipeline: WorldPipeline,
    rng: StdRng,
}

impl GameSession {
    /// Starts on the title screen over a frozen first level, unless tuning names a start level.
    pub(crate) fn new(tuning: Tuning) -> Self {
        let mut rng = tuning
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let player = Player::new(0.0, 0.0, GROUND_Z, &tuning);
        let world = build_level(FIRST_LEVEL, &tuning, player, &mut rng);
        let mut session = Self {
            tuning,
            state: GameState::Title,
            world,
            camera: CameraRig::default(),
            score: Score::default(),
            pipeline: WorldPipeline::default(),
            rng,
        };
        session.follow_player();
        if let Some(level) = session.tuning.start_level {
            session.start_level(level);
        }
        session
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn world(&self) -> &WorldState {
        &self.world
    }

    pub(crate) fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub(crate) fn score(&self) -> Score {
        self.score
    }

    pub(crate) fn pipeline(&self) -> &WorldPipeline {
        &self.pipeline
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    pub(crate) fn update(&mut self, input: &InputSnapshot, dt: f32) {
        if let Some(level) = input.level_selected() {
            self.start_level(level);
            return;
        }
        match self.state {
            GameState::Title => {
                if input.was_pressed(InputAction::NewGame) {
                    self.new_game();
                } else if let Some(level) = menu_level(input) {
                    self.start_level(level);
                }
            }
            GameState::Playing => self.update_playing(input, dt),
            GameState::Paused(PauseMenu::Main) => {
                if input.was_pressed(InputAction::Pause)
                    || input.was_pressed(InputAction::Customize)
                {
                    self.transition(GameState::Playing);
                } else if input.was_pressed(InputAction::Restart) {
                    self.restart_level();
                } else if input.was_pressed(InputAction::QuickLoad) {
                    self.world.load_checkpoint();
                    self.transition(GameState::Playing);
                } else if let Some(level) = menu_level(input) {
                    self.start_level(level);
                }
            }
            GameState::Paused(PauseMenu::Customization) => {
                if input.was_pressed(InputAction::Customize)
                    || input.was_pressed(InputAction::Pause)
                {
                    self.transition(GameState::Playing);
                } else if input.was_pressed(InputAction::CycleStyle) {
                    let style = self.world.player.cycle_style();
                    info!(style = style.label(), "player_style_changed");
                }
            }
            GameState::Win | GameState::Lose => {
                if input.was_pressed(InputAction::Restart) {
                    self.restart_level();
                } else if input.was_pressed(InputAction::NewGame) {
                    self.new_game();
                } else if let Some(level) = menu_level(input) {
                    self.start_level(level);
                }
            }
        }
    }

    fn update_playing(&mut self, input: &InputSnapshot, dt: f32) {
        if input.was_pressed(InputAction::Pause) {
            self.transition(GameState::Paused(PauseMenu::Main));
            return;
        }
        if input.was_pressed(InputAction::Customize) {
            self.transition(GameState::Paused(PauseMenu::Customization));
            return;
        }
        if input.was_pressed(InputAction::TogglePerspective) {
            self.camera.toggle_perspective();
        }
        if input.was_pressed(InputAction::ToggleTopDown) {
            self.camera.toggle_top_down();
        }
        for (action, nudge) in CAMERA_NUDGES {
            if input.was_pressed(action) {
                self.camera.nudge(nudge);
            }
        }
        self.camera.set_scoped(input.is_down(InputAction::Scope));
        if input.was_pressed(InputAction::QuickSave) {
            self.world.save_checkpoint();
        }
        if input.was_pressed(InputAction::QuickLoad) {
            self.world.load_checkpoint();
        }

        let commands = PlayerCommands::from_input(input, &self.tuning, self.camera.is_scoped(), dt);
        let outcome = self
            .pipeline
            .run_tick(&mut self.world, &mut self.score, &commands, dt);
        match outcome {
            TickOutcome::Continue => {}
            TickOutcome::Won => self.transition(GameState::Win),
            TickOutcome::Lost => self.transition(GameState::Lose),
            TickOutcome::AdvanceLevel => {
                if self.world.level >= LAST_LEVEL {
                    self.transition(GameState::Win);
                } else {
                    self.setup_level(self.world.level + 1);
                }
            }
        }
        self.follow_player();
    }

    /// Fresh player and score on level one.
    pub(crate) fn new_game(&mut self) {
        self.score.reset();
        self.world.player = Player::new(0.0, 0.0, GROUND_Z, &self.tuning);
        self.setup_level(FIRST_LEVEL);
        self.transition(GameState::Playing);
    }

    /// Jumps to `level`, keeping the current player's inventory.
    pub(crate) fn start_level(&mut self, level: u32) {
        self.setup_level(level);
        self.transition(GameState::Playing);
    }

    pub(crate) fn restart_level(&mut self) {
        self.setup_level(self.world.level);
        self.transition(GameState::Playing);
    }

    fn setup_level(&mut self, level: u32) {
        let player = self.world.player.clone();
        self.world = build_level(level, &self.tuning, player, &mut self.rng);
        info!(
            level = self.world.level,
            enemy_count = self.world.enemies.len(),
            chest_count = self.world.chests.len(),
            "level_setup"
        );
        self.follow_player();
    }

    fn transition(&mut self, next: GameState) {
        if self.state == next {
            return;
        }
        info!(from = ?self.state, to = ?next, "game_state_changed");
        self.state = next;
    }

    fn follow_player(&mut self) {
        let player = &self.world.player;
        self.camera
            .follow(player.position(), player.head_position(), player.yaw());
    }

    pub(crate) fn menu_screen(&self) -> Option<MenuScreen> {
        match self.state {
            GameState::Playing => None,
            GameState::Title => Some(MenuScreen::Title),
            GameState::Paused(PauseMenu::Main) => Some(MenuScreen::Paused),
            GameState::Paused(PauseMenu::Customization) => Some(MenuScreen::Customization {
                style: self.world.player.style().label(),
            }),
            GameState::Win => Some(MenuScreen::Win),
            GameState::Lose => Some(MenuScreen::Lose),
        }
    }

    pub(crate) fn hud_status(&self) -> HudStatus {
        let player = &self.world.player;
        let inventory = player.inventory();
        HudStatus {
            health: player.health(),
            handgun_ammo: inventory.handgun_ammo,
            rifle_ammo: inventory.rifle_ammo,
            keys: inventory.keys,
            level: self.world.level,
            score: self.score.current(),
            best_score: self.score.best(),
            loads_left: self.world.checkpoint.load_uses_left(),
            slot: inventory.active_slot(),
            slot_label: inventory.active_item().label(),
        }
    }
}

/// Digit keys double as level select while a menu is up.
fn menu_level(input: &InputSnapshot) -> Option<u32> {
    input
        .slot_selected()
        .map(u32::from)
        .filter(|level| (FIRST_LEVEL..=LAST_LEVEL).contains(level))
}
