use engine::{InputAction, InputSnapshot, RenderFrame, Scene, SceneCommand};
use tracing::info;

use super::hud::{menu_lines, radar_blips, status_lines};
use super::pipeline::TICK_PHASE_ORDER_TEXT;
use super::session::GameSession;
use crate::app::config::Tuning;

/// Adapts a `GameSession` to the engine's scene lifecycle.
pub(crate) struct GameplayScene {
    tuning: Tuning,
    session: Option<GameSession>,
}

impl GameplayScene {
    pub(crate) fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            session: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }
}

impl Scene for GameplayScene {
    fn load(&mut self) {
        let session = GameSession::new(self.tuning.clone());
        info!(
            level = session.world().level,
            state = ?session.state(),
            sys = TICK_PHASE_ORDER_TEXT,
            "gameplay_loaded"
        );
        self.session = Some(session);
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        if input.quit_requested() || input.was_pressed(InputAction::Quit) {
            return SceneCommand::Quit;
        }
        if let Some(session) = self.session.as_mut() {
            session.update(input, fixed_dt_seconds);
        }
        SceneCommand::None
    }

    fn render(&self, frame: &mut RenderFrame) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let world = session.world();
        let camera = session.camera();
        world.draw(frame, camera.shows_player_head());
        frame.set_camera(camera.params());

        for line in status_lines(&session.hud_status()) {
            frame.push_hud_line(line);
        }
        let player = &world.player;
        for blip in radar_blips(player.position(), player.yaw(), world.radar_points()) {
            frame.push_radar_blip(blip);
        }

        match session.menu_screen() {
            Some(screen) => {
                for line in menu_lines(screen, session.score().current()) {
                    frame.push_banner(line);
                }
            }
            None => {
                for line in world.messages.lines() {
                    frame.push_banner(line);
                }
            }
        }
    }

    fn unload(&mut self) {
        if let Some(session) = self.session.take() {
            info!(
                level = session.world().level,
                score = session.score().current(),
                best_score = session.score().best(),
                "gameplay_unloaded"
            );
        }
    }

    fn debug_title(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        let position = session.world().player.position();
        Some(format!(
            "Demons & Portals | {:?} | Level {} | Player ({:.0}, {:.0}) | Enemies {}",
            session.state(),
            session.world().level,
            position.x,
            position.y,
            session.world().enemies.len()
        ))
    }

    fn debug_lines(&self) -> Vec<String> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let world = session.world();
        vec![
            format!(
                "projectiles={} pickups={} chests={} keys={}",
                world.projectiles.len(),
                world.pickups.len(),
                world.chests.len(),
                world.keys.len()
            ),
            format!(
                "portals_linked={} camera={:?} scoped={}",
                world.portals.is_linked(),
                session.camera().effective_mode(),
                session.camera().is_scoped()
            ),
            format!(
                "sys={} ran={}",
                TICK_PHASE_ORDER_TEXT,
                session.pipeline().last_tick_order().len()
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_scene() -> GameplayScene {
        let mut scene = GameplayScene::new(Tuning {
            seed: Some(9),
            ..Tuning::default()
        });
        scene.load();
        scene
    }

    #[test]
    fn title_renders_world_status_and_menu() {
        let scene = loaded_scene();
        let mut frame = RenderFrame::default();
        scene.render(&mut frame);
        assert!(!frame.items().is_empty());
        assert_eq!(frame.hud_lines().len(), 2);
        assert!(frame.hud_lines()[0].starts_with("HP: 100"));
        assert_eq!(frame.banners()[0], "Demons & Portals");
        assert!(frame.ground().is_some());
    }

    #[test]
    fn playing_shows_messages_instead_of_menu() {
        let mut scene = loaded_scene();
        scene.update(
            1.0 / 60.0,
            &InputSnapshot::empty().with_action_pressed(InputAction::NewGame),
        );
        let mut frame = RenderFrame::default();
        scene.render(&mut frame);
        assert!(frame
            .banners()
            .iter()
            .any(|line| line.contains("green tile")));
        assert!(frame.banners().iter().all(|line| line != "Demons & Portals"));
    }

    #[test]
    fn quit_action_stops_the_loop() {
        let mut scene = loaded_scene();
        let command = scene.update(
            1.0 / 60.0,
            &InputSnapshot::empty().with_action_pressed(InputAction::Quit),
        );
        assert_eq!(command, SceneCommand::Quit);

        let command = scene.update(1.0 / 60.0, &InputSnapshot::empty().with_quit_requested(true));
        assert_eq!(command, SceneCommand::Quit);
    }

    #[test]
    fn unload_drops_the_session() {
        let mut scene = loaded_scene();
        assert!(scene.debug_title().is_some());
        assert_eq!(scene.debug_lines().len(), 3);
        scene.unload();
        assert!(scene.session().is_none());
        assert!(scene.debug_lines().is_empty());
    }
}
