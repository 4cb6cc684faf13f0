use ratatui::Frame;

use crate::game::GameSettings;
use crate::input::{keys, EventKind, Registry, WrappedEvent};
use crate::render::renderer::hint_line;
use crate::render::Renderer;

use super::{Schedule, State, StateSetter, Transition};

/// The final score of the round that just ended
#[derive(Debug, Clone)]
pub struct Scoreboard {
    settings: GameSettings,
    score: usize,
}

#[derive(Debug)]
pub struct GameOverState {
    registry: Registry<Scoreboard>,
    scoreboard: Scoreboard,
}

impl GameOverState {
    pub fn new(settings: GameSettings, score: usize) -> Self {
        let mut registry = Registry::new();
        registry
            .bind(
                WrappedEvent::KeyPress(keys::RESTART),
                StateSetter(Transition::ToPlaying),
            )
            .bind(WrappedEvent::KeyPress(keys::MENU), StateSetter(Transition::ToMenu))
            .bind(WrappedEvent::KeyPress(keys::QUIT), StateSetter(Transition::Quit));

        Self {
            registry,
            scoreboard: Scoreboard { settings, score },
        }
    }

    pub fn score(&self) -> usize {
        self.scoreboard.score
    }

    pub fn message(&self) -> String {
        format!("Game Over! Score: {}", self.scoreboard.score)
    }
}

impl State for GameOverState {
    fn name(&self) -> &'static str {
        "GameOver"
    }

    fn on_enter(&mut self, schedule: &mut Schedule) {
        // Tick stays allowed so a stray timer event is dropped by the registry
        schedule.allow(EventKind::Key).allow(EventKind::Tick).disarm();
    }

    fn handle_event(&mut self, event: &WrappedEvent) -> Option<Transition> {
        self.registry.dispatch(event, &mut self.scoreboard)
    }

    fn render(&self, frame: &mut Frame, renderer: &Renderer) {
        let settings = &self.scoreboard.settings;
        renderer.fill(frame, settings.game_over_background);
        renderer.draw_title(
            frame,
            &self.message(),
            settings.game_over_title_color,
            hint_line(&[
                (keys::label(keys::RESTART), "restart"),
                (keys::label(keys::MENU), "menu"),
                (keys::label(keys::QUIT), "quit"),
            ]),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Grid, Size};
    use crate::render::renderer::tests::rows;
    use crossterm::event::KeyCode;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_game_over_bindings() {
        let mut state = GameOverState::new(GameSettings::small(), 7);

        assert_eq!(
            state.handle_event(&WrappedEvent::KeyPress(keys::RESTART)),
            Some(Transition::ToPlaying)
        );
        assert_eq!(
            state.handle_event(&WrappedEvent::KeyPress(keys::MENU)),
            Some(Transition::ToMenu)
        );
        assert_eq!(
            state.handle_event(&WrappedEvent::KeyPress(keys::QUIT)),
            Some(Transition::Quit)
        );
        assert_eq!(state.handle_event(&WrappedEvent::Tick), None);
        assert_eq!(state.handle_event(&WrappedEvent::KeyPress(KeyCode::Up)), None);
    }

    #[test]
    fn test_game_over_disarms_timer() {
        let mut state = GameOverState::new(GameSettings::small(), 7);
        let mut schedule = Schedule::new();
        schedule.arm(GameSettings::small().tick_interval());

        state.on_enter(&mut schedule);

        assert_eq!(schedule.tick_period(), None);
        assert!(schedule.is_allowed(EventKind::Key));
    }

    #[test]
    fn test_game_over_renders_score() {
        let state = GameOverState::new(GameSettings::small(), 12);
        let renderer = Renderer::new(Grid::new(Size::new(20, 20), Size::new(10, 10)));
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();

        terminal.draw(|frame| state.render(frame, &renderer)).unwrap();

        let text = rows(terminal.backend().buffer()).join("\n");
        assert_eq!(state.score(), 12);
        assert!(text.contains("Game Over! Score: 12"));
        assert!(text.contains("R restart"));
    }
}
