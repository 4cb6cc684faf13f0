use ratatui::Frame;

use crate::game::GameSettings;
use crate::input::{keys, EventKind, Registry, WrappedEvent};
use crate::render::renderer::hint_line;
use crate::render::Renderer;

use super::{Schedule, State, StateSetter, Transition};

pub const TITLE: &str = "Snake";

/// What the menu shows
#[derive(Debug, Clone)]
pub struct MenuScreen {
    settings: GameSettings,
}

/// Title screen; the initial state
#[derive(Debug)]
pub struct MenuState {
    registry: Registry<MenuScreen>,
    screen: MenuScreen,
}

impl MenuState {
    pub fn new(settings: GameSettings) -> Self {
        let mut registry = Registry::new();
        registry
            .bind(
                WrappedEvent::KeyPress(keys::START),
                StateSetter(Transition::ToPlaying),
            )
            .bind(WrappedEvent::KeyPress(keys::QUIT), StateSetter(Transition::Quit));

        Self {
            registry,
            screen: MenuScreen { settings },
        }
    }
}

impl State for MenuState {
    fn name(&self) -> &'static str {
        "Menu"
    }

    fn on_enter(&mut self, schedule: &mut Schedule) {
        schedule.allow(EventKind::Key).disarm();
    }

    fn handle_event(&mut self, event: &WrappedEvent) -> Option<Transition> {
        self.registry.dispatch(event, &mut self.screen)
    }

    fn render(&self, frame: &mut Frame, renderer: &Renderer) {
        let settings = &self.screen.settings;
        renderer.fill(frame, settings.menu_background);
        renderer.draw_title(
            frame,
            TITLE,
            settings.menu_title_color,
            hint_line(&[
                (keys::label(keys::START), "start"),
                (keys::label(keys::QUIT), "quit"),
            ]),
        );
    }
}
