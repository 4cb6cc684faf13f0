use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::Frame;
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::game::{GameSettings, Grid};
use crate::input::{RawEvent, WrappedEvent};
use crate::render::Renderer;
use crate::state::{
    ActiveState, Armed, GameOverState, MenuState, PlayingState, Schedule, State, Transition,
};

/// Owns the active state and feeds it events
///
/// The engine never draws to a terminal or reads input on its own; a runner
/// hands it raw events and a frame to render into.
#[derive(Debug)]
pub struct Engine {
    settings: GameSettings,
    state: ActiveState,
    schedule: Schedule,
    renderer: Renderer,
    rng: StdRng,
    active: bool,
}

impl Engine {
    /// Start at the menu
    pub fn new(settings: GameSettings, rng: StdRng) -> Self {
        let menu = ActiveState::Menu(MenuState::new(settings.clone()));
        Self::with_state(settings, menu, rng)
    }

    /// Seeded when `seed` is given, from OS entropy otherwise
    pub fn with_seed(settings: GameSettings, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(settings, rng)
    }

    /// Start in an arbitrary state
    pub fn with_state(settings: GameSettings, mut state: ActiveState, rng: StdRng) -> Self {
        let mut schedule = Schedule::new();
        state.on_enter(&mut schedule);
        info!(state = state.name(), "engine started");

        let renderer = Renderer::new(Grid::new(settings.unit_size, settings.grid_size));
        Self {
            settings,
            state,
            schedule,
            renderer,
            rng,
            active: true,
        }
    }

    pub fn state(&self) -> &ActiveState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Period of the recurring tick the active state wants, if any
    pub fn tick_period(&self) -> Option<Duration> {
        self.schedule.tick_period()
    }

    /// The armed timer, distinct for every arming
    pub fn armed_timer(&self) -> Option<Armed> {
        self.schedule.armed()
    }

    /// Stop the engine; later events are ignored
    pub fn halt(&mut self) {
        if self.active {
            info!(state = self.state.name(), "engine halted");
        }
        self.active = false;
    }

    /// Dispatch a batch of raw events in arrival order
    pub fn process_events(&mut self, events: impl IntoIterator<Item = RawEvent>) {
        for event in events {
            if !self.active {
                break;
            }
            self.handle_raw(&event);
        }
    }

    /// Filter, wrap and dispatch one raw event to the active state
    pub fn handle_raw(&mut self, raw: &RawEvent) {
        if !self.active {
            return;
        }
        if raw.is_interrupt() {
            self.halt();
            return;
        }

        let Some(kind) = raw.kind() else {
            return;
        };
        if !self.schedule.is_allowed(kind) {
            trace!(?kind, state = self.state.name(), "event blocked");
            return;
        }

        let event = WrappedEvent::wrap(raw);
        if let Some(transition) = self.state.handle_event(&event) {
            self.apply(transition);
        }
    }

    /// Ask the active state to draw itself
    pub fn render(&self, frame: &mut Frame) {
        self.state.render(frame, &self.renderer);
    }

    fn apply(&mut self, transition: Transition) {
        let next = match transition {
            Transition::Quit => {
                self.halt();
                return;
            }
            Transition::ToMenu => ActiveState::Menu(MenuState::new(self.settings.clone())),
            Transition::ToPlaying => {
                let rng = StdRng::seed_from_u64(self.rng.gen());
                ActiveState::Playing(PlayingState::new(self.settings.clone(), rng))
            }
            Transition::ToGameOver { score } => {
                ActiveState::GameOver(GameOverState::new(self.settings.clone(), score))
            }
        };

        self.state.on_exit(&mut self.schedule);
        debug!(from = self.state.name(), to = next.name(), "changing state");
        self.state = next;
        self.state.on_enter(&mut self.schedule);
    }
}
