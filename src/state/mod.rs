//! Game phases and the lifecycle contract the engine drives them through
//!
//! Exactly one state is active at a time. A state owns its entities and its
//! own [`Registry`](crate::input::Registry); moving to another phase throws
//! the old state away and builds the new one from scratch.

pub mod commands;
pub mod game_over;
pub mod menu;
pub mod playing;

use ratatui::Frame;
use std::collections::HashSet;
use std::time::Duration;

use crate::input::{EventKind, WrappedEvent};
use crate::render::Renderer;

pub use commands::{Advance, DirectionChange, StateSetter};
pub use game_over::GameOverState;
pub use menu::MenuState;
pub use playing::{Board, PlayingState};

/// What a subscriber can ask the engine to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    ToMenu,
    ToPlaying,
    ToGameOver { score: usize },
    Quit,
}

/// An armed tick timer
///
/// `generation` changes every time a timer is armed, so re-arming with the
/// same period still restarts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armed {
    pub period: Duration,
    pub generation: u64,
}

/// Event filter and tick timer, armed by whichever state is active
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    allowed: HashSet<EventKind>,
    tick: Option<Armed>,
    generation: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(&mut self, kind: EventKind) -> &mut Self {
        self.allowed.insert(kind);
        self
    }

    pub fn is_allowed(&self, kind: EventKind) -> bool {
        self.allowed.contains(&kind)
    }

    /// Fire `Tick` every `period`
    pub fn arm(&mut self, period: Duration) -> &mut Self {
        self.generation += 1;
        self.tick = Some(Armed {
            period,
            generation: self.generation,
        });
        self
    }

    pub fn disarm(&mut self) -> &mut Self {
        self.tick = None;
        self
    }

    pub fn tick_period(&self) -> Option<Duration> {
        self.tick.map(|armed| armed.period)
    }

    pub fn armed(&self) -> Option<Armed> {
        self.tick
    }

    /// Block every event kind and stop the timer
    pub fn clear(&mut self) {
        self.allowed.clear();
        self.tick = None;
    }
}

/// One phase of the game
pub trait State {
    fn name(&self) -> &'static str;

    /// Arm exactly the events and timer this state needs
    fn on_enter(&mut self, schedule: &mut Schedule);

    /// Disarm everything `on_enter` armed
    fn on_exit(&mut self, schedule: &mut Schedule) {
        schedule.clear();
    }

    fn handle_event(&mut self, event: &WrappedEvent) -> Option<Transition>;

    fn render(&self, frame: &mut Frame, renderer: &Renderer);
}

/// The state currently owned by the engine
#[derive(Debug)]
pub enum ActiveState {
    Menu(MenuState),
    Playing(PlayingState),
    GameOver(GameOverState),
}

impl ActiveState {
    fn inner(&self) -> &dyn State {
        match self {
            ActiveState::Menu(state) => state,
            ActiveState::Playing(state) => state,
            ActiveState::GameOver(state) => state,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn State {
        match self {
            ActiveState::Menu(state) => state,
            ActiveState::Playing(state) => state,
            ActiveState::GameOver(state) => state,
        }
    }
}

impl State for ActiveState {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn on_enter(&mut self, schedule: &mut Schedule) {
        self.inner_mut().on_enter(schedule)
    }

    fn on_exit(&mut self, schedule: &mut Schedule) {
        self.inner_mut().on_exit(schedule)
    }

    fn handle_event(&mut self, event: &WrappedEvent) -> Option<Transition> {
        self.inner_mut().handle_event(event)
    }

    fn render(&self, frame: &mut Frame, renderer: &Renderer) {
        self.inner().render(frame, renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_arm_and_clear() {
        let mut schedule = Schedule::new();
        assert!(!schedule.is_allowed(EventKind::Key));
        assert_eq!(schedule.tick_period(), None);

        schedule
            .allow(EventKind::Key)
            .allow(EventKind::Tick)
            .arm(Duration::from_millis(300));
        assert!(schedule.is_allowed(EventKind::Key));
        assert!(schedule.is_allowed(EventKind::Tick));
        assert_eq!(schedule.tick_period(), Some(Duration::from_millis(300)));

        schedule.disarm();
        assert_eq!(schedule.tick_period(), None);
        assert!(schedule.is_allowed(EventKind::Tick));

        schedule.clear();
        assert!(!schedule.is_allowed(EventKind::Key));
        assert!(!schedule.is_allowed(EventKind::Tick));
    }

    #[test]
    fn test_rearming_same_period_is_distinct() {
        let mut schedule = Schedule::new();
        let period = Duration::from_millis(100);

        let first = schedule.arm(period).armed();
        schedule.clear();
        let second = schedule.arm(period).armed();

        assert_ne!(first, second);
        assert_eq!(second.map(|armed| armed.period), Some(period));
    }
}
