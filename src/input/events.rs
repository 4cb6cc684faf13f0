use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

/// A notification as it reaches the engine, before wrapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    /// Anything the terminal reported
    Terminal(Event),
    /// The recurring game timer fired
    Timer,
}

impl RawEvent {
    pub fn key(code: KeyCode) -> Self {
        RawEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    /// Which filterable kind this notification belongs to
    ///
    /// Key releases/repeats and non-key terminal events have no kind and
    /// are never delivered to a state.
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            RawEvent::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                Some(EventKind::Key)
            }
            RawEvent::Terminal(_) => None,
            RawEvent::Timer => Some(EventKind::Tick),
        }
    }

    /// Ctrl+C, which halts the game regardless of the active state
    pub fn is_interrupt(&self) -> bool {
        matches!(
            self,
            RawEvent::Terminal(Event::Key(key))
                if key.kind == KeyEventKind::Press
                    && key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        )
    }
}

/// Filterable event kinds a state can allow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Key,
    Tick,
}

/// The closed set of events a registry is keyed by
///
/// Equality and hashing are structural: a key press compares by key code
/// only, a tick compares equal to every other tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrappedEvent {
    KeyPress(KeyCode),
    Tick,
}

impl WrappedEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WrappedEvent::KeyPress(_) => EventKind::Key,
            WrappedEvent::Tick => EventKind::Tick,
        }
    }

    /// Reduce a raw notification to a wrapped event
    ///
    /// Total: anything carrying a key becomes a `KeyPress`, everything else
    /// is a `Tick`. Modifiers are dropped and letters are lower-cased.
    pub fn wrap(raw: &RawEvent) -> Self {
        let wrapped = match raw {
            RawEvent::Terminal(Event::Key(key)) => WrappedEvent::KeyPress(normalize(key.code)),
            _ => WrappedEvent::Tick,
        };
        trace!(?raw, ?wrapped, "wrapped event");
        wrapped
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
