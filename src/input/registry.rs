use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use super::events::WrappedEvent;
use crate::state::Transition;

/// A reaction bound to an event
///
/// `update` runs against the owning state's model and may ask the engine to
/// switch states.
pub trait Subscriber<S> {
    fn update(&self, state: &mut S) -> Option<Transition>;
}

impl<S, F> Subscriber<S> for F
where
    F: Fn(&mut S) -> Option<Transition>,
{
    fn update(&self, state: &mut S) -> Option<Transition> {
        self(state)
    }
}

/// Per-state table from wrapped events to their subscribers
pub struct Registry<S> {
    bindings: HashMap<WrappedEvent, Vec<Box<dyn Subscriber<S>>>>,
}

impl<S> Registry<S> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Add one more subscriber for `event`, after any already bound
    pub fn bind(
        &mut self,
        event: WrappedEvent,
        subscriber: impl Subscriber<S> + 'static,
    ) -> &mut Self {
        self.bindings
            .entry(event)
            .or_default()
            .push(Box::new(subscriber));
        self
    }

    /// Run every subscriber bound to `event` in registration order
    ///
    /// Unbound events are ignored. The first subscriber that requests a
    /// transition ends the dispatch, since the state it would run against
    /// is about to be replaced.
    pub fn dispatch(&self, event: &WrappedEvent, state: &mut S) -> Option<Transition> {
        let Some(subscribers) = self.bindings.get(event) else {
            debug!(?event, "no binding for event");
            return None;
        };

        subscribers
            .iter()
            .find_map(|subscriber| subscriber.update(state))
    }
}

impl<S> Default for Registry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("events", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}
