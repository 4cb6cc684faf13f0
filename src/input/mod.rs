//! Input plumbing: wrapping raw notifications and routing them to subscribers

pub mod events;
pub mod keys;
pub mod registry;

pub use events::{EventKind, RawEvent, WrappedEvent};
pub use registry::{Registry, Subscriber};
