//! UI event plumbing: event types, listener registry and disposal handles.

pub mod event;
pub mod registry;
pub mod subscription;

pub use event::{EventKind, UiEvent};
pub use registry::ListenerRegistry;
pub use subscription::{Subscription, SubscriptionSet};
