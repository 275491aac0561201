//! Disposal handles for listeners, timers and widget instances.
//!
//! Everything the page wires up (DOM listeners, animation frames, modal
//! hooks) hands back a [`Subscription`]. Holding it keeps the wiring alive;
//! dropping it or calling [`Subscription::dispose`] detaches it.
//!
//! ## Usage Pattern
//!
//! ```ignore
//! let mut wiring = SubscriptionSet::new();
//! wiring.push(dom.listen(&button, EventKind::Click, move |_| controller.on_click()));
//!
//! // teardown: detach everything in one go
//! wiring.dispose_all();
//! ```

/// Handle to an attached listener or scheduled callback.
///
/// Disposal runs at most once, either explicitly or on drop.
#[must_use = "dropping a Subscription detaches it immediately"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// A handle with nothing to release.
    pub fn noop() -> Self {
        Self { dispose: None }
    }

    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.dispose.is_some())
            .finish()
    }
}

/// Owned group of subscriptions released together.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Take over every subscription held by `other`.
    pub fn append(&mut self, mut other: SubscriptionSet) {
        self.subscriptions.append(&mut other.subscriptions);
    }

    /// Release in reverse order of attachment.
    pub fn dispose_all(&mut self) {
        while let Some(subscription) = self.subscriptions.pop() {
            subscription.dispose();
        }
    }
}

impl Extend<Subscription> for SubscriptionSet {
    fn extend<T: IntoIterator<Item = Subscription>>(&mut self, iter: T) {
        self.subscriptions.extend(iter);
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.dispose_all();
    }
}
