//! In-memory listener registry (single UI thread).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::subscription::Subscription;

type Handler<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct Listeners<E> {
    next_id: u64,
    entries: Vec<(u64, Handler<E>)>,
}

/// Fan-out of events to registered handlers.
///
/// - No IO / no threads
/// - Handlers run in registration order
/// - Handlers may subscribe or dispose while an event is being delivered;
///   changes take effect from the next `emit`
pub struct ListenerRegistry<E> {
    listeners: Rc<RefCell<Listeners<E>>>,
}

impl<E: 'static> ListenerRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl FnMut(&E) + 'static) -> Subscription {
        let handler: Handler<E> = Rc::new(RefCell::new(handler));
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, handler));
            id
        };

        let weak: Weak<RefCell<Listeners<E>>> = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = weak.upgrade() {
                listeners.borrow_mut().entries.retain(|(i, _)| *i != id);
            }
        })
    }

    /// Deliver `event` to every current handler; returns how many ran.
    pub fn emit(&self, event: &E) -> usize {
        let handlers: Vec<Handler<E>> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, h)| h.clone())
            .collect();

        let mut delivered = 0;
        for handler in handlers {
            // A handler that re-emits to itself is skipped, not re-entered.
            match handler.try_borrow_mut() {
                Ok(mut f) => {
                    (&mut *f)(event);
                    delivered += 1;
                }
                Err(_) => tracing::debug!("skipping re-entrant listener"),
            }
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

/// Clones share the same listener list.
impl<E> Clone for ListenerRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<E> core::fmt::Debug for ListenerRegistry<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.borrow().entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn emit_reaches_every_handler_in_order() {
        let registry = ListenerRegistry::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = {
            let seen = seen.clone();
            registry.subscribe(move |v| seen.borrow_mut().push(("a", *v)))
        };
        let b = {
            let seen = seen.clone();
            registry.subscribe(move |v| seen.borrow_mut().push(("b", *v)))
        };

        assert_eq!(registry.emit(&7), 2);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
        drop((a, b));
    }

    #[test]
    fn disposed_handler_no_longer_runs() {
        let registry = ListenerRegistry::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let subscription = registry.subscribe(move |_| h.set(h.get() + 1));

        registry.emit(&());
        subscription.dispose();
        registry.emit(&());

        assert_eq!(hits.get(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn subscription_outliving_registry_is_harmless() {
        let registry = ListenerRegistry::<()>::new();
        let subscription = registry.subscribe(|_| {});
        drop(registry);
        subscription.dispose();
    }
}
