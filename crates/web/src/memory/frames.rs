//! Hand-cranked animation frames.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use portfolio_events::Subscription;

use crate::frame::FrameScheduler;

type Pending = RefCell<BTreeMap<u64, Box<dyn FnOnce()>>>;

/// Frame scheduler driven by the test: callbacks run only on
/// [`ManualFrames::run_frame`].
#[derive(Clone, Default)]
pub struct ManualFrames {
    pending: Rc<Pending>,
    next_id: Rc<Cell<u64>>,
    requested: Rc<Cell<usize>>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Total callbacks ever requested, cancelled ones included.
    pub fn requested(&self) -> usize {
        self.requested.get()
    }

    /// Run every callback queued before this call; returns how many ran.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let count = due.len();
        for (_, callback) in due {
            callback();
        }
        count
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.requested.set(self.requested.get() + 1);
        self.pending.borrow_mut().insert(id, callback);

        let pending: Weak<Pending> = Rc::downgrade(&self.pending);
        Subscription::new(move || {
            if let Some(pending) = pending.upgrade() {
                pending.borrow_mut().remove(&id);
            }
        })
    }
}

impl core::fmt::Debug for ManualFrames {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ManualFrames")
            .field("pending", &self.pending())
            .field("requested", &self.requested())
            .finish()
    }
}
