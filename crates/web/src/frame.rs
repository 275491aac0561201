//! Animation-frame scheduling seam (`requestAnimationFrame`).

use portfolio_events::Subscription;

pub trait FrameScheduler {
    /// Run `callback` before the next repaint.
    ///
    /// Disposing the returned subscription before the frame fires cancels
    /// the callback; disposing it afterwards is a no-op.
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Subscription;
}
