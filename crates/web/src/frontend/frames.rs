use gloo_render::request_animation_frame;

use portfolio_events::Subscription;

use crate::frame::FrameScheduler;

/// `requestAnimationFrame`; disposing the subscription cancels the frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationFrames;

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Subscription {
        let frame = request_animation_frame(move |_timestamp| callback());
        Subscription::new(move || drop(frame))
    }
}
