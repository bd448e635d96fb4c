#![forbid(unsafe_code)]

//! Tactile feedback hook.

/// Fired once when a press turns into a drag.
///
/// Hosts wire this to a haptic engine or a click sound. Any `FnMut()`
/// closure works.
pub trait TactileFeedback {
    /// A drag just started.
    fn drag_started(&mut self);
}

/// Feedback that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl TactileFeedback for NoFeedback {
    #[inline]
    fn drag_started(&mut self) {}
}

impl<F: FnMut()> TactileFeedback for F {
    #[inline]
    fn drag_started(&mut self) {
        self()
    }
}
