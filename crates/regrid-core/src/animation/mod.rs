#![forbid(unsafe_code)]

//! Time-driven animation primitives.
//!
//! The grid uses these for cosmetic motion only: nothing in the drag state
//! machine waits on an animation to finish.

pub mod spring;

use std::time::Duration;

/// A value that evolves as time is fed into it.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has come to rest.
    fn is_complete(&self) -> bool;

    /// Current progress in `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}
