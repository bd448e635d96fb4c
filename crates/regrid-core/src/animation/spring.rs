#![forbid(unsafe_code)]

//! Damped spring used to settle a dropped item into its slot.
//!
//! The spring integrates
//!
//!   a = -stiffness × (position - target) - damping × velocity
//!
//! with semi-implicit Euler. Large frame gaps are split into 4ms steps so a
//! stalled frame cannot make a stiff spring explode.
//!
//! # Invariants
//!
//! 1. Stiffness is at least [`MIN_STIFFNESS`]; damping is never negative.
//! 2. Once at rest, `position() == target()` exactly and ticking is a no-op
//!    until `set_target()` or `reset()`.

use std::time::Duration;

use super::Animation;

/// Largest integration step, in seconds.
const MAX_STEP_SECS: f64 = 0.004;

/// Distance from target below which the spring may rest.
const REST_THRESHOLD: f64 = 0.001;

/// Speed below which the spring may rest.
const VELOCITY_THRESHOLD: f64 = 0.01;

/// Lower bound for stiffness.
pub const MIN_STIFFNESS: f64 = 0.1;

/// A damped harmonic oscillator.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring at `initial` heading for `target`.
    ///
    /// Defaults to stiffness 170 and damping 26, a slightly underdamped
    /// response.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: 170.0,
            damping: 26.0,
            at_rest: initial == target,
        }
    }

    /// Set stiffness (builder pattern).
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern).
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Retarget; wakes the spring.
    pub fn set_target(&mut self, target: f64) {
        if self.target != target {
            self.target = target;
            self.at_rest = false;
        }
    }

    fn step(&mut self, dt: f64) {
        let acceleration =
            -self.stiffness * (self.position - self.target) - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECS);
            self.step(step);
            remaining -= step;
        }

        if (self.position - self.target).abs() < REST_THRESHOLD
            && self.velocity.abs() < VELOCITY_THRESHOLD
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f32 {
        (self.position as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = self.initial == self.target;
    }
}

/// Spring configurations used by the grid.
pub mod presets {
    use super::Spring;

    /// Critically damped decay from 1.0 to 0.0: the drop settle.
    #[must_use]
    pub fn settle() -> Spring {
        let k: f64 = 300.0;
        Spring::new(1.0, 0.0)
            .with_stiffness(k)
            .with_damping(2.0 * k.sqrt())
    }
}
