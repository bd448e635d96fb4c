#![forbid(unsafe_code)]

//! Press-then-drag gesture recognition.
//!
//! [`PressDragRecognizer`] turns raw [`PointerEvent`] sequences into the
//! [`GestureEvent`] stream a reorderable grid reacts to: a drag only begins
//! after the pointer has been held (mostly) still for the configured press
//! duration.
//!
//! # State Machine
//!
//! ```text
//!   Idle ──Down──▶ Pending ──(held ≥ press_duration)──▶ Active
//!                    │                                    │
//!                    ├──moved > slop──▶ Failed            ├──Move──▶ DragSample
//!                    │                    │               ├──Up────▶ DragEnded
//!                    └──Up──▶ Idle        └──Up──▶ Idle   └──Cancel▶ DragCancelled
//! ```
//!
//! The press timer is polled: call [`check_press`](PressDragRecognizer::check_press)
//! on every tick. Any later pointer event also promotes an overdue press
//! before it is handled, so a host that only forwards events still observes
//! the press first.
//!
//! # Invariants
//!
//! 1. `DragSample`, `DragEnded` and `DragCancelled` are only emitted after a
//!    `PressRecognized` for the same pointer-down.
//! 2. `PressRecognized` fires at most once per pointer-down.
//! 3. After `Up`, `Cancel`, or `reset()`, the recognizer is idle.
//! 4. A pointer that strays farther than `slop` before the press is
//!    recognized never produces a drag for that pointer-down.

use std::time::Duration;

use web_time::Instant;

use crate::event::PointerEvent;
use crate::geometry::{Point, Vector};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for press-then-drag recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressConfig {
    /// How long the pointer must be held before a drag is recognized (default: 500ms).
    pub press_duration: Duration,
    /// Maximum travel from the press origin while waiting for the press (default: 10.0).
    pub slop: f32,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            press_duration: Duration::from_millis(500),
            slop: 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// High-level gesture events consumed by the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The press was held long enough; a drag may start at `origin`.
    PressRecognized { origin: Point },
    /// The pointer moved during an active drag.
    DragSample { translation: Vector },
    /// The pointer was lifted during an active drag.
    DragEnded { translation: Vector },
    /// The active drag was taken away by the platform.
    DragCancelled,
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Pending { origin: Point, since: Instant },
    /// Pointer still down, but recognition already failed.
    Failed,
    Active { origin: Point, last: Vector },
}

// ---------------------------------------------------------------------------
// PressDragRecognizer
// ---------------------------------------------------------------------------

/// Stateful press-then-drag recognizer.
#[derive(Debug, Clone)]
pub struct PressDragRecognizer {
    config: PressConfig,
    phase: Phase,
}

impl PressDragRecognizer {
    /// Create a new recognizer with the given configuration.
    #[must_use]
    pub fn new(config: PressConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
        }
    }

    /// Process a raw pointer event, returning any gesture events produced.
    pub fn process(&mut self, event: &PointerEvent, now: Instant) -> Vec<GestureEvent> {
        let mut out = Vec::with_capacity(2);

        match *event {
            PointerEvent::Down(pos) => {
                // A second down without an up: the previous interaction is lost.
                if matches!(self.phase, Phase::Active { .. }) {
                    out.push(GestureEvent::DragCancelled);
                }
                self.phase = Phase::Pending {
                    origin: pos,
                    since: now,
                };
            }
            PointerEvent::Move(pos) => {
                self.promote_if_due(now, &mut out);
                self.on_move(pos, &mut out);
            }
            PointerEvent::Up(pos) => {
                self.promote_if_due(now, &mut out);
                if let Phase::Active { origin, .. } = self.phase {
                    out.push(GestureEvent::DragEnded {
                        translation: pos - origin,
                    });
                }
                self.phase = Phase::Idle;
            }
            PointerEvent::Cancel => {
                if matches!(self.phase, Phase::Active { .. }) {
                    out.push(GestureEvent::DragCancelled);
                }
                self.phase = Phase::Idle;
            }
        }

        out
    }

    /// Check the press timer. Call periodically (e.g., on tick).
    ///
    /// Returns `Some(PressRecognized { .. })` once the pointer has been held
    /// beyond the configured press duration.
    pub fn check_press(&mut self, now: Instant) -> Option<GestureEvent> {
        let Phase::Pending { origin, since } = self.phase else {
            return None;
        };
        if now.saturating_duration_since(since) < self.config.press_duration {
            return None;
        }
        self.phase = Phase::Active {
            origin,
            last: Vector::ZERO,
        };
        Some(GestureEvent::PressRecognized { origin })
    }

    /// Whether a drag is currently in progress.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    /// Whether a press is waiting on the timer.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    /// Reset to idle without emitting anything.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PressConfig {
        &self.config
    }
}

impl Default for PressDragRecognizer {
    fn default() -> Self {
        Self::new(PressConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl PressDragRecognizer {
    fn promote_if_due(&mut self, now: Instant, out: &mut Vec<GestureEvent>) {
        if let Some(event) = self.check_press(now) {
            out.push(event);
        }
    }

    fn on_move(&mut self, pos: Point, out: &mut Vec<GestureEvent>) {
        match self.phase {
            Phase::Pending { origin, .. } => {
                if origin.distance(pos) > self.config.slop {
                    self.phase = Phase::Failed;
                }
            }
            Phase::Active { origin, last } => {
                let translation = pos - origin;
                if translation != last {
                    out.push(GestureEvent::DragSample { translation });
                    self.phase = Phase::Active {
                        origin,
                        last: translation,
                    };
                }
            }
            Phase::Idle | Phase::Failed => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
