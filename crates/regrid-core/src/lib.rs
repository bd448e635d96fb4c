#![forbid(unsafe_code)]

//! Core: geometry, pointer input, and press-drag gesture recognition.
//!
//! # Role in regrid
//! `regrid-core` is the input layer. It owns the coordinate types every other
//! crate speaks, the raw [`event::PointerEvent`] hosts feed in, and the
//! [`gesture::PressDragRecognizer`] that turns those events into the
//! press / sample / end / cancel stream the drag state machine consumes.
//!
//! # How it fits in the system
//! `regrid-layout` builds candidate slot rectangles out of [`geometry::Rect`];
//! `regrid-widgets` drives its drag state machine from
//! [`gesture::GestureEvent`]s and settles drops with
//! [`animation::spring::Spring`].

pub mod animation;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
