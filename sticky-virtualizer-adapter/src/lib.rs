//! Adapter utilities for the `sticky-virtualizer` crate.
//!
//! The `sticky-virtualizer` crate is UI-agnostic: it does the window and sticky math and polls
//! its measurement barrier with caller-supplied timestamps. This crate provides the pieces an
//! adapter needs on top of that:
//!
//! - An async driver that waits out the measurement barrier on the `tokio` timer
//! - A [`Controller`] that runs one full scroll tick (scroll, window, barrier, sticky)
//! - Pinned-overlay geometry for renderers that draw the sticky item themselves
//!
//! No UI framework bindings live here.
#![forbid(unsafe_code)]

mod controller;
mod overlay;
mod settle;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use overlay::StickyOverlay;
pub use settle::{Clock, settle};
