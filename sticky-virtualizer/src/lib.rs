//! A headless virtual-scrolling engine with sticky items.
//!
//! The engine renders only the slice of a long, variably sized list that intersects a
//! fixed-height viewport, and lets designated items pin to the top of the viewport while the
//! list scrolls past them. When the next sticky item arrives it pushes the pinned one upward
//! (`diff_top`) until it is fully displaced and takes over; scrolling back reverses the hand-off
//! step for step.
//!
//! It is UI-agnostic. The binding layer is expected to provide (via [`LayoutHost`]):
//! - the rendered height of an item, when its element is laid out
//! - scroll offset, viewport height and container width (as a [`Viewport`])
//! - a notification when the rendered item set changes
//!
//! Building blocks, usable on their own:
//! - [`HeightCache`]: last-measured heights with a `min_row_height` fallback
//! - [`compute_window`]: scroll offset → render window
//! - [`MeasurementBarrier`]: bounded-retry wait for layout to converge
//! - [`next_sticky_state`]: the sticky state machine as a pure transition function
//!
//! [`VirtualScroll`] ties them together. For an async driver and overlay geometry, see the
//! `sticky-virtualizer-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod barrier;
mod error;
mod height_cache;
mod host;
mod options;
mod sticky;
mod types;
mod virtual_scroll;
mod window;


pub use barrier::{BarrierPoll, MeasurementBarrier, RetryPolicy};
pub use error::{Error, Result};
pub use height_cache::HeightCache;
pub use host::LayoutHost;
pub use options::{
    DEFAULT_MIN_ROW_HEIGHT, HeightHint, Layout, OnRenderCallback, ScrollConfig, StickyPredicate,
    VirtualScrollOptions, parse_min_row_height,
};
pub use sticky::{StickyFrame, StickyItem, StickyPhase, StickyState, next_sticky_state};
pub use types::{Direction, Parity, RenderWindow, RenderedSlot, SlotStyle, Viewport, WindowState};
pub use virtual_scroll::VirtualScroll;
pub use window::{OVERSCAN, compute_window, max_window_len, rows_per_viewport};
