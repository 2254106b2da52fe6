//! Sticky item state machine.
//!
//! The whole controller is the pure function [`next_sticky_state`]: it takes the previous
//! [`StickyState`], the geometry of the current tick ([`StickyFrame`]) and the scroll
//! [`Direction`], and returns the new state. Items are referenced by source index, so there are
//! no back-pointers between the previous/current/next records.

use crate::{Direction, HeightCache, WindowState};

/// A sticky-capable item captured at the moment it became current or next.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StickyItem {
    pub source_index: usize,
    /// Cumulative resolved height of the items before `source_index`.
    pub offset_top: f64,
    pub height: f64,
    /// How far the incoming item has pushed this one upward, in `[0, height]`.
    pub diff_top: f64,
    /// Virtual position of the pinned duplicate, right after the normal slice.
    pub render_slot: usize,
}

impl StickyItem {
    fn capture(index: usize, offset_top: f64, frame: &StickyFrame<'_>) -> Self {
        Self {
            source_index: index,
            offset_top,
            height: frame.heights.resolve(index),
            diff_top: 0.0,
            render_slot: frame.window.end_index + 1,
        }
    }

    /// Part of the item still visible at the top of the viewport.
    pub fn visible_height(&self) -> f64 {
        (self.height - self.diff_top).max(0.0)
    }

    pub fn is_fully_pinned(&self) -> bool {
        self.diff_top <= 0.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StickyPhase {
    #[default]
    NoSticky,
    /// `current` is fully pinned. `next` is the following sticky-capable item, once known.
    Sticking {
        current: StickyItem,
        next: Option<StickyItem>,
    },
    /// `next` is pushing `current` off (`current.diff_top > 0`).
    Transitioning {
        current: StickyItem,
        next: StickyItem,
    },
}

/// Sticky state for one list.
///
/// `previous` is only kept after a downward hand-off, so that reversing direction can reinstate
/// the outgoing item mid-push-off instead of rescanning.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StickyState {
    phase: StickyPhase,
    previous: Option<StickyItem>,
}

impl StickyState {
    fn pinned(current: StickyItem, next: Option<StickyItem>, previous: Option<StickyItem>) -> Self {
        let phase = match next {
            Some(next) if !current.is_fully_pinned() => {
                StickyPhase::Transitioning { current, next }
            }
            _ => StickyPhase::Sticking { current, next },
        };
        Self { phase, previous }
    }

    pub fn phase(&self) -> &StickyPhase {
        &self.phase
    }

    pub fn current(&self) -> Option<&StickyItem> {
        match &self.phase {
            StickyPhase::NoSticky => None,
            StickyPhase::Sticking { current, .. } | StickyPhase::Transitioning { current, .. } => {
                Some(current)
            }
        }
    }

    pub fn next(&self) -> Option<&StickyItem> {
        match &self.phase {
            StickyPhase::NoSticky => None,
            StickyPhase::Sticking { next, .. } => next.as_ref(),
            StickyPhase::Transitioning { next, .. } => Some(next),
        }
    }

    pub fn previous(&self) -> Option<&StickyItem> {
        self.previous.as_ref()
    }

    pub fn is_sticking(&self) -> bool {
        self.current().is_some()
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, StickyPhase::Transitioning { .. })
    }

    /// Source index of the pinned item.
    pub fn pinned_index(&self) -> Option<usize> {
        self.current().map(|c| c.source_index)
    }

    pub(crate) fn set_render_slot(&mut self, slot: usize) {
        match &mut self.phase {
            StickyPhase::NoSticky => {}
            StickyPhase::Sticking { current, .. } | StickyPhase::Transitioning { current, .. } => {
                current.render_slot = slot;
            }
        }
    }
}

/// Geometry and capabilities the state machine reads during one tick.
pub struct StickyFrame<'a> {
    pub window: WindowState,
    pub scroll_offset: f64,
    pub heights: &'a HeightCache,
    pub is_sticky: &'a dyn Fn(usize) -> bool,
    /// `false` for layouts that cannot pin items (e.g. tables); forces `NoSticky`.
    pub enabled: bool,
}

impl core::fmt::Debug for StickyFrame<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StickyFrame")
            .field("window", &self.window)
            .field("scroll_offset", &self.scroll_offset)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl StickyFrame<'_> {
    /// First sticky-capable item of the window whose top is at or above the scroll offset.
    fn scan_window(&self, exclude: Option<usize>) -> Option<StickyItem> {
        let mut offset_top = self.window.padding_top;
        for i in self.window.range() {
            if Some(i) != exclude && (self.is_sticky)(i) && offset_top <= self.scroll_offset {
                return Some(StickyItem::capture(i, offset_top, self));
            }
            offset_top += self.heights.resolve(i);
        }
        None
    }

    /// Nearest sticky-capable item of the window after `index`.
    fn find_next(&self, index: usize) -> Option<StickyItem> {
        let mut offset_top = self.window.padding_top;
        for i in self.window.range() {
            if i > index && (self.is_sticky)(i) {
                return Some(StickyItem::capture(i, offset_top, self));
            }
            offset_top += self.heights.resolve(i);
        }
        None
    }

    /// Nearest sticky-capable item at or before the top of the window.
    fn find_preceding(&self, exclude: usize) -> Option<StickyItem> {
        let last = self.window.start_index.min(self.window.count.saturating_sub(1));
        (0..=last)
            .rev()
            .filter(|&i| i != exclude && (self.is_sticky)(i))
            .map(|i| (i, self.heights.offset_of(i)))
            .find(|&(_, offset_top)| offset_top <= self.scroll_offset)
            .map(|(i, offset_top)| StickyItem::capture(i, offset_top, self))
    }

    /// Scroll distance past the top of the rendered slice.
    fn scrolled_into_window(&self) -> f64 {
        abs(self.scroll_offset - self.window.padding_top)
    }
}

/// Advances the sticky state by one settled tick.
pub fn next_sticky_state(
    state: &StickyState,
    frame: &StickyFrame<'_>,
    direction: Direction,
) -> StickyState {
    if !frame.enabled || frame.window.is_empty() {
        if state.is_sticking() {
            vdebug!(enabled = frame.enabled, "sticky: reset");
        }
        return StickyState::default();
    }

    let (current, next) = match state.phase {
        StickyPhase::NoSticky => {
            let Some(current) = frame.scan_window(None) else {
                return StickyState::default();
            };
            vdebug!(index = current.source_index, "sticky: pinned");
            let next = frame.find_next(current.source_index);
            return StickyState::pinned(current, next, None);
        }
        StickyPhase::Sticking { current, next } => (current, next),
        StickyPhase::Transitioning { current, next } => (current, Some(next)),
    };
    let next = next.or_else(|| frame.find_next(current.source_index));

    if direction == Direction::Down || !current.is_fully_pinned() {
        push_off(current, next, state.previous, frame)
    } else {
        unwind(current, next, state.previous, frame)
    }
}

fn push_off(
    mut current: StickyItem,
    next: Option<StickyItem>,
    previous: Option<StickyItem>,
    frame: &StickyFrame<'_>,
) -> StickyState {
    let offset_bottom = frame.window.padding_top + current.height + frame.scrolled_into_window();

    let Some(incoming) = next.filter(|n| offset_bottom >= n.offset_top) else {
        current.diff_top = 0.0;
        return StickyState::pinned(current, next, previous);
    };

    let diff_top = offset_bottom - incoming.offset_top;
    if diff_top > current.height {
        current.diff_top = current.height;
        let mut incoming = incoming;
        incoming.diff_top = 0.0;
        let following = frame.find_next(incoming.source_index);
        vdebug!(
            from = current.source_index,
            to = incoming.source_index,
            "sticky: hand-off"
        );
        return StickyState::pinned(incoming, following, Some(current));
    }

    current.diff_top = diff_top;
    vtrace!(index = current.source_index, diff_top, "sticky: push-off");
    StickyState::pinned(current, next, previous)
}

fn unwind(
    current: StickyItem,
    next: Option<StickyItem>,
    previous: Option<StickyItem>,
    frame: &StickyFrame<'_>,
) -> StickyState {
    let scrolled = frame.scrolled_into_window();
    let offset_bottom = frame.window.padding_top + scrolled;
    if offset_bottom > current.offset_top {
        return StickyState::pinned(current, next, previous);
    }

    let restored = previous.or_else(|| {
        frame
            .scan_window(Some(current.source_index))
            .or_else(|| frame.find_preceding(current.source_index))
    });
    let Some(mut restored) = restored else {
        vdebug!(index = current.source_index, "sticky: released");
        return StickyState::default();
    };

    let mut incoming = current;
    incoming.diff_top = 0.0;
    let push = frame.window.padding_top + restored.height + scrolled - incoming.offset_top;
    restored.diff_top = push.clamp(0.0, restored.height);
    vdebug!(
        from = incoming.source_index,
        to = restored.source_index,
        diff_top = restored.diff_top,
        "sticky: reversed hand-off"
    );
    StickyState::pinned(restored, Some(incoming), None)
}

fn abs(x: f64) -> f64 {
    if x < 0.0 { -x } else { x }
}
