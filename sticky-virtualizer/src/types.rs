/// Scroll direction, derived by comparing the current offset with the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    #[default]
    Down,
}

impl Direction {
    /// `Up` when the offset decreased, `Down` otherwise (including no movement).
    pub fn between(previous_offset: f64, offset: f64) -> Self {
        if offset < previous_offset {
            Self::Up
        } else {
            Self::Down
        }
    }
}

/// Result of one window pass.
///
/// `end_index` is inclusive. For an empty source every field is zero and [`Self::range`] is
/// empty.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState {
    pub start_index: usize,
    pub end_index: usize,
    /// Sum of resolved heights of items `[0, start_index)`.
    pub padding_top: f64,
    /// Sum of resolved heights of all items.
    pub content_height: f64,
    /// Item count the window was computed for.
    pub count: usize,
}

impl WindowState {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Source indexes of the normal slice.
    pub fn range(&self) -> core::ops::Range<usize> {
        if self.is_empty() {
            0..0
        } else {
            self.start_index..self.end_index + 1
        }
    }

    pub fn len(&self) -> usize {
        self.range().len()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    /// Height of the content from the top of the rendered slice to the end.
    pub fn remaining_height(&self) -> f64 {
        (self.content_height - self.padding_top).max(0.0)
    }
}

/// Emitted once per completed window pass.
///
/// `items` is the normal slice only; the pinned duplicate is never part of it.
#[derive(Debug, PartialEq)]
pub struct RenderWindow<'a, T> {
    pub items: &'a [T],
    pub start_index: usize,
    pub end_index: usize,
    pub length: usize,
}

impl<T> Clone for RenderWindow<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RenderWindow<'_, T> {}

/// One element of the rendered set, in render order.
///
/// `slot` is the virtual rendering position. The pinned sticky duplicate (if any) comes last
/// with `pinned == true` and `slot == end_index + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedSlot {
    pub slot: usize,
    pub index: usize,
    pub pinned: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    /// Parity of the 1-based position of `index` in the source.
    pub fn of(index: usize) -> Self {
        if (index + 1) % 2 == 0 {
            Self::Even
        } else {
            Self::Odd
        }
    }
}

/// Per-slot styling handed to [`crate::LayoutHost::apply_slot_style`] after each window pass.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotStyle {
    pub min_height: f64,
    pub parity: Parity,
}

/// Viewport geometry as read from the scroll container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub scroll_offset: f64,
    pub height: f64,
    /// Only used to detect resizes; the windowing math ignores it.
    pub width: f64,
}

impl Viewport {
    pub fn new(scroll_offset: f64, height: f64, width: f64) -> Self {
        Self {
            scroll_offset,
            height,
            width,
        }
    }
}
