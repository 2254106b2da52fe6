use sticky_virtualizer::{StickyState, VirtualScroll};

/// Where to draw the pinned item, for renderers that position it themselves.
///
/// `top` is the item's position inside the scrolled content: the scroll offset minus the
/// amount the incoming item has pushed it up. `clip` is the part still visible.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StickyOverlay {
    pub index: usize,
    pub render_slot: usize,
    pub top: f64,
    pub clip: f64,
}

impl StickyOverlay {
    pub fn from_state(state: &StickyState, scroll_offset: f64) -> Option<Self> {
        let current = state.current()?;
        Some(Self {
            index: current.source_index,
            render_slot: current.render_slot,
            top: scroll_offset - current.diff_top,
            clip: current.visible_height(),
        })
    }

    pub fn for_engine<T>(v: &VirtualScroll<T>) -> Option<Self> {
        Self::from_state(v.sticky(), v.scroll_offset())
    }

    /// Whether any part of the pinned item is still on screen.
    pub fn is_visible(&self) -> bool {
        self.clip > 0.0
    }
}
