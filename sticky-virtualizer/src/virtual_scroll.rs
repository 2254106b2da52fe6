use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::sticky::{StickyFrame, next_sticky_state};
use crate::window::compute_window;
use crate::{
    BarrierPoll, Direction, HeightCache, LayoutHost, MeasurementBarrier, Parity, RenderWindow,
    RenderedSlot, Result, SlotStyle, StickyState, Viewport, VirtualScrollOptions, WindowState,
};

/// A headless virtual-scrolling engine with sticky items.
///
/// One instance drives one list. The adapter feeds it viewport geometry and "rendered set
/// changed" notifications, and polls it with timestamps:
///
/// 1. [`Self::on_scroll`]: derive the direction, re-measure the rendered items, recompute the
///    window, emit the [`RenderWindow`], and start a [`MeasurementBarrier`] wait.
/// 2. [`Self::tick`]: poll the barrier; once every rendered item is measurable, advance the
///    sticky state machine with the *current* scroll offset and direction.
///
/// `on_scroll` records the heights of the previously rendered slice before recomputing the
/// window, so newly rendered items use `min_row_height` for one pass. Heights the barrier picks
/// up re-run the window pass, so `content_height` always matches the height cache.
#[derive(Clone, Debug)]
pub struct VirtualScroll<T> {
    options: VirtualScrollOptions<T>,
    heights: HeightCache,
    window: WindowState,
    sticky: StickyState,
    barrier: MeasurementBarrier,
    scroll_offset: f64,
    direction: Direction,
    viewport_height: f64,
    container_width: f64,
    scroll_request: Option<f64>,
}

impl<T> VirtualScroll<T> {
    /// Creates an engine. Fails if the options are invalid.
    pub fn new(options: VirtualScrollOptions<T>) -> Result<Self> {
        options.validate()?;
        vdebug!(
            count = options.count(),
            min_row_height = options.min_row_height(),
            "VirtualScroll::new"
        );
        let mut v = Self {
            heights: HeightCache::new(options.count(), options.min_row_height()),
            window: WindowState::default(),
            sticky: StickyState::default(),
            barrier: MeasurementBarrier::new(options.config.retry),
            scroll_offset: 0.0,
            direction: Direction::Down,
            viewport_height: 0.0,
            container_width: 0.0,
            scroll_request: None,
            options,
        };
        v.relayout();
        Ok(v)
    }

    pub fn options(&self) -> &VirtualScrollOptions<T> {
        &self.options
    }

    /// Replaces the options.
    ///
    /// A new source sequence (different `Arc` or length) resets measurements and sticky state
    /// and requests a scroll back to the top. Invalid options are rejected and leave the engine
    /// untouched.
    pub fn set_options(&mut self, options: VirtualScrollOptions<T>) -> Result<()> {
        options.validate()?;
        let source_changed = !Arc::ptr_eq(&self.options.items, &options.items)
            || self.options.items.len() != options.items.len();
        self.options = options;
        vtrace!(
            count = self.options.count(),
            source_changed,
            "VirtualScroll::set_options"
        );

        self.heights
            .set_min_row_height(self.options.config.min_row_height);
        self.barrier.set_policy(self.options.config.retry);
        if !self.options.config.layout.supports_sticky() {
            self.sticky = StickyState::default();
        }

        if source_changed {
            self.reset_source();
        }
        self.relayout();
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut VirtualScrollOptions<T>),
    ) -> Result<()> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    /// Replaces the source sequence. Always counts as a new source.
    pub fn set_items(&mut self, items: impl Into<Arc<[T]>>) {
        self.options.items = items.into();
        self.reset_source();
        self.relayout();
    }

    fn reset_source(&mut self) {
        vdebug!(count = self.options.count(), "VirtualScroll: source reset");
        self.heights.reset(self.options.count());
        self.sticky = StickyState::default();
        self.barrier.cancel();
        if self.scroll_offset != 0.0 {
            self.scroll_request = Some(0.0);
        }
        self.scroll_offset = 0.0;
        self.direction = Direction::Down;
    }

    pub fn items(&self) -> &[T] {
        &self.options.items
    }

    pub fn count(&self) -> usize {
        self.options.items.len()
    }

    pub fn min_row_height(&self) -> f64 {
        self.options.config.min_row_height
    }

    pub fn heights(&self) -> &HeightCache {
        &self.heights
    }

    pub fn window(&self) -> WindowState {
        self.window
    }

    pub fn sticky(&self) -> &StickyState {
        &self.sticky
    }

    pub fn barrier(&self) -> &MeasurementBarrier {
        &self.barrier
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Number of items in the normal slice (the pinned duplicate is not counted).
    pub fn rendered_len(&self) -> usize {
        self.window.len()
    }

    /// Translation that keeps a table header at the top of the viewport.
    ///
    /// Only meaningful for [`crate::Layout::Table`]; `None` otherwise.
    pub fn header_offset(&self) -> Option<f64> {
        if self.options.config.layout.supports_sticky() {
            return None;
        }
        let d = self.window.padding_top - self.scroll_offset;
        Some(if d < 0.0 { -d } else { d })
    }

    /// Takes the pending scroll-to request, if any.
    ///
    /// The engine asks for a scroll to the top after the source changes; the adapter should
    /// apply it to the real scroll container.
    pub fn take_scroll_request(&mut self) -> Option<f64> {
        self.scroll_request.take()
    }

    /// The current render window (normal slice only).
    pub fn render_window(&self) -> RenderWindow<'_, T> {
        let range = self.window.range();
        let items = &self.options.items[range];
        RenderWindow {
            items,
            start_index: self.window.start_index,
            end_index: self.window.end_index,
            length: items.len(),
        }
    }

    /// Iterates the rendered set in render order: the normal slice, then the pinned duplicate.
    pub fn for_each_rendered_slot(&self, mut f: impl FnMut(RenderedSlot)) {
        for index in self.window.range() {
            f(RenderedSlot {
                slot: index,
                index,
                pinned: false,
            });
        }
        if let Some(current) = self.sticky.current() {
            f(RenderedSlot {
                slot: current.render_slot,
                index: current.source_index,
                pinned: true,
            });
        }
    }

    /// Collects the rendered set into `out` (clears `out` first).
    pub fn collect_rendered_slots(&self, out: &mut Vec<RenderedSlot>) {
        out.clear();
        self.for_each_rendered_slot(|s| out.push(s));
    }

    /// Handles a scroll notification from the host.
    pub fn on_scroll<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        viewport: Viewport,
        now_ms: u64,
    ) {
        let offset = viewport.scroll_offset.max(0.0);
        self.direction = Direction::between(self.scroll_offset, offset);
        self.scroll_offset = offset;
        self.viewport_height = viewport.height;
        self.container_width = viewport.width;
        vtrace!(offset, direction = ?self.direction, now_ms, "on_scroll");

        self.record_rendered_heights(host);
        self.relayout();
        self.apply_slot_styles(host);
        self.on_items_rendered(now_ms);
    }

    /// Handles a "rendered item set changed" notification: starts a new barrier wait over the
    /// currently rendered items, superseding any wait in flight.
    pub fn on_items_rendered(&mut self, now_ms: u64) {
        self.barrier.begin(self.window.range(), now_ms);
    }

    /// Records a container width change. A resize re-measures the rendered items and re-runs
    /// the window pass. Returns whether the width changed.
    pub fn set_container_width<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        width: f64,
    ) -> bool {
        if self.container_width == width {
            return false;
        }
        vtrace!(width, "set_container_width");
        self.container_width = width;
        self.record_rendered_heights(host);
        self.relayout();
        self.apply_slot_styles(host);
        true
    }

    /// Polls the measurement barrier and, once it resolves, advances the sticky state.
    ///
    /// On exhaustion the sticky state still advances: unmeasured items keep their cached
    /// height or fall back to `min_row_height`. The error is returned for the host to log.
    pub fn tick<H: LayoutHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) -> BarrierPoll {
        let heights = &mut self.heights;
        let mut measured_changed = false;
        let poll = self.barrier.poll(now_ms, |index| match host.measure_height(index) {
            Some(height) => {
                measured_changed |= heights.set(index, height);
                true
            }
            None => false,
        });

        // The window must agree with the cache before the sticky frame reads it.
        if measured_changed {
            self.relayout();
            self.apply_slot_styles(host);
        }
        if poll.is_settled() {
            self.evaluate_sticky(host);
        }
        poll
    }

    /// Runs the sticky state machine against the current geometry.
    ///
    /// When the pinned item changes, the window is recomputed so the pinned slot is added or
    /// removed. Returns whether the pinned item changed.
    pub fn evaluate_sticky<H: LayoutHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let next = {
            let is_sticky: &dyn Fn(usize) -> bool = match &self.options.is_sticky {
                Some(f) => f.as_ref(),
                None => &never_sticky,
            };
            let frame = StickyFrame {
                window: self.window,
                scroll_offset: self.scroll_offset,
                heights: &self.heights,
                is_sticky,
                enabled: self.options.config.layout.supports_sticky(),
            };
            next_sticky_state(&self.sticky, &frame, self.direction)
        };

        let changed = next.pinned_index() != self.sticky.pinned_index();
        self.sticky = next;
        if changed {
            self.relayout();
            self.apply_slot_styles(host);
        }
        changed
    }

    /// Hands the current slot styling to the host.
    pub fn apply_slot_styles<H: LayoutHost + ?Sized>(&self, host: &mut H) {
        let min_height = self.options.config.min_row_height;
        for index in self.window.range() {
            host.apply_slot_style(
                index,
                SlotStyle {
                    min_height,
                    parity: Parity::of(index),
                },
            );
        }
    }

    fn record_rendered_heights<H: LayoutHost + ?Sized>(&mut self, host: &mut H) {
        for index in self.window.range() {
            match host.measure_height(index) {
                Some(height) => {
                    self.heights.set(index, height);
                }
                None => {
                    vtrace!(index, "measurement unavailable, keeping previous height");
                }
            }
        }
    }

    fn relayout(&mut self) {
        self.window = compute_window(
            self.scroll_offset,
            self.viewport_height,
            self.options.config.min_row_height,
            &self.heights,
            self.count(),
        );
        self.sticky.set_render_slot(self.window.end_index + 1);

        if let Some(cb) = &self.options.on_render {
            cb(&self.render_window());
        }
    }
}

fn never_sticky(_: usize) -> bool {
    false
}
