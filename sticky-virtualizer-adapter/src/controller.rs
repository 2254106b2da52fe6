use sticky_virtualizer::{
    BarrierPoll, Error, LayoutHost, Result, Viewport, VirtualScroll, VirtualScrollOptions,
};

use crate::{Clock, StickyOverlay, settle};

/// A framework-neutral controller that wraps a `sticky_virtualizer::VirtualScroll` and owns the
/// clock that drives its measurement barrier.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_scroll` when the scroll container reports a new offset or size
/// - `settle().await` (or `tick` from a frame loop) until the barrier resolves
///
/// `scroll` does both in one call.
#[derive(Clone, Debug)]
pub struct Controller<T> {
    v: VirtualScroll<T>,
    clock: Clock,
    last_error: Option<Error>,
}

impl<T> Controller<T> {
    pub fn new(options: VirtualScrollOptions<T>) -> Result<Self> {
        Ok(Self::from_engine(VirtualScroll::new(options)?))
    }

    pub fn from_engine(v: VirtualScroll<T>) -> Self {
        Self {
            v,
            clock: Clock::new(),
            last_error: None,
        }
    }

    pub fn engine(&self) -> &VirtualScroll<T> {
        &self.v
    }

    pub fn engine_mut(&mut self) -> &mut VirtualScroll<T> {
        &mut self.v
    }

    pub fn into_engine(self) -> VirtualScroll<T> {
        self.v
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// The error from the most recent barrier wait that ran out of retries, if any.
    ///
    /// Cleared by the next wait that resolves.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Call this when the UI reports a scroll offset or viewport size change.
    ///
    /// Starts a new barrier wait, superseding any wait in flight.
    pub fn on_scroll<H: LayoutHost + ?Sized>(&mut self, host: &mut H, viewport: Viewport) {
        let now_ms = self.clock.now_ms();
        self.v.on_scroll(host, viewport, now_ms);
    }

    /// Call this when the rendered item set changed without a scroll (e.g. content reflow).
    pub fn on_items_rendered(&mut self) {
        let now_ms = self.clock.now_ms();
        self.v.on_items_rendered(now_ms);
    }

    /// Polls the barrier once without waiting. Suited to frame loops.
    pub fn tick<H: LayoutHost + ?Sized>(&mut self, host: &mut H) -> BarrierPoll {
        let poll = self.v.tick(host, self.clock.now_ms());
        self.record(&poll);
        poll
    }

    /// Waits for the barrier on the tokio timer and advances the sticky state.
    pub async fn settle<H: LayoutHost + ?Sized>(&mut self, host: &mut H) -> BarrierPoll {
        let poll = settle(&mut self.v, host, &self.clock).await;
        self.record(&poll);
        poll
    }

    /// Runs one full tick: scroll, window, barrier, sticky.
    pub async fn scroll<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        viewport: Viewport,
    ) -> BarrierPoll {
        self.on_scroll(host, viewport);
        self.settle(host).await
    }

    /// Geometry of the pinned duplicate, if an item is pinned.
    pub fn overlay(&self) -> Option<StickyOverlay> {
        StickyOverlay::for_engine(&self.v)
    }

    /// Scroll position the host should apply to the real container (after a source reset).
    pub fn take_scroll_request(&mut self) -> Option<f64> {
        self.v.take_scroll_request()
    }

    fn record(&mut self, poll: &BarrierPoll) {
        match poll {
            BarrierPoll::Ready => self.last_error = None,
            BarrierPoll::Exhausted(err) => self.last_error = Some(err.clone()),
            BarrierPoll::Idle | BarrierPoll::Pending { .. } => {}
        }
    }
}
