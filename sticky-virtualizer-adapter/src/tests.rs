use crate::*;

use std::collections::HashMap;

use sticky_virtualizer::{
    BarrierPoll, Error, LayoutHost, RetryPolicy, StickyState, Viewport, VirtualScrollOptions,
};

/// Rows 0..10 are 40 tall, the rest 50. Item 10 starts at 400, item 20 at 900.
struct Host {
    heights: Vec<f64>,
    /// Remaining failed measurements per index.
    failures: HashMap<usize, usize>,
}

impl Host {
    fn sectioned(count: usize) -> Self {
        Self {
            heights: (0..count).map(|i| if i < 10 { 40.0 } else { 50.0 }).collect(),
            failures: HashMap::new(),
        }
    }

    fn failing(mut self, index: usize, times: usize) -> Self {
        self.failures.insert(index, times);
        self
    }
}

impl LayoutHost for Host {
    fn measure_height(&mut self, index: usize) -> Option<f64> {
        if let Some(left) = self.failures.get_mut(&index) {
            if *left > 0 {
                *left -= 1;
                return None;
            }
        }
        self.heights.get(index).copied()
    }
}

fn is_header(i: usize) -> bool {
    i > 0 && i % 10 == 0
}

fn options(count: usize) -> VirtualScrollOptions<usize> {
    let items: Vec<usize> = (0..count).collect();
    VirtualScrollOptions::new(items).with_is_sticky(is_header)
}

fn viewport(offset: f64) -> Viewport {
    Viewport::new(offset, 400.0, 320.0)
}

#[tokio::test(start_paused = true)]
async fn settle_without_pending_wait_is_idle() {
    let mut c = Controller::new(options(40)).unwrap();
    let mut host = Host::sectioned(40);
    assert_eq!(c.settle(&mut host).await, BarrierPoll::Idle);
    assert_eq!(c.now_ms(), 0);
}

#[tokio::test(start_paused = true)]
async fn scroll_pins_header_and_reports_overlay() {
    let mut c = Controller::new(options(40)).unwrap();
    let mut host = Host::sectioned(40);

    assert_eq!(c.scroll(&mut host, viewport(0.0)).await, BarrierPoll::Ready);
    assert_eq!(c.overlay(), None);

    assert_eq!(c.scroll(&mut host, viewport(400.0)).await, BarrierPoll::Ready);
    assert_eq!(
        c.overlay(),
        Some(StickyOverlay {
            index: 10,
            render_slot: 23,
            top: 400.0,
            clip: 50.0,
        })
    );

    // Item 20 pushes item 10 up by 20px.
    assert_eq!(c.scroll(&mut host, viewport(870.0)).await, BarrierPoll::Ready);
    let overlay = c.overlay().unwrap();
    assert_eq!(overlay.index, 10);
    assert_eq!(overlay.render_slot, 32);
    assert_eq!(overlay.top, 850.0);
    assert_eq!(overlay.clip, 30.0);
    assert!(overlay.is_visible());
    assert!(c.engine().sticky().is_transitioning());
}

#[tokio::test(start_paused = true)]
async fn settle_backs_off_on_virtual_time() {
    let mut c = Controller::new(options(40)).unwrap();
    let mut host = Host::sectioned(40).failing(5, 2);

    assert_eq!(c.scroll(&mut host, viewport(0.0)).await, BarrierPoll::Ready);
    // Two failures: 4ms, then 8ms.
    assert!(c.now_ms() >= 12);
    assert_eq!(c.engine().barrier().attempts(), 3);
    assert_eq!(c.engine().heights().get(5), Some(40.0));
    assert!(c.last_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn settle_gives_up_after_retry_budget() {
    let mut c = Controller::new(options(40).with_retry_policy(RetryPolicy {
        initial_delay_ms: 4,
        max_delay_ms: 64,
        max_attempts: 3,
    }))
    .unwrap();
    let mut host = Host::sectioned(40).failing(5, usize::MAX);

    let expected = Error::MeasurementUnavailable {
        index: 5,
        attempts: 3,
    };
    assert_eq!(
        c.scroll(&mut host, viewport(0.0)).await,
        BarrierPoll::Exhausted(expected.clone())
    );
    assert_eq!(c.last_error(), Some(&expected));
    assert!(c.now_ms() >= 12);
    assert_eq!(c.engine().heights().get(5), None);
    assert!(!c.engine().barrier().is_waiting());

    host.failures.clear();
    assert_eq!(c.scroll(&mut host, viewport(0.0)).await, BarrierPoll::Ready);
    assert!(c.last_error().is_none());
    assert_eq!(c.engine().heights().get(5), Some(40.0));
}

#[tokio::test(start_paused = true)]
async fn newer_scroll_supersedes_pending_wait() {
    let mut c = Controller::new(options(40)).unwrap();
    let mut host = Host::sectioned(40).failing(15, 1);
    assert_eq!(c.scroll(&mut host, viewport(0.0)).await, BarrierPoll::Ready);

    c.on_scroll(&mut host, viewport(400.0));
    assert!(matches!(c.tick(&mut host), BarrierPoll::Pending { .. }));
    assert!(!c.engine().sticky().is_sticking());

    c.on_scroll(&mut host, viewport(420.0));
    assert_eq!(c.engine().barrier().attempts(), 0);
    assert_eq!(c.engine().barrier().candidates().first(), Some(&10));

    assert_eq!(c.settle(&mut host).await, BarrierPoll::Ready);
    assert_eq!(c.engine().barrier().attempts(), 1);
    let overlay = c.overlay().unwrap();
    assert_eq!(overlay.index, 10);
    assert_eq!(overlay.top, 420.0);
    assert_eq!(overlay.clip, 50.0);
}

#[tokio::test(start_paused = true)]
async fn frame_loop_tick_matches_settle() {
    let mut c = Controller::new(options(40)).unwrap();
    let mut host = Host::sectioned(40).failing(5, 1);

    c.on_scroll(&mut host, viewport(0.0));
    let BarrierPoll::Pending { retry_at_ms } = c.tick(&mut host) else {
        panic!("expected a pending wait");
    };
    assert_eq!(retry_at_ms, 4);

    tokio::time::advance(std::time::Duration::from_millis(2)).await;
    assert_eq!(c.tick(&mut host), BarrierPoll::Pending { retry_at_ms: 4 });

    tokio::time::advance(std::time::Duration::from_millis(2)).await;
    assert_eq!(c.tick(&mut host), BarrierPoll::Ready);
    assert_eq!(c.tick(&mut host), BarrierPoll::Idle);
}

#[tokio::test(start_paused = true)]
async fn source_reset_requests_scroll_to_top() {
    let mut c = Controller::new(options(40)).unwrap();
    let mut host = Host::sectioned(40);
    c.scroll(&mut host, viewport(0.0)).await;
    c.scroll(&mut host, viewport(400.0)).await;
    assert!(c.overlay().is_some());

    c.engine_mut().set_items(vec![0usize; 5]);
    assert_eq!(c.take_scroll_request(), Some(0.0));
    assert_eq!(c.take_scroll_request(), None);
    assert_eq!(c.overlay(), None);
    assert_eq!(c.engine().window().end_index, 4);
}

#[test]
fn overlay_requires_a_pinned_item() {
    assert_eq!(StickyOverlay::from_state(&StickyState::default(), 120.0), None);
}
