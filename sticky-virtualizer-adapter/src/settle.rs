use std::time::Duration;

use sticky_virtualizer::{BarrierPoll, LayoutHost, VirtualScroll};
use tokio::time::Instant;

/// Millisecond timestamps on the tokio clock, relative to when the clock was created.
///
/// Under `tokio::time::pause` the clock follows virtual time, so barrier backoff can be tested
/// without real sleeps.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Polls the engine until its measurement barrier settles, sleeping between attempts.
///
/// Returns the last poll: [`BarrierPoll::Ready`], [`BarrierPoll::Exhausted`], or
/// [`BarrierPoll::Idle`] when no wait was in flight. The sticky state has already been advanced
/// when this returns.
pub async fn settle<T, H>(v: &mut VirtualScroll<T>, host: &mut H, clock: &Clock) -> BarrierPoll
where
    H: LayoutHost + ?Sized,
{
    loop {
        match v.tick(host, clock.now_ms()) {
            BarrierPoll::Pending { retry_at_ms } => {
                let wait_ms = retry_at_ms.saturating_sub(clock.now_ms());
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    target: "sticky_virtualizer_adapter",
                    wait_ms,
                    "settle: waiting for layout"
                );
                tokio::time::sleep(Duration::from_millis(wait_ms)).await;
            }
            BarrierPoll::Exhausted(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "sticky_virtualizer_adapter", %err, "settle: giving up");
                return BarrierPoll::Exhausted(err);
            }
            poll => return poll,
        }
    }
}
