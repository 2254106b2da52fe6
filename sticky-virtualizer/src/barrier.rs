use alloc::vec::Vec;

use crate::{Error, Result};

/// Bounded exponential backoff for [`MeasurementBarrier`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RetryPolicy {
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Total number of measurement attempts, including the first one.
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay_ms: 4,
            max_delay_ms: 64,
            max_attempts: 12,
        }
    }
}

impl RetryPolicy {
    /// Delay before retrying after `failed_attempts` failures (1-based).
    ///
    /// `initial_delay_ms`, doubling per failure, capped at `max_delay_ms`.
    pub fn delay_after(&self, failed_attempts: u32) -> u64 {
        let shift = failed_attempts.saturating_sub(1).min(63);
        self.initial_delay_ms
            .saturating_mul(1u64 << shift)
            .min(self.max_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfiguration {
                field: "retry.max_attempts",
                reason: "must be at least 1",
            });
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(Error::InvalidConfiguration {
                field: "retry.initial_delay_ms",
                reason: "must not exceed retry.max_delay_ms",
            });
        }
        Ok(())
    }
}

/// Outcome of [`MeasurementBarrier::poll`].
#[derive(Clone, Debug, PartialEq)]
pub enum BarrierPoll {
    /// No wait in flight.
    Idle,
    /// Every candidate measured successfully.
    Ready,
    /// Poll again at (or after) `retry_at_ms`.
    Pending { retry_at_ms: u64 },
    /// The retry budget ran out. Non-fatal: unmeasured items fall back to `min_row_height`.
    Exhausted(Error),
}

impl BarrierPoll {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// The wait is over, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Ready | Self::Exhausted(_))
    }
}

/// Waits until every newly rendered item can be measured.
///
/// The barrier owns no clock; adapters drive it with `now_ms` timestamps, the same way they
/// drive scrolling. Starting a new wait supersedes the one in flight.
#[derive(Clone, Debug, Default)]
pub struct MeasurementBarrier {
    policy: RetryPolicy,
    candidates: Vec<usize>,
    attempts: u32,
    retry_at_ms: Option<u64>,
}

impl MeasurementBarrier {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: RetryPolicy) {
        self.policy = policy;
    }

    pub fn begin(&mut self, candidates: impl IntoIterator<Item = usize>, now_ms: u64) {
        self.candidates.clear();
        self.candidates.extend(candidates);
        self.attempts = 0;
        self.retry_at_ms = Some(now_ms);
        vtrace!(candidates = self.candidates.len(), now_ms, "barrier: begin");
    }

    pub fn cancel(&mut self) {
        self.candidates.clear();
        self.attempts = 0;
        self.retry_at_ms = None;
    }

    pub fn is_waiting(&self) -> bool {
        self.retry_at_ms.is_some()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn candidates(&self) -> &[usize] {
        &self.candidates
    }

    /// Runs one measurement attempt if one is due.
    ///
    /// `probe(index)` reports whether the candidate's measurement succeeded.
    pub fn poll(&mut self, now_ms: u64, mut probe: impl FnMut(usize) -> bool) -> BarrierPoll {
        let Some(retry_at_ms) = self.retry_at_ms else {
            return BarrierPoll::Idle;
        };
        if now_ms < retry_at_ms {
            return BarrierPoll::Pending { retry_at_ms };
        }

        self.attempts = self.attempts.saturating_add(1);
        let failed = self.candidates.iter().copied().find(|&i| !probe(i));

        let Some(index) = failed else {
            vtrace!(attempts = self.attempts, "barrier: ready");
            self.retry_at_ms = None;
            return BarrierPoll::Ready;
        };

        if self.attempts >= self.policy.max_attempts {
            vwarn!(index, attempts = self.attempts, "barrier: measurement unavailable");
            let attempts = self.attempts;
            self.cancel();
            return BarrierPoll::Exhausted(Error::MeasurementUnavailable { index, attempts });
        }

        let retry_at_ms = now_ms.saturating_add(self.policy.delay_after(self.attempts));
        self.retry_at_ms = Some(retry_at_ms);
        BarrierPoll::Pending { retry_at_ms }
    }
}
