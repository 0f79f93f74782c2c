//! Time abstractions
//!
//! Delays are expressed in scheduler ticks so that callers see the same
//! rounding the underlying scheduler applies.

/// Cooperative delay driven by the scheduler tick
pub trait TickDelay {
    /// Length of one scheduler tick in milliseconds (at least 1)
    fn tick_period_ms(&self) -> u32;

    /// Suspend the calling task for `ticks` scheduler ticks
    ///
    /// The caller is descheduled, not busy-waiting. There is no way to
    /// cancel a delay once started.
    fn delay_ticks(&mut self, ticks: u64) -> impl core::future::Future<Output = ()>;
}

/// Monotonic microsecond counter
pub trait MonotonicTimer {
    /// Microseconds since boot
    ///
    /// Never decreases within one boot.
    fn now_us(&self) -> u64;
}

/// Longest single timer wait in milliseconds
///
/// Kept well inside what a 1 MHz tick counter can express once the
/// milliseconds are scaled to microseconds.
pub const MAX_WAIT_MS: u64 = u32::MAX as u64;

/// A tick delay split into waits a timer driver can represent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DelayPlan {
    /// Number of waits of [`MAX_WAIT_MS`]
    pub full_waits: u64,
    /// Final wait in milliseconds, below [`MAX_WAIT_MS`]
    pub remainder_ms: u64,
}

impl DelayPlan {
    /// Plan a delay of `ticks` ticks of `tick_period_ms` each
    ///
    /// The total is computed without overflow for any input.
    pub fn new(ticks: u64, tick_period_ms: u32) -> Self {
        let total = u128::from(ticks) * u128::from(tick_period_ms);
        let max = u128::from(MAX_WAIT_MS);
        // total < 2^96 and max > 2^31, so both parts fit in u64
        Self {
            full_waits: (total / max) as u64,
            remainder_ms: (total % max) as u64,
        }
    }

    /// Total delay in milliseconds
    pub fn total_ms(&self) -> u128 {
        u128::from(self.full_waits) * u128::from(MAX_WAIT_MS) + u128::from(self.remainder_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_delay_is_one_wait() {
        let plan = DelayPlan::new(10, 10);
        assert_eq!(plan.full_waits, 0);
        assert_eq!(plan.remainder_ms, 100);
    }

    #[test]
    fn test_zero_ticks() {
        assert_eq!(DelayPlan::new(0, 10).total_ms(), 0);
    }

    #[test]
    fn test_largest_script_delay_keeps_full_length() {
        // System.delay(i64::MAX) with a 10 ms tick
        let ms = i64::MAX as u64;
        let ticks = ms / 10;
        let plan = DelayPlan::new(ticks, 10);

        assert_eq!(plan.total_ms(), u128::from(ticks) * 10);
        assert!(plan.remainder_ms < MAX_WAIT_MS);
        // Each wait converts to microseconds without overflow
        assert!(MAX_WAIT_MS.checked_mul(1000).is_some());
    }

    #[test]
    fn test_extreme_inputs_do_not_overflow() {
        let plan = DelayPlan::new(u64::MAX, u32::MAX);
        assert_eq!(plan.total_ms(), u128::from(u64::MAX) * u128::from(u32::MAX));
    }
}
