//! RP2040 platform
//!
//! Implements the `ferrule-hal` traits for the bridge.

use embassy_rp::watchdog::Watchdog;
use embassy_time::{Instant, Timer};
use embedded_alloc::LlffHeap as Heap;
use ferrule_hal::time::MAX_WAIT_MS;
use ferrule_hal::{ChipInfo, DelayPlan, MonotonicTimer, SystemControl, TickDelay};

use crate::chip::read_chip_info;
use crate::sleep::enter_deep_sleep;
use crate::SDK_VERSION;

/// RP2040 platform handle
///
/// Owns the watchdog (used for restart and deep sleep) and borrows the
/// firmware's global heap for statistics.
pub struct Rp2040Platform {
    heap: &'static Heap,
    watchdog: Watchdog,
    chip: ChipInfo,
    tick_period_ms: u32,
}

impl Rp2040Platform {
    /// Create the platform
    ///
    /// `tick_period_ms` is the scheduler tick used to round delays; zero is
    /// treated as one.
    pub fn new(heap: &'static Heap, watchdog: Watchdog, tick_period_ms: u32) -> Self {
        Self {
            heap,
            watchdog,
            chip: read_chip_info(),
            tick_period_ms: tick_period_ms.max(1),
        }
    }
}

impl SystemControl for Rp2040Platform {
    fn free_heap_bytes(&self) -> usize {
        self.heap.free()
    }

    fn sdk_version(&self) -> &str {
        SDK_VERSION
    }

    fn chip_info(&self) -> ChipInfo {
        self.chip
    }

    fn restart(&mut self) -> ! {
        #[cfg(feature = "defmt")]
        defmt::info!("Restart requested");

        // Forced watchdog reset so the next boot can tell it was a restart
        self.watchdog.trigger_reset();
        cortex_m::peripheral::SCB::sys_reset()
    }

    fn deep_sleep(&mut self, duration_us: u64) -> ! {
        enter_deep_sleep(&mut self.watchdog, duration_us)
    }
}

impl TickDelay for Rp2040Platform {
    fn tick_period_ms(&self) -> u32 {
        self.tick_period_ms
    }

    async fn delay_ticks(&mut self, ticks: u64) {
        let plan = DelayPlan::new(ticks, self.tick_period_ms);
        for _ in 0..plan.full_waits {
            Timer::after_millis(MAX_WAIT_MS).await;
        }
        Timer::after_millis(plan.remainder_ms).await;
    }
}

impl MonotonicTimer for Rp2040Platform {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
