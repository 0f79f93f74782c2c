//! Watchdog-driven deep sleep
//!
//! The RP2040 has no RTC wake-up from its lowest power state in embassy-rp,
//! so deep sleep is modelled as "park the core, let the watchdog reset the
//! chip". The watchdog can count at most [`MAX_CHUNK_US`], so longer sleeps
//! are split into chunks. The remaining time is kept in watchdog scratch
//! registers, which survive a watchdog reset, and [`resume_deep_sleep`]
//! picks the sleep back up early in boot.
//!
//! Scratch registers 4-7 belong to the bootrom; only 0-2 are used here.

use embassy_rp::watchdog::{ResetReason, Watchdog};
use embassy_time::Duration;
use ferrule_hal::sleep::{chunk_for, join_remaining, split_remaining};

/// Longest period the RP2040 watchdog can time (RP2040-E1 halves the range)
pub const MAX_CHUNK_US: u64 = 0x00FF_FFFF / 2;

/// Marker stored while a deep sleep is in progress
const SLEEP_MAGIC: u32 = 0x5EE9_F0E5;

const SLOT_MAGIC: usize = 0;
const SLOT_REMAINING_HI: usize = 1;
const SLOT_REMAINING_LO: usize = 2;

/// Why the chip is running this boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeCause {
    /// Cold boot (power-on or RUN pin)
    PowerOn,
    /// Warm restart requested by software
    Restart,
    /// Deep sleep completed
    DeepSleepTimer,
    /// Watchdog expired outside a deep sleep
    WatchdogTimeout,
}

/// Start a deep sleep of `duration_us` microseconds
pub fn enter_deep_sleep(watchdog: &mut Watchdog, duration_us: u64) -> ! {
    #[cfg(feature = "defmt")]
    defmt::info!("Entering deep sleep for {} us", duration_us);

    write_remaining(watchdog, duration_us);
    sleep_next_chunk(watchdog)
}

/// Continue or finish a deep sleep started before the last reset
///
/// Must run before anything else at boot. Does not return while sleep
/// time remains.
pub fn resume_deep_sleep(watchdog: &mut Watchdog) -> WakeCause {
    let reason = watchdog.reset_reason();
    let sleeping = watchdog.get_scratch(SLOT_MAGIC) == SLEEP_MAGIC;

    match (reason, sleeping) {
        (Some(ResetReason::TimedOut), true) => {
            if read_remaining(watchdog) > 0 {
                sleep_next_chunk(watchdog)
            }
            watchdog.set_scratch(SLOT_MAGIC, 0);
            WakeCause::DeepSleepTimer
        }
        (reason, _) => {
            watchdog.set_scratch(SLOT_MAGIC, 0);
            match reason {
                None => WakeCause::PowerOn,
                Some(ResetReason::Forced) => WakeCause::Restart,
                Some(ResetReason::TimedOut) => WakeCause::WatchdogTimeout,
            }
        }
    }
}

/// Arm the watchdog for the next chunk and park the core
fn sleep_next_chunk(watchdog: &mut Watchdog) -> ! {
    let remaining = read_remaining(watchdog);
    let chunk = chunk_for(remaining, MAX_CHUNK_US);
    write_remaining(watchdog, remaining - chunk);
    watchdog.set_scratch(SLOT_MAGIC, SLEEP_MAGIC);

    #[cfg(feature = "defmt")]
    defmt::debug!("Deep sleep chunk {} us, {} us left", chunk, remaining - chunk);

    watchdog.pause_on_debug(false);
    watchdog.start(Duration::from_micros(chunk.max(1)));

    loop {
        cortex_m::asm::wfi();
    }
}

fn read_remaining(watchdog: &mut Watchdog) -> u64 {
    join_remaining(
        watchdog.get_scratch(SLOT_REMAINING_HI),
        watchdog.get_scratch(SLOT_REMAINING_LO),
    )
}

fn write_remaining(watchdog: &mut Watchdog, remaining: u64) {
    let (hi, lo) = split_remaining(remaining);
    watchdog.set_scratch(SLOT_REMAINING_HI, hi);
    watchdog.set_scratch(SLOT_REMAINING_LO, lo);
}
