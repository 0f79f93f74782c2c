//! System control abstractions
//!
//! Read-only queries into the platform (heap, version, identity) and the
//! two terminal operations: warm restart and deep sleep.

use crate::chip::ChipInfo;

/// System-level platform services
///
/// Implementations wrap the chip's SDK calls. All methods are treated as
/// infallible by the bridge; a platform that cannot perform an operation
/// should handle that internally (e.g. fall back to a reset).
pub trait SystemControl {
    /// Free heap bytes at the time of the call
    fn free_heap_bytes(&self) -> usize;

    /// Platform SDK version identifier
    ///
    /// Must be non-empty.
    fn sdk_version(&self) -> &str;

    /// Identity of the running chip
    ///
    /// Repeated calls must return the same value.
    fn chip_info(&self) -> ChipInfo;

    /// Warm-reset the device
    ///
    /// Never returns to the caller.
    fn restart(&mut self) -> !;

    /// Enter deep sleep for `duration_us` microseconds
    ///
    /// Execution state is lost; the device boots afresh when the sleep ends.
    /// Never returns to the caller.
    fn deep_sleep(&mut self, duration_us: u64) -> !;
}
