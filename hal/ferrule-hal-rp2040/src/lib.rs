//! RP2040 platform for the host-call bridge
//!
//! This crate implements the `ferrule-hal` traits on the RP2040 using
//! embassy-rp:
//!
//! - Free heap from the firmware's `embedded-alloc` heap
//! - Chip identity from the SYSINFO `CHIP_ID` register
//! - Warm restart through the watchdog
//! - Deep sleep through the watchdog, continued across resets
//! - Delays and uptime from `embassy-time`

#![no_std]

pub mod chip;
pub mod platform;
pub mod sleep;

pub use platform::Rp2040Platform;
pub use sleep::{resume_deep_sleep, WakeCause};

/// SDK identifier reported to scripts
pub const SDK_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
