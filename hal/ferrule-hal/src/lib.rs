//! Ferrule Platform Abstraction Layer
//!
//! This crate defines the platform traits the host-call bridge calls into.
//! Chip-specific crates implement them on top of their vendor SDK or HAL,
//! so the same bridge can be hosted on different SoCs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Scripting runtime (console, VM, ...)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ferrule-core (bridge + dispatch table) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ferrule-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ ferrule-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`system::SystemControl`] - Heap stats, SDK version, chip id, restart, deep sleep
//! - [`time::TickDelay`] - Scheduler-tick delays
//! - [`time::MonotonicTimer`] - Microsecond uptime counter
//! - [`Platform`] - Everything the bridge needs, in one bound
//!
//! [`sleep`] and [`time::DelayPlan`] hold the chunking arithmetic shared
//! by implementations whose timers have a limited range.

#![no_std]
#![deny(unsafe_code)]

pub mod chip;
pub mod sleep;
pub mod system;
pub mod time;

// Re-export key traits at crate root for convenience
pub use chip::{ChipInfo, ChipModel};
pub use system::SystemControl;
pub use time::{DelayPlan, MonotonicTimer, TickDelay};

/// Full platform surface required by the host-call bridge
pub trait Platform: SystemControl + TickDelay + MonotonicTimer {}

// Blanket implementation for types that implement all platform traits
impl<T: SystemControl + TickDelay + MonotonicTimer> Platform for T {}
