//! Platform-agnostic host-call bridge
//!
//! This crate connects a scripting runtime to the platform traits in
//! `ferrule-hal`:
//!
//! - Fixed dispatch table of entry points (`System.*`, `Timer.*`)
//! - Argument validation for the runtime's calling convention
//! - Marshaling of native results into integer, float or text values
//! - One-shot registration into the runtime's namespace
//! - Configuration type definitions
//!
//! The bridge holds no state of its own; anything that changes between
//! calls (heap usage, uptime) lives in the platform.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod args;
pub mod bridge;
pub mod config;
pub mod error;
pub mod host;
pub mod registry;
pub mod value;

pub use args::{ArgKind, Argument};
pub use bridge::{ms_to_ticks, Bridge};
pub use error::ArgumentError;
pub use host::{finalize, register, ScriptHost};
pub use registry::{Arity, CallDescriptor, Module, Operation, ENTRY_POINTS};
pub use value::{Reply, Value, ValueSink};
