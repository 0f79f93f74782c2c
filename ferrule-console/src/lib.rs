//! Console host for the host-call bridge
//!
//! A minimal scripting front end that runs over a serial line. Each input
//! line is one call expression:
//!
//! ```text
//! > RP2040::System.delay(100)
//! => nil
//! > System.available_memory
//! => 30212
//! > Timer.get_time()
//! => 18234567.0
//! ```
//!
//! Bytes are assembled into lines by [`LineBuffer`], parsed by
//! [`parse_call`], resolved against the namespace recorded by
//! [`ConsoleHost`] during registration, and answered by [`Console`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod call;
pub mod console;
pub mod host;
pub mod line;
pub mod reply;

pub use call::{parse_call, CallExpr, ParseError};
pub use console::{Console, ConsoleError};
pub use host::{ConsoleHost, RegistrationError, ResolveError};
pub use line::{Line, LineBuffer, LineError, MAX_LINE_LEN};
pub use reply::{format_error, format_reply, Output, MAX_OUTPUT_LEN};
