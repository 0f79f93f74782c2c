//! Configuration
//!
//! Bridge configuration types and the `no_std` TOML subset parser the
//! firmware uses to read its embedded `bridge.toml`.

pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError};
pub use types::*;
