//! Embedded bridge configuration
//!
//! `bridge.toml` is compiled into the firmware and checked by build.rs, so
//! a parse failure here means the runtime parser and the build check have
//! drifted apart. The firmware still boots on defaults in that case.

use defmt::*;
use ferrule_core::config::{parse_config, BridgeConfig};

/// Embedded configuration (compiled into firmware)
/// Edit bridge.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../bridge.toml");

/// Load the embedded configuration, falling back to defaults
pub fn load_config() -> BridgeConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: namespace={}, tick={}ms, baud={}",
                config.namespace.as_str(),
                config.tick_period_ms,
                config.console.baudrate
            );
            config
        }
        Err(e) => {
            warn!("Invalid bridge.toml ({:?}), using defaults", e);
            BridgeConfig::default()
        }
    }
}
