//! Configuration type definitions
//!
//! Board-agnostic bridge configuration. Anything the TOML file does not
//! set keeps the default below.

use heapless::String;

/// Maximum root namespace length
pub const MAX_NAMESPACE_LEN: usize = 16;

/// Maximum console prompt length
pub const MAX_PROMPT_LEN: usize = 8;

/// Root namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "Ferrule";

/// Scheduler tick used when none is configured (100 Hz)
pub const DEFAULT_TICK_PERIOD_MS: u32 = 10;

/// Longest accepted scheduler tick
pub const MAX_TICK_PERIOD_MS: u32 = 1000;

/// Console baud rate bounds
pub const MIN_BAUDRATE: u32 = 1200;
pub const MAX_BAUDRATE: u32 = 921_600;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Namespace is not a valid constant name
    InvalidNamespace,
    /// Tick period is zero or above [`MAX_TICK_PERIOD_MS`]
    InvalidTickPeriod,
    /// Baud rate outside the supported range
    InvalidBaudrate,
    /// Prompt longer than [`MAX_PROMPT_LEN`]
    PromptTooLong,
}

/// Console settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsoleConfig {
    /// UART baud rate
    pub baudrate: u32,
    /// Echo received characters back
    pub echo: bool,
    /// Prompt printed before each line
    pub prompt: String<MAX_PROMPT_LEN>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let mut prompt = String::new();
        let _ = prompt.push_str("> ");
        Self {
            baudrate: 115_200,
            echo: true,
            prompt,
        }
    }
}

/// Complete bridge configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    /// Root namespace the modules are registered under
    pub namespace: String<MAX_NAMESPACE_LEN>,
    /// Scheduler tick period used to round delays
    pub tick_period_ms: u32,
    /// Console settings
    pub console: ConsoleConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        let mut namespace = String::new();
        let _ = namespace.push_str(DEFAULT_NAMESPACE);
        Self {
            namespace,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            console: ConsoleConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root namespace
    pub fn set_namespace(&mut self, name: &str) -> Result<(), ConfigError> {
        if !is_constant_name(name) {
            return Err(ConfigError::InvalidNamespace);
        }
        self.namespace.clear();
        self.namespace
            .push_str(name)
            .map_err(|_| ConfigError::InvalidNamespace)
    }

    /// Set the console prompt
    pub fn set_prompt(&mut self, prompt: &str) -> Result<(), ConfigError> {
        if prompt.len() > MAX_PROMPT_LEN {
            return Err(ConfigError::PromptTooLong);
        }
        self.console.prompt.clear();
        self.console
            .prompt
            .push_str(prompt)
            .map_err(|_| ConfigError::PromptTooLong)
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_constant_name(&self.namespace) {
            return Err(ConfigError::InvalidNamespace);
        }
        if self.tick_period_ms == 0 || self.tick_period_ms > MAX_TICK_PERIOD_MS {
            return Err(ConfigError::InvalidTickPeriod);
        }
        if !(MIN_BAUDRATE..=MAX_BAUDRATE).contains(&self.console.baudrate) {
            return Err(ConfigError::InvalidBaudrate);
        }
        Ok(())
    }
}

/// Check if `name` is a valid module constant (`[A-Z][A-Za-z0-9_]*`)
pub fn is_constant_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    name.len() <= MAX_NAMESPACE_LEN && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
