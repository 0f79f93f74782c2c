//! Simple TOML parser for bridge configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the bridge configuration. It does NOT support the full TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys
//!
//! Unknown sections and keys are skipped so newer files still load.

use super::types::{BridgeConfig, ConfigError};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed section header
    InvalidSection,
    /// Line is neither a header, a comment, nor `key = value`
    InvalidLine { line: usize },
    /// Value has the wrong type for its key
    InvalidValue { line: usize },
    /// Value parsed but is out of range
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Config(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Bridge,
    Scheduler,
    Console,
    Unknown,
}

/// Parse TOML configuration into BridgeConfig
///
/// The result is validated before it is returned.
pub fn parse_config(input: &str) -> Result<BridgeConfig, ParseError> {
    let mut config = BridgeConfig::new();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if line.starts_with('[') {
            if !line.ends_with(']') || line.len() < 3 {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&line[1..line.len() - 1]);
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine { line: line_no })?;
        apply_value(&mut config, section, key, value)
            .map_err(|e| match e {
                ApplyError::Value => ParseError::InvalidValue { line: line_no },
                ApplyError::Config(e) => ParseError::Config(e),
            })?;
    }

    config.validate()?;
    Ok(config)
}

/// Map a header like "console" to its section
fn parse_section_header(header: &str) -> Section {
    match header.trim() {
        "bridge" => Section::Bridge,
        "scheduler" => Section::Scheduler,
        "console" => Section::Console,
        _ => Section::Unknown,
    }
}

/// Cut a trailing `# comment` that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

enum ApplyError {
    Value,
    Config(ConfigError),
}

fn apply_value(
    config: &mut BridgeConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ApplyError> {
    match (section, key) {
        (Section::Bridge, "namespace") => config
            .set_namespace(parse_string(value)?)
            .map_err(ApplyError::Config),
        (Section::Scheduler, "tick_period_ms") => {
            config.tick_period_ms = parse_int(value)?;
            Ok(())
        }
        (Section::Console, "baudrate") => {
            config.console.baudrate = parse_int(value)?;
            Ok(())
        }
        (Section::Console, "echo") => {
            config.console.echo = parse_bool(value)?;
            Ok(())
        }
        (Section::Console, "prompt") => config
            .set_prompt(parse_string(value)?)
            .map_err(ApplyError::Config),
        _ => Ok(()),
    }
}

/// Parse a quoted string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ApplyError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ApplyError::Value)
}

/// Parse an integer value (underscores allowed)
fn parse_int(value: &str) -> Result<u32, ApplyError> {
    let mut result: u32 = 0;
    let mut digits = 0;
    for c in value.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(10).ok_or(ApplyError::Value)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ApplyError::Value)?;
        digits += 1;
    }
    if digits == 0 {
        return Err(ApplyError::Value);
    }
    Ok(result)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ApplyError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ApplyError::Value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
# Bridge configuration
[bridge]
namespace = "RP2040"

[scheduler]
tick_period_ms = 1   # embassy ticks are much finer

[console]
baudrate = 115_200
echo = false
prompt = "rb> "
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.namespace.as_str(), "RP2040");
        assert_eq!(config.tick_period_ms, 1);
        assert_eq!(config.console.baudrate, 115_200);
        assert!(!config.console.echo);
        assert_eq!(config.console.prompt.as_str(), "rb> ");
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), BridgeConfig::default());
    }

    #[test]
    fn test_unknown_sections_and_keys_skipped() {
        let config = parse_config("[future]\nfoo = 1\n[console]\ncolor = true\n").unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_hash_inside_string_kept() {
        let config = parse_config("[console]\nprompt = \"#> \" # comment\n").unwrap();
        assert_eq!(config.console.prompt.as_str(), "#> ");
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[scheduler]\ntick_period_ms = ten\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[console]\necho = yes\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[bridge]\nnamespace = RP2040\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[scheduler]\ntick_period_ms = 99999999999\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(
            parse_config("[bridge]\nnamespace = \"rp2040\"\n"),
            Err(ParseError::Config(ConfigError::InvalidNamespace))
        );
        assert_eq!(
            parse_config("[scheduler]\ntick_period_ms = 0\n"),
            Err(ParseError::Config(ConfigError::InvalidTickPeriod))
        );
        assert_eq!(
            parse_config("[console]\nbaudrate = 50\n"),
            Err(ParseError::Config(ConfigError::InvalidBaudrate))
        );
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(parse_config("[bridge\n"), Err(ParseError::InvalidSection));
        assert_eq!(
            parse_config("[bridge]\nnamespace\n"),
            Err(ParseError::InvalidLine { line: 2 })
        );
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("a = 1 # x"), "a = 1 ");
        assert_eq!(strip_comment("# all"), "");
        assert_eq!(strip_comment("p = \"#\""), "p = \"#\"");
    }
}
