//! Build script for ferrule-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates bridge.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Limits mirrored from `ferrule_core::config`
const MAX_NAMESPACE_LEN: usize = 16;
const MAX_PROMPT_LEN: usize = 8;
const MAX_TICK_PERIOD_MS: i64 = 1000;
const MIN_BAUDRATE: i64 = 1200;
const MAX_BAUDRATE: i64 = 921_600;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate bridge.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=bridge.toml");

    let config_path = Path::new("bridge.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: bridge.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds bridge.toml at build time.                  ║\n\
            ║  Please create one in the ferrule-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read bridge.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in bridge.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_bridge(&config, &mut errors);
    validate_scheduler(&config, &mut errors);
    validate_console(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in bridge.toml                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=bridge.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Look up an optional section, complaining if it is not a table
fn section<'a>(
    config: &'a toml::Value,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::value::Table> {
    match config.get(name) {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
        None => None,
    }
}

fn validate_bridge(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(bridge) = section(config, "bridge", errors) else {
        return;
    };

    match bridge.get("namespace") {
        Some(toml::Value::String(name)) => {
            let mut chars = name.chars();
            let starts_upper = chars.next().is_some_and(|c| c.is_ascii_uppercase());
            let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !starts_upper || !rest_ok || name.len() > MAX_NAMESPACE_LEN {
                errors.push(format!(
                    "[bridge] namespace '{}' must match [A-Z][A-Za-z0-9_]* (max {})",
                    name, MAX_NAMESPACE_LEN
                ));
            }
        }
        Some(_) => errors.push("[bridge] namespace must be a string".to_string()),
        None => {}
    }
}

fn validate_scheduler(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(scheduler) = section(config, "scheduler", errors) else {
        return;
    };

    match scheduler.get("tick_period_ms") {
        Some(toml::Value::Integer(ms)) => {
            if *ms < 1 || *ms > MAX_TICK_PERIOD_MS {
                errors.push(format!(
                    "[scheduler] tick_period_ms {} out of range (1-{})",
                    ms, MAX_TICK_PERIOD_MS
                ));
            }
        }
        Some(_) => errors.push("[scheduler] tick_period_ms must be an integer".to_string()),
        None => {}
    }
}

fn validate_console(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(console) = section(config, "console", errors) else {
        return;
    };

    match console.get("baudrate") {
        Some(toml::Value::Integer(baud)) => {
            if *baud < MIN_BAUDRATE || *baud > MAX_BAUDRATE {
                errors.push(format!(
                    "[console] baudrate {} out of range ({}-{})",
                    baud, MIN_BAUDRATE, MAX_BAUDRATE
                ));
            }
        }
        Some(_) => errors.push("[console] baudrate must be an integer".to_string()),
        None => {}
    }

    match console.get("echo") {
        Some(toml::Value::Boolean(_)) | None => {}
        Some(_) => errors.push("[console] echo must be true or false".to_string()),
    }

    match console.get("prompt") {
        Some(toml::Value::String(prompt)) => {
            if prompt.len() > MAX_PROMPT_LEN {
                errors.push(format!(
                    "[console] prompt is {} bytes (max {})",
                    prompt.len(),
                    MAX_PROMPT_LEN
                ));
            }
            if prompt.contains('"') || prompt.contains('\\') {
                errors.push("[console] prompt may not contain quotes or escapes".to_string());
            }
        }
        Some(_) => errors.push("[console] prompt must be a string".to_string()),
        None => {}
    }
}
