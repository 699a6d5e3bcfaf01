//! Build script for servolink-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates link.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section of link.toml
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    (
        "link",
        &["silence_ceiling", "send_period", "cycle_period_ms", "startup_hold_ms"],
    ),
    ("flow", &["rx_start_threshold", "rx_stop_threshold"]),
    ("uart", &["baudrate", "data_bits", "parity", "stop_bits"]),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
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
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate link.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=link.toml");

    let config_path = Path::new("link.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: link.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds link.toml as its link configuration.        ║\n\
            ║  Please create one in the servolink-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read link.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Full TOML syntax check; the firmware parser only understands a subset
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in link.toml                         ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n\
                \n{}\n",
                e
            );
        }
    };

    let errors = check_structure(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid link configuration                               ║\n\
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

    // Same parser and rules the firmware applies at boot
    if let Err(e) = servolink_core::parse_config(&config_content) {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: link.toml rejected by the firmware parser                ║\n\
            ║                                                                  ║\n\
            ║  Error: {:<56} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!("{:?}", e)
        );
    }
}

/// Check sections, keys and value types
fn check_structure(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return errors;
    };

    for (section, body) in root {
        let Some((_, keys)) = KNOWN_KEYS.iter().find(|(name, _)| *name == section.as_str()) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };

        let Some(table) = body.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for (key, value) in table {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
                continue;
            }
            match (key.as_str(), value) {
                ("parity", toml::Value::String(_)) => {}
                ("parity", _) => errors.push(format!("[{}] parity must be a string", section)),
                (_, toml::Value::Integer(n)) if *n >= 0 => {}
                _ => errors.push(format!("[{}] {} must be a non-negative integer", section, key)),
            }
        }
    }

    errors
}
