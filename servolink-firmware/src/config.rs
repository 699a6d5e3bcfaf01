//! Link configuration loading

use defmt::*;

use servolink_core::{parse_config, LinkConfig};

/// Embedded link configuration (compiled into firmware)
/// Edit link.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../link.toml");

/// Parse the embedded configuration, falling back to defaults
///
/// build.rs runs the same parser, so the fallback only triggers if the
/// embedded file and the parser drift apart.
pub fn load() -> LinkConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded link configuration");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using default link configuration");
            LinkConfig::default()
        }
    }
}
