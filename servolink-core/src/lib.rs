//! Board-agnostic control logic for servolink
//!
//! This crate contains everything above the wire protocol that does not
//! depend on specific hardware:
//!
//! - Link configuration types, validation and parsing
//! - Collaborator traits (local sampling, output stage, display, indicator)
//! - Status line formatting
//! - The periodic control cycle that chooses between local and remote
//!   settings and paces outgoing frames

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod status;
pub mod traits;

pub use config::{parse_config, ConfigError, LinkConfig, ParseError};
pub use control::{ControlCycle, CycleReport};
pub use status::{status_lines, StatusLine, StatusLines};
