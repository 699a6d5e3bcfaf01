//! Link configuration
//!
//! Run-time tunables for the transport and the control cycle. Defaults
//! match the reference wiring: 21-byte FIFOs, RTS released at 10 free bytes
//! and asserted at 6, local fallback after 10 silent cycles, one frame sent
//! every 6th cycle of 20 ms.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::{ConfigError, LinkConfig, MAX_START_THRESHOLD};
