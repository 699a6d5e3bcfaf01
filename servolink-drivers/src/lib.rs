//! Hardware driver implementations
//!
//! Concrete glue between the board-agnostic servolink crates and hardware:
//!
//! - UART interrupt service routine ([`uart::UartIrqHandler`])
//! - RTS/CTS handshake pins ([`handshake::Handshake`])
//! - Error indicator LED ([`indicator::PinIndicator`])
//!
//! Register access goes through [`servolink_hal::SerialPort`]; GPIO goes
//! through `embedded-hal` 1.0 digital traits.

#![no_std]
#![deny(unsafe_code)]

pub mod handshake;
pub mod indicator;
pub mod uart;

pub use handshake::Handshake;
pub use indicator::PinIndicator;
pub use uart::{IrqStats, UartIrqHandler};
