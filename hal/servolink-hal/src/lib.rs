//! Servolink Hardware Abstraction Layer
//!
//! This crate defines the register-level view of a UART that the servolink
//! interrupt handler needs. Chip-specific firmware implements [`SerialPort`]
//! on top of its peripheral access crate; tests implement it with a mock.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  servolink-firmware (board binary)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  servolink-drivers (UART IRQ handler)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  servolink-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Handshake lines (RTS/CTS) and indicator LEDs are plain GPIOs and use the
//! `embedded-hal` digital traits directly.

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

pub use uart::{DataBits, IrqSource, LineErrors, Parity, SerialPort, StopBits, UartConfig};
