//! Servolink serial transport
//!
//! This crate implements the point-to-point UART protocol that carries a
//! speed and an angle setting between two controllers. The protocol is
//! designed for simplicity and tolerance to loss: frames are fire-and-forget
//! and a silent link simply falls back to locally sampled values.
//!
//! # Protocol Overview
//!
//! Every message is one fixed-size frame:
//! ```text
//! ┌───────┬───────┬───────┬────────┬────────┐
//! │ START │ SPEED │ ANGLE │ CRC_HI │ CRC_LO │
//! │ 0xAA  │ i8    │ i8    │ 1B     │ 1B     │
//! └───────┴───────┴───────┴────────┴────────┘
//! ```
//!
//! The CRC is CRC-16/CCITT-FALSE over the first three bytes. Each side owns
//! a receive FIFO (filled by the UART interrupt) and a transmit FIFO
//! (drained by the UART interrupt), sized for four frames plus one byte.
//! RTS/CTS lines provide byte-level backpressure.

#![no_std]
#![deny(unsafe_code)]

pub mod crc;
pub mod fifo;
pub mod flow;
pub mod frame;
pub mod link;
pub mod serial;
pub mod values;

pub use fifo::ByteFifo;
pub use flow::{FlowControl, FlowThresholds, LineState, RX_START_THRESHOLD, RX_STOP_THRESHOLD};
pub use frame::{build_and_enqueue_frame, Frame, FrameError, FIFO_SIZE, FRAME_LEN, FRAME_START};
pub use link::{LinkMode, LinkState, LinkStats, Receive, DEFAULT_SILENCE_CEILING};
pub use serial::SerialLink;
pub use values::ControlValues;
