//! Shared transport state
//!
//! [`SerialLink`] bundles everything the foreground task and the UART
//! interrupt handler share: the two FIFOs and the two handshake signals.
//! Methods are split by role:
//!
//! | role       | RX FIFO | TX FIFO | RTS       | CTS     |
//! |------------|---------|---------|-----------|---------|
//! | foreground | read    | write   | evaluate  | sample  |
//! | interrupt  | write   | read    | evaluate  | sample  |
//!
//! The struct itself has no synchronisation. Firmware places it behind a
//! critical-section mutex; tests drive both roles from one thread.

use crate::fifo::ByteFifo;
use crate::flow::{wants_tx_interrupt, FlowControl, FlowThresholds, LineState};
use crate::frame::{build_and_enqueue_frame, FIFO_SIZE};
use crate::link::{LinkState, Receive};
use crate::values::ControlValues;

/// Both FIFOs plus handshake state
#[derive(Debug, Clone)]
pub struct SerialLink<const RX: usize = FIFO_SIZE, const TX: usize = FIFO_SIZE> {
    rx: ByteFifo<RX>,
    tx: ByteFifo<TX>,
    flow: FlowControl,
    cts: LineState,
    /// Foreground asked the interrupt handler to start transmitting
    tx_kick: bool,
}

impl<const RX: usize, const TX: usize> Default for SerialLink<RX, TX> {
    fn default() -> Self {
        Self::new(FlowThresholds::default())
    }
}

impl<const RX: usize, const TX: usize> SerialLink<RX, TX> {
    /// Create an idle link with empty FIFOs, RTS asserted and CTS assumed
    /// asserted until first sampled
    pub const fn new(thresholds: FlowThresholds) -> Self {
        Self {
            rx: ByteFifo::new(),
            tx: ByteFifo::new(),
            flow: FlowControl::new(thresholds),
            cts: LineState::Asserted,
            tx_kick: false,
        }
    }

    pub fn rx(&self) -> &ByteFifo<RX> {
        &self.rx
    }

    pub fn tx(&self) -> &ByteFifo<TX> {
        &self.tx
    }

    /// Current RTS state (ours)
    pub fn rts(&self) -> LineState {
        self.flow.rts()
    }

    /// Last sampled CTS state (peer's)
    pub fn cts(&self) -> LineState {
        self.cts
    }

    pub fn thresholds(&self) -> FlowThresholds {
        self.flow.thresholds()
    }

    // -- foreground role ---------------------------------------------------

    /// Run one receive pass and re-evaluate RTS
    pub fn receive(&mut self, state: &mut LinkState) -> Receive {
        let outcome = state.poll(&mut self.rx);
        self.flow.evaluate(self.rx.write_space());
        outcome
    }

    /// Queue a frame for `values` if there is room
    ///
    /// `cts` is the peer's handshake line as sampled by the caller. If the
    /// peer accepts data and bytes are queued, a transmit kick is raised for
    /// the interrupt handler. Returns whether the frame was queued.
    pub fn send(&mut self, values: &ControlValues, cts: LineState) -> bool {
        let queued = build_and_enqueue_frame(&mut self.tx, values);
        self.cts = cts;
        if wants_tx_interrupt(self.cts, self.tx.read_size()) {
            self.tx_kick = true;
        }
        queued
    }

    /// Check if a transmit kick is waiting for the interrupt handler
    pub fn tx_kick_requested(&self) -> bool {
        self.tx_kick
    }

    // -- interrupt role ----------------------------------------------------

    /// Store one byte received from hardware
    ///
    /// Returns the byte as `Err` if the RX FIFO is full (byte lost).
    pub fn push_rx(&mut self, byte: u8) -> Result<(), u8> {
        self.rx.put(byte)
    }

    /// Take the next byte to hand to hardware
    pub fn pop_tx(&mut self) -> Option<u8> {
        self.tx.get()
    }

    /// Bytes waiting in the TX FIFO
    pub fn tx_queued(&self) -> usize {
        self.tx.read_size()
    }

    /// Record the peer's CTS line
    pub fn set_cts(&mut self, cts: LineState) {
        self.cts = cts;
    }

    /// Re-evaluate RTS against current RX free space
    pub fn update_rts(&mut self) -> LineState {
        self.flow.evaluate(self.rx.write_space())
    }

    /// Consume a pending transmit kick
    pub fn take_tx_kick(&mut self) -> bool {
        core::mem::replace(&mut self.tx_kick, false)
    }
}
