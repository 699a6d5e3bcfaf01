//! UART interrupt service routine
//!
//! The single UART vector services three sources, always in this order:
//!
//! ```text
//!   ┌─────────┐   clear flag, clear overrun, flush hardware RX
//!   │  Error  │──────────────────────────────────────────────────┐
//!   └─────────┘                                                  │
//!   ┌─────────┐   hardware RX ──▶ RX FIFO, assert RTS when full  │
//!   │ Receive │──────────────────────────────────────────────────┤
//!   └─────────┘                                                  │
//!   ┌─────────┐   TX FIFO ──▶ hardware TX while CTS released     │
//!   │Transmit │   (also entered on a software kick)              │
//!   └─────────┘──────────────────────────────────────────────────┘
//! ```
//!
//! The handler only moves bytes. It never decodes frames or touches the
//! link mode; that is the foreground's job.

use embedded_hal::digital::{InputPin, OutputPin};
use servolink_hal::{IrqSource, SerialPort};
use servolink_protocol::flow::{may_transmit, wants_tx_interrupt};
use servolink_protocol::SerialLink;

use crate::handshake::Handshake;

/// Interrupt-side counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrqStats {
    /// Handler invocations
    pub interrupts: u32,
    /// Bytes stored in the RX FIFO
    pub rx_bytes: u32,
    /// Bytes lost because the RX FIFO was full
    pub rx_dropped: u32,
    /// Bytes flushed from hardware after a line error
    pub rx_discarded: u32,
    /// Bytes handed to the hardware transmitter
    pub tx_bytes: u32,
    pub overruns: u32,
    pub framing_errors: u32,
    pub parity_errors: u32,
}

/// UART interrupt handler state
#[derive(Debug, Default)]
pub struct UartIrqHandler {
    stats: IrqStats,
}

impl UartIrqHandler {
    pub const fn new() -> Self {
        Self {
            stats: IrqStats {
                interrupts: 0,
                rx_bytes: 0,
                rx_dropped: 0,
                rx_discarded: 0,
                tx_bytes: 0,
                overruns: 0,
                framing_errors: 0,
                parity_errors: 0,
            },
        }
    }

    pub fn stats(&self) -> IrqStats {
        self.stats
    }

    /// Service one UART interrupt
    ///
    /// Call from the UART vector, and from a software-pended interrupt after
    /// the foreground raised a transmit kick.
    pub fn on_interrupt<P, RTS, CTS, const RX: usize, const TX: usize>(
        &mut self,
        port: &mut P,
        link: &mut SerialLink<RX, TX>,
        handshake: &mut Handshake<RTS, CTS>,
    ) where
        P: SerialPort,
        RTS: OutputPin,
        CTS: InputPin,
    {
        self.stats.interrupts = self.stats.interrupts.wrapping_add(1);

        if port.is_pending(IrqSource::Error) {
            self.service_error(port);
        }

        if port.is_pending(IrqSource::Receive) {
            self.service_receive(port, link, handshake);
        }

        let kicked = link.take_tx_kick();
        if kicked || port.is_pending(IrqSource::Transmit) {
            self.service_transmit(port, link, handshake);
        }
    }

    fn service_error<P: SerialPort>(&mut self, port: &mut P) {
        let errors = port.line_errors();
        if errors.overrun {
            self.stats.overruns = self.stats.overruns.wrapping_add(1);
        }
        if errors.framing {
            self.stats.framing_errors = self.stats.framing_errors.wrapping_add(1);
        }
        if errors.parity {
            self.stats.parity_errors = self.stats.parity_errors.wrapping_add(1);
        }

        port.clear_pending(IrqSource::Error);
        port.clear_overrun();

        // Whatever is left in hardware is suspect
        let discarded = port.discard_rx() as u32;
        self.stats.rx_discarded = self.stats.rx_discarded.wrapping_add(discarded);

        #[cfg(feature = "defmt")]
        defmt::warn!("UART line error {}, discarded {=u32} bytes", errors, discarded);
    }

    fn service_receive<P, RTS, CTS, const RX: usize, const TX: usize>(
        &mut self,
        port: &mut P,
        link: &mut SerialLink<RX, TX>,
        handshake: &mut Handshake<RTS, CTS>,
    ) where
        P: SerialPort,
        RTS: OutputPin,
        CTS: InputPin,
    {
        if port.line_errors().any() {
            port.clear_overrun();
        } else {
            while port.rx_ready() {
                let byte = port.read_byte();
                if link.push_rx(byte).is_ok() {
                    self.stats.rx_bytes = self.stats.rx_bytes.wrapping_add(1);
                } else {
                    self.stats.rx_dropped = self.stats.rx_dropped.wrapping_add(1);
                }
            }
            port.clear_pending(IrqSource::Receive);
        }

        let rts = link.update_rts();
        handshake.drive_rts(rts);
    }

    fn service_transmit<P, RTS, CTS, const RX: usize, const TX: usize>(
        &mut self,
        port: &mut P,
        link: &mut SerialLink<RX, TX>,
        handshake: &mut Handshake<RTS, CTS>,
    ) where
        P: SerialPort,
        RTS: OutputPin,
        CTS: InputPin,
    {
        let cts = handshake.sample_cts();
        link.set_cts(cts);

        while may_transmit(cts, link.tx_queued(), port.tx_full()) {
            let Some(byte) = link.pop_tx() else {
                break;
            };
            port.write_byte(byte);
            self.stats.tx_bytes = self.stats.tx_bytes.wrapping_add(1);
        }

        // An enabled source on an empty queue would fire continuously
        let wanted = wants_tx_interrupt(cts, link.tx_queued());
        if wanted != port.is_enabled(IrqSource::Transmit) {
            if wanted {
                port.enable(IrqSource::Transmit);
            } else {
                port.disable(IrqSource::Transmit);
            }
        }
        port.clear_pending(IrqSource::Transmit);
    }
}
