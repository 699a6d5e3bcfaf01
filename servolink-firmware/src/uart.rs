//! UART0 register access
//!
//! Implements [`SerialPort`] directly on the PL011 registers. Pin muxing,
//! baud rate and line format are set up by `embassy_rp::uart::Uart`; this
//! type only touches the interrupt, status and data registers, and only
//! from the UART0 interrupt.

use embassy_rp::{pac, uart};
use servolink_hal::uart::{DataBits, Parity, StopBits};
use servolink_hal::{IrqSource, LineErrors, SerialPort, UartConfig};

/// Translate a line format into the embassy driver configuration
pub fn driver_config(line: &UartConfig) -> uart::Config {
    let mut config = uart::Config::default();
    config.baudrate = line.baudrate;
    config.data_bits = match line.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    config.parity = match line.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    config.stop_bits = match line.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    config
}

/// Register handle for UART0
pub struct Uart0Port {
    regs: pac::uart::Uart,
}

impl Uart0Port {
    /// Take the UART0 register block
    ///
    /// The peripheral must already be configured, see
    /// `embassy_rp::uart::Uart::new_blocking`.
    pub fn new() -> Self {
        Self { regs: pac::UART0 }
    }
}

impl SerialPort for Uart0Port {
    fn is_pending(&self, source: IrqSource) -> bool {
        // UARTMIS is already masked by UARTIMSC
        let mis = self.regs.uartmis().read();
        match source {
            IrqSource::Error => mis.oemis() || mis.femis() || mis.pemis() || mis.bemis(),
            IrqSource::Receive => mis.rxmis() || mis.rtmis(),
            IrqSource::Transmit => mis.txmis(),
        }
    }

    fn clear_pending(&mut self, source: IrqSource) {
        self.regs.uarticr().write(|w| match source {
            IrqSource::Error => {
                w.set_oeic(true);
                w.set_feic(true);
                w.set_peic(true);
                w.set_beic(true);
            }
            IrqSource::Receive => {
                w.set_rxic(true);
                w.set_rtic(true);
            }
            IrqSource::Transmit => w.set_txic(true),
        });
    }

    fn enable(&mut self, source: IrqSource) {
        self.regs.uartimsc().modify(|w| match source {
            IrqSource::Error => {
                w.set_oeim(true);
                w.set_feim(true);
                w.set_peim(true);
                w.set_beim(true);
            }
            IrqSource::Receive => {
                w.set_rxim(true);
                w.set_rtim(true);
            }
            IrqSource::Transmit => w.set_txim(true),
        });
    }

    fn disable(&mut self, source: IrqSource) {
        self.regs.uartimsc().modify(|w| match source {
            IrqSource::Error => {
                w.set_oeim(false);
                w.set_feim(false);
                w.set_peim(false);
                w.set_beim(false);
            }
            IrqSource::Receive => {
                w.set_rxim(false);
                w.set_rtim(false);
            }
            IrqSource::Transmit => w.set_txim(false),
        });
    }

    fn is_enabled(&self, source: IrqSource) -> bool {
        let imsc = self.regs.uartimsc().read();
        match source {
            IrqSource::Error => imsc.oeim(),
            IrqSource::Receive => imsc.rxim(),
            IrqSource::Transmit => imsc.txim(),
        }
    }

    fn line_errors(&self) -> LineErrors {
        let rsr = self.regs.uartrsr().read();
        LineErrors {
            overrun: rsr.oe(),
            framing: rsr.fe(),
            parity: rsr.pe(),
        }
    }

    fn clear_overrun(&mut self) {
        // Any write to UARTECR clears all receive status bits
        self.regs.uartrsr().write(|_| {});
    }

    fn rx_ready(&self) -> bool {
        !self.regs.uartfr().read().rxfe()
    }

    fn read_byte(&mut self) -> u8 {
        self.regs.uartdr().read().data()
    }

    fn tx_full(&self) -> bool {
        self.regs.uartfr().read().txff()
    }

    fn write_byte(&mut self, byte: u8) {
        self.regs.uartdr().write(|w| w.set_data(byte));
    }
}
