//! UART register abstractions
//!
//! Models the small set of operations an interrupt service routine performs
//! on a UART peripheral: interrupt flag management, line error inspection,
//! and single-byte transfers to and from the hardware FIFOs.
//!
//! Every method is non-blocking. Only the interrupt context may own a
//! [`SerialPort`].

/// Interrupt sources serviced by the single UART vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqSource {
    /// Overrun, framing or parity error
    Error,
    /// Receive data available (or receive timeout)
    Receive,
    /// Transmit register has room
    Transmit,
}

/// Snapshot of the receiver error flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineErrors {
    /// Receiver overrun (a byte arrived while the hardware FIFO was full)
    pub overrun: bool,
    /// Framing error (missing stop bit)
    pub framing: bool,
    /// Parity mismatch
    pub parity: bool,
}

impl LineErrors {
    /// No error flag set
    pub const NONE: Self = Self {
        overrun: false,
        framing: false,
        parity: false,
    };

    /// Check if any error flag is set
    pub fn any(&self) -> bool {
        self.overrun || self.framing || self.parity
    }
}

/// Register-level UART access for interrupt handlers
pub trait SerialPort {
    /// Check if `source` has its flag raised *and* is enabled
    fn is_pending(&self, source: IrqSource) -> bool;

    /// Acknowledge the interrupt flag of `source`
    fn clear_pending(&mut self, source: IrqSource);

    /// Enable `source` as an interrupt trigger
    fn enable(&mut self, source: IrqSource);

    /// Disable `source` as an interrupt trigger
    fn disable(&mut self, source: IrqSource);

    /// Check if `source` is currently enabled
    fn is_enabled(&self, source: IrqSource) -> bool;

    /// Read the current receiver error flags
    fn line_errors(&self) -> LineErrors;

    /// Clear a latched receiver overrun
    fn clear_overrun(&mut self);

    /// Check if at least one received byte is waiting in hardware
    fn rx_ready(&self) -> bool;

    /// Pop one byte from the hardware receive FIFO
    ///
    /// Only meaningful when [`rx_ready`](Self::rx_ready) returned true.
    fn read_byte(&mut self) -> u8;

    /// Check if the hardware transmit FIFO is full
    fn tx_full(&self) -> bool;

    /// Push one byte into the hardware transmit FIFO
    ///
    /// Only meaningful when [`tx_full`](Self::tx_full) returned false.
    fn write_byte(&mut self, byte: u8);

    /// Drain and discard everything in the hardware receive FIFO
    ///
    /// Returns the number of bytes thrown away.
    fn discard_rx(&mut self) -> usize {
        let mut count = 0;
        while self.rx_ready() {
            let _ = self.read_byte();
            count += 1;
        }
        count
    }
}

/// Default line speed in bits per second
pub const DEFAULT_BAUDRATE: u32 = 57_600;

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopBits {
    One,
    Two,
}
