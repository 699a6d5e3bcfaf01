//! RTS/CTS flow control
//!
//! Both handshake lines use the same polarity: [`LineState::Asserted`] means
//! "pause the direction this line controls".
//!
//! - RTS is driven by us from RX FIFO occupancy with hysteresis: it is
//!   asserted once free space drops to the stop threshold and released only
//!   after free space climbs back to the start threshold.
//! - CTS is driven by the peer and gates our transmitter.

use crate::frame::FRAME_LEN;

/// Free RX bytes at which the peer may resume sending
pub const RX_START_THRESHOLD: usize = 2 * FRAME_LEN;

/// Free RX bytes at which the peer must pause
pub const RX_STOP_THRESHOLD: usize = 6;

/// Logical state of a handshake line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineState {
    /// Traffic allowed (line low)
    Released,
    /// Traffic paused (line high)
    Asserted,
}

impl LineState {
    /// Line state for a physical pin level
    pub fn from_level(high: bool) -> Self {
        if high {
            LineState::Asserted
        } else {
            LineState::Released
        }
    }

    /// Physical pin level for this state
    pub fn is_high(self) -> bool {
        self == LineState::Asserted
    }
}

/// RTS hysteresis thresholds, in free RX FIFO bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlowThresholds {
    /// Release RTS once `write_space >= start`
    pub start: usize,
    /// Assert RTS once `write_space <= stop`
    pub stop: usize,
}

impl Default for FlowThresholds {
    fn default() -> Self {
        Self {
            start: RX_START_THRESHOLD,
            stop: RX_STOP_THRESHOLD,
        }
    }
}

/// Receive-side backpressure
#[derive(Debug, Clone)]
pub struct FlowControl {
    thresholds: FlowThresholds,
    rts: LineState,
}

impl FlowControl {
    /// Create a controller with RTS asserted
    ///
    /// The peer stays paused until the first evaluation sees enough room.
    pub const fn new(thresholds: FlowThresholds) -> Self {
        Self {
            thresholds,
            rts: LineState::Asserted,
        }
    }

    pub fn thresholds(&self) -> FlowThresholds {
        self.thresholds
    }

    pub fn rts(&self) -> LineState {
        self.rts
    }

    /// Re-evaluate RTS for the current RX free space
    ///
    /// Between the two thresholds the previous state is kept.
    pub fn evaluate(&mut self, rx_write_space: usize) -> LineState {
        if rx_write_space >= self.thresholds.start {
            self.rts = LineState::Released;
        } else if rx_write_space <= self.thresholds.stop {
            self.rts = LineState::Asserted;
        }
        self.rts
    }
}

/// Check if one more byte may be moved from the TX FIFO to hardware
pub fn may_transmit(cts: LineState, queued: usize, hw_full: bool) -> bool {
    cts == LineState::Released && queued > 0 && !hw_full
}

/// Check if the transmit interrupt source should be enabled
pub fn wants_tx_interrupt(cts: LineState, queued: usize) -> bool {
    cts == LineState::Released && queued > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_asserted() {
        let flow = FlowControl::new(FlowThresholds::default());
        assert_eq!(flow.rts(), LineState::Asserted);
    }

    #[test]
    fn test_release_and_assert() {
        let mut flow = FlowControl::new(FlowThresholds::default());
        assert_eq!(flow.evaluate(21), LineState::Released);
        assert_eq!(flow.evaluate(6), LineState::Asserted);
        assert_eq!(flow.evaluate(10), LineState::Released);
    }

    #[test]
    fn test_hysteresis_band_keeps_state() {
        let mut flow = FlowControl::new(FlowThresholds::default());

        // Asserted: climbing through the band does not release
        for space in 0..10 {
            assert_eq!(flow.evaluate(space), LineState::Asserted);
        }
        assert_eq!(flow.evaluate(10), LineState::Released);

        // Released: falling through the band does not assert
        for space in (7..10).rev() {
            assert_eq!(flow.evaluate(space), LineState::Released);
        }
        assert_eq!(flow.evaluate(6), LineState::Asserted);
        assert_eq!(flow.evaluate(7), LineState::Asserted);
    }

    #[test]
    fn test_transmit_gating() {
        assert!(may_transmit(LineState::Released, 1, false));
        assert!(!may_transmit(LineState::Asserted, 1, false));
        assert!(!may_transmit(LineState::Released, 0, false));
        assert!(!may_transmit(LineState::Released, 1, true));

        assert!(wants_tx_interrupt(LineState::Released, 5));
        assert!(!wants_tx_interrupt(LineState::Released, 0));
        assert!(!wants_tx_interrupt(LineState::Asserted, 5));
    }

    #[test]
    fn test_line_levels() {
        assert_eq!(LineState::from_level(true), LineState::Asserted);
        assert_eq!(LineState::from_level(false), LineState::Released);
        assert!(LineState::Asserted.is_high());
        assert!(!LineState::Released.is_high());
    }
}
