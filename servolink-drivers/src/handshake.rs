//! RTS/CTS handshake pins
//!
//! Both lines are active-high: a high level means "pause".

use embedded_hal::digital::{InputPin, OutputPin};
use servolink_protocol::LineState;

/// Handshake pin pair
pub struct Handshake<RTS, CTS> {
    rts: RTS,
    cts: CTS,
}

impl<RTS: OutputPin, CTS: InputPin> Handshake<RTS, CTS> {
    /// Take ownership of the pins and assert RTS
    ///
    /// The peer stays paused until the receive side has evaluated its
    /// free space at least once.
    pub fn new(rts: RTS, cts: CTS) -> Self {
        let mut handshake = Self { rts, cts };
        handshake.drive_rts(LineState::Asserted);
        handshake
    }

    /// Drive our RTS output
    pub fn drive_rts(&mut self, state: LineState) {
        // GPIO writes on the supported targets are infallible
        let _ = if state.is_high() {
            self.rts.set_high()
        } else {
            self.rts.set_low()
        };
    }

    /// Sample the peer's CTS input
    ///
    /// A failed read is reported as asserted so the transmitter holds off.
    pub fn sample_cts(&mut self) -> LineState {
        match self.cts.is_high() {
            Ok(high) => LineState::from_level(high),
            Err(_) => LineState::Asserted,
        }
    }

    /// Release the pins
    pub fn into_inner(self) -> (RTS, CTS) {
        (self.rts, self.cts)
    }
}


#[cfg(test)]
mod tests {
    use super::mock::{BrokenInput, MockInput, MockOutput};
    use super::*;

    #[test]
    fn test_rts_starts_asserted() {
        let handshake = Handshake::new(MockOutput::default(), MockInput::default());
        let (rts, _) = handshake.into_inner();
        assert!(rts.high);
    }

    #[test]
    fn test_drive_rts() {
        let mut handshake = Handshake::new(MockOutput::default(), MockInput::default());
        handshake.drive_rts(LineState::Released);
        assert!(!handshake.rts.high);
        handshake.drive_rts(LineState::Asserted);
        assert!(handshake.rts.high);
    }

    #[test]
    fn test_sample_cts() {
        let mut handshake = Handshake::new(MockOutput::default(), MockInput { high: false });
        assert_eq!(handshake.sample_cts(), LineState::Released);
        handshake.cts.high = true;
        assert_eq!(handshake.sample_cts(), LineState::Asserted);
    }

    #[test]
    fn test_cts_read_error_holds_transmitter() {
        let mut handshake = Handshake::new(MockOutput::default(), BrokenInput);
        assert_eq!(handshake.sample_cts(), LineState::Asserted);
    }
}
