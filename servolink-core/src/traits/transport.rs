//! Foreground view of the serial transport

use servolink_protocol::{ControlValues, LinkState, Receive, SerialLink};

/// Foreground side of the transport
///
/// Implementations only touch the FIFOs and handshake state; hardware
/// registers stay with the interrupt handler.
pub trait Transport {
    /// Run one receive pass against `state`
    fn receive(&mut self, state: &mut LinkState) -> Receive;

    /// Queue one frame, best effort
    ///
    /// Returns whether the frame was queued.
    fn send(&mut self, values: &ControlValues) -> bool;
}

/// Direct access, used when both roles run in the same context (tests,
/// loopback)
///
/// CTS is taken from the last value recorded with [`SerialLink::set_cts`].
impl<const RX: usize, const TX: usize> Transport for SerialLink<RX, TX> {
    fn receive(&mut self, state: &mut LinkState) -> Receive {
        SerialLink::receive(self, state)
    }

    fn send(&mut self, values: &ControlValues) -> bool {
        let cts = self.cts();
        SerialLink::send(self, values, cts)
    }
}
