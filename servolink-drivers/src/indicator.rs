//! LED error indicator

use embedded_hal::digital::StatefulOutputPin;
use servolink_core::traits::Indicator;

/// Indicator backed by a GPIO output
pub struct PinIndicator<P> {
    pin: P,
}

impl<P: StatefulOutputPin> PinIndicator<P> {
    /// Wrap `pin`, starting with the LED off
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_low();
        Self { pin }
    }

    /// Check if the LED is currently lit
    pub fn is_lit(&mut self) -> bool {
        self.pin.is_set_high().unwrap_or(false)
    }
}

impl<P: StatefulOutputPin> Indicator for PinIndicator<P> {
    fn toggle(&mut self) {
        let _ = self.pin.toggle();
    }
}
