//! Configuration type definitions

use servolink_hal::UartConfig;
use servolink_protocol::{
    FlowThresholds, LinkState, DEFAULT_SILENCE_CEILING, FIFO_SIZE, FRAME_LEN,
    RX_START_THRESHOLD, RX_STOP_THRESHOLD,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default cycles between two outgoing frames
pub const DEFAULT_SEND_PERIOD: u8 = 6;

/// Default control cycle period in milliseconds
pub const DEFAULT_CYCLE_PERIOD_MS: u16 = 20;

/// Default time the splash screen is held before the first cycle
pub const DEFAULT_STARTUP_HOLD_MS: u16 = 3000;

/// Largest start threshold the receive path can always reach
///
/// After a desync up to `FRAME_LEN - 1` stray bytes can sit in the RX FIFO
/// and are only consumed once the rest of a frame arrives. RTS must be
/// released while they are there, or the peer never sends those bytes.
pub const MAX_START_THRESHOLD: usize = FIFO_SIZE - (FRAME_LEN - 1);

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// RTS start threshold must be above the stop threshold
    NoHysteresis,
    /// A threshold exceeds the RX FIFO capacity
    ThresholdTooLarge,
    /// Start threshold can't be reached with a partial frame buffered
    StartUnreachable,
    /// Start threshold leaves no room for a whole frame
    StartBelowFrame,
    /// Silence ceiling of zero
    ZeroCeiling,
    /// Send period of zero
    ZeroSendPeriod,
    /// Cycle period of zero
    ZeroCyclePeriod,
    /// Baud rate of zero
    ZeroBaudrate,
}

/// Link and control cycle configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// Free RX bytes at which RTS is released
    pub rx_start_threshold: usize,
    /// Free RX bytes at which RTS is asserted
    pub rx_stop_threshold: usize,
    /// Silent cycles before falling back to local mode
    pub silence_ceiling: u8,
    /// Cycles between two outgoing frames
    pub send_period: u8,
    /// Control cycle period (ms)
    pub cycle_period_ms: u16,
    /// Delay before the first control cycle (ms)
    pub startup_hold_ms: u16,
    /// UART line format
    pub uart: UartConfig,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            rx_start_threshold: RX_START_THRESHOLD,
            rx_stop_threshold: RX_STOP_THRESHOLD,
            silence_ceiling: DEFAULT_SILENCE_CEILING,
            send_period: DEFAULT_SEND_PERIOD,
            cycle_period_ms: DEFAULT_CYCLE_PERIOD_MS,
            startup_hold_ms: DEFAULT_STARTUP_HOLD_MS,
            uart: UartConfig::default(),
        }
    }
}

impl LinkConfig {
    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rx_start_threshold <= self.rx_stop_threshold {
            return Err(ConfigError::NoHysteresis);
        }
        if self.rx_start_threshold > FIFO_SIZE {
            return Err(ConfigError::ThresholdTooLarge);
        }
        if self.rx_start_threshold > MAX_START_THRESHOLD {
            return Err(ConfigError::StartUnreachable);
        }
        if self.rx_start_threshold < FRAME_LEN {
            return Err(ConfigError::StartBelowFrame);
        }
        if self.silence_ceiling == 0 {
            return Err(ConfigError::ZeroCeiling);
        }
        if self.send_period == 0 {
            return Err(ConfigError::ZeroSendPeriod);
        }
        if self.cycle_period_ms == 0 {
            return Err(ConfigError::ZeroCyclePeriod);
        }
        if self.uart.baudrate == 0 {
            return Err(ConfigError::ZeroBaudrate);
        }
        Ok(())
    }

    /// RTS thresholds for the flow controller
    pub fn flow_thresholds(&self) -> FlowThresholds {
        FlowThresholds {
            start: self.rx_start_threshold,
            stop: self.rx_stop_threshold,
        }
    }

    /// Fresh link state using the configured silence ceiling
    pub fn link_state(&self) -> LinkState {
        LinkState::new(self.silence_ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use servolink_protocol::{LineState, Receive, SerialLink};

    #[test]
    fn test_default_is_valid() {
        let config = LinkConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.flow_thresholds(), FlowThresholds { start: 10, stop: 6 });
        assert_eq!(config.link_state().ceiling(), 10);
    }

    #[test]
    fn test_thresholds_must_differ() {
        let config = LinkConfig {
            rx_start_threshold: 6,
            rx_stop_threshold: 6,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoHysteresis));
    }

    #[test]
    fn test_threshold_within_fifo() {
        let config = LinkConfig {
            rx_start_threshold: FIFO_SIZE + 1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ThresholdTooLarge));
    }

    #[test]
    fn test_start_reachable_with_partial_frame() {
        let full = LinkConfig {
            rx_start_threshold: FIFO_SIZE,
            ..Default::default()
        };
        assert_eq!(full.validate(), Err(ConfigError::StartUnreachable));

        let edge = LinkConfig {
            rx_start_threshold: MAX_START_THRESHOLD + 1,
            ..Default::default()
        };
        assert_eq!(edge.validate(), Err(ConfigError::StartUnreachable));

        let max = LinkConfig {
            rx_start_threshold: MAX_START_THRESHOLD,
            ..Default::default()
        };
        assert_eq!(max.validate(), Ok(()));
    }

    #[test]
    fn test_max_start_releases_rts_after_desync() {
        let config = LinkConfig {
            rx_start_threshold: MAX_START_THRESHOLD,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));

        let mut link: SerialLink = SerialLink::new(config.flow_thresholds());
        let mut state = config.link_state();

        // Stray tail of a frame: too short to ever be consumed on its own
        for byte in [0x01, 0x02, 0x03, 0x04] {
            link.push_rx(byte).unwrap();
        }
        assert_eq!(link.receive(&mut state), Receive::Idle);
        assert_eq!(link.rx().read_size(), FRAME_LEN - 1);
        assert_eq!(link.rts(), LineState::Released);
    }

    #[test]
    fn test_start_fits_a_frame() {
        let config = LinkConfig {
            rx_start_threshold: 4,
            rx_stop_threshold: 2,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::StartBelowFrame));
    }

    #[test]
    fn test_zero_values_rejected() {
        let zero_ceiling = LinkConfig {
            silence_ceiling: 0,
            ..Default::default()
        };
        assert_eq!(zero_ceiling.validate(), Err(ConfigError::ZeroCeiling));

        let zero_period = LinkConfig {
            send_period: 0,
            ..Default::default()
        };
        assert_eq!(zero_period.validate(), Err(ConfigError::ZeroSendPeriod));

        let zero_cycle = LinkConfig {
            cycle_period_ms: 0,
            ..Default::default()
        };
        assert_eq!(zero_cycle.validate(), Err(ConfigError::ZeroCyclePeriod));

        let zero_baud = LinkConfig {
            uart: UartConfig {
                baudrate: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(zero_baud.validate(), Err(ConfigError::ZeroBaudrate));
    }
}
