//! Periodic control cycle
//!
//! One [`ControlCycle::run`] call per timer tick:
//!
//! 1. Receive at most one frame; a CRC mismatch toggles the indicator
//! 2. Sample local settings
//! 3. Pick the active settings: local in [`LinkMode::Local`], the last
//!    valid remote frame in [`LinkMode::Remote`]
//! 4. Drive the output stage and refresh the display
//! 5. Every `send_period`-th cycle, send the local settings to the peer
//!
//! The local settings are what gets sent in both modes, so each side
//! always reports its own potentiometers to the other.

use servolink_protocol::{ControlValues, LinkMode, LinkState, Receive};

use crate::config::LinkConfig;
use crate::status::status_lines;
use crate::traits::{ControlOutput, Indicator, SettingsSource, StatusDisplay, Transport};

/// What happened during one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Link mode after the receive pass
    pub mode: LinkMode,
    /// Mode differs from the previous cycle
    pub mode_changed: bool,
    /// Outcome of the receive pass
    pub received: Receive,
    /// `None` when this was not a send cycle, otherwise whether the frame
    /// was queued
    pub sent: Option<bool>,
    /// Settings handed to the output stage
    pub active: ControlValues,
}

/// Control loop state
#[derive(Debug, Clone)]
pub struct ControlCycle {
    link: LinkState,
    send_period: u8,
    /// Cycles since the last send
    since_send: u8,
    local: ControlValues,
    remote: ControlValues,
}

impl ControlCycle {
    /// Create a cycle in local mode
    ///
    /// A zero send period is treated as 1 (send every cycle).
    pub fn new(config: &LinkConfig) -> Self {
        Self {
            link: config.link_state(),
            send_period: config.send_period.max(1),
            since_send: 0,
            local: ControlValues::default(),
            remote: ControlValues::default(),
        }
    }

    pub fn mode(&self) -> LinkMode {
        self.link.mode()
    }

    pub fn link(&self) -> &LinkState {
        &self.link
    }

    /// Last locally sampled settings
    pub fn local(&self) -> ControlValues {
        self.local
    }

    /// Last valid remote settings
    pub fn remote(&self) -> ControlValues {
        self.remote
    }

    /// Settings currently driving the output stage
    pub fn active(&self) -> ControlValues {
        match self.link.mode() {
            LinkMode::Local => self.local,
            LinkMode::Remote => self.remote,
        }
    }

    /// Run one control cycle
    pub fn run(
        &mut self,
        transport: &mut impl Transport,
        source: &mut impl SettingsSource,
        output: &mut impl ControlOutput,
        display: &mut impl StatusDisplay,
        indicator: &mut impl Indicator,
    ) -> CycleReport {
        let previous_mode = self.link.mode();

        let received = transport.receive(&mut self.link);
        match received {
            Receive::Frame(values) => self.remote = values,
            Receive::ChecksumError => indicator.toggle(),
            Receive::Idle | Receive::Desync(_) => {}
        }

        self.local = source.sample();

        let mode = self.link.mode();
        let active = self.active();
        output.apply(&active);
        display.show(&status_lines(&active, mode));

        self.since_send += 1;
        let sent = if self.since_send >= self.send_period {
            self.since_send = 0;
            Some(transport.send(&self.local))
        } else {
            None
        };

        CycleReport {
            mode,
            mode_changed: mode != previous_mode,
            received,
            sent,
            active,
        }
    }
}
