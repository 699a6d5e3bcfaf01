//! Local input/output collaborators

use servolink_protocol::ControlValues;

use crate::status::StatusLines;

/// Source of locally sampled settings (potentiometers, ADC smoothing)
pub trait SettingsSource {
    /// Take one sample
    ///
    /// Called exactly once per control cycle, in both link modes.
    fn sample(&mut self) -> ControlValues;
}

/// Output stage driven by the active settings (motor PWM, servo)
pub trait ControlOutput {
    fn apply(&mut self, values: &ControlValues);
}

/// Character display receiving preformatted lines
pub trait StatusDisplay {
    fn show(&mut self, lines: &StatusLines);
}

/// Diagnostic indicator toggled on checksum errors
pub trait Indicator {
    fn toggle(&mut self);
}
