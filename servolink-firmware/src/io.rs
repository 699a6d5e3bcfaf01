//! Board-side collaborators of the control cycle
//!
//! - [`PotSettings`]: two potentiometers on the ADC
//! - [`ServoOutput`]: reports the settings the output stage should apply
//! - [`RttDisplay`]: mirrors the status lines to the RTT log

use defmt::*;

use servolink_core::traits::{ControlOutput, SettingsSource, StatusDisplay};
use servolink_core::StatusLines;
use servolink_protocol::values::{ANGLE_LIMIT, SPEED_LIMIT};
use servolink_protocol::ControlValues;

/// Full-scale reading of the 12-bit ADC
const ADC_MAX: i32 = 4095;

/// Smoothing weight, as a power of two
const SMOOTHING_SHIFT: u32 = 3;

/// Exponential moving average, new readings weighted 1/8
#[derive(Default)]
struct Smoother {
    sum: i32,
    primed: bool,
}

impl Smoother {
    fn feed(&mut self, raw: u16) -> i32 {
        let raw = raw as i32;
        if !self.primed {
            self.sum = raw << SMOOTHING_SHIFT;
            self.primed = true;
        } else {
            self.sum += raw - (self.sum >> SMOOTHING_SHIFT);
        }
        self.sum >> SMOOTHING_SHIFT
    }
}

/// Map a raw reading onto `-limit..=limit`
fn scale(raw: i32, limit: i8) -> i8 {
    let limit = limit as i32;
    let scaled = raw.clamp(0, ADC_MAX) * (2 * limit + 1) / (ADC_MAX + 1) - limit;
    scaled as i8
}

/// Speed and angle potentiometers
#[derive(Default)]
pub struct PotSettings {
    speed: Smoother,
    angle: Smoother,
    latest: ControlValues,
}

impl PotSettings {
    /// Fold in new readings; a failed conversion keeps the previous value
    pub fn update(&mut self, speed_raw: Option<u16>, angle_raw: Option<u16>) {
        if let Some(raw) = speed_raw {
            self.latest.set_speed(scale(self.speed.feed(raw), SPEED_LIMIT));
        }
        if let Some(raw) = angle_raw {
            self.latest.set_angle(scale(self.angle.feed(raw), ANGLE_LIMIT));
        }
    }
}

impl SettingsSource for PotSettings {
    fn sample(&mut self) -> ControlValues {
        self.latest
    }
}

/// Output stage stand-in, logs the servo position on change
#[derive(Default)]
pub struct ServoOutput {
    last: Option<ControlValues>,
}

impl ControlOutput for ServoOutput {
    fn apply(&mut self, values: &ControlValues) {
        if self.last != Some(*values) {
            debug!(
                "Output: speed {=i8}, servo {=u8} deg",
                values.speed(),
                values.servo_position()
            );
            self.last = Some(*values);
        }
    }
}

/// Status display mirrored to RTT, logs only when a line changes
#[derive(Default)]
pub struct RttDisplay {
    shown: StatusLines,
}

impl StatusDisplay for RttDisplay {
    fn show(&mut self, lines: &StatusLines) {
        if self.shown == *lines {
            return;
        }
        for line in lines.iter() {
            info!("| {=str}", line.as_str());
        }
        self.shown = lines.clone();
    }
}
