//! Control values carried by the link
//!
//! A [`ControlValues`] record holds the two signed settings plus their
//! magnitudes. The magnitudes are derived: they are recomputed on every
//! change and can't be set independently.
//!
//! Angle convention: the angle is a signed offset from the servo centre
//! position, nominally `-90..=90`. [`ControlValues::servo_position`] maps it
//! back to the absolute `0..=180` range used by the output stage.

/// Largest speed magnitude the application produces
pub const SPEED_LIMIT: i8 = 99;

/// Largest angle offset (either side of centre) the application produces
pub const ANGLE_LIMIT: i8 = 90;

/// Servo centre position in degrees
pub const SERVO_CENTER: u8 = 90;

/// Speed and angle settings with derived magnitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlValues {
    speed: i8,
    angle: i8,
    abs_speed: u8,
    abs_angle: u8,
}

impl ControlValues {
    /// Build a record from raw settings
    ///
    /// Values are stored exactly as given; frames received from the wire are
    /// not range-checked beyond their CRC.
    pub const fn new(speed: i8, angle: i8) -> Self {
        Self {
            speed,
            angle,
            abs_speed: speed.unsigned_abs(),
            abs_angle: angle.unsigned_abs(),
        }
    }

    /// Build a record from wider intermediate values, clamping to the
    /// application ranges (`±SPEED_LIMIT`, `±ANGLE_LIMIT`)
    pub fn clamped(speed: i16, angle: i16) -> Self {
        let speed = speed.clamp(-(SPEED_LIMIT as i16), SPEED_LIMIT as i16) as i8;
        let angle = angle.clamp(-(ANGLE_LIMIT as i16), ANGLE_LIMIT as i16) as i8;
        Self::new(speed, angle)
    }

    /// Signed speed setting
    pub const fn speed(&self) -> i8 {
        self.speed
    }

    /// Signed angle offset from centre
    pub const fn angle(&self) -> i8 {
        self.angle
    }

    /// Speed magnitude
    pub const fn abs_speed(&self) -> u8 {
        self.abs_speed
    }

    /// Angle magnitude
    pub const fn abs_angle(&self) -> u8 {
        self.abs_angle
    }

    pub fn set_speed(&mut self, speed: i8) {
        self.speed = speed;
        self.abs_speed = speed.unsigned_abs();
    }

    pub fn set_angle(&mut self, angle: i8) {
        self.angle = angle;
        self.abs_angle = angle.unsigned_abs();
    }

    /// Absolute servo position in degrees (`0..=180`)
    pub fn servo_position(&self) -> u8 {
        (SERVO_CENTER as i16 + self.angle as i16).clamp(0, 180) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitudes_follow_settings() {
        let mut values = ControlValues::new(-20, 45);
        assert_eq!(values.abs_speed(), 20);
        assert_eq!(values.abs_angle(), 45);

        values.set_speed(7);
        values.set_angle(-90);
        assert_eq!(values.speed(), 7);
        assert_eq!(values.abs_speed(), 7);
        assert_eq!(values.abs_angle(), 90);
    }

    #[test]
    fn test_extreme_negative_magnitude() {
        let values = ControlValues::new(i8::MIN, i8::MIN);
        assert_eq!(values.abs_speed(), 128);
        assert_eq!(values.abs_angle(), 128);
    }

    #[test]
    fn test_clamped() {
        let values = ControlValues::clamped(150, -300);
        assert_eq!(values.speed(), SPEED_LIMIT);
        assert_eq!(values.angle(), -ANGLE_LIMIT);
    }

    #[test]
    fn test_servo_position() {
        assert_eq!(ControlValues::new(0, 0).servo_position(), 90);
        assert_eq!(ControlValues::new(0, -90).servo_position(), 0);
        assert_eq!(ControlValues::new(0, 90).servo_position(), 180);
        assert_eq!(ControlValues::new(0, 127).servo_position(), 180);
    }
}
