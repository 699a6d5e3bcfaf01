//! Status display lines
//!
//! Formats the active settings into four fixed lines for a 4x20 character
//! display:
//!
//! ```text
//! Remote Settings
//! Speed:     +5
//! AbsSpeed:   5
//! Angle:     45
//! ```

use core::fmt::Write;

use heapless::String;
use servolink_protocol::{ControlValues, LinkMode};

/// Display width in characters
pub const LINE_WIDTH: usize = 20;

/// Number of display lines
pub const LINE_COUNT: usize = 4;

/// Column (0-based) where values start
const VALUE_COLUMN: usize = 10;

/// One display line
pub type StatusLine = String<LINE_WIDTH>;

/// All display lines
pub type StatusLines = [StatusLine; LINE_COUNT];

/// Format the settings and link mode into display lines
pub fn status_lines(values: &ControlValues, mode: LinkMode) -> StatusLines {
    let mut lines: StatusLines = Default::default();

    let header = match mode {
        LinkMode::Local => "Local Settings",
        LinkMode::Remote => "Remote Settings",
    };
    let _ = lines[0].push_str(header);

    // Lines are sized for the display; overflow can't happen with i8/u8
    let _ = write!(lines[1], "{:<w$}", "Speed:", w = VALUE_COLUMN);
    if values.speed() == 0 {
        let _ = write!(lines[1], "{:>3}", 0);
    } else {
        let _ = write!(lines[1], "{:>+3}", values.speed());
    }

    let _ = write!(
        lines[2],
        "{:<w$}{:>3}",
        "AbsSpeed:",
        values.abs_speed(),
        w = VALUE_COLUMN
    );
    let _ = write!(
        lines[3],
        "{:<w$}{:>3}",
        "Angle:",
        values.angle(),
        w = VALUE_COLUMN
    );

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_header() {
        let lines = status_lines(&ControlValues::default(), LinkMode::Local);
        assert_eq!(lines[0].as_str(), "Local Settings");
    }

    #[test]
    fn test_remote_layout() {
        let lines = status_lines(&ControlValues::new(5, 45), LinkMode::Remote);
        assert_eq!(lines[0].as_str(), "Remote Settings");
        assert_eq!(lines[1].as_str(), "Speed:     +5");
        assert_eq!(lines[2].as_str(), "AbsSpeed:   5");
        assert_eq!(lines[3].as_str(), "Angle:     45");
    }

    #[test]
    fn test_speed_sign_formatting() {
        let zero = status_lines(&ControlValues::new(0, 0), LinkMode::Local);
        assert_eq!(zero[1].as_str(), "Speed:      0");

        let two_digits = status_lines(&ControlValues::new(12, 0), LinkMode::Local);
        assert_eq!(two_digits[1].as_str(), "Speed:    +12");

        let negative = status_lines(&ControlValues::new(-15, -90), LinkMode::Local);
        assert_eq!(negative[1].as_str(), "Speed:    -15");
        assert_eq!(negative[2].as_str(), "AbsSpeed:  15");
        assert_eq!(negative[3].as_str(), "Angle:    -90");
    }

    #[test]
    fn test_lines_fit_display() {
        let lines = status_lines(&ControlValues::new(i8::MIN, i8::MIN), LinkMode::Remote);
        for line in &lines {
            assert!(line.len() <= LINE_WIDTH);
        }
        assert_eq!(lines[1].as_str(), "Speed:    -128");
    }
}
