//! Frame encoding and decoding
//!
//! Frame format (5 bytes, fixed):
//! - START (1 byte): 0xAA synchronization byte (-86 as a signed byte)
//! - SPEED (1 byte): signed speed setting
//! - ANGLE (1 byte): signed angle offset
//! - CRC_HI (1 byte): high byte of CRC-16 over START, SPEED, ANGLE
//! - CRC_LO (1 byte): low byte of the same CRC-16
//!
//! There is no length field and no escaping. The receiver always consumes
//! whole 5-byte windows and does not search for the next START byte after
//! a bad one, so a single lost byte desynchronises the stream until the
//! windows happen to line up again.

use crate::crc::{self, CRC_SEED};
use crate::fifo::ByteFifo;
use crate::values::ControlValues;

/// Frame size in bytes
pub const FRAME_LEN: usize = 5;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// FIFO size used on both directions: four frames plus one spare byte
pub const FIFO_SIZE: usize = 4 * FRAME_LEN + 1;

/// Errors that can occur while decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// First byte was not [`FRAME_START`]
    InvalidStart(u8),
    /// Checksum mismatch
    InvalidChecksum { expected: u16, received: u16 },
}

/// A parsed or constructed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub speed: i8,
    pub angle: i8,
}

impl Frame {
    pub const fn new(speed: i8, angle: i8) -> Self {
        Self { speed, angle }
    }

    /// Frame carrying the settings of `values`
    pub const fn from_values(values: &ControlValues) -> Self {
        Self::new(values.speed(), values.angle())
    }

    /// Control values carried by this frame
    pub const fn values(&self) -> ControlValues {
        ControlValues::new(self.speed, self.angle)
    }

    /// CRC-16 over START, SPEED and ANGLE, in that order
    pub fn checksum(&self) -> u16 {
        let crc = crc::update(CRC_SEED, FRAME_START);
        let crc = crc::update(crc, self.speed as u8);
        crc::update(crc, self.angle as u8)
    }

    /// Encode this frame into its wire representation
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let crc = self.checksum();
        [
            FRAME_START,
            self.speed as u8,
            self.angle as u8,
            (crc >> 8) as u8,
            (crc & 0x00FF) as u8,
        ]
    }

    /// Decode a frame from exactly [`FRAME_LEN`] bytes
    pub fn decode(bytes: &[u8; FRAME_LEN]) -> Result<Self, FrameError> {
        let [start, speed, angle, crc_hi, crc_lo] = *bytes;

        if start != FRAME_START {
            return Err(FrameError::InvalidStart(start));
        }

        let frame = Self::new(speed as i8, angle as i8);
        let expected = frame.checksum();
        let received = ((crc_hi as u16) << 8) | crc_lo as u16;

        if expected != received {
            return Err(FrameError::InvalidChecksum { expected, received });
        }

        Ok(frame)
    }
}

/// Build a frame from `values` and queue it for transmission
///
/// Best effort: if the TX FIFO can't take a whole frame the send is
/// skipped and false is returned. Partial frames are never queued.
pub fn build_and_enqueue_frame<const N: usize>(
    tx: &mut ByteFifo<N>,
    values: &ControlValues,
) -> bool {
    if tx.write_space() < FRAME_LEN {
        #[cfg(feature = "defmt")]
        defmt::trace!("TX FIFO full, frame dropped");
        return false;
    }
    tx.put_all(&Frame::from_values(values).encode())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let encoded = Frame::new(-20, 45).encode();

        assert_eq!(encoded[0], FRAME_START);
        assert_eq!(encoded[0] as i8, -86);
        assert_eq!(encoded[1] as i8, -20);
        assert_eq!(encoded[2] as i8, 45);

        let crc = crc::checksum(&[0xAA, (-20i8) as u8, 45]);
        assert_eq!(encoded[3], (crc >> 8) as u8);
        assert_eq!(encoded[4], crc as u8);
    }

    #[test]
    fn test_frame_roundtrip() {
        let original = Frame::new(-20, 45);
        let decoded = Frame::decode(&original.encode()).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(decoded.values().abs_speed(), 20);
    }

    #[test]
    fn test_low_crc_bit_flip_rejected() {
        let mut encoded = Frame::new(-20, 45).encode();
        encoded[4] ^= 0x01;
        assert!(matches!(
            Frame::decode(&encoded),
            Err(FrameError::InvalidChecksum { .. })
        ));
    }

    #[test]
    fn test_corrupted_payload_rejected() {
        let mut encoded = Frame::new(5, 90).encode();
        encoded[1] = 6;
        assert!(matches!(
            Frame::decode(&encoded),
            Err(FrameError::InvalidChecksum { .. })
        ));
    }

    #[test]
    fn test_invalid_start_rejected() {
        let mut encoded = Frame::new(5, 90).encode();
        encoded[0] = 0x55;
        assert_eq!(Frame::decode(&encoded), Err(FrameError::InvalidStart(0x55)));
    }

    #[test]
    fn test_enqueue_pushes_five_bytes_in_order() {
        let mut tx: ByteFifo<FIFO_SIZE> = ByteFifo::new();
        let values = ControlValues::new(-20, 45);

        assert!(build_and_enqueue_frame(&mut tx, &values));
        assert_eq!(tx.read_size(), FRAME_LEN);
        assert_eq!(tx.take::<FRAME_LEN>(), Some(Frame::new(-20, 45).encode()));
    }

    #[test]
    fn test_enqueue_skipped_without_room() {
        let mut tx: ByteFifo<FIFO_SIZE> = ByteFifo::new();
        let values = ControlValues::new(1, 2);

        for _ in 0..4 {
            assert!(build_and_enqueue_frame(&mut tx, &values));
        }
        // One spare byte left: not enough for a fifth frame
        assert_eq!(tx.write_space(), 1);
        assert!(!build_and_enqueue_frame(&mut tx, &values));
        assert_eq!(tx.read_size(), 4 * FRAME_LEN);
    }
}
